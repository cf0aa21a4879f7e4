//! Download a release artifact and swap it in for the running executable.
//!
//! The new binary is staged next to the executable as `<exe>.new`, marked
//! executable, and renamed over the original. The rename is the only step that
//! touches the installed binary, so a failed download or permission change
//! leaves it exactly as it was.
//!
//! When the install directory is not writable the swap fails with
//! [`CcSwitchError::PermissionDenied`]. The caller may then retry with
//! `elevated = true`, which stages the download in the temp directory and runs
//! the privileged steps through the elevation program:
//!
//! ```text
//! sudo install -m 755 /tmp/cc-switch-XXXX /usr/local/bin/cc-switch.new
//! sudo mv -f /usr/local/bin/cc-switch.new /usr/local/bin/cc-switch
//! ```

use std::ffi::OsStr;
use std::future::Future;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use crate::constants::APP_NAME;
use crate::core::CcSwitchError;
use crate::upgrade::config::UpgradeConfig;
use crate::upgrade::release::build_http_client;
use crate::utils::fs::sibling_path;
use crate::utils::progress::ProgressBar;

/// Replaces an installed executable with a downloaded artifact.
pub trait BinaryInstall {
    /// Downloads `download_url` and installs it at `executable`.
    fn replace(
        &self,
        executable: &Path,
        download_url: &str,
        elevated: bool,
    ) -> impl Future<Output = Result<(), CcSwitchError>> + Send;
}

/// [`BinaryInstall`] over HTTP and the local filesystem.
pub struct BinaryReplacer {
    client: reqwest::Client,
    download_timeout: Duration,
    elevation_program: String,
    show_progress: bool,
}

impl BinaryReplacer {
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be constructed.
    pub fn new(config: &UpgradeConfig) -> Result<Self, CcSwitchError> {
        Ok(Self {
            client: build_http_client(config)?,
            download_timeout: config.download_timeout,
            elevation_program: config.elevation_program.clone(),
            show_progress: true,
        })
    }

    /// Never draw a progress bar.
    #[must_use]
    pub const fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    #[must_use]
    pub fn elevation_program(&self) -> &str {
        &self.elevation_program
    }

    /// Downloads the artifact into memory.
    ///
    /// # Errors
    ///
    /// [`CcSwitchError::NetworkTimeout`] when the transfer exceeds the download
    /// limit, [`CcSwitchError::UpdateFailed`] for any other failure.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, CcSwitchError> {
        debug!("Downloading {url}");

        let mut response = self
            .client
            .get(url)
            .timeout(self.download_timeout)
            .send()
            .await
            .map_err(|e| self.download_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CcSwitchError::UpdateFailed {
                reason: format!("download returned HTTP {status}"),
            });
        }

        let total = response.content_length();
        let label = url.rsplit('/').next().unwrap_or(APP_NAME).to_string();
        let progress = if self.show_progress {
            ProgressBar::download(total, label)
        } else {
            ProgressBar::hidden()
        };

        let mut bytes = Vec::with_capacity(usize::try_from(total.unwrap_or(0)).unwrap_or(0));
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    progress.inc(chunk.len() as u64);
                    bytes.extend_from_slice(&chunk);
                }
                Ok(None) => break,
                Err(e) => {
                    progress.finish_and_clear();
                    return Err(self.download_error(e));
                }
            }
        }
        progress.finish_and_clear();

        if bytes.is_empty() {
            return Err(CcSwitchError::UpdateFailed {
                reason: "downloaded artifact is empty".to_string(),
            });
        }

        debug!("Downloaded {} bytes", bytes.len());
        Ok(bytes)
    }

    fn download_error(&self, error: reqwest::Error) -> CcSwitchError {
        if error.is_timeout() {
            CcSwitchError::NetworkTimeout {
                operation: "download".to_string(),
                seconds: self.download_timeout.as_secs(),
            }
        } else {
            CcSwitchError::UpdateFailed {
                reason: format!("download failed: {error}"),
            }
        }
    }

    async fn install_direct(&self, executable: &Path, bytes: &[u8]) -> Result<(), CcSwitchError> {
        let staged = sibling_path(executable, ".new");
        debug!("Staging new binary at {}", staged.display());

        if let Err(e) = tokio::fs::write(&staged, bytes).await {
            discard(&staged).await;
            return Err(io_failure("write", &staged, executable, &e));
        }

        if let Err(e) = make_executable(&staged).await {
            discard(&staged).await;
            return Err(CcSwitchError::UpdateFailed {
                reason: format!("failed to mark {} as executable: {e}", staged.display()),
            });
        }

        if let Err(e) = tokio::fs::rename(&staged, executable).await {
            discard(&staged).await;
            return Err(io_failure("replace", executable, executable, &e));
        }

        Ok(())
    }

    async fn install_elevated(&self, executable: &Path, bytes: &[u8]) -> Result<(), CcSwitchError> {
        let mut temp = tempfile::Builder::new()
            .prefix(&format!("{APP_NAME}-"))
            .tempfile()
            .map_err(|e| CcSwitchError::ElevatedUpdateFailed {
                reason: format!("failed to create temp file: {e}"),
            })?;
        temp.write_all(bytes).and_then(|()| temp.flush()).map_err(|e| {
            CcSwitchError::ElevatedUpdateFailed {
                reason: format!("failed to write temp file: {e}"),
            }
        })?;

        let staged = sibling_path(executable, ".new");
        self.run_elevated(&[
            OsStr::new("install"),
            OsStr::new("-m"),
            OsStr::new("755"),
            temp.path().as_os_str(),
            staged.as_os_str(),
        ])
        .await?;
        if let Err(e) = self
            .run_elevated(&[
                OsStr::new("mv"),
                OsStr::new("-f"),
                staged.as_os_str(),
                executable.as_os_str(),
            ])
            .await
        {
            // The staged file is root-owned, so only the elevation program can remove it
            if let Err(cleanup) =
                self.run_elevated(&[OsStr::new("rm"), OsStr::new("-f"), staged.as_os_str()]).await
            {
                warn!("Could not remove {}: {cleanup}", staged.display());
            }
            return Err(e);
        }

        Ok(())
    }

    async fn run_elevated(&self, args: &[&OsStr]) -> Result<(), CcSwitchError> {
        let rendered = std::iter::once(OsStr::new(&self.elevation_program))
            .chain(args.iter().copied())
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        debug!("Running {rendered}");

        // Inherited stdio so the elevation program can prompt for a password
        let status = tokio::process::Command::new(&self.elevation_program)
            .args(args)
            .status()
            .await
            .map_err(|e| CcSwitchError::ElevatedUpdateFailed {
                reason: format!("failed to run {}: {e}", self.elevation_program),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(CcSwitchError::ElevatedUpdateFailed {
                reason: format!("`{rendered}` exited with {status}"),
            })
        }
    }
}

impl BinaryInstall for BinaryReplacer {
    async fn replace(
        &self,
        executable: &Path,
        download_url: &str,
        elevated: bool,
    ) -> Result<(), CcSwitchError> {
        let bytes = self.download(download_url).await?;
        if elevated {
            self.install_elevated(executable, &bytes).await
        } else {
            self.install_direct(executable, &bytes).await
        }
    }
}

/// Shell command that performs the update by hand.
#[must_use]
pub fn manual_update_command(executable: &Path, download_url: &str, elevation_program: &str) -> String {
    let staged = std::env::temp_dir().join(APP_NAME);
    format!(
        "curl -fL -o '{}' '{download_url}' && {elevation_program} install -m 755 '{}' '{}'",
        staged.display(),
        staged.display(),
        executable.display()
    )
}

fn io_failure(operation: &str, path: &Path, executable: &Path, error: &std::io::Error) -> CcSwitchError {
    if error.kind() == ErrorKind::PermissionDenied {
        let dir = executable.parent().unwrap_or(executable);
        CcSwitchError::PermissionDenied {
            operation: format!("{operation} {}", path.display()),
            path: dir.display().to_string(),
            hint: format!(
                "{} is not writable by the current user. Retry with elevated privileges, or reinstall {APP_NAME} into a directory you own such as ~/.local/bin",
                dir.display()
            ),
        }
    } else {
        CcSwitchError::UpdateFailed {
            reason: format!("failed to {operation} {}: {error}", path.display()),
        }
    }
}

async fn discard(staged: &Path) {
    match tokio::fs::remove_file(staged).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove {}: {e}", staged.display()),
    }
}

#[cfg(unix)]
async fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).await
}

#[cfg(not(unix))]
async fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
