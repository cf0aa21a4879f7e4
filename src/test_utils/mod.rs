//! Test utilities for cc-switch
//!
//! - [`TestServer`] serves release metadata and artifacts from localhost
//! - [`FakeHome`] is an isolated home directory with a controllable login shell
//!   and `PATH`, for exercising shell detection and completion installs

pub mod server;

pub use server::{Route, TestServer, release_json};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::completion::ShellEnvironment;

/// A temporary home directory plus the environment the probe would see.
pub struct FakeHome {
    pub dir: TempDir,
    pub login_shell: Option<String>,
    bin_dir: PathBuf,
}

impl FakeHome {
    /// Empty home, no login shell, nothing on `PATH`.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let bin_dir = dir.path().join(".fake-bin");
        std::fs::create_dir_all(&bin_dir).unwrap();
        Self {
            dir,
            login_shell: None,
            bin_dir,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn with_login_shell(mut self, shell: &str) -> Self {
        self.login_shell = Some(shell.to_string());
        self
    }

    /// Writes a file relative to the home directory.
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        let path = self.dir.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
        self
    }

    pub fn with_dir(self, relative: &str) -> Self {
        std::fs::create_dir_all(self.dir.path().join(relative)).unwrap();
        self
    }

    /// Puts an executable named `name` on the fake `PATH`.
    pub fn with_command(self, name: &str) -> Self {
        let path = self.bin_dir.join(name);
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        self
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(relative)).unwrap()
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.dir.path().join(relative).exists()
    }

    pub fn environment(&self) -> ShellEnvironment {
        ShellEnvironment {
            home: self.dir.path().to_path_buf(),
            login_shell: self.login_shell.clone(),
            path: Some(OsString::from(self.bin_dir.as_os_str())),
        }
    }
}
