//! Release metadata lookup and platform asset selection.
//!
//! The release endpoint returns the GitHub latest-release document; only the tag
//! and the asset list are used:
//!
//! ```json
//! { "tag_name": "v1.1.0",
//!   "assets": [{ "name": "cc-switch-linux-x64", "browser_download_url": "https://..." }] }
//! ```
//!
//! Metadata is fetched fresh for every check and never cached.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::constants::APP_NAME;
use crate::core::CcSwitchError;
use crate::upgrade::config::UpgradeConfig;
use crate::utils::platform::{release_arch_name, release_os_name};
use crate::version::VersionComparator;

/// `(os, arch)` pairs that have a published binary.
pub const SUPPORTED_PLATFORMS: &[(&str, &str)] =
    &[("darwin", "arm64"), ("darwin", "x64"), ("linux", "x64")];

/// A downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
}

/// The latest published release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseInfo {
    #[serde(rename = "tag_name")]
    pub tag: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl ReleaseInfo {
    /// The tag without its leading `v`.
    #[must_use]
    pub fn version(&self) -> &str {
        VersionComparator::strip_prefix(&self.tag)
    }
}

/// Operating system and architecture, spelled the way release assets are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformKey {
    pub os: String,
    pub arch: String,
}

impl PlatformKey {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// The platform this binary was built for.
    #[must_use]
    pub fn current() -> Self {
        Self::new(
            release_os_name(std::env::consts::OS),
            release_arch_name(std::env::consts::ARCH),
        )
    }

    /// Name of the release asset for this platform.
    ///
    /// # Errors
    ///
    /// Returns [`CcSwitchError::UnsupportedPlatform`] for pairs without a
    /// published binary.
    pub fn asset_name(&self) -> Result<String, CcSwitchError> {
        let supported = SUPPORTED_PLATFORMS
            .iter()
            .any(|(os, arch)| *os == self.os && *arch == self.arch);

        if supported {
            Ok(format!("{APP_NAME}-{}-{}", self.os, self.arch))
        } else {
            Err(CcSwitchError::UnsupportedPlatform {
                os: self.os.clone(),
                arch: self.arch.clone(),
            })
        }
    }
}

/// Picks the asset for `platform` out of `release`.
///
/// # Errors
///
/// - [`CcSwitchError::UnsupportedPlatform`] when the platform has no asset name
/// - [`CcSwitchError::AssetNotFound`] when the release lacks that asset
pub fn select_asset<'a>(
    release: &'a ReleaseInfo,
    platform: &PlatformKey,
) -> Result<&'a ReleaseAsset, CcSwitchError> {
    let expected = platform.asset_name()?;
    release.assets.iter().find(|asset| asset.name == expected).ok_or_else(|| {
        CcSwitchError::AssetNotFound {
            asset: expected,
            tag: release.tag.clone(),
        }
    })
}

/// Result of comparing the latest release against the running version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCheck {
    pub has_update: bool,
    /// Latest version without the leading `v`.
    pub latest_version: String,
    pub release: ReleaseInfo,
}

impl UpdateCheck {
    #[must_use]
    pub fn from_release(release: ReleaseInfo, current_version: &str) -> Self {
        let latest_version = release.version().to_string();
        let has_update = VersionComparator::is_newer(&latest_version, current_version);
        Self {
            has_update,
            latest_version,
            release,
        }
    }
}

/// Source of release information for the update flow.
pub trait ReleaseSource {
    /// Fetches the latest release and compares it with `current_version`.
    fn check_for_updates(
        &self,
        current_version: &str,
    ) -> impl Future<Output = Result<UpdateCheck, CcSwitchError>> + Send;
}

/// HTTP client for the release endpoint.
pub struct ReleaseClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl ReleaseClient {
    /// # Errors
    ///
    /// Returns [`CcSwitchError::UpdateCheckFailed`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &UpgradeConfig) -> Result<Self, CcSwitchError> {
        Ok(Self {
            client: build_http_client(config)?,
            endpoint: config.release_url.clone(),
            timeout: config.check_timeout,
        })
    }

    /// Fetches the latest release document.
    ///
    /// # Errors
    ///
    /// - [`CcSwitchError::NetworkTimeout`] when the request exceeds its limit
    /// - [`CcSwitchError::UpdateCheckFailed`] for connection failures, non-success
    ///   status codes and undecodable payloads
    pub async fn fetch_latest(&self) -> Result<ReleaseInfo, CcSwitchError> {
        debug!("Fetching release metadata from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CcSwitchError::UpdateCheckFailed {
                reason: format!("release endpoint returned HTTP {status}"),
            });
        }

        let release: ReleaseInfo = response.json().await.map_err(|e| self.request_error(e))?;
        debug!("Latest release is {} with {} assets", release.tag, release.assets.len());
        Ok(release)
    }

    fn request_error(&self, error: reqwest::Error) -> CcSwitchError {
        if error.is_timeout() {
            CcSwitchError::NetworkTimeout {
                operation: "release check".to_string(),
                seconds: self.timeout.as_secs(),
            }
        } else if error.is_decode() {
            CcSwitchError::UpdateCheckFailed {
                reason: format!("invalid release metadata: {error}"),
            }
        } else {
            CcSwitchError::UpdateCheckFailed {
                reason: error.to_string(),
            }
        }
    }
}

impl ReleaseSource for ReleaseClient {
    async fn check_for_updates(&self, current_version: &str) -> Result<UpdateCheck, CcSwitchError> {
        let release = self.fetch_latest().await?;
        Ok(UpdateCheck::from_release(release, current_version))
    }
}

/// HTTP client shared by the release lookup and the artifact download.
///
/// GitHub rejects API requests without a `User-Agent`.
pub(crate) fn build_http_client(config: &UpgradeConfig) -> Result<reqwest::Client, CcSwitchError> {
    reqwest::Client::builder()
        .user_agent(format!("{APP_NAME}/{}", crate::version::current_version()))
        .connect_timeout(config.connect_timeout)
        .build()
        .map_err(|e| CcSwitchError::UpdateCheckFailed {
            reason: format!("failed to initialise HTTP client: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{Route, TestServer, release_json};

    fn client_for(url: String, check_timeout: Duration) -> ReleaseClient {
        ReleaseClient::new(&UpgradeConfig {
            release_url: url,
            check_timeout,
            ..UpgradeConfig::default()
        })
        .unwrap()
    }

    fn release(tag: &str, names: &[&str]) -> ReleaseInfo {
        ReleaseInfo {
            tag: tag.to_string(),
            assets: names
                .iter()
                .map(|name| ReleaseAsset {
                    name: (*name).to_string(),
                    download_url: format!("https://example.com/{name}"),
                })
                .collect(),
        }
    }

    #[test]
    fn test_asset_name_supported() {
        assert_eq!(
            PlatformKey::new("darwin", "arm64").asset_name().unwrap(),
            "cc-switch-darwin-arm64"
        );
        assert_eq!(PlatformKey::new("darwin", "x64").asset_name().unwrap(), "cc-switch-darwin-x64");
        assert_eq!(PlatformKey::new("linux", "x64").asset_name().unwrap(), "cc-switch-linux-x64");
    }

    #[test]
    fn test_asset_name_unsupported() {
        let err = PlatformKey::new("windows", "x64").asset_name().unwrap_err();
        assert!(matches!(
            err,
            CcSwitchError::UnsupportedPlatform { ref os, ref arch } if os == "windows" && arch == "x64"
        ));

        assert!(PlatformKey::new("linux", "arm64").asset_name().is_err());
    }

    #[test]
    fn test_current_platform_uses_release_names() {
        let key = PlatformKey::current();
        assert_ne!(key.os, "macos");
        assert_ne!(key.arch, "x86_64");
        assert_ne!(key.arch, "aarch64");
    }

    #[test]
    fn test_select_asset_exact_match() {
        let info = release(
            "v1.1.0",
            &["cc-switch-linux-x64.sha256", "cc-switch-darwin-arm64", "cc-switch-linux-x64"],
        );

        let asset = select_asset(&info, &PlatformKey::new("linux", "x64")).unwrap();
        assert_eq!(asset.name, "cc-switch-linux-x64");
        assert_eq!(asset.download_url, "https://example.com/cc-switch-linux-x64");
    }

    #[test]
    fn test_select_asset_missing() {
        let info = release("v1.1.0", &["cc-switch-darwin-arm64"]);

        let err = select_asset(&info, &PlatformKey::new("linux", "x64")).unwrap_err();
        match err {
            CcSwitchError::AssetNotFound {
                asset,
                tag,
            } => {
                assert_eq!(asset, "cc-switch-linux-x64");
                assert_eq!(tag, "v1.1.0");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_update_check_strips_prefix() {
        let check = UpdateCheck::from_release(release("v1.1.0", &[]), "1.0.0");
        assert!(check.has_update);
        assert_eq!(check.latest_version, "1.1.0");

        let check = UpdateCheck::from_release(release("1.0.0", &[]), "1.0.0");
        assert!(!check.has_update);

        let check = UpdateCheck::from_release(release("v0.9.0", &[]), "1.0.0");
        assert!(!check.has_update);
    }

    #[test]
    fn test_release_info_deserialize() {
        let json = r#"{
            "tag_name": "v2.0.0",
            "name": "Release 2.0.0",
            "assets": [
                {"name": "cc-switch-linux-x64", "browser_download_url": "https://dl/x", "size": 10}
            ]
        }"#;

        let info: ReleaseInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.tag, "v2.0.0");
        assert_eq!(info.version(), "2.0.0");
        assert_eq!(info.assets.len(), 1);
        assert_eq!(info.assets[0].download_url, "https://dl/x");
    }

    #[test]
    fn test_release_info_without_assets() {
        let info: ReleaseInfo = serde_json::from_str(r#"{"tag_name": "v1.0.0"}"#).unwrap();
        assert!(info.assets.is_empty());
    }

    #[tokio::test]
    async fn test_check_for_updates_newer_release() {
        let server = TestServer::start(vec![(
            "/latest",
            Route::json(release_json(
                "v1.1.0",
                &[("cc-switch-linux-x64", "https://example.com/cc-switch-linux-x64")],
            )),
        )]);
        let client = client_for(server.url("/latest"), Duration::from_secs(5));

        let check = client.check_for_updates("1.0.0").await.unwrap();

        assert!(check.has_update);
        assert_eq!(check.latest_version, "1.1.0");
        assert_eq!(check.release.assets.len(), 1);
    }

    #[tokio::test]
    async fn test_check_for_updates_invalid_payload() {
        let server = TestServer::start(vec![("/latest", Route::json("not json"))]);
        let client = client_for(server.url("/latest"), Duration::from_secs(5));

        let err = client.check_for_updates("1.0.0").await.unwrap_err();

        assert!(matches!(err, CcSwitchError::UpdateCheckFailed { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_check_for_updates_error_status() {
        let server = TestServer::start(vec![("/latest", Route::status(500))]);
        let client = client_for(server.url("/latest"), Duration::from_secs(5));

        let err = client.check_for_updates("1.0.0").await.unwrap_err();

        match err {
            CcSwitchError::UpdateCheckFailed { reason } => assert!(reason.contains("500")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_check_for_updates_timeout() {
        // Own server: a delayed route blocks every request queued behind it
        let server = TestServer::start(vec![(
            "/slow",
            Route::json(release_json("v1.1.0", &[])).delayed(Duration::from_secs(3)),
        )]);
        let client = client_for(server.url("/slow"), Duration::from_secs(1));

        let err = client.check_for_updates("1.0.0").await.unwrap_err();

        assert!(
            matches!(err, CcSwitchError::NetworkTimeout { seconds: 1, .. }),
            "got {err:?}"
        );
    }
}
