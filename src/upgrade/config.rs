use std::time::Duration;

use tracing::warn;

use crate::constants::{
    CONNECT_TIMEOUT, DEFAULT_ELEVATION_PROGRAM, DEFAULT_RELEASE_URL, DOWNLOAD_TIMEOUT,
    ENV_DOWNLOAD_TIMEOUT, ENV_ELEVATE, ENV_HTTP_TIMEOUT, ENV_RELEASE_URL, RELEASE_CHECK_TIMEOUT,
};

/// Settings that control how `cc-switch update` talks to the network and
/// swaps the binary.
///
/// # Default Behavior
///
/// - Release metadata comes from the GitHub latest-release endpoint
/// - Metadata requests give up after 15 seconds, downloads after 5 minutes
/// - Privileged retries run through `sudo`
///
/// # Environment Overrides
///
/// | Variable | Field |
/// |----------|-------|
/// | `CC_SWITCH_RELEASE_URL` | [`release_url`](Self::release_url) |
/// | `CC_SWITCH_HTTP_TIMEOUT` | [`check_timeout`](Self::check_timeout) (seconds) |
/// | `CC_SWITCH_DOWNLOAD_TIMEOUT` | [`download_timeout`](Self::download_timeout) (seconds) |
/// | `CC_SWITCH_ELEVATE` | [`elevation_program`](Self::elevation_program) |
///
/// ```rust,no_run
/// use cc_switch::upgrade::config::UpgradeConfig;
///
/// let config = UpgradeConfig::from_env();
/// println!("checking {}", config.release_url);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeConfig {
    /// Endpoint returning the latest release as JSON.
    pub release_url: String,

    /// Overall limit for the release metadata request.
    pub check_timeout: Duration,

    /// Overall limit for downloading a release artifact.
    pub download_timeout: Duration,

    /// Limit for establishing any connection.
    pub connect_timeout: Duration,

    /// Program that runs the privileged retry (`sudo` unless overridden).
    pub elevation_program: String,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            release_url: DEFAULT_RELEASE_URL.to_string(),
            check_timeout: RELEASE_CHECK_TIMEOUT,
            download_timeout: DOWNLOAD_TIMEOUT,
            connect_timeout: CONNECT_TIMEOUT,
            elevation_program: DEFAULT_ELEVATION_PROGRAM.to_string(),
        }
    }
}

impl UpgradeConfig {
    /// Defaults with the process environment applied on top.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides taken from `lookup`.
    ///
    /// Empty values are ignored. Timeouts that are not a positive whole number
    /// of seconds are ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = value(ENV_RELEASE_URL) {
            config.release_url = url;
        }
        if let Some(timeout) = value(ENV_HTTP_TIMEOUT).and_then(|raw| parse_seconds(ENV_HTTP_TIMEOUT, &raw)) {
            config.check_timeout = timeout;
        }
        if let Some(timeout) =
            value(ENV_DOWNLOAD_TIMEOUT).and_then(|raw| parse_seconds(ENV_DOWNLOAD_TIMEOUT, &raw))
        {
            config.download_timeout = timeout;
        }
        if let Some(program) = value(ENV_ELEVATE) {
            config.elevation_program = program;
        }

        config
    }
}

fn parse_seconds(key: &str, raw: &str) -> Option<Duration> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            warn!("Ignoring {key}={raw:?}: expected a positive number of seconds");
            None
        }
    }
}
