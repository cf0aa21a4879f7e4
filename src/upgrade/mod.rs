//! Self-update for the cc-switch binary.
//!
//! # Architecture Overview
//!
//! - **[`ReleaseClient`]**: fetches the latest release metadata and decides
//!   whether it is newer than the running binary
//! - **[`BinaryReplacer`]**: downloads a release artifact and swaps it in for
//!   the running executable, directly or through an elevation program
//! - **[`UpdateOrchestrator`]**: drives the interactive flow and finishes by
//!   repairing or refreshing shell completions
//! - **[`UpgradeConfig`]**: endpoint, timeouts and elevation program, read from
//!   `CC_SWITCH_*` environment variables
//!
//! ## Update Process Flow
//!
//! ```text
//! Checking ──► UpToDate ───────────────────────────┐
//!    │                                             │
//!    └──► UpdateAvailable ──► Declined ────────────┤
//!               │                                  ▼
//!               └──► Replacing ──────────► RepairingCompletions ──► Done
//!                       │                          ▲
//!                       └──► PermissionRetry ──────┘
//! ```
//!
//! A permission failure during replacement offers one retry through the
//! elevation program. Declining it ends the flow with the exact command that
//! finishes the update by hand.
//!
//! # Platform Support
//!
//! Release artifacts are named `cc-switch-<os>-<arch>`, for `darwin` and
//! `linux` on `x64` and `arm64`. Other platforms fail before anything is
//! downloaded.
//!
//! # Example
//!
//! ```rust,no_run
//! use cc_switch::upgrade::{ReleaseClient, ReleaseSource, UpgradeConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = UpgradeConfig::from_env();
//! let client = ReleaseClient::new(&config)?;
//! let check = client.check_for_updates("1.0.0").await?;
//! if check.has_update {
//!     println!("{} is available", check.latest_version);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod orchestrator;
pub mod release;
pub mod replacer;

pub use config::UpgradeConfig;
pub use orchestrator::{Prompter, UpdateOrchestrator, UpdateOutcome, UpdateState};
pub use release::{
    PlatformKey, ReleaseAsset, ReleaseClient, ReleaseInfo, ReleaseSource, UpdateCheck,
    select_asset,
};
pub use replacer::{BinaryInstall, BinaryReplacer, manual_update_command};
