//! Core types for cc-switch
//!
//! This module holds the error system shared by every command:
//! - [`CcSwitchError`] - Enumerated error types covering each failure mode
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to the user-friendly format
//!
//! # Error Handling Pattern
//!
//! ```rust,no_run
//! use cc_switch::core::{CcSwitchError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn example_operation() -> Result<String> {
//!     Err(CcSwitchError::HomeDirNotFound.into())
//! }
//!
//! if let Err(e) = example_operation() {
//!     user_friendly_error(e).display();
//! }
//! ```

pub mod error;

pub use error::{CcSwitchError, ErrorContext, user_friendly_error};
