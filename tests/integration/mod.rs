//! Integration test suite for cc-switch
//!
//! Runs the real binary against a temporary `HOME` and a local release
//! server, so nothing outside the temp directories is touched.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **completion**: Script output, usage text and `completion --install`
//! - **uninstall**: Confirmation handling
//! - **update**: Release checks, declined updates and completion repair
//!
//! No test lets `update` or `uninstall` reach the point of replacing or
//! deleting the binary under test.

mod common;

mod completion;
mod uninstall;
mod update;
