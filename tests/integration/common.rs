//! Shared helpers for the integration suite.

// Not every helper is used by every test module
#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::thread::JoinHandle;

use assert_cmd::Command;
use tempfile::TempDir;
use tiny_http::{Response, Server, StatusCode};

/// A `cc-switch` command isolated from the developer's environment.
///
/// `HOME` points at `home`, the login shell is `shell`, `PATH` only holds
/// system directories, and colors and progress bars are off.
pub fn cc_switch(home: &Path, shell: &str) -> Command {
    let mut cmd = Command::cargo_bin("cc-switch").unwrap();
    cmd.env_clear()
        .env("HOME", home)
        .env("SHELL", shell)
        .env("PATH", "/usr/bin:/bin")
        .env("NO_COLOR", "1")
        .env("CC_SWITCH_NO_PROGRESS", "1")
        .env("CC_SWITCH_HTTP_TIMEOUT", "5");
    cmd
}

/// An empty temporary home directory.
pub fn temp_home() -> TempDir {
    TempDir::new().unwrap()
}

/// Serves one JSON document at `/latest` until dropped.
///
/// A trimmed-down copy of the crate's unit-test server, which is compiled only
/// under `cfg(test)` and so is not linked into this test binary.
pub struct ReleaseServer {
    addr: SocketAddr,
    server: Arc<Server>,
    handle: Option<JoinHandle<()>>,
}

impl ReleaseServer {
    /// Serves a release tagged `tag` with no assets.
    pub fn with_tag(tag: &str) -> Self {
        Self::start(200, format!(r#"{{"tag_name":"{tag}","assets":[]}}"#))
    }

    pub fn start(status: u16, body: String) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let addr = server.server_addr().to_ip().unwrap();

        let worker = Arc::clone(&server);
        let handle = std::thread::spawn(move || {
            for request in worker.incoming_requests() {
                let response = if request.url() == "/latest" {
                    Response::from_string(body.clone()).with_status_code(StatusCode(status))
                } else {
                    Response::from_string("").with_status_code(StatusCode(404))
                };
                let _ = request.respond(response);
            }
        });

        Self {
            addr,
            server,
            handle: Some(handle),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/latest", self.addr)
    }
}

impl Drop for ReleaseServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
