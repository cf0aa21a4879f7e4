//! Local HTTP server standing in for the release endpoint and asset host.

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use tiny_http::{Header, Response, Server, StatusCode};

/// What the server answers for one path.
#[derive(Clone)]
pub struct Route {
    status: u16,
    body: Vec<u8>,
    content_type: &'static str,
    delay: Option<Duration>,
}

impl Route {
    pub fn json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into().into_bytes(),
            content_type: "application/json",
            delay: None,
        }
    }

    pub fn bytes(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            body,
            content_type: "application/octet-stream",
            delay: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
            content_type: "text/plain",
            delay: None,
        }
    }

    /// Wait before answering.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A server on an ephemeral localhost port, stopped on drop.
pub struct TestServer {
    addr: SocketAddr,
    server: Arc<Server>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    pub fn start(routes: Vec<(&str, Route)>) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let addr = server.server_addr().to_ip().unwrap();
        let routes: Vec<(String, Route)> =
            routes.into_iter().map(|(path, route)| (path.to_string(), route)).collect();

        let worker = Arc::clone(&server);
        let handle = std::thread::spawn(move || {
            for request in worker.incoming_requests() {
                let route = routes.iter().find(|(path, _)| path == request.url()).map(|(_, r)| r);
                let Some(route) = route else {
                    let _ = request.respond(Response::empty(StatusCode(404)));
                    continue;
                };

                if let Some(delay) = route.delay {
                    std::thread::sleep(delay);
                }

                let mut response =
                    Response::from_data(route.body.clone()).with_status_code(StatusCode(route.status));
                if let Ok(header) = Header::from_bytes("Content-Type", route.content_type) {
                    response = response.with_header(header);
                }
                let _ = request.respond(response);
            }
        });

        Self {
            addr,
            server,
            handle: Some(handle),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Release document in the GitHub latest-release format.
pub fn release_json(tag: &str, assets: &[(&str, &str)]) -> String {
    let assets: Vec<serde_json::Value> = assets
        .iter()
        .map(|(name, url)| serde_json::json!({ "name": name, "browser_download_url": url }))
        .collect();
    serde_json::json!({ "tag_name": tag, "assets": assets }).to_string()
}
