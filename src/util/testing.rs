//! Test support: logging setup and a scripted transport

use std::collections::VecDeque;
use std::env;
use std::sync::{Mutex, MutexGuard, Once, PoisonError};

use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::infrastructure::traits::{HttpMethod, Transport, TransportError};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "debug");
        }
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_test_writer()
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// A request as seen by [`FakeTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Vec<u8>>,
}

impl RecordedRequest {
    /// Body parsed as JSON; `Null` when absent or not JSON.
    pub fn json(&self) -> serde_json::Value {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_slice(b).ok())
            .unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug)]
enum Reply {
    Body(String),
    Status(u16),
}

#[derive(Debug)]
struct Route {
    method: HttpMethod,
    path: String,
    replies: VecDeque<Reply>,
}

/// Scripted transport: answers exact `(method, path)` routes and records
/// every request. Unrouted requests get HTTP 404.
///
/// A route scripted several times answers in order; the last reply repeats.
#[derive(Debug, Default)]
pub struct FakeTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, method: HttpMethod, path: &str, reply: Reply) -> Self {
        {
            let mut routes = lock(&self.routes);
            match routes
                .iter_mut()
                .find(|r| r.method == method && r.path == path)
            {
                Some(route) => route.replies.push_back(reply),
                None => routes.push(Route {
                    method,
                    path: path.to_string(),
                    replies: VecDeque::from([reply]),
                }),
            }
        }
        self
    }

    /// Answer `method path` with a 200 and `body`.
    pub fn respond(self, method: HttpMethod, path: &str, body: impl Into<String>) -> Self {
        self.push(method, path, Reply::Body(body.into()))
    }

    /// Answer `method path` with a non-2xx status.
    pub fn fail(self, method: HttpMethod, path: &str, status: u16) -> Self {
        self.push(method, path, Reply::Status(status))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    pub fn paths(&self) -> Vec<String> {
        lock(&self.requests).iter().map(|r| r.path.clone()).collect()
    }
}

impl Transport for FakeTransport {
    fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>, TransportError> {
        lock(&self.requests).push(RecordedRequest {
            method,
            path: path.to_string(),
            body: body.map(<[u8]>::to_vec),
        });

        let mut routes = lock(&self.routes);
        let reply = routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
            .and_then(|route| {
                if route.replies.len() > 1 {
                    route.replies.pop_front()
                } else {
                    route.replies.front().map(|r| match r {
                        Reply::Body(b) => Reply::Body(b.clone()),
                        Reply::Status(s) => Reply::Status(*s),
                    })
                }
            });

        let status_error = |status| TransportError::Status {
            method,
            path: path.to_string(),
            status,
            body: String::new(),
        };
        match reply {
            Some(Reply::Body(body)) => Ok(body.into_bytes()),
            Some(Reply::Status(status)) => Err(status_error(status)),
            None => Err(status_error(404)),
        }
    }
}
