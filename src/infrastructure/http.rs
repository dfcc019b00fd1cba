//! Blocking HTTPS transport backed by ureq

use std::time::Duration;

use tracing::{debug, trace};
use ureq::{Agent, RequestBuilder};
use url::Url;

use crate::domain::Credentials;
use crate::infrastructure::traits::{HttpMethod, Transport, TransportError};

/// REST root below the configured host.
pub const API_ROOT: &str = "/external/api/rest/";

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "ACTID";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolve a configured hostname to the API base URL.
///
/// Bare hosts get `https://`; an explicit `http://` or `https://` origin is
/// kept as given.
pub fn base_url(hostname: &str) -> Result<Url, TransportError> {
    let host = hostname.trim().trim_end_matches('/');
    let origin = if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    };
    let raw = format!("{origin}{API_ROOT}");
    Url::parse(&raw).map_err(|source| TransportError::Url { url: raw, source })
}

/// Real transport: one agent, credentials attached to every request.
pub struct UreqTransport {
    agent: Agent,
    base: Url,
    credentials: Credentials,
}

impl UreqTransport {
    pub fn new(hostname: &str, credentials: Credentials) -> Result<Self, TransportError> {
        let base = base_url(hostname)?;
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .new_agent();
        debug!("transport base url: {}", base);
        Ok(Self {
            agent,
            base,
            credentials,
        })
    }

    fn authorize<B>(&self, builder: RequestBuilder<B>) -> RequestBuilder<B> {
        let builder = builder.header("Accept", "application/json");
        match &self.credentials {
            Credentials::Session { token } => {
                builder.header("Cookie", format!("{SESSION_COOKIE}={token}"))
            }
            Credentials::Password { username, password } => builder
                .header("x-auth-username", username.as_str())
                .header("x-auth-password", password.as_str()),
        }
    }
}

impl Transport for UreqTransport {
    fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>, TransportError> {
        let url = self.base.join(path).map_err(|source| TransportError::Url {
            url: path.to_string(),
            source,
        })?;
        debug!("{} {}", method, url);

        let result = match method {
            HttpMethod::Get => self.authorize(self.agent.get(url.as_str())).call(),
            HttpMethod::Put => {
                let builder = self.authorize(self.agent.put(url.as_str()));
                match body {
                    Some(bytes) => builder.content_type("application/json").send(bytes),
                    None => builder.send_empty(),
                }
            }
            HttpMethod::Post => {
                let builder = self.authorize(self.agent.post(url.as_str()));
                match body {
                    Some(bytes) => builder.content_type("application/json").send(bytes),
                    None => builder.send_empty(),
                }
            }
        };

        let network = |source: ureq::Error| TransportError::Network {
            method,
            path: path.to_string(),
            source: Box::new(source),
        };
        let mut response = result.map_err(network)?;
        let status = response.status().as_u16();
        let bytes = response.body_mut().read_to_vec().map_err(network)?;
        trace!("{} {} -> {} ({} bytes)", method, path, status, bytes.len());

        if !(200..300).contains(&status) {
            return Err(TransportError::Status {
                method,
                path: path.to_string(),
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("acme.ioffice.com", "https://acme.ioffice.com/external/api/rest/")]
    #[case("acme.ioffice.com/", "https://acme.ioffice.com/external/api/rest/")]
    #[case("http://127.0.0.1:8080", "http://127.0.0.1:8080/external/api/rest/")]
    #[case("https://acme.ioffice.com", "https://acme.ioffice.com/external/api/rest/")]
    fn given_hostname_when_resolving_base_then_api_root_appended(
        #[case] hostname: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(base_url(hostname).unwrap().as_str(), expected);
    }

    #[test]
    fn given_relative_path_when_joined_then_query_is_kept() {
        let base = base_url("acme.ioffice.com").unwrap();
        let url = base
            .join("v2/reservations/?showOnlyMyReservations=true")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://acme.ioffice.com/external/api/rest/v2/reservations/?showOnlyMyReservations=true"
        );
    }
}
