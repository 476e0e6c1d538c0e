use super::auth::{challenge_answer, AuthRequest, CHALLENGE_HEADER, REALM_HEADER};
use super::cookie_store::PersistentCookieStore;
use crate::http_error;
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use route_sync_domain::config::RouterConfig;
use route_sync_domain::DomainError;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Authenticated HTTP session with one router.
///
/// Every call first makes sure the session is valid; a `401` on the call
/// itself triggers one re-authentication and one retry.
pub struct RouterClient {
    http: reqwest::Client,
    base_url: Url,
    host: String,
    login: String,
    password: String,
    handshake: Mutex<()>,
}

impl RouterClient {
    pub fn new(config: &RouterConfig) -> Result<Self, DomainError> {
        let base_url = Self::base_url(&config.host)?;
        let host = base_url
            .host_str()
            .map(str::to_string)
            .unwrap_or_else(|| config.host.clone());

        let session = Arc::new(PersistentCookieStore::open(
            &config.session_file,
            base_url.clone(),
        ));

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .cookie_provider(session)
            .build()
            .map_err(|e| DomainError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            host,
            login: config.login.clone(),
            password: config.password.clone(),
            handshake: Mutex::new(()),
        })
    }

    /// Accepts `192.168.1.1`, `http://192.168.1.1` or a URL with a path prefix.
    fn base_url(raw: &str) -> Result<Url, DomainError> {
        let raw = raw.trim();
        let with_scheme = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("http://{}", raw)
        };

        let mut url = Url::parse(&with_scheme)
            .map_err(|e| DomainError::ConfigError(format!("Invalid router host '{}': {}", raw, e)))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> Result<Url, DomainError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| DomainError::ConfigError(format!("Invalid router path '{}': {}", path, e)))
    }

    fn classify(&self, error: reqwest::Error) -> DomainError {
        http_error::classify(&error, &self.host)
    }

    #[instrument(skip(self), fields(host = %self.host))]
    pub async fn ensure_authenticated(&self) -> Result<(), DomainError> {
        let _guard = self.handshake.lock().await;

        let probe = self
            .http
            .get(self.url("auth")?)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        match probe.status() {
            StatusCode::OK => Ok(()),
            StatusCode::UNAUTHORIZED => {
                let realm = header_value(&probe, REALM_HEADER);
                let challenge = header_value(&probe, CHALLENGE_HEADER);
                match (realm, challenge) {
                    (Some(realm), Some(challenge)) => self.answer_challenge(&realm, &challenge).await,
                    _ => Err(DomainError::Authentication(
                        "missing authentication headers".to_string(),
                    )),
                }
            }
            status => Err(DomainError::UnexpectedResponse(format!(
                "unexpected response from /auth: HTTP {}",
                status.as_u16()
            ))),
        }
    }

    async fn answer_challenge(&self, realm: &str, challenge: &str) -> Result<(), DomainError> {
        let body = AuthRequest {
            login: &self.login,
            password: challenge_answer(&self.login, realm, &self.password, challenge),
        };

        let response = self
            .http
            .post(self.url("auth")?)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        if response.status() == StatusCode::OK {
            info!(host = %self.host, "Authenticated with router");
            Ok(())
        } else {
            warn!(host = %self.host, status = response.status().as_u16(), "Router rejected credentials");
            Err(DomainError::Authentication(format!(
                "router rejected credentials for '{}' (HTTP {})",
                self.login,
                response.status().as_u16()
            )))
        }
    }

    pub async fn get(&self, path: &str) -> Result<Value, DomainError> {
        self.ensure_authenticated().await?;
        let url = self.url(path)?;
        self.send_json(path, || self.http.get(url.clone())).await
    }

    pub async fn post_rci(&self, body: &Value) -> Result<Value, DomainError> {
        self.ensure_authenticated().await?;
        let url = self.url("rci/")?;
        self.send_json("rci/", || self.http.post(url.clone()).json(body))
            .await
    }

    async fn send_json<F>(&self, path: &str, build: F) -> Result<Value, DomainError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut response = build().send().await.map_err(|e| self.classify(e))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            debug!(path, "Session expired, re-authenticating");
            self.ensure_authenticated().await?;
            response = build().send().await.map_err(|e| self.classify(e))?;
        }

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DomainError::RouterApi {
                messages: vec![format!(
                    "HTTP {} from /{}: {}",
                    status.as_u16(),
                    path.trim_start_matches('/'),
                    text.trim()
                )],
            });
        }

        response.json::<Value>().await.map_err(|e| {
            DomainError::UnexpectedResponse(format!("Invalid JSON from /{}: {}", path, e))
        })
    }
}

fn header_value(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .filter(|v| !v.is_empty())
}
