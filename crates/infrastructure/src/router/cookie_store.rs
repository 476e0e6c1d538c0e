use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    base_url: String,
    cookies: Vec<String>,
}

/// Cookie jar for the router session, mirrored to a JSON file.
///
/// Several processes may share the file; the last writer wins, which is
/// harmless because a stale session only costs one extra handshake.
pub struct PersistentCookieStore {
    jar: Jar,
    base_url: Url,
    path: PathBuf,
}

impl PersistentCookieStore {
    pub fn open(path: impl Into<PathBuf>, base_url: Url) -> Self {
        let path = path.into();
        let jar = Jar::default();

        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<SessionFile>(&contents) {
                Ok(session) if session.base_url == base_url.as_str() => {
                    for cookie in &session.cookies {
                        jar.add_cookie_str(cookie, &base_url);
                    }
                    debug!(path = %path.display(), cookies = session.cookies.len(), "Loaded router session");
                }
                Ok(_) => debug!(path = %path.display(), "Session file belongs to another router"),
                Err(e) => warn!(path = %path.display(), error = %e, "Ignoring unreadable session file"),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to read session file"),
        }

        Self {
            jar,
            base_url,
            path,
        }
    }

    pub fn has_session(&self) -> bool {
        self.jar.cookies(&self.base_url).is_some()
    }

    fn persist(&self) {
        let cookies = self
            .jar
            .cookies(&self.base_url)
            .and_then(|header| header.to_str().ok().map(str::to_string))
            .map(|header| {
                header
                    .split(';')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let session = SessionFile {
            base_url: self.base_url.to_string(),
            cookies,
        };

        let result = serde_json::to_string_pretty(&session)
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(&self.path, json).map_err(|e| e.to_string()));

        if let Err(e) = result {
            warn!(path = %self.path.display(), error = %e, "Failed to persist router session");
        }
    }
}

impl CookieStore for PersistentCookieStore {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        self.jar.set_cookies(cookie_headers, url);
        self.persist();
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.jar.cookies(url)
    }
}
