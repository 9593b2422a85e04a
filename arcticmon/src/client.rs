//! Minimal HTTP client helpers for the dashboard server's API.

use std::fs;

use reqwest::{Certificate, Client, RequestBuilder};
use std::time::Duration;
use url::Url;

use crate::error::{ClientError, ClientResult};

// Only the connect phase is bounded client-wide; the live stream never
// finishes, so whole-request timeouts are set per call instead.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct BasicAuth {
    pub user: String,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ServerClient {
    http: Client,
    base: Url,
    auth: Option<BasicAuth>,
}

impl ServerClient {
    /// `base` is the server root, e.g. `http://10.0.0.5:8080`. A path prefix
    /// (reverse proxy) is kept.
    pub fn new(base: &str, tls_ca: Option<&str>, auth: Option<BasicAuth>) -> ClientResult<Self> {
        let mut base = Url::parse(base)?;
        if base.cannot_be_a_base() {
            return Err(ClientError::NotABase(base.to_string()));
        }
        if !base.path().ends_with('/') {
            let p = format!("{}/", base.path());
            base.set_path(&p);
        }

        let mut builder = Client::builder().connect_timeout(CONNECT_TIMEOUT);
        if let Some(path) = tls_ca {
            let pem = fs::read(path)?;
            builder = builder.add_root_certificate(Certificate::from_pem(&pem)?);
        }

        Ok(Self {
            http: builder.build()?,
            base,
            auth,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve `segments` below the base, percent-encoding each one.
    pub fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::NotABase(self.base.to_string()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    fn with_auth(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Some(a) => req.basic_auth(&a.user, a.password.as_deref()),
            None => req,
        }
    }

    pub fn get(&self, segments: &[&str]) -> ClientResult<RequestBuilder> {
        Ok(self.with_auth(self.http.get(self.url(segments)?)))
    }

    pub fn post(&self, segments: &[&str]) -> ClientResult<RequestBuilder> {
        Ok(self.with_auth(self.http.post(self.url(segments)?)))
    }
}
