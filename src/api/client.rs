use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

/// Failures a caller may want to branch on: the transport never reached the
/// server, the server rejected the request with a message, or the body did
/// not decode into the expected shape.
#[derive(Debug)]
pub enum ApiError {
    Transport(reqwest::Error),
    Server { status: StatusCode, message: String },
    Decode(reqwest::Error),
    InvalidUrl(url::ParseError),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(err) => write!(f, "request failed: {err}"),
            ApiError::Server { message, .. } => write!(f, "{message}"),
            ApiError::Decode(err) => write!(f, "unexpected response body: {err}"),
            ApiError::InvalidUrl(err) => write!(f, "invalid request url: {err}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(err) | ApiError::Decode(err) => Some(err),
            ApiError::InvalidUrl(err) => Some(err),
            ApiError::Server { .. } => None,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Blocking HTTP client for the platform API. Shared across worker threads;
/// the bearer token is swapped on login/logout.
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Mutex<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("eventdeck admin console")
            .build()?;
        let mut base = base_url.trim_end_matches('/').to_string();
        base.push('/');
        Ok(Self {
            http,
            base_url: Url::parse(&base)?,
            token: Mutex::new(None),
        })
    }

    pub fn set_token(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    pub fn clear_token(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(ApiError::InvalidUrl)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self.token.lock().ok().and_then(|slot| slot.clone());
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorize(self.http.get(self.url(path)?));
        Self::handle(request.send().map_err(ApiError::Transport)?)
    }

    pub fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        pairs: &[(String, String)],
    ) -> Result<T, ApiError> {
        let mut url = self.url(path)?;
        url.query_pairs_mut().extend_pairs(pairs.iter());
        let request = self.authorize(self.http.get(url));
        Self::handle(request.send().map_err(ApiError::Transport)?)
    }

    pub fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.authorize(self.http.post(self.url(path)?)).json(body);
        Self::handle(request.send().map_err(ApiError::Transport)?)
    }

    pub fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.authorize(self.http.put(self.url(path)?)).json(body);
        Self::handle(request.send().map_err(ApiError::Transport)?)
    }

    pub fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorize(self.http.delete(self.url(path)?));
        Self::handle(request.send().map_err(ApiError::Transport)?)
    }

    fn handle<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return response.json().map_err(ApiError::Decode);
        }
        // Prefer the server's own message field over a bare status code.
        let message = response
            .json::<ErrorBody>()
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("server returned {status}"));
        Err(ApiError::Server { status, message })
    }
}
