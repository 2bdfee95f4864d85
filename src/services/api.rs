use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::models::error::AppError;

/// Every backend endpoint wraps its payload in this envelope.
#[derive(Debug, serde::Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Default)]
struct TokenStoreInner {
    token: Option<String>,
    on_invalidated: Option<Rc<dyn Fn()>>,
}

/// Current bearer token, shared between the auth context (writer) and the
/// API client (reader). All access happens on the UI thread, so a `RefCell`
/// is enough.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Rc<RefCell<TokenStoreInner>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.borrow().token.clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        self.inner.borrow_mut().token = Some(token.into());
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().token = None;
    }

    /// Clears the token and notifies the auth context that the session is no
    /// longer valid. Called by the client when the backend rejects the token.
    pub fn invalidate(&self) {
        let listener = {
            let mut inner = self.inner.borrow_mut();
            inner.token = None;
            inner.on_invalidated.clone()
        };
        if let Some(listener) = listener {
            listener();
        }
    }

    pub fn set_on_invalidated(&self, listener: impl Fn() + 'static) {
        self.inner.borrow_mut().on_invalidated = Some(Rc::new(listener));
    }
}

/// HTTP client for the analytics backend. Injects the current bearer token
/// into every request and unwraps the `{ success, data }` envelope. Does not
/// retry; retry policy lives in `services::retry` and is applied by callers.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: AppConfig,
    tokens: TokenStore,
}

impl ApiClient {
    pub fn new(config: AppConfig, tokens: TokenStore) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            config,
            tokens,
        })
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let request = self.http.get(self.config.endpoint_url(path));
        self.execute(request).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.http.post(self.config.endpoint_url(path)).json(body);
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, AppError> {
        let request = match self.tokens.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| Self::classify_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = Self::error_for_status(status, &body);
            if matches!(error, AppError::AuthError(_)) {
                // Expired or revoked token: drop it so the auth context can
                // transition to anonymous instead of looping on 401s.
                self.tokens.invalidate();
            }
            return Err(error);
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| AppError::DataError(format!("Failed to parse response: {e}")))?;

        Self::unwrap_envelope(envelope)
    }

    fn unwrap_envelope<T>(envelope: ApiEnvelope<T>) -> Result<T, AppError> {
        if !envelope.success {
            return Err(AppError::ApiError(
                envelope
                    .message
                    .unwrap_or_else(|| "Backend reported failure".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| AppError::DataError("Response envelope missing data".to_string()))
    }

    /// Converts a reqwest error into an appropriate `AppError`.
    fn classify_error(error: &reqwest::Error) -> AppError {
        if error.is_timeout() {
            AppError::NetworkError(format!("Request timeout: {error}"))
        } else if error.is_request() {
            AppError::NetworkError(format!("Request error: {error}"))
        } else {
            AppError::NetworkError(format!("Network error: {error}"))
        }
    }

    /// Creates an error based on HTTP status code.
    fn error_for_status(status: reqwest::StatusCode, body: &str) -> AppError {
        match status.as_u16() {
            429 => AppError::RateLimited,
            401 | 403 => AppError::AuthError(format!("Authentication failed: {status}")),
            404 => AppError::NotFound(format!("Resource not found: {body}")),
            400..=499 => AppError::ApiError(format!("Client error {status}: {body}")),
            500..=599 => AppError::ServerError(format!("Server error {status}: {body}")),
            _ => AppError::ApiError(format!("Unexpected status {status}: {body}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_error_for_status_mapping() {
        assert!(matches!(
            ApiClient::error_for_status(reqwest::StatusCode::UNAUTHORIZED, ""),
            AppError::AuthError(_)
        ));
        assert!(matches!(
            ApiClient::error_for_status(reqwest::StatusCode::TOO_MANY_REQUESTS, ""),
            AppError::RateLimited
        ));
        assert!(matches!(
            ApiClient::error_for_status(reqwest::StatusCode::BAD_GATEWAY, "upstream down"),
            AppError::ServerError(_)
        ));
        assert!(matches!(
            ApiClient::error_for_status(reqwest::StatusCode::UNPROCESSABLE_ENTITY, ""),
            AppError::ApiError(_)
        ));
    }

    #[test]
    fn test_retryability_follows_taxonomy() {
        assert!(
            ApiClient::error_for_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "")
                .is_retryable()
        );
        assert!(!ApiClient::error_for_status(reqwest::StatusCode::FORBIDDEN, "").is_retryable());
        assert!(!ApiClient::error_for_status(reqwest::StatusCode::NOT_FOUND, "").is_retryable());
    }

    #[test]
    fn test_envelope_unwrapping() {
        let json = r#"{"success": true, "data": {"value": 7}}"#;
        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        let data = ApiClient::unwrap_envelope(envelope).unwrap();
        assert_eq!(data["value"], 7);

        let json = r#"{"success": false, "message": "필터가 잘못되었습니다"}"#;
        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        let error = ApiClient::unwrap_envelope(envelope).unwrap_err();
        assert!(error.to_string().contains("필터가 잘못되었습니다"));
    }

    #[test]
    fn test_token_store_invalidation_notifies() {
        let tokens = TokenStore::new();
        tokens.set_token("tok_1");
        assert_eq!(tokens.token().as_deref(), Some("tok_1"));

        let fired = Rc::new(Cell::new(false));
        let observed = fired.clone();
        tokens.set_on_invalidated(move || observed.set(true));

        tokens.invalidate();
        assert_eq!(tokens.token(), None);
        assert!(fired.get());

        // A plain clear does not notify.
        fired.set(false);
        tokens.set_token("tok_2");
        tokens.clear();
        assert!(!fired.get());
    }
}
