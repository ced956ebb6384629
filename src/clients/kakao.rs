//! Kakao OAuth token exchange and "send to me" memo delivery.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::{Value, json};
use std::fmt;
use tracing::info;

use crate::core::config::{KakaoConfig, required};
use crate::errors::DigestError;

pub const DEFAULT_AUTH_BASE_URL: &str = "https://kauth.kakao.com";
pub const DEFAULT_API_BASE_URL: &str = "https://kapi.kakao.com";

/// Form-urlencoded query values: alphanumerics and `*-._` pass through.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Link attached to every memo template.
const MEMO_WEB_URL: &str = "https://news.hada.io";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
}

/// Where the access token used for sending came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    RefreshToken,
    EnvAccessToken,
    AuthCode,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TokenSource::RefreshToken => "refresh_token",
            TokenSource::EnvAccessToken => "env_access_token",
            TokenSource::AuthCode => "auth_code",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    pub source: TokenSource,
    /// Refresh token worth persisting, if the exchange produced one.
    pub refresh_token: Option<String>,
}

/// Builds the consent URL that yields an authorization code.
#[must_use]
pub fn build_authorize_url(rest_api_key: &str, redirect_uri: &str) -> String {
    let client_id = utf8_percent_encode(rest_api_key, QUERY_VALUE);
    let redirect_uri = utf8_percent_encode(redirect_uri, QUERY_VALUE);
    format!(
        "{DEFAULT_AUTH_BASE_URL}/oauth/authorize?response_type=code&client_id={client_id}&redirect_uri={redirect_uri}&scope=talk_message"
    )
}

pub struct KakaoClient {
    http: HttpClient,
    auth_base_url: String,
    api_base_url: String,
}

impl KakaoClient {
    #[must_use]
    pub fn new(http: HttpClient) -> Self {
        Self::with_base_urls(http, DEFAULT_AUTH_BASE_URL, DEFAULT_API_BASE_URL)
    }

    #[must_use]
    pub fn with_base_urls(http: HttpClient, auth_base_url: &str, api_base_url: &str) -> Self {
        Self {
            http,
            auth_base_url: auth_base_url.trim_end_matches('/').to_string(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn request_token(
        &self,
        mut payload: Vec<(&str, String)>,
        client_secret: &str,
    ) -> Result<TokenResponse, DigestError> {
        if !client_secret.is_empty() {
            payload.push(("client_secret", client_secret.to_string()));
        }

        let resp = self
            .http
            .post(format!("{}/oauth/token", self.auth_base_url))
            .form(&payload)
            .send()
            .await
            .map_err(|e| DigestError::HttpError(format!("oauth/token request: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| DigestError::HttpError(format!("oauth/token body: {e}")))?;

        if !status.is_success() {
            return Err(DigestError::KakaoError(format!("Kakao token error: {body}")));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Exchange a one-time authorization code for tokens.
    /// # Errors
    /// Returns an error if the HTTP call fails or Kakao rejects the code.
    pub async fn exchange_auth_code(
        &self,
        rest_api_key: &str,
        redirect_uri: &str,
        auth_code: &str,
        client_secret: &str,
    ) -> Result<TokenResponse, DigestError> {
        let payload = vec![
            ("grant_type", "authorization_code".to_string()),
            ("client_id", rest_api_key.to_string()),
            ("redirect_uri", redirect_uri.to_string()),
            ("code", auth_code.to_string()),
        ];
        self.request_token(payload, client_secret).await
    }

    /// # Errors
    /// Returns an error if the HTTP call fails or Kakao rejects the refresh token.
    pub async fn refresh_access_token(
        &self,
        rest_api_key: &str,
        refresh_token: &str,
        client_secret: &str,
    ) -> Result<TokenResponse, DigestError> {
        let payload = vec![
            ("grant_type", "refresh_token".to_string()),
            ("client_id", rest_api_key.to_string()),
            ("refresh_token", refresh_token.to_string()),
        ];
        self.request_token(payload, client_secret).await
    }

    /// Post `text` to the user's own chat as a text template.
    /// # Errors
    /// Returns an error on transport failure, a non-success status, or a
    /// non-zero `result_code`.
    pub async fn send_memo(&self, access_token: &str, text: &str) -> Result<Value, DigestError> {
        let template_object = json!({
            "object_type": "text",
            "text": text,
            "link": {
                "web_url": MEMO_WEB_URL,
                "mobile_web_url": MEMO_WEB_URL
            }
        });
        let payload = [("template_object", template_object.to_string())];

        let resp = self
            .http
            .post(format!("{}/v2/api/talk/memo/default/send", self.api_base_url))
            .bearer_auth(access_token)
            .form(&payload)
            .send()
            .await
            .map_err(|e| DigestError::HttpError(format!("memo/default/send request: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| DigestError::HttpError(format!("memo/default/send body: {e}")))?;
        let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);

        let result_code = parsed.get("result_code").and_then(Value::as_i64);
        if !status.is_success() || result_code != Some(0) {
            return Err(DigestError::KakaoError(format!("Kakao send error: {body}")));
        }
        Ok(parsed)
    }
}

/// Picks an access token: refresh token first, then a configured access
/// token, then a one-time authorization code.
///
/// # Errors
///
/// Returns `ConfigError` when required settings are missing, or the token
/// endpoint's error.
pub async fn resolve_access_token(
    client: &KakaoClient,
    config: &KakaoConfig,
) -> Result<AccessToken, DigestError> {
    let rest_api_key = required(&config.rest_api_key, "KAKAO_REST_API_KEY")?;

    if !config.refresh_token.is_empty() {
        let refreshed = client
            .refresh_access_token(rest_api_key, &config.refresh_token, &config.client_secret)
            .await?;
        let refresh_token = refreshed
            .refresh_token
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| config.refresh_token.clone());
        return Ok(AccessToken {
            access_token: refreshed.access_token,
            source: TokenSource::RefreshToken,
            refresh_token: Some(refresh_token),
        });
    }

    if !config.access_token.is_empty() {
        return Ok(AccessToken {
            access_token: config.access_token.clone(),
            source: TokenSource::EnvAccessToken,
            refresh_token: None,
        });
    }

    let redirect_uri = required(&config.redirect_uri, "KAKAO_REDIRECT_URI")?;
    let auth_code = required(&config.auth_code, "KAKAO_AUTH_CODE")?;

    let first = client
        .exchange_auth_code(rest_api_key, redirect_uri, auth_code, &config.client_secret)
        .await?;
    info!("Exchanged authorization code for an access token");
    Ok(AccessToken {
        access_token: first.access_token,
        source: TokenSource::AuthCode,
        refresh_token: first.refresh_token.filter(|t| !t.is_empty()),
    })
}
