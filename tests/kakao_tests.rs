use newsdigest::clients::http_client;
use newsdigest::clients::kakao::{KakaoClient, TokenSource, resolve_access_token};
use newsdigest::core::config::KakaoConfig;
use newsdigest::errors::DigestError;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path},
};

fn client(server: &MockServer) -> KakaoClient {
    KakaoClient::with_base_urls(http_client().unwrap(), &server.uri(), &server.uri())
}

fn config() -> KakaoConfig {
    KakaoConfig {
        rest_api_key: "rest-key".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn refresh_token_wins_and_is_kept_when_not_rotated() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=old-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-access",
            "expires_in": 21599
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cfg = KakaoConfig {
        refresh_token: "old-refresh".to_string(),
        access_token: "ignored-access".to_string(),
        ..config()
    };
    let token = resolve_access_token(&client(&mock_server), &cfg).await.unwrap();

    assert_eq!(token.access_token, "fresh-access");
    assert_eq!(token.source, TokenSource::RefreshToken);
    assert_eq!(token.refresh_token.as_deref(), Some("old-refresh"));
}

#[tokio::test]
async fn rotated_refresh_token_is_reported() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-access",
            "refresh_token": "new-refresh"
        })))
        .mount(&mock_server)
        .await;

    let cfg = KakaoConfig {
        refresh_token: "old-refresh".to_string(),
        ..config()
    };
    let token = resolve_access_token(&client(&mock_server), &cfg).await.unwrap();
    assert_eq!(token.refresh_token.as_deref(), Some("new-refresh"));
}

#[tokio::test]
async fn configured_access_token_skips_the_token_endpoint() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let cfg = KakaoConfig {
        access_token: "env-access".to_string(),
        ..config()
    };
    let token = resolve_access_token(&client(&mock_server), &cfg).await.unwrap();
    assert_eq!(token.access_token, "env-access");
    assert_eq!(token.source, TokenSource::EnvAccessToken);
    assert_eq!(token.refresh_token, None);
}

#[tokio::test]
async fn auth_code_exchange_sends_client_secret() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=one-time"))
        .and(body_string_contains("client_secret=shh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "code-access",
            "refresh_token": "code-refresh"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cfg = KakaoConfig {
        client_secret: "shh".to_string(),
        redirect_uri: "http://localhost:3000/callback".to_string(),
        auth_code: "one-time".to_string(),
        ..config()
    };
    let token = resolve_access_token(&client(&mock_server), &cfg).await.unwrap();
    assert_eq!(token.source, TokenSource::AuthCode);
    assert_eq!(token.access_token, "code-access");
    assert_eq!(token.refresh_token.as_deref(), Some("code-refresh"));
}

#[tokio::test]
async fn missing_settings_are_config_errors() {
    let mock_server = MockServer::start().await;
    let kakao = client(&mock_server);

    let err = resolve_access_token(&kakao, &KakaoConfig::default())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid configuration: Missing required env: KAKAO_REST_API_KEY"
    );

    let err = resolve_access_token(&kakao, &config()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid configuration: Missing required env: KAKAO_REDIRECT_URI"
    );
}

#[tokio::test]
async fn token_endpoint_rejection_is_a_kakao_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid_grant"}"#))
        .mount(&mock_server)
        .await;

    let cfg = KakaoConfig {
        refresh_token: "stale".to_string(),
        ..config()
    };
    let err = resolve_access_token(&client(&mock_server), &cfg)
        .await
        .unwrap_err();
    assert!(matches!(err, DigestError::KakaoError(msg) if msg.contains("invalid_grant")));
}

#[tokio::test]
async fn send_memo_accepts_result_code_zero() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/api/talk/memo/default/send"))
        .and(header("authorization", "Bearer access"))
        .and(body_string_contains("template_object="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result_code": 0 })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client(&mock_server)
        .send_memo("access", "[GeekNews 핵심 브리핑] 2026. 10. 18.")
        .await
        .unwrap();
    assert_eq!(result["result_code"], 0);
}

#[tokio::test]
async fn send_memo_rejects_non_zero_result_code() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/api/talk/memo/default/send"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result_code": -401 })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .send_memo("access", "본문")
        .await
        .unwrap_err();
    assert!(matches!(err, DigestError::KakaoError(msg) if msg.starts_with("Kakao send error:")));
}
