use async_trait::async_trait;
use newsdigest::ai::{GenerationRequest, TextGenerator};
use newsdigest::app::{DigestServices, run_digest};
use newsdigest::clients::http_client;
use newsdigest::clients::kakao::{KakaoClient, TokenSource};
use newsdigest::core::config::{AppConfig, KakaoConfig};
use newsdigest::errors::DigestError;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

struct UnusedGenerator;

#[async_trait]
impl TextGenerator for UnusedGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, DigestError> {
        Err(DigestError::OpenAIError("generation should be disabled".to_string()))
    }
}

async fn mount_feed(server: &MockServer) {
    let base = server.uri();
    let rss = format!(
        r#"<rss><channel>
<item><title>첫 번째 소식</title><link>{base}/topic/1</link>
<description>새 데이터베이스 엔진이 공개되었습니다. 쓰기 성능이 두 배로 향상되었습니다.</description></item>
<item><title>두 번째 소식</title><link>{base}/topic/2</link>
<description>브라우저 확장 API가 바뀌었습니다.</description></item>
</channel></rss>"#
    );
    Mock::given(method("GET"))
        .and(path("/rss"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/topic/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<meta name="description" content="페이지에서 가져온 요약 문장입니다.">
               <a href="https://example.com/db">원문</a>"#,
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/topic/2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

fn config(server: &MockServer, dry_run: bool) -> AppConfig {
    AppConfig {
        rss_url: format!("{}/rss", server.uri()),
        top_n: 7,
        use_openai: false,
        openai_api_key: String::new(),
        openai_model: "gpt-4.1-mini".to_string(),
        kakao: KakaoConfig {
            rest_api_key: "rest-key".to_string(),
            access_token: "env-access".to_string(),
            ..Default::default()
        },
        max_chars_per_item: 180,
        dry_run,
    }
}

#[tokio::test]
async fn dry_run_renders_without_sending() {
    let mock_server = MockServer::start().await;
    mount_feed(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/v2/api/talk/memo/default/send"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result_code": 0 })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let http = http_client().unwrap();
    let kakao = KakaoClient::with_base_urls(http.clone(), &mock_server.uri(), &mock_server.uri());
    let services = DigestServices {
        http: &http,
        generator: &UnusedGenerator,
        kakao: &kakao,
    };

    let report = run_digest(&config(&mock_server, true), &services)
        .await
        .unwrap();

    assert!(!report.delivered);
    assert_eq!(report.token_source, None);
    assert!(report.text.starts_with("[GeekNews 핵심 브리핑] "));
    assert!(report.text.contains("\n1. 첫 번째 소식\n핵심:\n- 페이지에서 가져온 요약 문장입니다.\n"));
    assert!(report.text.contains("원문: https://example.com/db"));
    assert!(report.text.contains("\n2. 두 번째 소식\n"));
    assert_eq!(report.text.matches("원문:").count(), 1);
}

#[tokio::test]
async fn live_run_delivers_with_configured_token() {
    let mock_server = MockServer::start().await;
    mount_feed(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/v2/api/talk/memo/default/send"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result_code": 0 })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let http = http_client().unwrap();
    let kakao = KakaoClient::with_base_urls(http.clone(), &mock_server.uri(), &mock_server.uri());
    let services = DigestServices {
        http: &http,
        generator: &UnusedGenerator,
        kakao: &kakao,
    };

    let report = run_digest(&config(&mock_server, false), &services)
        .await
        .unwrap();

    assert!(report.delivered);
    assert_eq!(report.token_source, Some(TokenSource::EnvAccessToken));
}
