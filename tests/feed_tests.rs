use newsdigest::clients::feed::{fetch_feed_items, parse_feed};
use newsdigest::clients::http_client;
use newsdigest::clients::scrape::fetch_topic_context;
use newsdigest::errors::DigestError;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
<title>GeekNews</title>
<item>
  <title><![CDATA[Rust 2026 &amp; 로드맵]]></title>
  <link>https://news.hada.io/topic?id=1</link>
  <pubDate>Sat, 17 Oct 2026 10:00:00 +0900</pubDate>
  <description><![CDATA[<p>새 에디션 계획이 공개되었습니다.</p>]]></description>
</item>
<item>
  <title>링크 없는 항목</title>
  <description>버려져야 합니다.</description>
</item>
<item>
  <title>두 번째 글</title>
  <link>https://news.hada.io/topic?id=2</link>
  <description>두 번째 설명입니다.</description>
</item>
<item>
  <title>세 번째 글</title>
  <link>https://news.hada.io/topic?id=3</link>
</item>
</channel></rss>"#;

const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <title type="html">Atom 항목</title>
    <link rel="alternate" href="https://news.hada.io/topic?id=9"/>
    <published>2026-10-17T01:00:00Z</published>
    <content type="html">&lt;b&gt;본문&lt;/b&gt; 요약</content>
  </entry>
</feed>"#;

#[test]
fn parses_rss_items_in_order_skipping_incomplete_ones() {
    let items = parse_feed(RSS, 10).unwrap();
    assert_eq!(items.len(), 3);

    assert_eq!(items[0].title, "Rust 2026 & 로드맵");
    assert_eq!(items[0].link, "https://news.hada.io/topic?id=1");
    assert_eq!(items[0].pub_date, "Sat, 17 Oct 2026 10:00:00 +0900");
    assert_eq!(items[0].description, "새 에디션 계획이 공개되었습니다.");

    assert_eq!(items[1].title, "두 번째 글");
    assert_eq!(items[2].description, "");
}

#[test]
fn top_n_limits_the_result() {
    let items = parse_feed(RSS, 2).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].link, "https://news.hada.io/topic?id=2");
}

#[test]
fn parses_atom_entries() {
    let items = parse_feed(ATOM, 7).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Atom 항목");
    assert_eq!(items[0].link, "https://news.hada.io/topic?id=9");
    assert_eq!(items[0].pub_date, "2026-10-17T01:00:00Z");
    assert_eq!(items[0].description, "본문 요약");
}

#[test]
fn empty_feed_is_an_error() {
    let err = parse_feed("<rss><channel></channel></rss>", 7).unwrap_err();
    assert!(matches!(err, DigestError::FeedError(msg) if msg.contains("0건")));
}

#[tokio::test]
async fn fetches_feed_over_http() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss/news"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RSS))
        .mount(&mock_server)
        .await;

    let http = http_client().unwrap();
    let url = format!("{}/rss/news", mock_server.uri());
    let items = fetch_feed_items(&http, &url, 7).await.unwrap();
    assert_eq!(items.len(), 3);
}

#[tokio::test]
async fn feed_server_error_is_reported() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss/news"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let http = http_client().unwrap();
    let url = format!("{}/rss/news", mock_server.uri());
    let err = fetch_feed_items(&http, &url, 7).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to read news feed: RSS fetch failed: 503"
    );
}

#[tokio::test]
async fn topic_page_yields_description_and_source() {
    let mock_server = MockServer::start().await;
    let html = r#"<html><head>
        <meta property="og:description" content="페이지 요약 &amp; 설명">
        </head><body>
        <a href="https://example.com/original">원문</a>
        </body></html>"#;
    Mock::given(method("GET"))
        .and(path("/topic"))
        .and(header("user-agent", "Mozilla/5.0 geeknews-kakao-bot"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&mock_server)
        .await;

    let http = http_client().unwrap();
    let page = format!("{}/topic", mock_server.uri());
    let topic = fetch_topic_context(&http, &page).await;
    assert_eq!(topic.summary, "페이지 요약 & 설명");
    assert_eq!(topic.source_link, "https://example.com/original");
}

#[tokio::test]
async fn topic_page_failure_degrades_to_empty_context() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/topic"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let http = http_client().unwrap();
    let page = format!("{}/topic", mock_server.uri());
    let topic = fetch_topic_context(&http, &page).await;
    assert_eq!(topic.summary, "");
    assert_eq!(topic.source_link, page);
}
