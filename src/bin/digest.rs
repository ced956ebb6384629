// Entry point for the daily digest run

use anyhow::Result;
use tracing::error;

use newsdigest::ai::LlmClient;
use newsdigest::app::{DigestServices, run_digest};
use newsdigest::clients::{KakaoClient, http_client};
use newsdigest::core::config::AppConfig;

async fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    let http = http_client()?;
    let generator = LlmClient::new()?;
    let kakao = KakaoClient::new(http.clone());

    let services = DigestServices {
        http: &http,
        generator: &generator,
        kakao: &kakao,
    };
    let report = run_digest(&config, &services).await?;

    if !report.delivered {
        println!("[DRY_RUN=true] 카카오 전송 없이 메시지 본문만 출력합니다.");
        println!("{}", report.text);
        return Ok(());
    }

    println!("Sent Kakao memo successfully.");
    if let Some(source) = report.token_source {
        println!("Token source: {source}");
    }
    if let Some(refresh_token) = report.refresh_token {
        println!("Refresh token (save into .env):");
        println!("KAKAO_REFRESH_TOKEN={refresh_token}");
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    newsdigest::setup_logging();

    if let Err(e) = run().await {
        error!("Digest run failed: {}", e);
        eprintln!("{e}");
        std::process::exit(1);
    }
}
