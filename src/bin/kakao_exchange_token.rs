// Exchanges KAKAO_AUTH_CODE for tokens and prints them as .env lines

use anyhow::Result;

use newsdigest::clients::{KakaoClient, http_client};
use newsdigest::core::config::{AppConfig, required};

async fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    let kakao_config = &config.kakao;
    let rest_api_key = required(&kakao_config.rest_api_key, "KAKAO_REST_API_KEY")?;
    let redirect_uri = required(&kakao_config.redirect_uri, "KAKAO_REDIRECT_URI")?;
    let auth_code = required(&kakao_config.auth_code, "KAKAO_AUTH_CODE")?;

    let kakao = KakaoClient::new(http_client()?);
    let token = kakao
        .exchange_auth_code(
            rest_api_key,
            redirect_uri,
            auth_code,
            &kakao_config.client_secret,
        )
        .await?;

    println!("Token exchange succeeded. Save below into .env");
    println!("KAKAO_ACCESS_TOKEN={}", token.access_token);
    println!(
        "KAKAO_REFRESH_TOKEN={}",
        token.refresh_token.unwrap_or_default()
    );
    if let Some(expires_in) = token.expires_in {
        println!("KAKAO_ACCESS_TOKEN_EXPIRES_IN={expires_in}");
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    newsdigest::setup_logging();

    if let Err(e) = run().await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
