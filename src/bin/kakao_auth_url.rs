// Prints the Kakao consent URL used to obtain an authorization code

use newsdigest::clients::kakao::build_authorize_url;
use newsdigest::core::config::{AppConfig, required};
use newsdigest::errors::DigestError;

fn run() -> Result<String, DigestError> {
    let config = AppConfig::from_env()?;
    let rest_api_key = required(&config.kakao.rest_api_key, "KAKAO_REST_API_KEY")?;
    let redirect_uri = required(&config.kakao.redirect_uri, "KAKAO_REDIRECT_URI")?;
    Ok(build_authorize_url(rest_api_key, redirect_uri))
}

fn main() {
    match run() {
        Ok(url) => {
            println!("Open this URL in browser and approve:");
            println!("{url}");
            println!();
            println!("After redirect, copy `code` from the URL and set KAKAO_AUTH_CODE in .env");
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
