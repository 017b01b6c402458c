pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod model_gateway;
pub mod providers;
pub mod repl;
pub mod session;
pub mod tidy;
pub mod transcript;

use anyhow::{Context, Result};
use reqwest::Client;
use std::env;
use tracing::info;

use config::Config;
use providers::chat_completions::ChatCompletionsClient;
use repl::run_repl;
use session::ChatSession;

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let cfg = Config::from_env()?;
    info!(
        api_url = %cfg.api_url,
        model = %cfg.model,
        model_timeout_secs = cfg.model_timeout_secs,
        tidy_replies = cfg.tidy_replies,
        "loaded runtime configuration"
    );

    let http = Client::builder()
        .build()
        .context("Failed to initialize HTTP client")?;
    let client = ChatCompletionsClient::new(http, &cfg);
    let mut session = ChatSession::new(&client, &cfg);

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        run_repl(&mut session).await
    } else {
        let prompt = args.join(" ");
        let answer = session.submit(&prompt).await?;
        println!("{}", answer.trim());
        Ok(())
    }
}
