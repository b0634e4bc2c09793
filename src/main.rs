use cbt_scoring::{
    config::{Config, LogFormat},
    dto::scoring_dto::ScoreBatchRequest,
    services::batch_service::BatchService,
};
use std::io::Read;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let input = match std::env::args().nth(1) {
        Some(path) => {
            info!("Reading scoring batch from {}", path);
            std::fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let request: ScoreBatchRequest = serde_json::from_str(&input)?;
    let response = BatchService::new(config.scoring_policy()).score(&request)?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Plain => builder.init(),
    }
}
