use anyhow::Context;
use feed_config::FeedConfig;
use figment::Figment;
use figment::providers::Serialized;

use crate::cli::GlobalFlags;

/// Load configuration: `.env`, then the figment chain, then command-line
/// overrides on top of everything.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<FeedConfig> {
    load_dotenv()?;
    let figment = with_flag_overrides(FeedConfig::figment(), flags);
    FeedConfig::from_figment(&figment).context("invalid postfeed configuration")
}

fn with_flag_overrides(mut figment: Figment, flags: &GlobalFlags) -> Figment {
    if let Some(endpoint) = &flags.endpoint {
        figment = figment.merge(Serialized::default("api.endpoint", endpoint));
    }
    if let Some(page_size) = flags.page_size {
        figment = figment.merge(Serialized::default("api.page_size", page_size));
    }
    figment
}

fn load_dotenv() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded dotenv file");
            Ok(())
        }
        Err(error) if error.not_found() => Ok(()),
        Err(error) => Err(error).context("failed to load .env"),
    }
}
