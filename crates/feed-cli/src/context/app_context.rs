use std::sync::Arc;

use anyhow::Context;
use feed_client::ListingClient;
use feed_config::FeedConfig;

use crate::cli::GlobalFlags;
use crate::session::SessionOptions;
use crate::session::layout::Layout;
use crate::ui;

/// Rows under the document window: status line and prompt.
const CHROME_ROWS: u32 = 2;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: FeedConfig,
    pub client: Arc<ListingClient>,
}

impl AppContext {
    /// Build the listing client for the configured endpoint.
    pub fn init(config: FeedConfig) -> anyhow::Result<Self> {
        let client = ListingClient::new(
            &config.api.endpoint,
            config.api.timeout(),
            &config.api.user_agent,
        )
        .context("failed to create listing client")?;

        tracing::debug!(endpoint = %client.endpoint(), "listing client ready");
        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }

    /// Session options for this terminal and config.
    ///
    /// `interactive` sessions redraw the screen and show loading inline;
    /// headless ones use the spinner instead.
    pub fn session_options(
        &self,
        flags: &GlobalFlags,
        interactive: bool,
    ) -> anyhow::Result<SessionOptions> {
        let prefs = ui::prefs();
        let display = &self.config.display;

        let viewport_rows = if display.viewport_rows > 0 {
            display.viewport_rows
        } else {
            ui::resolve_dimension(0, prefs.term_rows, ui::FALLBACK_ROWS)
                .saturating_sub(CHROME_ROWS)
                .max(1)
        };
        let width = ui::resolve_dimension(display.width, prefs.term_width, ui::FALLBACK_COLUMNS);

        Ok(SessionOptions {
            settings: self.config.feed_settings()?,
            layout: Layout::new(width, display.show_body),
            viewport_rows,
            step: self.config.scroll.step,
            spinner: !interactive && prefs.progress,
            redraw: interactive && prefs.redraw,
            format: flags.format,
        })
    }
}
