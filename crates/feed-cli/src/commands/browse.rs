use std::sync::Arc;

use tokio::io::BufReader;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::BrowseArgs;
use crate::context::AppContext;
use crate::session::Session;

/// Handle `postfeed browse`.
pub async fn handle(args: &BrowseArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let options = ctx.session_options(flags, true)?;
    let mut session = Session::new(Arc::clone(&ctx.client), options);
    if let Some(term) = &args.term {
        session.set_term(term.as_str());
    }

    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    session.run_interactive(input, &mut out).await?;

    tracing::debug!(pages = session.history().len(), "browse session ended");
    Ok(())
}
