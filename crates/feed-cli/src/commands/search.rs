use std::sync::Arc;

use feed_core::Post;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::session::Session;

#[derive(Debug, Serialize)]
struct SearchResponse {
    term: String,
    pages: Vec<u32>,
    loaded: usize,
    matched: usize,
    exhausted: bool,
    posts: Vec<Post>,
}

/// Handle `postfeed search`.
pub async fn handle(args: &SearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let options = ctx.session_options(flags, false)?;
    let mut session = Session::new(Arc::clone(&ctx.client), options);

    session.load_pages(args.pages).await?;
    session.set_term(args.term.as_str());

    let posts: Vec<Post> = session.visible().into_iter().cloned().collect();
    let snapshot = session.snapshot();
    output(
        &SearchResponse {
            term: args.term.clone(),
            pages: snapshot.loaded_pages().iter().collect(),
            loaded: snapshot.posts().len(),
            matched: posts.len(),
            exhausted: snapshot.is_exhausted(),
            posts,
        },
        flags.format,
    )
}
