use anyhow::Context;
use feed_core::Post;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PageArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct PageResponse {
    page: u32,
    limit: u32,
    count: usize,
    posts: Vec<Post>,
}

/// Handle `postfeed page`.
pub async fn handle(args: &PageArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = ctx.config.api.page_size;
    let progress = Progress::loading_page(args.page);

    let posts = match ctx.client.fetch_page(args.page, limit).await {
        Ok(posts) => {
            progress.finish_clear();
            posts
        }
        Err(error) => {
            progress.finish_err(&format!("page {} failed to load", args.page));
            return Err(error).with_context(|| format!("failed to load page {}", args.page));
        }
    };

    output(
        &PageResponse {
            page: args.page,
            limit,
            count: posts.len(),
            posts,
        },
        flags.format,
    )
}
