use feed_core::{FeedSnapshot, Post};
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaTarget};
use crate::output::output;

/// Handle `postfeed schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.target {
        SchemaTarget::Post => schema_for!(Post),
        SchemaTarget::Snapshot => schema_for!(FeedSnapshot),
    };
    output(&schema, flags.format)
}
