use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Scroll through the listing interactively.
    Browse(BrowseArgs),
    /// Fetch a single page and print it.
    Page(PageArgs),
    /// Load pages by scrolling to the bottom, then filter titles.
    Search(SearchArgs),
    /// Dump the JSON schema of a type.
    Schema(SchemaArgs),
}

/// Arguments for `postfeed browse`.
#[derive(Clone, Debug, Args)]
pub struct BrowseArgs {
    /// Initial search term.
    #[arg(long)]
    pub term: Option<String>,
}

/// Arguments for `postfeed page`.
#[derive(Clone, Debug, Args)]
pub struct PageArgs {
    /// Page number, starting at 1.
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}

/// Arguments for `postfeed search`.
#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Case-insensitive substring to look for in titles.
    pub term: String,
    /// Pages to load before filtering.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,
}

/// Arguments for `postfeed schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub target: SchemaTarget,
}

/// Types with a published schema.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaTarget {
    Post,
    Snapshot,
}
