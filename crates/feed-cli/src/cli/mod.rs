use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{ColorMode, GlobalFlags, OutputFormat, ProgressMode};
pub use root_commands::Commands;

/// Top-level CLI parser for the `postfeed` binary.
#[derive(Debug, Parser)]
#[command(
    name = "postfeed",
    version,
    about = "Infinite-scroll browser for a paginated post listing"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no spinner)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Table coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Loading spinner: auto, on, off
    #[arg(long, global = true, default_value = "auto")]
    pub progress: ProgressMode,

    /// Listing endpoint (overrides api.endpoint)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Posts per page (overrides api.page_size)
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color,
            progress: self.progress,
            endpoint: self.endpoint.clone(),
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};
    use crate::cli::root_commands::SchemaTarget;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "postfeed",
            "--format",
            "table",
            "--page-size",
            "5",
            "--verbose",
            "page",
            "2",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.page_size, Some(5));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Page(ref args) if args.page == 2));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["postfeed", "browse", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Browse(_)));
    }

    #[test]
    fn page_zero_is_rejected() {
        assert!(Cli::try_parse_from(["postfeed", "page", "0"]).is_err());
        assert!(Cli::try_parse_from(["postfeed", "--page-size", "0", "browse"]).is_err());
    }

    #[test]
    fn search_takes_term_and_page_count() {
        let cli = Cli::try_parse_from(["postfeed", "search", "et", "--pages", "2"])
            .expect("cli should parse");
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.term, "et");
                assert_eq!(args.pages, 2);
            }
            other => panic!("expected search, got {other:?}"),
        }
    }

    #[test]
    fn schema_target_is_a_closed_set() {
        let cli = Cli::try_parse_from(["postfeed", "schema", "snapshot"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Schema(ref args) if args.target == SchemaTarget::Snapshot
        ));
        assert!(Cli::try_parse_from(["postfeed", "schema", "user"]).is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from([
            "postfeed",
            "--endpoint",
            "http://localhost:3000/posts",
            "browse",
        ])
        .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.endpoint.as_deref(), Some("http://localhost:3000/posts"));
        assert_eq!(flags.page_size, None);
    }
}
