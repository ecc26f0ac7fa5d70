use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, with the git hash appended for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "quotebook", bin_name = "quotebook", version = get_version())]
#[command(about = "A categorized quote catalog that syncs with a remote collection", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Browse(BrowseCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Sync(SyncCommands),
}

#[derive(Subcommand, Debug)]
pub enum CoreCommands {
    /// Show a random quote
    #[command(alias = "s", display_order = 1)]
    Show {
        /// Only pick from this category (defaults to the saved filter)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Add a quote
    #[command(alias = "n", display_order = 2)]
    Add {
        /// The quote text
        text: String,

        /// Category for the quote
        category: String,
    },

    /// Remove a quote by id
    #[command(alias = "rm", display_order = 3)]
    Remove {
        /// Id of the quote (see `quotebook list`)
        id: i64,
    },

    /// List quotes
    #[command(alias = "ls", display_order = 4)]
    List {
        /// Only list quotes in this category
        #[arg(short, long)]
        category: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum BrowseCommands {
    /// List the distinct categories
    #[command(display_order = 10)]
    Categories,

    /// Save a category filter and list its quotes ("All Categories" clears it)
    #[command(alias = "f", display_order = 11)]
    Filter {
        /// Category to select
        category: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Import quotes from a JSON file
    #[command(display_order = 20)]
    Import {
        /// Path to a JSON array of quotes
        path: PathBuf,

        /// Merge by id instead of appending (existing quotes win)
        #[arg(long)]
        merge: bool,
    },

    /// Export all quotes as JSON
    #[command(display_order = 21)]
    Export {
        /// Output file, or `-` for stdout
        #[arg(short, long, value_name = "FILE", default_value = "quotes.json")]
        output: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SyncCommands {
    /// Reconcile with the remote collection once
    #[command(display_order = 30)]
    Sync,

    /// Sync periodically, showing a quote after each cycle (Ctrl-C to stop)
    #[command(display_order = 31)]
    Watch {
        /// Seconds between cycles (defaults to sync_interval_secs)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Show catalog and sync status
    #[command(display_order = 32)]
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_alias() {
        let cli = Cli::try_parse_from(["quotebook", "n", "Stay hungry", "Life"]).unwrap();
        match cli.command {
            Some(Commands::Core(CoreCommands::Add { text, category })) => {
                assert_eq!(text, "Stay hungry");
                assert_eq!(category, "Life");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn export_defaults_to_quotes_json() {
        let cli = Cli::try_parse_from(["quotebook", "export"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Data(DataCommands::Export { ref output })) if output == "quotes.json"
        ));
    }

    #[test]
    fn remove_requires_numeric_id() {
        assert!(Cli::try_parse_from(["quotebook", "remove", "abc"]).is_err());
        assert!(Cli::try_parse_from(["quotebook", "rm", "42"]).is_ok());
    }

    #[test]
    fn naked_invocation_has_no_command() {
        let cli = Cli::try_parse_from(["quotebook", "-v"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.verbose);
    }
}
