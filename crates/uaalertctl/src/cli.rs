use std::fmt::Display;

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand, ValueEnum};

use uaalert::ActiveState;

const USAGE_SHORT: &str = r#"
This program polls the alerts.in.ua air-raid alert service once and prints what it finds. You need an API token.

See --help for more details.
"#;

const USAGE_LONG: &str = r#"
This program polls the alerts.in.ua air-raid alert service once and prints what it finds. You need an API token, which you may pass with --token or in the environment:

    export ALERTS_IN_UA_TOKEN=...
    uaalertctl statuses --only active

Regions may be given by name, alias, or numeric UID. These are equivalent:

    uaalertctl status "м. Київ"
    uaalertctl status Київ
    uaalertctl status 31

Use the "regions" command to list every known region.

The service limits request rates per token. Do not poll more than a few times per minute.
"#;

/// Top-level program arguments
#[derive(Parser, Clone, Debug)]
#[command(version)]
#[command(about, long_about = None)]
#[command(after_help = USAGE_SHORT, after_long_help = USAGE_LONG)]
#[command(max_term_width = 100)]
pub struct Args {
    /// Verbosity level (-vvv for more)
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print NOTHING but results
    #[arg(short, long)]
    pub quiet: bool,

    /// API token
    #[arg(long, env = "ALERTS_IN_UA_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Service base URL
    #[arg(long, default_value_t = uaalert::DEFAULT_BASE_URL.to_string())]
    #[arg(hide_short_help = true)]
    pub base_url: String,

    /// Request timeout (seconds)
    #[arg(long, default_value_t = 30)]
    #[arg(hide_short_help = true)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// What to fetch
#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// List all active alerts
    Active,

    /// Alert status of every oblast
    Statuses {
        /// Only show oblasts in this state
        #[arg(long, value_enum)]
        only: Option<StateFilter>,
    },

    /// Alert status of one oblast
    Status {
        /// Region name, alias, or UID
        region: String,
    },

    /// Alerts in one oblast over the last month
    History {
        /// Region name, alias, or UID
        region: String,
    },

    /// List known regions (no token required)
    Regions,
}

impl Command {
    /// True if this command contacts the service
    pub fn needs_token(&self) -> bool {
        !matches!(self, Command::Regions)
    }
}

/// Region state filter
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateFilter {
    Active,
    Partial,
    None,
}

impl From<StateFilter> for ActiveState {
    fn from(f: StateFilter) -> ActiveState {
        match f {
            StateFilter::Active => ActiveState::Active,
            StateFilter::Partial => ActiveState::Partial,
            StateFilter::None => ActiveState::None,
        }
    }
}

/// A program-level error with exit code
#[derive(Debug)]
pub struct CliError {
    error: anyhow::Error,
    exit_code: i32,
}

impl CliError {
    /// Create new error with a custom exit code
    pub fn new(error: anyhow::Error, code: i32) -> CliError {
        CliError {
            error,
            exit_code: code,
        }
    }

    /// Print this error to the terminal
    ///
    /// Errors from clap are printed verbatim. Other types of errors
    /// are printed indirectly via clap's fancy formatter.
    pub fn print(&self) -> std::io::Result<()> {
        if let Some(e) = self.error.downcast_ref::<clap::Error>() {
            e.print()
        } else {
            Args::command()
                .error(ErrorKind::Format, self.to_string())
                .print()
        }
    }

    /// Print this error to the terminal and exit
    pub fn exit(&self) -> ! {
        drop(self.print());
        std::process::exit(self.exit_code);
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#}", self.error)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> CliError {
        CliError::new(err, 1)
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> CliError {
        let code = if err.use_stderr() { 1 } else { 0 };
        CliError::new(err.into(), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clap() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse() {
        let args = Args::try_parse_from([
            "uaalertctl",
            "--token",
            "abc",
            "-vv",
            "statuses",
            "--only",
            "partial",
        ])
        .expect("bad args");
        assert_eq!(Some("abc"), args.token.as_deref());
        assert_eq!(2, args.verbose);
        assert_eq!(
            Command::Statuses {
                only: Some(StateFilter::Partial)
            },
            args.command
        );
        assert_eq!(ActiveState::Partial, ActiveState::from(StateFilter::Partial));

        let args = Args::try_parse_from(["uaalertctl", "--token", "abc", "status", "Київ"])
            .expect("bad args");
        assert_eq!(
            Command::Status {
                region: "Київ".to_owned()
            },
            args.command
        );
        assert!(args.command.needs_token());
        assert!(!Command::Regions.needs_token());
    }
}
