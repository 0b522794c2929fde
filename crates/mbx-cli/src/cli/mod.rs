use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `mbx` binary.
#[derive(Debug, Parser)]
#[command(name = "mbx", version, about = "mbx - mailbox platform client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{AuthCommands, MailboxCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["mbx", "--format", "table", "--verbose", "mailbox", "list"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Mailbox {
                action: MailboxCommands::List
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["mbx", "auth", "status", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Status
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["mbx", "--format", "xml", "mailbox", "list"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn local_login_requires_both_email_and_password() {
        let parsed = Cli::try_parse_from(["mbx", "auth", "login", "--email", "a@b.com"]);
        assert!(parsed.is_err());

        let cli = Cli::try_parse_from([
            "mbx", "auth", "login", "--email", "a@b.com", "--password", "pw",
        ])
        .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Login(_)
            }
        ));
    }

    #[test]
    fn dev_login_conflicts_with_local_credentials() {
        let parsed = Cli::try_parse_from([
            "mbx", "auth", "login", "--dev", "--email", "a@b.com", "--password", "pw",
        ]);
        assert!(parsed.is_err());
    }
}
