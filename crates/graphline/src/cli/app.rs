use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use super::changes::ChangesArg;
use super::subscriptions::SubscriptionCommands;
use crate::logging::LoggingConfig;

#[derive(Clone, Debug, Parser)]
#[command(name = "graphline", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// Configuration file; defaults to ~/.graphline/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

impl App {
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            json_format:   self.json_logs,
            default_level: match self.verbose {
                0 => Level::INFO,
                1 => Level::DEBUG,
                _ => Level::TRACE,
            },
        }
    }
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "subs", name = "subscriptions", subcommand, about = "List or add real-time update subscriptions")]
    Subscriptions(SubscriptionCommands),

    #[command(alias = "c", name = "changes", about = "Fetch changed fields for users in one batch")]
    Changes(ChangesArg),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        App::command().debug_assert();
    }

    #[test]
    fn test_parse_changes() {
        let app = App::try_parse_from([
            "graphline", "-v", "changes", "--token", "t", "--fields", "name", "1", "2",
        ])
        .unwrap();

        assert_eq!(app.logging().default_level, Level::DEBUG);
        match app.cmd {
            Commands::Changes(arg) => {
                assert_eq!(arg.ids, ["1", "2"]);
                assert_eq!(arg.fields, "name");
                assert_eq!(arg.since, "");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_subscription_add() {
        let app = App::try_parse_from([
            "graphline", "subs", "add", "--verify-token", "v", "--callback-url", "https://cb.test/rt",
            "--fields", "name,email",
        ])
        .unwrap();

        match app.cmd {
            Commands::Subscriptions(SubscriptionCommands::Add(arg)) => {
                assert_eq!(arg.fields, ["name", "email"]);
                assert_eq!(arg.object, "user");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_changes_requires_ids() {
        assert!(App::try_parse_from(["graphline", "changes", "--token", "t"]).is_err());
    }
}
