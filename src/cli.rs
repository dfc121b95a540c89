//! Clap derive types for `config list|template` subcommands.
//!
//! The flag stage of a population pass leaves positional arguments untouched
//! and exposes them through [`Configurator::args()`](crate::Configurator::args).
//! Apps that want inspection commands can feed those leftovers to
//! [`ConfigArgs`] and hand the resulting [`ConfigAction`] to
//! [`Configurator::handle()`](crate::Configurator::handle):
//!
//! ```ignore
//! let mut configurator = Configurator::default();
//! configurator.initialize(&mut config);
//!
//! #[derive(Parser)]
//! struct Cli {
//!     #[command(subcommand)]
//!     command: Option<Commands>,
//! }
//!
//! #[derive(Subcommand)]
//! enum Commands {
//!     Config(ConfigArgs),
//! }
//! ```

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::types::ConfigAction;

/// Clap-derived args for the `config` subcommand group.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigSubcommand>,
}

/// Available config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show every populated key with its env var, flag and value.
    List,
    /// Generate a JSON config file holding the declared defaults.
    Template {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl ConfigArgs {
    /// Convert clap-parsed args into a framework-agnostic `ConfigAction`.
    ///
    /// Bare `config` (no subcommand) and explicit `config list` both map to
    /// `ConfigAction::List`.
    pub fn into_action(self) -> ConfigAction {
        match self.action {
            None | Some(ConfigSubcommand::List) => ConfigAction::List,
            Some(ConfigSubcommand::Template { output }) => ConfigAction::Template { output },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    /// Wrapper so we can use `try_parse_from` on the subcommand.
    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: ConfigArgs,
    }

    fn parse(args: &[&str]) -> ConfigArgs {
        TestCli::try_parse_from(args).unwrap().config
    }

    #[test]
    fn parse_template_no_output() {
        let action = parse(&["test", "template"]).into_action();
        assert_eq!(action, ConfigAction::Template { output: None });
    }

    #[test]
    fn parse_template_with_output() {
        let action = parse(&["test", "template", "-o", "config.json"]).into_action();
        assert_eq!(
            action,
            ConfigAction::Template {
                output: Some(PathBuf::from("config.json"))
            }
        );
    }

    #[test]
    fn parse_template_with_long_output() {
        let action = parse(&["test", "template", "--output", "/etc/myapp.json"]).into_action();
        assert_eq!(
            action,
            ConfigAction::Template {
                output: Some(PathBuf::from("/etc/myapp.json"))
            }
        );
    }

    #[test]
    fn parse_bare_config_is_list() {
        assert_eq!(parse(&["test"]).into_action(), ConfigAction::List);
    }

    #[test]
    fn parse_explicit_list() {
        assert_eq!(parse(&["test", "list"]).into_action(), ConfigAction::List);
    }

    #[test]
    fn invalid_subcommand_errors() {
        let result = TestCli::try_parse_from(["test", "nope"]);
        assert!(result.is_err());
    }
}
