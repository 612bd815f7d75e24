//! Command line flags.
//!
//! Flags are actions applied in the order given on the command line, so
//! `--run-configuration-calculation --store-configuration` calculates
//! before storing while the reverse stores the previous zones.

use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser};

/// Run keyboard shortcuts from the screen corners
#[derive(Parser, Debug)]
#[command(name = "hotcorners", version, about = "Run keyboard shortcuts from the screen corners")]
pub struct CliArgs {
    /// Replace the zones with corner zones for the primary screen size
    #[arg(long, action = ArgAction::Count)]
    pub run_configuration_calculation: u8,

    /// Write the active configuration to the configuration file
    #[arg(long, action = ArgAction::Count)]
    pub store_configuration: u8,

    /// Exit after the other flags instead of monitoring
    #[arg(long, action = ArgAction::Count)]
    pub exit: u8,

    /// Log every zone match and key event
    #[arg(long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Unrecognized flags, reported and ignored
    #[arg(
        value_name = "FLAG",
        allow_hyphen_values = true,
        num_args = 1,
        action = ArgAction::Append,
        hide = true
    )]
    pub unknown: Vec<String>,
}

/// A single command line flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Lay out corner zones for the primary screen size.
    RunCalculation,
    /// Write the current configuration to disk.
    StoreConfiguration,
    /// Quit after the actions instead of monitoring.
    Exit,
    /// Enable verbose diagnostics.
    Verbose,
    /// Anything else; reported and ignored.
    Unknown(String),
}

/// Parsed launch options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Every flag, in command line order.
    pub actions: Vec<Action>,
    pub verbose: bool,
    pub exit: bool,
}

impl LaunchOptions {
    /// Parses the arguments that follow the program name.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, clap::Error> {
        let matches = CliArgs::command()
            .try_get_matches_from(std::iter::once("hotcorners".to_string()).chain(args))?;
        let cli = CliArgs::from_arg_matches(&matches)?;

        let mut ordered: Vec<(usize, Action)> = Vec::new();
        for (id, action) in [
            ("run_configuration_calculation", Action::RunCalculation),
            ("store_configuration", Action::StoreConfiguration),
            ("exit", Action::Exit),
            ("verbose", Action::Verbose),
        ] {
            ordered.extend(occurrences(&matches, id).map(|index| (index, action.clone())));
        }
        ordered.extend(
            occurrences(&matches, "unknown")
                .zip(&cli.unknown)
                .map(|(index, flag)| (index, Action::Unknown(flag.clone()))),
        );
        ordered.sort_by_key(|(index, _)| *index);

        Ok(Self {
            actions: ordered.into_iter().map(|(_, action)| action).collect(),
            verbose: cli.verbose > 0,
            exit: cli.exit > 0,
        })
    }

    /// Parses the process arguments; prints help or usage errors and exits.
    pub fn from_env() -> Self {
        Self::parse(std::env::args().skip(1)).unwrap_or_else(|e| e.exit())
    }
}

fn occurrences<'a>(matches: &'a ArgMatches, id: &str) -> impl Iterator<Item = usize> + 'a {
    matches.indices_of(id).into_iter().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> LaunchOptions {
        LaunchOptions::parse(args.iter().map(|s| s.to_string())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_no_flags() {
        let options = parse(&[]);
        assert!(options.actions.is_empty());
        assert!(!options.verbose);
        assert!(!options.exit);
    }

    #[test]
    fn test_actions_keep_command_line_order() {
        let options = parse(&[
            "--store-configuration",
            "--run-configuration-calculation",
            "--store-configuration",
            "--exit",
        ]);

        assert_eq!(
            options.actions,
            vec![
                Action::StoreConfiguration,
                Action::RunCalculation,
                Action::StoreConfiguration,
                Action::Exit,
            ]
        );
        assert!(options.exit);
        assert!(!options.verbose);
    }

    #[test]
    fn test_unknown_flags_are_kept() {
        let options = parse(&["--verbose", "-x", "--Exit"]);

        assert!(options.verbose);
        assert!(!options.exit);
        assert_eq!(
            options.actions,
            vec![
                Action::Verbose,
                Action::Unknown("-x".to_string()),
                Action::Unknown("--Exit".to_string()),
            ]
        );
    }

    #[test]
    fn test_known_flag_after_unknown_one() {
        let options = parse(&["--bogus", "--exit"]);

        assert!(options.exit);
        assert_eq!(
            options.actions,
            vec![Action::Unknown("--bogus".to_string()), Action::Exit]
        );
    }
}
