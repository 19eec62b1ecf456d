use std::process::ExitCode;

use tank_engine::{resolve_app_paths, AppError, AppPaths, LoopConfig, Scene};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use super::menu::MenuScreen;
use super::session::Session;

const BANNER: &str = concat!("Tank Game ", env!("CARGO_PKG_VERSION"));
const HELP: &str = "\
Usage: tank-game [OPTIONS]

Options:
  --level <N>          level to start, read from levels/level<N>.txt (default 1)
  --menu <main|test>   first menu shown (default main)
  -h, --help           print this help

Environment:
  TANK_ROOT            project root holding levels/ and res/
  TANK_TPS             simulation ticks per second (default 60)
  RUST_LOG             log filter (default info)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LaunchOptions {
    pub(crate) level_index: u32,
    pub(crate) first_menu: MenuScreen,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            level_index: 1,
            first_menu: MenuScreen::Main,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Run(LaunchOptions),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ArgsError {
    #[error("unknown argument '{0}'")]
    UnknownArgument(String),
    #[error("{0} needs a value")]
    MissingValue(&'static str),
    #[error("--level expects a positive integer, got '{0}'")]
    InvalidLevel(String),
    #[error("--menu expects 'main' or 'test', got '{0}'")]
    UnknownMenu(String),
}

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) paths: AppPaths,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) enum Launch {
    Run(AppWiring),
    Exit(ExitCode),
}

pub(crate) fn build_app(args: impl IntoIterator<Item = String>) -> Launch {
    println!("{BANNER}");
    init_tracing();

    let options = match parse_args(args) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            println!("{HELP}");
            return Launch::Exit(ExitCode::SUCCESS);
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return Launch::Exit(ExitCode::FAILURE);
        }
    };

    let paths = match resolve_app_paths() {
        Ok(paths) => paths,
        Err(err) => {
            error!(error = %AppError::from(err), "startup_failed");
            return Launch::Exit(ExitCode::FAILURE);
        }
    };

    info!(
        level_id = options.level_index,
        menu = options.first_menu.name(),
        "launch_options"
    );
    let scene = Session::new(
        paths.levels_dir.clone(),
        options.level_index,
        options.first_menu,
    );
    Launch::Run(AppWiring {
        config: LoopConfig::default(),
        paths,
        scene: Box::new(scene),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

pub(crate) fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command, ArgsError> {
    let mut options = LaunchOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--level" => {
                let value = args.next().ok_or(ArgsError::MissingValue("--level"))?;
                options.level_index = match value.parse::<u32>() {
                    Ok(index) if index >= 1 => index,
                    _ => return Err(ArgsError::InvalidLevel(value)),
                };
            }
            "--menu" => {
                let value = args.next().ok_or(ArgsError::MissingValue("--menu"))?;
                options.first_menu = match value.as_str() {
                    "main" => MenuScreen::Main,
                    "test" => MenuScreen::Test,
                    _ => return Err(ArgsError::UnknownMenu(value)),
                };
            }
            _ => return Err(ArgsError::UnknownArgument(arg)),
        }
    }

    Ok(Command::Run(options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, ArgsError> {
        parse_args(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn no_arguments_use_defaults() {
        assert_eq!(parse(&[]), Ok(Command::Run(LaunchOptions::default())));
    }

    #[test]
    fn level_and_menu_are_parsed() {
        assert_eq!(
            parse(&["--menu", "test", "--level", "3"]),
            Ok(Command::Run(LaunchOptions {
                level_index: 3,
                first_menu: MenuScreen::Test,
            }))
        );
    }

    #[test]
    fn help_wins_over_other_arguments() {
        assert_eq!(parse(&["--level", "2", "-h"]), Ok(Command::Help));
        assert_eq!(parse(&["--help"]), Ok(Command::Help));
    }

    #[test]
    fn level_zero_and_garbage_are_rejected() {
        assert_eq!(
            parse(&["--level", "0"]),
            Err(ArgsError::InvalidLevel("0".to_string()))
        );
        assert_eq!(
            parse(&["--level", "two"]),
            Err(ArgsError::InvalidLevel("two".to_string()))
        );
        assert_eq!(parse(&["--level"]), Err(ArgsError::MissingValue("--level")));
    }

    #[test]
    fn unknown_menu_and_arguments_are_rejected() {
        assert_eq!(
            parse(&["--menu", "loading"]),
            Err(ArgsError::UnknownMenu("loading".to_string()))
        );
        assert_eq!(
            parse(&["--fullscreen"]),
            Err(ArgsError::UnknownArgument("--fullscreen".to_string()))
        );
    }
}
