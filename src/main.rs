mod app;
mod command;
mod config;
mod consts;
mod game;
mod logging;
mod util;
use crate::app::App;
use crate::config::Config;
use anyhow::Context;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = concat!(
    "Usage: pixsnake [-c|--config <file>] [-l|--log-file <file>]\n",
    "\n",
    "Play Snake in the terminal\n",
    "\n",
    "Options:\n",
    "  -c, --config <file>     Read configuration from <file>\n",
    "  -l, --log-file <file>   Append log messages to <file>\n",
    "  -h, --help              Display this help message and exit\n",
    "  -V, --version           Show the program version and exit\n",
);

/// What the program was asked to do on the command line
#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        config: Option<PathBuf>,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: lexopt::Parser) -> Result<Command, lexopt::Error> {
        use lexopt::prelude::*;
        let mut config = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Short('c') | Long("config") => config = Some(PathBuf::from(parser.value()?)),
                Short('l') | Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Short('h') | Long("help") => return Ok(Command::Help),
                Short('V') | Long("version") => return Ok(Command::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run { config, log_file })
    }
}

fn main() -> ExitCode {
    match Command::from_parser(lexopt::Parser::from_env()) {
        Ok(Command::Run { config, log_file }) => exit(run(config, log_file)),
        Ok(Command::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("pixsnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("pixsnake: {e}");
            eprint!("{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run(config_path: Option<PathBuf>, log_file: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    if let Some(path) = log_file.or(config.files.log_file) {
        logging::init(&path)
            .with_context(|| format!("failed to set up logging to {}", path.display()))?;
    }
    let arena = config.arena;
    log::info!(
        "Starting pixsnake {} on a {}x{} arena with step {}",
        env!("CARGO_PKG_VERSION"),
        arena.width(),
        arena.height(),
        arena.step(),
    );
    let terminal = ratatui::init();
    let r = App::new(arena).run(terminal);
    ratatui::restore();
    r?;
    log::info!("Exiting");
    Ok(())
}

/// Load the configuration file given on the command line, or else the one at
/// the default location if it exists
fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        Config::load(&path, false)
            .with_context(|| format!("failed to load configuration from {}", path.display()))
    } else if let Ok(path) = Config::default_path() {
        Config::load(&path, true)
            .with_context(|| format!("failed to load configuration from {}", path.display()))
    } else {
        Ok(Config::default())
    }
}

fn exit(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("pixsnake: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe)
}
