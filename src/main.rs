use clap::Parser;
use debt_payoff::args::{Args, Command};
use debt_payoff::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().payoff_home().path();

    let _: () = match args.command() {
        Command::Init => commands::init(home)?.print(),

        Command::Add(add_args) => commands::add(&Config::load(home)?, add_args.title())?.print(),

        Command::Update(update_args) => {
            commands::update(&Config::load(home)?, update_args)?.print()
        }

        Command::Delete(delete_args) => {
            commands::delete(&Config::load(home)?, delete_args)?.print()
        }

        Command::Method(method_args) => {
            commands::method(&Config::load(home)?, method_args)?.print()
        }

        Command::Income(income_args) => {
            let mut config = Config::load(home)?;
            commands::income(&mut config, income_args)?.print()
        }

        Command::List => commands::list(&Config::load(home)?)?.print(),

        Command::Summary => {
            let today = chrono::Local::now().date_naive();
            commands::summary(&Config::load(home)?, today)?.print()
        }

        Command::Calendar => commands::calendar(&Config::load(home)?)?.print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "debt_payoff={},{}={}",
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
