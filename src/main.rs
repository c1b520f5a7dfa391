use clap::{CommandFactory, Parser};
use clap_complete::generate;
use litmock::cli::{Cli, Commands, Verbosity};
use litmock::config::Config;
use litmock::ui::formatter::Formatter;
use litmock::MockError;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn initialize_tracing(verbosity: Verbosity, config: &Config) {
    let log_level = verbosity.to_log_level(&config.logging.level);
    let fallback_filter = format!("litmock={}", log_level);

    let use_json = config.logging.json || std::env::var("LITMOCK_LOG_JSON").is_ok();

    if use_json {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| fallback_filter.clone().into()),
            )
            .with(json_layer)
            .init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| fallback_filter.into()),
            )
            .with(fmt_layer)
            .init();
    }
}

fn main() -> ExitCode {
    Formatter::configure_colors_from_env();

    let cli = Cli::parse();
    let verbosity = cli.verbosity();

    let config = Config::load_or_default();
    initialize_tracing(verbosity, &config);

    let result = match cli.command {
        Commands::Check(args) => litmock::cli::commands::check(args, verbosity),
        Commands::Config(args) => litmock::cli::commands::config(args, &config).map(|()| true),
        Commands::Completions(args) => {
            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "litmock", &mut io::stdout());
            Ok(true)
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            match err.downcast_ref::<MockError>() {
                Some(cause) => {
                    eprintln!("{}", Formatter::error(format!("Error: {err}")));
                    eprintln!("{:?}", miette::Report::new(cause.clone()));
                }
                None => eprintln!("{}", Formatter::error(format!("Error: {err:#}"))),
            }
            ExitCode::from(2)
        }
    }
}
