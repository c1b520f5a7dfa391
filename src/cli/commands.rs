use crate::cli::args::{CheckArgs, ConfigArgs, OutputFormat, Verbosity};
use crate::config::Config;
use crate::logging;
use crate::shape::{self, ApiShape, MockShape};
use crate::ui::formatter::Formatter;
use anyhow::Context;

fn print_info(message: impl AsRef<str>) {
    println!("{}", Formatter::info(message));
}

/// Execute the check command. Returns whether the shapes matched.
pub fn check(args: CheckArgs, verbosity: Verbosity) -> anyhow::Result<bool> {
    logging::log_shape_validation(
        &args.mock.to_string_lossy(),
        &args.api.to_string_lossy(),
    );

    let mock = MockShape::load(&args.mock)
        .with_context(|| format!("Failed to load mock shape: {:?}", args.mock))?;
    let api = ApiShape::load(&args.api)
        .with_context(|| format!("Failed to load API shape: {:?}", args.api))?;

    if api.methods.is_empty() && api.properties.is_empty() && verbosity != Verbosity::Quiet {
        eprintln!("{}", Formatter::warning("API shape declares no members"));
    }

    if verbosity == Verbosity::Verbose {
        print_info(format!(
            "Comparing {} ({} methods, {} properties) with {} methods, {} properties",
            mock.type_name,
            mock.methods.len(),
            mock.properties.len(),
            api.methods.len(),
            api.properties.len()
        ));
    }

    let result = shape::validate(&mock, &api);
    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)
                .context("Failed to serialize validation result")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if verbosity != Verbosity::Quiet || !result.is_valid {
                println!("{}", Formatter::format_validation(&mock.type_name, &result));
            }
        }
    }

    Ok(result.is_valid)
}

/// Execute the config command
pub fn config(args: ConfigArgs, config: &Config) -> anyhow::Result<()> {
    match args.format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(config).context("Failed to serialize config")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            print_info(format!(
                "litmock {} ({}, {})",
                env!("CARGO_PKG_VERSION"),
                env!("GIT_HASH"),
                env!("RUSTC_VERSION")
            ));
            match Config::source() {
                Some(path) => print_info(format!("Loaded from {}", path.display())),
                None => print_info("Using built-in defaults"),
            }
            println!("{}", Formatter::format_setting("pool.enabled", config.pool.enabled));
            println!("{}", Formatter::format_setting("pool.slots", config.pool.slots));
            println!(
                "{}",
                Formatter::format_setting("builder.setup_capacity", config.builder.setup_capacity)
            );
            println!(
                "{}",
                Formatter::format_setting(
                    "builder.partial_capacity",
                    config.builder.partial_capacity
                )
            );
            println!(
                "{}",
                Formatter::format_setting("logging.level", &config.logging.level)
            );
            println!("{}", Formatter::format_setting("logging.json", config.logging.json));
        }
    }
    Ok(())
}
