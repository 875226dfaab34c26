mod cli;
mod ui;

use anyhow::{Context, Result};
use log::LevelFilter;

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse_args();
    init_logging(cli.verbose);

    let options = ui::DisplayOptions {
        color_support: !cli.no_color && ui::detect_color_support(),
        quiet: cli.quiet,
    };

    let config = cli.config();
    let errors = cli::validate(&config);
    if !errors.is_empty() {
        ui::display_errors(&errors, &options)?;
        std::process::exit(1);
    }

    log::info!(
        "Generating {} password(s): length={}, uppercase>={}, digits>={}, special>={}",
        cli.count,
        config.length,
        config.min_uppercase,
        config.min_digits,
        config.min_special
    );

    let passwords = (1..=cli.count)
        .map(|i| {
            strongpass::generate(config)
                .with_context(|| format!("Failed to generate password {}", i))
        })
        .collect::<Result<Vec<_>>>()?;

    ui::display_output(&passwords, &config, &options)?;

    Ok(())
}
