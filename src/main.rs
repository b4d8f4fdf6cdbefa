//! Folio CLI - render blueprints and Panel views from YAML
//!
//! Usage: folio <COMMAND>
//!
//! Commands:
//!   render     Render a blueprint for a model
//!   file       Build the Panel view of a file
//!   component  Set up a component and print its data
//!   check      Validate every blueprint in a directory

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio::config::{Config, Verbosity};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()
        .context("failed to read the current directory")?;
    let (mut config, warnings) = Config::load_layered(cli.config.as_deref(), Some(&cwd))
        .context("failed to load configuration")?;

    if let Some(locale) = &cli.locale {
        config.i18n.locale = locale.clone();
    }
    if cli.compact {
        config.output.pretty = false;
    }

    init_tracing(config.output.verbosity.raised_by(cli.verbose));
    commands::print_config_warnings(&warnings);

    match cli.command {
        Commands::Render {
            blueprint,
            site,
            model,
        } => commands::render::cmd_render(&config, &blueprint, &site, &model),
        Commands::File {
            fixture,
            file_id,
            blueprints,
            tab,
            dropdown,
        } => commands::file::cmd_file(
            &config,
            &fixture,
            &file_id,
            blueprints.as_deref(),
            tab,
            dropdown,
        ),
        Commands::Component {
            component_type,
            attrs,
            dir,
        } => commands::component::cmd_component(&config, &component_type, &attrs, dir.as_deref()),
        Commands::Check { dir } => commands::check::cmd_check(&dir),
    }
}

/// `FOLIO_LOG` takes precedence over the configured verbosity.
fn init_tracing(verbosity: Verbosity) {
    let filter =
        EnvFilter::try_from_env("FOLIO_LOG").unwrap_or_else(|_| EnvFilter::new(verbosity.filter()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
