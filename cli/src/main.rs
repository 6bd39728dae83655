//! Formwright - document template validation and rendering
//!
//! Command-line front end over the document model and renderer.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::render::RenderArgs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { template, strict } => commands::validate::run(&template, strict),
        Commands::Render {
            template,
            data,
            signatures,
            mode,
            scale,
            out,
        } => commands::render::run(RenderArgs {
            template,
            data,
            signatures,
            mode,
            scale,
            out,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
