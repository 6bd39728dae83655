//! CLI command structure using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "formwright")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a template for invariant violations and unparseable expressions
    Validate {
        /// Template JSON file
        template: PathBuf,

        /// Fail when the template needed repairs or has warnings
        #[arg(long)]
        strict: bool,
    },

    /// Render a template to a printable HTML file
    Render {
        /// Template JSON file
        template: PathBuf,

        /// Data context JSON file (implies instance mode)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Signature artifacts JSON file
        #[arg(long)]
        signatures: Option<PathBuf>,

        /// Rendering mode; defaults to instance when --data is given
        #[arg(long, value_enum)]
        mode: Option<Mode>,

        /// Zoom scale for the print surface
        #[arg(long, default_value_t = 1.0)]
        scale: f64,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Template,
    Instance,
}
