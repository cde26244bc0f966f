//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Campus landing page generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name (default: campus.toml)
    #[arg(short = 'C', long, default_value = "campus.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Minify the html content
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// enable sitemap generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Override the site origin used for the canonical link and sitemap.
    ///
    /// Example: campus build --base-url "https://staging.training-institute-sa.com"
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default campus.toml into the project root
    Init,

    /// Render the landing page into the output directory
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Build, then serve the output directory. Rebuild when the config changes
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,

        /// enable watch
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },

    /// List the courses whose title matches a query (case-insensitive)
    Search {
        /// Search text; empty matches every course
        #[arg(default_value = "")]
        query: String,
    },

    /// Send a message through the contact form endpoint
    Submit {
        /// Sender name
        #[arg(long)]
        name: String,

        /// Sender email
        #[arg(long)]
        email: String,

        /// Message body
        #[arg(long)]
        message: String,

        /// Override `[contact] endpoint`
        #[arg(long)]
        endpoint: Option<String>,
    },
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init)
    }

    /// Build arguments for commands that render the page.
    pub const fn build_args(&self) -> Option<&BuildArgs> {
        match &self.command {
            Commands::Build { build_args } | Commands::Serve { build_args, .. } => Some(build_args),
            _ => None,
        }
    }
}
