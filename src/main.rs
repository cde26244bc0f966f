//! Campus - landing page generator for a training institute.

mod build;
mod catalog;
mod cli;
mod config;
mod head;
mod init;
mod render;
mod serve;
mod shell;
mod sitemap;
mod structured;
mod utils;
mod watch;

use anyhow::{Context, Result};
use build::build_site;
use catalog::Catalog;
use clap::Parser;
use cli::{Cli, Commands};
use config::{SiteConfig, cfg, init_config};
use init::new_site;
use serve::serve_site;
use shell::{
    PageShell,
    contact::{ContactClient, ContactForm, TerminalAcknowledger, submit},
};

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    init_config(load_config(cli)?);

    match &cli.command {
        Commands::Init => new_site(&cfg()),
        Commands::Build { .. } => build_site(&cfg()),
        Commands::Serve { .. } => {
            build_site(&cfg())?;
            serve_site()
        }
        Commands::Search { query } => search(&cfg(), query),
        Commands::Submit {
            name,
            email,
            message,
            ..
        } => send_message(&cfg(), ContactForm::new(name, email, message)),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let config = SiteConfig::load(cli)?;
    if !cli.is_init() {
        config.validate()?;
    }
    Ok(config)
}

/// Print the courses matching `query`, one per line.
fn search(config: &SiteConfig, query: &str) -> Result<()> {
    let mut shell = PageShell::new(Catalog::builtin(), config);
    shell.set_query(query);

    let courses = shell.filtered();
    if courses.is_empty() {
        log!("search"; "no courses match `{query}`");
        return Ok(());
    }
    for course in courses {
        println!(
            "{}\t{}\t{}\t{}",
            course.title, course.delivery, course.duration, course.price
        );
    }
    Ok(())
}

/// Submit the contact form once from the terminal.
fn send_message(config: &SiteConfig, mut form: ContactForm) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let client = ContactClient::new(config.contact.endpoint.as_str())?;
    log!("contact"; "POST {}", client.endpoint());

    runtime.block_on(submit(&client, &mut form, &mut TerminalAcknowledger))?;
    Ok(())
}
