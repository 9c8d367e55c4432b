//! `contacts` - CLI for the contact manager
//!
//! This binary resolves paths against the contact route table and prints
//! the rendered pages.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use contacts::cli::{Cli, Command, ConfigCommand};
use contacts::router::{Navigation, Navigator};
use contacts::{app, init_logging, store, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    match cli.command {
        Command::Config(config_cmd) => handle_config(cli.config, config_cmd),
        command => {
            let config = Config::load_from(cli.config).context("failed to load configuration")?;
            let store = store::open_store(&config).context("failed to open contact store")?;
            let navigator = app::build_navigator(store, &config.router)?;
            run(&navigator, command).await
        }
    }
}

async fn run(navigator: &Navigator, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Visit(cmd) => {
            let navigation = navigator
                .navigate(&cmd.path)
                .await
                .with_context(|| format!("failed to navigate to {}", cmd.path))?;
            print_navigation(navigation, cmd.json)
        }
        Command::Submit(cmd) => {
            let navigation = navigator
                .submit(&cmd.path, cmd.form())
                .await
                .with_context(|| format!("failed to submit to {}", cmd.path))?;
            print_navigation(navigation, cmd.json)
        }
        Command::Routes => {
            for line in navigator.routes().describe() {
                println!("{line}");
            }
            Ok(())
        }
        Command::Config(_) => Ok(()),
    }
}

fn print_navigation(navigation: Navigation, json: bool) -> anyhow::Result<()> {
    let page = match navigation {
        Navigation::Committed(page) => page,
        Navigation::Superseded { location } => {
            eprintln!("Navigation to {location} was superseded.");
            return Ok(());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print!("{}", page.body);
        if !page.body.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

fn handle_config(
    config_path: Option<std::path::PathBuf>,
    cmd: ConfigCommand,
) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Store]");
                println!("  Backend:            {:?}", config.store.backend);
                println!("  Database path:      {}", config.database_path().display());
                println!("  Latency (ms):       {}", config.store.latency_ms);
                println!();
                println!("[Router]");
                println!("  Max redirects:      {}", config.router.max_redirects);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
