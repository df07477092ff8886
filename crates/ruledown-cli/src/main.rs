//! rdcli - Parse, render and inspect Ruledown documents
//!
//! Usage:
//!   rdcli [OPTIONS] [COMMAND] [FILE]
//!
//! Commands:
//!   parse     Parse and display the node tree (default)
//!   render    Render and display the element tree
//!   stats     Show document statistics
//!   validate  Check the grammar and parse the input
//!
//! FILE defaults to stdin. `RUST_LOG` controls diagnostic output.

mod cli;
mod config;
mod output;

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser as _;
use log::{debug, info};
use ruledown_core::{preprocess, rules, Engine, Registry};

use crate::cli::{Cli, Command, Input};
use crate::config::Config;
use crate::output::Stats;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if cli.inline {
        config.parse.inline = true;
    }

    let command = cli.selected_command();
    let raw = read_input(command.input())?;
    let text = preprocess::normalize(&raw);
    debug!("read {} bytes, {} after normalizing", raw.len(), text.len());

    let engine = Engine::standard()
        .with_parse_options(config.parse)
        .with_render_options(config.render);

    match command {
        Command::Parse(_) => cmd_parse(&engine, &text, cli),
        Command::Render(_) => cmd_render(&engine, &text, cli),
        Command::Stats(_) => cmd_stats(&engine, &text, cli),
        Command::Validate(_) => cmd_validate(&config, &text, cli),
    }
}

fn read_input(input: &Input) -> Result<String> {
    match input.file.as_deref() {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

// =============================================================================
// Parse Command
// =============================================================================

fn cmd_parse(engine: &Engine<'_>, text: &str, cli: &Cli) -> Result<()> {
    let doc = engine.parse(text).context("parse failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else if cli.verbose {
        print!("{}", output::document_verbose(&doc));
    } else {
        print!("{}", output::document_summary(&doc));
    }
    Ok(())
}

// =============================================================================
// Render Command
// =============================================================================

fn cmd_render(engine: &Engine<'_>, text: &str, cli: &Cli) -> Result<()> {
    let doc = engine.parse(text).context("parse failed")?;
    let root = engine
        .renderer()
        .render_document(&doc)
        .context("render failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&root)?);
    } else {
        print!("{}", output::element_tree(&root, cli.verbose));
    }
    Ok(())
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(engine: &Engine<'_>, text: &str, cli: &Cli) -> Result<()> {
    let doc = engine.parse(text).context("parse failed")?;
    let root = engine
        .renderer()
        .render_document(&doc)
        .context("render failed")?;
    let stats = Stats::collect(&doc, &root, text);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", stats.report());
    }
    Ok(())
}

// =============================================================================
// Validate Command
// =============================================================================

/// Builds the grammar from scratch instead of using the shared registry, so
/// a defect is reported as an error rather than a panic.
fn cmd_validate(config: &Config, text: &str, cli: &Cli) -> Result<()> {
    let registry = Registry::build(&rules::base(), &rules::extensions())
        .context("grammar check failed")?;
    info!("grammar order: {}", registry.describe());

    let engine = Engine::new(&registry)
        .with_parse_options(config.parse)
        .with_render_options(config.render);
    let doc = engine.parse(text).context("parse failed")?;
    engine
        .renderer()
        .render_document(&doc)
        .context("render failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::json!({
                "valid": true,
                "rules": registry.len(),
                "nodes": doc.node_count(),
            })
        );
    } else {
        println!(
            "Valid: {} rules, {} nodes",
            registry.len(),
            doc.node_count()
        );
        if cli.verbose {
            println!("Order: {}", registry.describe());
        }
    }
    Ok(())
}
