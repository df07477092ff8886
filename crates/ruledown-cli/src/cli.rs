//! CLI argument definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// rdcli - Ruledown document parser and renderer
#[derive(Debug, Parser)]
#[command(name = "rdcli")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input file for the default `parse` command; reads stdin when absent or `-`
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Parse in inline mode (block rules such as centered blocks are skipped)
    #[arg(short, long, global = true)]
    pub inline: bool,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Show spans and the full tree
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML file with [parse] and [render] tables
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Parse and display the node tree (default)
    Parse(Input),

    /// Render and display the element tree
    Render(Input),

    /// Show node, element and size statistics
    Stats(Input),

    /// Check the grammar and parse the input
    Validate(Input),
}

#[derive(Debug, Clone, Default, Args)]
pub struct Input {
    /// Input file; reads stdin when absent or `-`
    pub file: Option<PathBuf>,
}

impl Cli {
    /// The selected command, `parse` when none was given.
    pub fn selected_command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| {
                Command::Parse(Input {
                    file: self.file.clone(),
                })
            })
    }
}

impl Command {
    pub fn input(&self) -> &Input {
        match self {
            Command::Parse(input)
            | Command::Render(input)
            | Command::Stats(input)
            | Command::Validate(input) => input,
        }
    }
}
