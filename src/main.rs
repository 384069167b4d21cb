/*!
Main binary for minijson.
*/

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use log::debug;
use std::fs;
use std::io::{self, IsTerminal, Read, stdout};
use std::path::PathBuf;

use minijson::commands::generate;
use minijson::utils::{SummaryOptions, write_summary};

/// Parse a JSON document and describe its root.
#[derive(Parser)]
#[command(name = "mj", version, about, long_about = None, disable_help_subcommand = true)]
struct Args {
    /// Optional subcommands
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(value_name = "FILE")]
    /// Optional path to JSON file. If omitted, reads from STDIN
    input: Option<PathBuf>,
    /// Display the number of members/elements of the root
    #[arg(long, action = ArgAction::SetTrue)]
    count: bool,
    /// Display depth of the input document
    #[arg(long, action = ArgAction::SetTrue)]
    depth: bool,
    /// Only validate the document; report through the exit status
    #[arg(short, long, action = ArgAction::SetTrue)]
    check: bool,
    #[command(flatten)]
    verbosity: Verbosity,
}

/// Available subcommands for `mj`
#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    /// Generate additional documentation and/or completions
    Generate(GenerateCommand),
}

/// Generate shell completions and man page
#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate shell completions for the given shell to stdout.
    Shell { shell: clap_complete::Shell },
    /// Generate a man page for mj to output directory if specified, else
    /// the current directory.
    Man {
        /// The output directory to write the man pages.
        #[clap(short, long)]
        output_dir: Option<PathBuf>,
    },
}

/// Entry point for main binary.
///
/// Reads the document from FILE or from piped STDIN, parses
/// it and prints a summary to STDOUT unless `--check` is given.
fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .parse_default_env()
        .init();

    match args.command {
        Some(Commands::Generate(cmd)) => match cmd {
            GenerateCommand::Shell { shell } => {
                let mut cmd = Args::command();
                generate::write_completions(shell, &mut cmd, &mut stdout().lock());
            }
            GenerateCommand::Man { output_dir } => {
                for path in generate::generate_man_pages(&Args::command(), output_dir)? {
                    println!("Generated: {}", path.display());
                }
            }
        },
        None => {
            let (source, value) = if let Some(path) = args.input {
                let content = fs::read(&path)
                    .with_context(|| format!("Failed to read file {}", path.display()))?;
                debug!("read {} bytes from {}", content.len(), path.display());
                (path.display().to_string(), minijson::parse(&content))
            } else {
                if io::stdin().is_terminal() {
                    // No piped input and no file specified
                    let mut cmd = Args::command();
                    return Ok(cmd.print_help()?);
                }
                let mut buffer = vec![];
                io::stdin()
                    .read_to_end(&mut buffer)
                    .context("Failed to read STDIN")?;
                ("stdin".to_string(), minijson::parse(&buffer))
            };

            let value = value.with_context(|| format!("Failed to parse JSON from {source}"))?;

            if !args.check {
                let options = SummaryOptions {
                    count: args.count,
                    depth: args.depth,
                };
                write_summary(&mut stdout().lock(), &source, &value, options)?;
            }
        }
    }

    Ok(())
}
