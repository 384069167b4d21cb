//! `generate` subcommand: shell completions and man pages for `mj`.
use anyhow::{Context, Result};
use clap_complete::Shell;
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes completions for `shell` to `writer`.
pub fn write_completions<W: Write>(
    shell: Shell,
    cmd: &mut clap::Command,
    writer: &mut W,
) {
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, cmd, name, writer);
}

/// Renders the man page of `cmd`, plus one page per (nested) subcommand, into
/// `output_dir` if given, else the current directory.
///
/// Returns the paths of the written pages.
///
/// # Errors
///
/// Returns an [`anyhow::Error`] if the output directory cannot be created or a
/// page cannot be written.
pub fn generate_man_pages(
    cmd: &clap::Command,
    output_dir: Option<PathBuf>,
) -> Result<Vec<PathBuf>> {
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Opening current directory")?,
    };

    std::fs::create_dir_all(&output_dir).with_context(|| {
        format!("failed to create {}", output_dir.display())
    })?;

    let mut written = vec![];
    render_page(cmd.clone(), &output_dir, &mut written)?;
    render_subcommand_pages(cmd, &output_dir, cmd.get_name(), &mut written)?;

    Ok(written)
}

/// Renders the pages of every subcommand of `cmd`, named `<prefix>-<sub>`.
fn render_subcommand_pages(
    cmd: &clap::Command,
    output_dir: &Path,
    prefix: &str,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    for subcmd in cmd.get_subcommands() {
        let prefixed_name = format!("{prefix}-{}", subcmd.get_name());

        // clap_mangen takes the page title from the command name, which must
        // be 'static; leaking is fine for a one-shot generator
        let leaked_name: &'static str =
            Box::leak(prefixed_name.clone().into_boxed_str());
        let renamed = subcmd
            .clone()
            .name(leaked_name)
            .disable_help_subcommand(true);
        render_page(renamed, output_dir, written)?;

        if subcmd.has_subcommands() {
            render_subcommand_pages(subcmd, output_dir, &prefixed_name, written)?;
        }
    }

    Ok(())
}

/// Renders a single man page named after `cmd`.
fn render_page(
    cmd: clap::Command,
    output_dir: &Path,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let path = output_dir.join(format!("{}.1", cmd.get_name()));
    let mut file = File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    clap_mangen::Man::new(cmd)
        .render(&mut file)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!("generated {}", path.display());
    written.push(path);
    Ok(())
}
