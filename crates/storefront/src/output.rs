//! Turning command results into text for `--output`.
//!
//! Lists become `tabled` tables, single records a label/value block.
//! JSON and YAML always serialize the underlying data, never the table
//! rows. `plain` prints one id per line for piping into other commands.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Status lines ────────────────────────────────────────────────────

/// Color only a terminal stderr, and never when `NO_COLOR` is set.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

fn status(mark: &str, message: &str, color: &ColorMode, quiet: bool, paint: fn(&str) -> String) {
    if quiet {
        return;
    }
    let mark = if should_color(color) {
        paint(mark)
    } else {
        mark.to_owned()
    };
    eprintln!("{mark} {message}");
}

/// `✓ message` on stderr.
pub fn success(message: &str, color: &ColorMode, quiet: bool) {
    status("✓", message, color, quiet, |m| m.green().bold().to_string());
}

/// `! message` on stderr.
pub fn warning(message: &str, color: &ColorMode, quiet: bool) {
    status("!", message, color, quiet, |m| m.yellow().bold().to_string());
}

// ── Rendering ───────────────────────────────────────────────────────

/// Shared dispatch: `human` covers `table`, `ids` covers `plain`.
fn render<T: Serialize + ?Sized>(
    format: &OutputFormat,
    data: &T,
    human: impl FnOnce(&T) -> String,
    ids: impl FnOnce(&T) -> String,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(human(data)),
        OutputFormat::Plain => Ok(ids(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
    }
}

/// A collection: one table row per item via `to_row`.
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize,
    R: Tabled,
{
    render(
        format,
        data,
        |items| {
            let rows: Vec<R> = items.iter().map(&to_row).collect();
            Table::new(rows).with(Style::rounded()).to_string()
        },
        |items| items.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    )
}

/// One record: `detail_fn` builds the human-readable block.
pub fn render_single<T: Serialize>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl FnOnce(&T) -> String,
    id_fn: impl FnOnce(&T) -> String,
) -> Result<String, CliError> {
    render(format, data, detail_fn, id_fn)
}

pub(crate) fn render_json<T: Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let json = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(json)
}

/// Write to stdout unless quiet. Empty output prints nothing.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    // A closed pipe (e.g. `| head`) is not an error worth reporting
    let _ = writeln!(io::stdout().lock(), "{output}");
}
