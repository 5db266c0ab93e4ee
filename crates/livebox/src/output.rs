//! Output formatting: table, JSON, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Decide once whether color output is enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Paint a link or schedule state: green when on, red when off.
pub fn paint_state(text: &str, on: bool, color: bool) -> String {
    match (color, on) {
        (false, _) => text.to_owned(),
        (true, true) => text.green().to_string(),
        (true, false) => text.red().to_string(),
    }
}

/// Render a detail label in bold when color is enabled.
pub fn label(text: &str, color: bool) -> String {
    if color {
        text.bold().to_string()
    } else {
        text.to_owned()
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serializable items in the chosen format.
///
/// - `table`: `to_row` builds one `Tabled` row per item
/// - `json` / `json-compact`: serializes the original data via serde
/// - `plain`: `id_fn` emits one identifier per line
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Plain => Ok(data.iter().map(id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render a single serializable item in the chosen format.
///
/// Table output uses `detail_fn`, a pre-formatted key/value listing.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Plain => Ok(id_fn(data)),
    }
}

/// Render an arbitrary JSON value; tables fall back to pretty JSON.
pub fn render_value(format: OutputFormat, value: &serde_json::Value) -> Result<String, CliError> {
    match format {
        OutputFormat::JsonCompact => render_json(value, true),
        OutputFormat::Plain => Ok(match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }),
        OutputFormat::Table | OutputFormat::Json => render_json(value, false),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Format aligned `Label: value` lines for detail views.
pub fn detail_lines(rows: &[(&str, String)], color: bool) -> String {
    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0) + 1;
    rows.iter()
        .map(|(key, value)| {
            let key = format!("{key}:");
            format!("{}{} {value}", label(&key, color), " ".repeat(width - key.len() + 1))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `-` for missing optional values.
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use tabled::Tabled;

    use super::*;

    #[derive(Serialize)]
    struct Item {
        id: &'static str,
        up: bool,
    }

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "ID")]
        id: String,
    }

    fn items() -> Vec<Item> {
        vec![Item { id: "wl0", up: true }, Item { id: "eth4", up: false }]
    }

    #[test]
    fn plain_lists_one_id_per_line() {
        let out = render_list(
            OutputFormat::Plain,
            &items(),
            |i| Row { id: i.id.into() },
            |i| i.id.into(),
        );
        assert_eq!(out.ok().as_deref(), Some("wl0\neth4"));
    }

    #[test]
    fn compact_json_serializes_source_data() {
        let out = render_list(
            OutputFormat::JsonCompact,
            &items(),
            |i| Row { id: i.id.into() },
            |i| i.id.into(),
        );
        assert_eq!(
            out.ok().as_deref(),
            Some(r#"[{"id":"wl0","up":true},{"id":"eth4","up":false}]"#)
        );
    }

    #[test]
    fn detail_lines_align_values() {
        let text = detail_lines(&[("SSID", "home".into()), ("Channel", "6".into())], false);
        assert_eq!(text, "SSID:     home\nChannel:  6");
    }

    #[test]
    fn paint_state_is_plain_without_color() {
        assert_eq!(paint_state("Up", true, false), "Up");
        assert_ne!(paint_state("Up", true, true), "Up");
    }
}
