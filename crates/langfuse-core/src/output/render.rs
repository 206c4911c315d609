use crate::output::filter::{apply_jq, project};
use crate::output::mode::{OutputFormat, OutputMode, RenderOptions, select_mode};
use crate::term::TermProbe;
use langfuse_types::{Record, Result, deep_get, field_text};
use owo_colors::OwoColorize;
use serde_json::Value;

/// Rendering front-end shared by every command.
///
/// Holds the one mode decision for this invocation; commands hand it records
/// and a column schema and never branch on TTY state themselves. Data goes to
/// stdout, status and errors to stderr, so JSON output is never polluted.
pub struct OutputContext {
    mode: OutputMode,
    options: RenderOptions,
    probe: TermProbe,
}

impl OutputContext {
    pub fn new(options: RenderOptions, default_format: OutputFormat, probe: TermProbe) -> Self {
        let mode = select_mode(&options, default_format, &probe);
        Self {
            mode,
            options,
            probe,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    pub fn quiet(&self) -> bool {
        self.options.quiet
    }

    pub fn color(&self) -> bool {
        self.probe.color
    }

    /// Status line on stderr, suppressed by `--quiet`.
    pub fn status(&self, msg: &str) {
        if !self.options.quiet {
            eprintln!("{}", msg);
        }
    }

    /// Error line on stderr, never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("{}", msg);
    }

    /// Render a result list under the current mode.
    pub fn render_records(&self, records: &[Record], columns: &[&str]) -> Result<()> {
        match self.mode {
            OutputMode::Json => {
                self.print_json(records.iter().cloned().map(Value::Object).collect())
            }
            OutputMode::Tsv => {
                print!("{}", tsv_text(records, columns));
                Ok(())
            }
            OutputMode::Table => {
                if records.is_empty() {
                    self.status("No results found.");
                } else {
                    print!("{}", table_text(records, columns, self.probe.color));
                }
                Ok(())
            }
        }
    }

    /// Render a single item as labeled field/value lines (JSON mode emits
    /// the record itself, wrapped in an array for a stable output shape).
    pub fn render_detail(&self, record: &Record, fields: &[(&str, &str)]) -> Result<()> {
        match self.mode {
            OutputMode::Json => self.print_json(vec![Value::Object(record.clone())]),
            OutputMode::Tsv => {
                print!("{}", detail_tsv_text(record, fields));
                Ok(())
            }
            OutputMode::Table => {
                print!("{}", detail_table_text(record, fields, self.probe.color));
                Ok(())
            }
        }
    }

    /// Render an arbitrary JSON payload verbatim (tree dumps, compiled
    /// prompts, run comparisons). `--jq` still applies; `--fields` does not,
    /// since these payloads are not record lists.
    pub fn render_value(&self, value: &Value) -> Result<()> {
        let mut text = serde_json::to_string_pretty(value)?;
        if let Some(expr) = &self.options.jq {
            text = apply_jq(&text, expr)?;
        }
        println!("{}", text);
        Ok(())
    }

    fn print_json(&self, items: Vec<Value>) -> Result<()> {
        let items = match &self.options.fields {
            Some(fields) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(record) => {
                        Value::Object(project(&[record], fields).remove(0))
                    }
                    other => other,
                })
                .collect(),
            None => items,
        };

        let mut text = serde_json::to_string_pretty(&items)?;
        if let Some(expr) = &self.options.jq {
            text = apply_jq(&text, expr)?;
        }
        // One buffered write: either the full document reaches stdout or
        // nothing does.
        println!("{}", text);
        Ok(())
    }
}

fn cell_text(record: &Record, column: &str) -> String {
    // Tabs and newlines would break both row formats; collapse them so table
    // and TSV cells stay byte-identical.
    field_text(deep_get(record, column)).replace(['\t', '\n', '\r'], " ")
}

/// Width-aligned table with an upper-cased header row.
pub fn table_text(records: &[Record], columns: &[&str], color: bool) -> String {
    let headers: Vec<String> = columns.iter().map(|c| c.to_uppercase()).collect();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    let cell = cell_text(record, column);
                    widths[i] = widths[i].max(cell.chars().count());
                    cell
                })
                .collect()
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format_row(&headers, &widths, color));
    for row in &rows {
        out.push_str(&format_row(row, &widths, false));
    }
    out
}

fn format_row(cells: &[String], widths: &[usize], bold: bool) -> String {
    let mut line = String::new();
    let last = cells.len().saturating_sub(1);
    for (i, cell) in cells.iter().enumerate() {
        let padded = if i == last {
            cell.clone()
        } else {
            let pad = widths[i].saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        };
        if bold {
            line.push_str(&padded.bold().to_string());
        } else {
            line.push_str(&padded);
        }
        if i != last {
            line.push_str("  ");
        }
    }
    line.push('\n');
    line
}

/// Tab-separated rows for piping; same columns and cell values as the table,
/// no header.
pub fn tsv_text(records: &[Record], columns: &[&str]) -> String {
    let mut out = String::new();
    for record in records {
        let cells: Vec<String> = columns.iter().map(|c| cell_text(record, c)).collect();
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
    out
}

/// Aligned label/value lines for a single item.
pub fn detail_table_text(record: &Record, fields: &[(&str, &str)], color: bool) -> String {
    let label_width = fields
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (label, key) in fields {
        let pad = label_width.saturating_sub(label.chars().count());
        let padded = format!("{}{}", label, " ".repeat(pad));
        let shown = if color {
            padded.bold().cyan().to_string()
        } else {
            padded
        };
        out.push_str(&format!("{}  {}\n", shown, cell_text(record, key)));
    }
    out
}

/// `label\tvalue` lines for piped detail output.
pub fn detail_tsv_text(record: &Record, fields: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (label, key) in fields {
        out.push_str(&format!("{}\t{}\n", label, cell_text(record, key)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<Record> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    #[test]
    fn table_and_tsv_share_columns_order_and_values() {
        let rows = records(json!([
            {"id": "t1", "name": "alpha", "hidden": "x"},
            {"id": "t2", "name": "beta"}
        ]));
        let columns = ["id", "name"];

        let table = table_text(&rows, &columns, false);
        let tsv = tsv_text(&rows, &columns);

        let table_cells: Vec<Vec<&str>> = table
            .lines()
            .skip(1) // header
            .map(|line| line.split_whitespace().collect())
            .collect();
        let tsv_cells: Vec<Vec<&str>> = tsv.lines().map(|line| line.split('\t').collect()).collect();

        assert_eq!(table_cells, tsv_cells);
        assert_eq!(tsv_cells, vec![vec!["t1", "alpha"], vec!["t2", "beta"]]);
    }

    #[test]
    fn table_layout_is_width_aligned() {
        let rows = records(json!([
            {"id": "t1", "name": "alpha"},
            {"id": "t2", "name": "beta-long"}
        ]));
        let table = table_text(&rows, &["id", "name"], false);
        assert_eq!(table, "ID  NAME\nt1  alpha\nt2  beta-long\n");
    }

    #[test]
    fn no_color_changes_styling_not_layout() {
        let rows = records(json!([{"id": "t1", "name": "alpha"}]));
        let plain = table_text(&rows, &["id", "name"], false);
        let colored = table_text(&rows, &["id", "name"], true);

        let strip = |s: &str| {
            let mut out = String::new();
            let mut in_escape = false;
            for c in s.chars() {
                match c {
                    '\x1b' => in_escape = true,
                    'm' if in_escape => in_escape = false,
                    _ if in_escape => {}
                    _ => out.push(c),
                }
            }
            out
        };
        assert_eq!(strip(&colored), plain);
        assert_ne!(colored, plain);
    }

    #[test]
    fn empty_result_set_renders_nothing_in_tsv() {
        assert_eq!(tsv_text(&[], &["id", "name"]), "");
    }

    #[test]
    fn nested_and_missing_cells() {
        let rows = records(json!([{"id": "t1", "usage": {"total": 3}}]));
        let tsv = tsv_text(&rows, &["id", "usage.total", "missing"]);
        assert_eq!(tsv, "t1\t3\t\n");
    }

    #[test]
    fn multiline_values_collapse_to_one_row() {
        let rows = records(json!([{"id": "t1", "name": "two\nlines"}]));
        let tsv = tsv_text(&rows, &["id", "name"]);
        assert_eq!(tsv, "t1\ttwo lines\n");
        assert_eq!(tsv.lines().count(), 1);
    }

    #[test]
    fn detail_views_align_and_tab_separate() {
        let record = records(json!([{"id": "t1", "name": "alpha"}])).remove(0);
        let fields = [("ID", "id"), ("Name", "name")];

        assert_eq!(
            detail_table_text(&record, &fields, false),
            "ID    t1\nName  alpha\n"
        );
        assert_eq!(
            detail_tsv_text(&record, &fields),
            "ID\tt1\nName\talpha\n"
        );
    }
}
