//! Terminal rendering of tables and summaries.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use jobs_filter::TableSummary;
use jobs_model::{ColumnKind, ColumnMeta, JobRecord, JobTable, columns};

use crate::commands::{CpiResult, ListResult};

pub const NO_RESULTS: &str = "No results";

pub fn print_list(result: &ListResult, limit: usize, summary_only: bool) {
    for warning in &result.warnings {
        eprintln!("warning: {warning}");
    }
    if result.table.is_empty() {
        println!("{NO_RESULTS}");
        return;
    }
    if summary_only {
        println!("{}", summary_text(&result.summary));
        return;
    }
    println!("{}", render_table(&result.table, limit));
    println!(
        "Showing {} of {} matching postings ({} loaded)",
        result.table.len().min(limit),
        result.table.len(),
        result.total_rows
    );
}

pub fn print_columns(columns: &[ColumnMeta]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Type")]);
    apply_table_style(&mut table);
    for column in columns {
        table.add_row(vec![Cell::new(&column.name), Cell::new(column.kind)]);
    }
    println!("{table}");
}

pub fn print_cpi(result: &CpiResult) {
    println!("{}", cpi_text(result));
}

/// Renders up to `limit` rows with the table's display columns.
pub fn render_table(table: &JobTable, limit: usize) -> String {
    let metas = table.columns();
    let mut grid = Table::new();
    grid.set_header(metas.iter().map(|meta| header_cell(&meta.name)).collect::<Vec<_>>());
    apply_table_style(&mut grid);
    for (idx, meta) in metas.iter().enumerate() {
        if meta.kind == ColumnKind::Number
            && let Some(column) = grid.column_mut(idx)
        {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    for record in table.iter().take(limit) {
        grid.add_row(
            metas
                .iter()
                .map(|meta| value_cell(record, meta))
                .collect::<Vec<_>>(),
        );
    }
    grid.to_string()
}

/// Plain-text summary: counts, salary extents, postings per organization.
pub fn summary_text(summary: &TableSummary) -> String {
    if summary.is_empty() {
        return NO_RESULTS.to_string();
    }
    let mut lines = vec![format!("Postings: {}", summary.rows)];
    if let Some((lo, hi)) = summary.salary_min_range {
        lines.push(format!("Salary min: {} to {}", format_money(lo), format_money(hi)));
    }
    if let Some((lo, hi)) = summary.salary_max_range {
        lines.push(format!("Salary max: {} to {}", format_money(lo), format_money(hi)));
    }
    if summary.undated > 0 {
        lines.push(format!("Without closing date: {}", summary.undated));
    }
    lines.push("By organization:".to_string());
    for (name, count) in &summary.by_organization {
        let name = if name.is_empty() { "(none)" } else { name };
        lines.push(format!("  {name}: {count}"));
    }
    lines.join("\n")
}

pub fn cpi_text(result: &CpiResult) -> String {
    let prices = result
        .latest_year
        .map_or_else(|| "nominal".to_string(), |year| format!("{year} prices"));
    format!(
        "{} in {} = {} ({prices}, as of {})",
        format_money(result.amount),
        result.year,
        format_money(result.adjusted),
        result.as_of
    )
}

/// Whole dollars with thousands separators, e.g. `$117,445`.
pub fn format_money(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}")
}

fn value_cell(record: &JobRecord, meta: &ColumnMeta) -> Cell {
    let text = match meta.name.as_str() {
        columns::JOB_ID => Some(record.job_id.clone()),
        columns::JOB_TITLE => Some(record.job_title.clone()),
        columns::ORGANIZATION => Some(record.organization.clone()),
        columns::LOCATION => Some(record.location.clone()),
        columns::SALARY_MIN => record.salary_min.map(format_money),
        columns::SALARY_MAX => record.salary_max.map(format_money),
        columns::CLOSING_DATE => record.closing_date.map(|d| d.to_string()),
        columns::DIVISION => record.division.clone(),
        columns::ADDRESS => record.address.clone(),
        columns::JOB_CODE => record.job_code.clone(),
        columns::LINK => record.link.clone(),
        _ => None,
    };
    match text {
        Some(text) if !text.is_empty() => Cell::new(text),
        _ => Cell::new("-").add_attribute(Attribute::Dim),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}
