//! Table rendering for every command.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use spm_client::ClientConfig;
use spm_compliance::{HeatmapStats, RiskFilter};
use spm_map::{AdvisoryNote, MappingState, NoteKind};
use spm_model::{
    COUNTRIES, CountryRisk, HealthStatus, RiskLevel, STANDARD_FIELDS, SimulationResult,
};

/// Prints headers and rows as a table. Short rows are padded with `-`.
pub fn print_rows(title: &str, headers: &[String], rows: &[Vec<String>], total_rows: Option<usize>) {
    println!("{title}");
    let mut table = Table::new();
    table.set_header(headers.iter().map(|h| header_cell(h)));
    apply_table_style(&mut table);
    for row in rows {
        table.add_row((0..headers.len()).map(|index| match row.get(index) {
            Some(value) => Cell::new(value),
            None => dim_cell("-"),
        }));
    }
    println!("{table}");
    match total_rows {
        Some(total) if total > rows.len() => {
            println!("Showing {} of {total} rows, {} columns", rows.len(), headers.len());
        }
        _ => println!("{} rows, {} columns", rows.len(), headers.len()),
    }
}

pub fn print_mapping(state: &MappingState) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Suggested"),
        header_cell("Mapped To"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for (header, mapping) in state.entries() {
        let suggested = if mapping.original_suggestion.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(&mapping.original_suggestion)
        };
        let target = if mapping.is_mapped() {
            Cell::new(&mapping.current_value).add_attribute(Attribute::Bold)
        } else {
            dim_cell("-")
        };
        let status = if !mapping.is_mapped() {
            Cell::new("UNMAPPED").fg(Color::Red)
        } else if mapping.is_overridden() {
            Cell::new("OVERRIDDEN").fg(Color::Yellow)
        } else {
            Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            Cell::new(header).fg(Color::Blue).add_attribute(Attribute::Bold),
            suggested,
            target,
            status,
        ]);
    }
    println!("{table}");

    let summary = state.summary();
    println!(
        "{} columns: {} mapped, {} unmapped, {} overridden",
        summary.total, summary.mapped, summary.unmapped, summary.overridden
    );
    for (header, target) in state.unknown_targets() {
        println!("note: '{header}' is mapped to '{target}', which is not a standard field");
    }
}

pub fn print_notes(notes: &[AdvisoryNote]) {
    if notes.is_empty() {
        return;
    }
    println!();
    println!("Notes:");
    for note in notes {
        let color = match note.kind {
            NoteKind::Error => Color::Red,
            NoteKind::Warning => Color::Yellow,
            NoteKind::Info => Color::Blue,
        };
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::NOTHING);
        table.add_row(vec![
            Cell::new(format!("{} {}", note.kind.icon(), note.kind.label())).fg(color),
            Cell::new(&note.text),
        ]);
        println!("{table}");
    }
}

pub fn print_heatmap(entries: &[&CountryRisk], stats: HeatmapStats, filter: RiskFilter) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Country"),
        header_cell("Risk"),
        header_cell("Details"),
    ]);
    apply_summary_table_style(&mut table);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.country).add_attribute(Attribute::Bold),
            risk_cell(entry.level),
            Cell::new(&entry.risk_text),
        ]);
    }
    println!("{table}");

    let mut stats_table = Table::new();
    stats_table.set_header(vec![
        header_cell("Total"),
        risk_cell(RiskLevel::High),
        risk_cell(RiskLevel::Medium),
        risk_cell(RiskLevel::Low),
    ]);
    apply_table_style(&mut stats_table);
    stats_table.add_row(vec![
        Cell::new(stats.total),
        count_cell(stats.high, Color::Red),
        count_cell(stats.medium, Color::Yellow),
        count_cell(stats.low, Color::Green),
    ]);
    for index in 0..4 {
        align_column(&mut stats_table, index, CellAlignment::Right);
    }
    println!("{stats_table}");
    if filter != RiskFilter::All {
        println!("Filter: {filter} ({} of {} shown)", entries.len(), stats.total);
    }
}

pub fn print_simulation(result: &SimulationResult) {
    println!("Impact summary");
    println!("{}", result.impact_summary);
    println!();

    let mut table = Table::new();
    table.set_header(vec![header_cell("Cost Analysis"), header_cell("")]);
    apply_table_style(&mut table);
    for (label, value) in result.cost_rows() {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    println!("{table}");

    print_list("Compliance notes", &result.compliance_notes);
    print_list("Recommendations", &result.recommendations);
}

pub fn print_fields() {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Description")]);
    apply_table_style(&mut table);
    for field in STANDARD_FIELDS {
        table.add_row(vec![
            Cell::new(field.name).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(field.description),
        ]);
    }
    println!("{table}");
}

pub fn print_countries() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Country"),
        header_cell("Currency"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for country in COUNTRIES {
        table.add_row(vec![
            Cell::new(country.code).add_attribute(Attribute::Bold),
            Cell::new(country.name),
            Cell::new(country.currency),
        ]);
    }
    println!("{table}");
}

pub fn print_health(config: &ClientConfig, status: &HealthStatus) {
    let state = if status.is_healthy() {
        Cell::new(&status.status).fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        Cell::new(&status.status).fg(Color::Red).add_attribute(Attribute::Bold)
    };
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec![header_cell("Backend"), Cell::new(&config.base_url)]);
    table.add_row(vec![header_cell("Environment"), Cell::new(config.environment)]);
    table.add_row(vec![header_cell("Status"), state]);
    table.add_row(vec![
        header_cell("Version"),
        status.version.as_deref().map_or_else(|| dim_cell("-"), Cell::new),
    ]);
    println!("{table}");
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{title}:");
    for item in items {
        println!("- {item}");
    }
}

fn risk_cell(level: RiskLevel) -> Cell {
    let color = match level {
        RiskLevel::High => Color::Red,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::Low => Color::Green,
    };
    Cell::new(format!("{} {}", level.icon(), level.label()))
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
