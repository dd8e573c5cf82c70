use colored::Colorize;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell as TableCell, ContentArrangement,
    Table,
};

use crate::models::{Cell, ResultTable, StatSummary};
use crate::pipeline::RunOutcome;

/// Format the result table for the terminal.
pub fn format_result_table(table: &ResultTable) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Carbon Estimates".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut t = Table::new();
    t.load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(table.columns.clone());

    for row in &table.rows {
        t.add_row(row.cells.iter().map(format_cell).collect::<Vec<_>>());
    }

    output.push_str(&format!("{t}"));
    output
}

/// Print the result table.
pub fn print_result_table(table: &ResultTable) {
    print!("{}", format_result_table(table));
}

fn format_cell(cell: &Cell) -> TableCell {
    match cell {
        Cell::Float(v) => TableCell::new(format!("{v:.4}")),
        Cell::Null => TableCell::new("-"),
        other => TableCell::new(other.to_field()),
    }
}

/// Format the per-run counters line.
pub fn format_run_summary(outcome: &RunOutcome) -> String {
    format!(
        "{} {} estimated, {} without data, {} failed\n",
        "Zones:".bold(),
        outcome.estimated().to_string().green(),
        outcome.no_data().to_string().yellow(),
        outcome.failed().to_string().red(),
    )
}

/// Print the per-run counters line.
pub fn print_run_summary(outcome: &RunOutcome) {
    print!("{}", format_run_summary(outcome));
}

/// Format a height-distribution summary as a metric/value table.
pub fn format_distribution_table(summary: &StatSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Height Distribution".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut t = Table::new();
    t.load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value"]);

    t.add_row(vec![
        TableCell::new("Sample Count"),
        TableCell::new(format!("{}", summary.count)),
    ]);
    match &summary.distribution {
        Some(d) => {
            let metrics = [
                ("Mean", d.mean),
                ("P5", d.p5),
                ("P10", d.p10),
                ("P25", d.p25),
                ("P75", d.p75),
                ("P100 (max)", d.p100),
                ("IQR", d.iqr),
                ("Excess Kurtosis", d.kurtosis),
            ];
            for (name, value) in metrics {
                t.add_row(vec![
                    TableCell::new(name),
                    TableCell::new(format!("{value:.4}")),
                ]);
            }
        }
        None => {
            t.add_row(vec![TableCell::new("Distribution"), TableCell::new("-")]);
        }
    }

    output.push_str(&format!("{t}"));
    output
}

/// Print a height-distribution summary.
pub fn print_distribution_table(summary: &StatSummary) {
    print!("{}", format_distribution_table(summary));
}
