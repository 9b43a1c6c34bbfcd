use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use survey_model::{RunOutcome, RunStatus};

pub fn print_summary(outcome: &RunOutcome) {
    println!("{}", outcome.message);
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![header_cell("Field"), header_cell("Value")]);

    table.add_row(vec![Cell::new("Status"), status_cell(outcome.status)]);
    table.add_row(vec![Cell::new("Inputs found"), count_cell(outcome.inputs_found)]);
    table.add_row(vec![
        Cell::new("Inputs processed"),
        count_cell(outcome.inputs_processed),
    ]);
    table.add_row(vec![
        Cell::new("Total responses"),
        count_cell(outcome.total_responses),
    ]);
    if let Some(artifacts) = &outcome.artifacts {
        table.add_row(vec![Cell::new("Run stamp"), Cell::new(&artifacts.run_stamp)]);
        table.add_row(vec![
            Cell::new("File summary"),
            Cell::new(artifacts.file_summary.display()),
        ]);
        if let Some(path) = &artifacts.cleaned {
            table.add_row(vec![Cell::new("Cleaned data"), Cell::new(path.display())]);
        }
        if let Some(path) = &artifacts.kpis {
            table.add_row(vec![Cell::new("KPIs"), Cell::new(path.display())]);
        }
    }
    table.add_row(vec![
        Cell::new("Health file"),
        Cell::new(outcome.health_file.display()),
    ]);
    println!("{table}");
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .add_attribute(Attribute::Bold)
        .fg(Color::Cyan)
}

fn status_cell(status: RunStatus) -> Cell {
    let color = match status {
        RunStatus::Ok => Color::Green,
        RunStatus::NoInputs => Color::Yellow,
        RunStatus::Fatal => Color::Red,
    };
    Cell::new(status)
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    Cell::new(count).set_alignment(CellAlignment::Right)
}
