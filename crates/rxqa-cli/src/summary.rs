use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width};

use rxqa_badges::{description, format_for_submission, icon};
use rxqa_guard::{AccessToken, WindowStatus, format_wait};
use rxqa_model::{DetectionTag, FieldName, TagSet};

use rxqa_cli::types::{BadgesReport, FormReport, IntegritySignals, SubmitReport};

pub fn print_check(report: &FormReport) {
    println!("{}", form_table(report));
    print_form_tags(&report.form_tags, &TagSet::new());
}

pub fn print_submission(report: &SubmitReport) {
    print_signals(report.signals);
    println!("Session: {} (revision {})", report.session_file.display(), report.revision);
    println!("{}", form_table(&report.form));
    print_form_tags(&report.form.form_tags, &report.new_form_tags);
    let new_count = report
        .form
        .fields
        .iter()
        .map(|field| field.new_tags.len())
        .sum::<usize>()
        + report.new_form_tags.len();
    println!("New badges: {new_count}  Total badges: {}", report.total_badges);
}

pub fn print_badges(report: &BadgesReport) {
    print_signals(report.signals);
    let session = &report.session;
    println!("Session: {}", report.session_file.display());

    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Badges"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);

    for field in FieldName::ALL {
        let sorted = session.sorted(field);
        let newly_earned = session.newly_earned(field);
        table.add_row(vec![
            field_cell(field),
            badge_cell(&sorted, &newly_earned),
            count_cell(sorted.len()),
        ]);
    }
    let form = session.sorted_form();
    table.add_row(vec![
        Cell::new("Form").fg(Color::Blue).add_attribute(Attribute::Bold),
        badge_cell(&form, &TagSet::new()),
        count_cell(form.len()),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL").fg(Color::Cyan).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(session.total()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_export(report: &BadgesReport) {
    println!(
        "{}",
        format_for_submission(
            report.session.accomplishments(),
            report.session.form_accomplishments()
        )
    );
}

pub fn print_token(token: &AccessToken, status: Option<WindowStatus>) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Email"), Cell::new(&token.email)]);
    table.add_row(vec![Cell::new("Start"), Cell::new(format!("{} {}", token.date, token.time))]);
    table.add_row(vec![Cell::new("Duration"), Cell::new(&token.duration)]);
    if let Some(status) = status {
        table.add_row(vec![Cell::new("Status"), status_cell(status)]);
    }
    println!("{table}");
}

fn form_table(report: &FormReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Value"),
        header_cell("Detections"),
        header_cell("Errors"),
    ]);
    apply_form_table_style(&mut table);
    for field in &report.fields {
        table.add_row(vec![
            field_cell(field.field),
            value_cell(&field.value),
            badge_cell(&field.tags, &field.new_tags),
            error_cell(&field.messages),
        ]);
    }
    table
}

fn print_form_tags(tags: &[DetectionTag], new_tags: &TagSet) {
    if tags.is_empty() {
        return;
    }
    let rendered: Vec<String> = tags.iter().map(|tag| badge_text(tag, new_tags)).collect();
    println!("Form: {}", rendered.join(", "));
}

fn print_signals(signals: IntegritySignals) {
    if signals.tampered {
        eprintln!("warning: session file was modified outside rxqa; restored what could be verified");
    }
    if signals.concurrent_session {
        eprintln!("warning: session file was changed by another session");
    }
}

fn badge_text(tag: &DetectionTag, new_tags: &TagSet) -> String {
    let marker = if new_tags.contains(tag) { " (new)" } else { "" };
    format!("{} {}{marker}", icon(tag), description(tag))
}

fn badge_cell(tags: &[DetectionTag], new_tags: &TagSet) -> Cell {
    if tags.is_empty() {
        return dim_cell("-");
    }
    let lines: Vec<String> = tags.iter().map(|tag| badge_text(tag, new_tags)).collect();
    let cell = Cell::new(lines.join("\n"));
    if tags.iter().any(|tag| new_tags.contains(tag)) {
        cell.fg(Color::Green)
    } else {
        cell
    }
}

fn error_cell(messages: &[String]) -> Cell {
    if messages.is_empty() {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        Cell::new(messages.join("\n")).fg(Color::Red)
    }
}

fn value_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("(empty)")
    } else {
        Cell::new(format!("{value:?}"))
    }
}

fn field_cell(field: FieldName) -> Cell {
    Cell::new(field.label())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn status_cell(status: WindowStatus) -> Cell {
    match status {
        WindowStatus::NotYetAvailable {
            minutes_until_start,
        } => Cell::new(format!("Opens in {}", format_wait(minutes_until_start))).fg(Color::Yellow),
        WindowStatus::Open {
            remaining_minutes, ..
        } => Cell::new(format!("Open, {} left", format_wait(remaining_minutes))).fg(Color::Green),
        WindowStatus::Expired => Cell::new(status.to_string()).fg(Color::Red),
    }
}

pub fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_form_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(15)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
        ]);
    }
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
