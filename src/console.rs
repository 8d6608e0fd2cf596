/// The console output module.
use crate::estimate::Projection;
use crate::format::{format_bytes, format_count, format_hours};
use crate::schema::{SchemaSpec, BASE_OVERHEAD, TYPES};
use crate::session::Form;
use crate::timing::{format_interval, parse_interval};
use crossterm::{
    style::{self, Attribute, Color, Stylize},
    ExecutableCommand,
};
use std::io::{self, Write};

const NAME: &str = env!("CARGO_PKG_NAME");

pub fn print_prompt() -> io::Result<()> {
    io::stdout()
        .execute(style::SetAttribute(Attribute::Bold))?
        .execute(style::Print(format!("{}> ", NAME)))?
        .execute(style::SetAttribute(Attribute::Reset))?;
    io::stdout().flush()?;
    Ok(())
}

pub fn echo(s: String) {
    let _ = io::stdout().execute(style::Print(s));
    let _ = io::stdout().flush();
}

pub fn error(s: String) {
    let _ = io::stdout().execute(style::PrintStyledContent(s.with(Color::Red)));
    let _ = io::stdout().flush();
}

pub fn heading(s: &str) {
    let _ = io::stdout().execute(style::PrintStyledContent(s.bold()));
    let _ = io::stdout().flush();
}

pub fn echo_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut result = String::new();

    let num_columns = headers
        .len()
        .max(rows.iter().map(|r| r.len()).max().unwrap_or(0));

    // Width of each column is its longest cell
    let mut column_widths = vec![0; num_columns];
    for (i, header) in headers.iter().enumerate() {
        column_widths[i] = header.chars().count();
    }
    for row in rows {
        for (i, col) in row.iter().enumerate() {
            column_widths[i] = column_widths[i].max(col.chars().count());
        }
    }

    let border = |result: &mut String| {
        result.push('+');
        for width in &column_widths {
            result.push_str(&"-".repeat(*width + 2));
            result.push('+');
        }
        result.push('\n');
    };
    let line = |result: &mut String, cells: &[String]| {
        result.push('|');
        for (i, width) in column_widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            result.push_str(&format!(" {:<width$} |", cell, width = *width));
        }
        result.push('\n');
    };

    border(&mut result);
    if !headers.is_empty() {
        line(&mut result, headers);
        border(&mut result);
    }
    for row in rows {
        line(&mut result, row);
    }
    border(&mut result);

    result
}

/// Builds the result cards for a projection.
pub fn render_cards(projection: &Projection, decimals: usize) -> String {
    let r = &projection.result;
    let rows: Vec<Vec<String>> = [
        ("Row Size", format_bytes(r.row_size_bytes as f64, decimals)),
        ("Rows / Day", format_count(r.rows_per_day)),
        ("Daily Growth", format_bytes(r.daily_bytes, decimals)),
        ("Monthly Growth", format_bytes(r.monthly_bytes, decimals)),
        ("Yearly Growth", format_bytes(r.yearly_bytes, decimals)),
        (
            "Active Hours",
            format!("{} h/day", format_hours(r.active_hours_per_day)),
        ),
    ]
    .into_iter()
    .map(|(label, value)| vec![label.to_string(), value])
    .collect();

    echo_table(&["Metric".into(), "Estimate".into()], &rows)
}

pub fn render_types() -> String {
    let headers = vec!["Id".into(), "Label".into(), "Size".into()];
    let rows: Vec<Vec<String>> = TYPES
        .iter()
        .map(|t| {
            let size = if t.is_variable_length {
                "length + 2".to_string()
            } else {
                format!("{}", t.fixed_size)
            };
            vec![t.id.to_string(), t.label.to_string(), size]
        })
        .collect();
    echo_table(&headers, &rows)
}

/// Lists the columns when expanded, or a one-line summary when collapsed.
pub fn render_columns(schema: &SchemaSpec, expanded: bool) -> String {
    let summary = format!(
        "{} column(s), {} bytes + {} bytes base overhead",
        schema.columns.len(),
        schema.columns_size(),
        BASE_OVERHEAD
    );
    if !expanded || schema.columns.is_empty() {
        return format!("{}\n", summary);
    }

    let headers = vec!["#".into(), "Column".into(), "Bytes".into()];
    let rows: Vec<Vec<String>> = schema
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| vec![(i + 1).to_string(), c.to_string(), c.size().to_string()])
        .collect();
    format!("{}{}\n", echo_table(&headers, &rows), summary)
}

pub fn render_inputs(form: &Form) -> String {
    let interval = match parse_interval(&form.interval) {
        Ok(seconds) => format_interval(seconds),
        Err(_) => form.interval.clone(),
    };
    format!(
        "{} agent(s), every {}, {}\n",
        format_count(form.agents),
        interval,
        form.window()
    )
}

/// Prints the full state of a form: inputs, columns, error and cards.
pub fn print_form(form: &Form) {
    let projection = form.projection();
    echo(render_inputs(form));
    echo(render_columns(&form.schema, form.columns_expanded));
    if let Some(e) = &projection.error {
        error(format!("{}\n", e));
    }
    heading("Storage projection\n");
    echo(render_cards(&projection, form.decimals));
}

#[macro_export]
macro_rules! echo {
    ($($arg:tt)*) => {
        $crate::console::echo(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::console::error(format!($($arg)*))
    };
}
