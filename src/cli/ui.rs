use crate::core::fanout::{SourceHealth, SourceStatus};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an `Option<T>` into a `Cell`. `None` is displayed as "N/A".
pub fn format_optional_cell<T>(value: Option<T>, format_fn: impl Fn(T) -> String) -> Cell {
    value.map_or(
        Cell::new("N/A")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
        |v| Cell::new(format_fn(v)).set_alignment(CellAlignment::Right),
    )
}

/// Creates a right-aligned amount cell, red when negative.
pub fn amount_cell(amount: f64) -> Cell {
    let cell = Cell::new(format!("{amount:.2}")).set_alignment(CellAlignment::Right);
    if amount < 0.0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

/// Creates a plain right-aligned cell for counts and ratios.
pub fn number_cell(text: impl ToString) -> Cell {
    Cell::new(text.to_string()).set_alignment(CellAlignment::Right)
}

/// Renders "<label>: <value>" with the standard total styling.
pub fn total_line(label: &str, value: f64) -> String {
    let style_type = if value < 0.0 {
        StyleType::Error
    } else {
        StyleType::TotalValue
    };
    format!(
        "{}: {}",
        style_text(label, StyleType::TotalLabel),
        style_text(&format!("{value:.2}"), style_type)
    )
}

/// One line per source that did not answer normally; empty when all are healthy.
pub fn source_warnings(sources: &SourceStatus) -> String {
    sources
        .iter()
        .filter(|(_, health)| **health == SourceHealth::Unavailable)
        .map(|(name, _)| {
            style_text(
                &format!("Warning: {name} service unavailable, figures may be understated"),
                StyleType::Error,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Creates a spinner shown while sibling services are queried.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fanout::source_status;

    #[test]
    fn test_source_warnings() {
        let healthy = source_status([
            ("accounts", SourceHealth::Ok),
            ("credits", SourceHealth::Empty),
        ]);
        assert!(source_warnings(&healthy).is_empty());

        let degraded = source_status([
            ("accounts", SourceHealth::Unavailable),
            ("credits", SourceHealth::Ok),
        ]);
        let warnings = source_warnings(&degraded);
        assert!(warnings.contains("accounts service unavailable"));
        assert!(!warnings.contains("credits"));
    }

    #[test]
    fn test_format_optional_cell() {
        let cell = format_optional_cell(Some(12.5), |v| format!("{v:.1}"));
        assert_eq!(cell.content(), "12.5");
        let cell = format_optional_cell(None::<f64>, |v| format!("{v:.1}"));
        assert_eq!(cell.content(), "N/A");
    }
}
