use super::{OutputFormat, render, ui};
use crate::core::ReportService;
use crate::core::report::MonthlySummary;
use anyhow::Result;
use chrono::Utc;
use comfy_table::Cell;

impl MonthlySummary {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Product"),
            ui::header_cell("Kind"),
            ui::header_cell("Type"),
            ui::header_cell("Daily Average"),
        ]);

        for account in &self.account_summaries {
            table.add_row(vec![
                Cell::new(account.account_number.as_deref().unwrap_or(&account.id)),
                Cell::new("Account"),
                Cell::new(&account.account_type),
                ui::format_optional_cell(account.daily_average, |v| format!("{v:.2}")),
            ]);
        }
        for credit in &self.credit_summaries {
            table.add_row(vec![
                Cell::new(credit.credit_number.as_deref().unwrap_or(&credit.id)),
                Cell::new("Credit"),
                Cell::new(&credit.credit_type),
                ui::format_optional_cell(credit.daily_average, |v| format!("{v:.2}")),
            ]);
        }

        let mut output = format!(
            "Monthly summary for {}: {}\n\n",
            ui::style_text(&self.customer_id, ui::StyleType::Title),
            ui::style_text(&self.period, ui::StyleType::TotalLabel)
        );
        output.push_str(&table.to_string());
        output.push_str("\n\n");
        output.push_str(&ui::total_line("Total Daily Average", self.total_daily_average));

        let warnings = ui::source_warnings(&self.sources);
        if !warnings.is_empty() {
            output.push_str("\n\n");
            output.push_str(&warnings);
        }
        output
    }
}

pub async fn run(
    service: &ReportService,
    customer_id: &str,
    format: OutputFormat,
) -> Result<String> {
    let spinner = ui::new_spinner("Fetching daily balances...");
    let summary = service.build_monthly_summary(customer_id, Utc::now()).await;
    spinner.finish_and_clear();

    render(&summary?, format, MonthlySummary::display_as_table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fanout::{SourceHealth, source_status};
    use crate::core::model::{AccountSnapshot, CreditSnapshot};
    use chrono::TimeZone;

    fn summary() -> MonthlySummary {
        MonthlySummary {
            customer_id: "c-1".to_string(),
            period: "OCTUBRE 2026".to_string(),
            total_daily_average: 700.0,
            account_summaries: vec![AccountSnapshot {
                id: "acc-1".to_string(),
                account_number: Some("001-123".to_string()),
                account_type: "SAVINGS".to_string(),
                customer_id: "c-1".to_string(),
                balance: Some(1000.0),
                status: Some("ACTIVE".to_string()),
                created_at: None,
                daily_average: Some(1000.0),
            }],
            credit_summaries: vec![CreditSnapshot {
                id: "cr-1".to_string(),
                credit_number: None,
                credit_type: "LOAN".to_string(),
                customer_id: "c-1".to_string(),
                outstanding_balance: Some(300.0),
                credit_limit: None,
                available_credit: None,
                interest_rate: None,
                status: Some("ACTIVE".to_string()),
                created_at: None,
                daily_average: Some(-300.0),
            }],
            generated_at: Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap(),
            sources: source_status([
                ("accounts", SourceHealth::Ok),
                ("credits", SourceHealth::Ok),
            ]),
        }
    }

    #[test]
    fn test_display_as_table() {
        let output = summary().display_as_table();
        assert!(output.contains("OCTUBRE 2026"));
        assert!(output.contains("001-123"));
        assert!(output.contains("cr-1"));
        assert!(output.contains("-300.00"));
        assert!(output.contains("700.00"));
        assert!(!output.contains("Warning"));
    }

    #[test]
    fn test_json_output_uses_camel_case() {
        let json = render(&summary(), OutputFormat::Json, |_| String::new()).unwrap();
        assert!(json.contains("\"totalDailyAverage\": 700.0"));
        assert!(json.contains("\"accountSummaries\""));
        assert!(json.contains("\"accounts\": \"OK\""));
    }
}
