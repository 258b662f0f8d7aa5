use super::{OutputFormat, render, ui};
use crate::core::ReportService;
use crate::core::period::DateRange;
use crate::core::report::ProductReport;
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use comfy_table::Cell;
use std::collections::BTreeMap;

fn breakdown_table(label: &str, counts: &BTreeMap<String, usize>) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell(label), ui::header_cell("Count")]);
    for (key, count) in counts {
        table.add_row(vec![Cell::new(key), ui::number_cell(count)]);
    }
    table.to_string()
}

impl ProductReport {
    pub fn display_as_table(&self) -> String {
        let summary = &self.summary;

        let mut totals = ui::new_styled_table();
        totals.set_header(vec![
            ui::header_cell("Customers"),
            ui::header_cell("Accounts"),
            ui::header_cell("Credits"),
            ui::header_cell("Transactions"),
            ui::header_cell("Total Balance"),
        ]);
        totals.add_row(vec![
            ui::number_cell(summary.total_customers),
            ui::number_cell(summary.total_accounts),
            ui::number_cell(summary.total_credits),
            ui::number_cell(summary.total_transactions),
            ui::amount_cell(summary.total_balance),
        ]);

        let mut metrics = ui::new_styled_table();
        metrics.set_header(vec![ui::header_cell("Metric"), ui::header_cell("Value")]);
        metrics.add_row(vec![
            Cell::new("Average account balance"),
            ui::amount_cell(self.account_metrics.average_balance),
        ]);
        metrics.add_row(vec![
            Cell::new("New accounts"),
            ui::number_cell(self.account_metrics.new_accounts),
        ]);
        metrics.add_row(vec![
            Cell::new("Total outstanding credit"),
            ui::amount_cell(self.credit_metrics.total_outstanding),
        ]);
        metrics.add_row(vec![
            Cell::new("Average interest rate (%)"),
            ui::number_cell(format!("{:.2}", self.credit_metrics.average_interest_rate)),
        ]);
        metrics.add_row(vec![
            Cell::new("Products per customer"),
            ui::number_cell(format!(
                "{:.2}",
                self.customer_metrics.average_products_per_customer
            )),
        ]);

        let mut output = format!(
            "Product report: {}\n\n",
            ui::style_text(&self.period, ui::StyleType::Title)
        );
        for section in [
            totals.to_string(),
            metrics.to_string(),
            breakdown_table("Account Type", &self.account_metrics.by_type),
            breakdown_table("Credit Type", &self.credit_metrics.by_type),
            breakdown_table("Customer Type", &self.customer_metrics.by_type),
        ] {
            output.push_str(&section);
            output.push_str("\n\n");
        }
        output.push_str(&ui::total_line("Total Balance", summary.total_balance));

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
    start: NaiveDate,
    end: NaiveDate,
    format: OutputFormat,
) -> Result<String> {
    let range = DateRange::new(start, end)?;

    let spinner = ui::new_spinner("Fetching customers, accounts, credits and transactions...");
    let report = service.build_product_report(range, Utc::now()).await;
    spinner.finish_and_clear();

    render(&report?, format, ProductReport::display_as_table)
}
