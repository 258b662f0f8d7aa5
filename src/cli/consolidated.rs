use super::{OutputFormat, render, ui};
use crate::core::ReportService;
use crate::core::report::ConsolidatedSummary;
use anyhow::Result;
use chrono::Utc;
use comfy_table::Cell;

impl ConsolidatedSummary {
    fn accounts_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Account"),
            ui::header_cell("Type"),
            ui::header_cell("Status"),
            ui::header_cell("Opened"),
            ui::header_cell("Balance"),
        ]);
        for account in &self.accounts {
            table.add_row(vec![
                Cell::new(account.account_number.as_deref().unwrap_or(&account.id)),
                Cell::new(&account.account_type),
                Cell::new(account.status.as_deref().unwrap_or("N/A")),
                Cell::new(
                    account
                        .opened_date
                        .map_or("N/A".to_string(), |d| d.date_naive().to_string()),
                ),
                ui::amount_cell(account.current_balance),
            ]);
        }
        table.to_string()
    }

    fn credits_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Credit"),
            ui::header_cell("Type"),
            ui::header_cell("Status"),
            ui::header_cell("Limit"),
            ui::header_cell("Available"),
            ui::header_cell("Rate (%)"),
            ui::header_cell("Balance"),
        ]);
        for credit in &self.credits {
            table.add_row(vec![
                Cell::new(credit.credit_number.as_deref().unwrap_or(&credit.id)),
                Cell::new(&credit.credit_type),
                Cell::new(credit.status.as_deref().unwrap_or("N/A")),
                ui::format_optional_cell(credit.credit_limit, |v| format!("{v:.2}")),
                ui::format_optional_cell(credit.available_credit, |v| format!("{v:.2}")),
                ui::format_optional_cell(credit.interest_rate, |v| format!("{v:.2}")),
                ui::amount_cell(credit.current_balance),
            ]);
        }
        table.to_string()
    }

    fn transactions_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Date"),
            ui::header_cell("Type"),
            ui::header_cell("Product"),
            ui::header_cell("Description"),
            ui::header_cell("Amount"),
        ]);
        for tx in &self.recent_transactions {
            table.add_row(vec![
                Cell::new(
                    tx.transaction_date
                        .map_or("N/A".to_string(), |d| d.format("%Y-%m-%d %H:%M").to_string()),
                ),
                Cell::new(&tx.transaction_type),
                Cell::new(format!("{} {}", tx.product_type, tx.product_id)),
                Cell::new(tx.description.as_deref().unwrap_or("")),
                ui::amount_cell(tx.amount),
            ]);
        }
        table.to_string()
    }

    pub fn display_as_table(&self) -> String {
        let customer = &self.customer;
        let name = match &customer.last_name {
            Some(last_name) => format!("{} {last_name}", customer.first_name),
            None => customer.first_name.clone(),
        };
        let overview = &self.products_overview;

        let mut output = format!(
            "Customer: {} ({} {}, {})\n",
            ui::style_text(&name, ui::StyleType::Title),
            customer.document_type,
            customer.document_number,
            customer.customer_type
        );
        output.push_str(&ui::style_text(
            &format!(
                "Accounts {}/{} active, credits {}/{} active, {} transactions\n\n",
                overview.active_accounts,
                overview.total_accounts,
                overview.active_credits,
                overview.total_credits,
                overview.total_transactions
            ),
            ui::StyleType::Subtle,
        ));

        if !self.accounts.is_empty() {
            output.push_str(&self.accounts_table());
            output.push_str("\n\n");
        }
        if !self.credits.is_empty() {
            output.push_str(&self.credits_table());
            output.push_str("\n\n");
        }
        if !self.recent_transactions.is_empty() {
            output.push_str(&self.transactions_table());
            output.push_str("\n\n");
        }

        output.push_str(&ui::total_line("Total Balance", self.total_balance));

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
    let spinner = ui::new_spinner("Fetching accounts, credits and transactions...");
    let summary = service
        .build_consolidated_summary(customer_id, Utc::now())
        .await;
    spinner.finish_and_clear();

    render(&summary?, format, ConsolidatedSummary::display_as_table)
}
