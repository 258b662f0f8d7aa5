//! Assembles monthly, consolidated and product reports from the record sources.
//!
//! Each build fetches the sources it needs concurrently (see
//! [`crate::core::fanout`]), then derives the report in one step from the joined
//! data. Nothing is kept between calls.

use crate::core::balance::{credit_current_balance, net_balance};
use crate::core::customer::CustomerStore;
use crate::core::error::{ServiceError, ServiceResult};
use crate::core::fanout::{FanOut, SourceStatus, source_status};
use crate::core::metrics::{AccountMetrics, CreditMetrics, CustomerMetrics, sum};
use crate::core::model::{AccountSnapshot, CreditSnapshot, CustomerRecord, TransactionRecord};
use crate::core::period::{DateRange, month_label};
use crate::core::source::{AccountSource, CreditSource, TransactionSource};
use chrono::{DateTime, Locale, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

const ACCOUNTS: &str = "accounts";
const CREDITS: &str = "credits";
const TRANSACTIONS: &str = "transactions";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub customer_id: String,
    pub period: String,
    pub total_daily_average: f64,
    pub account_summaries: Vec<AccountSnapshot>,
    pub credit_summaries: Vec<CreditSnapshot>,
    pub generated_at: DateTime<Utc>,
    pub sources: SourceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsOverview {
    pub total_accounts: usize,
    pub active_accounts: usize,
    pub total_credits: usize,
    pub active_credits: usize,
    pub total_transactions: usize,
}

impl ProductsOverview {
    fn build(
        accounts: &[AccountSnapshot],
        credits: &[CreditSnapshot],
        transactions: &[TransactionRecord],
    ) -> Self {
        ProductsOverview {
            total_accounts: accounts.len(),
            active_accounts: accounts.iter().filter(|a| a.is_active()).count(),
            total_credits: credits.len(),
            active_credits: credits.iter().filter(|c| c.is_active()).count(),
            total_transactions: transactions.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetail {
    pub id: String,
    pub account_number: Option<String>,
    pub account_type: String,
    pub current_balance: f64,
    pub status: Option<String>,
    pub opened_date: Option<DateTime<Utc>>,
}

impl From<&AccountSnapshot> for AccountDetail {
    fn from(account: &AccountSnapshot) -> Self {
        AccountDetail {
            id: account.id.clone(),
            account_number: account.account_number.clone(),
            account_type: account.account_type.clone(),
            current_balance: account.balance(),
            status: account.status.clone(),
            opened_date: account.created_at.map(|created| created.and_utc()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditDetail {
    pub id: String,
    pub credit_number: Option<String>,
    pub credit_type: String,
    pub current_balance: f64,
    pub credit_limit: Option<f64>,
    pub available_credit: Option<f64>,
    pub interest_rate: Option<f64>,
    pub status: Option<String>,
}

impl From<&CreditSnapshot> for CreditDetail {
    fn from(credit: &CreditSnapshot) -> Self {
        CreditDetail {
            id: credit.id.clone(),
            credit_number: credit.credit_number.clone(),
            credit_type: credit.credit_type.clone(),
            current_balance: credit_current_balance(credit),
            credit_limit: credit.credit_limit,
            available_credit: credit.available_credit,
            interest_rate: credit.interest_rate,
            status: credit.status.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetail {
    pub id: String,
    pub transaction_type: String,
    pub amount: f64,
    pub description: Option<String>,
    pub transaction_date: Option<DateTime<Utc>>,
    pub product_type: String,
    pub product_id: String,
}

impl From<&TransactionRecord> for TransactionDetail {
    fn from(tx: &TransactionRecord) -> Self {
        TransactionDetail {
            id: tx.id.clone(),
            transaction_type: tx.transaction_type.clone(),
            amount: tx.amount.unwrap_or(0.0),
            description: tx.description.clone(),
            transaction_date: tx.transaction_date,
            product_type: tx.product.kind().to_string(),
            product_id: tx.product.id().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedSummary {
    pub customer: CustomerRecord,
    pub summary_date: DateTime<Utc>,
    pub total_balance: f64,
    pub products_overview: ProductsOverview,
    pub accounts: Vec<AccountDetail>,
    pub credits: Vec<CreditDetail>,
    pub recent_transactions: Vec<TransactionDetail>,
    pub sources: SourceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_customers: usize,
    pub total_accounts: usize,
    pub total_credits: usize,
    /// Sum of every account balance, whatever its status.
    pub total_balance: f64,
    pub total_transactions: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReport {
    pub period: String,
    pub generated_at: DateTime<Utc>,
    pub summary: ReportSummary,
    pub account_metrics: AccountMetrics,
    pub credit_metrics: CreditMetrics,
    pub customer_metrics: CustomerMetrics,
    pub sources: SourceStatus,
}

/// The three sibling services a report can draw from.
#[derive(Clone)]
pub struct RecordSources {
    pub accounts: Arc<dyn AccountSource>,
    pub credits: Arc<dyn CreditSource>,
    pub transactions: Arc<dyn TransactionSource>,
}

pub struct ReportService {
    customers: Arc<dyn CustomerStore>,
    sources: RecordSources,
    fanout: FanOut,
    locale: Locale,
}

impl ReportService {
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        sources: RecordSources,
        fanout: FanOut,
        locale: Locale,
    ) -> Self {
        Self {
            customers,
            sources,
            fanout,
            locale,
        }
    }

    /// Daily-average position of a customer for the month containing `at`.
    pub async fn build_monthly_summary(
        &self,
        customer_id: &str,
        at: DateTime<Utc>,
    ) -> ServiceResult<MonthlySummary> {
        info!(customer_id, "Generating monthly summary");

        let (accounts, credits) = futures::join!(
            self.fanout
                .fetch(ACCOUNTS, self.sources.accounts.fetch_daily_balances(customer_id)),
            self.fanout
                .fetch(CREDITS, self.sources.credits.fetch_daily_balances(customer_id)),
        );

        let sources = source_status([
            (ACCOUNTS, accounts.health()),
            (CREDITS, credits.health()),
        ]);
        let accounts = accounts.into_records();
        let credits = credits.into_records();

        Ok(MonthlySummary {
            customer_id: customer_id.to_string(),
            period: month_label(at, self.locale),
            total_daily_average: sum(&accounts, |a| a.daily_average.unwrap_or(0.0))
                + sum(&credits, |c| c.daily_average.unwrap_or(0.0)),
            account_summaries: accounts,
            credit_summaries: credits,
            generated_at: at,
            sources,
        })
    }

    /// Net position and product details of one existing customer.
    pub async fn build_consolidated_summary(
        &self,
        customer_id: &str,
        at: DateTime<Utc>,
    ) -> ServiceResult<ConsolidatedSummary> {
        info!(customer_id, "Generating consolidated summary");

        let customer = self
            .customers
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| ServiceError::customer_not_found(customer_id))?;

        let (accounts, credits, transactions) = futures::join!(
            self.fanout
                .fetch(ACCOUNTS, self.sources.accounts.fetch_by_customer(customer_id)),
            self.fanout
                .fetch(CREDITS, self.sources.credits.fetch_by_customer(customer_id)),
            self.fanout.fetch(
                TRANSACTIONS,
                self.sources.transactions.fetch_by_customer(customer_id)
            ),
        );

        let sources = source_status([
            (ACCOUNTS, accounts.health()),
            (CREDITS, credits.health()),
            (TRANSACTIONS, transactions.health()),
        ]);
        let (accounts, credits, transactions) =
            (accounts.records(), credits.records(), transactions.records());

        Ok(ConsolidatedSummary {
            customer,
            summary_date: at,
            total_balance: net_balance(accounts, credits),
            products_overview: ProductsOverview::build(accounts, credits, transactions),
            accounts: accounts.iter().map(AccountDetail::from).collect(),
            credits: credits.iter().map(CreditDetail::from).collect(),
            recent_transactions: transactions.iter().map(TransactionDetail::from).collect(),
            sources,
        })
    }

    /// Portfolio-wide counts and metrics, with transactions restricted to `range`.
    pub async fn build_product_report(
        &self,
        range: DateRange,
        at: DateTime<Utc>,
    ) -> ServiceResult<ProductReport> {
        info!(start = %range.start, end = %range.end, "Generating product report");

        let (customers, accounts, credits, transactions) = futures::join!(
            self.customers.find_all(),
            self.fanout.fetch(ACCOUNTS, self.sources.accounts.fetch_all()),
            self.fanout.fetch(CREDITS, self.sources.credits.fetch_all()),
            self.fanout.fetch(
                TRANSACTIONS,
                self.sources
                    .transactions
                    .fetch_by_date_range(range.start, range.end)
            ),
        );
        let customers = customers?;

        let sources = source_status([
            (ACCOUNTS, accounts.health()),
            (CREDITS, credits.health()),
            (TRANSACTIONS, transactions.health()),
        ]);
        let (accounts, credits, transactions) =
            (accounts.records(), credits.records(), transactions.records());

        Ok(ProductReport {
            period: range.to_string(),
            generated_at: at,
            summary: ReportSummary {
                total_customers: customers.len(),
                total_accounts: accounts.len(),
                total_credits: credits.len(),
                total_balance: sum(accounts, AccountSnapshot::balance),
                total_transactions: transactions.len(),
            },
            account_metrics: AccountMetrics::build(accounts, &range),
            credit_metrics: CreditMetrics::build(credits),
            customer_metrics: CustomerMetrics::build(&customers, accounts, credits),
            sources,
        })
    }
}
