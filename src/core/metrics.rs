//! Grouped counts and derived averages over accounts, credits and customers.
use crate::core::model::{AccountSnapshot, CreditSnapshot, CustomerRecord};
use crate::core::period::DateRange;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Number of items per category; only categories present in the input appear.
pub fn count_by<T, K>(items: &[T], key: impl Fn(&T) -> K) -> BTreeMap<String, usize>
where
    K: ToString,
{
    items.iter().fold(BTreeMap::new(), |mut groups, item| {
        *groups.entry(key(item).to_string()).or_insert(0) += 1;
        groups
    })
}

pub fn sum<T>(items: &[T], value: impl Fn(&T) -> f64) -> f64 {
    items.iter().map(value).sum()
}

/// Arithmetic mean, 0.0 for an empty input.
pub fn mean<T>(items: &[T], value: impl Fn(&T) -> f64) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    sum(items, value) / items.len() as f64
}

/// Mean number of accounts plus credits held per customer, 0.0 with no customers.
pub fn average_products_per_customer(
    customers: &[CustomerRecord],
    accounts: &[AccountSnapshot],
    credits: &[CreditSnapshot],
) -> f64 {
    let mut products: HashMap<&str, usize> = HashMap::new();
    let owners = accounts
        .iter()
        .map(|a| a.customer_id.as_str())
        .chain(credits.iter().map(|c| c.customer_id.as_str()));
    for owner in owners {
        *products.entry(owner).or_insert(0) += 1;
    }

    mean(customers, |customer| {
        products.get(customer.id.as_str()).copied().unwrap_or(0) as f64
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMetrics {
    pub total_accounts: usize,
    pub by_type: BTreeMap<String, usize>,
    pub average_balance: f64,
    /// Accounts opened inside the report range.
    pub new_accounts: usize,
}

impl AccountMetrics {
    pub fn build(accounts: &[AccountSnapshot], range: &DateRange) -> Self {
        let new_accounts = accounts
            .iter()
            .filter_map(|a| a.created_at)
            .filter(|created| range.contains(created.date()))
            .count();

        AccountMetrics {
            total_accounts: accounts.len(),
            by_type: count_by(accounts, |a| a.account_type.clone()),
            average_balance: mean(accounts, AccountSnapshot::balance),
            new_accounts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditMetrics {
    pub total_credits: usize,
    pub by_type: BTreeMap<String, usize>,
    pub total_outstanding: f64,
    pub average_interest_rate: f64,
}

impl CreditMetrics {
    pub fn build(credits: &[CreditSnapshot]) -> Self {
        CreditMetrics {
            total_credits: credits.len(),
            by_type: count_by(credits, |c| c.credit_type.clone()),
            total_outstanding: sum(credits, |c| c.outstanding_balance.unwrap_or(0.0)),
            average_interest_rate: mean(credits, |c| c.interest_rate.unwrap_or(0.0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMetrics {
    pub total_customers: usize,
    pub by_type: BTreeMap<String, usize>,
    pub average_products_per_customer: f64,
}

impl CustomerMetrics {
    pub fn build(
        customers: &[CustomerRecord],
        accounts: &[AccountSnapshot],
        credits: &[CreditSnapshot],
    ) -> Self {
        CustomerMetrics {
            total_customers: customers.len(),
            by_type: count_by(customers, |c| c.customer_type),
            average_products_per_customer: average_products_per_customer(
                customers, accounts, credits,
            ),
        }
    }
}
