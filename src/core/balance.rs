//! Net balance across a customer's active products.

use crate::core::model::{AccountSnapshot, CreditSnapshot};

/// Signed balance a credit contributes to net worth.
///
/// Cards count the drawn part of the limit; every other credit counts its
/// outstanding balance as a liability. Missing figures read as zero.
pub fn credit_current_balance(credit: &CreditSnapshot) -> f64 {
    if credit.is_credit_card() {
        credit.credit_limit.unwrap_or(0.0) - credit.available_credit.unwrap_or(0.0)
    } else {
        -credit.outstanding_balance.unwrap_or(0.0)
    }
}

/// Sum of active account balances plus the signed balance of active credits.
pub fn net_balance(accounts: &[AccountSnapshot], credits: &[CreditSnapshot]) -> f64 {
    let account_balance: f64 = accounts
        .iter()
        .filter(|account| account.is_active())
        .map(AccountSnapshot::balance)
        .sum();

    let credit_balance: f64 = credits
        .iter()
        .filter(|credit| credit.is_active())
        .map(credit_current_balance)
        .sum();

    account_balance + credit_balance
}
