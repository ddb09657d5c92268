//! Credit utilization detector (spec §4.2).

use rust_decimal::Decimal;
use spendsense_core::{Account, AccountType, AprType, CardSignals, CreditCardLiability, CreditSignals, Transaction};

const UTILIZATION_TIERS: [Decimal; 3] = [Decimal::from_parts(30, 0, 0, false, 2), Decimal::from_parts(50, 0, 0, false, 2), Decimal::from_parts(80, 0, 0, false, 2)];
const MIN_ONLY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 0);

/// Detect per-card and aggregate credit signals (spec §4.2).
pub fn detect_credit(
    accounts: &[Account],
    liabilities: &[CreditCardLiability],
    window_transactions: &[Transaction],
) -> CreditSignals {
    let credit_accounts: Vec<&Account> = accounts
        .iter()
        .filter(|a| a.account_type == AccountType::Credit)
        .collect();

    let mut per_card = Vec::with_capacity(credit_accounts.len());
    let mut sum_current = Decimal::ZERO;
    let mut sum_limit = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut any_interest_known = false;

    for account in &credit_accounts {
        let liability = liabilities.iter().find(|l| l.account_id == account.account_id);
        let card_txns: Vec<&Transaction> = window_transactions
            .iter()
            .filter(|t| t.account_id == account.account_id)
            .collect();

        let utilization = account.utilization();
        let over_30 = utilization.map(|u| u >= UTILIZATION_TIERS[0]).unwrap_or(false);
        let over_50 = utilization.map(|u| u >= UTILIZATION_TIERS[1]).unwrap_or(false);
        let over_80 = utilization.map(|u| u >= UTILIZATION_TIERS[2]).unwrap_or(false);

        let min_only = liability
            .map(|l| is_min_payment_only(&card_txns, l.minimum_payment_amount))
            .unwrap_or(false);

        let has_interest = card_txns
            .iter()
            .any(|t| t.personal_finance_category.is_interest_charge());

        let is_overdue = liability.map(|l| l.is_overdue).unwrap_or(false);

        let monthly_interest_estimate = liability
            .and_then(|l| l.purchase_apr())
            .map(|apr| account.balances.current * apr / Decimal::from(100) / Decimal::from(12));

        if let Some(interest) = monthly_interest_estimate {
            total_interest += interest;
            any_interest_known = true;
        }

        if let Some(limit) = account.balances.limit {
            sum_current += account.balances.current;
            sum_limit += limit;
        }

        per_card.push(CardSignals {
            account_id: account.account_id.clone(),
            utilization,
            over_30,
            over_50,
            over_80,
            min_only,
            has_interest,
            is_overdue,
            monthly_interest_estimate,
        });
    }

    let aggregate_utilization = if sum_limit > Decimal::ZERO {
        Some(sum_current / sum_limit)
    } else {
        None
    };

    let total_monthly_interest = if any_interest_known {
        Some(total_interest)
    } else {
        None
    };

    CreditSignals {
        per_card,
        aggregate_utilization,
        total_monthly_interest,
    }
}

/// True if every payment transaction observed on this card in the window
/// equals the card's minimum payment, within $1 (spec §4.2). A "payment"
/// is an inflow (credit) to the credit account, i.e. a negative amount.
fn is_min_payment_only(card_txns: &[&Transaction], minimum_payment_amount: Decimal) -> bool {
    let payments: Vec<&&Transaction> = card_txns.iter().filter(|t| t.is_inflow()).collect();
    if payments.is_empty() {
        return false;
    }
    payments
        .iter()
        .all(|t| (t.abs_amount() - minimum_payment_amount).abs() <= MIN_ONLY_TOLERANCE)
}

#[cfg(test)]
fn card(current: Decimal, limit: Decimal) -> Account {
    use spendsense_core::{AccountSubtype, Balances, HolderCategory};
    Account::new(
        "card_1",
        "cust_1",
        AccountType::Credit,
        AccountSubtype::CreditCard,
        Balances {
            available: None,
            current,
            limit: Some(limit),
        },
        "USD",
        HolderCategory::Consumer,
    )
    .unwrap()
}

#[cfg(test)]
fn liability(min_payment: Decimal, apr: Decimal) -> CreditCardLiability {
    use spendsense_core::Apr;
    CreditCardLiability {
        account_id: "card_1".into(),
        aprs: vec![Apr {
            apr_type: AprType::Purchase,
            percentage: apr,
        }],
        minimum_payment_amount: min_payment,
        last_payment_amount: None,
        is_overdue: false,
        next_payment_due_date: None,
        last_statement_balance: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn scenario_high_utilization_matches_spec_example() {
        let accounts = vec![card(dec!(3400), dec!(5000)), card(dec!(400), dec!(2000))];
        let liabilities = vec![liability(dec!(0), dec!(22)), liability(dec!(0), dec!(18))];
        let signals = detect_credit(&accounts, &liabilities, &[]);
        let aggregate = signals.aggregate_utilization.unwrap();
        assert_eq!(aggregate.round_dp(3), dec!(0.543));
        assert!(signals.per_card[0].over_50);
    }

    #[test]
    fn utilization_of_fifty_percent_triggers_over_30_and_over_50_not_80() {
        let accounts = vec![card(dec!(500), dec!(1000))];
        let signals = detect_credit(&accounts, &[], &[]);
        assert!(signals.per_card[0].over_30);
        assert!(signals.per_card[0].over_50);
        assert!(!signals.per_card[0].over_80);
    }

    #[test]
    fn monthly_interest_estimate_matches_spec_example() {
        let accounts = vec![card(dec!(500), dec!(1000))];
        let liabilities = vec![liability(dec!(25), dec!(24))];
        let signals = detect_credit(&accounts, &liabilities, &[]);
        let estimate = signals.per_card[0].monthly_interest_estimate.unwrap();
        assert_eq!(estimate.round_dp(2), dec!(10.00));
    }
}
