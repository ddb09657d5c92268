//! The built-in default catalog content (spec §4.4). Every persona is
//! guaranteed 3-5 education entries and 1-3 offers; none of the bundled
//! offers carry a blacklisted harm class, so `Catalog::default_catalog`
//! never strips anything -- the stripping path only fires for
//! operator-supplied catalog files.

use rust_decimal::Decimal;
use spendsense_core::PersonaType;

use crate::catalog::{Catalog, Difficulty, EducationItem, OfferItem};
use crate::eligibility::{DecimalRange, EligibilityPredicate};

fn education(id: &str, persona: PersonaType, title: &str, body_template: &str, difficulty: Difficulty, est_minutes: u32, tags: &[&str]) -> EducationItem {
    EducationItem {
        id: id.to_string(),
        persona,
        title: title.to_string(),
        body_template: body_template.to_string(),
        difficulty,
        est_minutes,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn offer(
    id: &str,
    persona: PersonaType,
    title: &str,
    body_template: &str,
    difficulty: Difficulty,
    est_minutes: u32,
    tags: &[&str],
    eligibility: EligibilityPredicate,
) -> OfferItem {
    OfferItem {
        id: id.to_string(),
        persona,
        title: title.to_string(),
        body_template: body_template.to_string(),
        difficulty,
        est_minutes,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        eligibility,
        harm_class: None,
    }
}

pub(crate) fn build_default_catalog() -> Catalog {
    use Difficulty::*;
    use PersonaType::*;

    let education = vec![
        education(
            "edu_high_util_01",
            HighUtilization,
            "Why utilization moves your score",
            "Your aggregate utilization is {credit.aggregate_utilization}. Balances above 30% of a limit \
             weigh heavily on your credit score, independent of whether you pay in full.",
            Beginner,
            4,
            &["credit", "score"],
        ),
        education(
            "edu_high_util_02",
            HighUtilization,
            "The avalanche payoff method",
            "Paying the highest-APR card first, while holding minimums elsewhere, minimizes total interest \
             paid across {credit.per_card.len} cards.",
            Intermediate,
            6,
            &["credit", "payoff"],
        ),
        education(
            "edu_high_util_03",
            HighUtilization,
            "Minimum payments and revolving interest",
            "Paying only the minimum on a balance with interest means most of each payment covers interest, \
             not principal. Your monthly interest estimate is {credit.total_monthly_interest}.",
            Beginner,
            5,
            &["credit", "interest"],
        ),
        education(
            "edu_high_util_04",
            HighUtilization,
            "Requesting a limit increase responsibly",
            "A limit increase can lower utilization without new spending, but issuers often run a hard \
             inquiry; weigh that against the score benefit.",
            Intermediate,
            5,
            &["credit"],
        ),
        education(
            "edu_fragility_01",
            FinancialFragility,
            "Building a one-week cash buffer",
            "A buffer as small as one week of expenses prevents most overdraft events. Your current balance \
             signals suggest this is the highest-leverage first step.",
            Beginner,
            4,
            &["fragility", "buffer"],
        ),
        education(
            "edu_fragility_02",
            FinancialFragility,
            "How overdraft fees compound",
            "A single overdraft can trigger a cascade of declined transactions and repeat fees within days; \
             understanding your bank's posting order helps you avoid it.",
            Beginner,
            5,
            &["fragility", "fees"],
        ),
        education(
            "edu_fragility_03",
            FinancialFragility,
            "Low-balance alerts",
            "Setting an alert a few days before your balance trends low gives you time to act before a fee \
             posts.",
            Beginner,
            3,
            &["fragility", "alerts"],
        ),
        education(
            "edu_variable_income_01",
            VariableIncomeBudgeter,
            "Budgeting on irregular pay",
            "Your median gap between pay events is {income.median_gap_days} days. Budgeting against your \
             lowest expected month, not your average, avoids shortfalls.",
            Intermediate,
            7,
            &["income", "budgeting"],
        ),
        education(
            "edu_variable_income_02",
            VariableIncomeBudgeter,
            "Smoothing income with a holding account",
            "Routing all income into a holding account and paying yourself a fixed 'salary' from it turns \
             variable income into a predictable cash flow.",
            Intermediate,
            6,
            &["income", "smoothing"],
        ),
        education(
            "edu_variable_income_03",
            VariableIncomeBudgeter,
            "Sizing your buffer to your income variability",
            "Your income variability (CV) is {income.variability_cv}; higher variability calls for a larger \
             buffer in months of expenses, not a fixed dollar figure.",
            Advanced,
            8,
            &["income", "buffer"],
        ),
        education(
            "edu_subscription_01",
            SubscriptionHeavy,
            "Auditing recurring charges",
            "You have {subscriptions.recurring.len} recurring charges totaling {subscriptions.monthly_recurring_spend} \
             per month -- about {subscriptions.share_of_total} of spending.",
            Beginner,
            5,
            &["subscriptions", "audit"],
        ),
        education(
            "edu_subscription_02",
            SubscriptionHeavy,
            "Annual vs monthly billing",
            "Switching a kept subscription from monthly to annual billing is often a double-digit percentage \
             discount for the same service.",
            Beginner,
            3,
            &["subscriptions"],
        ),
        education(
            "edu_subscription_03",
            SubscriptionHeavy,
            "Canceling without losing access mid-cycle",
            "Most subscriptions remain active through the end of a paid period even after cancellation, so \
             canceling early rarely wastes money.",
            Beginner,
            3,
            &["subscriptions"],
        ),
        education(
            "edu_savings_01",
            SavingsBuilder,
            "Why APY compounding matters",
            "Your savings growth rate this window is {savings.growth_rate}. Moving idle cash to a \
             higher-yield account compounds that growth without additional deposits.",
            Beginner,
            4,
            &["savings", "apy"],
        ),
        education(
            "edu_savings_02",
            SavingsBuilder,
            "Automating transfers on payday",
            "Scheduling a transfer for the day after each paycheck removes the decision point where saving \
             most often gets skipped.",
            Beginner,
            4,
            &["savings", "automation"],
        ),
        education(
            "edu_savings_03",
            SavingsBuilder,
            "Sizing your emergency fund",
            "Your current balance covers {savings.emergency_months_coverage} months of expenses; most \
             guidance targets three to six months.",
            Intermediate,
            6,
            &["savings", "emergency-fund"],
        ),
    ];

    let offers = vec![
        offer(
            "off_high_util_01",
            HighUtilization,
            "0% intro APR balance transfer",
            "A balance transfer at 0% intro APR for {eligibility.utilization} utilization can pause interest \
             accrual while you pay down principal.",
            Intermediate,
            10,
            &["credit", "balance-transfer"],
            EligibilityPredicate {
                utilization: Some(DecimalRange {
                    min: Some(Decimal::new(30, 2)),
                    max: None,
                }),
                credit_score_band_min: Some(crate::eligibility::CreditScoreBand::Fair),
                ..Default::default()
            },
        ),
        offer(
            "off_high_util_02",
            HighUtilization,
            "Nonprofit credit counseling referral",
            "A certified nonprofit credit counselor can negotiate rates and build a payoff plan at no cost \
             to you.",
            Beginner,
            5,
            &["credit", "counseling"],
            EligibilityPredicate::default(),
        ),
        offer(
            "off_fragility_01",
            FinancialFragility,
            "Fee-free checking with overdraft buffer",
            "A checking account with a built-in overdraft buffer and no fee avoids the exact fees your \
             recent activity shows.",
            Beginner,
            6,
            &["fragility", "checking"],
            EligibilityPredicate::default(),
        ),
        offer(
            "off_variable_income_01",
            VariableIncomeBudgeter,
            "Automatic paycheck-smoothing savings account",
            "An account that automatically holds back a share of each deposit and releases a fixed amount \
             on a schedule you set.",
            Intermediate,
            6,
            &["income", "smoothing"],
            EligibilityPredicate::default(),
        ),
        offer(
            "off_subscription_01",
            SubscriptionHeavy,
            "Subscription management service",
            "A service that surfaces every recurring charge across your accounts and cancels unwanted ones \
             on your behalf.",
            Beginner,
            5,
            &["subscriptions"],
            EligibilityPredicate::default(),
        ),
        offer(
            "off_savings_01",
            SavingsBuilder,
            "High-yield savings account",
            "A savings account paying a materially higher APY than a typical checking-linked savings \
             account, with no minimum balance.",
            Beginner,
            5,
            &["savings", "high-yield"],
            EligibilityPredicate::default(),
        ),
    ];

    Catalog { education, offers }
}
