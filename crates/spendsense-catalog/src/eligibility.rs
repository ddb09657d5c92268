//! Offer eligibility predicates (spec §4.4).
//!
//! An eligibility predicate is a plain conjunction of range/set checks over
//! a customer's context, evaluated at selection time by the guardrail
//! stack's eligibility filter (C6). It is data, not code, so new offers can
//! ship without a recompile.

use serde::{Deserialize, Serialize};

use rust_decimal::Decimal;

/// The subset of a customer's context an offer's eligibility predicate may
/// examine (spec §4.4). Built by the pipeline orchestrator from the
/// signals/persona outputs just before catalog selection.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerContext {
    pub income_estimate: Option<Decimal>,
    pub credit_score_band: Option<CreditScoreBand>,
    pub existing_products: Vec<String>,
    pub utilization: Option<Decimal>,
    pub state_of_residence: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditScoreBand {
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

/// A decimal range, either bound optional. `None` on either side means
/// unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DecimalRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl DecimalRange {
    fn contains(&self, value: Decimal) -> bool {
        self.min.map(|m| value >= m).unwrap_or(true) && self.max.map(|m| value <= m).unwrap_or(true)
    }
}

/// One offer's eligibility predicate (spec §4.4): every populated field is
/// ANDed together; an absent field imposes no constraint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EligibilityPredicate {
    pub income_estimate: Option<DecimalRange>,
    pub credit_score_band_min: Option<CreditScoreBand>,
    pub excludes_existing_products: Vec<String>,
    pub utilization: Option<DecimalRange>,
    pub allowed_states: Option<Vec<String>>,
}

impl EligibilityPredicate {
    /// Evaluate this predicate against a customer's context. Any field the
    /// predicate constrains but the context lacks a value for fails closed
    /// (the offer is not shown) rather than vacuously passing.
    pub fn evaluate(&self, ctx: &CustomerContext) -> bool {
        if let Some(range) = &self.income_estimate {
            match ctx.income_estimate {
                Some(v) => {
                    if !range.contains(v) {
                        return false;
                    }
                }
                None => return false,
            }
        }

        if let Some(min_band) = self.credit_score_band_min {
            match ctx.credit_score_band {
                Some(band) => {
                    if band < min_band {
                        return false;
                    }
                }
                None => return false,
            }
        }

        if !self.excludes_existing_products.is_empty()
            && ctx
                .existing_products
                .iter()
                .any(|p| self.excludes_existing_products.contains(p))
        {
            return false;
        }

        if let Some(range) = &self.utilization {
            match ctx.utilization {
                Some(v) => {
                    if !range.contains(v) {
                        return false;
                    }
                }
                None => return false,
            }
        }

        if let Some(allowed) = &self.allowed_states {
            match &ctx.state_of_residence {
                Some(state) => {
                    if !allowed.contains(state) {
                        return false;
                    }
                }
                None => return false,
            }
        }

        true
    }
}
