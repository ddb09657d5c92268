//! Persona types (spec §3, §4.3).
//!
//! Per the design notes (§9), a persona candidate references its
//! triggering signals by path rather than embedding a copy of the signal
//! struct, so there is no shared mutable graph between an assignment and
//! the bundle it was computed from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaType {
    HighUtilization,
    VariableIncomeBudgeter,
    SubscriptionHeavy,
    SavingsBuilder,
    FinancialFragility,
}

impl PersonaType {
    /// Fixed prioritization order used to pick the primary persona among
    /// all matching candidates (spec §4.3).
    pub fn priority_order() -> [PersonaType; 5] {
        [
            Self::HighUtilization,
            Self::FinancialFragility,
            Self::VariableIncomeBudgeter,
            Self::SubscriptionHeavy,
            Self::SavingsBuilder,
        ]
    }

    pub fn priority_rank(self) -> usize {
        Self::priority_order()
            .iter()
            .position(|p| *p == self)
            .expect("priority_order is exhaustive")
    }
}

/// A pointer into a `SignalBundle` that triggered a persona match, instead
/// of embedding the signal value directly (spec §9 "cyclic structures").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRef {
    /// Dotted field path within the `SignalBundle`, e.g.
    /// `credit.per_card[0].utilization`.
    pub path: String,
    /// A rendered snapshot of the value at classification time, stored
    /// alongside the path so the trace is self-sufficient (spec §4.8)
    /// without re-walking the bundle.
    pub value: String,
}

/// One candidate persona match with its confidence and triggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaCandidate {
    #[serde(rename = "type")]
    pub persona_type: PersonaType,
    pub confidence: f64,
    pub triggering_signals: Vec<SignalRef>,
}

/// The full classification result for one customer-window (spec §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaAssignment {
    pub customer_id: String,
    pub window_days: u32,
    pub primary: PersonaCandidate,
    pub secondary: Option<PersonaCandidate>,
    pub candidates: Vec<PersonaCandidate>,
    pub assigned_at: DateTime<Utc>,
    /// True when no rule matched and `primary` fell back to the default
    /// Savings Builder assignment (spec §4.3).
    pub default_assignment: bool,
}
