//! # spendsense-core
//!
//! Core domain models and the shared error taxonomy for the SpendSenseAI
//! decision pipeline: accounts, transactions, credit-card liabilities,
//! consent, derived signal bundles, persona assignments, and the
//! decision-trace record (spec §3).
//!
//! Downstream crates (`spendsense-query`, `spendsense-signals`,
//! `spendsense-persona`, `spendsense-catalog`, `spendsense-rationale`,
//! `spendsense-guardrails`, `spendsense-counterfactual`, `spendsense-trace`,
//! `spendsense-eval`, `spendsense-pipeline`) depend on this crate for types
//! but never for behavior -- every rule lives in the component that owns
//! it.

pub mod error;
pub mod model;
pub mod window;

pub use error::*;
pub use model::*;
pub use window::*;
