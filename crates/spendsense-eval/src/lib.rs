//! # spendsense-eval
//!
//! The evaluation harness (C9, spec §4.9). Reads decision traces out of a
//! `spendsense_trace::TraceStore` and computes coverage, explainability,
//! latency, and fairness metrics, emitting both a machine-readable report
//! and a short human summary.

mod harness;
pub mod metrics;
pub mod report;

pub use harness::EvaluationHarness;
pub use report::{EvaluationReport, HumanSummaryGenerator, JsonReportGenerator, ReportGenerator, ReportMetadata};
