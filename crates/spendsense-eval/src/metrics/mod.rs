//! Individual C9 metrics (spec §4.9). Each submodule is a pure function of
//! a slice of `DecisionTrace`s (plus, where relevant, externally measured
//! latencies) so the harness can compose them without re-reading the
//! trace store per metric.

pub mod behaviors_detected;
pub mod eligibility_rejection;
pub mod latency;
pub mod offer_parity;
pub mod persona_coverage;
pub mod rationale_coverage;
pub mod trace_coverage;

pub use behaviors_detected::BehaviorsDetected;
pub use eligibility_rejection::EligibilityRejectionRate;
pub use latency::LatencyDistribution;
pub use offer_parity::OfferParity;
pub use persona_coverage::PersonaCoverage;
pub use rationale_coverage::RationaleCoverage;
pub use trace_coverage::TraceCoverage;
