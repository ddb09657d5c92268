//! # spendsense-catalog
//!
//! Static content/offer catalogs and the pipeline configuration schema (C4).
//! Both are process-wide immutable state: loaded and validated once at
//! startup, then passed by reference through the rest of the pipeline.

mod defaults;

pub mod catalog;
pub mod config;
pub mod eligibility;
pub mod validation;

pub use catalog::{Catalog, Difficulty, EducationItem, OfferItem};
pub use config::{CatalogSource, DetectorThresholds, LlmConfig, SelectionCaps, SpendSenseConfig};
pub use eligibility::{CreditScoreBand, CustomerContext, DecimalRange, EligibilityPredicate};
pub use validation::{validate_catalog, validate_config};
