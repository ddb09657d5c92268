//! Fail-fast validation for `SpendSenseConfig` and `Catalog` (spec §4.4,
//! SPEC_FULL.md §10.4). Every entry point calls `validate_config` before
//! first use; a catalog that cannot satisfy the persona coverage guarantee
//! after harm-blacklist stripping fails the process rather than serving a
//! partial catalog.

use spendsense_core::{HarmClass, PersonaType, SpendSenseError, SpendSenseResult};

use crate::catalog::Catalog;
use crate::config::SpendSenseConfig;

pub fn validate_config(config: &SpendSenseConfig) -> SpendSenseResult<()> {
    validate_detector_thresholds(config)?;
    validate_persona_priority(config)?;
    validate_selection_caps(config)?;
    validate_llm(config)?;
    Ok(())
}

fn validate_rate(field_name: &str, value: f64) -> SpendSenseResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SpendSenseError::config(format!(
            "{field_name} must be in [0, 1], got {value}"
        )));
    }
    Ok(())
}

fn validate_detector_thresholds(config: &SpendSenseConfig) -> SpendSenseResult<()> {
    let thresholds = &config.detector_thresholds;
    validate_rate("detector_thresholds.subscription_amount_cv_cutoff", thresholds.subscription_amount_cv_cutoff)?;

    if thresholds.subscription_lookback_days == 0 {
        return Err(SpendSenseError::config(
            "detector_thresholds.subscription_lookback_days must be positive",
        ));
    }

    let tiers = thresholds.utilization_tiers;
    for t in tiers {
        validate_rate("detector_thresholds.utilization_tiers", t)?;
    }
    if !(tiers[0] < tiers[1] && tiers[1] < tiers[2]) {
        return Err(SpendSenseError::config(
            "detector_thresholds.utilization_tiers must be strictly ascending",
        ));
    }

    Ok(())
}

fn validate_persona_priority(config: &SpendSenseConfig) -> SpendSenseResult<()> {
    let expected: Vec<PersonaType> = PersonaType::priority_order().to_vec();
    if config.persona_priority.len() != expected.len() {
        return Err(SpendSenseError::config(format!(
            "persona_priority must list exactly {} personas, got {}",
            expected.len(),
            config.persona_priority.len()
        )));
    }
    for persona in &expected {
        if !config.persona_priority.contains(persona) {
            return Err(SpendSenseError::config(format!(
                "persona_priority is missing {persona:?}; it must be a permutation of all persona types"
            )));
        }
    }
    Ok(())
}

fn validate_selection_caps(config: &SpendSenseConfig) -> SpendSenseResult<()> {
    let caps = &config.selection_caps;
    if caps.min_education_items == 0 || caps.min_education_items > caps.max_education_items {
        return Err(SpendSenseError::config(
            "selection_caps education bounds must satisfy 0 < min <= max",
        ));
    }
    if caps.min_offer_items == 0 || caps.min_offer_items > caps.max_offer_items {
        return Err(SpendSenseError::config(
            "selection_caps offer bounds must satisfy 0 < min <= max",
        ));
    }
    Ok(())
}

fn validate_llm(config: &SpendSenseConfig) -> SpendSenseResult<()> {
    if config.llm.enabled && config.llm.timeout_ms == 0 {
        return Err(SpendSenseError::config("llm.timeout_ms must be positive when llm.enabled is true"));
    }
    Ok(())
}

/// Validate that the catalog still satisfies the persona coverage guarantee
/// (spec §4.4: "every persona has 3-5 education entries and 1-3 offer
/// entries") against the bounds in `config`, and that no blacklisted harm
/// class survived loading. The latter should be structurally impossible
/// after `Catalog::from_*_str`, but is re-checked here so a
/// directly-constructed `Catalog` (e.g. in a test) cannot bypass it.
pub fn validate_catalog(catalog: &Catalog, config: &SpendSenseConfig) -> SpendSenseResult<()> {
    let blacklist = HarmClass::blacklist();
    if let Some(offer) = catalog
        .offers
        .iter()
        .find(|o| o.harm_class.map(|c| blacklist.contains(&c)).unwrap_or(false))
    {
        return Err(SpendSenseError::config(format!(
            "catalog contains blacklisted offer {}: {:?}",
            offer.id, offer.harm_class
        )));
    }

    let caps = &config.selection_caps;
    for persona in PersonaType::priority_order() {
        let education_count = catalog.education_for(persona).len();
        if education_count < caps.min_education_items || education_count > caps.max_education_items {
            return Err(SpendSenseError::config(format!(
                "persona {persona:?} has {education_count} education entries, expected {}-{}",
                caps.min_education_items, caps.max_education_items
            )));
        }

        let offer_count = catalog.offers_for(persona).len();
        if offer_count < caps.min_offer_items || offer_count > caps.max_offer_items {
            return Err(SpendSenseError::config(format!(
                "persona {persona:?} has {offer_count} offer entries, expected {}-{}",
                caps.min_offer_items, caps.max_offer_items
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&SpendSenseConfig::default()).is_ok());
    }

    #[test]
    fn non_ascending_utilization_tiers_rejected() {
        let mut config = SpendSenseConfig::default();
        config.detector_thresholds.utilization_tiers = [0.50, 0.30, 0.80];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn incomplete_persona_priority_rejected() {
        let mut config = SpendSenseConfig::default();
        config.persona_priority = vec![PersonaType::HighUtilization];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn default_catalog_passes_validation() {
        let catalog = Catalog::default_catalog();
        let config = SpendSenseConfig::default();
        assert!(validate_catalog(&catalog, &config).is_ok());
    }

    #[test]
    fn catalog_missing_persona_coverage_rejected() {
        let mut catalog = Catalog::default_catalog();
        catalog.offers.retain(|o| o.persona != PersonaType::SavingsBuilder);
        let config = SpendSenseConfig::default();
        assert!(validate_catalog(&catalog, &config).is_err());
    }
}
