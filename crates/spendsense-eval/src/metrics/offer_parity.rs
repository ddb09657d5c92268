//! Offer-distribution parity across persona cohorts (spec §4.9): a simple
//! chi-square disparity score, informational only -- it is not a pass/fail
//! gate, just a signal that one persona cohort is steered toward a
//! narrower or different slice of the catalog than another.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use spendsense_core::{DecisionTrace, PersonaType};
use statrs::distribution::{ChiSquared, ContinuousCDF};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferParity {
    pub chi_square_stat: f64,
    pub degrees_of_freedom: usize,
    /// `None` when the contingency table is degenerate (fewer than 2
    /// cohorts or offers observed) and the test does not apply.
    pub p_value: Option<f64>,
    pub personas_observed: usize,
    pub offers_observed: usize,
}

/// Builds a persona x offer-id contingency table from final offer
/// selections and computes Pearson's chi-square statistic for
/// independence.
pub fn compute(traces: &[DecisionTrace]) -> OfferParity {
    let mut counts: HashMap<PersonaType, HashMap<String, u64>> = HashMap::new();
    let mut offer_ids: BTreeSet<String> = BTreeSet::new();

    for trace in traces {
        let persona = trace.persona_assignments.d180.primary.persona_type;
        for offer in &trace.final_offers {
            *counts
                .entry(persona)
                .or_default()
                .entry(offer.id.clone())
                .or_insert(0) += 1;
            offer_ids.insert(offer.id.clone());
        }
    }

    let personas_observed = counts.len();
    let offers_observed = offer_ids.len();

    if personas_observed < 2 || offers_observed < 2 {
        return OfferParity {
            chi_square_stat: 0.0,
            degrees_of_freedom: 0,
            p_value: None,
            personas_observed,
            offers_observed,
        };
    }

    let offer_ids: Vec<String> = offer_ids.into_iter().collect();
    let row_totals: Vec<f64> = counts
        .values()
        .map(|row| row.values().sum::<u64>() as f64)
        .collect();
    let col_totals: Vec<f64> = offer_ids
        .iter()
        .map(|id| counts.values().map(|row| *row.get(id).unwrap_or(&0)).sum::<u64>() as f64)
        .collect();
    let grand_total: f64 = row_totals.iter().sum();

    if grand_total == 0.0 {
        return OfferParity {
            chi_square_stat: 0.0,
            degrees_of_freedom: 0,
            p_value: None,
            personas_observed,
            offers_observed,
        };
    }

    let mut chi_square_stat = 0.0;
    for (row, row_total) in counts.values().zip(row_totals.iter()) {
        for (col_idx, offer_id) in offer_ids.iter().enumerate() {
            let observed = *row.get(offer_id).unwrap_or(&0) as f64;
            let expected = row_total * col_totals[col_idx] / grand_total;
            if expected > 0.0 {
                chi_square_stat += (observed - expected).powi(2) / expected;
            }
        }
    }

    let degrees_of_freedom = (personas_observed - 1) * (offers_observed - 1);
    let p_value = if degrees_of_freedom == 0 {
        None
    } else {
        ChiSquared::new(degrees_of_freedom as f64)
            .ok()
            .map(|dist| 1.0 - dist.cdf(chi_square_stat))
    };

    OfferParity {
        chi_square_stat,
        degrees_of_freedom,
        p_value,
        personas_observed,
        offers_observed,
    }
}
