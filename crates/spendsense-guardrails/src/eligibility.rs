//! Layer 2: eligibility filter (spec §4.6).

use spendsense_catalog::CustomerContext;

use crate::candidate::Candidate;

/// `Ok(())` if the candidate passes; `Err(reason)` with a `ineligible:<reason>`
/// style code otherwise. Education items carry no predicate and always pass.
pub fn check(candidate: &Candidate, ctx: &CustomerContext) -> Result<(), String> {
    match &candidate.eligibility {
        None => Ok(()),
        Some(predicate) => {
            if predicate.evaluate(ctx) {
                Ok(())
            } else {
                Err(format!("ineligible:{}", candidate.item_ref.id))
            }
        }
    }
}
