//! The trace store contract (spec §4.8): append-only, readable by id,
//! listable by customer in reverse chronological order, durable across
//! restart. `FileTraceStore` is the file-backed reference implementation;
//! a real deployment may swap in a database-backed one behind this trait.

use spendsense_core::{DecisionTrace, OperatorAction, SpendSenseResult};

pub trait TraceStore: Send + Sync {
    /// Allocate a trace id for `trace.customer_id`/`at`, persist the
    /// record, flush, and return the id. Any `trace_id` already set on the
    /// input is overwritten (spec §4.8 step 1-4).
    fn write(&self, trace: DecisionTrace) -> SpendSenseResult<String>;

    fn read(&self, trace_id: &str) -> SpendSenseResult<DecisionTrace>;

    /// Reverse-chronological by `timestamp`.
    fn list_by_customer(&self, customer_id: &str) -> SpendSenseResult<Vec<DecisionTrace>>;

    /// Persist an operator override as a new trace record referencing the
    /// original via `operator_action.trace_id` (spec §4.8). The original
    /// trace is never touched. Fails with `UnknownTrace` if the referenced
    /// trace does not exist.
    fn record_override(&self, override_trace: DecisionTrace) -> SpendSenseResult<String>;

    fn overrides_for(&self, trace_id: &str) -> SpendSenseResult<Vec<OperatorAction>>;
}
