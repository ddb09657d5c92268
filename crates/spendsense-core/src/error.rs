//! Error taxonomy shared by every crate in the decision pipeline.
//!
//! A single enum is used end to end (teacher pattern: one `SynthError` for
//! the whole workspace) so that `spendsense-pipeline` can surface exactly
//! the variants named in spec §6/§7 without re-wrapping errors raised deep
//! in a detector or the trace store.

use thiserror::Error;

/// The error type returned by every fallible operation in the pipeline.
#[derive(Error, Debug)]
pub enum SpendSenseError {
    /// Consent is not `active` or does not cover the requested scope.
    /// The pipeline short-circuits rather than raising this to the caller
    /// as a failure (spec §6) -- it exists as a variant so internal
    /// plumbing has a uniform `Result` to return.
    #[error("consent missing or insufficient for this operation")]
    ConsentMissing,

    /// Customer has no consumer accounts to analyze.
    #[error("customer has no data to analyze")]
    NoData,

    /// A customer's accounts/transactions span more than one currency code.
    #[error("customer {customer_id} has accounts in multiple currencies: {currencies:?}")]
    MixedCurrency {
        customer_id: String,
        currencies: Vec<String>,
    },

    /// The caller cancelled an in-flight pipeline run.
    #[error("pipeline run cancelled")]
    Cancelled,

    /// Bad input: malformed schema, negative limits, future dates, etc.
    /// Raised at the Query Layer boundary; never silently sanitized.
    #[error("data integrity error: {0}")]
    DataIntegrity(String),

    /// The trace store failed to durably persist a decision trace.
    #[error("failed to write decision trace: {0}")]
    TraceWrite(String),

    /// An operator action referenced a trace id that does not exist.
    #[error("unknown trace id: {0}")]
    UnknownTrace(String),

    /// Catalog or configuration failed validation at load time.
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic validation failure not covered by a more specific variant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying I/O failure (trace store flush, catalog file read, ...).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpendSenseError {
    pub fn data_integrity(msg: impl Into<String>) -> Self {
        Self::DataIntegrity(msg.into())
    }

    pub fn trace_write(msg: impl Into<String>) -> Self {
        Self::TraceWrite(msg.into())
    }

    pub fn unknown_trace(trace_id: impl Into<String>) -> Self {
        Self::UnknownTrace(trace_id.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether customers should ever see this error directly. Per spec §7,
    /// customers never see raw errors; only the operator view does.
    pub fn is_operator_visible(&self) -> bool {
        !matches!(self, Self::ConsentMissing)
    }
}

/// Result alias used throughout the workspace.
pub type SpendSenseResult<T> = Result<T, SpendSenseError>;
