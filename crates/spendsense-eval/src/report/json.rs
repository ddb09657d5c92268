//! Machine-readable report generator (spec §4.9): key/value JSON.

use spendsense_core::SpendSenseResult;

use super::{EvaluationReport, ReportGenerator};

pub struct JsonReportGenerator {
    pretty: bool,
}

impl JsonReportGenerator {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ReportGenerator for JsonReportGenerator {
    fn generate(&self, report: &EvaluationReport) -> SpendSenseResult<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }
}
