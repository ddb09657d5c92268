//! Latency distribution (spec §4.9, §5 "latency budget: <=5s at p99").

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatencyDistribution {
    pub sample_size: usize,
    pub mean_ms: f64,
    pub p50_ms: f64,
    pub p90_ms: f64,
    pub p99_ms: f64,
    pub max_ms: f64,
    /// Spec §5: end-to-end per customer must stay at or under this at p99.
    pub within_budget: bool,
}

const P99_BUDGET_MS: f64 = 5_000.0;

pub fn compute(latencies_ms: &[f64]) -> LatencyDistribution {
    if latencies_ms.is_empty() {
        return LatencyDistribution {
            sample_size: 0,
            mean_ms: 0.0,
            p50_ms: 0.0,
            p90_ms: 0.0,
            p99_ms: 0.0,
            max_ms: 0.0,
            within_budget: true,
        };
    }

    let mut sorted = latencies_ms.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let n = sorted.len();

    let percentile = |p: f64| -> f64 {
        let idx = ((n as f64 - 1.0) * p).round() as usize;
        sorted[idx.min(n - 1)]
    };

    let mean_ms = sorted.iter().sum::<f64>() / n as f64;
    let p50_ms = percentile(0.50);
    let p90_ms = percentile(0.90);
    let p99_ms = percentile(0.99);
    let max_ms = sorted[n - 1];

    LatencyDistribution {
        sample_size: n,
        mean_ms,
        p50_ms,
        p90_ms,
        p99_ms,
        max_ms,
        within_budget: p99_ms <= P99_BUDGET_MS,
    }
}
