//! Running counters over every processed query.

use std::sync::{Mutex, PoisonError};

use lode_core::enums::ResponseStatus;
use lode_core::responses::PipelineMetrics;

#[derive(Debug, Default)]
pub struct Metrics {
    inner: Mutex<PipelineMetrics>,
}

impl Metrics {
    pub fn snapshot(&self) -> PipelineMetrics {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Fold one finished query into the counters. Averages cover successful
    /// queries only.
    #[allow(clippy::cast_precision_loss)]
    pub fn record(&self, status: ResponseStatus, cache_hit: bool, elapsed_ms: u64, confidence: f64) {
        let mut m = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        m.total_queries += 1;
        if cache_hit {
            m.cache_hits += 1;
        }
        match status {
            ResponseStatus::Success => {
                m.successful_queries += 1;
                let n = m.successful_queries as f64;
                m.average_response_ms += (elapsed_ms as f64 - m.average_response_ms) / n;
                m.average_confidence += (confidence - m.average_confidence) / n;
            }
            ResponseStatus::Error => m.failed_queries += 1,
            ResponseStatus::NoResults | ResponseStatus::LowConfidence => {}
        }
        m.cache_hit_rate = m.cache_hits as f64 / m.total_queries as f64;
    }
}
