//! Statistics for conversion operations

use crate::conversion::policy::Exclusion;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Counters collected while converting one root value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionMetadata {
    /// Fields written to an output map
    pub fields_emitted: usize,
    /// Fields excluded by a strategy or a disabled directive
    pub fields_skipped: usize,
    /// Fields excluded because their name is redacted
    pub fields_redacted: usize,
    /// Collection elements converted
    pub elements_converted: usize,
    /// Lazy resources loaded during the conversion
    pub resources_materialized: usize,
    /// Deepest recursion level reached (root is 0)
    pub max_depth_reached: usize,
    /// Number of root conversions these counters cover
    pub operation_count: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

impl ConversionMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_exclusion(&mut self, exclusion: Exclusion) {
        match exclusion {
            Exclusion::Redacted => self.fields_redacted += 1,
            _ => self.fields_skipped += 1,
        }
    }

    pub(crate) fn record_depth(&mut self, depth: usize) {
        self.max_depth_reached = self.max_depth_reached.max(depth);
    }

    pub(crate) fn finish(&mut self, elapsed: Duration) {
        self.operation_count = 1;
        self.processing_time_ms = elapsed.as_millis() as u64;
    }

    /// Combine statistics from multiple operations
    pub fn combine(&mut self, other: &Self) {
        self.fields_emitted += other.fields_emitted;
        self.fields_skipped += other.fields_skipped;
        self.fields_redacted += other.fields_redacted;
        self.elements_converted += other.elements_converted;
        self.resources_materialized += other.resources_materialized;
        self.max_depth_reached = self.max_depth_reached.max(other.max_depth_reached);
        self.operation_count += other.operation_count;
        self.processing_time_ms += other.processing_time_ms;
    }

    /// Average time per operation
    pub fn avg_time_per_operation_ms(&self) -> f32 {
        if self.operation_count > 0 {
            self.processing_time_ms as f32 / self.operation_count as f32
        } else {
            0.0
        }
    }

    /// Get a formatted summary
    pub fn summary(&self) -> String {
        format!(
            "Converted {} value(s) in {}ms - {} fields emitted, {} skipped, {} redacted, {} elements, {} resources loaded",
            self.operation_count,
            self.processing_time_ms,
            self.fields_emitted,
            self.fields_skipped,
            self.fields_redacted,
            self.elements_converted,
            self.resources_materialized
        )
    }

    /// Export to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
