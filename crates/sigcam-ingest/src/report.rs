//! Batch-level counters

use std::collections::BTreeMap;

use sigcam_domain::ChainReport;

use crate::filter::Rejection;

/// Counters collected while importing one batch
///
/// No single bad record aborts a batch; every outcome lands here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Data rows read
    pub rows_read: usize,

    /// Rows that passed the filter and became statements
    pub accepted: usize,

    /// Rows rejected by the filter, per reason
    pub filtered: BTreeMap<String, usize>,

    /// Rows referencing a complex or family missing from the reference tables
    pub skipped_unresolved: usize,

    /// Accepted rows merged into an existing equal statement
    pub duplicates_merged: usize,

    /// Binding statements dropped in favour of kinase statements
    pub precedence_dropped: usize,

    /// Statements in the final set
    pub statements: usize,

    /// Graph emission counters
    pub chain: ChainReport,
}

impl BatchReport {
    /// Create new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a row read from the input
    pub fn record_row(&mut self) {
        self.rows_read += 1;
    }

    /// Record a filter rejection
    pub fn record_rejection(&mut self, rejection: &Rejection) {
        *self.filtered.entry(rejection.reason().to_string()).or_insert(0) += 1;
    }

    /// Record a row skipped for an unresolved grouping
    pub fn record_unresolved(&mut self) {
        self.skipped_unresolved += 1;
    }

    /// Record an accepted row
    pub fn record_accepted(&mut self, merged: bool) {
        self.accepted += 1;
        if merged {
            self.duplicates_merged += 1;
        }
    }

    /// Total rows rejected by the filter
    pub fn total_filtered(&self) -> usize {
        self.filtered.values().sum()
    }

    /// Total rows that did not become statements
    pub fn total_skipped(&self) -> usize {
        self.total_filtered() + self.skipped_unresolved
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Import Summary".to_string(),
            "==============".to_string(),
            format!("Rows read: {}", self.rows_read),
            format!("Accepted: {}", self.accepted),
            format!("Skipped (unresolved grouping): {}", self.skipped_unresolved),
            format!("Duplicates merged: {}", self.duplicates_merged),
            format!("Binding dropped for kinase: {}", self.precedence_dropped),
            format!("Statements: {}", self.statements),
            String::new(),
        ];

        if !self.filtered.is_empty() {
            lines.push("Filtered by reason:".to_string());
            for (reason, count) in &self.filtered {
                lines.push(format!("  {}: {}", reason, count));
            }
            lines.push(format!("  Total: {}", self.total_filtered()));
            lines.push(String::new());
        }

        lines.push("Graph:".to_string());
        lines.push(format!("  enabled by: {}", self.chain.enabled_by_edges));
        lines.push(format!("  participants: {}", self.chain.participant_edges));
        lines.push(format!("  regulation: {}", self.chain.regulatory_edges));
        lines.push(format!("  intermediary processes: {}", self.chain.intermediary_processes));
        lines.push(format!("  small molecule catalysis: {}", self.chain.small_molecule_catalysis));
        lines.push(format!("  dead ends: {}", self.chain.dead_ends));
        lines.push(format!("  without relation: {}", self.chain.without_relation));

        lines.join("\n")
    }
}
