//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use sigcam_domain::MechanismMapper;
use sigcam_ingest::BatchReport;
use sigcam_store::StoredEdge;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
    Table,
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the outcome of one import.
    pub fn format_report(&self, report: &BatchReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_report_json(report),
            OutputFormat::Table => Ok(self.format_report_table(report)),
            OutputFormat::Quiet => Ok(report.statements.to_string()),
        }
    }

    fn format_report_json(&self, report: &BatchReport) -> Result<String> {
        let chain = &report.chain;
        let value = serde_json::json!({
            "rows_read": report.rows_read,
            "accepted": report.accepted,
            "filtered": report.filtered,
            "skipped_unresolved": report.skipped_unresolved,
            "duplicates_merged": report.duplicates_merged,
            "precedence_dropped": report.precedence_dropped,
            "statements": report.statements,
            "edges": {
                "enabled_by": chain.enabled_by_edges,
                "participants": chain.participant_edges,
                "regulation": chain.regulatory_edges,
                "total": chain.total_edges()
            },
            "intermediary_processes": chain.intermediary_processes,
            "small_molecule_catalysis": chain.small_molecule_catalysis,
            "dead_ends": chain.dead_ends,
            "without_relation": chain.without_relation
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_report_table(&self, report: &BatchReport) -> String {
        let chain = &report.chain;
        let mut builder = Builder::default();
        builder.push_record(["Counter", "Value"]);

        let rows: Vec<(String, usize)> = vec![
            ("Rows read".into(), report.rows_read),
            ("Accepted".into(), report.accepted),
            ("Skipped (unresolved grouping)".into(), report.skipped_unresolved),
            ("Duplicates merged".into(), report.duplicates_merged),
            ("Binding dropped for kinase".into(), report.precedence_dropped),
            ("Statements".into(), report.statements),
            ("Enabled-by edges".into(), chain.enabled_by_edges),
            ("Participant edges".into(), chain.participant_edges),
            ("Regulation edges".into(), chain.regulatory_edges),
            ("Intermediary processes".into(), chain.intermediary_processes),
            ("Small molecule catalysis".into(), chain.small_molecule_catalysis),
            ("Dead ends".into(), chain.dead_ends),
            ("Without relation".into(), chain.without_relation),
        ];
        for (label, value) in rows {
            builder.push_record([label, value.to_string()]);
        }
        for (reason, count) in &report.filtered {
            builder.push_record([format!("Filtered: {}", reason), count.to_string()]);
        }

        let mut out = format!(
            "{}\n{}",
            finish(builder),
            self.success(&format!("{} statement(s) imported", report.statements))
        );
        if report.total_skipped() > 0 {
            out.push('\n');
            out.push_str(&self.warning(&format!("{} row(s) skipped", report.total_skipped())));
        }
        out
    }

    /// Format the mechanism mapping.
    pub fn format_mechanisms(&self, mapper: &MechanismMapper) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let entries: Vec<serde_json::Value> = mapper
                    .entries()
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "label": e.label,
                            "term": e.term,
                            "term_label": e.term_label,
                            "catalytic": e.catalytic,
                            "acceptable": mapper.is_acceptable(&e.label)
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&entries)?)
            }
            OutputFormat::Quiet => Ok(mapper
                .entries()
                .iter()
                .filter(|e| mapper.is_acceptable(&e.label))
                .map(|e| e.label.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if mapper.is_empty() {
                    return Ok(self.colorize("No mechanisms loaded.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Mechanism", "Term", "Term label", "Catalytic", "Acceptable"]);
                for entry in mapper.entries() {
                    let acceptable = if mapper.is_acceptable(&entry.label) {
                        self.colorize("yes", "green")
                    } else {
                        self.colorize("no", "red")
                    };
                    builder.push_record([
                        entry.label.clone(),
                        entry.term.clone().unwrap_or_else(|| "-".to_string()),
                        entry.term_label.clone().unwrap_or_default(),
                        if entry.catalytic { "yes" } else { "" }.to_string(),
                        acceptable,
                    ]);
                }
                Ok(finish(builder).to_string())
            }
        }
    }

    /// Format stored edges.
    pub fn format_edges(&self, edges: &[StoredEdge]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(edges)?),
            OutputFormat::Quiet => Ok(edges
                .iter()
                .map(|e| format!("{} {} {}", e.subject, e.predicate, e.object))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if edges.is_empty() {
                    return Ok(self.colorize("No edges found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Subject", "Predicate", "Object", "Evidence"]);
                for edge in edges {
                    builder.push_record([
                        edge.subject.clone(),
                        self.colorize(&edge.predicate, "cyan"),
                        edge.object.clone(),
                        edge.evidence_count.to_string(),
                    ]);
                }
                Ok(finish(builder).to_string())
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn finish(builder: Builder) -> Table {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table
}
