//! Core Importer implementation

use std::fmt::Display;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use sigcam_domain::terms::normalize_reference;
use sigcam_domain::traits::GraphEmitter;
use sigcam_domain::{
    AddOutcome, CausalStatement, Effect, EntityRegistry, IdentityResolver, IntermediaryRules,
    MechanismMapper, ReferenceData, ResolveError, StatementSet,
};
use tracing::{debug, info, warn};

use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::filter::RecordFilter;
use crate::record::{PathwayReader, PathwayRecord};
use crate::report::BatchReport;
use crate::tables::AnnotatorTable;

/// Turns pathway files into activity graphs
///
/// Reference tables are shared read-only; every call to [`Importer::import`]
/// owns its statement set and entity registry, so one importer can serve
/// several batches or threads.
#[derive(Debug, Clone)]
pub struct Importer {
    resolver: IdentityResolver,
    mapper: Arc<MechanismMapper>,
    annotators: Arc<AnnotatorTable>,
    filter: RecordFilter,
    rules: IntermediaryRules,
    config: IngestConfig,
}

impl Importer {
    /// Create a new Importer with the built-in intermediary rules
    pub fn new(
        reference: Arc<ReferenceData>,
        mapper: Arc<MechanismMapper>,
        annotators: Arc<AnnotatorTable>,
        config: IngestConfig,
    ) -> Result<Self, IngestError> {
        config.validate().map_err(IngestError::Config)?;
        Ok(Self {
            resolver: IdentityResolver::new(reference),
            filter: RecordFilter::new(config.clone(), Arc::clone(&mapper)),
            mapper,
            annotators,
            rules: IntermediaryRules::default(),
            config,
        })
    }

    /// Replace the intermediary rule table
    pub fn with_rules(mut self, rules: IntermediaryRules) -> Self {
        self.rules = rules;
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Parse, filter and resolve a batch into a deduplicated statement set
    ///
    /// Precedence filtering has not been applied yet.
    pub fn build_statements<R: Read>(
        &self,
        input: R,
        report: &mut BatchReport,
    ) -> Result<StatementSet, IngestError> {
        let mut set = StatementSet::with_evidence_code(self.config.evidence_code.clone());
        let mut registry = EntityRegistry::new();

        for record in PathwayReader::new(input, self.config.input_delimiter_byte())? {
            let record = record?;
            report.record_row();

            if let Err(rejection) = self.filter.check(&record) {
                debug!(line = record.linenum, %rejection, "Record filtered");
                report.record_rejection(&rejection);
                continue;
            }

            let statement = match self.statement(&mut registry, &record) {
                Ok(statement) => statement,
                Err(e) if e.is_unresolved_grouping() => {
                    warn!(line = record.linenum, error = %e, "Skipping record with unresolved grouping");
                    report.record_unresolved();
                    continue;
                }
                Err(e @ ResolveError::FamilyEndpoint(_)) => {
                    debug!(line = record.linenum, error = %e, "Record filtered");
                    *report.filtered.entry("family_endpoint".to_string()).or_insert(0) += 1;
                    continue;
                }
                Err(e) => {
                    debug!(line = record.linenum, error = %e, "Record could not be resolved");
                    *report.filtered.entry("unresolved_type".to_string()).or_insert(0) += 1;
                    continue;
                }
            };

            let outcome = set.add(statement);
            report.record_accepted(outcome == AddOutcome::Merged);
        }

        Ok(set)
    }

    /// Import one batch into `emitter`
    pub fn import<R, E>(&self, input: R, emitter: &mut E) -> Result<BatchReport, IngestError>
    where
        R: Read,
        E: GraphEmitter,
        E::Error: Display,
    {
        let mut report = BatchReport::new();
        let mut set = self.build_statements(input, &mut report)?;

        report.precedence_dropped = set.apply_precedence();
        report.chain = set
            .chain(emitter, &self.rules)
            .map_err(|e| IngestError::Emit(e.to_string()))?;
        report.statements = set.len();

        info!(
            rows = report.rows_read,
            accepted = report.accepted,
            skipped = report.total_skipped(),
            statements = report.statements,
            "Batch imported"
        );
        Ok(report)
    }

    /// Import one pathway file from disk
    pub fn import_path<E>(&self, path: impl AsRef<Path>, emitter: &mut E) -> Result<BatchReport, IngestError>
    where
        E: GraphEmitter,
        E::Error: Display,
    {
        let path = path.as_ref();
        info!("Importing pathway file {}", path.display());
        self.import(File::open(path)?, emitter)
    }

    fn statement(
        &self,
        registry: &mut EntityRegistry,
        record: &PathwayRecord,
    ) -> Result<CausalStatement, ResolveError> {
        let entity_a = registry.resolve(&self.resolver, &record.id_a, &record.entity_a, &record.type_a)?;
        let entity_b = registry.resolve(&self.resolver, &record.id_b, &record.entity_b, &record.type_b)?;
        let reference = normalize_reference(&record.pmid, &self.config.reference_prefix);

        Ok(CausalStatement::new(
            entity_a,
            entity_b,
            self.mapper.mechanism(&record.mechanism),
            Effect::parse(&record.effect),
            record.direct,
            Some(reference),
            self.annotators.contributor(record.annotator.as_deref()),
            record.date.clone(),
            record.linenum,
        ))
    }
}
