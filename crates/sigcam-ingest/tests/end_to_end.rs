//! End-to-end tests: pathway files and reference tables on disk, graph in SQLite

use std::io::Write;
use std::sync::Arc;
use std::thread;

use sigcam_domain::{terms, GroupingKind, ReferenceData};
use sigcam_ingest::{
    bundled_mechanisms, load_annotators_from_path, load_groupings_from_path, AnnotatorTable,
    Importer, IngestConfig, IngestError,
};
use sigcam_store::SqliteGraphStore;
use tempfile::NamedTempFile;

const HEADER: &str =
    "ENTITYA\tTYPEA\tIDA\tENTITYB\tTYPEB\tIDB\tEFFECT\tMECHANISM\tDIRECT\tPMID\tANNOTATOR\tDATE";

fn write_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn pathway(rows: &[&str]) -> String {
    let mut text = HEADER.to_string();
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}

fn importer(reference: ReferenceData) -> Importer {
    Importer::new(
        Arc::new(reference),
        Arc::new(bundled_mechanisms().unwrap()),
        Arc::new(AnnotatorTable::new()),
        IngestConfig::default(),
    )
    .unwrap()
}

const GSK3B_KINASE: &str = "UniProtKB:P49841/GO:0004672";

#[test]
fn test_phosphorylation_chain() {
    let text = pathway(&[
        "GSK3B\tprotein\tP49841\tCEBPB\tprotein\tP17676\tup-regulates\tphosphorylation\tYES\t10635333\t\t",
        "CEBPB\tprotein\tP17676\tJUN\tprotein\tP05412\tup-regulates quantity\ttranscriptional regulation\tYES\t11111111\t\t",
    ]);
    let mut store = SqliteGraphStore::new(":memory:").unwrap();
    let report = importer(ReferenceData::empty())
        .import(text.as_bytes(), &mut store)
        .unwrap();

    assert_eq!(report.accepted, 2);
    assert_eq!(report.statements, 2);

    let activity = store.node_by_key(GSK3B_KINASE).unwrap().unwrap();
    assert_eq!(activity.class, terms::PROTEIN_KINASE_ACTIVITY);

    // P49841 is the regulator: it enables the activity, it is never the subject of enabled-by
    assert!(store.edges_from("UniProtKB:P49841").unwrap().is_empty());
    assert!(store
        .find_edge(GSK3B_KINASE, terms::ENABLED_BY, "UniProtKB:P49841")
        .unwrap()
        .is_some());

    let regulation = store
        .find_edge(GSK3B_KINASE, "RO:0002629", "UniProtKB:P17676/GO:0003700")
        .unwrap()
        .expect("directly positively regulates edge");
    let evidence = store.evidence_for_edge(regulation.id).unwrap();
    assert_eq!(evidence[0].references, vec!["PMID:10635333"]);
    assert_eq!(evidence[0].code, terms::EXPERIMENTAL_EVIDENCE);
}

#[test]
fn test_unknown_effect_without_mechanism() {
    let text = pathway(&[
        "GSK3B\tprotein\tP49841\tCEBPB\tprotein\tP17676\tunknown\t\tNO\t1\t\t",
        "CEBPB\tprotein\tP17676\tGSK3B\tprotein\tP49841\tup-regulates\tphosphorylation\tYES\t2\t\t",
    ]);
    let mut store = SqliteGraphStore::new(":memory:").unwrap();
    importer(ReferenceData::empty())
        .import(text.as_bytes(), &mut store)
        .unwrap();

    let root_activity = "UniProtKB:P49841/GO:0003674";
    assert_eq!(
        store.node_by_key(root_activity).unwrap().unwrap().class,
        terms::MOLECULAR_FUNCTION
    );
    assert!(store
        .find_edge(root_activity, "RO:0002411", "UniProtKB:P17676/GO:0004672")
        .unwrap()
        .is_some());
}

#[test]
fn test_kinase_wins_over_binding() {
    let text = pathway(&[
        "GSK3B\tprotein\tP49841\tCEBPB\tprotein\tP17676\tup-regulates\tphosphorylation\tYES\t1\t\t",
        "GSK3B\tprotein\tP49841\tCEBPB\tprotein\tP17676\tup-regulates\tbinding\tYES\t2\t\t",
    ]);
    let mut store = SqliteGraphStore::new(":memory:").unwrap();
    let report = importer(ReferenceData::empty())
        .import(text.as_bytes(), &mut store)
        .unwrap();

    assert_eq!(report.precedence_dropped, 1);
    assert_eq!(report.statements, 1);
    assert!(store
        .node_by_key("UniProtKB:P49841/GO:0005515")
        .unwrap()
        .is_none());
}

#[test]
fn test_filtered_rows_are_counted() {
    let text = pathway(&[
        "GSK3B\tprotein\tP49841\tApoptosis\tphenotype\tSIGNOR-PH2\tup-regulates\t\tNO\t1\t\t",
        "A\tprotein\tP1\tB\tprotein\tP2\tform complex\tbinding\tYES\t1\t\t",
        "A\tprotein\tP1\tB\tprotein\tP2\tup-regulates\tstabilization\tYES\t1\t\t",
        "A\tproteinfamily\tSIGNOR-PF1\tB\tprotein\tP2\tup-regulates\tbinding\tYES\t1\t\t",
    ]);
    let mut store = SqliteGraphStore::new(":memory:").unwrap();
    let report = importer(ReferenceData::empty())
        .import(text.as_bytes(), &mut store)
        .unwrap();

    assert_eq!(report.rows_read, 4);
    assert_eq!(report.accepted, 0);
    assert_eq!(report.filtered.get("unsupported_type"), Some(&2));
    assert_eq!(report.filtered.get("complex_formation"), Some(&1));
    assert_eq!(report.filtered.get("unacceptable_mechanism"), Some(&1));
    assert_eq!(store.node_count().unwrap(), 0);
}

#[test]
fn test_reference_tables_from_disk() {
    let config = IngestConfig::default();
    let complexes = write_file(
        "SIGNOR ID;COMPLEX NAME;LIST OF ENTITIES\nSIGNOR-C1;AP1;P05412, P01100\n",
    );
    let families = write_file(
        "SIGNOR ID;PROT. FAMILY NAME;LIST OF ENTITIES\nSIGNOR-PF1;AKT;P31749, P31751, Q9Y243\n",
    );
    let annotators = write_file("NAME\tIDENTIFIER\nCurator One\thttps://orcid.org/0000-0001\n");

    let reference = ReferenceData::new(
        load_groupings_from_path(complexes.path(), GroupingKind::Complex, &config).unwrap(),
        load_groupings_from_path(families.path(), GroupingKind::Family, &config).unwrap(),
    );
    let importer = Importer::new(
        Arc::new(reference),
        Arc::new(bundled_mechanisms().unwrap()),
        Arc::new(load_annotators_from_path(annotators.path()).unwrap()),
        config,
    )
    .unwrap();

    let input = write_file(&pathway(&[
        "GSK3B\tprotein\tP49841\tAP1\tcomplex\tSIGNOR-C1\tdown-regulates\tphosphorylation\tYES\t5\tCurator One\t2020-05-06",
        "AP1\tcomplex\tSIGNOR-C1\tCEBPB\tprotein\tP17676\tup-regulates quantity by expression\ttranscriptional regulation\tYES\t6\t\t",
        "X\tcomplex\tSIGNOR-C404\tCEBPB\tprotein\tP17676\tup-regulates\tbinding\tYES\t7\t\t",
    ]));

    let mut store = SqliteGraphStore::new(":memory:").unwrap();
    let report = importer.import_path(input.path(), &mut store).unwrap();

    assert_eq!(report.accepted, 2);
    assert_eq!(report.skipped_unresolved, 1);

    let complex = store.node_by_key("SIGNOR-C1").unwrap().unwrap();
    assert_eq!(complex.class, terms::PROTEIN_CONTAINING_COMPLEX);
    assert_eq!(complex.label.as_deref(), Some("AP1"));
    assert_eq!(store.edges_with_predicate(terms::HAS_PART).unwrap().len(), 2);

    let regulation = store
        .find_edge(GSK3B_KINASE, "RO:0002630", "SIGNOR-C1/GO:0003700")
        .unwrap()
        .expect("directly negatively regulates edge");
    let evidence = store.evidence_for_edge(regulation.id).unwrap();
    assert_eq!(evidence[0].contributor.as_deref(), Some("https://orcid.org/0000-0001"));
    assert_eq!(evidence[0].date.as_deref(), Some("2020-05-06"));
}

#[test]
fn test_duplicate_complex_table_is_fatal() {
    let complexes = write_file(
        "SIGNOR ID;COMPLEX NAME;LIST OF ENTITIES\nSIGNOR-C1;AP1;P05412\nSIGNOR-C1;AP1 again;P01100\n",
    );
    let err = load_groupings_from_path(complexes.path(), GroupingKind::Complex, &IngestConfig::default())
        .unwrap_err();
    assert!(matches!(err, IngestError::DuplicateGroupingId(ref id) if id == "SIGNOR-C1"));
}

#[test]
fn test_ubiquitination_inserts_proteasome_process() {
    let text = pathway(&[
        "FBXW7\tprotein\tQ969H0\tJUN\tprotein\tP05412\tdown-regulates quantity by destabilization\tubiquitination\tYES\t1\t\t",
        "JUN\tprotein\tP05412\tCEBPB\tprotein\tP17676\tup-regulates\tbinding\tYES\t2\t\t",
    ]);
    let mut store = SqliteGraphStore::new(":memory:").unwrap();
    let report = importer(ReferenceData::empty())
        .import(text.as_bytes(), &mut store)
        .unwrap();

    assert_eq!(report.chain.intermediary_processes, 1);
    let processes = store
        .nodes_with_class(terms::PROTEASOME_MEDIATED_CATABOLIC_PROCESS)
        .unwrap();
    assert_eq!(processes.len(), 1);
    let process = &processes[0].key;
    assert!(store
        .find_edge("UniProtKB:Q969H0/GO:0061630", "RO:0002213", process)
        .unwrap()
        .is_some());
    assert!(store
        .find_edge(process, "RO:0002212", "UniProtKB:P05412/GO:0005515")
        .unwrap()
        .is_some());
}

#[test]
fn test_shared_importer_across_threads() {
    let importer = Arc::new(importer(ReferenceData::empty()));
    let batches = [
        pathway(&["A\tprotein\tP1\tB\tprotein\tP2\tup-regulates\tphosphorylation\tYES\t1\t\t"]),
        pathway(&["C\tprotein\tP3\tD\tprotein\tP4\tdown-regulates\tdephosphorylation\tNO\t2\t\t"]),
    ];

    let handles: Vec<_> = batches
        .into_iter()
        .map(|text| {
            let importer = Arc::clone(&importer);
            thread::spawn(move || {
                let mut store = SqliteGraphStore::new(":memory:").unwrap();
                let report = importer.import(text.as_bytes(), &mut store).unwrap();
                (report.statements, store.node_count().unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (statements, nodes) = handle.join().unwrap();
        assert_eq!(statements, 1);
        assert_eq!(nodes, 2);
    }
}

#[test]
fn test_family_never_becomes_an_endpoint() {
    let config = IngestConfig::default();
    let families = write_file(
        "SIGNOR ID;PROT. FAMILY NAME;LIST OF ENTITIES\nSIGNOR-PF1;AKT;P31749, P31751\n",
    );
    let reference = ReferenceData::new(
        sigcam_domain::GroupingTable::new(GroupingKind::Complex),
        load_groupings_from_path(families.path(), GroupingKind::Family, &config).unwrap(),
    );
    let text = pathway(&[
        "AKT\tprotein\tSIGNOR-PF1\tGSK3B\tprotein\tP49841\tdown-regulates\tphosphorylation\tYES\t1\t\t",
    ]);
    let mut store = SqliteGraphStore::new(":memory:").unwrap();
    let report = importer(reference).import(text.as_bytes(), &mut store).unwrap();

    assert_eq!(report.statements, 0);
    assert_eq!(report.filtered.get("family_endpoint"), Some(&1));
    assert!(store.node_by_key("SIGNOR-PF1").unwrap().is_none());
    assert!(store.edges_with_predicate(terms::ENABLED_BY).unwrap().is_empty());
}

#[test]
fn test_evidence_written_once_per_regulatory_edge() {
    let text = pathway(&[
        "GSK3B\tprotein\tP49841\tCEBPB\tprotein\tP17676\tup-regulates\tphosphorylation\tYES\t1\t\t",
        "CEBPB\tprotein\tP17676\tJUN\tprotein\tP05412\tup-regulates\tphosphorylation\tYES\t2\t\t",
        "CEBPB\tprotein\tP17676\tFOS\tprotein\tP01100\tup-regulates\tphosphorylation\tYES\t3\t\t",
    ]);
    let mut store = SqliteGraphStore::new(":memory:").unwrap();
    importer(ReferenceData::empty())
        .import(text.as_bytes(), &mut store)
        .unwrap();

    let regulation = store
        .find_edge(GSK3B_KINASE, "RO:0002629", "UniProtKB:P17676/GO:0004672")
        .unwrap()
        .expect("directly positively regulates edge");
    let evidence = store.evidence_for_edge(regulation.id).unwrap();
    assert_eq!(evidence.len(), 1);
    assert_eq!(evidence[0].references, vec!["PMID:1"]);
}
