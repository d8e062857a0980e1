//! Integration tests for sigcam-store
//!
//! These tests drive the store through the domain's chaining algorithm and
//! check what lands in the tables.

use std::sync::Arc;

use sigcam_domain::traits::{GraphEmitter, NodeDecl};
use sigcam_domain::{
    terms, CausalStatement, Effect, Entity, Evidence, IntermediaryRules, Mechanism, StatementSet,
};
use sigcam_store::SqliteGraphStore;

fn kinase() -> Mechanism {
    Mechanism {
        label: "phosphorylation".to_string(),
        term: terms::PROTEIN_KINASE_ACTIVITY.to_string(),
        catalytic: false,
    }
}

fn statement(a: Entity, b: Entity, mechanism: Mechanism, pmid: &str) -> CausalStatement {
    CausalStatement::new(
        Arc::new(a),
        Arc::new(b),
        mechanism,
        Effect::UpRegulates,
        true,
        vec![pmid.to_string()],
        Some("0000-0001".to_string()),
        Some("2021-03-04".to_string()),
        1,
    )
}

#[test]
fn test_store_initialization() {
    let store = SqliteGraphStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
    let store = store.unwrap();
    assert_eq!(store.node_count().unwrap(), 0);
    assert_eq!(store.edge_count().unwrap(), 0);
}

#[test]
fn test_edges_are_unique() {
    let mut store = SqliteGraphStore::new(":memory:").unwrap();
    let a = store.declare_node(&NodeDecl::new("a", "GO:0003674")).unwrap();
    let b = store.declare_node(&NodeDecl::new("b", "GO:0003674")).unwrap();

    assert!(store.find_existing_edge(&a, "RO:0002213", &b).unwrap().is_none());
    let first = store.emit_edge(&a, "RO:0002213", &b).unwrap();
    let second = store.emit_edge(&a, "RO:0002213", &b).unwrap();

    assert_eq!(first, second);
    assert_eq!(store.edge_count().unwrap(), 1);
    assert_eq!(store.find_existing_edge(&a, "RO:0002213", &b).unwrap(), Some(first));
}

#[test]
fn test_evidence_round_trip() {
    let mut store = SqliteGraphStore::new(":memory:").unwrap();
    let a = store.declare_node(&NodeDecl::new("a", "GO:0003674")).unwrap();
    let b = store.declare_node(&NodeDecl::new("b", "GO:0003674")).unwrap();
    let edge = store.emit_edge(&a, "RO:0002213", &b).unwrap();

    let evidence = Evidence::experimental(["PMID:2", "PMID:1"])
        .with_contributor(Some("0000-0001".to_string()))
        .with_date(Some("2021-03-04".to_string()));
    store.attach_evidence(&edge, &evidence).unwrap();
    store
        .attach_evidence(&edge, &Evidence::experimental(["PMID:3"]))
        .unwrap();

    let stored = store.evidence_for_edge(edge.0).unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].code, terms::EXPERIMENTAL_EVIDENCE);
    assert_eq!(stored[0].references, vec!["PMID:1", "PMID:2"]);
    assert_eq!(stored[0].contributor.as_deref(), Some("0000-0001"));
    assert_eq!(stored[1].references, vec!["PMID:3"]);
    assert_eq!(store.find_edge("a", "RO:0002213", "b").unwrap().unwrap().evidence_count, 2);
}

#[test]
fn test_chain_into_store() {
    let gsk3b = Entity::protein("P49841", "GSK3B");
    let cebpb = Entity::protein("P17676", "CEBPB");
    let mut set = StatementSet::new();
    set.add(statement(gsk3b.clone(), cebpb.clone(), kinase(), "PMID:100"));
    set.add(statement(cebpb, gsk3b, kinase(), "PMID:200"));

    let mut store = SqliteGraphStore::new(":memory:").unwrap();
    let report = set.chain(&mut store, &IntermediaryRules::default()).unwrap();

    assert_eq!(report.regulatory_edges, 2);
    assert_eq!(store.node_count().unwrap(), 4);

    let activity = store.node_by_key("UniProtKB:P49841/GO:0004672").unwrap().unwrap();
    assert_eq!(activity.class, terms::PROTEIN_KINASE_ACTIVITY);

    let regulation = store
        .find_edge(
            "UniProtKB:P49841/GO:0004672",
            "RO:0002629",
            "UniProtKB:P17676/GO:0004672",
        )
        .unwrap()
        .expect("regulatory edge");
    let evidence = store.evidence_for_edge(regulation.id).unwrap();
    assert_eq!(evidence[0].references, vec!["PMID:100"]);

    assert_eq!(store.edges_with_predicate(terms::ENABLED_BY).unwrap().len(), 2);
    assert!(store.edges_to("UniProtKB:P49841").unwrap().iter().all(|e| {
        e.predicate == terms::ENABLED_BY || e.predicate == terms::HAS_INPUT
    }));
}

#[test]
fn test_second_batch_reuses_nodes() {
    let mut store = SqliteGraphStore::new(":memory:").unwrap();
    for pmid in ["PMID:1", "PMID:2"] {
        let mut set = StatementSet::new();
        set.add(statement(
            Entity::protein("P49841", "GSK3B"),
            Entity::protein("P17676", "CEBPB"),
            kinase(),
            pmid,
        ));
        set.chain(&mut store, &IntermediaryRules::default()).unwrap();
    }

    assert_eq!(store.node_count().unwrap(), 2);
    let enabled_by = store.edges_with_predicate(terms::ENABLED_BY).unwrap();
    assert_eq!(enabled_by.len(), 1);
    assert_eq!(enabled_by[0].evidence_count, 2);
}

#[test]
fn test_complex_members_persisted() {
    use sigcam_domain::Grouping;

    let complex = Entity::Complex(Grouping::new(
        "SIGNOR-C1",
        "AP1",
        vec!["P05412".to_string(), "P01100".to_string()],
    ));
    let mut set = StatementSet::new();
    set.add(statement(complex, Entity::protein("P17676", "CEBPB"), kinase(), "PMID:9"));

    let mut store = SqliteGraphStore::new(":memory:").unwrap();
    set.chain(&mut store, &IntermediaryRules::default()).unwrap();

    let parts = store.edges_from("SIGNOR-C1").unwrap();
    assert_eq!(parts.len(), 2);
    assert!(parts.iter().all(|e| e.predicate == terms::HAS_PART));
    assert_eq!(
        store.nodes_with_class(terms::PROTEIN_CONTAINING_COMPLEX).unwrap().len(),
        1
    );
}

#[test]
fn test_file_backed_store_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.db");
    {
        let mut store = SqliteGraphStore::new(&path).unwrap();
        store.declare_node(&NodeDecl::new("a", "GO:0003674")).unwrap();
    }
    let store = SqliteGraphStore::new(&path).unwrap();
    assert!(store.node_by_key("a").unwrap().is_some());
}

#[test]
fn test_stored_edges_serialize() {
    let mut store = SqliteGraphStore::new(":memory:").unwrap();
    let a = store.declare_node(&NodeDecl::new("a", "GO:0003674")).unwrap();
    let b = store.declare_node(&NodeDecl::new("b", "GO:0003674")).unwrap();
    store.emit_edge(&a, "RO:0002211", &b).unwrap();

    let json = serde_json::to_string(&store.all_edges().unwrap()).unwrap();
    assert!(json.contains("\"predicate\":\"RO:0002211\""));
}
