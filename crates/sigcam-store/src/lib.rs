//! Sigcam Storage Layer
//!
//! Implements the GraphEmitter trait using SQLite.
//!
//! # Architecture
//!
//! - `nodes`: one row per canonical node key, typed with an ontology class
//! - `edges`: unique (subject, predicate, object) triples
//! - `evidence` / `evidence_references`: provenance attached to edges
//!
//! # Examples
//!
//! ```no_run
//! use sigcam_store::SqliteGraphStore;
//!
//! let store = SqliteGraphStore::new(":memory:").unwrap();
//! // Store is now ready to receive nodes and edges
//! ```

#![warn(missing_docs)]

use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use sigcam_domain::traits::{GraphEmitter, NodeDecl};
use sigcam_domain::Evidence;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Node or edge not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Row id of a stored node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub i64);

/// Row id of a stored edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub i64);

/// A node as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredNode {
    /// Row id
    pub id: i64,
    /// Canonical key
    pub key: String,
    /// Ontology class
    pub class: String,
    /// Optional label
    pub label: Option<String>,
}

/// An edge with its endpoint keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredEdge {
    /// Row id
    pub id: i64,
    /// Subject node key
    pub subject: String,
    /// Predicate curie
    pub predicate: String,
    /// Object node key
    pub object: String,
    /// Number of evidence rows attached
    pub evidence_count: usize,
}

/// One evidence row with its references
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredEvidence {
    /// Row id
    pub id: i64,
    /// Evidence code
    pub code: String,
    /// Contributor
    pub contributor: Option<String>,
    /// Date
    pub date: Option<String>,
    /// Sorted references
    pub references: Vec<String>,
}

const EDGE_SELECT: &str = "SELECT e.id, s.key, e.predicate, o.key,
        (SELECT COUNT(*) FROM evidence ev WHERE ev.edge_id = e.id)
     FROM edges e
     JOIN nodes s ON s.id = e.subject_id
     JOIN nodes o ON o.id = e.object_id";

/// SQLite-based implementation of GraphEmitter
///
/// Declaring a node key that already exists returns the existing row, so
/// several batches can be written into the same database.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own SqliteGraphStore instance.
pub struct SqliteGraphStore {
    conn: Connection,
}

impl SqliteGraphStore {
    /// Create a new SqliteGraphStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Number of nodes
    pub fn node_count(&self) -> Result<usize, StoreError> {
        self.count("SELECT COUNT(*) FROM nodes")
    }

    /// Number of edges
    pub fn edge_count(&self) -> Result<usize, StoreError> {
        self.count("SELECT COUNT(*) FROM edges")
    }

    /// Number of evidence rows
    pub fn evidence_count(&self) -> Result<usize, StoreError> {
        self.count("SELECT COUNT(*) FROM evidence")
    }

    /// Node with the given key
    pub fn node_by_key(&self, key: &str) -> Result<Option<StoredNode>, StoreError> {
        let node = self
            .conn
            .query_row(
                "SELECT id, key, class, label FROM nodes WHERE key = ?1",
                params![key],
                |row| {
                    Ok(StoredNode {
                        id: row.get(0)?,
                        key: row.get(1)?,
                        class: row.get(2)?,
                        label: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(node)
    }

    /// All nodes typed with `class`
    pub fn nodes_with_class(&self, class: &str) -> Result<Vec<StoredNode>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, key, class, label FROM nodes WHERE class = ?1 ORDER BY id")?;
        let nodes = stmt
            .query_map(params![class], |row| {
                Ok(StoredNode {
                    id: row.get(0)?,
                    key: row.get(1)?,
                    class: row.get(2)?,
                    label: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(nodes)
    }

    /// Every edge in insertion order
    pub fn all_edges(&self) -> Result<Vec<StoredEdge>, StoreError> {
        self.query_edges("ORDER BY e.id", params![])
    }

    /// Edges using `predicate`
    pub fn edges_with_predicate(&self, predicate: &str) -> Result<Vec<StoredEdge>, StoreError> {
        self.query_edges("WHERE e.predicate = ?1 ORDER BY e.id", params![predicate])
    }

    /// Edges whose subject has key `key`
    pub fn edges_from(&self, key: &str) -> Result<Vec<StoredEdge>, StoreError> {
        self.query_edges("WHERE s.key = ?1 ORDER BY e.id", params![key])
    }

    /// Edges whose object has key `key`
    pub fn edges_to(&self, key: &str) -> Result<Vec<StoredEdge>, StoreError> {
        self.query_edges("WHERE o.key = ?1 ORDER BY e.id", params![key])
    }

    /// The edge `subject -predicate-> object`, by node keys
    pub fn find_edge(
        &self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<Option<StoredEdge>, StoreError> {
        let mut edges = self.query_edges(
            "WHERE s.key = ?1 AND e.predicate = ?2 AND o.key = ?3",
            params![subject, predicate, object],
        )?;
        Ok(edges.pop())
    }

    /// Evidence attached to an edge, oldest first
    pub fn evidence_for_edge(&self, edge_id: i64) -> Result<Vec<StoredEvidence>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, code, contributor, date FROM evidence WHERE edge_id = ?1 ORDER BY id",
        )?;
        let mut evidence = stmt
            .query_map(params![edge_id], |row| {
                Ok(StoredEvidence {
                    id: row.get(0)?,
                    code: row.get(1)?,
                    contributor: row.get(2)?,
                    date: row.get(3)?,
                    references: Vec::new(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut refs = self.conn.prepare(
            "SELECT reference FROM evidence_references WHERE evidence_id = ?1 ORDER BY reference",
        )?;
        for row in &mut evidence {
            row.references = refs
                .query_map(params![row.id], |r| r.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
        }
        Ok(evidence)
    }

    fn count(&self, sql: &str) -> Result<usize, StoreError> {
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        usize::try_from(count).map_err(|_| StoreError::InvalidData(format!("Negative count: {}", count)))
    }

    fn query_edges(
        &self,
        clause: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<StoredEdge>, StoreError> {
        let sql = format!("{} {}", EDGE_SELECT, clause);
        let mut stmt = self.conn.prepare(&sql)?;
        let edges = stmt
            .query_map(params, |row| {
                let count: i64 = row.get(4)?;
                Ok(StoredEdge {
                    id: row.get(0)?,
                    subject: row.get(1)?,
                    predicate: row.get(2)?,
                    object: row.get(3)?,
                    evidence_count: count.max(0) as usize,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(edges)
    }
}

impl GraphEmitter for SqliteGraphStore {
    type Node = NodeId;
    type Edge = EdgeId;
    type Error = StoreError;

    fn declare_node(&mut self, decl: &NodeDecl) -> Result<NodeId, StoreError> {
        self.conn.execute(
            "INSERT INTO nodes (key, class, label) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO NOTHING",
            params![&decl.key, &decl.class, &decl.label],
        )?;
        let id: i64 = self.conn.query_row(
            "SELECT id FROM nodes WHERE key = ?1",
            params![&decl.key],
            |row| row.get(0),
        )?;
        Ok(NodeId(id))
    }

    fn emit_edge(
        &mut self,
        subject: &NodeId,
        predicate: &str,
        object: &NodeId,
    ) -> Result<EdgeId, StoreError> {
        self.conn.execute(
            "INSERT INTO edges (subject_id, predicate, object_id) VALUES (?1, ?2, ?3)
             ON CONFLICT(subject_id, predicate, object_id) DO NOTHING",
            params![subject.0, predicate, object.0],
        )?;
        self.find_existing_edge(subject, predicate, object)?
            .ok_or_else(|| {
                StoreError::NotFound(format!("edge {} {} {}", subject.0, predicate, object.0))
            })
    }

    fn attach_evidence(&mut self, edge: &EdgeId, evidence: &Evidence) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO evidence (edge_id, code, contributor, date) VALUES (?1, ?2, ?3, ?4)",
            params![edge.0, &evidence.code, &evidence.contributor, &evidence.date],
        )?;
        let evidence_id = tx.last_insert_rowid();
        for reference in &evidence.references {
            tx.execute(
                "INSERT OR IGNORE INTO evidence_references (evidence_id, reference) VALUES (?1, ?2)",
                params![evidence_id, reference],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn find_existing_edge(
        &self,
        subject: &NodeId,
        predicate: &str,
        object: &NodeId,
    ) -> Result<Option<EdgeId>, StoreError> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM edges WHERE subject_id = ?1 AND predicate = ?2 AND object_id = ?3",
                params![subject.0, predicate, object.0],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id.map(EdgeId))
    }
}
