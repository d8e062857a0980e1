//! In-memory emitter used by the domain tests

use std::collections::HashMap;
use std::convert::Infallible;

use crate::evidence::Evidence;
use crate::traits::{GraphEmitter, NodeDecl};

#[derive(Debug, Default)]
pub(crate) struct RecordingEmitter {
    pub nodes: Vec<NodeDecl>,
    pub declare_calls: usize,
    pub edges: Vec<(usize, String, usize)>,
    pub evidence: Vec<(usize, Evidence)>,
    keys: HashMap<String, usize>,
}

impl RecordingEmitter {
    pub fn node(&self, key: &str) -> Option<&NodeDecl> {
        self.keys.get(key).map(|&i| &self.nodes[i])
    }

    pub fn has_edge(&self, subject: &str, predicate: &str, object: &str) -> bool {
        self.edges_with_predicate(predicate)
            .iter()
            .any(|(s, o)| s == subject && o == object)
    }

    pub fn edges_with_predicate(&self, predicate: &str) -> Vec<(String, String)> {
        self.edges
            .iter()
            .filter(|(_, p, _)| p == predicate)
            .map(|(s, _, o)| (self.nodes[*s].key.clone(), self.nodes[*o].key.clone()))
            .collect()
    }

    pub fn edges_from(&self, subject: &str) -> Vec<(String, String)> {
        self.edges
            .iter()
            .filter(|(s, _, _)| self.nodes[*s].key == subject)
            .map(|(_, p, o)| (p.clone(), self.nodes[*o].key.clone()))
            .collect()
    }

    pub fn evidence_for(&self, subject: &str, predicate: &str, object: &str) -> Vec<&Evidence> {
        let Some(edge) = self.edges.iter().position(|(s, p, o)| {
            self.nodes[*s].key == subject && p == predicate && self.nodes[*o].key == object
        }) else {
            return Vec::new();
        };
        self.evidence
            .iter()
            .filter(|(e, _)| *e == edge)
            .map(|(_, ev)| ev)
            .collect()
    }
}

impl GraphEmitter for RecordingEmitter {
    type Node = usize;
    type Edge = usize;
    type Error = Infallible;

    fn declare_node(&mut self, decl: &NodeDecl) -> Result<usize, Infallible> {
        self.declare_calls += 1;
        if let Some(&i) = self.keys.get(&decl.key) {
            return Ok(i);
        }
        self.nodes.push(decl.clone());
        self.keys.insert(decl.key.clone(), self.nodes.len() - 1);
        Ok(self.nodes.len() - 1)
    }

    fn emit_edge(&mut self, subject: &usize, predicate: &str, object: &usize) -> Result<usize, Infallible> {
        self.edges.push((*subject, predicate.to_string(), *object));
        Ok(self.edges.len() - 1)
    }

    fn attach_evidence(&mut self, edge: &usize, evidence: &Evidence) -> Result<(), Infallible> {
        self.evidence.push((*edge, evidence.clone()));
        Ok(())
    }

    fn find_existing_edge(
        &self,
        subject: &usize,
        predicate: &str,
        object: &usize,
    ) -> Result<Option<usize>, Infallible> {
        Ok(self
            .edges
            .iter()
            .position(|(s, p, o)| s == subject && p == predicate && o == object))
    }
}
