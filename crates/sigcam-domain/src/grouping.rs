//! Complex and protein family reference tables

use std::collections::HashMap;
use std::sync::Arc;

use crate::entity::{Entity, Grouping};
use crate::error::GroupingError;

/// Which kind of grouping a table holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingKind {
    /// Protein-containing complexes
    Complex,
    /// Protein families
    Family,
}

/// Groupings keyed by id, loaded once and read-only afterwards
#[derive(Debug, Clone)]
pub struct GroupingTable {
    kind: GroupingKind,
    groupings: HashMap<String, Arc<Entity>>,
}

impl GroupingTable {
    /// Create an empty table
    pub fn new(kind: GroupingKind) -> Self {
        Self {
            kind,
            groupings: HashMap::new(),
        }
    }

    /// Kind of grouping stored here
    pub fn kind(&self) -> GroupingKind {
        self.kind
    }

    /// Insert a grouping; a repeated id is an error, never last-wins
    pub fn insert(&mut self, grouping: Grouping) -> Result<(), GroupingError> {
        if grouping.id.is_empty() {
            return Err(GroupingError::EmptyId);
        }
        if self.groupings.contains_key(&grouping.id) {
            return Err(GroupingError::DuplicateId(grouping.id));
        }
        let id = grouping.id.clone();
        let entity = match self.kind {
            GroupingKind::Complex => Entity::Complex(grouping),
            GroupingKind::Family => Entity::ProteinFamily(grouping),
        };
        self.groupings.insert(id, Arc::new(entity));
        Ok(())
    }

    /// Insert a row whose member list is a delimited text field
    pub fn insert_row(
        &mut self,
        id: &str,
        name: &str,
        members: &str,
        separator: &str,
    ) -> Result<(), GroupingError> {
        self.insert(Grouping::new(id.trim(), name.trim(), split_members(members, separator)))
    }

    /// Shared instance for `id`
    pub fn get(&self, id: &str) -> Option<&Arc<Entity>> {
        self.groupings.get(id)
    }

    /// Number of groupings
    pub fn len(&self) -> usize {
        self.groupings.len()
    }

    /// True if the table is empty
    pub fn is_empty(&self) -> bool {
        self.groupings.is_empty()
    }
}

/// Split a member field on `separator`, trimming each token and dropping empties
pub fn split_members(field: &str, separator: &str) -> Vec<String> {
    field
        .split(separator)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect()
}

/// The complex and family tables used by identity resolution
#[derive(Debug, Clone)]
pub struct ReferenceData {
    /// Complexes by id
    pub complexes: GroupingTable,
    /// Protein families by id
    pub families: GroupingTable,
}

impl ReferenceData {
    /// Bundle two loaded tables
    pub fn new(complexes: GroupingTable, families: GroupingTable) -> Self {
        Self {
            complexes,
            families,
        }
    }

    /// No groupings at all
    pub fn empty() -> Self {
        Self::new(
            GroupingTable::new(GroupingKind::Complex),
            GroupingTable::new(GroupingKind::Family),
        )
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;

    #[test]
    fn test_split_members_trims() {
        assert_eq!(
            split_members(" P05412,  P01100 ,", ","),
            vec!["P05412".to_string(), "P01100".to_string()]
        );
        assert!(split_members("", ",").is_empty());
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut table = GroupingTable::new(GroupingKind::Complex);
        table.insert_row("SIGNOR-C1", "AP1", "P05412, P01100", ",").unwrap();
        let err = table.insert_row("SIGNOR-C1", "other", "P1", ",").unwrap_err();
        assert_eq!(err, GroupingError::DuplicateId("SIGNOR-C1".into()));
        assert_eq!(table.get("SIGNOR-C1").unwrap().name(), "AP1");
    }

    #[test]
    fn test_table_kind_sets_entity_variant() {
        let mut families = GroupingTable::new(GroupingKind::Family);
        families.insert_row("SIGNOR-PF1", "AKT", "P31749, P31751", ",").unwrap();
        let family = families.get("SIGNOR-PF1").unwrap();
        assert_eq!(family.kind(), EntityKind::ProteinFamily);
        assert_eq!(family.members().len(), 2);
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let mut table = GroupingTable::new(GroupingKind::Complex);
        assert_eq!(table.insert_row("  ", "x", "P1", ","), Err(GroupingError::EmptyId));
    }

    #[test]
    fn test_reference_data_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReferenceData>();
    }
}
