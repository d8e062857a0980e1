//! Identity resolution: raw record identifiers to typed entities

use std::collections::HashMap;
use std::sync::Arc;

use crate::entity::{Entity, EntityKind};
use crate::error::ResolveError;
use crate::grouping::ReferenceData;
use crate::terms;

/// Classifies raw identifiers against preloaded reference data
///
/// Resolution is pure: the same input always yields an equal entity, and
/// groupings are always the shared instance from the reference tables.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    reference: Arc<ReferenceData>,
}

impl IdentityResolver {
    /// Create a resolver over loaded reference tables
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }

    /// Reference tables in use
    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Resolve one record-level identifier
    ///
    /// The complex naming pattern wins over the declared type. Unknown
    /// groupings are errors; an empty complex is never fabricated.
    pub fn resolve(
        &self,
        raw_id: &str,
        raw_name: &str,
        declared_type: &str,
    ) -> Result<Arc<Entity>, ResolveError> {
        let raw_id = raw_id.trim();
        let raw_name = raw_name.trim();

        if terms::is_complex_id(raw_id) {
            return self.complex(raw_id);
        }
        if terms::is_family_id(raw_id) {
            return self.family(raw_id);
        }

        let kind = EntityKind::from_declared_type(declared_type).ok_or_else(|| {
            ResolveError::UnsupportedType {
                id: raw_id.to_string(),
                declared: declared_type.to_string(),
            }
        })?;

        match kind {
            EntityKind::Protein => Ok(Arc::new(Entity::protein(raw_id, raw_name))),
            EntityKind::MicroRna => Ok(Arc::new(Entity::micro_rna(raw_id, raw_name))),
            EntityKind::SmallMolecule => Ok(Arc::new(Entity::small_molecule(raw_id, raw_name))),
            EntityKind::Complex => self.complex(raw_id),
            EntityKind::ProteinFamily => self.family(raw_id),
        }
    }

    /// Resolve an identifier that will stand as entity A or B of a statement
    ///
    /// Same as [`resolve`](Self::resolve), except that protein families are
    /// rejected: they are membership groupings, never regulators or targets.
    pub fn resolve_endpoint(
        &self,
        raw_id: &str,
        raw_name: &str,
        declared_type: &str,
    ) -> Result<Arc<Entity>, ResolveError> {
        let entity = self.resolve(raw_id, raw_name, declared_type)?;
        if entity.kind() == EntityKind::ProteinFamily {
            return Err(ResolveError::FamilyEndpoint(entity.id().to_string()));
        }
        Ok(entity)
    }

    fn complex(&self, id: &str) -> Result<Arc<Entity>, ResolveError> {
        self.reference
            .complexes
            .get(id)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownComplex(id.to_string()))
    }

    fn family(&self, id: &str) -> Result<Arc<Entity>, ResolveError> {
        self.reference
            .families
            .get(id)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownFamily(id.to_string()))
    }
}

/// Batch-scoped interner of resolved entities
///
/// Every record naming the same canonical id gets the same instance; the
/// name seen first wins.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: HashMap<String, Arc<Entity>>,
}

impl EntityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a statement endpoint through `resolver` and intern the result
    pub fn resolve(
        &mut self,
        resolver: &IdentityResolver,
        raw_id: &str,
        raw_name: &str,
        declared_type: &str,
    ) -> Result<Arc<Entity>, ResolveError> {
        let entity = resolver.resolve_endpoint(raw_id, raw_name, declared_type)?;
        Ok(self.intern(entity))
    }

    /// Intern an entity by its full id
    pub fn intern(&mut self, entity: Arc<Entity>) -> Arc<Entity> {
        self.entities
            .entry(entity.full_id())
            .or_insert(entity)
            .clone()
    }

    /// Number of distinct entities seen
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True if nothing was interned
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
