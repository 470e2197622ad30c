//! Relationship resolution.
//!
//! One pure pass over the working set, in declared entity/relation order.
//! Explicitly paired relations are reconciled onto the detail side's
//! association identifier; one-sided relations get a synthesized reverse on
//! the target. Unresolvable targets are skipped — resolution never fails.

#[cfg(test)]
mod tests;

use entforge_schema::{
    node::{EntityDef, RelationDef},
    set::EntitySet,
    types::RelationKind,
};
use entforge_utils::pluralize;
use serde::Serialize;
use std::collections::BTreeMap;

///
/// ReverseAssociation
///
/// A relation end the resolver infers for the target of a one-sided
/// declaration. Consumed once by the target entity's emitters.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ReverseAssociation {
    /// Entity the property is added to.
    pub target_entity: String,

    /// Generated property name on the target.
    pub property_name: String,

    /// Entity that declared the originating relation.
    pub source_entity: String,

    /// Shared association identifier, `"{source}-{relationName}"`.
    pub association: String,

    /// True when the reverse of a many-to-one relation (a collection end).
    pub collection: bool,
}

///
/// Resolution
///
/// The resolver's two frozen outputs. Both maps are keyed by ASCII-folded
/// entity name so lookups follow the working set's name semantics; the
/// override inner map folds relation names the same way.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct Resolution {
    reverses: BTreeMap<String, Vec<ReverseAssociation>>,
    overrides: BTreeMap<String, BTreeMap<String, String>>,
}

impl Resolution {
    /// Reverse associations to add to `entity` before emission.
    #[must_use]
    pub fn reverses_for(&self, entity: &str) -> &[ReverseAssociation] {
        self.reverses
            .get(&entity.to_ascii_lowercase())
            .map_or(&[], Vec::as_slice)
    }

    /// Replacement association identifier for an explicit relation, if its
    /// default identifier was reconciled onto a paired counterpart's.
    #[must_use]
    pub fn association_override(&self, entity: &str, relation: &str) -> Option<&str> {
        self.overrides
            .get(&entity.to_ascii_lowercase())?
            .get(&relation.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Effective association identifier for an explicit relation.
    #[must_use]
    pub fn association_for(&self, entity: &EntityDef, relation: &RelationDef) -> String {
        self.association_override(&entity.entity, &relation.name)
            .map_or_else(
                || relation.default_association(&entity.entity),
                str::to_owned,
            )
    }

    /// Total number of synthesized reverse associations.
    #[must_use]
    pub fn reverse_count(&self) -> usize {
        self.reverses.values().map(Vec::len).sum()
    }

    /// Total number of recorded overrides.
    #[must_use]
    pub fn override_count(&self) -> usize {
        self.overrides.values().map(BTreeMap::len).sum()
    }
}

/// Analyze the full working set.
///
/// Runs once per relation instance, in declared order. The outputs must be
/// treated as frozen before any emitter runs.
#[must_use]
pub fn resolve(set: &EntitySet) -> Resolution {
    let mut resolution = Resolution::default();

    for entity in set {
        for relation in &entity.relations {
            // Unknown target: the relation stays one-sided everywhere.
            let Some(target) = set.get(&relation.target) else {
                continue;
            };

            if let Some(counterpart) = find_counterpart(entity, relation, target) {
                // Explicit pair. The canonical identifier comes from the
                // detail side; only the reference side needs an override.
                if relation.kind == RelationKind::Reference {
                    let canonical = counterpart.default_association(&target.entity);
                    resolution
                        .overrides
                        .entry(entity.entity.to_ascii_lowercase())
                        .or_default()
                        .insert(relation.name.to_ascii_lowercase(), canonical);
                }
                continue;
            }

            resolution
                .reverses
                .entry(target.entity.to_ascii_lowercase())
                .or_default()
                .push(synthesize_reverse(entity, relation, target));
        }
    }

    resolution
}

// First explicit counterpart in the target's declaration order, or none.
// Reference pairs with detail and vice versa; no tie-break beyond first match.
fn find_counterpart<'a>(
    entity: &EntityDef,
    relation: &RelationDef,
    target: &'a EntityDef,
) -> Option<&'a RelationDef> {
    let wanted = match relation.kind {
        RelationKind::Reference => RelationKind::Detail,
        RelationKind::Detail => RelationKind::Reference,
    };

    target
        .relations
        .iter()
        .find(|r| r.kind == wanted && r.target.eq_ignore_ascii_case(&entity.entity))
}

fn synthesize_reverse(
    entity: &EntityDef,
    relation: &RelationDef,
    target: &EntityDef,
) -> ReverseAssociation {
    let collection = relation.kind == RelationKind::Reference;
    let property_name = if collection {
        pluralize(&entity.entity)
    } else {
        entity.entity.clone()
    };

    ReverseAssociation {
        target_entity: target.entity.clone(),
        property_name,
        source_entity: entity.entity.clone(),
        association: relation.default_association(&entity.entity),
        collection,
    }
}
