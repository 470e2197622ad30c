use crate::set::EntitySet;
use derive_more::Display;

///
/// Lint
///
/// Advisory findings over a working set. Generation is deliberately
/// best-effort — an unresolved target or unknown type tag degrades silently
/// there — so these are the only place a typo becomes visible.
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum Lint {
    #[display(
        "relation '{relation}' on entity '{entity}' targets unknown entity '{target}'; \
         no reverse association will be generated"
    )]
    UnknownRelationTarget {
        entity: String,
        relation: String,
        target: String,
    },

    #[display(
        "field '{field}' on entity '{entity}' has type '{ty}' which names neither a \
         built-in type nor a local enum; emitters fall back to a generic representation"
    )]
    UnknownFieldType {
        entity: String,
        field: String,
        ty: String,
    },
}

/// Check every entity in the set, in load order.
#[must_use]
pub fn lint(set: &EntitySet) -> Vec<Lint> {
    let mut findings = Vec::new();

    for entity in set {
        for relation in &entity.relations {
            if !set.contains(&relation.target) {
                findings.push(Lint::UnknownRelationTarget {
                    entity: entity.entity.clone(),
                    relation: relation.name.clone(),
                    target: relation.target.clone(),
                });
            }
        }

        for field in &entity.fields {
            let Some(name) = field.ty.enum_name() else {
                continue;
            };
            if entity.enum_def(name).is_none() {
                findings.push(Lint::UnknownFieldType {
                    entity: entity.entity.clone(),
                    field: field.name.clone(),
                    ty: name.to_owned(),
                });
            }
        }
    }

    findings
}

///
/// TESTS
///
