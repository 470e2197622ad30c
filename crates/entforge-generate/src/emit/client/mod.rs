//! Client-side emitters: type declarations, validation schemas, API modules.
//!
//! All client artifacts live under kebab-case paths below the configured web
//! output root and import each other (and the hand-written client plumbing)
//! by those deterministic paths.

mod api;
mod schema;
mod types;

pub use api::ClientApiEmitter;
pub use schema::ClientSchemaEmitter;
pub use types::ClientTypesEmitter;

use crate::emit::EmitContext;
use entforge_utils::to_kebab_case;

/// Kebab-case client module name for an entity.
#[must_use]
pub fn module_name(entity: &str) -> String {
    to_kebab_case(entity)
}

/// Entities this entity's client type refers to: known relation targets plus
/// reverse-association sources. Deduplicated, sorted, self excluded.
#[must_use]
pub fn related_entities(ctx: &EmitContext<'_>) -> Vec<String> {
    let mut related = Vec::new();

    for relation in &ctx.entity.relations {
        let Some(target) = ctx.set.get(&relation.target) else {
            continue;
        };
        related.push(target.entity.clone());
    }

    for reverse in ctx.reverses {
        related.push(reverse.source_entity.clone());
    }

    related.retain(|name| !name.eq_ignore_ascii_case(&ctx.entity.entity));
    related.sort();
    related.dedup();

    related
}
