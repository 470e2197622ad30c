//! UI page emitters: list, form, detail.
//!
//! Pages live under `pages/{kebab}/` and import the generated type, schema
//! and api modules plus the hand-written shared components. Column and
//! section layouts come from the UI hints, with derived defaults when a
//! hint is absent.

mod detail;
mod form;
mod list;

pub use detail::DetailPageEmitter;
pub use form::FormPageEmitter;
pub use list::ListPageEmitter;

use crate::emit::{EmitContext, util};
use entforge_schema::types::FieldType;
use entforge_utils::{to_camel_case, to_kebab_case};

/// Page directory for an entity, below the web output root.
#[must_use]
pub fn page_dir(entity: &str) -> String {
    format!("pages/{}", to_kebab_case(entity))
}

/// Route base for an entity, `/kebab-plural`.
#[must_use]
pub fn route_base(entity: &str) -> String {
    format!("/{}", to_kebab_case(&entforge_utils::pluralize(entity)))
}

///
/// ColumnCell
///
/// One renderable column: display label, JSX expression over a row
/// variable, and the label map the expression needs imported, if any.
///

pub struct ColumnCell {
    pub label: String,
    pub expr: String,
    pub enum_labels: Option<String>,
}

/// Resolve a column name (field or reference relation) into a cell.
/// Unknown names resolve to `None` and the column is dropped.
#[must_use]
pub fn column_cell(ctx: &EmitContext<'_>, column: &str, row: &str) -> Option<ColumnCell> {
    let entity = ctx.entity;

    if let Some(field) = entity.field(column) {
        let accessor = format!("{row}.{}", to_camel_case(&field.name));

        if let Some(enum_def) = entity.field_enum(field) {
            return Some(ColumnCell {
                label: field.resolved_label().to_owned(),
                expr: format!("{}Labels[{accessor}]", enum_def.name),
                enum_labels: Some(format!("{}Labels", enum_def.name)),
            });
        }

        let expr = match field.ty {
            FieldType::Bool => format!("{accessor} ? \"Yes\" : \"No\""),
            _ if field.required || field.is_computed() => accessor,
            _ => format!("{accessor} ?? \"\""),
        };

        return Some(ColumnCell {
            label: field.resolved_label().to_owned(),
            expr,
            enum_labels: None,
        });
    }

    if let Some(relation) = entity.relation(column) {
        let expr = match (&relation.lookup_field, ctx.target_known(relation)) {
            (Some(lookup), true) => format!(
                "{row}.{}?.{} ?? \"\"",
                to_camel_case(&relation.name),
                to_camel_case(lookup)
            ),
            _ => format!("{row}.{} ?? \"\"", util::fk_property(&relation.name)),
        };

        return Some(ColumnCell {
            label: relation.resolved_label().to_owned(),
            expr,
            enum_labels: None,
        });
    }

    None
}

///
/// TESTS
///
