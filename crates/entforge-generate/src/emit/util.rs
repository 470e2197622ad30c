//! Shared derivation helpers for the emitter family.
//!
//! Defaulting rules for UI hints, type mappings into the two target
//! languages, and literal escaping. Everything here is a pure function of
//! the entity definition.

use entforge_schema::{
    node::{EntityDef, FieldDef},
    types::{FieldType, RelationKind},
};
use entforge_utils::{pluralize, to_camel_case};

///
/// InputKind
///
/// Widget class a field maps to on the form page.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputKind {
    Text,
    Textarea,
    Number,
    Boolean,
    Date,
    Select,
}

/// Textarea threshold for text fields.
const TEXTAREA_LENGTH: u32 = 200;

#[must_use]
pub fn input_kind(entity: &EntityDef, field: &FieldDef) -> InputKind {
    if entity.field_enum(field).is_some() {
        return InputKind::Select;
    }

    match field.ty {
        FieldType::Text if field.length.is_some_and(|len| len > TEXTAREA_LENGTH) => {
            InputKind::Textarea
        }
        FieldType::Text | FieldType::Guid => InputKind::Text,
        FieldType::Int | FieldType::Decimal | FieldType::Double => InputKind::Number,
        FieldType::Bool => InputKind::Boolean,
        FieldType::DateTime => InputKind::Date,
        // Unrecognized tags degrade to the generic widget.
        FieldType::Other(_) => InputKind::Text,
    }
}

/// TypeScript type for a field, resolving enum tags against the entity.
#[must_use]
pub fn ts_type(entity: &EntityDef, field: &FieldDef) -> String {
    if let Some(enum_def) = entity.field_enum(field) {
        return enum_def.name.clone();
    }

    match field.ty {
        FieldType::Int | FieldType::Decimal | FieldType::Double => "number".to_owned(),
        FieldType::Bool => "boolean".to_owned(),
        // DateTime travels as an ISO string; unknown tags fall back to string.
        _ => "string".to_owned(),
    }
}

/// C# type for a field, resolving enum tags against the entity.
#[must_use]
pub fn cs_type(entity: &EntityDef, field: &FieldDef) -> String {
    if let Some(enum_def) = entity.field_enum(field) {
        return enum_def.name.clone();
    }

    match field.ty {
        FieldType::Bool => "bool".to_owned(),
        FieldType::DateTime => "DateTime".to_owned(),
        FieldType::Decimal => "decimal".to_owned(),
        FieldType::Double => "double".to_owned(),
        FieldType::Guid => "Guid".to_owned(),
        FieldType::Int => "int".to_owned(),
        FieldType::Text | FieldType::Other(_) => "string".to_owned(),
    }
}

/// Initial client-side value for a field, as a TypeScript literal.
#[must_use]
pub fn client_default(entity: &EntityDef, field: &FieldDef) -> String {
    let enum_def = entity.field_enum(field);

    if let Some(default) = field.default.as_deref() {
        if let Some(enum_def) = enum_def {
            return enum_def.member(default).map_or_else(
                || "0".to_owned(),
                |member| format!("{}.{}", enum_def.name, member.name),
            );
        }

        return match field.ty {
            FieldType::Text | FieldType::Guid | FieldType::Other(_) => {
                format!("\"{}\"", escape_ts(default))
            }
            FieldType::Bool => default.to_ascii_lowercase(),
            FieldType::DateTime if default.eq_ignore_ascii_case("now") => {
                "new Date().toISOString()".to_owned()
            }
            FieldType::DateTime if default.eq_ignore_ascii_case("today") => {
                "new Date().toISOString().split(\"T\")[0]".to_owned()
            }
            FieldType::DateTime => format!("\"{}\"", escape_ts(default)),
            FieldType::Int | FieldType::Decimal | FieldType::Double => default.to_owned(),
        };
    }

    if enum_def.is_some() {
        return "0".to_owned();
    }

    match field.ty {
        FieldType::Int | FieldType::Decimal | FieldType::Double => "0".to_owned(),
        FieldType::Bool => "false".to_owned(),
        _ => "\"\"".to_owned(),
    }
}

/// List columns: the hint if present, otherwise every non-computed field
/// plus every reference relation.
#[must_use]
pub fn list_columns(entity: &EntityDef) -> Vec<String> {
    if let Some(columns) = entity
        .ui
        .as_ref()
        .and_then(|ui| ui.list.as_ref())
        .map(|list| &list.columns)
        .filter(|columns| !columns.is_empty())
    {
        return columns.clone();
    }

    let mut columns: Vec<String> = entity
        .fields
        .iter()
        .filter(|f| !f.is_computed())
        .map(|f| f.name.clone())
        .collect();

    columns.extend(
        entity
            .relations
            .iter()
            .filter(|r| r.kind == RelationKind::Reference)
            .map(|r| r.name.clone()),
    );

    columns
}

/// Searchable fields: the hint if present, otherwise the first two
/// non-computed text fields.
#[must_use]
pub fn searchable_fields(entity: &EntityDef) -> Vec<String> {
    if let Some(searchable) = entity
        .ui
        .as_ref()
        .and_then(|ui| ui.list.as_ref())
        .map(|list| &list.searchable)
        .filter(|searchable| !searchable.is_empty())
    {
        return searchable.clone();
    }

    entity
        .fields
        .iter()
        .filter(|f| f.ty.is_text() && !f.is_computed())
        .take(2)
        .map(|f| f.name.clone())
        .collect()
}

/// Form layout rows: the hint if present, otherwise one row per editable
/// field (computed and readonly fields excluded).
#[must_use]
pub fn form_rows(entity: &EntityDef) -> Vec<Vec<String>> {
    if let Some(layout) = entity
        .ui
        .as_ref()
        .and_then(|ui| ui.form.as_ref())
        .map(|form| &form.layout)
        .filter(|layout| !layout.is_empty())
    {
        return layout.iter().map(|row| row.row.clone()).collect();
    }

    entity
        .fields
        .iter()
        .filter(|f| !f.is_computed() && !f.readonly)
        .map(|f| vec![f.name.clone()])
        .collect()
}

/// Configured page size, defaulting to 20.
#[must_use]
pub fn page_size(entity: &EntityDef) -> u32 {
    entity
        .ui
        .as_ref()
        .and_then(|ui| ui.list.as_ref())
        .map_or(20, |list| list.page_size)
}

// Well-known entity names with a matching icon in the client's icon set.
const ICON_TABLE: &[(&str, &str)] = &[
    ("Calendar", "Calendar"),
    ("Category", "Folder"),
    ("Customer", "Users"),
    ("Invoice", "FileText"),
    ("Note", "StickyNote"),
    ("Order", "ShoppingCart"),
    ("Product", "Package"),
    ("Report", "BarChart3"),
    ("Settings", "Settings"),
    ("Task", "CheckSquare"),
];

/// Plural display title: the caption verbatim when given (captions are
/// authored in their display form), pluralized entity name otherwise.
#[must_use]
pub fn plural_caption(entity: &EntityDef) -> String {
    entity
        .caption
        .clone()
        .unwrap_or_else(|| pluralize(&entity.entity))
}

/// Navigation icon: explicit hint, well-known name, or the generic circle.
#[must_use]
pub fn icon_for(entity: &EntityDef) -> String {
    if let Some(icon) = entity.icon.as_deref() {
        return icon.to_owned();
    }

    ICON_TABLE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(&entity.entity))
        .map_or_else(|| "Circle".to_owned(), |(_, icon)| (*icon).to_owned())
}

/// Camel-cased foreign-key property name for a reference relation.
#[must_use]
pub fn fk_property(relation_name: &str) -> String {
    format!("{}Id", to_camel_case(relation_name))
}

/// Format a numeric bound without a trailing `.0` on whole numbers.
#[must_use]
pub fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Escape a string for a double-quoted C# literal.
#[must_use]
pub fn escape_cs(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape a string for a double-quoted TypeScript literal.
#[must_use]
pub fn escape_ts(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use entforge_schema::node::{EnumDef, EnumMember, RelationDef};

    fn field(name: &str, ty: FieldType) -> FieldDef {
        FieldDef {
            name: name.to_owned(),
            ty,
            ..FieldDef::default()
        }
    }

    fn order_with_status() -> EntityDef {
        EntityDef {
            entity: "Order".to_owned(),
            fields: vec![
                field("OrderNumber", FieldType::Text),
                field("Status", FieldType::Other("OrderStatus".to_owned())),
            ],
            enums: vec![EnumDef {
                name: "OrderStatus".to_owned(),
                members: vec![
                    EnumMember {
                        name: "Draft".to_owned(),
                        value: Some(0),
                        ..EnumMember::default()
                    },
                    EnumMember {
                        name: "Confirmed".to_owned(),
                        value: Some(1),
                        ..EnumMember::default()
                    },
                ],
                ..EnumDef::default()
            }],
            ..EntityDef::default()
        }
    }

    #[test]
    fn enum_tags_map_to_select_and_enum_types() {
        let entity = order_with_status();
        let status = &entity.fields[1];

        assert_eq!(input_kind(&entity, status), InputKind::Select);
        assert_eq!(ts_type(&entity, status), "OrderStatus");
        assert_eq!(cs_type(&entity, status), "OrderStatus");
    }

    #[test]
    fn long_text_maps_to_textarea() {
        let entity = EntityDef::default();
        let mut notes = field("Notes", FieldType::Text);
        notes.length = Some(500);

        assert_eq!(input_kind(&entity, &notes), InputKind::Textarea);

        notes.length = Some(50);
        assert_eq!(input_kind(&entity, &notes), InputKind::Text);
    }

    #[test]
    fn unknown_tag_degrades_to_generic_text() {
        let entity = EntityDef::default();
        let mystery = field("Payload", FieldType::Other("Mystery".to_owned()));

        assert_eq!(input_kind(&entity, &mystery), InputKind::Text);
        assert_eq!(ts_type(&entity, &mystery), "string");
        assert_eq!(cs_type(&entity, &mystery), "string");
    }

    #[test]
    fn defaults_resolve_through_local_enums() {
        let mut entity = order_with_status();
        entity.fields[1].default = Some("Confirmed".to_owned());

        assert_eq!(
            client_default(&entity, &entity.fields[1]),
            "OrderStatus.Confirmed"
        );

        entity.fields[1].default = Some("Bogus".to_owned());
        assert_eq!(client_default(&entity, &entity.fields[1]), "0");
    }

    #[test]
    fn datetime_defaults_map_to_client_helpers() {
        let entity = EntityDef::default();
        let mut created = field("CreatedAt", FieldType::DateTime);

        created.default = Some("now".to_owned());
        assert_eq!(client_default(&entity, &created), "new Date().toISOString()");

        created.default = Some("today".to_owned());
        assert_eq!(
            client_default(&entity, &created),
            "new Date().toISOString().split(\"T\")[0]"
        );
    }

    #[test]
    fn list_columns_default_to_fields_and_references() {
        let mut entity = order_with_status();
        entity.fields.push(FieldDef {
            name: "Total".to_owned(),
            formula: Some("[Items].Sum([LineTotal])".to_owned()),
            ..FieldDef::default()
        });
        entity.relations.push(RelationDef {
            name: "Customer".to_owned(),
            kind: RelationKind::Reference,
            target: "Customer".to_owned(),
            ..RelationDef::default()
        });
        entity.relations.push(RelationDef {
            name: "Items".to_owned(),
            kind: RelationKind::Detail,
            target: "OrderItem".to_owned(),
            ..RelationDef::default()
        });

        assert_eq!(
            list_columns(&entity),
            ["OrderNumber", "Status", "Customer"],
            "computed fields and detail relations stay off the list"
        );
    }

    #[test]
    fn searchable_defaults_to_first_two_text_fields() {
        let entity = EntityDef {
            fields: vec![
                field("Code", FieldType::Text),
                field("Quantity", FieldType::Int),
                field("Name", FieldType::Text),
                field("Notes", FieldType::Text),
            ],
            ..EntityDef::default()
        };

        assert_eq!(searchable_fields(&entity), ["Code", "Name"]);
    }

    #[test]
    fn icon_prefers_hint_then_table_then_circle() {
        let mut entity = EntityDef {
            entity: "Order".to_owned(),
            ..EntityDef::default()
        };
        assert_eq!(icon_for(&entity), "ShoppingCart");

        entity.icon = Some("Truck".to_owned());
        assert_eq!(icon_for(&entity), "Truck");

        entity.entity = "Widget".to_owned();
        entity.icon = None;
        assert_eq!(icon_for(&entity), "Circle");
    }
}
