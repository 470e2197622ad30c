//! Client validation-schema emitter.
//!
//! One zod schema per entity covering the editable surface: validation
//! rules translate to zod chains, enum fields validate against the native
//! enum, references validate their foreign key. Computed and readonly
//! fields never reach the form, so they stay out of the schema.

use crate::{
    config::GenerateConfig,
    emit::{ArtifactKind, EmitContext, Emitter, TS_HEADER, client, util},
};
use entforge_schema::{
    node::{EntityDef, FieldDef, RangeBound},
    types::{FieldType, RelationKind},
};
use entforge_utils::to_camel_case;
use std::fmt::Write;
use std::path::PathBuf;

pub struct ClientSchemaEmitter;

impl Emitter for ClientSchemaEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ClientSchema
    }

    fn path(&self, entity: &EntityDef, config: &GenerateConfig) -> Option<PathBuf> {
        let dir = config.web_out()?;

        Some(
            dir.join("schemas")
                .join(format!("{}.ts", client::module_name(&entity.entity))),
        )
    }

    fn emit(&self, ctx: &EmitContext<'_>) -> String {
        let entity = ctx.entity;
        let mut out = String::new();

        out.push_str(TS_HEADER);
        out.push_str("import { z } from \"zod\";\n");

        let used_enums: Vec<&str> = entity
            .fields
            .iter()
            .filter(|f| !f.is_computed() && !f.readonly)
            .filter_map(|f| entity.field_enum(f).map(|e| e.name.as_str()))
            .collect();
        if !used_enums.is_empty() {
            let mut names: Vec<&str> = used_enums;
            names.sort_unstable();
            names.dedup();
            let _ = writeln!(
                out,
                "import {{ {} }} from \"../types/{}\";",
                names.join(", "),
                client::module_name(&entity.entity)
            );
        }
        out.push('\n');

        let _ = writeln!(
            out,
            "export const {}Schema = z.object({{",
            to_camel_case(&entity.entity)
        );

        for field in &entity.fields {
            if field.is_computed() || field.readonly {
                continue;
            }
            field_line(&mut out, entity, field);
        }

        for relation in &entity.relations {
            if relation.kind != RelationKind::Reference {
                continue;
            }
            let fk = util::fk_property(&relation.name);
            if relation.required {
                let _ = writeln!(
                    out,
                    "  {fk}: z.number({{ required_error: \"{} is required\" }}),",
                    util::escape_ts(relation.resolved_label())
                );
            } else {
                let _ = writeln!(out, "  {fk}: z.number().nullable().optional(),");
            }
        }

        out.push_str("});\n\n");

        let _ = writeln!(
            out,
            "export type {}FormValues = z.infer<typeof {}Schema>;",
            entity.entity,
            to_camel_case(&entity.entity)
        );

        out
    }
}

fn field_line(out: &mut String, entity: &EntityDef, field: &FieldDef) {
    let name = to_camel_case(&field.name);

    // Free-form predicates stay on the server; leave a marker so the form
    // author knows the rule exists.
    for rule in &field.validations {
        if let Some(criteria) = &rule.criteria {
            let _ = writeln!(
                out,
                "  // {name}: \"{}\" is enforced server-side",
                util::escape_ts(criteria)
            );
        }
    }

    let chain = zod_chain(entity, field);
    let _ = writeln!(out, "  {name}: {chain},");
}

fn zod_chain(entity: &EntityDef, field: &FieldDef) -> String {
    // Selects always submit a member value, so enum fields need no
    // optionality relaxation.
    if let Some(enum_def) = entity.field_enum(field) {
        return format!("z.nativeEnum({})", enum_def.name);
    }

    match field.ty {
        FieldType::Int | FieldType::Decimal | FieldType::Double => number_chain(field),
        FieldType::Bool => "z.boolean()".to_owned(),
        FieldType::Guid => {
            let mut chain = "z.string().uuid()".to_owned();
            if !field.required {
                chain.push_str(".nullable().optional()");
            }
            chain
        }
        FieldType::DateTime | FieldType::Text | FieldType::Other(_) => string_chain(field),
    }
}

fn string_chain(field: &FieldDef) -> String {
    let mut chain = "z.string()".to_owned();

    if let Some(length) = field.length {
        let _ = write!(chain, ".max({length})");
    }

    for rule in &field.validations {
        if let Some(regex) = &rule.regex {
            let _ = write!(
                chain,
                ".regex(new RegExp(\"{}\"){})",
                util::escape_ts(regex),
                message_arg(rule)
            );
        }
    }

    if field.required {
        let _ = write!(
            chain,
            ".min(1, \"{} is required\")",
            util::escape_ts(field.resolved_label())
        );
    } else {
        chain.push_str(".nullable().optional()");
    }

    chain
}

fn number_chain(field: &FieldDef) -> String {
    let mut chain = "z.number()".to_owned();

    for rule in &field.validations {
        if let Some(bound) = rule.parsed_range() {
            let msg = message_arg(rule);
            match bound {
                RangeBound::GreaterThan(v) => {
                    let _ = write!(chain, ".gt({}{msg})", util::fmt_num(v));
                }
                RangeBound::AtLeast(v) => {
                    let _ = write!(chain, ".gte({}{msg})", util::fmt_num(v));
                }
                RangeBound::LessThan(v) => {
                    let _ = write!(chain, ".lt({}{msg})", util::fmt_num(v));
                }
                RangeBound::AtMost(v) => {
                    let _ = write!(chain, ".lte({}{msg})", util::fmt_num(v));
                }
                RangeBound::Between(lo, hi) => {
                    let _ = write!(
                        chain,
                        ".min({}{msg}).max({}{msg})",
                        util::fmt_num(lo),
                        util::fmt_num(hi)
                    );
                }
            }
        }
        if let Some(min) = rule.min {
            let _ = write!(chain, ".min({}{})", util::fmt_num(min), message_arg(rule));
        }
        if let Some(max) = rule.max {
            let _ = write!(chain, ".max({}{})", util::fmt_num(max), message_arg(rule));
        }
    }

    if !field.required {
        chain.push_str(".nullable().optional()");
    }

    chain
}

fn message_arg(rule: &entforge_schema::node::ValidationRule) -> String {
    rule.message
        .as_deref()
        .map_or_else(String::new, |message| {
            format!(", \"{}\"", util::escape_ts(message))
        })
}

///
/// TESTS
///
