//! Persistence-object emitter.
//!
//! One XPO-style persistent class per entity: columns with validation
//! attributes, association properties for explicit relations (override
//! applied) and synthesized reverses, local enums, and business-rule hooks
//! wired into the persistence lifecycle.

use crate::{
    config::GenerateConfig,
    emit::{ArtifactKind, CS_HEADER, EmitContext, Emitter, util},
    resolve::ReverseAssociation,
};
use entforge_schema::{
    node::{EntityDef, EnumDef, FieldDef, RangeBound, RelationDef, ValidationRule},
    types::{CalculationKind, FieldType, RelationKind},
};
use crate::emit::util::fmt_num;
use entforge_utils::to_camel_case;
use std::fmt::Write;
use std::path::PathBuf;

pub struct PersistenceEmitter;

impl Emitter for PersistenceEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Persistence
    }

    fn path(&self, entity: &EntityDef, config: &GenerateConfig) -> Option<PathBuf> {
        Some(
            config
                .server_out
                .join(format!("{}.Generated.cs", entity.entity)),
        )
    }

    fn emit(&self, ctx: &EmitContext<'_>) -> String {
        let entity = ctx.entity;
        let mut out = String::new();

        out.push_str(CS_HEADER);
        out.push_str(
            "using System;\n\
             using System.ComponentModel;\n\
             using DevExpress.Persistent.Base;\n\
             using DevExpress.Persistent.Validation;\n\
             using DevExpress.Xpo;\n\n",
        );
        let _ = writeln!(out, "namespace {};\n", ctx.config.namespace);

        class_attributes(&mut out, entity);
        let _ = writeln!(out, "public partial class {} : XPObject", entity.entity);
        out.push_str("{\n");
        let _ = writeln!(
            out,
            "    public {}(Session session) : base(session) {{ }}\n",
            entity.entity
        );

        after_construction(&mut out, entity);

        for field in &entity.fields {
            field_member(&mut out, entity, field);
        }

        for relation in &entity.relations {
            match relation.kind {
                RelationKind::Reference => reference_member(&mut out, ctx, relation),
                RelationKind::Detail => detail_member(&mut out, ctx, relation),
            }
        }

        for reverse in ctx.reverses {
            reverse_member(&mut out, reverse);
        }

        rule_hooks(&mut out, entity);

        out.push_str("}\n");

        for enum_def in &entity.enums {
            enum_decl(&mut out, enum_def);
        }

        out
    }
}

fn class_attributes(out: &mut String, entity: &EntityDef) {
    let _ = writeln!(
        out,
        "[Persistent(\"{}\")]",
        util::escape_cs(entity.resolved_table())
    );
    out.push_str("[DefaultClassOptions]\n");

    if let Some(description) = &entity.description {
        let _ = writeln!(out, "[Description(\"{}\")]", util::escape_cs(description));
    }

    // Class-level rules: detail min-counts and free-form field criteria.
    for relation in &entity.relations {
        if relation.kind != RelationKind::Detail {
            continue;
        }
        let Some(min) = relation.min_count else {
            continue;
        };
        let _ = writeln!(
            out,
            "[RuleCriteria(\"{entity}.{name}.MinCount\", DefaultContexts.Save, \"{name}.Count >= {min}\", \"{entity} requires at least {min} {name}\")]",
            entity = entity.entity,
            name = relation.name,
        );
    }

    for field in &entity.fields {
        for (i, rule) in field.validations.iter().enumerate() {
            let Some(criteria) = &rule.criteria else {
                continue;
            };
            let _ = writeln!(
                out,
                "[RuleCriteria(\"{}.{}.Criteria{}\", DefaultContexts.Save, \"{}\"{})]",
                entity.entity,
                field.name,
                i + 1,
                util::escape_cs(criteria),
                message_arg(rule),
            );
        }
    }
}

// Assign declared defaults when a fresh object is constructed.
fn after_construction(out: &mut String, entity: &EntityDef) {
    let defaults: Vec<(String, String)> = entity
        .fields
        .iter()
        .filter(|f| !f.is_computed())
        .filter_map(|f| cs_default(entity, f).map(|value| (f.name.clone(), value)))
        .collect();

    if defaults.is_empty() {
        return;
    }

    out.push_str("    public override void AfterConstruction()\n    {\n");
    out.push_str("        base.AfterConstruction();\n");
    for (name, value) in defaults {
        let _ = writeln!(out, "        {name} = {value};");
    }
    out.push_str("    }\n\n");
}

fn cs_default(entity: &EntityDef, field: &FieldDef) -> Option<String> {
    let default = field.default.as_deref()?;

    if let Some(enum_def) = entity.field_enum(field) {
        let member = enum_def.member(default)?;
        return Some(format!("{}.{}", enum_def.name, member.name));
    }

    let value = match field.ty {
        FieldType::Text | FieldType::Other(_) => format!("\"{}\"", util::escape_cs(default)),
        FieldType::Bool => default.to_ascii_lowercase(),
        FieldType::DateTime if default.eq_ignore_ascii_case("now") => "DateTime.Now".to_owned(),
        FieldType::DateTime if default.eq_ignore_ascii_case("today") => "DateTime.Today".to_owned(),
        FieldType::DateTime => format!("DateTime.Parse(\"{}\")", util::escape_cs(default)),
        FieldType::Guid => format!("Guid.Parse(\"{}\")", util::escape_cs(default)),
        FieldType::Decimal => format!("{default}m"),
        FieldType::Int | FieldType::Double => default.to_owned(),
    };

    Some(value)
}

fn field_member(out: &mut String, entity: &EntityDef, field: &FieldDef) {
    if let Some(kind) = field.calculation_kind() {
        computed_member(out, entity, field, kind);
        return;
    }

    let ty = util::cs_type(entity, field);
    let backing = format!("_{}", to_camel_case(&field.name));

    let _ = writeln!(out, "    {ty} {backing};");

    if let Some(length) = field.length {
        let _ = writeln!(out, "    [Size({length})]");
    }
    if field.required {
        let _ = writeln!(
            out,
            "    [RuleRequiredField(\"{}.{}.Required\", DefaultContexts.Save)]",
            entity.entity, field.name
        );
    }
    if field.readonly {
        out.push_str("    [ModelDefault(\"AllowEdit\", \"False\")]\n");
    }
    if let Some(description) = &field.description {
        let _ = writeln!(
            out,
            "    [Description(\"{}\")]",
            util::escape_cs(description)
        );
    }
    for (i, rule) in field.validations.iter().enumerate() {
        validation_attribute(out, entity, field, i, rule);
    }

    let _ = writeln!(out, "    public {ty} {name}", name = field.name);
    out.push_str("    {\n");
    let _ = writeln!(out, "        get => {backing};");
    let _ = writeln!(
        out,
        "        set => SetPropertyValue(nameof({}), ref {backing}, value);",
        field.name
    );
    out.push_str("    }\n\n");
}

fn computed_member(out: &mut String, entity: &EntityDef, field: &FieldDef, kind: CalculationKind) {
    let ty = util::cs_type(entity, field);
    let formula = field.formula.as_deref().unwrap_or_default();

    if let Some(description) = &field.description {
        let _ = writeln!(
            out,
            "    [Description(\"{}\")]",
            util::escape_cs(description)
        );
    }

    match kind {
        CalculationKind::Persistent => {
            let _ = writeln!(
                out,
                "    [PersistentAlias(\"{}\")]",
                util::escape_cs(formula)
            );
            let _ = writeln!(
                out,
                "    public {ty} {name} => ({ty})(EvaluateAlias(nameof({name})) ?? default({ty}));",
                name = field.name
            );
        }
        CalculationKind::Getter => {
            let _ = writeln!(out, "    public {ty} {name} => {formula};", name = field.name);
        }
    }

    out.push('\n');
}

fn validation_attribute(
    out: &mut String,
    entity: &EntityDef,
    field: &FieldDef,
    index: usize,
    rule: &ValidationRule,
) {
    let id = format!("{}.{}.Rule{}", entity.entity, field.name, index + 1);
    let msg = message_arg(rule);

    if let Some(bound) = rule.parsed_range() {
        range_attribute(out, &id, bound, &msg);
    } else {
        match (rule.min, rule.max) {
            (Some(min), Some(max)) => {
                let _ = writeln!(
                    out,
                    "    [RuleRange(\"{id}\", DefaultContexts.Save, {}, {}{msg})]",
                    fmt_num(min),
                    fmt_num(max)
                );
            }
            (Some(min), None) => {
                let _ = writeln!(
                    out,
                    "    [RuleValueComparison(\"{id}\", DefaultContexts.Save, ValueComparisonType.GreaterThanOrEqual, {}{msg})]",
                    fmt_num(min)
                );
            }
            (None, Some(max)) => {
                let _ = writeln!(
                    out,
                    "    [RuleValueComparison(\"{id}\", DefaultContexts.Save, ValueComparisonType.LessThanOrEqual, {}{msg})]",
                    fmt_num(max)
                );
            }
            (None, None) => {}
        }
    }

    if let Some(regex) = &rule.regex {
        let _ = writeln!(
            out,
            "    [RuleRegularExpression(\"{id}.Format\", DefaultContexts.Save, @\"{}\"{msg})]",
            regex.replace('"', "\"\"")
        );
    }
}

fn range_attribute(out: &mut String, id: &str, bound: RangeBound, msg: &str) {
    let comparison = |op: &str, value: f64| {
        format!(
            "    [RuleValueComparison(\"{id}\", DefaultContexts.Save, ValueComparisonType.{op}, {}{msg})]\n",
            fmt_num(value)
        )
    };

    match bound {
        RangeBound::GreaterThan(v) => out.push_str(&comparison("GreaterThan", v)),
        RangeBound::AtLeast(v) => out.push_str(&comparison("GreaterThanOrEqual", v)),
        RangeBound::LessThan(v) => out.push_str(&comparison("LessThan", v)),
        RangeBound::AtMost(v) => out.push_str(&comparison("LessThanOrEqual", v)),
        RangeBound::Between(lo, hi) => {
            let _ = writeln!(
                out,
                "    [RuleRange(\"{id}\", DefaultContexts.Save, {}, {}{msg})]",
                fmt_num(lo),
                fmt_num(hi)
            );
        }
    }
}

fn message_arg(rule: &ValidationRule) -> String {
    rule.message.as_deref().map_or_else(String::new, |message| {
        format!(
            ", CustomMessageTemplate = \"{}\"",
            util::escape_cs(message)
        )
    })
}

fn reference_member(out: &mut String, ctx: &EmitContext<'_>, relation: &RelationDef) {
    let entity = ctx.entity;
    let backing = format!("_{}", to_camel_case(&relation.name));
    let ty = &relation.target;

    let _ = writeln!(out, "    {ty} {backing};");
    let _ = writeln!(
        out,
        "    [Association(\"{}\")]",
        util::escape_cs(&ctx.association_for(relation))
    );
    if relation.required {
        let _ = writeln!(
            out,
            "    [RuleRequiredField(\"{}.{}.Required\", DefaultContexts.Save)]",
            entity.entity, relation.name
        );
    }
    if let Some(description) = &relation.description {
        let _ = writeln!(
            out,
            "    [Description(\"{}\")]",
            util::escape_cs(description)
        );
    }

    let _ = writeln!(out, "    public {ty} {name}", name = relation.name);
    out.push_str("    {\n");
    let _ = writeln!(out, "        get => {backing};");
    let _ = writeln!(
        out,
        "        set => SetPropertyValue(nameof({}), ref {backing}, value);",
        relation.name
    );
    out.push_str("    }\n\n");
}

fn detail_member(out: &mut String, ctx: &EmitContext<'_>, relation: &RelationDef) {
    let aggregated = relation
        .cascade
        .as_deref()
        .is_some_and(|cascade| cascade.eq_ignore_ascii_case("delete"));
    let marker = if aggregated { ", Aggregated" } else { "" };

    let _ = writeln!(
        out,
        "    [Association(\"{}\"){marker}]",
        util::escape_cs(&ctx.association_for(relation))
    );
    if let Some(description) = &relation.description {
        let _ = writeln!(
            out,
            "    [Description(\"{}\")]",
            util::escape_cs(description)
        );
    }
    let _ = writeln!(
        out,
        "    public XPCollection<{target}> {name} => GetCollection<{target}>(nameof({name}));\n",
        target = relation.target,
        name = relation.name,
    );
}

fn reverse_member(out: &mut String, reverse: &ReverseAssociation) {
    let _ = writeln!(
        out,
        "    [Association(\"{}\")]",
        util::escape_cs(&reverse.association)
    );

    if reverse.collection {
        let _ = writeln!(
            out,
            "    public XPCollection<{source}> {name} => GetCollection<{source}>(nameof({name}));\n",
            source = reverse.source_entity,
            name = reverse.property_name,
        );
    } else {
        let backing = format!("_{}", to_camel_case(&reverse.property_name));
        let _ = writeln!(out, "    {} {backing};", reverse.source_entity);
        let _ = writeln!(
            out,
            "    public {ty} {name}",
            ty = reverse.source_entity,
            name = reverse.property_name
        );
        out.push_str("    {\n");
        let _ = writeln!(out, "        get => {backing};");
        let _ = writeln!(
            out,
            "        set => SetPropertyValue(nameof({}), ref {backing}, value);",
            reverse.property_name
        );
        out.push_str("    }\n\n");
    }
}

// Lifecycle overrides the known triggers map onto, in emission order.
const TRIGGER_OVERRIDES: &[(&str, &str)] = &[
    ("BeforeSave", "OnSaving"),
    ("AfterSave", "OnSaved"),
    ("BeforeDelete", "OnDeleting"),
    ("AfterDelete", "OnDeleted"),
];

fn rule_hooks(out: &mut String, entity: &EntityDef) {
    if entity.rules.is_empty() {
        return;
    }

    for (trigger, hook) in TRIGGER_OVERRIDES {
        let scripts: Vec<&str> = entity
            .rules
            .iter()
            .filter(|r| r.trigger.eq_ignore_ascii_case(trigger))
            .map(|r| r.script.as_str())
            .collect();
        if scripts.is_empty() {
            continue;
        }

        let _ = writeln!(out, "    protected override void {hook}()");
        out.push_str("    {\n");
        let _ = writeln!(out, "        base.{hook}();");
        for script in scripts {
            let _ = writeln!(out, "        {script}();");
        }
        out.push_str("    }\n\n");
    }

    for rule in &entity.rules {
        let _ = writeln!(out, "    partial void {}();", rule.script);
    }
}

fn enum_decl(out: &mut String, enum_def: &EnumDef) {
    out.push('\n');
    if let Some(description) = &enum_def.description {
        let _ = writeln!(out, "[Description(\"{}\")]", util::escape_cs(description));
    }
    let _ = writeln!(out, "public enum {}", enum_def.name);
    out.push_str("{\n");

    let mut next_value = 0;
    for member in &enum_def.members {
        let value = member.value.unwrap_or(next_value);
        next_value = value + 1;

        if let Some(description) = &member.description {
            let _ = writeln!(out, "    [Description(\"{}\")]", util::escape_cs(description));
        }
        if let Some(label) = &member.label {
            let _ = writeln!(out, "    [XafDisplayName(\"{}\")]", util::escape_cs(label));
        }
        let _ = writeln!(out, "    {} = {value},", member.name);
    }

    out.push_str("}\n");
}

///
/// TESTS
///
