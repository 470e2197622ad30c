//! Form-page emitter.
//!
//! Create/edit form over the generated zod schema (react-hook-form with the
//! zod resolver). Layout rows follow the form hint; reference relations not
//! named by a hint row are appended so every editable association is
//! reachable.

use crate::{
    config::GenerateConfig,
    emit::{
        ArtifactKind, EmitContext, Emitter, TS_HEADER, client,
        pages::{page_dir, route_base},
        util::{self, InputKind},
    },
};
use entforge_schema::node::{EntityDef, FieldDef, RelationDef};
use entforge_schema::types::RelationKind;
use entforge_utils::to_camel_case;
use std::fmt::Write;
use std::path::PathBuf;

pub struct FormPageEmitter;

impl Emitter for FormPageEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::FormPage
    }

    fn path(&self, entity: &EntityDef, config: &GenerateConfig) -> Option<PathBuf> {
        let dir = config.web_out()?;

        Some(dir.join(page_dir(&entity.entity)).join("form.tsx"))
    }

    fn emit(&self, ctx: &EmitContext<'_>) -> String {
        let entity = ctx.entity;
        let name = &entity.entity;
        let module = client::module_name(name);
        let base = route_base(name);
        let schema = format!("{}Schema", to_camel_case(name));
        let rows = effective_rows(entity);

        let mut enum_imports: Vec<&str> = entity
            .fields
            .iter()
            .filter(|f| !f.is_computed() && !f.readonly)
            .filter_map(|f| entity.field_enum(f).map(|e| e.name.as_str()))
            .collect();
        enum_imports.sort_unstable();
        enum_imports.dedup();

        let has_references = rows
            .iter()
            .flatten()
            .any(|cell| matches!(cell, FormCell::Reference(_)));

        let mut out = String::new();
        out.push_str(TS_HEADER);
        out.push_str("import { useEffect } from \"react\";\n");
        out.push_str("import { useForm } from \"react-hook-form\";\n");
        out.push_str("import { zodResolver } from \"@hookform/resolvers/zod\";\n");
        out.push_str("import { useNavigate, useParams } from \"react-router-dom\";\n");
        let _ = writeln!(
            out,
            "import {{ create{name}, get{name}, update{name} }} from \"../../api/{module}\";"
        );
        let _ = writeln!(out, "import {{ {schema} }} from \"../../schemas/{module}\";");
        let _ = writeln!(
            out,
            "import type {{ {name}FormValues }} from \"../../schemas/{module}\";"
        );
        if !enum_imports.is_empty() {
            let with_labels: Vec<String> = enum_imports
                .iter()
                .flat_map(|e| [(*e).to_owned(), format!("{e}Labels")])
                .collect();
            let _ = writeln!(
                out,
                "import {{ {} }} from \"../../types/{module}\";",
                with_labels.join(", ")
            );
        }
        if has_references {
            out.push_str(
                "import { ReferenceSelect } from \"../../../components/shared/ReferenceSelect\";\n",
            );
        }
        out.push('\n');

        default_values(&mut out, entity);

        let _ = writeln!(out, "export default function {name}FormPage() {{");
        out.push_str("  const { id } = useParams();\n");
        out.push_str("  const navigate = useNavigate();\n");
        out.push_str("  const {\n");
        out.push_str("    register,\n");
        out.push_str("    handleSubmit,\n");
        out.push_str("    reset,\n");
        out.push_str("    formState: { errors, isSubmitting },\n");
        let _ = writeln!(out, "  }} = useForm<{name}FormValues>({{");
        let _ = writeln!(out, "    resolver: zodResolver({schema}),");
        out.push_str("    defaultValues: DEFAULT_VALUES,\n");
        out.push_str("  });\n\n");

        out.push_str("  useEffect(() => {\n");
        out.push_str("    if (!id) return;\n");
        let _ = writeln!(
            out,
            "    void get{name}(Number(id)).then((data) => reset({schema}.parse(data)));"
        );
        out.push_str("  }, [id, reset]);\n\n");

        out.push_str("  const onSubmit = handleSubmit(async (values) => {\n");
        out.push_str("    if (id) {\n");
        let _ = writeln!(out, "      await update{name}(Number(id), values);");
        out.push_str("    } else {\n");
        let _ = writeln!(out, "      await create{name}(values);");
        out.push_str("    }\n");
        let _ = writeln!(out, "    navigate(\"{base}\");");
        out.push_str("  });\n\n");

        out.push_str("  return (\n");
        out.push_str("    <form className=\"entity-form\" onSubmit={onSubmit}>\n");
        let _ = writeln!(
            out,
            "      <h1>{{id ? \"Edit {name}\" : \"New {name}\"}}</h1>"
        );

        for row in &rows {
            out.push_str("      <div className=\"form-row\">\n");
            for cell in row {
                match cell {
                    FormCell::Field(field) => field_input(&mut out, entity, field),
                    FormCell::Reference(relation) => reference_input(&mut out, relation),
                }
            }
            out.push_str("      </div>\n");
        }

        out.push_str("      <footer className=\"form-actions\">\n");
        out.push_str("        <button type=\"submit\" disabled={isSubmitting}>\n");
        out.push_str("          Save\n        </button>\n");
        let _ = writeln!(
            out,
            "        <button type=\"button\" onClick={{() => navigate(\"{base}\")}}>"
        );
        out.push_str("          Cancel\n        </button>\n");
        out.push_str("      </footer>\n");
        out.push_str("    </form>\n");
        out.push_str("  );\n");
        out.push_str("}\n");

        out
    }
}

enum FormCell<'a> {
    Field(&'a FieldDef),
    Reference(&'a RelationDef),
}

// Hint rows resolved against the entity, then unmentioned reference
// relations appended one per row.
fn effective_rows(entity: &EntityDef) -> Vec<Vec<FormCell<'_>>> {
    let hinted = util::form_rows(entity);
    let mut rows: Vec<Vec<FormCell<'_>>> = Vec::new();
    let mut seen_relations: Vec<&str> = Vec::new();

    for names in &hinted {
        let mut row = Vec::new();
        for cell_name in names {
            if let Some(field) = entity.field(cell_name) {
                if field.is_computed() || field.readonly {
                    continue;
                }
                row.push(FormCell::Field(field));
            } else if let Some(relation) = entity.relation(cell_name) {
                if relation.kind == RelationKind::Reference {
                    seen_relations.push(relation.name.as_str());
                    row.push(FormCell::Reference(relation));
                }
            }
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }

    for relation in &entity.relations {
        if relation.kind != RelationKind::Reference {
            continue;
        }
        if seen_relations
            .iter()
            .any(|seen| seen.eq_ignore_ascii_case(&relation.name))
        {
            continue;
        }
        rows.push(vec![FormCell::Reference(relation)]);
    }

    rows
}

fn default_values(out: &mut String, entity: &EntityDef) {
    let _ = writeln!(
        out,
        "const DEFAULT_VALUES: Partial<{}FormValues> = {{",
        entity.entity
    );
    for field in &entity.fields {
        if field.is_computed() || field.readonly {
            continue;
        }
        let _ = writeln!(
            out,
            "  {}: {},",
            to_camel_case(&field.name),
            util::client_default(entity, field)
        );
    }
    out.push_str("};\n\n");
}

fn field_input(out: &mut String, entity: &EntityDef, field: &FieldDef) {
    let name = to_camel_case(&field.name);
    let label = field.resolved_label();

    out.push_str("        <label>\n");
    let _ = writeln!(out, "          {}", util::escape_ts(label));

    match util::input_kind(entity, field) {
        InputKind::Text => {
            let _ = writeln!(out, "          <input type=\"text\" {{...register(\"{name}\")}} />");
        }
        InputKind::Textarea => {
            let _ = writeln!(out, "          <textarea {{...register(\"{name}\")}} />");
        }
        InputKind::Number => {
            let _ = writeln!(
                out,
                "          <input type=\"number\" {{...register(\"{name}\", {{ valueAsNumber: true }})}} />"
            );
        }
        InputKind::Boolean => {
            let _ = writeln!(
                out,
                "          <input type=\"checkbox\" {{...register(\"{name}\")}} />"
            );
        }
        InputKind::Date => {
            let _ = writeln!(out, "          <input type=\"date\" {{...register(\"{name}\")}} />");
        }
        InputKind::Select => {
            let enum_def = entity.field_enum(field).expect("select implies local enum");
            let _ = writeln!(
                out,
                "          <select {{...register(\"{name}\", {{ valueAsNumber: true }})}}>"
            );
            for member in &enum_def.members {
                let _ = writeln!(
                    out,
                    "            <option value={{{e}.{m}}}>{{{e}Labels[{e}.{m}]}}</option>",
                    e = enum_def.name,
                    m = member.name,
                );
            }
            out.push_str("          </select>\n");
        }
    }

    error_span(out, &name);
    out.push_str("        </label>\n");
}

fn reference_input(out: &mut String, relation: &RelationDef) {
    let fk = util::fk_property(&relation.name);

    out.push_str("        <label>\n");
    let _ = writeln!(out, "          {}", util::escape_ts(relation.resolved_label()));
    out.push_str("          <ReferenceSelect\n");
    let _ = writeln!(
        out,
        "            entity=\"{}\"",
        client::module_name(&relation.target)
    );
    if let Some(lookup) = &relation.lookup_field {
        let _ = writeln!(out, "            lookupField=\"{}\"", to_camel_case(lookup));
    }
    let _ = writeln!(
        out,
        "            {{...register(\"{fk}\", {{ valueAsNumber: true }})}}"
    );
    out.push_str("          />\n");
    error_span(out, &fk);
    out.push_str("        </label>\n");
}

fn error_span(out: &mut String, name: &str) {
    let _ = writeln!(
        out,
        "          {{errors.{name} && <span className=\"field-error\">{{errors.{name}.message}}</span>}}"
    );
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::testutil::Fixture;

    #[test]
    fn form_registers_every_editable_field() {
        let fixture = Fixture::new();
        let code = FormPageEmitter.emit(&fixture.context("Order"));

        assert!(code.contains("export default function OrderFormPage() {"));
        assert!(code.contains("resolver: zodResolver(orderSchema),"));
        assert!(code.contains("<input type=\"text\" {...register(\"orderNumber\")} />"));
        assert!(code.contains("<textarea {...register(\"notes\")} />"));
        // Readonly computed total never reaches the form.
        assert!(!code.contains("totalAmount"));
    }

    #[test]
    fn enum_field_renders_a_labelled_select() {
        let fixture = Fixture::new();
        let code = FormPageEmitter.emit(&fixture.context("Order"));

        assert!(code.contains("<select {...register(\"status\", { valueAsNumber: true })}>"));
        assert!(code.contains("<option value={OrderStatus.Draft}>{OrderStatusLabels[OrderStatus.Draft]}</option>"));
    }

    #[test]
    fn reference_renders_a_lookup_select_bound_to_the_fk() {
        let fixture = Fixture::new();
        let code = FormPageEmitter.emit(&fixture.context("Order"));

        assert!(code.contains("<ReferenceSelect"));
        assert!(code.contains("entity=\"customer\""));
        assert!(code.contains("lookupField=\"name\""));
        assert!(code.contains("{...register(\"customerId\", { valueAsNumber: true })}"));
    }

    #[test]
    fn defaults_carry_enum_and_literal_initials() {
        let fixture = Fixture::new();
        let code = FormPageEmitter.emit(&fixture.context("Order"));

        assert!(code.contains("const DEFAULT_VALUES: Partial<OrderFormValues> = {"));
        assert!(code.contains("  status: OrderStatus.Draft,"));
        assert!(code.contains("  orderNumber: \"\","));
    }

    #[test]
    fn submit_branches_between_create_and_update() {
        let fixture = Fixture::new();
        let code = FormPageEmitter.emit(&fixture.context("Order"));

        assert!(code.contains("await updateOrder(Number(id), values);"));
        assert!(code.contains("await createOrder(values);"));
        assert!(code.contains("navigate(\"/orders\");"));
    }
}
