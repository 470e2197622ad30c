//! Detail-page emitter.
//!
//! Read-only view: scalar sections as definition lists, detail relations as
//! embedded tables. Section layout follows the detail hint, defaulting to
//! one "General" section plus one table per detail relation.

use crate::{
    config::GenerateConfig,
    emit::{
        ArtifactKind, EmitContext, Emitter, TS_HEADER, client,
        pages::{column_cell, page_dir, route_base},
        util,
    },
};
use entforge_schema::node::{DetailSection, EntityDef, RelationDef};
use entforge_schema::types::RelationKind;
use entforge_utils::to_camel_case;
use std::fmt::Write;
use std::path::PathBuf;

pub struct DetailPageEmitter;

impl Emitter for DetailPageEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::DetailPage
    }

    fn path(&self, entity: &EntityDef, config: &GenerateConfig) -> Option<PathBuf> {
        let dir = config.web_out()?;

        Some(dir.join(page_dir(&entity.entity)).join("detail.tsx"))
    }

    fn emit(&self, ctx: &EmitContext<'_>) -> String {
        let entity = ctx.entity;
        let name = &entity.entity;
        let module = client::module_name(name);
        let base = route_base(name);
        let sections = effective_sections(entity);

        // Label maps needed by the scalar sections.
        let mut label_imports: Vec<String> = Vec::new();
        for section in &sections {
            if let Some(fields) = &section.fields {
                for field in fields {
                    if let Some(cell) = column_cell(ctx, field, "entity") {
                        if let Some(labels) = cell.enum_labels {
                            label_imports.push(labels);
                        }
                    }
                }
            }
        }
        label_imports.sort();
        label_imports.dedup();

        let has_tables = sections
            .iter()
            .any(|section| relation_of(entity, section).is_some());

        let mut out = String::new();
        out.push_str(TS_HEADER);
        out.push_str("import { useEffect, useState } from \"react\";\n");
        out.push_str("import { Link, useNavigate, useParams } from \"react-router-dom\";\n");
        let _ = writeln!(
            out,
            "import {{ delete{name}, get{name} }} from \"../../api/{module}\";"
        );
        if !label_imports.is_empty() {
            let _ = writeln!(
                out,
                "import {{ {} }} from \"../../types/{module}\";",
                label_imports.join(", ")
            );
        }
        let _ = writeln!(out, "import type {{ {name} }} from \"../../types/{module}\";");
        if has_tables {
            out.push_str(
                "import { InlineDetailTable } from \"../../../components/shared/InlineDetailTable\";\n",
            );
        }
        out.push('\n');

        let _ = writeln!(out, "export default function {name}DetailPage() {{");
        out.push_str("  const { id } = useParams();\n");
        out.push_str("  const navigate = useNavigate();\n");
        let _ = writeln!(
            out,
            "  const [entity, setEntity] = useState<{name} | null>(null);\n"
        );

        out.push_str("  useEffect(() => {\n");
        let _ = writeln!(out, "    if (id) void get{name}(Number(id)).then(setEntity);");
        out.push_str("  }, [id]);\n\n");

        out.push_str("  if (!entity) {\n");
        out.push_str("    return <div className=\"entity-page\">Loading…</div>;\n");
        out.push_str("  }\n\n");

        out.push_str("  const handleDelete = async () => {\n");
        let _ = writeln!(out, "    await delete{name}(entity.id);");
        let _ = writeln!(out, "    navigate(\"{base}\");");
        out.push_str("  };\n\n");

        out.push_str("  return (\n");
        out.push_str("    <div className=\"entity-page\">\n");
        out.push_str("      <header className=\"entity-page-header\">\n");
        let _ = writeln!(
            out,
            "        <h1>{} #{{entity.id}}</h1>",
            util::escape_ts(entity.resolved_caption())
        );
        out.push_str("        <div className=\"entity-actions\">\n");
        let _ = writeln!(
            out,
            "          <Link to={{`{base}/${{entity.id}}/edit`}} className=\"btn\">"
        );
        out.push_str("            Edit\n          </Link>\n");
        out.push_str("          <button className=\"btn btn-danger\" onClick={handleDelete}>\n");
        out.push_str("            Delete\n          </button>\n");
        out.push_str("        </div>\n");
        out.push_str("      </header>\n");

        for section in &sections {
            emit_section(&mut out, ctx, section);
        }

        out.push_str("    </div>\n");
        out.push_str("  );\n");
        out.push_str("}\n");

        out
    }
}

// Hinted sections, or "General" with every field plus one table per detail
// relation.
fn effective_sections(entity: &EntityDef) -> Vec<DetailSection> {
    if let Some(sections) = entity
        .ui
        .as_ref()
        .and_then(|ui| ui.detail.as_ref())
        .map(|detail| &detail.sections)
        .filter(|sections| !sections.is_empty())
    {
        return sections.clone();
    }

    let mut sections = vec![DetailSection {
        title: "General".to_owned(),
        fields: Some(entity.fields.iter().map(|f| f.name.clone()).collect()),
        relation: None,
    }];

    for relation in &entity.relations {
        if relation.kind != RelationKind::Detail {
            continue;
        }
        sections.push(DetailSection {
            title: relation.resolved_label().to_owned(),
            fields: None,
            relation: Some(relation.name.clone()),
        });
    }

    sections
}

fn relation_of<'a>(entity: &'a EntityDef, section: &DetailSection) -> Option<&'a RelationDef> {
    let name = section.relation.as_deref()?;

    entity
        .relation(name)
        .filter(|r| r.kind == RelationKind::Detail)
}

fn emit_section(out: &mut String, ctx: &EmitContext<'_>, section: &DetailSection) {
    out.push_str("      <section className=\"detail-section\">\n");
    let _ = writeln!(out, "        <h2>{}</h2>", util::escape_ts(&section.title));

    if let Some(fields) = &section.fields {
        out.push_str("        <dl className=\"detail-grid\">\n");
        for field in fields {
            let Some(cell) = column_cell(ctx, field, "entity") else {
                continue;
            };
            out.push_str("          <div>\n");
            let _ = writeln!(out, "            <dt>{}</dt>", util::escape_ts(&cell.label));
            let _ = writeln!(out, "            <dd>{{{}}}</dd>", cell.expr);
            out.push_str("          </div>\n");
        }
        out.push_str("        </dl>\n");
    }

    if let Some(relation) = relation_of(ctx.entity, section) {
        let rows = to_camel_case(&relation.name);
        let columns: Vec<String> = ctx.set.get(&relation.target).map_or_else(Vec::new, |target| {
            target
                .fields
                .iter()
                .filter(|f| !f.is_computed())
                .map(|f| format!("\"{}\"", to_camel_case(&f.name)))
                .collect()
        });

        out.push_str("        <InlineDetailTable\n");
        let _ = writeln!(out, "          rows={{entity.{rows} ?? []}}");
        let _ = writeln!(out, "          columns={{[{}]}}", columns.join(", "));
        out.push_str("        />\n");
    }

    out.push_str("      </section>\n");
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::testutil::Fixture;

    #[test]
    fn hinted_sections_render_fields_and_tables() {
        let fixture = Fixture::new();
        let code = DetailPageEmitter.emit(&fixture.context("Order"));

        assert!(code.contains("export default function OrderDetailPage() {"));
        assert!(code.contains("<h2>General</h2>"));
        assert!(code.contains("<dt>OrderNumber</dt>"));
        assert!(code.contains("<dd>{entity.orderNumber}</dd>"));
        assert!(code.contains("<dd>{OrderStatusLabels[entity.status]}</dd>"));
        assert!(code.contains("<h2>Items</h2>"));
        assert!(code.contains("rows={entity.items ?? []}"));
        assert!(code.contains("columns={[\"quantity\", \"unitPrice\"]}"));
    }

    #[test]
    fn default_sections_cover_all_fields_when_no_hint() {
        let fixture = Fixture::new();
        let code = DetailPageEmitter.emit(&fixture.context("OrderItem"));

        assert!(code.contains("<h2>General</h2>"));
        assert!(code.contains("<dt>Quantity</dt>"));
        assert!(code.contains("<dt>LineTotal</dt>"));
        assert!(!code.contains("InlineDetailTable"));
    }

    #[test]
    fn delete_returns_to_the_list_route() {
        let fixture = Fixture::new();
        let code = DetailPageEmitter.emit(&fixture.context("Order"));

        assert!(code.contains("await deleteOrder(entity.id);"));
        assert!(code.contains("navigate(\"/orders\");"));
        assert!(code.contains("<Link to={`/orders/${entity.id}/edit`} className=\"btn\">"));
    }
}
