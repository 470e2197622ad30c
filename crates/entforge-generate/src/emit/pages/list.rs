//! List-page emitter.
//!
//! Paged table over the generated api module. Columns, search, sort
//! defaults and enum filters all come from the list hints, with derived
//! defaults when a hint is absent. Filterable fields that do not resolve to
//! a local enum are skipped; free-text filtering is what search is for.

use crate::{
    config::GenerateConfig,
    emit::{
        ArtifactKind, EmitContext, Emitter, TS_HEADER, client,
        pages::{column_cell, page_dir, route_base},
        util,
    },
};
use entforge_schema::node::{EntityDef, EnumDef, ListUiDef};
use entforge_utils::{pluralize, to_camel_case};
use std::fmt::Write;
use std::path::PathBuf;

pub struct ListPageEmitter;

// One enum-typed filterable field: form state name, query key and the enum
// it selects over.
struct Filter<'a> {
    state: String,
    key: String,
    enum_def: &'a EnumDef,
}

impl Emitter for ListPageEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ListPage
    }

    fn path(&self, entity: &EntityDef, config: &GenerateConfig) -> Option<PathBuf> {
        let dir = config.web_out()?;

        Some(dir.join(page_dir(&entity.entity)).join("list.tsx"))
    }

    fn emit(&self, ctx: &EmitContext<'_>) -> String {
        let entity = ctx.entity;
        let name = &entity.entity;
        let plural = pluralize(name);
        let module = client::module_name(name);
        let base = route_base(name);
        let page_size = util::page_size(entity);
        let searchable = util::searchable_fields(entity);
        let list_hints = entity.ui.as_ref().and_then(|ui| ui.list.as_ref());
        let filters = enum_filters(entity, list_hints);

        let cells: Vec<_> = util::list_columns(entity)
            .iter()
            .filter_map(|column| column_cell(ctx, column, "row"))
            .collect();

        // Label maps for enum columns, plus the enums the filters select
        // over.
        let mut type_imports: Vec<String> = cells
            .iter()
            .filter_map(|cell| cell.enum_labels.clone())
            .collect();
        for filter in &filters {
            type_imports.push(filter.enum_def.name.clone());
            type_imports.push(format!("{}Labels", filter.enum_def.name));
        }
        type_imports.sort();
        type_imports.dedup();

        let mut out = String::new();
        out.push_str(TS_HEADER);
        out.push_str("import { useEffect, useState } from \"react\";\n");
        out.push_str("import { Link } from \"react-router-dom\";\n");
        let _ = writeln!(out, "import {{ list{plural} }} from \"../../api/{module}\";");
        if !type_imports.is_empty() {
            let _ = writeln!(
                out,
                "import {{ {} }} from \"../../types/{module}\";",
                type_imports.join(", ")
            );
        }
        let _ = writeln!(out, "import type {{ {name} }} from \"../../types/{module}\";");
        out.push_str("import type { PaginatedResult } from \"../../../lib/types\";\n\n");

        let _ = writeln!(out, "const PAGE_SIZE = {page_size};\n");

        let _ = writeln!(out, "export default function {name}ListPage() {{");
        let _ = writeln!(
            out,
            "  const [result, setResult] = useState<PaginatedResult<{name}> | null>(null);"
        );
        out.push_str("  const [page, setPage] = useState(1);\n");
        if !searchable.is_empty() {
            out.push_str("  const [search, setSearch] = useState(\"\");\n");
        }
        for filter in &filters {
            let _ = writeln!(
                out,
                "  const [{state}, set{pascal}] = useState(\"\");",
                state = filter.state,
                pascal = pascal(&filter.state),
            );
        }
        out.push('\n');

        fetch_effect(&mut out, &plural, &searchable, &filters, list_hints);

        out.push_str("  return (\n");
        out.push_str("    <div className=\"entity-page\">\n");
        out.push_str("      <header className=\"entity-page-header\">\n");
        let _ = writeln!(
            out,
            "        <h1>{}</h1>",
            util::escape_ts(&util::plural_caption(entity))
        );
        let _ = writeln!(
            out,
            "        <Link to=\"{base}/new\" className=\"btn btn-primary\">New {name}</Link>"
        );
        out.push_str("      </header>\n");

        if !searchable.is_empty() {
            out.push_str("      <input\n");
            out.push_str("        type=\"search\"\n");
            out.push_str("        className=\"entity-search\"\n");
            out.push_str("        placeholder=\"Search…\"\n");
            out.push_str("        value={search}\n");
            out.push_str("        onChange={(e) => {\n");
            out.push_str("          setSearch(e.target.value);\n");
            out.push_str("          setPage(1);\n");
            out.push_str("        }}\n");
            out.push_str("      />\n");
        }

        for filter in &filters {
            filter_select(&mut out, filter);
        }

        out.push_str("      <table className=\"entity-table\">\n");
        out.push_str("        <thead>\n          <tr>\n");
        for cell in &cells {
            let _ = writeln!(out, "            <th>{}</th>", util::escape_ts(&cell.label));
        }
        out.push_str("          </tr>\n        </thead>\n");
        out.push_str("        <tbody>\n");
        out.push_str("          {result?.items.map((row) => (\n");
        out.push_str("            <tr key={row.id}>\n");
        for (i, cell) in cells.iter().enumerate() {
            if i == 0 {
                let _ = writeln!(
                    out,
                    "              <td><Link to={{`{base}/${{row.id}}`}}>{{{}}}</Link></td>",
                    cell.expr
                );
            } else {
                let _ = writeln!(out, "              <td>{{{}}}</td>", cell.expr);
            }
        }
        out.push_str("            </tr>\n");
        out.push_str("          ))}\n");
        out.push_str("        </tbody>\n      </table>\n");

        out.push_str("      <footer className=\"entity-pagination\">\n");
        out.push_str("        <button disabled={page <= 1} onClick={() => setPage(page - 1)}>\n");
        out.push_str("          Previous\n        </button>\n");
        out.push_str("        <span>\n");
        out.push_str(
            "          Page {page} of {result ? Math.max(1, Math.ceil(result.totalCount / PAGE_SIZE)) : 1}\n",
        );
        out.push_str("        </span>\n");
        out.push_str("        <button\n");
        out.push_str("          disabled={!result || page * PAGE_SIZE >= result.totalCount}\n");
        out.push_str("          onClick={() => setPage(page + 1)}\n");
        out.push_str("        >\n");
        out.push_str("          Next\n        </button>\n");
        out.push_str("      </footer>\n");
        out.push_str("    </div>\n");
        out.push_str("  );\n");
        out.push_str("}\n");

        out
    }
}

// Filterable hints that resolve to an enum-typed field on this entity.
fn enum_filters<'a>(entity: &'a EntityDef, hints: Option<&'a ListUiDef>) -> Vec<Filter<'a>> {
    let Some(hints) = hints else {
        return Vec::new();
    };

    hints
        .filterable
        .iter()
        .filter_map(|name| {
            let field = entity.field(name)?;
            let enum_def = entity.field_enum(field)?;

            Some(Filter {
                state: format!("{}Filter", to_camel_case(&field.name)),
                key: to_camel_case(&field.name),
                enum_def,
            })
        })
        .collect()
}

fn fetch_effect(
    out: &mut String,
    plural: &str,
    searchable: &[String],
    filters: &[Filter<'_>],
    hints: Option<&ListUiDef>,
) {
    let mut params = vec!["page".to_owned(), "pageSize: PAGE_SIZE".to_owned()];
    let mut deps = vec!["page".to_owned()];

    if let Some(sort) = hints.and_then(|h| h.default_sort.as_deref()) {
        params.push(format!("sort: \"{}\"", to_camel_case(sort)));
        if let Some(dir) = hints.and_then(|h| h.default_sort_dir.as_deref()) {
            params.push(format!("sortDir: \"{}\"", util::escape_ts(dir)));
        }
    }
    if !searchable.is_empty() {
        params.push("search".to_owned());
        deps.push("search".to_owned());
    }
    for filter in filters {
        params.push(format!(
            "{key}: {state} === \"\" ? undefined : Number({state})",
            key = filter.key,
            state = filter.state,
        ));
        deps.push(filter.state.clone());
    }

    out.push_str("  useEffect(() => {\n");
    let _ = writeln!(out, "    void list{plural}({{");
    for param in &params {
        let _ = writeln!(out, "      {param},");
    }
    out.push_str("    }).then(setResult);\n");
    let _ = writeln!(out, "  }}, [{}]);\n", deps.join(", "));
}

fn filter_select(out: &mut String, filter: &Filter<'_>) {
    let enum_name = &filter.enum_def.name;

    out.push_str("      <select\n");
    out.push_str("        className=\"entity-filter\"\n");
    let _ = writeln!(out, "        value={{{}}}", filter.state);
    out.push_str("        onChange={(e) => {\n");
    let _ = writeln!(out, "          set{}(e.target.value);", pascal(&filter.state));
    out.push_str("          setPage(1);\n");
    out.push_str("        }}\n");
    out.push_str("      >\n");
    out.push_str("        <option value=\"\">All</option>\n");
    for member in &filter.enum_def.members {
        let _ = writeln!(
            out,
            "        <option value={{{enum_name}.{m}}}>{{{enum_name}Labels[{enum_name}.{m}]}}</option>",
            m = member.name,
        );
    }
    out.push_str("      </select>\n");
}

// Capitalize the first ASCII letter; state setters are `set` + this.
fn pascal(name: &str) -> String {
    let mut chars = name.chars();

    chars.next().map_or_else(String::new, |first| {
        format!("{}{}", first.to_ascii_uppercase(), chars.as_str())
    })
}

///
/// TESTS
///
