//! Cross-entity manifests: navigation and routes.
//!
//! Unlike the per-entity family these run once over the complete working
//! set, after every entity's own artifacts are written. Entity order in
//! both manifests is load order, so output is stable for a stable source
//! tree.

use crate::{
    config::GenerateConfig,
    emit::{TS_HEADER, pages::route_base, util},
};
use entforge_schema::set::EntitySet;
use entforge_utils::to_kebab_case;
use std::fmt::Write;
use std::path::PathBuf;

#[must_use]
pub fn navigation_path(config: &GenerateConfig) -> Option<PathBuf> {
    Some(config.web_out()?.join("navigation.ts"))
}

#[must_use]
pub fn routes_path(config: &GenerateConfig) -> Option<PathBuf> {
    Some(config.web_out()?.join("routes.tsx"))
}

/// Sidebar manifest: one entry per entity.
#[must_use]
pub fn emit_navigation(set: &EntitySet) -> String {
    let mut out = String::new();

    out.push_str(TS_HEADER);
    out.push_str("import type { NavItem } from \"../lib/types\";\n\n");
    out.push_str("export const navigation: NavItem[] = [\n");

    for entity in set {
        out.push_str("  {\n");
        let _ = writeln!(
            out,
            "    label: \"{}\",",
            util::escape_ts(&util::plural_caption(entity))
        );
        let _ = writeln!(out, "    path: \"{}\",", route_base(&entity.entity));
        let _ = writeln!(out, "    icon: \"{}\",", util::escape_ts(&util::icon_for(entity)));
        let _ = writeln!(out, "    entity: \"{}\",", util::escape_ts(&entity.entity));
        out.push_str("  },\n");
    }

    out.push_str("];\n");

    out
}

/// Route manifest: list, create, detail and edit routes per entity.
#[must_use]
pub fn emit_routes(set: &EntitySet) -> String {
    let mut out = String::new();

    out.push_str(TS_HEADER);
    for entity in set {
        let name = &entity.entity;
        let dir = to_kebab_case(name);
        let _ = writeln!(out, "import {name}ListPage from \"./pages/{dir}/list\";");
        let _ = writeln!(out, "import {name}FormPage from \"./pages/{dir}/form\";");
        let _ = writeln!(out, "import {name}DetailPage from \"./pages/{dir}/detail\";");
    }
    out.push_str("import type { RouteComponent } from \"./route-types\";\n\n");

    out.push_str("export const generatedRoutes: RouteComponent[] = [\n");
    for entity in set {
        let name = &entity.entity;
        let base = route_base(name);
        let _ = writeln!(
            out,
            "  {{ path: \"{base}\", component: () => <{name}ListPage /> }},"
        );
        let _ = writeln!(
            out,
            "  {{ path: \"{base}/new\", component: () => <{name}FormPage /> }},"
        );
        let _ = writeln!(
            out,
            "  {{ path: \"{base}/:id\", component: () => <{name}DetailPage /> }},"
        );
        let _ = writeln!(
            out,
            "  {{ path: \"{base}/:id/edit\", component: () => <{name}FormPage /> }},"
        );
    }
    out.push_str("];\n");

    out
}

///
/// TESTS
///
