//! Client API-module emitter.
//!
//! One axios-backed CRUD module per entity, routed against the generated
//! controller's kebab-case base path. The hand-written `apiClient` carries
//! the base URL and auth interceptors.

use crate::{
    config::GenerateConfig,
    emit::{ArtifactKind, EmitContext, Emitter, TS_HEADER, client},
};
use entforge_schema::node::EntityDef;
use entforge_utils::{pluralize, to_kebab_case};
use std::fmt::Write;
use std::path::PathBuf;

pub struct ClientApiEmitter;

impl Emitter for ClientApiEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ClientApi
    }

    fn path(&self, entity: &EntityDef, config: &GenerateConfig) -> Option<PathBuf> {
        let dir = config.web_out()?;

        Some(
            dir.join("api")
                .join(format!("{}.ts", client::module_name(&entity.entity))),
        )
    }

    fn emit(&self, ctx: &EmitContext<'_>) -> String {
        let entity = ctx.entity;
        let name = &entity.entity;
        let plural = pluralize(name);
        let module = client::module_name(name);
        let base = to_kebab_case(&plural);

        let mut out = String::new();
        out.push_str(TS_HEADER);
        out.push_str("import { apiClient } from \"../../lib/api-client\";\n");
        out.push_str("import type { PaginatedResult, QueryParams } from \"../../lib/types\";\n");
        let _ = writeln!(out, "import type {{ {name} }} from \"../types/{module}\";");
        let _ = writeln!(
            out,
            "import type {{ {name}FormValues }} from \"../schemas/{module}\";\n"
        );

        let _ = writeln!(out, "const BASE_URL = \"/{base}\";\n");

        let _ = writeln!(
            out,
            "export async function list{plural}(params?: QueryParams): Promise<PaginatedResult<{name}>> {{"
        );
        let _ = writeln!(
            out,
            "  const response = await apiClient.get<PaginatedResult<{name}>>(BASE_URL, {{ params }});"
        );
        out.push_str("  return response.data;\n}\n\n");

        let _ = writeln!(
            out,
            "export async function get{name}(id: number): Promise<{name}> {{"
        );
        let _ = writeln!(
            out,
            "  const response = await apiClient.get<{name}>(`${{BASE_URL}}/${{id}}`);"
        );
        out.push_str("  return response.data;\n}\n\n");

        let _ = writeln!(
            out,
            "export async function create{name}(input: {name}FormValues): Promise<{name}> {{"
        );
        let _ = writeln!(
            out,
            "  const response = await apiClient.post<{name}>(BASE_URL, input);"
        );
        out.push_str("  return response.data;\n}\n\n");

        let _ = writeln!(
            out,
            "export async function update{name}(id: number, input: {name}FormValues): Promise<{name}> {{"
        );
        let _ = writeln!(
            out,
            "  const response = await apiClient.put<{name}>(`${{BASE_URL}}/${{id}}`, input);"
        );
        out.push_str("  return response.data;\n}\n\n");

        let _ = writeln!(
            out,
            "export async function delete{name}(id: number): Promise<void> {{"
        );
        out.push_str("  await apiClient.delete(`${BASE_URL}/${id}`);\n}\n");

        out
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::testutil::Fixture;

    #[test]
    fn module_exposes_the_full_crud_surface() {
        let fixture = Fixture::new();
        let code = ClientApiEmitter.emit(&fixture.context("Order"));

        assert!(code.contains("const BASE_URL = \"/orders\";"));
        assert!(code.contains(
            "export async function listOrders(params?: QueryParams): Promise<PaginatedResult<Order>> {"
        ));
        assert!(code.contains("export async function getOrder(id: number): Promise<Order> {"));
        assert!(code.contains(
            "export async function createOrder(input: OrderFormValues): Promise<Order> {"
        ));
        assert!(code.contains(
            "export async function updateOrder(id: number, input: OrderFormValues): Promise<Order> {"
        ));
        assert!(code.contains("export async function deleteOrder(id: number): Promise<void> {"));
    }

    #[test]
    fn imports_line_up_with_sibling_generated_modules() {
        let fixture = Fixture::new();
        let code = ClientApiEmitter.emit(&fixture.context("OrderItem"));

        assert!(code.contains("import type { OrderItem } from \"../types/order-item\";"));
        assert!(code.contains("import type { OrderItemFormValues } from \"../schemas/order-item\";"));
        assert!(code.contains("const BASE_URL = \"/order-items\";"));
    }

    #[test]
    fn path_is_kebab_under_api() {
        let fixture = Fixture::new();
        let entity = fixture.set.get("Order").expect("fixture entity");
        let path = ClientApiEmitter
            .path(entity, &fixture.config)
            .expect("web configured");

        assert_eq!(path, PathBuf::from("web/src/generated/api/order.ts"));
    }
}
