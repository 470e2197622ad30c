//! Client type emitter.
//!
//! One TypeScript module per entity: local enums with display-label maps,
//! and the entity interface covering every field, foreign key, expanded
//! relation and synthesized reverse.

use crate::{
    config::GenerateConfig,
    emit::{ArtifactKind, EmitContext, Emitter, TS_HEADER, client, util},
};
use entforge_schema::{
    node::{EntityDef, EnumDef},
    types::RelationKind,
};
use entforge_utils::{to_camel_case, to_kebab_case};
use std::fmt::Write;
use std::path::PathBuf;

pub struct ClientTypesEmitter;

impl Emitter for ClientTypesEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ClientTypes
    }

    fn path(&self, entity: &EntityDef, config: &GenerateConfig) -> Option<PathBuf> {
        let dir = config.web_out()?;

        Some(
            dir.join("types")
                .join(format!("{}.ts", client::module_name(&entity.entity))),
        )
    }

    fn emit(&self, ctx: &EmitContext<'_>) -> String {
        let entity = ctx.entity;
        let mut out = String::new();

        out.push_str(TS_HEADER);

        let related = client::related_entities(ctx);
        if !related.is_empty() {
            for name in &related {
                let _ = writeln!(
                    out,
                    "import type {{ {name} }} from \"./{}\";",
                    to_kebab_case(name)
                );
            }
        }
        out.push('\n');

        for enum_def in &entity.enums {
            enum_decl(&mut out, enum_def);
        }

        let _ = writeln!(out, "export interface {} {{", entity.entity);
        out.push_str("  id: number;\n");

        for field in &entity.fields {
            let name = to_camel_case(&field.name);
            let ty = util::ts_type(entity, field);

            // Enum fields always carry a member value, so they stay
            // non-optional alongside required and computed fields.
            if field.required || field.is_computed() || entity.field_enum(field).is_some() {
                let _ = writeln!(out, "  {name}: {ty};");
            } else {
                let _ = writeln!(out, "  {name}?: {ty} | null;");
            }
        }

        for relation in &entity.relations {
            let name = to_camel_case(&relation.name);

            match relation.kind {
                RelationKind::Reference => {
                    let fk = util::fk_property(&relation.name);
                    if relation.required {
                        let _ = writeln!(out, "  {fk}: number;");
                    } else {
                        let _ = writeln!(out, "  {fk}?: number | null;");
                    }
                    // Expanded object only when the target type exists.
                    if ctx.target_known(relation) {
                        let _ = writeln!(out, "  {name}?: {} | null;", relation.target);
                    }
                }
                RelationKind::Detail => {
                    if ctx.target_known(relation) {
                        let _ = writeln!(out, "  {name}?: {}[];", relation.target);
                    }
                }
            }
        }

        for reverse in ctx.reverses {
            let name = to_camel_case(&reverse.property_name);

            if reverse.collection {
                let _ = writeln!(out, "  {name}?: {}[];", reverse.source_entity);
            } else {
                let _ = writeln!(out, "  {name}Id?: number | null;");
                let _ = writeln!(out, "  {name}?: {} | null;", reverse.source_entity);
            }
        }

        out.push_str("}\n");

        out
    }
}

fn enum_decl(out: &mut String, enum_def: &EnumDef) {
    let _ = writeln!(out, "export enum {} {{", enum_def.name);

    let mut next_value = 0;
    for member in &enum_def.members {
        let value = member.value.unwrap_or(next_value);
        next_value = value + 1;

        let _ = writeln!(out, "  {} = {value},", member.name);
    }
    out.push_str("}\n\n");

    let _ = writeln!(
        out,
        "export const {}Labels: Record<{}, string> = {{",
        enum_def.name, enum_def.name
    );
    for member in &enum_def.members {
        let _ = writeln!(
            out,
            "  [{}.{}]: \"{}\",",
            enum_def.name,
            member.name,
            util::escape_ts(member.resolved_label())
        );
    }
    out.push_str("};\n\n");
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::testutil::Fixture;

    #[test]
    fn interface_covers_fields_keys_and_expansions() {
        let fixture = Fixture::new();
        let code = ClientTypesEmitter.emit(&fixture.context("Order"));

        assert!(code.contains("export interface Order {"));
        assert!(code.contains("  id: number;"));
        assert!(code.contains("  orderNumber: string;"));
        assert!(code.contains("  status: OrderStatus;"));
        assert!(code.contains("  totalAmount: number;"));
        assert!(code.contains("  notes?: string | null;"));
        assert!(code.contains("  customerId: number;"));
        assert!(code.contains("  customer?: Customer | null;"));
        assert!(code.contains("  items?: OrderItem[];"));
    }

    #[test]
    fn reverse_collection_surfaces_with_an_import() {
        let fixture = Fixture::new();
        let code = ClientTypesEmitter.emit(&fixture.context("Order"));

        assert!(code.contains("  invoices?: Invoice[];"));
        assert!(code.contains("import type { Invoice } from \"./invoice\";"));
        assert!(code.contains("import type { OrderItem } from \"./order-item\";"));
    }

    #[test]
    fn reverse_singular_gets_key_and_object() {
        let fixture = Fixture::new();
        let code = ClientTypesEmitter.emit(&fixture.context("OrderItem"));

        assert!(code.contains("  orderId?: number | null;"));
        assert!(code.contains("  order?: Order | null;"));
        assert!(code.contains("import type { Order } from \"./order\";"));
    }

    #[test]
    fn local_enum_emits_values_and_labels() {
        let fixture = Fixture::new();
        let code = ClientTypesEmitter.emit(&fixture.context("Order"));

        assert!(code.contains("export enum OrderStatus {"));
        assert!(code.contains("  Draft = 0,"));
        assert!(code.contains("  Confirmed = 1,"));
        assert!(code.contains("export const OrderStatusLabels: Record<OrderStatus, string> = {"));
        assert!(code.contains("  [OrderStatus.Confirmed]: \"Confirmed order\","));
    }

    #[test]
    fn path_is_kebab_under_types() {
        let fixture = Fixture::new();
        let entity = fixture.set.get("OrderItem").expect("fixture entity");
        let path = ClientTypesEmitter
            .path(entity, &fixture.config)
            .expect("web configured");

        assert_eq!(path, PathBuf::from("web/src/generated/types/order-item.ts"));
    }
}
