//! API-surface emitter.
//!
//! One REST CRUD controller per entity, pluralized Pascal naming. Paging,
//! sort and search parameters mirror the client's query contract; role
//! guards come from the entity's permission defaults.

use crate::{
    config::GenerateConfig,
    emit::{ArtifactKind, CS_HEADER, EmitContext, Emitter, util},
};
use entforge_schema::node::{EntityDef, PermissionsDef};
use entforge_utils::{pluralize, to_kebab_case};
use std::fmt::Write;
use std::path::PathBuf;

pub struct ControllerEmitter;

impl Emitter for ControllerEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Controller
    }

    fn path(&self, entity: &EntityDef, config: &GenerateConfig) -> Option<PathBuf> {
        let dir = config.controllers_out()?;

        Some(dir.join(format!("{}Controller.Generated.cs", pluralize(&entity.entity))))
    }

    fn emit(&self, ctx: &EmitContext<'_>) -> String {
        let entity = ctx.entity;
        let name = &entity.entity;
        let plural = pluralize(name);
        let route = to_kebab_case(&plural);
        let permissions = entity.permissions.clone().unwrap_or_default();
        let page_size = util::page_size(entity);

        let mut out = String::new();
        out.push_str(CS_HEADER);
        out.push_str("using Microsoft.AspNetCore.Authorization;\n");
        out.push_str("using Microsoft.AspNetCore.Mvc;\n");
        let _ = writeln!(out, "using {};\n", ctx.config.namespace);
        let _ = writeln!(out, "namespace {}.Api;\n", ctx.config.namespace);

        out.push_str("[ApiController]\n");
        let _ = writeln!(out, "[Route(\"api/{route}\")]");
        let _ = writeln!(out, "public partial class {plural}Controller : ControllerBase");
        out.push_str("{\n");
        let _ = writeln!(out, "    private readonly IEntityService<{name}> _service;\n");
        let _ = writeln!(out, "    public {plural}Controller(IEntityService<{name}> service)");
        out.push_str("    {\n");
        out.push_str("        _service = service;\n");
        out.push_str("    }\n\n");

        // List
        let _ = writeln!(out, "    // GET api/{route}");
        out.push_str("    [HttpGet]\n");
        let _ = writeln!(out, "    [Authorize(Roles = \"{}\")]", permissions.read);
        let _ = writeln!(out, "    public ActionResult<PaginatedResult<{name}>> List(");
        out.push_str("        [FromQuery] int page = 1,\n");
        let _ = writeln!(out, "        [FromQuery] int pageSize = {page_size},");
        out.push_str("        [FromQuery] string? sort = null,\n");
        out.push_str("        [FromQuery] string? sortDir = null,\n");
        out.push_str("        [FromQuery] string? search = null)\n");
        out.push_str("    {\n");
        out.push_str(
            "        return Ok(_service.List(page, pageSize, sort, sortDir, search, SearchFields));\n",
        );
        out.push_str("    }\n\n");

        // Get
        let _ = writeln!(out, "    // GET api/{route}/{{id}}");
        out.push_str("    [HttpGet(\"{id}\")]\n");
        let _ = writeln!(out, "    [Authorize(Roles = \"{}\")]", permissions.read);
        let _ = writeln!(out, "    public ActionResult<{name}> Get(int id)");
        out.push_str("    {\n");
        out.push_str("        var entity = _service.Get(id);\n");
        out.push_str("        if (entity == null)\n");
        out.push_str("            return NotFound();\n");
        out.push_str("        return Ok(entity);\n");
        out.push_str("    }\n\n");

        // Create
        let _ = writeln!(out, "    // POST api/{route}");
        out.push_str("    [HttpPost]\n");
        let _ = writeln!(out, "    [Authorize(Roles = \"{}\")]", permissions.create);
        let _ = writeln!(
            out,
            "    public ActionResult<{name}> Create([FromBody] {name} input)"
        );
        out.push_str("    {\n");
        out.push_str("        var entity = _service.Create(input);\n");
        out.push_str(
            "        return CreatedAtAction(nameof(Get), new { id = entity.Oid }, entity);\n",
        );
        out.push_str("    }\n\n");

        // Update
        let _ = writeln!(out, "    // PUT api/{route}/{{id}}");
        out.push_str("    [HttpPut(\"{id}\")]\n");
        let _ = writeln!(out, "    [Authorize(Roles = \"{}\")]", permissions.update);
        let _ = writeln!(
            out,
            "    public ActionResult<{name}> Update(int id, [FromBody] {name} input)"
        );
        out.push_str("    {\n");
        out.push_str("        var entity = _service.Update(id, input);\n");
        out.push_str("        if (entity == null)\n");
        out.push_str("            return NotFound();\n");
        out.push_str("        return Ok(entity);\n");
        out.push_str("    }\n\n");

        // Delete
        let _ = writeln!(out, "    // DELETE api/{route}/{{id}}");
        out.push_str("    [HttpDelete(\"{id}\")]\n");
        let _ = writeln!(out, "    [Authorize(Roles = \"{}\")]", permissions.delete);
        out.push_str("    public IActionResult Delete(int id)\n");
        out.push_str("    {\n");
        out.push_str("        if (!_service.Delete(id))\n");
        out.push_str("            return NotFound();\n");
        out.push_str("        return NoContent();\n");
        out.push_str("    }\n\n");

        search_fields(&mut out, entity);

        out.push_str("}\n");

        out
    }
}

fn search_fields(out: &mut String, entity: &EntityDef) {
    let fields = util::searchable_fields(entity);
    let quoted: Vec<String> = fields
        .iter()
        .map(|f| format!("\"{}\"", util::escape_cs(f)))
        .collect();

    let _ = writeln!(
        out,
        "    private static readonly string[] SearchFields = {{ {} }};",
        quoted.join(", ")
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
    fn controller_is_pluralized_and_kebab_routed() {
        let fixture = Fixture::new();
        let code = ControllerEmitter.emit(&fixture.context("Order"));

        assert!(code.contains("[Route(\"api/orders\")]"));
        assert!(code.contains("public partial class OrdersController : ControllerBase"));
        assert!(code.contains("namespace App.Server.Model.Api;"));
    }

    #[test]
    fn crud_actions_carry_permission_roles() {
        let fixture = Fixture::new();
        let code = ControllerEmitter.emit(&fixture.context("Order"));

        assert!(code.contains("[HttpGet]"));
        assert!(code.contains("[HttpPost]"));
        assert!(code.contains("[HttpPut(\"{id}\")]"));
        assert!(code.contains("[HttpDelete(\"{id}\")]"));
        assert!(code.contains("[Authorize(Roles = \"Default\")]"));
        assert!(code.contains("[Authorize(Roles = \"Administrators\")]"));
    }

    #[test]
    fn list_defaults_come_from_ui_hints() {
        let fixture = Fixture::new();
        let code = ControllerEmitter.emit(&fixture.context("Order"));

        assert!(code.contains("[FromQuery] int pageSize = 50,"));
        assert!(code.contains("SearchFields = { \"OrderNumber\" };"));
    }

    #[test]
    fn suffix_pluralization_flows_into_the_file_name() {
        let fixture = Fixture::new();
        let entity = fixture.set.get("OrderItem").expect("fixture entity");
        let path = ControllerEmitter
            .path(entity, &fixture.config)
            .expect("controllers configured");

        assert_eq!(
            path,
            PathBuf::from("server/Api/OrderItemsController.Generated.cs")
        );
    }

    #[test]
    fn path_is_none_without_a_controllers_root() {
        let fixture = Fixture::new();
        let entity = fixture.set.get("Order").expect("fixture entity");
        let config = GenerateConfig::new("entities", "server/Model");

        assert!(ControllerEmitter.path(entity, &config).is_none());
    }
}
