use crate::prelude::*;

///
/// EntityDef
///
/// One entity definition document. Constructed once by the loader and
/// immutable for the duration of a generation run. Lookup helpers are
/// case-insensitive, matching the name semantics of the working set.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EntityDef {
    pub entity: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_table: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<RelationDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<EnumDef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<UiDef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionsDef>,
}

impl EntityDef {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.entity
    }

    /// Display caption, falling back to the entity name.
    #[must_use]
    pub fn resolved_caption(&self) -> &str {
        self.caption.as_deref().unwrap_or(&self.entity)
    }

    /// Storage table name, falling back to the entity name.
    #[must_use]
    pub fn resolved_table(&self) -> &str {
        self.db_table.as_deref().unwrap_or(&self.entity)
    }

    // get field
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    // get relation
    #[must_use]
    pub fn relation(&self, name: &str) -> Option<&RelationDef> {
        self.relations
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }

    // get local enum
    #[must_use]
    pub fn enum_def(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Resolve a field's type tag against the entity's local enums.
    #[must_use]
    pub fn field_enum(&self, field: &FieldDef) -> Option<&EnumDef> {
        field.ty.enum_name().and_then(|name| self.enum_def(name))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_are_case_insensitive() {
        let entity = EntityDef {
            entity: "Order".to_owned(),
            fields: vec![FieldDef {
                name: "OrderNumber".to_owned(),
                ..FieldDef::default()
            }],
            enums: vec![EnumDef {
                name: "OrderStatus".to_owned(),
                ..EnumDef::default()
            }],
            ..EntityDef::default()
        };

        assert!(entity.field("ordernumber").is_some());
        assert!(entity.enum_def("ORDERSTATUS").is_some());
        assert!(entity.field("missing").is_none());
    }

    #[test]
    fn resolved_accessors_fall_back_to_entity_name() {
        let entity = EntityDef {
            entity: "Order".to_owned(),
            ..EntityDef::default()
        };

        assert_eq!(entity.resolved_caption(), "Order");
        assert_eq!(entity.resolved_table(), "Order");
    }
}
