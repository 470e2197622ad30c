use crate::prelude::*;

///
/// RelationDef
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RelationDef {
    pub name: String,

    #[serde(default, rename = "type")]
    pub kind: RelationKind,

    pub target: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Field on the target entity shown in lookup widgets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup_field: Option<String>,

    /// Cascade policy for detail relations (e.g. delete aggregation).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cascade: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RelationDef {
    #[must_use]
    pub fn resolved_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Default association identifier for a relation declared on `entity`.
    /// The resolver replaces this with the paired identifier where an
    /// explicit counterpart exists.
    #[must_use]
    pub fn default_association(&self, entity: &str) -> String {
        format!("{entity}-{}", self.name)
    }
}
