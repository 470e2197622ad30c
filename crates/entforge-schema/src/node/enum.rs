use crate::prelude::*;

///
/// EnumDef
///
/// Enum scoped to one entity; referenced from fields by name.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EnumDef {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<EnumMember>,
}

impl EnumDef {
    // get member
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&EnumMember> {
        self.members
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }
}

///
/// EnumMember
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EnumMember {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl EnumMember {
    #[must_use]
    pub fn resolved_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}
