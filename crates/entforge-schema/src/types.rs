use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

///
/// FieldType
///
/// Closed tag set for field types. Anything outside the built-in set is
/// carried as [`FieldType::Other`] — usually the name of a locally-scoped
/// enum, otherwise an unrecognized tag the emitters render with their
/// generic fallback.
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum FieldType {
    #[display("bool")]
    Bool,

    #[display("datetime")]
    DateTime,

    #[display("decimal")]
    Decimal,

    #[display("double")]
    Double,

    #[display("guid")]
    Guid,

    #[display("int")]
    Int,

    #[display("{_0}")]
    Other(String),

    #[display("string")]
    Text,
}

impl FieldType {
    /// The name this tag must match against the entity's local enums, if it
    /// could be an enum reference at all.
    #[must_use]
    pub fn enum_name(&self) -> Option<&str> {
        match self {
            Self::Other(name) => Some(name),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Decimal | Self::Double | Self::Int)
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }
}

impl From<&str> for FieldType {
    fn from(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "bool" | "boolean" => Self::Bool,
            "datetime" => Self::DateTime,
            "decimal" => Self::Decimal,
            "double" => Self::Double,
            "guid" => Self::Guid,
            "int" => Self::Int,
            "string" => Self::Text,
            _ => Self::Other(tag.to_owned()),
        }
    }
}

impl Default for FieldType {
    fn default() -> Self {
        Self::Text
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;

        Ok(Self::from(tag.as_str()))
    }
}

///
/// RelationKind
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    /// Many-to-one: this entity points at one of the target.
    #[default]
    #[display("reference")]
    Reference,

    /// One-to-many: this entity owns a collection of the target.
    #[display("detail")]
    Detail,
}

///
/// CalculationKind
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationKind {
    /// Formula evaluated by the persistence layer.
    #[default]
    #[display("persistent")]
    Persistent,

    /// Formula emitted as a plain accessor expression.
    #[display("getter")]
    Getter,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_tags_are_case_insensitive() {
        assert_eq!(FieldType::from("String"), FieldType::Text);
        assert_eq!(FieldType::from("DATETIME"), FieldType::DateTime);
        assert_eq!(FieldType::from("int"), FieldType::Int);
    }

    #[test]
    fn field_type_keeps_unknown_tags_verbatim() {
        let ty = FieldType::from("OrderStatus");
        assert_eq!(ty, FieldType::Other("OrderStatus".to_owned()));
        assert_eq!(ty.enum_name(), Some("OrderStatus"));
        assert_eq!(ty.to_string(), "OrderStatus");
    }

    #[test]
    fn relation_kind_deserializes_from_lowercase_tags() {
        #[derive(Deserialize)]
        struct Probe {
            kind: RelationKind,
        }

        let probe: Probe = toml::from_str("kind = \"detail\"").expect("valid tag");
        assert_eq!(probe.kind, RelationKind::Detail);
    }
}
