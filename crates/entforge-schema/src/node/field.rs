use crate::prelude::*;

///
/// FieldDef
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct FieldDef {
    pub name: String,

    #[serde(default, rename = "type")]
    pub ty: FieldType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub readonly: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,

    /// Flavor of the computed field; only meaningful when `formula` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation_type: Option<CalculationKind>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<ValidationRule>,
}

impl FieldDef {
    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.formula.is_some()
    }

    /// Computed-field flavor, defaulting to the persistence-layer kind when a
    /// formula is present without an explicit tag.
    #[must_use]
    pub fn calculation_kind(&self) -> Option<CalculationKind> {
        self.formula
            .as_ref()
            .map(|_| self.calculation_type.unwrap_or_default())
    }

    /// Display label, falling back to the field name.
    #[must_use]
    pub fn resolved_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

///
/// ValidationRule
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ValidationRule {
    /// Range shorthand: `">N"`, `">=N"`, `"<N"`, `"<=N"` or `"N-M"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,

    /// Free-form predicate enforced by the persistence runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationRule {
    /// Parse the range shorthand. An unparseable range yields `None` and the
    /// rule contributes no bound (best-effort degradation).
    #[must_use]
    pub fn parsed_range(&self) -> Option<RangeBound> {
        self.range.as_deref().and_then(RangeBound::parse)
    }
}

///
/// RangeBound
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RangeBound {
    GreaterThan(f64),
    AtLeast(f64),
    LessThan(f64),
    AtMost(f64),
    /// Inclusive on both ends.
    Between(f64, f64),
}

impl RangeBound {
    #[must_use]
    pub fn parse(range: &str) -> Option<Self> {
        let range = range.trim();

        if let Some(rest) = range.strip_prefix(">=") {
            return rest.trim().parse().ok().map(Self::AtLeast);
        }
        if let Some(rest) = range.strip_prefix('>') {
            return rest.trim().parse().ok().map(Self::GreaterThan);
        }
        if let Some(rest) = range.strip_prefix("<=") {
            return rest.trim().parse().ok().map(Self::AtMost);
        }
        if let Some(rest) = range.strip_prefix('<') {
            return rest.trim().parse().ok().map(Self::LessThan);
        }

        let (lo, hi) = range.split_once('-')?;
        let lo = lo.trim().parse().ok()?;
        let hi = hi.trim().parse().ok()?;

        Some(Self::Between(lo, hi))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_shorthand_parses_every_documented_form() {
        assert_eq!(RangeBound::parse(">0"), Some(RangeBound::GreaterThan(0.0)));
        assert_eq!(RangeBound::parse(">=1"), Some(RangeBound::AtLeast(1.0)));
        assert_eq!(RangeBound::parse("<10"), Some(RangeBound::LessThan(10.0)));
        assert_eq!(
            RangeBound::parse("<=99999"),
            Some(RangeBound::AtMost(99999.0))
        );
        assert_eq!(
            RangeBound::parse("0-100"),
            Some(RangeBound::Between(0.0, 100.0))
        );
    }

    #[test]
    fn garbage_ranges_degrade_to_none() {
        assert_eq!(RangeBound::parse("between 0 and 1"), None);
        assert_eq!(RangeBound::parse(""), None);
        assert_eq!(RangeBound::parse(">abc"), None);
    }

    #[test]
    fn calculation_kind_defaults_to_persistent() {
        let field = FieldDef {
            name: "LineTotal".to_owned(),
            formula: Some("[Quantity] * [UnitPrice]".to_owned()),
            ..FieldDef::default()
        };

        assert_eq!(field.calculation_kind(), Some(CalculationKind::Persistent));

        let plain = FieldDef {
            name: "Quantity".to_owned(),
            ..FieldDef::default()
        };
        assert_eq!(plain.calculation_kind(), None);
    }
}
