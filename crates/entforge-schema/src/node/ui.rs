use crate::prelude::*;

///
/// UiDef
///
/// Optional layout hints for the generated pages. Every section is optional;
/// the page emitters derive defaults from fields and relations when a hint
/// is absent.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UiDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListUiDef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<FormUiDef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<DetailUiDef>,
}

///
/// ListUiDef
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ListUiDef {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub searchable: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filterable: Vec<String>,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ListUiDef {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            default_sort: None,
            default_sort_dir: None,
            searchable: Vec::new(),
            filterable: Vec::new(),
            page_size: default_page_size(),
        }
    }
}

const fn default_page_size() -> u32 {
    20
}

///
/// FormUiDef
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct FormUiDef {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layout: Vec<FormRow>,
}

///
/// FormRow
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct FormRow {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub row: Vec<String>,
}

///
/// DetailUiDef
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DetailUiDef {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<DetailSection>,
}

///
/// DetailSection
///
/// Either a group of scalar fields or an embedded table over one detail
/// relation.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DetailSection {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
}
