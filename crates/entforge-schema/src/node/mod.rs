mod entity;
mod field;
mod permissions;
mod relation;
mod rule;
mod ui;

#[path = "enum.rs"]
mod enumeration;

pub use entity::EntityDef;
pub use enumeration::{EnumDef, EnumMember};
pub use field::{FieldDef, RangeBound, ValidationRule};
pub use permissions::PermissionsDef;
pub use relation::RelationDef;
pub use rule::RuleDef;
pub use ui::{DetailSection, DetailUiDef, FormRow, FormUiDef, ListUiDef, UiDef};
