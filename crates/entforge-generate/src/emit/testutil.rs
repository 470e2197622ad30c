//! Shared fixtures for emitter tests.

use crate::{
    config::GenerateConfig,
    emit::EmitContext,
    resolve::{Resolution, resolve},
};
use entforge_schema::{
    node::{
        DetailSection, DetailUiDef, EntityDef, EnumDef, EnumMember, FieldDef, FormRow, FormUiDef,
        ListUiDef, PermissionsDef, RelationDef, RuleDef, UiDef, ValidationRule,
    },
    set::EntitySet,
    types::{FieldType, RelationKind},
};

pub(crate) struct Fixture {
    pub set: EntitySet,
    pub resolution: Resolution,
    pub config: GenerateConfig,
}

impl Fixture {
    pub fn new() -> Self {
        let set = sample_set();
        let resolution = resolve(&set);
        let config = GenerateConfig::new("entities", "server/Model")
            .with_controllers("server/Api")
            .with_web("web/src/generated");

        Self {
            set,
            resolution,
            config,
        }
    }

    pub fn context(&self, entity: &str) -> EmitContext<'_> {
        let entity = self.set.get(entity).expect("fixture entity");

        EmitContext::new(entity, &self.resolution, &self.set, &self.config)
    }
}

/// Order + Customer (explicit pair), Order → OrderItem (unmatched detail),
/// Invoice → Order (unmatched reference, so Order gains a collection
/// reverse).
pub(crate) fn sample_set() -> EntitySet {
    EntitySet::new(vec![order(), customer(), order_item(), invoice()]).expect("unique names")
}

fn order() -> EntityDef {
    EntityDef {
        entity: "Order".to_owned(),
        caption: Some("Orders".to_owned()),
        icon: Some("ShoppingCart".to_owned()),
        db_table: Some("Orders".to_owned()),
        description: Some("A customer order".to_owned()),
        fields: vec![
            FieldDef {
                name: "OrderNumber".to_owned(),
                ty: FieldType::Text,
                length: Some(50),
                required: true,
                ..FieldDef::default()
            },
            FieldDef {
                name: "Status".to_owned(),
                ty: FieldType::Other("OrderStatus".to_owned()),
                default: Some("Draft".to_owned()),
                ..FieldDef::default()
            },
            FieldDef {
                name: "TotalAmount".to_owned(),
                ty: FieldType::Decimal,
                readonly: true,
                formula: Some("[Items].Sum([LineTotal])".to_owned()),
                ..FieldDef::default()
            },
            FieldDef {
                name: "Notes".to_owned(),
                ty: FieldType::Text,
                length: Some(500),
                ..FieldDef::default()
            },
        ],
        relations: vec![
            RelationDef {
                name: "Customer".to_owned(),
                kind: RelationKind::Reference,
                target: "Customer".to_owned(),
                required: true,
                lookup_field: Some("Name".to_owned()),
                ..RelationDef::default()
            },
            RelationDef {
                name: "Items".to_owned(),
                kind: RelationKind::Detail,
                target: "OrderItem".to_owned(),
                cascade: Some("delete".to_owned()),
                min_count: Some(1),
                ..RelationDef::default()
            },
        ],
        rules: vec![RuleDef {
            trigger: "BeforeSave".to_owned(),
            script: "RecalculateTotal".to_owned(),
        }],
        enums: vec![EnumDef {
            name: "OrderStatus".to_owned(),
            members: vec![
                EnumMember {
                    name: "Draft".to_owned(),
                    value: Some(0),
                    ..EnumMember::default()
                },
                EnumMember {
                    name: "Confirmed".to_owned(),
                    value: Some(1),
                    label: Some("Confirmed order".to_owned()),
                    ..EnumMember::default()
                },
            ],
            ..EnumDef::default()
        }],
        ui: Some(UiDef {
            list: Some(ListUiDef {
                columns: vec![
                    "OrderNumber".to_owned(),
                    "Customer".to_owned(),
                    "Status".to_owned(),
                ],
                default_sort: Some("OrderNumber".to_owned()),
                default_sort_dir: Some("asc".to_owned()),
                searchable: vec!["OrderNumber".to_owned()],
                filterable: vec!["Status".to_owned()],
                page_size: 50,
            }),
            form: Some(FormUiDef {
                layout: vec![
                    FormRow {
                        row: vec!["OrderNumber".to_owned(), "Status".to_owned()],
                    },
                    FormRow {
                        row: vec!["Notes".to_owned()],
                    },
                ],
            }),
            detail: Some(DetailUiDef {
                sections: vec![
                    DetailSection {
                        title: "General".to_owned(),
                        fields: Some(vec!["OrderNumber".to_owned(), "Status".to_owned()]),
                        relation: None,
                    },
                    DetailSection {
                        title: "Items".to_owned(),
                        fields: None,
                        relation: Some("Items".to_owned()),
                    },
                ],
            }),
        }),
        permissions: Some(PermissionsDef {
            delete: "Administrators".to_owned(),
            ..PermissionsDef::default()
        }),
    }
}

fn customer() -> EntityDef {
    EntityDef {
        entity: "Customer".to_owned(),
        fields: vec![FieldDef {
            name: "Name".to_owned(),
            ty: FieldType::Text,
            required: true,
            ..FieldDef::default()
        }],
        relations: vec![RelationDef {
            name: "Orders".to_owned(),
            kind: RelationKind::Detail,
            target: "Order".to_owned(),
            ..RelationDef::default()
        }],
        ..EntityDef::default()
    }
}

fn order_item() -> EntityDef {
    EntityDef {
        entity: "OrderItem".to_owned(),
        fields: vec![
            FieldDef {
                name: "Quantity".to_owned(),
                ty: FieldType::Int,
                required: true,
                validations: vec![ValidationRule {
                    range: Some(">0".to_owned()),
                    message: Some("Quantity must be positive".to_owned()),
                    ..ValidationRule::default()
                }],
                ..FieldDef::default()
            },
            FieldDef {
                name: "UnitPrice".to_owned(),
                ty: FieldType::Decimal,
                ..FieldDef::default()
            },
            FieldDef {
                name: "LineTotal".to_owned(),
                ty: FieldType::Decimal,
                formula: Some("Quantity * UnitPrice".to_owned()),
                calculation_type: Some(entforge_schema::types::CalculationKind::Getter),
                ..FieldDef::default()
            },
        ],
        ..EntityDef::default()
    }
}

fn invoice() -> EntityDef {
    EntityDef {
        entity: "Invoice".to_owned(),
        fields: vec![FieldDef {
            name: "InvoiceNumber".to_owned(),
            ty: FieldType::Text,
            required: true,
            ..FieldDef::default()
        }],
        relations: vec![RelationDef {
            name: "Order".to_owned(),
            kind: RelationKind::Reference,
            target: "Order".to_owned(),
            ..RelationDef::default()
        }],
        ..EntityDef::default()
    }
}
