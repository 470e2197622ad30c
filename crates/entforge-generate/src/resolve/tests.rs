use super::*;
use entforge_schema::node::{EntityDef, RelationDef};

fn entity(name: &str, relations: Vec<RelationDef>) -> EntityDef {
    EntityDef {
        entity: name.to_owned(),
        relations,
        ..EntityDef::default()
    }
}

fn reference(name: &str, target: &str) -> RelationDef {
    RelationDef {
        name: name.to_owned(),
        kind: RelationKind::Reference,
        target: target.to_owned(),
        ..RelationDef::default()
    }
}

fn detail(name: &str, target: &str) -> RelationDef {
    RelationDef {
        name: name.to_owned(),
        kind: RelationKind::Detail,
        target: target.to_owned(),
        ..RelationDef::default()
    }
}

fn set_of(entities: Vec<EntityDef>) -> EntitySet {
    EntitySet::new(entities).expect("unique names")
}

#[test]
fn unmatched_detail_synthesizes_singular_reverse() {
    let set = set_of(vec![
        entity("Order", vec![detail("Items", "OrderItem")]),
        entity("OrderItem", vec![]),
    ]);

    let resolution = resolve(&set);

    let reverses = resolution.reverses_for("OrderItem");
    assert_eq!(
        reverses,
        [ReverseAssociation {
            target_entity: "OrderItem".to_owned(),
            property_name: "Order".to_owned(),
            source_entity: "Order".to_owned(),
            association: "Order-Items".to_owned(),
            collection: false,
        }]
    );
    assert_eq!(resolution.override_count(), 0);
}

#[test]
fn unmatched_reference_synthesizes_collection_reverse() {
    let set = set_of(vec![
        entity("Order", vec![reference("Customer", "Customer")]),
        entity("Customer", vec![]),
    ]);

    let resolution = resolve(&set);

    let reverses = resolution.reverses_for("Customer");
    assert_eq!(reverses.len(), 1);
    assert_eq!(reverses[0].property_name, "Orders");
    assert_eq!(reverses[0].association, "Order-Customer");
    assert!(reverses[0].collection);
}

#[test]
fn matched_pair_records_override_instead_of_reverse() {
    let set = set_of(vec![
        entity("Order", vec![reference("Customer", "Customer")]),
        entity("Customer", vec![detail("Orders", "Order")]),
    ]);

    let resolution = resolve(&set);

    assert_eq!(resolution.reverse_count(), 0);
    assert_eq!(
        resolution.association_override("Order", "Customer"),
        Some("Customer-Orders")
    );
    // The detail side keeps its default identifier.
    assert_eq!(resolution.association_override("Customer", "Orders"), None);
}

#[test]
fn matched_pair_agrees_on_one_identifier_from_both_sides() {
    let order = entity("Order", vec![reference("Customer", "Customer")]);
    let customer = entity("Customer", vec![detail("Orders", "Order")]);
    let set = set_of(vec![order.clone(), customer.clone()]);

    let resolution = resolve(&set);

    let reference_side = resolution.association_for(&order, &order.relations[0]);
    let detail_side = resolution.association_for(&customer, &customer.relations[0]);
    assert_eq!(reference_side, detail_side);
    assert_eq!(reference_side, "Customer-Orders");
}

#[test]
fn unresolvable_target_is_inert() {
    let set = set_of(vec![entity(
        "Order",
        vec![reference("Ghost", "DoesNotExist")],
    )]);

    let resolution = resolve(&set);

    assert_eq!(resolution.reverse_count(), 0);
    assert_eq!(resolution.override_count(), 0);
}

#[test]
fn counterpart_matching_takes_first_declared_candidate() {
    let order = entity("Order", vec![reference("Customer", "Customer")]);
    let customer = entity(
        "Customer",
        vec![detail("OpenOrders", "Order"), detail("AllOrders", "Order")],
    );
    let set = set_of(vec![order.clone(), customer.clone()]);

    let resolution = resolve(&set);

    // The reference side reconciles onto the first declared detail.
    assert_eq!(
        resolution.association_override("Order", "Customer"),
        Some("Customer-OpenOrders")
    );

    // Both detail candidates still see the reference as their counterpart,
    // so neither synthesizes a reverse; the second keeps its own default
    // identifier. Order-dependent, no ambiguity diagnostics.
    assert_eq!(resolution.reverse_count(), 0);
    assert_eq!(
        resolution.association_for(&customer, &customer.relations[1]),
        "Customer-AllOrders"
    );
}

#[test]
fn target_and_counterpart_lookups_fold_case() {
    let set = set_of(vec![
        entity("Order", vec![reference("Customer", "customer")]),
        entity("Customer", vec![detail("Orders", "ORDER")]),
    ]);

    let resolution = resolve(&set);

    assert_eq!(resolution.reverse_count(), 0);
    assert_eq!(
        resolution.association_override("order", "customer"),
        Some("Customer-Orders")
    );
}

#[test]
fn self_referential_pair_reconciles_within_one_entity() {
    let set = set_of(vec![entity(
        "Category",
        vec![
            reference("Parent", "Category"),
            detail("Children", "Category"),
        ],
    )]);

    let resolution = resolve(&set);

    assert_eq!(resolution.reverse_count(), 0);
    assert_eq!(
        resolution.association_override("Category", "Parent"),
        Some("Category-Children")
    );
}

#[test]
fn every_unmatched_relation_yields_exactly_one_reverse() {
    let set = set_of(vec![
        entity(
            "Invoice",
            vec![reference("Customer", "Customer"), detail("Lines", "InvoiceLine")],
        ),
        entity("Customer", vec![]),
        entity("InvoiceLine", vec![]),
    ]);

    let resolution = resolve(&set);

    assert_eq!(resolution.reverse_count(), 2);
    assert_eq!(resolution.reverses_for("Customer").len(), 1);
    assert!(resolution.reverses_for("Customer")[0].collection);
    assert_eq!(resolution.reverses_for("InvoiceLine").len(), 1);
    assert!(!resolution.reverses_for("InvoiceLine")[0].collection);
}
