use declpack_core::DeclIdx;
use declpack_format::DeclId;

use crate::IdentityRegistry;

#[test]
fn ids_are_dense_and_one_based() {
    let mut registry = IdentityRegistry::new();
    let a = DeclIdx::from_raw(7);
    let b = DeclIdx::from_raw(2);

    assert_eq!(registry.resolve(a), DeclId(1));
    assert_eq!(registry.resolve(b), DeclId(2));
    assert_eq!(registry.resolve(a), DeclId(1));
    assert_eq!(registry.len(), 2);
}

#[test]
fn absent_reference_is_sentinel() {
    let mut registry = IdentityRegistry::new();

    assert_eq!(registry.resolve_opt(None), DeclId::NONE);
    assert!(registry.is_empty());
}

#[test]
fn get_does_not_mint() {
    let mut registry = IdentityRegistry::new();
    let a = DeclIdx::from_raw(0);

    assert_eq!(registry.get(a), None);
    assert!(registry.is_empty());
    registry.resolve(a);
    assert_eq!(registry.get(a), Some(DeclId(1)));
}

#[test]
fn reverse_lookup_in_id_order() {
    let mut registry = IdentityRegistry::new();
    let a = DeclIdx::from_raw(5);
    let b = DeclIdx::from_raw(3);
    registry.resolve(a);
    registry.resolve(b);

    assert_eq!(registry.decl(DeclId(2)), Some(b));
    assert_eq!(registry.decl(DeclId::NONE), None);
    assert_eq!(registry.decl(DeclId(3)), None);
    let all: Vec<_> = registry.iter().collect();
    assert_eq!(all, vec![(DeclId(1), a), (DeclId(2), b)]);
}
