//! Runs in its own process: it consumes every component id the process has.

use ember_engine::ecs::{Component, Error, Registry, Signature};

macro_rules! components {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(Debug, Default)]
            struct $name;
            impl Component for $name {}
        )*
    };
}

components!(
    C00, C01, C02, C03, C04, C05, C06, C07, C08, C09, C10, C11, C12, C13, C14, C15, C16, C17, C18,
    C19, C20, C21, C22, C23, C24, C25, C26, C27, C28, C29, C30, C31, C32,
);

macro_rules! attach_all {
    ($registry:expr, $entity:expr; $($name:ident),*) => {
        $( $registry.add_component($entity, $name).unwrap(); )*
    };
}

#[test]
fn thirty_third_component_type_is_rejected() {
    // Given
    let mut registry = Registry::new();
    let entity = registry.spawn();
    attach_all!(
        registry, entity;
        C00, C01, C02, C03, C04, C05, C06, C07, C08, C09, C10, C11, C12, C13, C14, C15, C16, C17,
        C18, C19, C20, C21, C22, C23, C24, C25, C26, C27, C28, C29, C30, C31
    );
    assert_eq!(registry.signature(entity).unwrap().len(), Signature::CAPACITY);

    // When
    let result = registry.add_component(entity, C32);

    // Then
    assert!(matches!(
        result,
        Err(Error::ComponentCapacity { id: 32, capacity: 32 })
    ));
    assert!(!registry.has_component::<C32>(entity));
    assert_eq!(registry.signature(entity).unwrap().len(), Signature::CAPACITY);
}
