use ember_engine::{
    ecs::{Error, Registry, Signature, System, component},
    game::{MovementSystem, RenderSystem, RigidBody, Sprite, Transform, Vec2},
};

fn tick(registry: &mut Registry, dt: f32) {
    registry
        .run_system(|movement: &mut MovementSystem, components| movement.update(components, dt))
        .unwrap()
        .unwrap();
}

#[test]
fn type_ids_are_distinct_and_stable() {
    let transform = component::id::<Transform>();
    let body = component::id::<RigidBody>();
    let sprite = component::id::<Sprite>();

    assert_ne!(transform, body);
    assert_ne!(transform, sprite);
    assert_ne!(body, sprite);
    assert_eq!(component::id::<Transform>(), transform);
    assert_eq!(component::id::<RigidBody>(), body);
}

#[test]
fn attach_read_detach() {
    // Given
    let mut registry = Registry::new();
    let entity = registry.spawn();
    let body = RigidBody::new(Vec2::new(3.0, 4.0));

    // When
    registry.add_component(entity, body).unwrap();

    // Then
    assert!(registry.has_component::<RigidBody>(entity));
    assert_eq!(registry.get_component::<RigidBody>(entity).unwrap(), &body);

    registry.remove_component::<RigidBody>(entity).unwrap();
    assert!(!registry.has_component::<RigidBody>(entity));
    assert!(matches!(
        registry.get_component::<RigidBody>(entity),
        Err(Error::MissingComponent { .. })
    ));
}

#[test]
fn reattach_overwrites() {
    let mut registry = Registry::new();
    let entity = registry.spawn();

    registry
        .add_component(entity, RigidBody::new(Vec2::new(1.0, 1.0)))
        .unwrap();
    registry
        .add_component(entity, RigidBody::new(Vec2::new(2.0, 2.0)))
        .unwrap();

    assert_eq!(
        registry.get_component::<RigidBody>(entity).unwrap().velocity,
        Vec2::new(2.0, 2.0)
    );
    assert_eq!(registry.signature(entity).unwrap().len(), 1);
}

#[test]
fn attach_order_does_not_matter() {
    // Given
    let mut registry = Registry::new();
    let first = registry.spawn();
    let second = registry.spawn();
    let transform = Transform::at(Vec2::new(1.0, 2.0));
    let body = RigidBody::new(Vec2::new(3.0, 4.0));

    // When
    registry.add_component(first, transform).unwrap();
    registry.add_component(first, body).unwrap();
    registry.add_component(second, body).unwrap();
    registry.add_component(second, transform).unwrap();

    // Then
    assert_eq!(registry.signature(first), registry.signature(second));
    assert_eq!(
        registry.get_component::<Transform>(first),
        registry.get_component::<Transform>(second)
    );
    assert_eq!(
        registry.get_component::<RigidBody>(first),
        registry.get_component::<RigidBody>(second)
    );
}

#[test]
fn spawned_entities_are_invisible_until_update() {
    // Given
    let mut registry = Registry::new();
    registry.add_system(MovementSystem::new().unwrap()).unwrap();
    let entity = registry.spawn();
    registry.add_component(entity, Transform::default()).unwrap();
    registry.add_component(entity, RigidBody::default()).unwrap();

    // When / Then
    let movement = registry.system::<MovementSystem>().unwrap();
    assert!(!movement.members().contains(entity));

    registry.update();
    let movement = registry.system::<MovementSystem>().unwrap();
    assert!(movement.members().contains(entity));
}

#[test]
fn membership_requires_a_superset() {
    // Given
    let mut registry = Registry::new();
    registry.add_system(MovementSystem::new().unwrap()).unwrap();
    let entity = registry.spawn();
    registry.add_component(entity, Transform::default()).unwrap();

    // When
    registry.update();

    // Then
    let required = registry.system::<MovementSystem>().unwrap().members().signature();
    let actual = registry.signature(entity).unwrap();
    assert!(!actual.contains_all(required));
    assert!(registry.system::<MovementSystem>().unwrap().members().is_empty());
}

#[test]
fn movement_scenario() {
    // Given
    let mut registry = Registry::new();
    registry.add_system(MovementSystem::new().unwrap()).unwrap();

    let e0 = registry.spawn();
    registry
        .add_component(
            e0,
            Transform::new(Vec2::new(10.0, 5.0), Vec2::new(1.0, 2.0), 180.0),
        )
        .unwrap();
    registry
        .add_component(e0, RigidBody::new(Vec2::new(100.0, 50.0)))
        .unwrap();

    // When
    registry.update();

    // Then
    assert_eq!(
        registry.system::<MovementSystem>().unwrap().members().entities(),
        &[e0]
    );

    tick(&mut registry, 0.5);
    let transform = registry.get_component::<Transform>(e0).unwrap();
    assert_eq!(transform.position, Vec2::new(60.0, 30.0));
    assert_eq!(transform.scale, Vec2::new(1.0, 2.0));
    assert_eq!(transform.rotation, 180.0);
}

#[test]
fn only_matching_entities_join() {
    // Given
    let mut registry = Registry::new();
    registry.add_system(MovementSystem::new().unwrap()).unwrap();
    let entities: Vec<_> = (0..3).map(|_| registry.spawn()).collect();

    // When
    for &entity in &entities {
        registry.add_component(entity, Transform::default()).unwrap();
    }
    for &entity in &entities[..2] {
        registry.add_component(entity, RigidBody::default()).unwrap();
    }
    registry.update();

    // Then
    let members = registry.system::<MovementSystem>().unwrap().members();
    assert_eq!(members.len(), 2);
    assert!(members.contains(entities[0]));
    assert!(members.contains(entities[1]));
    assert!(!members.contains(entities[2]));
}

#[test]
fn killed_entities_leave_every_system() {
    // Given
    let mut registry = Registry::new();
    registry.add_system(MovementSystem::new().unwrap()).unwrap();
    registry.add_system(RenderSystem::new().unwrap()).unwrap();
    let entity = registry.spawn();
    registry.add_component(entity, Transform::default()).unwrap();
    registry.add_component(entity, RigidBody::default()).unwrap();
    registry.add_component(entity, Sprite::default()).unwrap();
    registry.update();

    // When
    registry.kill(entity).unwrap();
    registry.update();

    // Then
    assert!(registry.system::<MovementSystem>().unwrap().members().is_empty());
    assert!(registry.system::<RenderSystem>().unwrap().members().is_empty());
    assert!(registry.is_empty());

    let reused = registry.spawn();
    assert_eq!(reused.id(), entity.id());
    assert_eq!(registry.signature(reused).unwrap(), Signature::EMPTY);
}

#[test]
fn spawn_and_kill_in_the_same_frame() {
    let mut registry = Registry::new();
    registry.add_system(MovementSystem::new().unwrap()).unwrap();
    let entity = registry.spawn();
    registry.add_component(entity, Transform::default()).unwrap();
    registry.add_component(entity, RigidBody::default()).unwrap();
    registry.kill(entity).unwrap();

    registry.update();

    assert!(registry.system::<MovementSystem>().unwrap().members().is_empty());
    assert!(!registry.is_alive(entity));
}

#[test]
fn repeated_resync_never_duplicates_members() {
    // Given
    let mut registry = Registry::new();
    registry.add_system(MovementSystem::new().unwrap()).unwrap();
    let entity = registry.spawn();
    registry.add_component(entity, Transform::default()).unwrap();
    registry.add_component(entity, RigidBody::default()).unwrap();
    registry.update();

    // When
    for _ in 0..3 {
        registry.add_component(entity, Sprite::default()).unwrap();
        registry.update();
        registry.remove_component::<Sprite>(entity).unwrap();
        registry.update();
        registry.add_entity_to_systems(entity).unwrap();
    }

    // Then
    assert_eq!(
        registry.system::<MovementSystem>().unwrap().members().entities(),
        &[entity]
    );
}

#[test]
fn unregistered_system_is_an_error() {
    let mut registry = Registry::new();

    assert!(matches!(
        registry.system::<RenderSystem>(),
        Err(Error::UnknownSystem(_))
    ));
    assert!(matches!(
        registry.remove_system::<RenderSystem>(),
        Err(Error::UnknownSystem(_))
    ));
}
