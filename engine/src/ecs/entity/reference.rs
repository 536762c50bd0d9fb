use crate::ecs::{
    component::Component,
    entity::Entity,
    error::Result,
    registry::Registry,
    signature::Signature,
    storage::Components,
};

/// A reference to an entity with read-only access to its components.
/// The lifetime `'w` ties the reference to the registry that issued it.
pub struct Ref<'w> {
    /// The entity this reference points to.
    entity: Entity,
    /// The storage holding this entity's components.
    components: &'w Components,
}

impl<'w> Ref<'w> {
    /// Create a new Ref for an entity and its storage. The entity must already be validated.
    #[inline]
    pub(crate) const fn new(entity: Entity, components: &'w Components) -> Self {
        Self { entity, components }
    }

    /// Whether this entity has a `C`.
    #[inline]
    pub fn has<C: Component>(&self) -> bool {
        self.components.has::<C>(self.entity)
    }

    /// Get a reference to a component on this entity.
    pub fn get<C: Component>(&self) -> Result<&'w C> {
        self.components.get::<C>(self.entity)
    }

    /// Get the current signature of the referenced entity.
    pub fn signature(&self) -> Result<Signature> {
        self.components.signature(self.entity)
    }

    /// Get the entity this reference points to.
    #[inline]
    pub fn entity(&self) -> Entity {
        self.entity
    }
}

/// A mutable reference to an entity. Structural changes go through the registry so that
/// membership bookkeeping stays consistent.
pub struct RefMut<'w> {
    /// The entity this reference points to.
    entity: Entity,
    /// The registry that owns the entity.
    registry: &'w mut Registry,
}

impl<'w> RefMut<'w> {
    #[inline]
    pub(crate) fn new(entity: Entity, registry: &'w mut Registry) -> Self {
        Self { entity, registry }
    }

    /// Attach `value`, replacing any existing `C`. Chains for builder-style setup.
    pub fn add<C: Component>(&mut self, value: C) -> Result<&mut Self> {
        self.registry.add_component(self.entity, value)?;
        Ok(self)
    }

    /// Detach `C` from this entity.
    pub fn remove<C: Component>(&mut self) -> Result<&mut Self> {
        self.registry.remove_component::<C>(self.entity)?;
        Ok(self)
    }

    #[inline]
    pub fn has<C: Component>(&self) -> bool {
        self.registry.has_component::<C>(self.entity)
    }

    /// Get a reference to a component on this entity.
    pub fn get<C: Component>(&self) -> Result<&C> {
        self.registry.get_component::<C>(self.entity)
    }

    /// Get a mutable reference to a component on this entity.
    pub fn get_mut<C: Component>(&mut self) -> Result<&mut C> {
        self.registry.get_component_mut::<C>(self.entity)
    }

    /// Schedule this entity for removal at the next reconciliation.
    pub fn kill(self) -> Result<()> {
        self.registry.kill(self.entity)
    }

    /// Get the entity this reference points to.
    #[inline]
    pub fn entity(&self) -> Entity {
        self.entity
    }
}

#[cfg(test)]
mod tests {
    use crate::ecs::{Component, Registry};

    #[derive(Debug, PartialEq)]
    struct Tag(u8);
    impl Component for Tag {}

    #[test]
    fn builds_and_reads_through_references() {
        // Given
        let mut registry = Registry::new();
        let entity = registry.spawn();

        // When
        registry
            .entity_mut(entity)
            .and_then(|mut e| e.add(Tag(3)).map(|_| ()))
            .unwrap();

        // Then
        let reference = registry.entity(entity).unwrap();
        assert!(reference.has::<Tag>());
        assert_eq!(reference.get::<Tag>().unwrap(), &Tag(3));
        assert_eq!(reference.signature().unwrap().len(), 1);
    }

    #[test]
    fn remove_and_kill_through_mutable_reference() {
        // Given
        let mut registry = Registry::new();
        let entity = registry.spawn();
        registry.add_component(entity, Tag(1)).unwrap();

        // When
        let mut reference = registry.entity_mut(entity).unwrap();
        reference.get_mut::<Tag>().unwrap().0 = 9;
        assert_eq!(reference.get::<Tag>().unwrap(), &Tag(9));
        reference.remove::<Tag>().unwrap();
        assert!(!reference.has::<Tag>());
        reference.kill().unwrap();

        // Then
        assert!(registry.is_pending_kill(entity));
        registry.update();
        assert!(registry.entity(entity).is_err());
    }
}
