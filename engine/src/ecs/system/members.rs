use crate::ecs::{
    component::{self, Component},
    entity::Entity,
    error::Result,
    signature::{IntoSignature, Signature},
};

/// A system's component requirement and the entities currently known to satisfy it.
///
/// The requirement is declared while the system is constructed and is read by the registry every
/// time it reconciles membership. The entity list is kept in insertion order and never holds the
/// same entity twice.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Members {
    signature: Signature,
    entities: Vec<Entity>,
}

impl Members {
    /// A membership with no requirement. It matches every entity.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A membership requiring every component in `S`, e.g. `Members::requiring::<(A, B)>()`.
    pub fn requiring<S: IntoSignature>() -> Result<Self> {
        Ok(Self {
            signature: S::into_signature()?,
            entities: Vec::new(),
        })
    }

    /// Add component `C` to the requirement.
    pub fn require<C: Component>(&mut self) -> Result<&mut Self> {
        self.signature.insert(component::id::<C>())?;
        Ok(self)
    }

    /// The required signature.
    #[inline]
    pub fn signature(&self) -> Signature {
        self.signature
    }

    /// Whether an entity with `signature` satisfies the requirement.
    #[inline]
    pub fn matches(&self, signature: Signature) -> bool {
        signature.contains_all(self.signature)
    }

    /// The member entities in the order they joined.
    #[inline]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Append `entity`, returning `false` if it was already a member.
    pub fn add(&mut self, entity: Entity) -> bool {
        if self.contains(entity) {
            return false;
        }
        self.entities.push(entity);
        true
    }

    /// Remove every entry with `entity`'s id, returning whether anything was removed.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let before = self.entities.len();
        self.entities.retain(|member| member.id() != entity.id());
        self.entities.len() != before
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::entity::{Entity, Id};

    #[test]
    fn add_is_deduplicated_and_ordered() {
        // Given
        let mut members = Members::new();

        // When
        assert!(members.add(Entity::new(3)));
        assert!(members.add(Entity::new(1)));
        assert!(!members.add(Entity::new(3)));

        // Then
        assert_eq!(members.entities(), &[Entity::new(3), Entity::new(1)]);
        assert_eq!(members.len(), 2);
    }

    #[test]
    fn remove_matches_by_id() {
        // Given
        let mut members = Members::new();
        members.add(Entity::new(0));
        members.add(Entity::new(5));

        // When
        let removed = members.remove(Entity::new(Id::from(5)));

        // Then
        assert!(removed);
        assert_eq!(members.entities(), &[Entity::new(0)]);
        assert!(!members.remove(Entity::new(5)));
        assert!(!members.is_empty());
    }

    #[test]
    fn empty_requirement_matches_everything() {
        let members = Members::new();
        assert!(members.matches(Signature::EMPTY));
        assert_eq!(members.signature(), Signature::EMPTY);
    }
}
