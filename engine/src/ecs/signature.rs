//! Fixed-width component sets.
//!
//! A [`Signature`] records which component types an entity carries, or which ones a system
//! requires. Bit `k` set means "component id `k` is present". An entity satisfies a system when
//! its signature contains every bit of the system's signature.

use std::{fmt, ops};

use crate::{
    all_tuples,
    ecs::{
        component::{self, Component},
        error::{Error, Result},
    },
};

/// A fixed-capacity bit set of component ids.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(u32);

impl Signature {
    /// The number of distinct component types a signature can describe.
    pub const CAPACITY: usize = u32::BITS as usize;

    /// The signature with no components.
    pub const EMPTY: Self = Self(0);

    #[inline]
    const fn bit(id: component::Id) -> Option<u32> {
        if (id.value() as usize) < Self::CAPACITY {
            Some(1 << id.value())
        } else {
            None
        }
    }

    /// Set or clear the bit for `id`.
    ///
    /// Ids beyond [`Signature::CAPACITY`] are a configuration error: the process has seen more
    /// component types than a signature can hold.
    pub fn set(&mut self, id: component::Id, value: bool) -> Result<()> {
        let bit = Self::bit(id).ok_or(Error::ComponentCapacity {
            id: id.value(),
            capacity: Self::CAPACITY,
        })?;
        if value {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
        Ok(())
    }

    /// Set the bit for `id`.
    #[inline]
    pub fn insert(&mut self, id: component::Id) -> Result<()> {
        self.set(id, true)
    }

    /// Clear the bit for `id`. Ids beyond capacity can never be set, so clearing them is a no-op.
    #[inline]
    pub fn remove(&mut self, id: component::Id) {
        if let Some(bit) = Self::bit(id) {
            self.0 &= !bit;
        }
    }

    /// Builder form of [`Signature::insert`].
    #[inline]
    pub fn with(mut self, id: component::Id) -> Result<Self> {
        self.insert(id)?;
        Ok(self)
    }

    /// Test whether the bit for `id` is set.
    #[inline]
    pub fn contains(&self, id: component::Id) -> bool {
        Self::bit(id).is_some_and(|bit| self.0 & bit != 0)
    }

    /// Whether every component in `other` is also in `self`, i.e. `(self & other) == other`.
    #[inline]
    pub fn contains_all(&self, other: Signature) -> bool {
        (*self & other) == other
    }

    /// The number of components in the signature.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate over the component ids in ascending order.
    pub fn ids(self) -> impl Iterator<Item = component::Id> {
        let bits = self.0;
        (0..u32::BITS)
            .filter(move |bit| bits & (1 << bit) != 0)
            .map(component::Id::new)
    }

    /// The raw bit pattern.
    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0
    }
}

impl ops::BitAnd for Signature {
    type Output = Signature;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl ops::BitOr for Signature {
    type Output = Signature;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({:#034b})", self.0)
    }
}

/// Types that describe a set of component types, used to declare system requirements.
pub trait IntoSignature {
    /// Build the signature, assigning component ids on first use.
    fn into_signature() -> Result<Signature>;
}

impl IntoSignature for () {
    fn into_signature() -> Result<Signature> {
        Ok(Signature::EMPTY)
    }
}

impl<C: Component> IntoSignature for C {
    fn into_signature() -> Result<Signature> {
        Signature::EMPTY.with(component::id::<C>())
    }
}

macro_rules! tuple_signature {
    ($($name: ident),*) => {
        impl<$($name: IntoSignature),*> IntoSignature for ($($name,)*) {
            fn into_signature() -> Result<Signature> {
                let mut signature = Signature::EMPTY;
                $(
                    signature = signature | <$name>::into_signature()?;
                )*
                Ok(signature)
            }
        }
    }
}

all_tuples!(tuple_signature);
