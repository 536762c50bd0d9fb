pub mod component;
pub mod entity;
pub mod error;
pub mod registry;
pub mod signature;
pub mod storage;
pub mod system;

pub(crate) mod util;

pub use component::Component;
pub use entity::Entity;
pub use error::{Error, Result};
pub use registry::Registry;
pub use signature::{IntoSignature, Signature};
pub use storage::Components;
pub use system::{Members, System};

pub use ember_macros::{Component, System};
