//! Container Registry: the static catalog of supported container kinds.
//!
//! Kinds are addressed by a strongly-typed [`ContainerKindId`]. A kind string
//! that is not in the catalog loads as `ContainerKindId::Custom`, which the
//! registry treats as "no type": the container keeps its ports and variables
//! but is excluded from dependency wiring and gets no generated Dockerfile.
//!
//! ```
//! use ezdeploy::catalog::{ContainerKindId, ContainerRegistry, TypeClass};
//!
//! let registry = ContainerRegistry::with_defaults();
//! assert_eq!(registry.type_class(&ContainerKindId::Postgres), Some(TypeClass::Database));
//! assert_eq!(registry.image(&ContainerKindId::Postgres), Some("postgres:16"));
//! ```

#[macro_use]
pub mod id_enum_macro;

pub mod kind_id;
pub mod kinds;
pub mod registry;
pub mod type_class;

pub use kind_id::ContainerKindId;
pub use kinds::ContainerKind;
pub use registry::ContainerRegistry;
pub use type_class::TypeClass;
