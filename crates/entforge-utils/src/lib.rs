//! Entforge Utils — naming transforms shared by every generator crate
//!
//! All emitted identifiers flow through this crate so that persistence,
//! controller and client artifacts agree on casing and pluralization.

pub mod case;

pub use case::{pluralize, to_camel_case, to_kebab_case};
