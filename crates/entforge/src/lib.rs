//! Entforge — schema-driven entity code generation
//!
//! This is the public meta-crate. Downstream users depend on **entforge**
//! only.
//!
//! It re-exports the stable public API from:
//!   - `entforge-utils`    (naming transforms)
//!   - `entforge-schema`   (entity model, loader, lints)
//!   - `entforge-generate` (resolver, emitters, pipeline)

pub use entforge_generate as generate;
pub use entforge_schema as schema;
pub use entforge_utils as utils;

//
// Pipeline entry points
//

pub use entforge_generate::{
    GenerateConfig, GenerateError, GenerationReport, Resolution, generate_set, resolve,
};
pub use entforge_schema::SchemaError;

//
// Prelude
// For code that builds or walks entity models.
//

pub mod prelude {
    pub use entforge_generate::{GenerateConfig, generate_set, resolve};
    pub use entforge_schema::prelude::*;
    pub use entforge_utils::{pluralize, to_camel_case, to_kebab_case};
}
