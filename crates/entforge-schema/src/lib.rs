//! Entforge Schema — the declarative entity model
//!
//! One [`node::EntityDef`] per definition document, collected into an
//! [`set::EntitySet`] with a case-insensitive name index. The model is pure
//! data plus structural lookups; relationship inference and emission live in
//! `entforge-generate`.

pub mod lint;
pub mod load;
pub mod node;
pub mod set;
pub mod types;

use std::path::PathBuf;
use thiserror::Error as ThisError;

/// Maximum nesting depth the definition loader will follow below the source
/// directory.
pub const MAX_SOURCE_DEPTH: usize = 16;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        node::*,
        set::EntitySet,
        types::{CalculationKind, FieldType, RelationKind},
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// SchemaError
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("duplicate entity name '{0}' in working set")]
    DuplicateEntity(String),

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
