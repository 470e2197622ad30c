//! Entforge Generate — relationship resolution, emitters and the pipeline
//!
//! The resolver runs one pure pass over the working set and freezes its two
//! outputs (synthesized reverse associations, association-identifier
//! overrides) before any emitter is invoked. Emitters are stateless text
//! producers behind one shared trait; the pipeline drives them in a fixed
//! order and writes whole-file artifacts to deterministic paths.

pub mod config;
pub mod emit;
pub mod pipeline;
pub mod resolve;

use entforge_schema::SchemaError;
use std::path::PathBuf;
use thiserror::Error as ThisError;

pub use config::GenerateConfig;
pub use pipeline::{Artifact, GenerationReport, generate, generate_set};
pub use resolve::{Resolution, ReverseAssociation, resolve};

///
/// GenerateError
///
/// Resolution never fails; everything fatal here is either a schema load
/// problem or an artifact write. Writes abort the remaining run and leave
/// already-written files in place.
///

#[derive(Debug, ThisError)]
pub enum GenerateError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
