//! Generation orchestrator.
//!
//! Load the working set, resolve relationships exactly once, then drive the
//! emitter family over every entity in a fixed order and the cross-entity
//! manifests once at the end. Artifacts are whole-file writes to
//! deterministic paths; a write failure aborts the rest of the run and
//! leaves earlier files in place.

use crate::{
    GenerateError,
    config::GenerateConfig,
    emit::{self, ArtifactKind, EmitContext, manifest},
    resolve::resolve,
};
use entforge_schema::{load, set::EntitySet};
use std::{
    fs,
    path::{Path, PathBuf},
};

///
/// Artifact
///

#[derive(Clone, Debug)]
pub struct Artifact {
    pub path: PathBuf,
    pub kind: ArtifactKind,

    /// Owning entity; `None` for the cross-entity manifests.
    pub entity: Option<String>,
}

///
/// GenerationReport
///

#[derive(Clone, Debug, Default)]
pub struct GenerationReport {
    pub artifacts: Vec<Artifact>,
    pub entity_count: usize,
    pub reverse_count: usize,
    pub override_count: usize,
}

/// Load definitions from the configured source directory and generate.
pub fn generate(config: &GenerateConfig) -> Result<GenerationReport, GenerateError> {
    let set = load::load_dir(&config.entities_dir)?;

    generate_set(&set, config)
}

/// Generate from an already-loaded working set.
pub fn generate_set(
    set: &EntitySet,
    config: &GenerateConfig,
) -> Result<GenerationReport, GenerateError> {
    // Resolution is computed once and frozen before any emitter runs.
    let resolution = resolve(set);
    let family = emit::emitters(config);

    let mut report = GenerationReport {
        entity_count: set.len(),
        reverse_count: resolution.reverse_count(),
        override_count: resolution.override_count(),
        ..GenerationReport::default()
    };

    for entity in set {
        let ctx = EmitContext::new(entity, &resolution, set, config);

        for emitter in &family {
            let Some(path) = emitter.path(entity, config) else {
                continue;
            };
            write_artifact(&path, &emitter.emit(&ctx))?;
            report.artifacts.push(Artifact {
                path,
                kind: emitter.kind(),
                entity: Some(entity.entity.clone()),
            });
        }
    }

    if let Some(path) = manifest::navigation_path(config) {
        write_artifact(&path, &manifest::emit_navigation(set))?;
        report.artifacts.push(Artifact {
            path,
            kind: ArtifactKind::Navigation,
            entity: None,
        });
    }

    if let Some(path) = manifest::routes_path(config) {
        write_artifact(&path, &manifest::emit_routes(set))?;
        report.artifacts.push(Artifact {
            path,
            kind: ArtifactKind::Routes,
            entity: None,
        });
    }

    Ok(report)
}

// Whole-file replacement; parent directories created on demand.
fn write_artifact(path: &Path, contents: &str) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| GenerateError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, contents).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

///
/// TESTS
///
