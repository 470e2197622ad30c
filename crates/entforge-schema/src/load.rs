use crate::{MAX_SOURCE_DEPTH, SchemaError, node::EntityDef, set::EntitySet};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Suffix distinguishing entity definition documents from other files in the
/// source tree.
pub const ENTITY_FILE_SUFFIX: &str = ".entity.toml";

/// Parse a single definition document.
pub fn parse_entity(text: &str) -> Result<EntityDef, toml::de::Error> {
    toml::from_str(text)
}

/// Load one definition document from disk.
pub fn load_file(path: &Path) -> Result<EntityDef, SchemaError> {
    let text = fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_entity(&text).map_err(|source| SchemaError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load every `*.entity.toml` under `dir` (recursively, sorted path order)
/// into a working set.
///
/// Sorted traversal makes the working-set order — and with it every
/// order-dependent resolver outcome — a pure function of the on-disk layout.
pub fn load_dir(dir: &Path) -> Result<EntitySet, SchemaError> {
    let mut paths = Vec::new();
    collect_definition_paths(dir, 0, &mut paths)?;
    paths.sort();

    let mut entities = Vec::with_capacity(paths.len());
    for path in &paths {
        entities.push(load_file(path)?);
    }

    EntitySet::new(entities)
}

fn collect_definition_paths(
    dir: &Path,
    depth: usize,
    out: &mut Vec<PathBuf>,
) -> Result<(), SchemaError> {
    if depth > MAX_SOURCE_DEPTH {
        return Ok(());
    }

    let entries = fs::read_dir(dir).map_err(|source| SchemaError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| SchemaError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.is_dir() {
            collect_definition_paths(&path, depth + 1, out)?;
        } else if path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(ENTITY_FILE_SUFFIX))
        {
            out.push(path);
        }
    }

    Ok(())
}

///
/// TESTS
///
