//! Output units of a generation run.

use crate::dispatch::ReaderDispatchTable;
use crate::emitter::GeneratedClass;
use crate::namespace::NamespaceTree;
use avrobind_core::{GenError, GenResult};
use std::fs;
use std::path::{Path, PathBuf};

/// One file of the generated package, relative to the output root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    pub path: PathBuf,
    pub contents: String,
}

impl OutputUnit {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Everything a generation run produced
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
    /// Files, in write order.
    pub units: Vec<OutputUnit>,

    /// Classes in emission order.
    pub classes: Vec<GeneratedClass>,

    pub dispatch: ReaderDispatchTable,

    pub namespaces: NamespaceTree,
}

impl GeneratedOutput {
    pub fn unit(&self, path: impl AsRef<Path>) -> Option<&OutputUnit> {
        let path = path.as_ref();
        self.units.iter().find(|unit| unit.path == path)
    }

    pub fn class(&self, fullname: &str) -> Option<&GeneratedClass> {
        self.classes.iter().find(|class| class.fullname == fullname)
    }

    /// Write every unit below `root`, creating directories as needed.
    ///
    /// Units already written stay on disk if a later one fails.
    pub fn write_to(&self, root: impl AsRef<Path>) -> GenResult<()> {
        let root = root.as_ref();
        for unit in &self.units {
            let path = root.join(&unit.path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| GenError::Output {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::write(&path, &unit.contents).map_err(|source| GenError::Output {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), bytes = unit.contents.len(), "wrote output unit");
        }
        Ok(())
    }
}
