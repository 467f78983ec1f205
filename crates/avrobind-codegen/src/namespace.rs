//! Namespace containers and emission scopes.
//!
//! Two views of the same namespace hierarchy are kept during a run:
//!
//! - [`NamespaceTree`] records which packages exist on disk and which
//!   generated classes each one re-exports. It only ever grows.
//! - [`ScopeTracker`] follows the nesting of scope classes inside
//!   `schema_classes.py` while classes are being written, so that every class
//!   lands in the scope of its namespace.

use crate::naming::{class_name, namespace_segments, py_str, split_fullname};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::PathBuf;

/// Packages generated for the namespaces of a document
#[derive(Debug, Clone, Default)]
pub struct NamespaceTree {
    /// Namespace path -> class names exported from that package.
    containers: IndexMap<Vec<String>, Vec<String>>,

    /// Classes of the null namespace, exported by the root package.
    root: Vec<String>,
}

impl NamespaceTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create every container along `namespace` that does not exist yet.
    ///
    /// Returns the number of containers created by this call.
    pub fn ensure(&mut self, namespace: Option<&str>) -> usize {
        let segments = namespace_segments(namespace);
        let mut created = 0;
        for depth in 1..=segments.len() {
            let path = &segments[..depth];
            if !self.containers.contains_key(path) {
                tracing::debug!(container = %path.join("."), "created namespace container");
                self.containers.insert(path.to_vec(), Vec::new());
                created += 1;
            }
        }
        created
    }

    /// Add the class generated for `fullname` to its container's exports,
    /// creating the container first if needed. Returns the namespace path.
    pub fn register(&mut self, fullname: &str) -> Vec<String> {
        let (namespace, short_name) = split_fullname(fullname);
        self.ensure(namespace);
        let path = namespace_segments(namespace);
        let members = match self.containers.get_mut(path.as_slice()) {
            Some(members) => members,
            None => &mut self.root,
        };
        members.push(class_name(short_name));
        path
    }

    pub fn contains(&self, path: &[String]) -> bool {
        self.containers.contains_key(path)
    }

    /// Classes exported from the container at `path`; the empty path is the root package.
    pub fn members(&self, path: &[String]) -> Option<&[String]> {
        if path.is_empty() {
            return Some(&self.root);
        }
        self.containers.get(path).map(Vec::as_slice)
    }

    /// Containers in creation order.
    pub fn containers(&self) -> impl Iterator<Item = (&[String], &[String])> {
        self.containers
            .iter()
            .map(|(path, members)| (path.as_slice(), members.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// `(relative path, contents)` of every namespace package's `__init__.py`.
    pub fn package_inits(&self) -> Vec<(PathBuf, String)> {
        self.containers()
            .map(|(path, members)| {
                let mut file: PathBuf = path.iter().collect();
                file.push("__init__.py");
                (file, render_package_init(path, members))
            })
            .collect()
    }
}

/// Contents of a namespace package's `__init__.py`.
///
/// Intermediate packages without classes of their own are empty markers.
pub fn render_package_init(path: &[String], members: &[String]) -> String {
    let Some(first) = path.first() else {
        return render_root_init(members);
    };
    if members.is_empty() {
        return String::new();
    }

    let dots = ".".repeat(path.len() + 1);
    let mut out = format!("from {dots}schema_classes import {first} as _{first}\n\n");
    let scope = std::iter::once(format!("_{first}"))
        .chain(path[1..].iter().cloned())
        .collect::<Vec<_>>()
        .join(".");
    for member in members {
        out.push_str(&format!("{member} = {scope}.{member}\n"));
    }
    out.push_str(&format!("\n__all__ = {}\n", py_list(members)));
    out
}

/// Contents of the root package's `__init__.py`.
pub fn render_root_init(members: &[String]) -> String {
    let mut exports = vec!["SpecificDatumReader".to_string()];
    exports.extend(members.iter().cloned());

    let mut out = String::new();
    for export in &exports {
        out.push_str(&format!("from .schema_classes import {export}\n"));
    }
    out.push_str(&format!("\n__all__ = {}\n", py_list(&exports)));
    out
}

fn py_list(items: &[String]) -> String {
    let items: Vec<String> = items.iter().map(|item| py_str(item)).collect();
    format!("[{}]", items.join(", "))
}

/// Scope changes needed to move the emission cursor to a namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeTransition {
    /// Number of open scopes to close, innermost first.
    pub close: usize,

    /// Scopes to open, outermost first.
    pub open: Vec<String>,
}

impl ScopeTransition {
    pub fn is_empty(&self) -> bool {
        self.close == 0 && self.open.is_empty()
    }
}

/// Tracks which scope classes are open in the generated module
#[derive(Debug, Clone, Default)]
pub struct ScopeTracker {
    open: Vec<String>,
    closed: HashSet<Vec<String>>,
}

impl ScopeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently open scope path, outermost first.
    pub fn current(&self) -> &[String] {
        &self.open
    }

    /// Move to `target`: keep the longest common prefix of the open path
    /// and `target`, close everything below it, open the rest in order.
    ///
    /// Scopes are never merged across branches. Opening a path that was
    /// already closed once produces a second scope class of the same name,
    /// which shadows the first; this is logged.
    pub fn transition(&mut self, target: &[String]) -> ScopeTransition {
        let common = self
            .open
            .iter()
            .zip(target)
            .take_while(|(open, wanted)| open == wanted)
            .count();

        let close = self.open.len() - common;
        while self.open.len() > common {
            self.closed.insert(self.open.clone());
            self.open.pop();
        }

        let open = target[common..].to_vec();
        for segment in &open {
            self.open.push(segment.clone());
            if self.closed.contains(&self.open) {
                tracing::warn!(
                    scope = %self.open.join("."),
                    "reopening a namespace scope that was already closed"
                );
            }
        }

        ScopeTransition { close, open }
    }

    /// Close every open scope.
    pub fn close_all(&mut self) -> ScopeTransition {
        self.transition(&[])
    }
}
