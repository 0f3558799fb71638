use std::collections::HashMap;
use std::path::Path;

use changeset_core::Workspaces;
use indexmap::IndexMap;

use crate::config::GateConfig;

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty() && *s != ".")
}

/// Normalizes a workspace directory: no `./`, no empty segments, no trailing `/`.
#[must_use]
pub fn normalize_location(location: &str) -> String {
    segments(location).collect::<Vec<_>>().join("/")
}

/// Lookup from normalized workspace directory to package name.
pub struct WorkspaceIndex<'a> {
    by_location: HashMap<&'a str, &'a str>,
}

impl<'a> WorkspaceIndex<'a> {
    #[must_use]
    pub fn new(workspaces: &'a Workspaces) -> Self {
        let mut by_location = HashMap::with_capacity(workspaces.len());
        for entry in workspaces.values() {
            // first listed package wins a shared directory
            by_location
                .entry(entry.location.as_str())
                .or_insert(entry.name.as_str());
        }
        Self { by_location }
    }

    /// Finds the package owning `file`.
    ///
    /// The filename is dropped and directory prefixes are probed from the
    /// deepest one upward, so a file inside a nested workspace belongs to the
    /// nested package rather than its ancestor.
    #[must_use]
    pub fn resolve(&self, file: &str) -> Option<&'a str> {
        let directory = file.rfind('/').map_or("", |idx| &file[..idx]);
        let parts: Vec<&str> = segments(directory).collect();

        (1..=parts.len()).rev().find_map(|depth| {
            let candidate = parts[..depth].join("/");
            self.by_location.get(candidate.as_str()).copied()
        })
    }
}

/// Resolves a single changed file against the workspace listing.
#[must_use]
pub fn resolve_package<'a>(file: &str, workspaces: &'a Workspaces) -> Option<&'a str> {
    WorkspaceIndex::new(workspaces).resolve(file)
}

/// Changed files attributed to one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFiles {
    pub package: String,
    pub files: Vec<String>,
}

/// Result of mapping changed files to packages.
///
/// Packages appear in the order their first file was encountered.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileMapping {
    pub package_files: Vec<PackageFiles>,
    pub unowned_files: Vec<String>,
    pub ignored_files: Vec<String>,
}

impl FileMapping {
    #[must_use]
    pub fn touched_packages(&self) -> Vec<&str> {
        self.package_files
            .iter()
            .filter(|pf| !pf.files.is_empty())
            .map(|pf| pf.package.as_str())
            .collect()
    }
}

#[must_use]
pub fn map_files_to_packages(
    workspaces: &Workspaces,
    changed_files: &[String],
    config: &GateConfig,
) -> FileMapping {
    let index = WorkspaceIndex::new(workspaces);

    let mut package_files: IndexMap<&str, Vec<String>> = IndexMap::new();
    let mut unowned_files = Vec::new();
    let mut ignored_files = Vec::new();

    for file in changed_files {
        if config.is_ignored(Path::new(&normalize_location(file))) {
            ignored_files.push(file.clone());
            continue;
        }

        match index.resolve(file) {
            Some(package) => package_files.entry(package).or_default().push(file.clone()),
            None => unowned_files.push(file.clone()),
        }
    }

    FileMapping {
        package_files: package_files
            .into_iter()
            .map(|(package, files)| PackageFiles {
                package: package.to_string(),
                files,
            })
            .collect(),
        unowned_files,
        ignored_files,
    }
}
