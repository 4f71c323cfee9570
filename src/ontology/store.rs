use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;

use super::{entities::Ontology, loader, reasoner::Reasoner};
use crate::config::OntologySettings;

/// Outcome of the one-shot reasoning phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReasoningStatus {
    /// Nothing was classified: the store was empty or reasoning is disabled.
    Skipped,
    /// The reasoner ran; `inferred` new edges were merged.
    Completed { inferred: usize },
    /// The reasoner failed; only asserted knowledge is available.
    Failed { reason: String },
}

/// Name → ontology mapping populated once at boot.
#[derive(Clone, Debug, Default)]
pub struct OntologyStore {
    directory: PathBuf,
    ontologies: BTreeMap<String, Ontology>,
}

impl OntologyStore {
    /// Creates an empty store for `directory`.
    #[must_use]
    pub fn empty(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ontologies: BTreeMap::new(),
        }
    }

    /// Scans `settings.directory` and loads every recognized file.
    ///
    /// A missing directory is created and yields an empty store. Files that
    /// fail to load are logged and skipped; the scan itself never fails.
    /// Entries are visited in file-name order and the first file to claim a
    /// derived name keeps it.
    #[must_use]
    pub fn load_all(settings: &OntologySettings) -> Self {
        let directory = settings.directory.as_path();
        let mut store = Self::empty(directory);

        if !directory.exists() {
            tracing::warn!(directory = %directory.display(), "ontology directory not found, creating it");
            if let Err(error) = fs::create_dir_all(directory) {
                tracing::error!(directory = %directory.display(), err.msg = %error, "failed to create ontology directory");
                return store;
            }
            tracing::info!(
                directory = %directory.display(),
                "add ontology files to the directory and restart the service"
            );
            return store;
        }

        tracing::info!(directory = %directory.display(), "scanning for ontologies");
        for (name, path) in candidates(directory, &settings.extensions) {
            if store.ontologies.contains_key(&name) {
                tracing::warn!(ontology = %name, path = %path.display(), "duplicate ontology name, skipping file");
                continue;
            }
            if let Some(ontology) = load_one(&name, &path) {
                store.ontologies.insert(name, ontology);
            }
        }
        store
    }

    /// Runs `reasoner` once over every loaded ontology and merges the
    /// inferred edges in place.
    ///
    /// Failures are logged and reported through the returned status; the
    /// store keeps its asserted knowledge.
    pub async fn reason_all(&mut self, reasoner: &dyn Reasoner) -> ReasoningStatus {
        if self.ontologies.is_empty() {
            return ReasoningStatus::Skipped;
        }

        tracing::info!(reasoner = reasoner.name(), ontologies = self.ontologies.len(), "running reasoner on all loaded ontologies");
        let result = {
            let ontologies: Vec<&Ontology> = self.ontologies.values().collect();
            reasoner.classify(&ontologies).await
        };

        match result {
            Ok(edges) => {
                let mut inferred = 0;
                for edge in &edges {
                    for ontology in self.ontologies.values_mut() {
                        if ontology.merge_inferred(&edge.sub, &edge.sup) {
                            inferred += 1;
                        }
                    }
                }
                tracing::info!(inferred, "reasoning completed successfully");
                ReasoningStatus::Completed { inferred }
            }
            Err(error) => {
                tracing::error!(err.msg = %error, err.detail = ?error, "reasoning failed, check that the reasoner is installed and accessible");
                tracing::warn!("continuing with explicitly asserted (non-inferred) knowledge only");
                ReasoningStatus::Failed {
                    reason: error.to_string(),
                }
            }
        }
    }

    /// Inserts an already built ontology under its own name.
    pub fn insert(&mut self, ontology: Ontology) {
        self.ontologies.insert(ontology.name().to_string(), ontology);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Ontology> {
        self.ontologies.get(name)
    }

    /// Loaded ontology names in lexical order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.ontologies.keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ontologies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ontologies.is_empty()
    }

    /// The directory the store was populated from.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

/// Direct entries of `directory` ending with one of `extensions`, sorted by
/// file name, paired with their derived names.
fn candidates(directory: &Path, extensions: &[String]) -> Vec<(String, PathBuf)> {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::error!(directory = %directory.display(), err.msg = %error, "failed to read ontology directory");
            return Vec::new();
        }
    };

    let mut found: Vec<(String, String, PathBuf)> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::error!(err.msg = %error, "failed to read directory entry");
                None
            }
        })
        .filter_map(|entry| {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let name = derive_name(&file_name, extensions)?;
            Some((file_name, name, entry.path()))
        })
        .collect();
    found.sort_by(|left, right| left.0.cmp(&right.0));
    found
        .into_iter()
        .map(|(_, name, path)| (name, path))
        .collect()
}

/// Strips the first matching suffix from `file_name`.
///
/// Returns `None` when no suffix matches or nothing would remain.
#[must_use]
pub fn derive_name(file_name: &str, extensions: &[String]) -> Option<String> {
    extensions
        .iter()
        .find_map(|extension| file_name.strip_suffix(extension.as_str()))
        .filter(|stem| !stem.is_empty())
        .map(ToString::to_string)
}

fn load_one(name: &str, path: &Path) -> Option<Ontology> {
    let absolute = match fs::canonicalize(path) {
        Ok(absolute) => absolute,
        Err(error) => {
            tracing::error!(ontology = %name, path = %path.display(), err.msg = %error, "failed to resolve ontology path");
            return None;
        }
    };

    tracing::info!(ontology = %name, path = %absolute.display(), "loading ontology");
    match loader::load_file(name, &absolute) {
        Ok(ontology) => {
            tracing::info!(ontology = %name, classes = ontology.classes().len(), "successfully loaded ontology");
            Some(ontology)
        }
        Err(error) => {
            tracing::error!(ontology = %name, err.msg = %error, "failed to load ontology");
            None
        }
    }
}
