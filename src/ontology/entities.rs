use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use oxrdf::Triple;

use super::value_objects::Iri;

/// Ontology class definition capturing labels and parent relationships.
///
/// Asserted parents come from the source document, inferred parents are
/// merged in by the reasoning phase. Both count as `is-a` edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Class {
    id: Iri,
    labels: Vec<String>,
    super_classes: BTreeSet<Iri>,
    inferred_super_classes: BTreeSet<Iri>,
}

impl Class {
    /// Creates a new [`Class`] with the supplied identifier.
    #[must_use]
    pub fn new(id: Iri) -> Self {
        Self {
            id,
            labels: Vec::new(),
            super_classes: BTreeSet::new(),
            inferred_super_classes: BTreeSet::new(),
        }
    }

    /// Appends a human friendly label for the class.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.add_label(label);
        self
    }

    /// Appends a label, keeping declaration order and skipping repeats.
    pub fn add_label(&mut self, label: impl Into<String>) {
        let label = label.into();
        if !self.labels.contains(&label) {
            self.labels.push(label);
        }
    }

    /// Adds a new asserted parent class relation.
    pub fn add_parent(&mut self, parent: Iri) -> bool {
        if parent == self.id {
            return false;
        }
        self.super_classes.insert(parent)
    }

    /// Adds a reasoner-inferred parent class relation.
    ///
    /// Returns `false` when the edge is already known, asserted or inferred.
    pub fn add_inferred_parent(&mut self, parent: Iri) -> bool {
        if parent == self.id || self.super_classes.contains(&parent) {
            return false;
        }
        self.inferred_super_classes.insert(parent)
    }

    /// Returns the unique identifier of the class.
    #[must_use]
    pub fn id(&self) -> &Iri {
        &self.id
    }

    /// Returns the labels in declaration order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the fallback identifier of the class.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.id.local_name()
    }

    /// Returns the asserted parent classes in lexical order.
    #[must_use]
    pub fn parents(&self) -> &BTreeSet<Iri> {
        &self.super_classes
    }

    /// Returns the inferred parent classes in lexical order.
    #[must_use]
    pub fn inferred_parents(&self) -> &BTreeSet<Iri> {
        &self.inferred_super_classes
    }

    /// Iterates over asserted and inferred parents.
    pub fn all_parents(&self) -> impl Iterator<Item = &Iri> {
        self.super_classes
            .iter()
            .chain(self.inferred_super_classes.iter())
    }
}

/// In-memory model of one ontology document.
#[derive(Clone, Debug)]
pub struct Ontology {
    name: String,
    id: Iri,
    source: PathBuf,
    classes: BTreeMap<Iri, Class>,
    triples: Vec<Triple>,
}

impl Ontology {
    /// Creates an empty ontology named `name`, identified by `id` and read
    /// from `source`.
    #[must_use]
    pub fn new(name: impl Into<String>, id: Iri, source: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            id,
            source: source.into(),
            classes: BTreeMap::new(),
            triples: Vec::new(),
        }
    }

    /// Returns the class registered under `id`, creating it when missing.
    pub fn class_entry(&mut self, id: Iri) -> &mut Class {
        self.classes
            .entry(id.clone())
            .or_insert_with(|| Class::new(id))
    }

    /// Adds a class, replacing any previous declaration with the same IRI.
    pub fn add_class(&mut self, class: Class) {
        self.classes.insert(class.id().clone(), class);
    }

    /// Records the asserted triples the ontology was parsed from.
    pub fn set_triples(&mut self, triples: Vec<Triple>) {
        self.triples = triples;
    }

    /// Merges an inferred `sub ⊑ sup` edge. Returns `true` if `sub` is
    /// declared here and the edge was new.
    pub fn merge_inferred(&mut self, sub: &Iri, sup: &Iri) -> bool {
        self.classes
            .get_mut(sub)
            .is_some_and(|class| class.add_inferred_parent(sup.clone()))
    }

    /// Returns the store name (file stem) of the ontology.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ontology identifier.
    #[must_use]
    pub fn id(&self) -> &Iri {
        &self.id
    }

    /// Returns the absolute path the ontology was loaded from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Retrieves a class by identifier.
    #[must_use]
    pub fn class(&self, id: &Iri) -> Option<&Class> {
        self.classes.get(id)
    }

    /// Returns all classes ordered by identifier.
    #[must_use]
    pub fn classes(&self) -> &BTreeMap<Iri, Class> {
        &self.classes
    }

    /// Returns the asserted triples.
    #[must_use]
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }
}
