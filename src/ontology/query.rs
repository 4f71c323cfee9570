use std::collections::{BTreeSet, VecDeque};

use thiserror::Error;

use super::{
    entities::{Class, Ontology},
    store::OntologyStore,
    value_objects::Iri,
};

/// Lookup misses reported to callers as client errors.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The requested ontology name is not a key of the store.
    #[error("Ontology '{name}' not found. Available ontologies: {available:?}")]
    UnknownOntology {
        name: String,
        available: Vec<String>,
    },
    /// No class IRI ends with the requested fragment.
    #[error("Class '{class}' not found in the ontology '{ontology}'.")]
    ClassNotFound { ontology: String, class: String },
}

/// Returns the ancestor set of the class matching `class_name` in the
/// ontology named `ontology_name`.
///
/// The unknown-ontology check runs before any search. The result is ordered
/// by IRI, contains the matched class itself and always ends up containing
/// `owl:Thing`.
pub fn fetch_superclasses(
    store: &OntologyStore,
    ontology_name: &str,
    class_name: &str,
) -> Result<Vec<Class>, QueryError> {
    let ontology = store
        .get(ontology_name)
        .ok_or_else(|| QueryError::UnknownOntology {
            name: ontology_name.to_string(),
            available: store.names(),
        })?;

    tracing::debug!(ontology = ontology_name, class = class_name, "fetching superclasses");

    let class = find_class(ontology, class_name).ok_or_else(|| QueryError::ClassNotFound {
        ontology: ontology_name.to_string(),
        class: class_name.to_string(),
    })?;

    Ok(ancestors(ontology, class))
}

/// Finds the class whose IRI ends with `fragment`.
///
/// An exact local-name match wins over a longer IRI that merely ends with the
/// fragment; otherwise the lexicographically smallest matching IRI is used.
#[must_use]
pub fn find_class<'a>(ontology: &'a Ontology, fragment: &str) -> Option<&'a Class> {
    let mut first_match = None;
    for (iri, class) in ontology.classes() {
        if !iri.matches_fragment(fragment) {
            continue;
        }
        if iri.local_name() == fragment {
            return Some(class);
        }
        first_match.get_or_insert(class);
    }
    first_match
}

/// Reflexive, transitive closure of the `is-a` edges of `start`, asserted and
/// inferred, plus `owl:Thing`.
///
/// Parents that are not declared in `ontology` are reported with no labels
/// and are not expanded further.
#[must_use]
pub fn ancestors(ontology: &Ontology, start: &Class) -> Vec<Class> {
    let mut visited: BTreeSet<Iri> = BTreeSet::from([start.id().clone()]);
    let mut queue: VecDeque<&Iri> = start.all_parents().collect();

    while let Some(current) = queue.pop_front() {
        if visited.insert(current.clone()) {
            if let Some(parent) = ontology.class(current) {
                queue.extend(parent.all_parents());
            }
        }
    }
    visited.insert(Iri::owl_thing());

    visited
        .into_iter()
        .map(|iri| {
            ontology
                .class(&iri)
                .cloned()
                .unwrap_or_else(|| Class::new(iri))
        })
        .collect()
}

/// Human readable name of a class: its first declared label, otherwise its
/// local name.
#[must_use]
pub fn resolve_label(class: &Class) -> String {
    class
        .labels()
        .first()
        .map_or_else(|| class.local_name().to_string(), Clone::clone)
}

#[cfg(test)]
mod tests {
    use super::{ancestors, find_class, resolve_label};
    use crate::ontology::{entities::Class, value_objects::Iri, Ontology};

    fn iri(text: &str) -> Iri {
        Iri::new(text).expect("valid iri")
    }

    fn zoo() -> Ontology {
        let mut ontology = Ontology::new("zoo", iri("http://example.org/zoo"), "/tmp/zoo.owl");
        ontology.add_class(Class::new(iri("http://example.org/zoo#Animal")));
        let mut mammal = Class::new(iri("http://example.org/zoo#Mammal"));
        mammal.add_parent(iri("http://example.org/zoo#Animal"));
        ontology.add_class(mammal);
        let mut dog = Class::new(iri("http://example.org/zoo#Dog")).with_label("Dog");
        dog.add_parent(iri("http://example.org/zoo#Mammal"));
        ontology.add_class(dog);
        let mut bulldog = Class::new(iri("http://example.org/zoo#BullDog"));
        bulldog.add_parent(iri("http://example.org/zoo#Dog"));
        bulldog.add_parent(iri("http://example.org/other#Breed"));
        ontology.add_class(bulldog);
        ontology
    }

    #[test]
    fn exact_local_name_wins_over_suffix_match() {
        let ontology = zoo();
        let class = find_class(&ontology, "Dog").expect("match");
        assert_eq!(class.id().as_str(), "http://example.org/zoo#Dog");
    }

    #[test]
    fn suffix_match_falls_back_to_smallest_iri() {
        let ontology = zoo();
        let class = find_class(&ontology, "ullDog").expect("match");
        assert_eq!(class.id().as_str(), "http://example.org/zoo#BullDog");
        assert!(find_class(&ontology, "Cat").is_none());
        assert!(find_class(&ontology, "").is_none());
    }

    #[test]
    fn ancestors_are_reflexive_and_transitive() {
        let ontology = zoo();
        let dog = find_class(&ontology, "Dog").unwrap();
        let names: Vec<String> = ancestors(&ontology, dog).iter().map(resolve_label).collect();
        assert_eq!(names, ["Animal", "Dog", "Mammal", "Thing"]);
    }

    #[test]
    fn foreign_parents_are_reported_without_expansion() {
        let ontology = zoo();
        let bulldog = find_class(&ontology, "BullDog").unwrap();
        let ids: Vec<String> = ancestors(&ontology, bulldog)
            .iter()
            .map(|class| class.id().to_string())
            .collect();
        assert!(ids.contains(&"http://example.org/other#Breed".to_string()));
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn labels_fall_back_to_local_name() {
        let labelled = Class::new(iri("http://example.org/zoo#Dog"))
            .with_label("Dog")
            .with_label("Canine");
        assert_eq!(resolve_label(&labelled), "Dog");

        let bare = Class::new(iri("http://example.org/zoo#Animal_003"));
        assert_eq!(resolve_label(&bare), "Animal_003");
    }
}
