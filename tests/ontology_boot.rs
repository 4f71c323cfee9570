use std::{
    fs,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use ontology_service::{
    config::OntologySettings,
    environment::Environment,
    ontology::{fetch_superclasses, resolve_label, OntologyService, OntologyStore, QueryError, ReasoningStatus},
    tests_cfg::{
        config::ontology_settings,
        ontology::{
            subsumption, StubReasoner, UnavailableReasoner, ANIMALS_OWL, INVALID_OWL, PLANTS_OWL,
        },
    },
};
use rstest::rstest;

fn labels(store: &OntologyStore, ontology: &str, class: &str) -> Vec<String> {
    let mut labels: Vec<String> = fetch_superclasses(store, ontology, class)
        .expect("class found")
        .iter()
        .map(resolve_label)
        .collect();
    labels.sort();
    labels
}

fn fixture_tree() -> tree_fs::Tree {
    tree_fs::TreeBuilder::default()
        .add_file("animals.owl", ANIMALS_OWL)
        .add_file("plants.owl", PLANTS_OWL)
        .add_file("broken.owl", INVALID_OWL)
        .add_file("notes.txt", "not an ontology")
        .add_file("nested/hidden.owl", ANIMALS_OWL)
        .create()
        .expect("create tree fs")
}

#[test]
fn loads_valid_files_and_skips_invalid_ones() {
    let tree = fixture_tree();
    let store = OntologyStore::load_all(&ontology_settings(&tree.root));

    assert_eq!(store.names(), ["animals", "plants"]);
    assert_eq!(store.len(), 2);
    assert!(store.get("broken").is_none());
    assert!(store.get("notes").is_none());
    assert!(store.get("hidden").is_none());

    let animals = store.get("animals").expect("animals loaded");
    assert!(animals.source().is_absolute());
}

#[test]
fn file_names_with_reserved_iri_characters_load() {
    let tree = tree_fs::TreeBuilder::default()
        .add_file("100%.owl", ANIMALS_OWL)
        .add_file("zoo{v2}.owl", ANIMALS_OWL)
        .add_file("ok.owl", ANIMALS_OWL)
        .create()
        .expect("create tree fs");

    let store = OntologyStore::load_all(&ontology_settings(&tree.root));

    assert_eq!(store.names(), ["100%", "ok", "zoo{v2}"]);
    assert_eq!(
        labels(&store, "100%", "Dog"),
        ["Animal", "Dog", "Mammal", "Thing"]
    );
}

#[test]
fn missing_directory_is_created_and_store_is_empty() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock")
        .as_nanos();
    let directory = std::env::temp_dir()
        .join(format!("ontology-service-{nanos}"))
        .join("ontologies");
    assert!(!directory.exists());

    let store = OntologyStore::load_all(&ontology_settings(&directory));

    assert!(store.is_empty());
    assert!(directory.is_dir());
    assert_eq!(store.directory(), directory.as_path());

    let _ = fs::remove_dir_all(directory.parent().expect("parent"));
}

#[test]
fn duplicate_names_keep_the_first_file_in_name_order() {
    let tree = tree_fs::TreeBuilder::default()
        .add_file("zoo.owl", ANIMALS_OWL)
        .add_file("zoo.rdf", PLANTS_OWL)
        .create()
        .expect("create tree fs");
    let settings = OntologySettings {
        directory: tree.root.clone(),
        extensions: vec![".owl".to_string(), ".rdf".to_string()],
    };

    let store = OntologyStore::load_all(&settings);

    assert_eq!(store.names(), ["zoo"]);
    let zoo = store.get("zoo").expect("zoo loaded");
    assert_eq!(zoo.id().as_str(), "http://example.org/animals");
    assert_eq!(
        zoo.source().file_name().and_then(|name| name.to_str()),
        Some("zoo.owl")
    );
}

#[rstest]
#[case("Dog", &["Animal", "Dog", "Mammal", "Thing"])]
#[case("Mammal", &["Animal", "Mammal", "Thing"])]
#[case("Animal_003", &["Animal", "Animal_003", "Thing"])]
#[case("BullDog", &["Animal", "Bulldog", "Dog", "Mammal", "Thing"])]
#[case("animals#Dog", &["Animal", "Dog", "Mammal", "Thing"])]
#[case("Food", &["Food", "Thing"])]
fn superclasses_are_reflexive_and_transitive(#[case] class: &str, #[case] expected: &[&str]) {
    let tree = fixture_tree();
    let store = OntologyStore::load_all(&ontology_settings(&tree.root));

    assert_eq!(labels(&store, "animals", class), expected);
}

#[test]
fn equivalent_classes_share_ancestors() {
    let tree = fixture_tree();
    let store = OntologyStore::load_all(&ontology_settings(&tree.root));

    assert_eq!(
        labels(&store, "plants", "QuercusRobur"),
        ["Oak", "Plant", "QuercusRobur", "Thing", "Tree"]
    );
}

#[test]
fn unmatched_class_is_not_found() {
    let tree = fixture_tree();
    let store = OntologyStore::load_all(&ontology_settings(&tree.root));

    let err = fetch_superclasses(&store, "animals", "Unicorn").expect_err("no match");
    assert_eq!(
        err,
        QueryError::ClassNotFound {
            ontology: "animals".to_string(),
            class: "Unicorn".to_string(),
        }
    );
}

#[test]
fn properties_are_not_searchable_as_classes() {
    let tree = fixture_tree();
    let store = OntologyStore::load_all(&ontology_settings(&tree.root));

    let err = fetch_superclasses(&store, "animals", "eats").expect_err("property");
    assert!(matches!(err, QueryError::ClassNotFound { .. }));
}

#[test]
fn unknown_ontology_is_rejected_before_searching() {
    let tree = fixture_tree();
    let store = OntologyStore::load_all(&ontology_settings(&tree.root));

    // the class exists elsewhere, the ontology name decides
    let err = fetch_superclasses(&store, "broken", "Dog").expect_err("unknown ontology");
    assert_eq!(
        err,
        QueryError::UnknownOntology {
            name: "broken".to_string(),
            available: vec!["animals".to_string(), "plants".to_string()],
        }
    );
}

#[tokio::test]
async fn reasoning_runs_once_over_all_ontologies_and_merges_edges() {
    let tree = fixture_tree();
    let mut store = OntologyStore::load_all(&ontology_settings(&tree.root));
    let reasoner = StubReasoner::with_edges(vec![
        subsumption("http://example.org/animals#Dog", "http://example.org/animals#Pet"),
        subsumption("http://example.org/plants/Tree", "http://example.org/animals#Food"),
        subsumption("http://example.org/unknown#A", "http://example.org/unknown#B"),
    ]);

    let status = store.reason_all(&reasoner).await;

    assert_eq!(status, ReasoningStatus::Completed { inferred: 2 });
    assert_eq!(reasoner.calls(), vec![vec!["animals".to_string(), "plants".to_string()]]);
    assert_eq!(labels(&store, "animals", "Dog"), ["Animal", "Dog", "Mammal", "Pet", "Thing"]);
    assert_eq!(labels(&store, "plants", "Tree"), ["Food", "Plant", "Thing", "Tree"]);
    // descendants see the new edge through the walk
    assert!(labels(&store, "animals", "BullDog").contains(&"Pet".to_string()));
}

#[tokio::test]
async fn reasoning_failure_keeps_asserted_knowledge() {
    let tree = fixture_tree();
    let mut store = OntologyStore::load_all(&ontology_settings(&tree.root));

    let status = store.reason_all(&UnavailableReasoner).await;

    assert!(matches!(status, ReasoningStatus::Failed { ref reason } if reason.contains("java")));
    assert_eq!(labels(&store, "animals", "Dog"), ["Animal", "Dog", "Mammal", "Thing"]);
}

#[tokio::test]
async fn reasoning_is_skipped_for_an_empty_store() {
    let tree = tree_fs::TreeBuilder::default()
        .add_file("readme.md", "nothing here")
        .create()
        .expect("create tree fs");
    let mut store = OntologyStore::load_all(&ontology_settings(&tree.root));
    let reasoner = StubReasoner::default();

    assert_eq!(store.reason_all(&reasoner).await, ReasoningStatus::Skipped);
    assert!(reasoner.calls().is_empty());
}

#[tokio::test]
async fn boot_from_test_configuration() {
    let config = Environment::Test
        .load_from_folder(Path::new("config"))
        .expect("test configuration");
    assert!(!config.reasoner.enable);

    let service = OntologyService::boot(&config.ontology, &config.reasoner).await;

    assert_eq!(service.names(), ["animals"]);
    assert_eq!(service.reasoning(), &ReasoningStatus::Skipped);
    assert_eq!(
        service.superclass_labels("animals", "Dog").expect("dog"),
        ["Animal", "Dog", "Mammal", "Thing"]
    );
}

#[tokio::test]
async fn missing_reasoner_program_degrades_gracefully() {
    let tree = fixture_tree();
    let mut reasoner = ontology_service::config::ReasonerSettings::default();
    reasoner.program = "ontology-service-reasoner-that-does-not-exist".to_string();

    let service = OntologyService::boot(&ontology_settings(&tree.root), &reasoner).await;

    assert!(matches!(service.reasoning(), ReasoningStatus::Failed { .. }));
    assert_eq!(
        service.superclass_labels("animals", "Dog").expect("dog"),
        ["Animal", "Dog", "Mammal", "Thing"]
    );
}
