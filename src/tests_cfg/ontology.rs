use std::{path::Path, sync::Mutex};

use async_trait::async_trait;

use crate::ontology::{
    loader::{file_iri, parse_rdf_xml},
    Iri, Ontology, Reasoner, ReasonerError, Subsumption,
};

/// `Dog ⊑ Mammal ⊑ Animal`, plus a few classes exercising labels, suffix
/// matching and anonymous superclasses.
pub const ANIMALS_OWL: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns="http://example.org/animals#"
     xml:base="http://example.org/animals"
     xmlns:owl="http://www.w3.org/2002/07/owl#"
     xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
     xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#">
    <owl:Ontology rdf:about="http://example.org/animals"/>
    <owl:ObjectProperty rdf:about="http://example.org/animals#eats"/>
    <owl:Class rdf:about="http://example.org/animals#Animal">
        <rdfs:label>Animal</rdfs:label>
    </owl:Class>
    <owl:Class rdf:about="http://example.org/animals#Mammal">
        <rdfs:subClassOf rdf:resource="http://example.org/animals#Animal"/>
        <rdfs:label>Mammal</rdfs:label>
    </owl:Class>
    <owl:Class rdf:about="http://example.org/animals#Dog">
        <rdfs:subClassOf rdf:resource="http://example.org/animals#Mammal"/>
        <rdfs:subClassOf>
            <owl:Restriction>
                <owl:onProperty rdf:resource="http://example.org/animals#eats"/>
                <owl:someValuesFrom rdf:resource="http://example.org/animals#Food"/>
            </owl:Restriction>
        </rdfs:subClassOf>
        <rdfs:label>Dog</rdfs:label>
        <rdfs:label>Canine</rdfs:label>
    </owl:Class>
    <owl:Class rdf:about="http://example.org/animals#BullDog">
        <rdfs:subClassOf rdf:resource="http://example.org/animals#Dog"/>
        <rdfs:label>Bulldog</rdfs:label>
    </owl:Class>
    <owl:Class rdf:about="http://example.org/animals#Animal_003">
        <rdfs:subClassOf rdf:resource="http://example.org/animals#Animal"/>
    </owl:Class>
    <owl:Class rdf:about="http://example.org/animals#Pet">
        <rdfs:label>Pet</rdfs:label>
    </owl:Class>
    <owl:Class rdf:about="http://example.org/animals#Food"/>
</rdf:RDF>
"#;

/// `Tree ⊑ Plant`, with `Oak` equivalent to `QuercusRobur`.
pub const PLANTS_OWL: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:owl="http://www.w3.org/2002/07/owl#"
     xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
     xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#">
    <owl:Ontology rdf:about="http://example.org/plants"/>
    <owl:Class rdf:about="http://example.org/plants/Plant"/>
    <owl:Class rdf:about="http://example.org/plants/Tree">
        <rdfs:subClassOf rdf:resource="http://example.org/plants/Plant"/>
    </owl:Class>
    <owl:Class rdf:about="http://example.org/plants/Oak">
        <rdfs:subClassOf rdf:resource="http://example.org/plants/Tree"/>
        <owl:equivalentClass rdf:resource="http://example.org/plants/QuercusRobur"/>
    </owl:Class>
</rdf:RDF>
"#;

/// Well-formed XML whose subject IRI is invalid, rejected by the parser.
pub const INVALID_OWL: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
    <rdf:Description rdf:about="http://example.org/not a valid iri"/>
</rdf:RDF>
"#;

/// The [`ANIMALS_OWL`] fixture parsed as ontology `animals`.
#[must_use]
pub fn animals() -> Ontology {
    parse_fixture("animals", ANIMALS_OWL)
}

/// The [`PLANTS_OWL`] fixture parsed as ontology `plants`.
#[must_use]
pub fn plants() -> Ontology {
    parse_fixture("plants", PLANTS_OWL)
}

fn parse_fixture(name: &str, source: &str) -> Ontology {
    let path = Path::new("/fixtures").join(format!("{name}.owl"));
    let base = file_iri(&path).expect("fixture base iri");
    parse_rdf_xml(name, &path, &base, source.as_bytes()).expect("fixture parses")
}

/// Builds a subsumption from two IRIs, panicking on invalid input.
#[must_use]
pub fn subsumption(sub: &str, sup: &str) -> Subsumption {
    Subsumption::new(
        Iri::new(sub).expect("valid sub iri"),
        Iri::new(sup).expect("valid sup iri"),
    )
}

/// Reasoner returning canned edges and recording how it was called.
#[derive(Default)]
pub struct StubReasoner {
    pub edges: Vec<Subsumption>,
    pub calls: Mutex<Vec<Vec<String>>>,
}

impl StubReasoner {
    #[must_use]
    pub fn with_edges(edges: Vec<Subsumption>) -> Self {
        Self {
            edges,
            ..Self::default()
        }
    }

    /// Ontology names passed to each `classify` call.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl Reasoner for StubReasoner {
    fn name(&self) -> &str {
        "stub"
    }

    async fn classify(&self, ontologies: &[&Ontology]) -> Result<Vec<Subsumption>, ReasonerError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(ontologies.iter().map(|o| o.name().to_string()).collect());
        Ok(self.edges.clone())
    }
}

/// Reasoner behaving as if `java` were not installed.
pub struct UnavailableReasoner;

#[async_trait]
impl Reasoner for UnavailableReasoner {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn classify(&self, _ontologies: &[&Ontology]) -> Result<Vec<Subsumption>, ReasonerError> {
        Err(ReasonerError::Spawn {
            program: "java".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "program not found"),
        })
    }
}
