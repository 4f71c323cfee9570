//! RDF/XML ingestion.
//!
//! Only the parts of a document the query path needs are lifted into the
//! [`Ontology`] model: named classes, their `rdfs:label`s and named
//! `rdfs:subClassOf` / `owl:equivalentClass` edges. The raw triples are kept
//! so the external reasoner can be fed the full asserted knowledge.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use oxrdf::{vocab::rdf, vocab::rdfs, NamedOrBlankNode, Term, Triple};
use oxrdfxml::RdfXmlParser;
use thiserror::Error;

use super::{entities::Ontology, value_objects::Iri};

const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
const OWL_EQUIVALENT_CLASS: &str = "http://www.w3.org/2002/07/owl#equivalentClass";

/// Errors raised while reading a single ontology document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read ontology `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file path could not be turned into a base IRI.
    #[error("cannot derive a base IRI from `{path}`")]
    BaseIri { path: PathBuf },
    /// The document is not well-formed RDF/XML.
    #[error("failed to parse ontology `{path}`: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Reads and parses the RDF/XML document at `path` into an ontology named
/// `name`.
pub fn load_file(name: &str, path: &Path) -> Result<Ontology, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let base = file_iri(path)?;
    parse_rdf_xml(name, path, &base, &bytes)
}

/// Parses an RDF/XML document held in memory.
pub fn parse_rdf_xml(
    name: &str,
    path: &Path,
    base: &Iri,
    bytes: &[u8],
) -> Result<Ontology, LoadError> {
    let parse_error = |message: String| LoadError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let parser = RdfXmlParser::new()
        .with_base_iri(base.as_str())
        .map_err(|err| parse_error(err.to_string()))?;
    let triples = parser
        .for_reader(bytes)
        .collect::<Result<Vec<Triple>, _>>()
        .map_err(|err| parse_error(err.to_string()))?;

    Ok(build_ontology(name, path, base, triples))
}

/// Returns the `file://` IRI of an absolute path.
///
/// Every byte outside the IRI path characters is percent-encoded, so any
/// file name the filesystem accepts yields a valid IRI.
pub fn file_iri(path: &Path) -> Result<Iri, LoadError> {
    let text = path.to_string_lossy().replace('\\', "/");
    let mut iri = String::from(if text.starts_with('/') {
        "file://"
    } else {
        "file:///"
    });
    for byte in text.bytes() {
        if is_path_byte(byte) {
            iri.push(char::from(byte));
        } else {
            iri.push_str(&format!("%{byte:02X}"));
        }
    }
    Iri::new(iri).map_err(|_| LoadError::BaseIri {
        path: path.to_path_buf(),
    })
}

// unreserved, sub-delims, ':', '@' and the segment separator
fn is_path_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"-._~!$&'()*+,;=:@/".contains(&byte)
}

fn named_subject(triple: &Triple) -> Option<Iri> {
    match &triple.subject {
        NamedOrBlankNode::NamedNode(node) => Some(Iri::from(node)),
        NamedOrBlankNode::BlankNode(_) => None,
    }
}

fn named_object(triple: &Triple) -> Option<Iri> {
    match &triple.object {
        Term::NamedNode(node) => Some(Iri::from(node)),
        _ => None,
    }
}

fn build_ontology(name: &str, path: &Path, base: &Iri, triples: Vec<Triple>) -> Ontology {
    let id = triples
        .iter()
        .find(|triple| {
            triple.predicate.as_str() == rdf::TYPE.as_str()
                && matches!(&triple.object, Term::NamedNode(node) if node.as_str() == OWL_ONTOLOGY)
        })
        .and_then(named_subject)
        .unwrap_or_else(|| base.clone());

    let mut ontology = Ontology::new(name, id, path);
    let mut labels: BTreeMap<Iri, Vec<String>> = BTreeMap::new();

    for triple in &triples {
        let Some(subject) = named_subject(triple) else {
            continue;
        };
        let predicate = triple.predicate.as_str();

        if predicate == rdf::TYPE.as_str() {
            if let Some(object) = named_object(triple) {
                if object.as_str() == OWL_CLASS || object.as_str() == rdfs::CLASS.as_str() {
                    declare(&mut ontology, &subject);
                }
            }
        } else if predicate == rdfs::SUB_CLASS_OF.as_str() {
            declare(&mut ontology, &subject);
            // anonymous restrictions are not part of the named hierarchy
            if let Some(parent) = named_object(triple) {
                declare(&mut ontology, &parent);
                if !parent.is_owl_builtin() {
                    ontology.class_entry(subject).add_parent(parent);
                }
            }
        } else if predicate == OWL_EQUIVALENT_CLASS {
            if let Some(other) = named_object(triple) {
                declare(&mut ontology, &subject);
                declare(&mut ontology, &other);
                if !subject.is_owl_builtin() && !other.is_owl_builtin() {
                    ontology.class_entry(subject.clone()).add_parent(other.clone());
                    ontology.class_entry(other).add_parent(subject);
                }
            }
        } else if predicate == rdfs::LABEL.as_str() {
            if let Term::Literal(literal) = &triple.object {
                labels
                    .entry(subject)
                    .or_default()
                    .push(literal.value().to_string());
            }
        }
    }

    for (id, values) in labels {
        if ontology.class(&id).is_some() {
            let class = ontology.class_entry(id);
            for value in values {
                class.add_label(value);
            }
        }
    }

    ontology.set_triples(triples);
    ontology
}

fn declare(ontology: &mut Ontology, id: &Iri) {
    if !id.is_owl_builtin() {
        ontology.class_entry(id.clone());
    }
}
