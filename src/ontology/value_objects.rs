use std::fmt::{self, Display, Formatter};

use oxrdf::NamedNode;
use thiserror::Error;

/// IRI of the implicit root class every OWL class descends from.
pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
/// IRI of the empty class, never reported as an ancestor.
pub const OWL_NOTHING: &str = "http://www.w3.org/2002/07/owl#Nothing";

/// Value object ensuring that supplied text represents a valid IRI.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri {
    value: String,
}

impl Iri {
    /// Validates and constructs a new [`Iri`] value object.
    ///
    /// The constructor rejects malformed identifiers in order to guarantee that
    /// every entity uses canonical identifiers.
    pub fn new(value: impl Into<String>) -> Result<Self, IriError> {
        let value = value.into();
        NamedNode::new(value.as_str()).map_err(|_| IriError::Invalid {
            value: value.clone(),
        })?;
        Ok(Self { value })
    }

    /// Returns the `owl:Thing` IRI.
    #[must_use]
    pub fn owl_thing() -> Self {
        Self {
            value: OWL_THING.to_string(),
        }
    }

    /// Returns the underlying textual representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the trailing identifier of the IRI: the fragment after the
    /// last `#`, otherwise the last path segment after `/`.
    ///
    /// Falls back to the whole IRI when both are empty.
    #[must_use]
    pub fn local_name(&self) -> &str {
        let tail = match self.value.rfind('#') {
            Some(index) => &self.value[index + 1..],
            None => self
                .value
                .rfind('/')
                .map_or(self.value.as_str(), |index| &self.value[index + 1..]),
        };
        if tail.is_empty() {
            &self.value
        } else {
            tail
        }
    }

    /// Whether the trailing portion of the IRI equals `fragment`.
    #[must_use]
    pub fn matches_fragment(&self, fragment: &str) -> bool {
        !fragment.is_empty() && self.value.ends_with(fragment)
    }

    /// Whether this IRI is `owl:Thing` or `owl:Nothing`.
    #[must_use]
    pub fn is_owl_builtin(&self) -> bool {
        self.value == OWL_THING || self.value == OWL_NOTHING
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&NamedNode> for Iri {
    fn from(node: &NamedNode) -> Self {
        Self {
            value: node.as_str().to_string(),
        }
    }
}

/// Errors produced when validating an [`Iri`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IriError {
    /// The provided text could not be parsed as an IRI.
    #[error("invalid IRI: {value}")]
    Invalid { value: String },
}
