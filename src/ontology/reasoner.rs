//! External classification support.
//!
//! The asserted triples of every loaded ontology are written to a single
//! N-Triples file and handed to an out-of-process reasoner (HermiT by
//! default). Its OWL functional syntax output is scanned for named
//! `SubClassOf` / `EquivalentClasses` axioms.

use std::{
    collections::HashMap,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    process::Output,
    sync::OnceLock,
};

use async_trait::async_trait;
use regex::Regex;
use thiserror::Error;

use super::{entities::Ontology, loader::file_iri, value_objects::Iri};
use crate::config::ReasonerSettings;

/// A single inferred `sub ⊑ sup` edge between named classes.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Subsumption {
    pub sub: Iri,
    pub sup: Iri,
}

impl Subsumption {
    #[must_use]
    pub fn new(sub: Iri, sup: Iri) -> Self {
        Self { sub, sup }
    }
}

/// Errors raised while running the external reasoner.
#[derive(Debug, Error)]
pub enum ReasonerError {
    /// Writing the merged input document failed.
    #[error("failed to prepare reasoner input `{path}`: {source}")]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },
    /// An argument template could not be rendered.
    #[error("invalid reasoner argument `{template}`: {message}")]
    Template { template: String, message: String },
    /// The process could not be started (e.g. `java` is not installed).
    #[error("failed to launch reasoner `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    /// The process ran but reported a failure.
    #[error("reasoner `{program}` exited with status {status}: {stderr}")]
    Exit {
        program: String,
        status: i32,
        stderr: String,
    },
    /// The blocking task running the process was cancelled or panicked.
    #[error("reasoner task aborted: {0}")]
    Join(String),
}

/// Classifies a set of ontologies collectively.
#[async_trait]
pub trait Reasoner: Send + Sync {
    /// Human readable name used in logs.
    fn name(&self) -> &str;

    /// Returns the subsumptions entailed by the union of `ontologies`.
    async fn classify(&self, ontologies: &[&Ontology]) -> Result<Vec<Subsumption>, ReasonerError>;
}

/// Reasoner running an external command, HermiT through `java` by default.
#[derive(Clone, Debug)]
pub struct ExternalReasoner {
    program: String,
    args: Vec<String>,
}

impl ExternalReasoner {
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    #[must_use]
    pub fn from_settings(settings: &ReasonerSettings) -> Self {
        Self::new(settings.program.clone(), settings.args.clone())
    }

    /// Renders the argument templates with `input` bound to the `file://`
    /// URL of the merged document.
    pub fn render_args(&self, input: &Path) -> Result<Vec<String>, ReasonerError> {
        let input = file_iri(input).map_err(|err| ReasonerError::Template {
            template: "input".to_string(),
            message: err.to_string(),
        })?;
        let locals = serde_json::json!({ "input": input.as_str() });
        self.args
            .iter()
            .map(|template| {
                crate::tera::render_string(template, &locals).map_err(|err| {
                    ReasonerError::Template {
                        template: template.clone(),
                        message: err.to_string(),
                    }
                })
            })
            .collect()
    }

    fn run(program: &str, args: &[String]) -> Result<Output, ReasonerError> {
        duct::cmd(program, args)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .map_err(|source| ReasonerError::Spawn {
                program: program.to_string(),
                source,
            })
    }
}

#[async_trait]
impl Reasoner for ExternalReasoner {
    fn name(&self) -> &str {
        &self.program
    }

    async fn classify(&self, ontologies: &[&Ontology]) -> Result<Vec<Subsumption>, ReasonerError> {
        let input = MergedInput::write(ontologies)?;
        let args = self.render_args(input.path())?;
        tracing::debug!(program = %self.program, ?args, "running reasoner");

        let program = self.program.clone();
        let output = tokio::task::spawn_blocking(move || Self::run(&program, &args))
            .await
            .map_err(|err| ReasonerError::Join(err.to_string()))??;
        drop(input);

        if !output.status.success() {
            return Err(ReasonerError::Exit {
                program: self.program.clone(),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_functional_syntax(&stdout))
    }
}

/// Temporary N-Triples document holding every loaded triple. Removed on drop.
struct MergedInput {
    path: PathBuf,
}

impl MergedInput {
    fn write(ontologies: &[&Ontology]) -> Result<Self, ReasonerError> {
        let path = std::env::temp_dir().join(format!(
            "ontology-service-{}.nt",
            uuid::Uuid::new_v4().simple()
        ));
        let input = Self { path };
        input.fill(ontologies).map_err(|source| ReasonerError::Input {
            path: input.path.clone(),
            source,
        })?;
        Ok(input)
    }

    fn fill(&self, ontologies: &[&Ontology]) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        for ontology in ontologies {
            for triple in ontology.triples() {
                writeln!(writer, "{triple} .")?;
            }
        }
        writer.flush()
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for MergedInput {
    fn drop(&mut self) {
        if let Err(error) = fs::remove_file(&self.path) {
            tracing::debug!(path = %self.path.display(), err.msg = %error, "could not remove reasoner input");
        }
    }
}

fn prefix_regex() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| {
        Regex::new(r"^\s*Prefix\(\s*((?:[A-Za-z][\w.-]*)?):=\s*<([^<>\s]*)>\s*\)\s*$")
            .expect("valid prefix regex")
    })
}

fn axiom_regex() -> &'static Regex {
    static AXIOM: OnceLock<Regex> = OnceLock::new();
    AXIOM.get_or_init(|| {
        Regex::new(r"^\s*(SubClassOf|EquivalentClasses)\(\s*((?:(?:<[^<>\s]+>|(?:[A-Za-z][\w.-]*)?:[\w.-]*)\s*)+)\)\s*$")
            .expect("valid axiom regex")
    })
}

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"<([^<>\s]+)>|(\S+)").expect("valid token regex"))
}

/// Expands `prefix:local` (or `:local`) against the declared prefixes.
fn expand(name: &str, prefixes: &HashMap<String, String>) -> Option<String> {
    let (prefix, local) = name.split_once(':')?;
    prefixes
        .get(prefix)
        .map(|namespace| format!("{namespace}{local}"))
}

/// Operands of an axiom as named classes, `None` for the OWL builtins and
/// for names whose prefix was never declared.
fn operands(body: &str, prefixes: &HashMap<String, String>) -> Vec<Option<Iri>> {
    token_regex()
        .captures_iter(body)
        .map(|captures| {
            let text = match (captures.get(1), captures.get(2)) {
                (Some(full), _) => Some(full.as_str().to_string()),
                (None, Some(name)) => expand(name.as_str(), prefixes),
                (None, None) => None,
            };
            text.and_then(|text| Iri::new(text).ok())
                .filter(|iri| !iri.is_owl_builtin())
        })
        .collect()
}

/// Extracts inferred subsumptions between named classes from OWL functional
/// syntax, expanding names abbreviated through `Prefix(..)` declarations.
/// Axioms over anonymous expressions or the OWL builtins are ignored.
#[must_use]
pub fn parse_functional_syntax(text: &str) -> Vec<Subsumption> {
    let mut prefixes: HashMap<String, String> = HashMap::new();
    let mut edges = Vec::new();
    for line in text.lines() {
        if let Some(captures) = prefix_regex().captures(line) {
            prefixes.insert(captures[1].to_string(), captures[2].to_string());
            continue;
        }
        let Some(captures) = axiom_regex().captures(line) else {
            continue;
        };
        let operands = operands(&captures[2], &prefixes);
        match &captures[1] {
            "SubClassOf" => {
                if let [Some(sub), Some(sup)] = operands.as_slice() {
                    if sub != sup {
                        edges.push(Subsumption::new(sub.clone(), sup.clone()));
                    }
                }
            }
            _ => {
                let named: Vec<&Iri> = operands.iter().flatten().collect();
                for sub in &named {
                    for sup in &named {
                        if sub != sup {
                            edges.push(Subsumption::new((*sub).clone(), (*sup).clone()));
                        }
                    }
                }
            }
        }
    }
    edges.sort();
    edges.dedup();
    edges
}
