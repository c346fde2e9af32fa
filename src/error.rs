//! Rich diagnostic error types for the closure engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the closure engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum ClosureError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Reasoner(#[from] ReasonerError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] ExportError),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("transitive closure method not recognised: {code}")]
    #[diagnostic(
        code(closure::config::unknown_method),
        help(
            "Valid closure methods are 0 (none, asserted relation only), \
             1 (union of powers), 2 (Warshall) and 3 (OWL reasoning)."
        )
    )]
    UnknownClosureMethod { code: String },

    #[error("Warshall variant not recognised: {name}")]
    #[diagnostic(
        code(closure::config::unknown_variant),
        help("Valid Warshall variants are `boolean_or` and `add_and_clamp`.")
    )]
    UnknownWarshallVariant { name: String },

    #[error("invalid configuration file {path}: {message}")]
    #[diagnostic(
        code(closure::config::parse),
        help(
            "The configuration file could not be parsed. Check the TOML syntax \
             and that `closure_method` is an integer and `include_reflexivity` a boolean."
        )
    )]
    Parse { path: String, message: String },

    #[error("failed to read configuration file {path}")]
    #[diagnostic(
        code(closure::config::io),
        help("Check that the configuration file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{operation} requires a transitive closure, but closure method 0 was configured")]
    #[diagnostic(
        code(closure::config::closure_required),
        help("Rebuild the engine with closure method 1, 2 or 3.")
    )]
    ClosureRequired { operation: String },
}

// ---------------------------------------------------------------------------
// Query errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum QueryError {
    #[error("expected one or more source entity names")]
    #[diagnostic(
        code(closure::query::empty_sources),
        help("A longest-path query needs at least one source entity to start from.")
    )]
    EmptySources,

    #[error("entity name not recognised: {name}")]
    #[diagnostic(
        code(closure::query::unknown_entity),
        help(
            "The name is not in the entity catalog. Names must be full IRIs of \
             named classes; anonymous classes and blank nodes are never catalogued."
        )
    )]
    UnknownEntity { name: String },
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("failed to create oxigraph store: {message}")]
    #[diagnostic(
        code(closure::store::init),
        help("The in-memory RDF store could not be initialized.")
    )]
    Init { message: String },

    #[error("failed to read ontology {path}")]
    #[diagnostic(
        code(closure::store::io),
        help("Check that the ontology file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse ontology: {message}")]
    #[diagnostic(
        code(closure::store::load),
        help(
            "The ontology could not be parsed. Turtle is assumed unless the file \
             extension names another RDF syntax (.rdf, .owl, .nt, .nq, .trig)."
        )
    )]
    Load { message: String },

    #[error("SPARQL query error: {message}")]
    #[diagnostic(
        code(closure::store::sparql),
        help("The SPARQL query against the ontology store failed.")
    )]
    Sparql { message: String },

    #[error("storage error: {message}")]
    #[diagnostic(
        code(closure::store::storage),
        help("Reading from or writing to the oxigraph store failed.")
    )]
    Storage { message: String },
}

// ---------------------------------------------------------------------------
// Reasoner errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ReasonerError {
    #[error("entailment rule {rule} failed: {message}")]
    #[diagnostic(
        code(closure::reasoner::rule_failed),
        help(
            "Materialization stopped while applying an OWL 2 RL rule. \
             The store may be partially saturated; rebuild the engine before retrying."
        )
    )]
    RuleFailed { rule: &'static str, message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("failed to serialize result: {message}")]
    #[diagnostic(
        code(closure::export::serialize),
        help("The result snapshot could not be encoded as JSON.")
    )]
    Serialize { message: String },

    #[error("failed to write export {path}")]
    #[diagnostic(
        code(closure::export::io),
        help("Check that the output directory exists and is writable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for functions returning closure-engine results.
pub type ClosureResult<T> = std::result::Result<T, ClosureError>;
