//! OWL 2 RL materialization of the class hierarchy.
//!
//! The hybrid closure method treats deductive reasoning as a black box: one
//! blocking call that saturates the ontology store in place. [`Reasoner`] is
//! that seam. [`SubsumptionReasoner`] implements it by forward-chaining the
//! OWL 2 RL schema rules that bear on `rdfs:subClassOf`, each written as a
//! SPARQL UPDATE, until a round adds no triples.

use serde::{Deserialize, Serialize};

use crate::error::ReasonerError;
use crate::ontology::OntologyStore;

/// Something that can materialize the deductive closure of a store in place.
pub trait Reasoner {
    /// Saturate `store` with every entailed triple.
    fn materialize(&self, store: &OntologyStore) -> Result<Materialization, ReasonerError>;
}

/// Which entailment families the [`SubsumptionReasoner`] applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasonerConfig {
    /// `scm-cls`: every class is a subclass and equivalent of itself, a
    /// subclass of `owl:Thing`, and a superclass of `owl:Nothing`.
    pub class_axioms: bool,
    /// `scm-eqc1` / `scm-eqc2`: `owl:equivalentClass` ⇔ mutual subsumption.
    pub equivalence: bool,
    /// `cax-sco`: propagate `rdf:type` along `rdfs:subClassOf`.
    pub class_membership: bool,
}

impl Default for ReasonerConfig {
    fn default() -> Self {
        Self {
            class_axioms: true,
            equivalence: true,
            class_membership: false,
        }
    }
}

/// Summary of one materialization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialization {
    /// Rounds executed, including the final round that added nothing.
    pub rounds: usize,
    /// Triples added to the store.
    pub inferred: usize,
}

struct Rule {
    name: &'static str,
    update: &'static str,
}

const PREFIXES: &str = "\
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX owl: <http://www.w3.org/2002/07/owl#>
";

static SCM_CLS: Rule = Rule {
    name: "scm-cls",
    update: "INSERT { ?c rdfs:subClassOf ?c . ?c owl:equivalentClass ?c .
                      ?c rdfs:subClassOf owl:Thing . owl:Nothing rdfs:subClassOf ?c }
             WHERE { ?c rdf:type owl:Class }",
};

static SCM_SCO: Rule = Rule {
    name: "scm-sco",
    update: "INSERT { ?a rdfs:subClassOf ?c }
             WHERE { ?a rdfs:subClassOf ?b . ?b rdfs:subClassOf ?c }",
};

static SCM_EQC1: Rule = Rule {
    name: "scm-eqc1",
    update: "INSERT { ?a rdfs:subClassOf ?b . ?b rdfs:subClassOf ?a }
             WHERE { ?a owl:equivalentClass ?b }",
};

static SCM_EQC2: Rule = Rule {
    name: "scm-eqc2",
    update: "INSERT { ?a owl:equivalentClass ?b }
             WHERE { ?a rdfs:subClassOf ?b . ?b rdfs:subClassOf ?a }",
};

static CAX_SCO: Rule = Rule {
    name: "cax-sco",
    update: "INSERT { ?x rdf:type ?d }
             WHERE { ?x rdf:type ?c . ?c rdfs:subClassOf ?d }",
};

/// Forward-chaining OWL 2 RL reasoner restricted to class-hierarchy rules.
#[derive(Debug, Clone, Default)]
pub struct SubsumptionReasoner {
    config: ReasonerConfig,
}

impl SubsumptionReasoner {
    pub fn new(config: ReasonerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReasonerConfig {
        &self.config
    }

    fn rules(&self) -> Vec<&'static Rule> {
        let mut rules = Vec::new();
        if self.config.class_axioms {
            rules.push(&SCM_CLS);
        }
        if self.config.equivalence {
            rules.push(&SCM_EQC1);
            rules.push(&SCM_EQC2);
        }
        rules.push(&SCM_SCO);
        if self.config.class_membership {
            rules.push(&CAX_SCO);
        }
        rules
    }
}

impl Reasoner for SubsumptionReasoner {
    fn materialize(&self, store: &OntologyStore) -> Result<Materialization, ReasonerError> {
        let rules = self.rules();
        let initial = store.len()?;
        let mut size = initial;
        let mut rounds = 0;

        // Rules only ever add triples over a finite vocabulary, so this terminates.
        loop {
            rounds += 1;
            for rule in &rules {
                store
                    .update(&format!("{PREFIXES}{}", rule.update))
                    .map_err(|e| ReasonerError::RuleFailed {
                        rule: rule.name,
                        message: e.to_string(),
                    })?;
            }
            let new_size = store.len()?;
            tracing::trace!(round = rounds, triples = new_size, "reasoning round");
            if new_size == size {
                break;
            }
            size = new_size;
        }

        let inferred = size - initial;
        tracing::debug!(rounds, inferred, "materialized deductive closure");
        Ok(Materialization { rounds, inferred })
    }
}
