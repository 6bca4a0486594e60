//! Serializable model definitions.
//!
//! A [`ModelConfig`] is plain data: universes as `arange` parameters, terms
//! as shape breakpoints and rules as named antecedent trees. Building it
//! validates everything and yields an immutable [`InferenceSession`].

use serde::{Deserialize, Serialize};

use crate::dsl::Antecedent;
use crate::error::Result;
use crate::inference::InferenceSession;
use crate::membership::Shape;
use crate::rules::{Rule, Rules};
use crate::universe::UniverseRange;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TermConfig {
    pub name: String,
    pub shape: Shape,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableConfig {
    pub name: String,
    pub universe: UniverseRange,
    #[serde(default)]
    pub terms: Vec<TermConfig>,
}

impl VariableConfig {
    pub fn new(name: impl Into<String>, universe: UniverseRange) -> Self {
        Self {
            name: name.into(),
            universe,
            terms: Vec::new(),
        }
    }

    pub fn term(mut self, name: impl Into<String>, shape: Shape) -> Self {
        self.terms.push(TermConfig {
            name: name.into(),
            shape,
        });
        self
    }
}

/// What to report when no rule fires and the aggregated set is all zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySetPolicy {
    /// Fail with `FuzzyError::EmptySet`
    #[default]
    Fail,
    /// Report the mean of the output universe for every method
    UniverseMean,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub inputs: Vec<VariableConfig>,
    pub output: VariableConfig,
    #[serde(default)]
    pub rules: Rules,
    #[serde(default)]
    pub empty_set_policy: EmptySetPolicy,
}

impl ModelConfig {
    pub fn new(output: VariableConfig) -> Self {
        Self {
            inputs: Vec::new(),
            output,
            rules: Rules::new(),
            empty_set_policy: EmptySetPolicy::default(),
        }
    }

    pub fn input(mut self, var: VariableConfig) -> Self {
        self.inputs.push(var);
        self
    }

    pub fn rule(mut self, antecedent: Antecedent, consequent: impl Into<String>) -> Self {
        self.rules.push(Rule::new(antecedent, consequent));
        self
    }

    pub fn empty_set_policy(mut self, policy: EmptySetPolicy) -> Self {
        self.empty_set_policy = policy;
        self
    }

    pub fn build(&self) -> Result<InferenceSession> {
        InferenceSession::new(self)
    }
}
