use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};

use crate::config::VariableConfig;
use crate::error::{FuzzyError, Result};
use crate::membership::{MembershipFunction, Shape};
use crate::universe::Universe;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// A linguistic variable: a universe plus named terms sampled over it.
#[derive(Clone, Debug)]
pub struct Variable {
    name: String,
    universe: Universe,
    terms: Vec<(String, MembershipFunction)>,
}

impl Variable {
    pub fn new(name: impl Into<String>, universe: Universe) -> Self {
        Self {
            name: name.into(),
            universe,
            terms: Vec::new(),
        }
    }

    pub fn from_config(config: &VariableConfig) -> Result<Self> {
        let mut var = Self::new(config.name.clone(), config.universe.build()?);

        for term in &config.terms {
            var.add_term(term.name.clone(), term.shape)?;
        }

        Ok(var)
    }

    pub fn add_term(&mut self, name: impl Into<String>, shape: Shape) -> Result<()> {
        let name = name.into();

        if self.term_index(&name).is_some() {
            return Err(FuzzyError::DuplicateTerm {
                variable: self.name.clone(),
                term: name,
            });
        }

        let membership = shape.sample(&self.universe)?;
        self.terms.push((name, membership));

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn term(&self, name: &str) -> Option<&MembershipFunction> {
        self.term_index(name).map(|i| &self.terms[i].1)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &MembershipFunction)> {
        self.terms.iter().map(|(name, mf)| (name.as_str(), mf))
    }

    pub(crate) fn term_index(&self, name: &str) -> Option<usize> {
        self.terms.iter().position(|(n, _)| n == name)
    }

    pub(crate) fn term_at(&self, index: usize) -> (&str, &MembershipFunction) {
        let (name, mf) = &self.terms[index];
        (name.as_str(), mf)
    }

    pub(crate) fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// Degree of `x` in every term, in term order. Terms are always sampled
    /// over `self.universe`, so no grid check is needed.
    pub fn fuzzify(&self, x: f64) -> Vec<f64> {
        self.terms
            .iter()
            .map(|(_, mf)| mf.at(x))
            .collect()
    }
}

/// Input variables of a model, addressable by key or by name.
#[derive(Default, Debug)]
pub struct Variables {
    slots: SlotMap<VariableKey, Variable>,
    by_name: HashMap<String, VariableKey>,
}

impl Variables {
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            by_name: HashMap::new(),
        }
    }

    pub fn add(&mut self, var: Variable) -> Result<VariableKey> {
        if self.by_name.contains_key(var.name()) {
            return Err(FuzzyError::DuplicateVariable(var.name.clone()));
        }

        let name = var.name.clone();
        let key = self.slots.insert(var);
        self.by_name.insert(name, key);

        Ok(key)
    }

    pub fn key(&self, name: &str) -> Result<VariableKey> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| FuzzyError::UnknownVariable(name.to_owned()))
    }

    pub fn get(&self, key: VariableKey) -> Option<&Variable> {
        self.slots.get(key)
    }

    pub fn by_name(&self, name: &str) -> Option<&Variable> {
        self.by_name.get(name).and_then(|key| self.slots.get(*key))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableKey, &Variable)> {
        self.slots.iter()
    }
}

impl std::ops::Index<VariableKey> for Variables {
    type Output = Variable;

    fn index(&self, key: VariableKey) -> &Variable {
        &self.slots[key]
    }
}

#[test]
fn test_variable_terms() {
    let universe = Universe::arange(80., 300., 1.).unwrap();
    let mut power = Variable::new("power", universe);

    power.add_term("low", Shape::trapezoidal(80., 80., 100., 150.)).unwrap();
    power.add_term("medium", Shape::trapezoidal(100., 150., 170., 220.)).unwrap();
    power.add_term("high", Shape::trapezoidal(170., 220., 300., 300.)).unwrap();

    assert_eq!(power.fuzzify(260.), vec![0., 0., 1.]);
    assert_eq!(power.fuzzify(125.), vec![0.5, 0.5, 0.]);
    assert!(power.term("high").is_some());
    assert!(power.term("huge").is_none());
    assert_eq!(
        power.add_term("low", Shape::triangular(80., 90., 100.)),
        Err(FuzzyError::DuplicateTerm {
            variable: "power".into(),
            term: "low".into()
        })
    );
}

#[test]
fn test_variables_lookup() {
    let mut vars = Variables::new();
    let universe = Universe::arange(0., 10., 1.).unwrap();
    let key = vars.add(Variable::new("x", universe.clone())).unwrap();

    assert_eq!(vars.key("x"), Ok(key));
    assert_eq!(vars[key].name(), "x");
    assert_eq!(vars.key("y"), Err(FuzzyError::UnknownVariable("y".into())));
    assert_eq!(
        vars.add(Variable::new("x", universe)).unwrap_err(),
        FuzzyError::DuplicateVariable("x".into())
    );
    assert_eq!(vars.len(), 1);
}
