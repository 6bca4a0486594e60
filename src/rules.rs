use serde::{Deserialize, Serialize};
use slotmap::SecondaryMap;

use crate::dsl::Antecedent;
use crate::error::{FuzzyError, Result};
use crate::ops::{fuzzy_and, fuzzy_or, FiringStrength};
use crate::variable::{Variable, VariableKey, Variables};

/// IF `antecedent` THEN output IS `consequent`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub antecedent: Antecedent,
    /// Name of a term of the output variable
    pub consequent: String,
}

impl Rule {
    pub fn new(antecedent: Antecedent, consequent: impl Into<String>) -> Self {
        Self {
            antecedent,
            consequent: consequent.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    pub fn add(&mut self, antecedent: Antecedent, consequent: impl Into<String>) {
        self.push(Rule::new(antecedent, consequent));
    }

    pub fn push(&mut self, rule: Rule) {
        self.0.push(rule);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.0.iter()
    }
}

/// An antecedent with names resolved to variable keys and term indices.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Expr {
    Is(VariableKey, usize),
    And(Vec<Expr>),
    Or(Vec<Expr>),
}

impl Expr {
    pub(crate) fn resolve(antecedent: &Antecedent, vars: &Variables) -> Result<Self> {
        match antecedent {
            Antecedent::Is { variable, term } => {
                let key = vars.key(variable)?;
                let index = vars[key].term_index(term).ok_or_else(|| FuzzyError::UnknownTerm {
                    variable: variable.clone(),
                    term: term.clone(),
                })?;

                Ok(Expr::Is(key, index))
            },
            Antecedent::And(exprs) => exprs
                .iter()
                .map(|e| Expr::resolve(e, vars))
                .collect::<Result<_>>()
                .map(Expr::And),
            Antecedent::Or(exprs) => exprs
                .iter()
                .map(|e| Expr::resolve(e, vars))
                .collect::<Result<_>>()
                .map(Expr::Or),
        }
    }

    /// Firing strength given the fuzzified degrees of every referenced variable.
    pub(crate) fn strength(&self, degrees: &SecondaryMap<VariableKey, Vec<f64>>) -> FiringStrength {
        match self {
            // Referenced variables are checked for presence before rules run
            Expr::Is(key, term) => degrees.get(*key).map_or(0., |d| d[*term]),
            Expr::And(exprs) => fuzzy_and(exprs.iter().map(|e| e.strength(degrees))),
            Expr::Or(exprs) => fuzzy_or(exprs.iter().map(|e| e.strength(degrees))),
        }
    }

    pub(crate) fn variables(&self, out: &mut Vec<VariableKey>) {
        match self {
            Expr::Is(key, _) => {
                if !out.contains(key) {
                    out.push(*key);
                }
            },
            Expr::And(exprs) | Expr::Or(exprs) => {
                for expr in exprs {
                    expr.variables(out);
                }
            },
        }
    }
}

/// A rule ready to run: resolved premise plus the output term index.
#[derive(Clone, Debug)]
pub(crate) struct ResolvedRule {
    pub(crate) premise: Expr,
    pub(crate) consequent: usize,
}

impl ResolvedRule {
    pub(crate) fn resolve(rule: &Rule, inputs: &Variables, output: &Variable) -> Result<Self> {
        let premise = Expr::resolve(&rule.antecedent, inputs)?;
        let consequent = output
            .term_index(&rule.consequent)
            .ok_or_else(|| FuzzyError::UnknownTerm {
                variable: output.name().to_owned(),
                term: rule.consequent.clone(),
            })?;

        Ok(Self { premise, consequent })
    }
}

#[test]
fn test_resolve_and_strength() {
    use crate::dsl::is;
    use crate::membership::Shape;
    use crate::universe::Universe;

    let mut vars = Variables::new();
    let mut year = Variable::new("year", Universe::arange(1990., 2020., 1.).unwrap());
    year.add_term("old", Shape::trapezoidal(1990., 1990., 2000., 2005.)).unwrap();
    year.add_term("new", Shape::trapezoidal(2010., 2015., 2020., 2020.)).unwrap();
    let year_key = vars.add(year).unwrap();

    let expr = Expr::resolve(&is("year", "new").or(is("year", "old")), &vars).unwrap();

    assert_eq!(expr, Expr::Or(vec![Expr::Is(year_key, 1), Expr::Is(year_key, 0)]));

    let mut degrees = SecondaryMap::new();
    degrees.insert(year_key, vars[year_key].fuzzify(2012.));

    assert_eq!(expr.strength(&degrees), 0.4);

    let and = Expr::resolve(&is("year", "new").and(is("year", "old")), &vars).unwrap();

    assert_eq!(and.strength(&degrees), 0.);

    let mut keys = Vec::new();
    and.variables(&mut keys);

    assert_eq!(keys, vec![year_key]);
}

#[test]
fn test_resolve_errors() {
    use crate::dsl::is;
    use crate::universe::Universe;

    let mut vars = Variables::new();
    vars.add(Variable::new("year", Universe::arange(1990., 2020., 1.).unwrap()))
        .unwrap();

    assert_eq!(
        Expr::resolve(&is("age", "old"), &vars),
        Err(FuzzyError::UnknownVariable("age".into()))
    );
    assert_eq!(
        Expr::resolve(&is("year", "ancient"), &vars),
        Err(FuzzyError::UnknownTerm {
            variable: "year".into(),
            term: "ancient".into()
        })
    );
}
