use serde::{Deserialize, Serialize};

/// A rule premise over named input terms, combined with fuzzy AND / OR.
///
/// "Not old" style premises are written as the `or` of the complementary
/// terms, e.g. `is("year", "average").or(is("year", "new"))`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Antecedent {
    Is { variable: String, term: String },
    And(Vec<Antecedent>),
    Or(Vec<Antecedent>),
}

/// Shorthand for [`Antecedent::is`].
pub fn is(variable: impl Into<String>, term: impl Into<String>) -> Antecedent {
    Antecedent::is(variable, term)
}

impl Antecedent {
    pub fn is(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Antecedent::Is {
            variable: variable.into(),
            term: term.into(),
        }
    }

    pub fn all(exprs: impl IntoIterator<Item = Antecedent>) -> Self {
        Antecedent::And(exprs.into_iter().collect())
    }

    pub fn any(exprs: impl IntoIterator<Item = Antecedent>) -> Self {
        Antecedent::Or(exprs.into_iter().collect())
    }

    /// `a.and(b).and(c)` builds a single three-way `And`.
    pub fn and(self, rhs: Antecedent) -> Self {
        match self {
            Antecedent::And(mut exprs) => {
                exprs.push(rhs);
                Antecedent::And(exprs)
            },
            lhs => Antecedent::And(vec![lhs, rhs]),
        }
    }

    pub fn or(self, rhs: Antecedent) -> Self {
        match self {
            Antecedent::Or(mut exprs) => {
                exprs.push(rhs);
                Antecedent::Or(exprs)
            },
            lhs => Antecedent::Or(vec![lhs, rhs]),
        }
    }

    /// Every `(variable, term)` proposition, depth first.
    pub fn propositions(&self) -> Vec<(&str, &str)> {
        let mut props = Vec::new();

        fn parse<'p>(expr: &'p Antecedent, out: &mut Vec<(&'p str, &'p str)>) {
            match expr {
                Antecedent::Is { variable, term } => out.push((variable.as_str(), term.as_str())),
                Antecedent::And(exprs) | Antecedent::Or(exprs) => {
                    for expr in exprs {
                        parse(expr, out);
                    }
                },
            }
        }

        parse(self, &mut props);

        props
    }
}

#[test]
fn test_builder_flattens() {
    let expr = is("year", "new").and(is("power", "high")).and(is("mileage", "low"));

    assert_eq!(
        expr,
        Antecedent::all([is("year", "new"), is("power", "high"), is("mileage", "low")])
    );

    let not_old = is("year", "average").or(is("year", "new"));
    let expr = not_old.clone().and(is("power", "low").or(is("power", "average")));

    assert_eq!(
        expr.propositions(),
        vec![
            ("year", "average"),
            ("year", "new"),
            ("power", "low"),
            ("power", "average")
        ]
    );
    assert!(matches!(expr, Antecedent::And(ref exprs) if exprs[0] == not_old));
}
