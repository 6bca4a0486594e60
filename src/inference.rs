use slotmap::SecondaryMap;
use tracing::{debug, trace};

use crate::config::{EmptySetPolicy, ModelConfig};
use crate::defuzz::{defuzzify_all, DefuzzificationResult};
use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::ops::{aggregate, fire_rule, fuzzy_or};
use crate::outputs::Outputs;
use crate::rules::{ResolvedRule, Rules};
use crate::variable::{Variable, VariableKey, Variables};

/// An immutable Mamdani model: input variables, one output variable and the
/// rules linking them.
///
/// Inference borrows the session immutably and allocates its own working
/// sets, so one session can serve any number of threads at once.
#[derive(Debug)]
pub struct InferenceSession {
    inputs: Variables,
    output: Variable,
    rules: Vec<ResolvedRule>,
    // Input variables some rule reads, so they must be supplied
    referenced: Vec<VariableKey>,
    empty_set_policy: EmptySetPolicy,
}

impl InferenceSession {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let mut inputs = Variables::new();

        for var in &config.inputs {
            inputs.add(Variable::from_config(var)?)?;
        }

        let output = Variable::from_config(&config.output)?;

        Self::from_variables(inputs, output, &config.rules, config.empty_set_policy)
    }

    pub fn from_variables(
        inputs: Variables,
        output: Variable,
        rules: &Rules,
        empty_set_policy: EmptySetPolicy,
    ) -> Result<Self> {
        if inputs.by_name(output.name()).is_some() {
            return Err(FuzzyError::DuplicateVariable(output.name().to_owned()));
        }
        if output.n_terms() == 0 {
            return Err(FuzzyError::NoTerms(output.name().to_owned()));
        }

        let rules = rules
            .iter()
            .map(|rule| ResolvedRule::resolve(rule, &inputs, &output))
            .collect::<Result<Vec<_>>>()?;
        let mut referenced = Vec::new();

        for rule in &rules {
            rule.premise.variables(&mut referenced);
        }

        debug!(
            inputs = inputs.len(),
            output = output.name(),
            output_terms = output.n_terms(),
            rules = rules.len(),
            "built inference session"
        );

        Ok(Self {
            inputs,
            output,
            rules,
            referenced,
            empty_set_policy,
        })
    }

    pub fn inputs(&self) -> &Variables {
        &self.inputs
    }

    pub fn output(&self) -> &Variable {
        &self.output
    }

    /// Degree of every crisp input in each of its variable's terms.
    pub fn fuzzify(&self, inputs: &Inputs) -> Result<Fuzzified<'_>> {
        let mut degrees = SecondaryMap::with_capacity(inputs.len());

        for (name, &value) in &inputs.0 {
            let key = self.inputs.key(name)?;

            if !value.is_finite() {
                return Err(FuzzyError::NonFiniteInput {
                    variable: name.clone(),
                    value,
                });
            }

            degrees.insert(key, self.inputs[key].fuzzify(value));
        }

        if let Some(&missing) = self.referenced.iter().find(|&&key| !degrees.contains_key(key)) {
            return Err(FuzzyError::MissingInput(self.inputs[missing].name().to_owned()));
        }

        Ok(Fuzzified {
            vars: &self.inputs,
            degrees,
        })
    }

    pub fn infer(&self, inputs: &Inputs) -> Result<Outputs> {
        let fuzzified = self.fuzzify(inputs)?;

        // Rules sharing a consequent are OR'd into one strength per output term
        let mut strengths = vec![0.; self.output.n_terms()];

        for rule in &self.rules {
            let strength = rule.premise.strength(&fuzzified.degrees);
            strengths[rule.consequent] = fuzzy_or([strengths[rule.consequent], strength]);
        }

        let mut clipped = Vec::with_capacity(strengths.len());
        let mut activations = Vec::with_capacity(strengths.len());

        for (i, &strength) in strengths.iter().enumerate() {
            let (name, membership) = self.output.term_at(i);

            trace!(term = name, strength, "output term activation");

            clipped.push(fire_rule(strength, membership));
            activations.push((name.to_owned(), strength));
        }

        let aggregated = aggregate(&clipped)?;
        let defuzzified = match defuzzify_all(&aggregated) {
            Ok(result) => result,
            Err(FuzzyError::EmptySet) if self.empty_set_policy == EmptySetPolicy::UniverseMean => {
                let mean = self.output.universe().mean();

                debug!(output = self.output.name(), mean, "no rule fired, reporting universe mean");

                DefuzzificationResult::uniform(mean)
            },
            Err(e) => return Err(e),
        };

        Ok(Outputs::new(aggregated, defuzzified, activations))
    }
}

/// Fuzzified inputs of one inference pass.
#[derive(Debug)]
pub struct Fuzzified<'s> {
    vars: &'s Variables,
    degrees: SecondaryMap<VariableKey, Vec<f64>>,
}

impl Fuzzified<'_> {
    /// Degree of the input for `variable` in `term`, if both exist and the
    /// variable was supplied.
    pub fn get(&self, variable: &str, term: &str) -> Option<f64> {
        let key = self.vars.key(variable).ok()?;
        let index = self.vars[key].term_index(term)?;

        self.degrees.get(key).map(|d| d[index])
    }
}

#[cfg(test)]
fn tipping_model() -> ModelConfig {
    use crate::config::VariableConfig;
    use crate::dsl::is;
    use crate::membership::Shape;
    use crate::universe::UniverseRange;

    ModelConfig::new(
        VariableConfig::new("tip", UniverseRange::new(0., 26., 1.))
            .term("low", Shape::triangular(0., 0., 13.))
            .term("medium", Shape::triangular(0., 13., 25.))
            .term("high", Shape::triangular(13., 25., 25.)),
    )
    .input(
        VariableConfig::new("quality", UniverseRange::new(0., 11., 1.))
            .term("poor", Shape::triangular(0., 0., 5.))
            .term("average", Shape::triangular(0., 5., 10.))
            .term("good", Shape::triangular(5., 10., 10.)),
    )
    .input(
        VariableConfig::new("service", UniverseRange::new(0., 11., 1.))
            .term("poor", Shape::triangular(0., 0., 5.))
            .term("average", Shape::triangular(0., 5., 10.))
            .term("good", Shape::triangular(5., 10., 10.)),
    )
    .rule(is("quality", "poor").or(is("service", "poor")), "low")
    .rule(is("service", "average"), "medium")
    .rule(is("service", "good").or(is("quality", "good")), "high")
}

#[test]
fn test_tipping() {
    let session = tipping_model().build().unwrap();
    let inputs = Inputs::new().with("quality", 10.).with("service", 10.);
    let outputs = session.infer(&inputs).unwrap();

    assert_eq!(outputs.activation("low"), Some(0.));
    assert_eq!(outputs.activation("medium"), Some(0.));
    assert_eq!(outputs.activation("high"), Some(1.));
    assert_eq!(outputs.aggregated(), session.output().term("high").unwrap());

    let result = outputs.defuzzified();

    assert_eq!(result.min_of_maximum, 25.);
    assert_eq!(result.max_of_maximum, 25.);
    assert_eq!(result.mean_of_maximum, 25.);
    assert!(result.centroid > 13. && result.centroid < 25.);
}

#[test]
fn test_rules_sharing_a_consequent_are_ored() {
    let session = tipping_model().build().unwrap();
    // quality poor = 0.6, service poor = 0.2
    let inputs = Inputs::new().with("quality", 2.).with("service", 4.);
    let fuzzified = session.fuzzify(&inputs).unwrap();

    assert_eq!(fuzzified.get("quality", "poor"), Some(0.6));
    assert_eq!(fuzzified.get("service", "poor"), Some(0.2));
    assert_eq!(fuzzified.get("service", "excellent"), None);

    let outputs = session.infer(&inputs).unwrap();

    assert_eq!(outputs.activation("low"), Some(0.6));
    assert_eq!(outputs.activation("medium"), Some(0.8));
    assert_eq!(outputs.aggregated().max_membership(), 0.8);
}

#[test]
fn test_infer_errors() {
    let session = tipping_model().build().unwrap();

    assert_eq!(
        session
            .infer(&Inputs::new().with("quality", 5.).with("ambience", 3.))
            .unwrap_err(),
        FuzzyError::UnknownVariable("ambience".into())
    );
    assert_eq!(
        session.infer(&Inputs::new().with("quality", 5.)).unwrap_err(),
        FuzzyError::MissingInput("service".into())
    );
    assert!(matches!(
        session
            .infer(&Inputs::new().with("quality", f64::NAN).with("service", 3.))
            .unwrap_err(),
        FuzzyError::NonFiniteInput { .. }
    ));
}

#[test]
fn test_empty_set_policy() {
    use crate::config::VariableConfig;
    use crate::dsl::is;
    use crate::membership::Shape;
    use crate::universe::UniverseRange;

    let config = ModelConfig::new(
        VariableConfig::new("out", UniverseRange::new(0., 11., 1.)).term("high", Shape::triangular(5., 10., 10.)),
    )
    .input(VariableConfig::new("x", UniverseRange::new(0., 11., 1.)).term("big", Shape::triangular(5., 10., 10.)))
    .rule(is("x", "big"), "high");

    let inputs = Inputs::new().with("x", 1.);

    assert_eq!(
        config.build().unwrap().infer(&inputs).unwrap_err(),
        FuzzyError::EmptySet
    );

    let session = config.empty_set_policy(EmptySetPolicy::UniverseMean).build().unwrap();
    let outputs = session.infer(&inputs).unwrap();

    assert!(outputs.aggregated().is_empty_set());
    assert_eq!(outputs.defuzzified(), &DefuzzificationResult::uniform(5.));
}

#[test]
fn test_build_errors() {
    use crate::config::VariableConfig;
    use crate::dsl::is;
    use crate::membership::Shape;
    use crate::universe::UniverseRange;

    let config = tipping_model().rule(is("quality", "superb"), "high");

    assert_eq!(
        config.build().unwrap_err(),
        FuzzyError::UnknownTerm {
            variable: "quality".into(),
            term: "superb".into()
        }
    );

    let config = tipping_model().rule(is("service", "good"), "generous");

    assert_eq!(
        config.build().unwrap_err(),
        FuzzyError::UnknownTerm {
            variable: "tip".into(),
            term: "generous".into()
        }
    );

    let config = tipping_model().input(VariableConfig::new("tip", UniverseRange::new(0., 5., 1.)));

    assert_eq!(config.build().unwrap_err(), FuzzyError::DuplicateVariable("tip".into()));

    let config = tipping_model().input(
        VariableConfig::new("price", UniverseRange::new(0., 5., 1.)).term("cheap", Shape::triangular(3., 2., 1.)),
    );

    assert!(matches!(config.build().unwrap_err(), FuzzyError::InvalidShape(_)));

    let config = tipping_model().input(VariableConfig::new("price", UniverseRange::new(5., 0., 1.)));

    assert!(matches!(config.build().unwrap_err(), FuzzyError::InvalidRange(_)));

    let config = ModelConfig::new(VariableConfig::new("tip", UniverseRange::new(0., 26., 1.))).input(
        VariableConfig::new("service", UniverseRange::new(0., 11., 1.)).term("poor", Shape::triangular(0., 0., 5.)),
    );

    assert_eq!(config.build().unwrap_err(), FuzzyError::NoTerms("tip".into()));
}

#[test]
fn test_session_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<InferenceSession>();

    let session = tipping_model().build().unwrap();
    let expected = session
        .infer(&Inputs::new().with("quality", 6.5).with("service", 9.8))
        .unwrap();

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let outputs = session
                    .infer(&Inputs::new().with("quality", 6.5).with("service", 9.8))
                    .unwrap();

                assert_eq!(outputs.defuzzified(), expected.defuzzified());
            });
        }
    });
}
