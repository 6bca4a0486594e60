//! Mamdani fuzzy inference over discretized universes.
//!
//! Crisp inputs are fuzzified against sampled membership functions, rules
//! combine the degrees with fuzzy AND (min) / OR (max) and clip their
//! consequents, the clipped sets are aggregated with a pointwise max and the
//! result is defuzzified five ways.
//!
//! ```
//! use fuzzy_mamdani::{is, Inputs, ModelConfig, Shape, UniverseRange, VariableConfig};
//!
//! let session = ModelConfig::new(
//!     VariableConfig::new("tip", UniverseRange::new(0., 26., 1.))
//!         .term("low", Shape::triangular(0., 0., 13.))
//!         .term("high", Shape::triangular(13., 25., 25.)),
//! )
//! .input(
//!     VariableConfig::new("service", UniverseRange::new(0., 11., 1.))
//!         .term("poor", Shape::triangular(0., 0., 5.))
//!         .term("good", Shape::triangular(5., 10., 10.)),
//! )
//! .rule(is("service", "poor"), "low")
//! .rule(is("service", "good"), "high")
//! .build()?;
//!
//! let outputs = session.infer(&Inputs::new().with("service", 10.))?;
//!
//! assert_eq!(outputs.defuzzified().max_of_maximum, 25.);
//! # Ok::<(), fuzzy_mamdani::FuzzyError>(())
//! ```

mod arange;
mod config;
mod defuzz;
mod dsl;
mod error;
mod inference;
mod inputs;
mod math;
mod membership;
mod ops;
mod outputs;
mod rules;
mod universe;
mod variable;

pub use config::{EmptySetPolicy, ModelConfig, TermConfig, VariableConfig};
pub use defuzz::{
    bisector, centroid, defuzzify_all, max_of_maximum, mean_of_maximum, min_of_maximum, DefuzzificationOp,
    DefuzzificationResult,
};
pub use dsl::{is, Antecedent};
pub use error::{FuzzyError, Result};
pub use inference::{Fuzzified, InferenceSession};
pub use inputs::Inputs;
pub use membership::{membership_at, MembershipFunction, Shape};
pub use ops::{aggregate, fire_rule, fuzzy_and, fuzzy_or, AggregatedSet, FiringStrength};
pub use outputs::Outputs;
pub use rules::{Rule, Rules};
pub use universe::{Universe, UniverseRange};
pub use variable::{Variable, VariableKey, Variables};
