//! Error types for fuzzy inference

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FuzzyError {
    // Construction errors
    #[error("Invalid universe range: {0}")]
    InvalidRange(String),

    #[error("Invalid membership shape: {0}")]
    InvalidShape(String),

    #[error("Membership value {value} at sample {index} is outside [0, 1]")]
    MembershipOutOfRange { index: usize, value: f64 },

    #[error("Universe mismatch: expected {expected} samples, got {actual}")]
    UniverseMismatch { expected: usize, actual: usize },

    #[error("Universe mismatch: sample {index} is {actual}, expected {expected}")]
    GridMismatch { index: usize, expected: f64, actual: f64 },

    // Aggregation / defuzzification errors
    #[error("Cannot aggregate an empty collection of fuzzy sets")]
    EmptyInput,

    #[error("Cannot defuzzify a fuzzy set whose memberships are all zero")]
    EmptySet,

    // Model errors
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("Unknown term {term} for variable {variable}")]
    UnknownTerm { variable: String, term: String },

    #[error("Variable {0} is defined more than once")]
    DuplicateVariable(String),

    #[error("Term {term} is defined more than once for variable {variable}")]
    DuplicateTerm { variable: String, term: String },

    #[error("Output variable {0} has no terms")]
    NoTerms(String),

    // Inference errors
    #[error("Input {variable} is not a finite number: {value}")]
    NonFiniteInput { variable: String, value: f64 },

    #[error("No input supplied for variable {0}")]
    MissingInput(String),
}

pub type Result<T> = std::result::Result<T, FuzzyError>;
