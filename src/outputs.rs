use crate::defuzz::{DefuzzificationOp, DefuzzificationResult};
use crate::ops::{AggregatedSet, FiringStrength};

/// Result of one inference pass.
#[derive(Clone, Debug)]
pub struct Outputs {
    aggregated: AggregatedSet,
    defuzzified: DefuzzificationResult,
    activations: Vec<(String, FiringStrength)>,
}

impl Outputs {
    pub(crate) fn new(
        aggregated: AggregatedSet,
        defuzzified: DefuzzificationResult,
        activations: Vec<(String, FiringStrength)>,
    ) -> Self {
        Self {
            aggregated,
            defuzzified,
            activations,
        }
    }

    /// The pointwise max of every clipped output term.
    pub fn aggregated(&self) -> &AggregatedSet {
        &self.aggregated
    }

    pub fn defuzzified(&self) -> &DefuzzificationResult {
        &self.defuzzified
    }

    pub fn get(&self, op: DefuzzificationOp) -> f64 {
        self.defuzzified.get(op)
    }

    /// Strength the output term was clipped at, the OR of all its rules.
    pub fn activation(&self, term: &str) -> Option<FiringStrength> {
        self.activations
            .iter()
            .find(|(name, _)| name == term)
            .map(|(_, strength)| *strength)
    }

    /// Per output term strengths, in term order.
    pub fn activations(&self) -> impl Iterator<Item = (&str, FiringStrength)> {
        self.activations.iter().map(|(name, s)| (name.as_str(), *s))
    }

    /// Interpolated height of the aggregated set at `x`.
    pub fn membership_at(&self, x: f64) -> f64 {
        self.aggregated.at(x)
    }

    pub fn into_parts(self) -> (AggregatedSet, DefuzzificationResult) {
        (self.aggregated, self.defuzzified)
    }
}
