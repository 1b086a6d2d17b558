use crate::record::PlanetRecord;
use crate::scorers::{ArithmeticMeanScorer, GeometricMeanScorer};
use crate::weights::{Parameter, WeightConfig, WeightRule};

/// Facteur de similarité d'un paramètre : `1 - |(p - e) / (p + e)|`.
///
/// Indéfini si `p + e == 0`. Le résultat est borné à [0, 1], ce qui ramène à 0
/// les valeurs négatives aberrantes plutôt que de produire un NaN à
/// l'exponentiation.
pub fn similarity_factor(value: f64, earth: f64) -> Option<f64> {
    let denom = value + earth;
    if denom == 0.0 {
        return None;
    }
    let factor = 1.0 - ((value - earth) / denom).abs();
    if !factor.is_finite() {
        return None;
    }
    Some(factor.clamp(0.0, 1.0))
}

/// Composante pondérée : `factor ** weight`
pub fn component(value: f64, earth: f64, weight: f64) -> Option<f64> {
    similarity_factor(value, earth).map(|f| f.powf(weight))
}

/// Les trois valeurs du record, ou `None` si l'une manque
pub(crate) fn planet_values(record: &PlanetRecord) -> Option<[(Parameter, f64); 3]> {
    if !record.is_complete() {
        return None;
    }
    Some([
        (Parameter::Radius, record.radius?),
        (Parameter::Density, record.density?),
        (Parameter::Temperature, record.eq_temp?),
    ])
}

/// Calcule un ESI pour une planète
pub trait EsiScorer: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` quand la planète ne peut pas être classée
    fn score(&self, record: &PlanetRecord, weights: &WeightConfig) -> Option<f64>;
}

/// Mode d'agrégation des composantes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Moyenne des composantes de poids > 0
    ArithmeticMean,
    /// Produit des composantes élevé à `1 / somme(poids)`
    GeometricMean,
}

/// Agrégation et règle de validation des poids, toujours utilisées ensemble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPolicy {
    pub aggregation: Aggregation,
    pub weight_rule: WeightRule,
}

impl ScoringPolicy {
    pub const ARITHMETIC: ScoringPolicy = ScoringPolicy {
        aggregation: Aggregation::ArithmeticMean,
        weight_rule: WeightRule::UnitInterval,
    };

    pub const GEOMETRIC: ScoringPolicy = ScoringPolicy {
        aggregation: Aggregation::GeometricMean,
        weight_rule: WeightRule::NonNegative,
    };

    pub fn scorer(&self) -> Box<dyn EsiScorer> {
        match self.aggregation {
            Aggregation::ArithmeticMean => Box::new(ArithmeticMeanScorer),
            Aggregation::GeometricMean => Box::new(GeometricMeanScorer),
        }
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::ARITHMETIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_is_one_at_earth_value() {
        assert_eq!(similarity_factor(1.0, 1.0), Some(1.0));
        assert_eq!(similarity_factor(288.0, 288.0), Some(1.0));
    }

    #[test]
    fn test_factor_undefined_when_denominator_is_zero() {
        assert_eq!(similarity_factor(-1.0, 1.0), None);
        assert_eq!(component(-288.0, 288.0, 0.5), None);
    }

    #[test]
    fn test_factor_known_value() {
        // 1 - |(3 - 1) / (3 + 1)| = 0.5
        assert_eq!(similarity_factor(3.0, 1.0), Some(0.5));
        assert!((component(3.0, 1.0, 0.5).unwrap() - 0.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_factor_bounded_for_negative_values() {
        // (-3 - 1) / (-3 + 1) = 2, brut = -1
        assert_eq!(similarity_factor(-3.0, 1.0), Some(0.0));
        assert_eq!(similarity_factor(0.0, 1.0), Some(0.0));
    }

    #[test]
    fn test_zero_weight_component_is_neutral() {
        assert_eq!(component(11.2, 1.0, 0.0), Some(1.0));
    }

    #[test]
    fn test_default_policy_is_arithmetic() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.aggregation, Aggregation::ArithmeticMean);
        assert_eq!(policy.weight_rule, WeightRule::UnitInterval);
        assert_eq!(policy.scorer().name(), "ArithmeticMeanScorer");
        assert_eq!(ScoringPolicy::GEOMETRIC.scorer().name(), "GeometricMeanScorer");
    }
}
