use crate::esi::{planet_values, similarity_factor, EsiScorer};
use crate::record::PlanetRecord;
use crate::weights::WeightConfig;

/// Moyenne arithmétique des composantes `factor ** weight`.
///
/// Les paramètres de poids nul sont ignorés, ainsi que ceux dont le facteur
/// est indéfini. Sans aucune composante, le score est indéfini.
pub struct ArithmeticMeanScorer;

impl EsiScorer for ArithmeticMeanScorer {
    fn name(&self) -> &'static str {
        "ArithmeticMeanScorer"
    }

    fn score(&self, record: &PlanetRecord, weights: &WeightConfig) -> Option<f64> {
        let values = planet_values(record)?;

        let components: Vec<f64> = values
            .iter()
            .filter_map(|&(parameter, value)| {
                let weight = weights.weight(parameter);
                if weight <= 0.0 {
                    return None;
                }
                similarity_factor(value, parameter.earth_value()).map(|f| f.powf(weight))
            })
            .collect();

        if components.is_empty() {
            return None;
        }

        let mean = components.iter().sum::<f64>() / components.len() as f64;
        Some(mean.clamp(0.0, 1.0))
    }
}

/// Moyenne géométrique pondérée : `(Π factor ** weight) ** (1 / Σ weight)`.
///
/// Indéfini si la somme des poids est nulle ou si un paramètre de poids
/// positif a un facteur indéfini.
pub struct GeometricMeanScorer;

impl EsiScorer for GeometricMeanScorer {
    fn name(&self) -> &'static str {
        "GeometricMeanScorer"
    }

    fn score(&self, record: &PlanetRecord, weights: &WeightConfig) -> Option<f64> {
        let values = planet_values(record)?;

        let total_weight = weights.sum();
        if total_weight <= 0.0 {
            return None;
        }

        let mut product = 1.0;
        for &(parameter, value) in &values {
            let weight = weights.weight(parameter);
            if weight == 0.0 {
                // x ** 0 == 1
                continue;
            }
            product *= similarity_factor(value, parameter.earth_value())?.powf(weight);
        }

        let esi = product.powf(1.0 / total_weight);
        if !esi.is_finite() {
            return None;
        }
        Some(esi.clamp(0.0, 1.0))
    }
}
