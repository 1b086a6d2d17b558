use crate::error::{Error, Result};
use crate::record::PlanetRecord;

pub const EARTH_RADIUS: f64 = 1.0;
pub const EARTH_DENSITY: f64 = 1.0;
pub const EARTH_EQ_TEMP: f64 = 288.0;

/// Paramètre physique entrant dans l'ESI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Radius,
    Density,
    Temperature,
}

impl Parameter {
    pub const ALL: [Parameter; 3] = [Parameter::Radius, Parameter::Density, Parameter::Temperature];

    /// Valeur de référence terrestre, dans les unités du catalogue
    pub fn earth_value(self) -> f64 {
        match self {
            Parameter::Radius => EARTH_RADIUS,
            Parameter::Density => EARTH_DENSITY,
            Parameter::Temperature => EARTH_EQ_TEMP,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Parameter::Radius => "radius",
            Parameter::Density => "density",
            Parameter::Temperature => "temperature",
        }
    }

    pub fn value_of(self, record: &PlanetRecord) -> Option<f64> {
        match self {
            Parameter::Radius => record.radius,
            Parameter::Density => record.density,
            Parameter::Temperature => record.eq_temp,
        }
    }
}

/// Règle de validation des poids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightRule {
    /// Chaque poids dans [0, 1] et somme (arrondie à 2 décimales) égale à 1
    UnitInterval,
    /// Seuls les poids négatifs sont refusés
    NonNegative,
}

/// Poids attribués aux trois paramètres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightConfig {
    pub radius: f64,
    pub density: f64,
    pub temp: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            radius: 0.33,
            density: 0.33,
            temp: 0.34,
        }
    }
}

impl WeightConfig {
    pub fn new(radius: f64, density: f64, temp: f64) -> Self {
        Self {
            radius,
            density,
            temp,
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn weight(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Radius => self.radius,
            Parameter::Density => self.density,
            Parameter::Temperature => self.temp,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Parameter, f64)> + '_ {
        Parameter::ALL.into_iter().map(move |p| (p, self.weight(p)))
    }

    pub fn sum(&self) -> f64 {
        self.radius + self.density + self.temp
    }

    /// Lit les trois poids saisis en texte libre
    pub fn parse(radius: &str, density: &str, temp: &str) -> Result<Self> {
        Ok(Self {
            radius: parse_weight(Parameter::Radius, radius)?,
            density: parse_weight(Parameter::Density, density)?,
            temp: parse_weight(Parameter::Temperature, temp)?,
        })
    }

    pub fn validate(&self, rule: WeightRule) -> Result<()> {
        if let Some((p, w)) = self.iter().find(|(_, w)| *w < 0.0) {
            return Err(Error::InputValidation(format!(
                "{} weight must not be negative (got {})",
                p.label(),
                w
            )));
        }

        if rule == WeightRule::UnitInterval {
            if let Some((p, w)) = self.iter().find(|(_, w)| *w > 1.0) {
                return Err(Error::InputValidation(format!(
                    "{} weight must be between 0 and 1 (got {})",
                    p.label(),
                    w
                )));
            }
            // Tolérance de saisie : 0.33 + 0.33 + 0.34 doit passer
            let rounded = (self.sum() * 100.0).round() / 100.0;
            if rounded != 1.0 {
                return Err(Error::InputValidation(format!(
                    "weights must sum to exactly 1 (got {})",
                    rounded
                )));
            }
        }

        Ok(())
    }
}

fn parse_weight(parameter: Parameter, text: &str) -> Result<f64> {
    let value: f64 = text.trim().parse().map_err(|_| {
        Error::InputValidation(format!(
            "{} weight must be a number (got {:?})",
            parameter.label(),
            text
        ))
    })?;
    if !value.is_finite() {
        return Err(Error::InputValidation(format!(
            "{} weight must be a finite number (got {:?})",
            parameter.label(),
            text
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_padded_numbers() {
        let w = WeightConfig::parse(" 0.33", "0.33 ", "0.34").unwrap();
        assert_eq!(w, WeightConfig::default());
    }

    #[test]
    fn test_parse_rejects_text() {
        let err = WeightConfig::parse("abc", "0.33", "0.34").unwrap_err();
        assert!(matches!(err, Error::InputValidation(ref msg) if msg.contains("radius")));
    }

    #[test]
    fn test_parse_rejects_empty_and_nan() {
        assert!(WeightConfig::parse("0.5", "", "0.5").is_err());
        assert!(WeightConfig::parse("0.5", "0.5", "NaN").is_err());
        assert!(WeightConfig::parse("inf", "0", "0").is_err());
    }

    #[test]
    fn test_unit_interval_rule() {
        assert!(WeightConfig::default().validate(WeightRule::UnitInterval).is_ok());
        assert!(WeightConfig::new(1.0, 0.0, 0.0)
            .validate(WeightRule::UnitInterval)
            .is_ok());
        assert!(WeightConfig::new(0.5, 0.5, 0.5)
            .validate(WeightRule::UnitInterval)
            .is_err());
        assert!(WeightConfig::new(1.5, -0.5, 0.0)
            .validate(WeightRule::UnitInterval)
            .is_err());
        assert!(WeightConfig::zero().validate(WeightRule::UnitInterval).is_err());
    }

    #[test]
    fn test_unit_interval_sum_rounded_to_two_decimals() {
        // 0.999 arrondi à 1.00
        assert!(WeightConfig::new(0.333, 0.333, 0.333)
            .validate(WeightRule::UnitInterval)
            .is_ok());
        let err = WeightConfig::new(0.3, 0.3, 0.3)
            .validate(WeightRule::UnitInterval)
            .unwrap_err();
        assert!(matches!(err, Error::InputValidation(ref msg) if msg.contains("0.9")));
    }

    #[test]
    fn test_non_negative_rule() {
        assert!(WeightConfig::zero().validate(WeightRule::NonNegative).is_ok());
        assert!(WeightConfig::new(2.0, 3.0, 0.5)
            .validate(WeightRule::NonNegative)
            .is_ok());
        let err = WeightConfig::new(0.5, -0.1, 0.5)
            .validate(WeightRule::NonNegative)
            .unwrap_err();
        assert!(matches!(err, Error::InputValidation(ref msg) if msg.contains("density")));
    }

    #[test]
    fn test_earth_reference_values() {
        assert_eq!(Parameter::Radius.earth_value(), 1.0);
        assert_eq!(Parameter::Density.earth_value(), 1.0);
        assert_eq!(Parameter::Temperature.earth_value(), 288.0);
    }
}
