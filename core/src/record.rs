/// Une ligne du catalogue : nom de la planète et ses trois paramètres physiques.
///
/// Chaque valeur numérique peut être absente dans l'archive ; l'absence est
/// représentée par `None` et rend la planète non classable.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetRecord {
    pub name: String,
    /// Rayon en rayons terrestres
    pub radius: Option<f64>,
    /// Densité en densités terrestres
    pub density: Option<f64>,
    /// Température d'équilibre en Kelvin
    pub eq_temp: Option<f64>,
}

impl PlanetRecord {
    pub fn new(name: impl Into<String>, radius: f64, density: f64, eq_temp: f64) -> Self {
        Self {
            name: name.into(),
            radius: Some(radius),
            density: Some(density),
            eq_temp: Some(eq_temp),
        }
    }

    /// Vrai si les trois valeurs sont présentes et finies
    pub fn is_complete(&self) -> bool {
        [self.radius, self.density, self.eq_temp]
            .iter()
            .all(|v| matches!(v, Some(x) if x.is_finite()))
    }
}
