use crate::error::{Error, Result};
use crate::esi::ScoringPolicy;
use crate::ranking::{rank, RankedPlanet, TOP_N};
use crate::record::PlanetRecord;
use crate::source::DataSource;
use crate::weights::WeightConfig;
use std::fmt;
use tracing::{error, info};

/// Ligne d'état affichée à l'utilisateur
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Fetching,
    Computing,
    Done(usize),
    NoResults,
    Failed(String),
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(self, Status::Failed(_) | Status::NoResults)
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Status::Fetching | Status::Computing)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => Ok(()),
            Status::Fetching => write!(f, "Fetching exoplanet data..."),
            Status::Computing => write!(f, "Computing ESI..."),
            Status::Done(n) => write!(f, "Done: top {} exoplanets found", n),
            Status::NoResults => write!(f, "No valid exoplanet found"),
            Status::Failed(msg) => write!(f, "Error: {}", msg),
        }
    }
}

/// État d'une session : saisies, politique de score, statut et tableau affiché.
///
/// Les frontaux (CLI, fenêtre) modifient les textes de poids puis appellent
/// [`RunState::run`] ; ils relisent ensuite `status` et `table`.
#[derive(Debug, Clone)]
pub struct RunState {
    pub radius_text: String,
    pub density_text: String,
    pub temp_text: String,
    pub policy: ScoringPolicy,
    pub status: Status,
    pub table: Vec<RankedPlanet>,
}

impl Default for RunState {
    fn default() -> Self {
        Self::with_weights(&WeightConfig::default())
    }
}

impl RunState {
    pub fn with_weights(weights: &WeightConfig) -> Self {
        Self {
            radius_text: weights.radius.to_string(),
            density_text: weights.density.to_string(),
            temp_text: weights.temp.to_string(),
            policy: ScoringPolicy::default(),
            status: Status::Idle,
            table: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_weight_texts(
        &mut self,
        radius: impl Into<String>,
        density: impl Into<String>,
        temp: impl Into<String>,
    ) {
        self.radius_text = radius.into();
        self.density_text = density.into();
        self.temp_text = temp.into();
    }

    /// Lit et valide les poids selon la règle de la politique active
    pub fn validated_weights(&self) -> Result<WeightConfig> {
        let weights = WeightConfig::parse(&self.radius_text, &self.density_text, &self.temp_text)?;
        weights.validate(self.policy.weight_rule)?;
        Ok(weights)
    }

    /// Valide les poids sans toucher au réseau ; met le statut à `Fetching` si tout va bien
    pub fn prepare(&mut self) -> Result<WeightConfig> {
        match self.validated_weights() {
            Ok(weights) => {
                self.status = Status::Fetching;
                Ok(weights)
            }
            Err(e) => {
                self.status = Status::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Exécute une passe complète : validation, téléchargement, calcul, classement.
    ///
    /// Retourne le nombre de lignes affichées. Sur erreur, le tableau précédent
    /// est conservé, sauf si aucune planète n'est classable (tableau vidé).
    pub fn run(&mut self, source: &dyn DataSource) -> Result<usize> {
        let weights = self.prepare()?;
        let records = self.fetch(source)?;
        self.compute(&records, &weights)
    }

    /// Télécharge le catalogue ; met le statut à `Computing` en cas de succès
    pub fn fetch(&mut self, source: &dyn DataSource) -> Result<Vec<PlanetRecord>> {
        self.status = Status::Fetching;
        info!("{} ({})", self.status, source.name());

        let records = match source.fetch() {
            Ok(records) if records.is_empty() => return Err(self.fail(Error::EmptyResult)),
            Ok(records) => records,
            Err(e) => return Err(self.fail(e)),
        };

        self.status = Status::Computing;
        info!("{}", self.status);
        Ok(records)
    }

    /// Classe les planètes téléchargées et remplace le tableau
    pub fn compute(&mut self, records: &[PlanetRecord], weights: &WeightConfig) -> Result<usize> {
        let scorer = self.policy.scorer();
        match rank(records, scorer.as_ref(), weights, TOP_N) {
            Ok(ranked) => {
                let n = ranked.len();
                self.table = ranked;
                self.status = Status::Done(n);
                info!("{}", self.status);
                Ok(n)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&mut self, e: Error) -> Error {
        match &e {
            Error::NoRankableRecords => {
                self.table.clear();
                self.status = Status::NoResults;
                info!("{}", self.status);
            }
            other => {
                error!("{}", other);
                self.status = Status::Failed(other.to_string());
            }
        }
        e
    }
}
