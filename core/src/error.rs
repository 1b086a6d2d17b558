use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid weights: {0}")]
    InputValidation(String),

    #[error("Timed out while downloading the exoplanet catalog")]
    FetchTimeout,

    #[error("Could not reach the exoplanet archive: {0}")]
    FetchConnection(String),

    #[error("Exoplanet archive answered with HTTP status {0}")]
    FetchStatus(u16),

    #[error("Could not parse the catalog payload: {0}")]
    PayloadParse(String),

    #[error("The exoplanet archive returned no rows")]
    EmptyResult,

    #[error("No planet has enough data to compute an ESI")]
    NoRankableRecords,
}

impl Error {
    /// Seul `NoRankableRecords` est un résultat vide plutôt qu'un échec
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::NoRankableRecords)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
