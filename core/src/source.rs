use crate::error::{Error, Result};
use crate::record::PlanetRecord;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Requête TAP de la NASA Exoplanet Archive (table `ps`, sortie CSV)
pub const ARCHIVE_URL: &str = "https://exoplanetarchive.ipac.caltech.edu/TAP/sync?query=select+pl_name,pl_rade,pl_dens,pl_eqt+from+ps&format=csv";

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub const COL_NAME: &str = "pl_name";
pub const COL_RADIUS: &str = "pl_rade";
pub const COL_DENSITY: &str = "pl_dens";
pub const COL_EQ_TEMP: &str = "pl_eqt";

/// Fournisseur de lignes du catalogue
pub trait DataSource {
    fn name(&self) -> &str;
    fn fetch(&self) -> Result<Vec<PlanetRecord>>;
}

/// Client bloquant de l'archive : une seule requête GET, sans nouvelle tentative
pub struct ArchiveClient {
    endpoint: String,
    client: Client,
}

impl ArchiveClient {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(ARCHIVE_URL, FETCH_TIMEOUT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::FetchConnection(e.to_string()))?;
        Ok(Self::from_client(endpoint, client))
    }

    pub fn from_client(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl DataSource for ArchiveClient {
    fn name(&self) -> &str {
        "NASA Exoplanet Archive"
    }

    fn fetch(&self) -> Result<Vec<PlanetRecord>> {
        info!("Téléchargement du catalogue: {}", self.endpoint);

        let resp = self
            .client
            .get(&self.endpoint)
            .send()
            .map_err(transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            warn!("Réponse HTTP {} de l'archive", status);
            return Err(Error::FetchStatus(status.as_u16()));
        }

        let body = resp.text().map_err(transport_error)?;
        debug!("{} octets reçus", body.len());

        let records = parse_catalog(&body)?;
        info!("{} lignes lues dans le catalogue", records.len());
        Ok(records)
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::FetchTimeout
    } else if err.is_decode() {
        Error::PayloadParse(error_chain(&err))
    } else {
        Error::FetchConnection(error_chain(&err))
    }
}

/// Message de l'erreur suivi de toutes ses causes, séparés par ": "
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // hyper répète parfois la cause dans le message parent
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Lit le CSV renvoyé par l'archive.
///
/// L'en-tête doit contenir `pl_name`, `pl_rade`, `pl_dens` et `pl_eqt`, dans
/// n'importe quel ordre ; les autres colonnes sont ignorées. Une cellule
/// numérique vide ou illisible devient `None`.
pub fn parse_catalog(text: &str) -> Result<Vec<PlanetRecord>> {
    if text.trim().is_empty() {
        return Err(Error::EmptyResult);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| Error::PayloadParse(e.to_string()))?
        .clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::PayloadParse(format!("missing column {}", name)))
    };
    let name_idx = column(COL_NAME)?;
    let radius_idx = column(COL_RADIUS)?;
    let density_idx = column(COL_DENSITY)?;
    let temp_idx = column(COL_EQ_TEMP)?;

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row.map_err(|e| Error::PayloadParse(e.to_string()))?;
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        records.push(PlanetRecord {
            name: cell(name_idx).to_string(),
            radius: parse_number(cell(radius_idx), line),
            density: parse_number(cell(density_idx), line),
            eq_temp: parse_number(cell(temp_idx), line),
        });
    }

    if records.is_empty() {
        return Err(Error::EmptyResult);
    }

    Ok(records)
}

fn parse_number(cell: &str, line: usize) -> Option<f64> {
    if cell.is_empty() {
        return None;
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        Ok(_) => None,
        Err(_) => {
            debug!("Ligne {}: valeur non numérique {:?}", line + 1, cell);
            None
        }
    }
}
