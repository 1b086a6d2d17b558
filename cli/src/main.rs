use anyhow::{Context, Result};
use clap::Parser;
use esi_rank_core::{ArchiveClient, Error, RankedPlanet, RunState};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "esi_rank")]
#[command(about = "Classe les exoplanètes de la NASA selon leur indice de similarité terrestre (ESI)")]
struct Args {
    /// Poids du rayon
    #[arg(long, default_value = "0.33")]
    radius_weight: String,

    /// Poids de la densité
    #[arg(long, default_value = "0.33")]
    density_weight: String,

    /// Poids de la température d'équilibre
    #[arg(long, default_value = "0.34")]
    temp_weight: String,

    /// Sortie JSON au lieu du tableau texte
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    status: String,
    results: &'a [RankedPlanet],
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut state = RunState::default();
    state.set_weight_texts(args.radius_weight, args.density_weight, args.temp_weight);

    // Validation avant toute connexion réseau
    let weights = state.validated_weights()?;
    info!(
        "Poids: rayon={} densité={} température={}",
        weights.radius, weights.density, weights.temp
    );

    let client = ArchiveClient::new().context("Échec de la création du client HTTP")?;

    match state.run(&client) {
        Ok(_) => {}
        Err(Error::NoRankableRecords) => {
            warn!("{}", state.status);
        }
        Err(e) => {
            return Err(e).context("Échec du calcul de l'ESI");
        }
    }

    if args.json {
        let report = JsonReport {
            status: state.status.to_string(),
            results: &state.table,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&state.table);
    }

    Ok(())
}

fn print_table(rows: &[RankedPlanet]) {
    if rows.is_empty() {
        println!("Aucune exoplanète valide trouvée.");
        return;
    }
    let width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Planet".len());

    println!("{:>4}  {:<width$}  {:>7}", "#", "Planet", "ESI", width = width);
    for row in rows {
        println!(
            "{:>4}  {:<width$}  {:>7.5}",
            row.rank,
            row.name,
            row.score,
            width = width
        );
    }
}
