use crate::error::{Error, Result};
use crate::esi::EsiScorer;
use crate::record::PlanetRecord;
use crate::weights::WeightConfig;
use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, info};

/// Nombre de planètes affichées
pub const TOP_N: usize = 10;

/// Décimales conservées pour l'affichage du score
pub const SCORE_DECIMALS: i32 = 5;

/// Une ligne du classement final
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlanet {
    /// Rang à partir de 1
    pub rank: usize,
    pub name: String,
    /// ESI arrondi à `SCORE_DECIMALS` décimales
    pub score: f64,
}

/// Compteurs d'une passe de classement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankingSummary {
    pub scored: usize,
    pub skipped: usize,
}

pub fn round_score(score: f64) -> f64 {
    let scale = 10f64.powi(SCORE_DECIMALS);
    (score * scale).round() / scale
}

/// Classe les planètes par ESI décroissant et garde les `top_n` premières.
///
/// Le tri est stable : à score égal, l'ordre du catalogue est conservé.
pub fn rank(
    records: &[PlanetRecord],
    scorer: &dyn EsiScorer,
    weights: &WeightConfig,
    top_n: usize,
) -> Result<Vec<RankedPlanet>> {
    let (ranked, summary) = rank_with_summary(records, scorer, weights, top_n)?;
    info!(
        "{} planètes classées, {} ignorées (données incomplètes)",
        summary.scored, summary.skipped
    );
    Ok(ranked)
}

pub fn rank_with_summary(
    records: &[PlanetRecord],
    scorer: &dyn EsiScorer,
    weights: &WeightConfig,
    top_n: usize,
) -> Result<(Vec<RankedPlanet>, RankingSummary)> {
    let scored: Vec<(&PlanetRecord, f64)> = records
        .iter()
        .filter_map(|record| scorer.score(record, weights).map(|s| (record, s)))
        .collect();

    let summary = RankingSummary {
        scored: scored.len(),
        skipped: records.len() - scored.len(),
    };
    debug!("Scoreur {}: {:?}", scorer.name(), summary);

    if scored.is_empty() {
        return Err(Error::NoRankableRecords);
    }

    let ranked = scored
        .into_iter()
        .sorted_by(|a, b| b.1.total_cmp(&a.1))
        .take(top_n)
        .enumerate()
        .map(|(idx, (record, score))| RankedPlanet {
            rank: idx + 1,
            name: record.name.clone(),
            score: round_score(score),
        })
        .collect();

    Ok((ranked, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorers::{ArithmeticMeanScorer, GeometricMeanScorer};

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(0.123456789), 0.12346);
        assert_eq!(round_score(1.0), 1.0);
        assert_eq!(round_score(0.0), 0.0);
    }

    #[test]
    fn test_rank_orders_descending() {
        let records = vec![
            PlanetRecord::new("far", 10.0, 5.0, 1200.0),
            PlanetRecord::new("earth", 1.0, 1.0, 288.0),
            PlanetRecord::new("close", 1.2, 0.9, 300.0),
        ];
        let ranked = rank(&records, &ArithmeticMeanScorer, &WeightConfig::default(), TOP_N).unwrap();
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["earth", "close", "far"]);
        assert_eq!(ranked.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_rank_ties_keep_catalog_order() {
        let records = vec![
            PlanetRecord::new("b", 2.0, 1.0, 288.0),
            PlanetRecord::new("a", 2.0, 1.0, 288.0),
            PlanetRecord::new("c", 2.0, 1.0, 288.0),
        ];
        for _ in 0..3 {
            let ranked =
                rank(&records, &GeometricMeanScorer, &WeightConfig::default(), TOP_N).unwrap();
            let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
            assert_eq!(names, vec!["b", "a", "c"]);
        }
    }

    #[test]
    fn test_rank_truncates_to_top_n() {
        let records: Vec<PlanetRecord> = (0..25)
            .map(|i| PlanetRecord::new(format!("p{}", i), 1.0 + i as f64, 1.0, 288.0))
            .collect();
        let ranked = rank(&records, &ArithmeticMeanScorer, &WeightConfig::default(), TOP_N).unwrap();
        assert_eq!(ranked.len(), TOP_N);
        assert_eq!(ranked[0].name, "p0");
        assert_eq!(ranked[9].name, "p9");
    }

    #[test]
    fn test_rank_skips_incomplete_records() {
        let records = vec![
            PlanetRecord {
                name: "unknown".to_string(),
                radius: None,
                density: Some(1.0),
                eq_temp: Some(288.0),
            },
            PlanetRecord::new("known", 2.0, 1.0, 288.0),
        ];
        let (ranked, summary) =
            rank_with_summary(&records, &ArithmeticMeanScorer, &WeightConfig::default(), TOP_N)
                .unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "known");
        assert_eq!(summary, RankingSummary { scored: 1, skipped: 1 });
    }

    #[test]
    fn test_rank_without_rankable_records() {
        let records = vec![PlanetRecord {
            name: "ghost".to_string(),
            radius: None,
            density: None,
            eq_temp: None,
        }];
        let err = rank(&records, &ArithmeticMeanScorer, &WeightConfig::default(), TOP_N).unwrap_err();
        assert!(matches!(err, Error::NoRankableRecords));
        assert!(!err.is_fatal());

        let err = rank(&[], &ArithmeticMeanScorer, &WeightConfig::default(), TOP_N).unwrap_err();
        assert!(matches!(err, Error::NoRankableRecords));
    }
}
