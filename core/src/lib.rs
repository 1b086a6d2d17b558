pub mod error;
pub mod esi;
pub mod ranking;
pub mod record;
pub mod scorers;
pub mod session;
pub mod source;
pub mod weights;


pub use error::{Error, Result};
pub use esi::{component, similarity_factor, Aggregation, EsiScorer, ScoringPolicy};
pub use ranking::{
    rank, rank_with_summary, round_score, RankedPlanet, RankingSummary, SCORE_DECIMALS, TOP_N,
};
pub use record::PlanetRecord;
pub use scorers::{ArithmeticMeanScorer, GeometricMeanScorer};
pub use session::{RunState, Status};
pub use source::{parse_catalog, ArchiveClient, DataSource, ARCHIVE_URL, FETCH_TIMEOUT};
pub use weights::{
    Parameter, WeightConfig, WeightRule, EARTH_DENSITY, EARTH_EQ_TEMP, EARTH_RADIUS,
};
