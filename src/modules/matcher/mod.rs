pub mod entity_matcher;
pub mod geo;
pub mod normalizer;

pub use entity_matcher::{EntityMatcher, MatchCriteria, MatchDecision};
pub use normalizer::PlaceNameNormalizer;
