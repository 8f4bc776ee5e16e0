use super::geo::haversine_distance_m;
use super::normalizer::PlaceNameNormalizer;
use crate::modules::provider::PlaceCandidate;
use crate::modules::registry::MasterPlace;
use serde::Serialize;

/// Thresholds for deciding whether a candidate is the same establishment
#[derive(Debug, Clone, Copy)]
pub struct MatchCriteria {
    pub max_distance_m: f64,
    pub min_name_similarity: f64,
}

impl Default for MatchCriteria {
    fn default() -> Self {
        Self {
            max_distance_m: 50.0,
            min_name_similarity: 0.6,
        }
    }
}

/// Outcome of a single master/candidate comparison
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatchDecision {
    pub matched: bool,
    pub distance_m: f64,
    pub similarity: f64,
}

/// Decides whether a platform candidate refers to the same real-world
/// establishment as a master record. Pure computation, no I/O.
pub struct EntityMatcher {
    criteria: MatchCriteria,
    normalizer: PlaceNameNormalizer,
}

impl EntityMatcher {
    pub fn new(criteria: MatchCriteria) -> Self {
        Self {
            criteria,
            normalizer: PlaceNameNormalizer::new(),
        }
    }

    /// Similarity of two establishment names in [0.0, 1.0].
    ///
    /// Both names are normalized first; a name that normalizes to empty
    /// cannot be compared and scores 0.0 against anything.
    pub fn name_similarity(&self, a: &str, b: &str) -> f64 {
        let na = self.normalizer.normalize(a);
        let nb = self.normalizer.normalize(b);

        if na.is_empty() || nb.is_empty() {
            return 0.0;
        }

        strsim::normalized_levenshtein(&na, &nb)
    }

    /// A candidate matches when it is both geographically close enough and
    /// similar enough in name.
    pub fn is_match(&self, master: &MasterPlace, candidate: &PlaceCandidate) -> MatchDecision {
        let distance_m = haversine_distance_m(
            master.latitude,
            master.longitude,
            candidate.latitude,
            candidate.longitude,
        );

        let similarity = self.name_similarity(&master.name, &candidate.name);

        MatchDecision {
            matched: distance_m <= self.criteria.max_distance_m
                && similarity >= self.criteria.min_name_similarity,
            distance_m,
            similarity,
        }
    }

    /// Best-matching candidate, or None when nothing passes `is_match`.
    ///
    /// Similarity carries more weight than proximity; ties keep the
    /// first-encountered candidate, so the caller's ordering is preserved.
    pub fn find_best_match<'a>(
        &self,
        master: &MasterPlace,
        candidates: &'a [PlaceCandidate],
    ) -> Option<(&'a PlaceCandidate, MatchDecision)> {
        let mut best: Option<(&PlaceCandidate, MatchDecision, f64)> = None;

        for candidate in candidates {
            let decision = self.is_match(master, candidate);
            if !decision.matched {
                continue;
            }

            let score = self.selection_score(&decision);
            match &best {
                Some((_, _, best_score)) if score <= *best_score => {}
                _ => best = Some((candidate, decision, score)),
            }
        }

        best.map(|(candidate, decision, _)| (candidate, decision))
    }

    fn selection_score(&self, decision: &MatchDecision) -> f64 {
        decision.similarity * 0.7
            + (1.0 - decision.distance_m / self.criteria.max_distance_m) * 0.3
    }
}

impl Default for EntityMatcher {
    fn default() -> Self {
        Self::new(MatchCriteria::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::provider::Platform;
    use crate::modules::registry::PlaceStatus;
    use chrono::Utc;
    use uuid::Uuid;

    fn master(name: &str, latitude: f64, longitude: f64) -> MasterPlace {
        MasterPlace {
            id: Uuid::new_v4(),
            natural_key: "1234567890".to_string(),
            name: name.to_string(),
            road_address: None,
            lot_address: None,
            latitude,
            longitude,
            industry_code: None,
            industry_name: None,
            opened_at: None,
            status: PlaceStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn candidate(name: &str, latitude: f64, longitude: f64) -> PlaceCandidate {
        PlaceCandidate {
            platform_id: format!("cand-{}", name),
            platform: Platform::Kakao,
            name: name.to_string(),
            latitude,
            longitude,
            address: None,
            phone: None,
            rating: None,
            review_count: None,
            url: None,
        }
    }

    /// Shift a latitude north by roughly `meters`
    fn north_of(latitude: f64, meters: f64) -> f64 {
        latitude + meters / 111_195.0
    }

    #[test]
    fn nearby_store_with_branch_suffix_matches() {
        let matcher = EntityMatcher::default();
        let m = master("Blue Bottle Coffee", 37.544, 127.055);
        let c = candidate("Blue Bottle Coffee 1st Branch", 37.5441, 127.0551);

        let decision = matcher.is_match(&m, &c);
        assert!(decision.matched);
        assert!(decision.distance_m < 20.0);
        assert!(decision.similarity >= 0.6);
    }

    #[test]
    fn distant_twin_does_not_match() {
        let matcher = EntityMatcher::default();
        let m = master("Blue Bottle Coffee", 37.544, 127.055);
        // Same name, ~550 m away
        let c = candidate("Blue Bottle Coffee", north_of(37.544, 550.0), 127.055);

        let decision = matcher.is_match(&m, &c);
        assert!(!decision.matched);
        assert_eq!(decision.similarity, 1.0);
    }

    #[test]
    fn dissimilar_neighbor_does_not_match() {
        let matcher = EntityMatcher::default();
        let m = master("Blue Bottle Coffee", 37.544, 127.055);
        let c = candidate("Paris Baguette", 37.544, 127.055);

        let decision = matcher.is_match(&m, &c);
        assert!(!decision.matched);
        assert!(decision.similarity < 0.6);
    }

    #[test]
    fn similarity_is_symmetric_and_bounded() {
        let matcher = EntityMatcher::default();
        let pairs = [
            ("Blue Bottle Coffee", "Blue Bottle Coffee 성수점"),
            ("스타벅스 강남점", "스타벅스"),
            ("커피한약방", "Paris Baguette"),
        ];

        for (a, b) in pairs {
            let ab = matcher.name_similarity(a, b);
            let ba = matcher.name_similarity(b, a);
            assert_eq!(ab, ba, "asymmetric for '{}'/'{}'", a, b);
            assert!((0.0..=1.0).contains(&ab));
        }
    }

    #[test]
    fn identical_names_score_one() {
        let matcher = EntityMatcher::default();
        assert_eq!(
            matcher.name_similarity("Blue Bottle Coffee", "blue bottle coffee"),
            1.0
        );
        assert_eq!(matcher.name_similarity("스타벅스 강남점", "스타벅스 강남"), 1.0);
    }

    #[test]
    fn empty_normalized_name_scores_zero() {
        let matcher = EntityMatcher::default();
        assert_eq!(matcher.name_similarity("", "Blue Bottle Coffee"), 0.0);
        assert_eq!(matcher.name_similarity("!!!", "Blue Bottle Coffee"), 0.0);
        assert_eq!(matcher.name_similarity("!!!", "???"), 0.0);
    }

    #[test]
    fn closer_candidate_wins_despite_lower_similarity() {
        let matcher = EntityMatcher::default();
        let m = master("cafemocha", 37.5, 127.0);

        // sim 0.9 at ~40 m: 0.9*0.7 + 0.2*0.3 = 0.69
        let far_similar = candidate("cafemochas", north_of(37.5, 40.0), 127.0);
        // sim ~0.69 at ~5 m: 0.69*0.7 + 0.9*0.3 = 0.75
        let near_rough = candidate("cafemochaplus", north_of(37.5, 5.0), 127.0);

        let candidates = [far_similar, near_rough];
        let (best, decision) = matcher.find_best_match(&m, &candidates).unwrap();
        assert_eq!(best.name, "cafemochaplus");
        assert!(decision.distance_m < 10.0);
    }

    #[test]
    fn best_match_skips_non_matching_candidates() {
        let matcher = EntityMatcher::default();
        let m = master("Blue Bottle Coffee", 37.544, 127.055);

        let candidates = vec![
            candidate("Paris Baguette", 37.544, 127.055),
            candidate("Blue Bottle Coffee", north_of(37.544, 600.0), 127.055),
        ];

        assert!(matcher.find_best_match(&m, &candidates).is_none());
    }

    #[test]
    fn best_match_is_deterministic_and_stable_on_ties() {
        let matcher = EntityMatcher::default();
        let m = master("cafemocha", 37.5, 127.0);

        // Two equally scored candidates: the first one encountered must win
        let mut first = candidate("cafemocha", north_of(37.5, 10.0), 127.0);
        first.platform_id = "first".to_string();
        let mut second = candidate("cafemocha", north_of(37.5, 10.0), 127.0);
        second.platform_id = "second".to_string();
        let candidates = vec![first, second];

        for _ in 0..3 {
            let (best, _) = matcher.find_best_match(&m, &candidates).unwrap();
            assert_eq!(best.platform_id, "first");
        }
    }

    #[test]
    fn returned_candidate_always_passes_is_match() {
        let matcher = EntityMatcher::default();
        let m = master("cafemocha", 37.5, 127.0);

        let candidates = vec![
            candidate("cafemochas", north_of(37.5, 45.0), 127.0),
            candidate("mochacafe", north_of(37.5, 20.0), 127.0),
            candidate("bakery", 37.5, 127.0),
        ];

        if let Some((best, decision)) = matcher.find_best_match(&m, &candidates) {
            assert!(decision.matched);
            assert!(matcher.is_match(&m, best).matched);
        }
    }

    #[test]
    fn custom_criteria_are_honored() {
        let strict = EntityMatcher::new(MatchCriteria {
            max_distance_m: 10.0,
            min_name_similarity: 0.95,
        });
        let m = master("Blue Bottle Coffee", 37.544, 127.055);
        let c = candidate("Blue Bottle Coffee 1st Branch", 37.5441, 127.0551);

        // Matches under defaults, fails under a strict similarity floor
        assert!(EntityMatcher::default().is_match(&m, &c).matched);
        assert!(!strict.is_match(&m, &c).matched);
    }
}
