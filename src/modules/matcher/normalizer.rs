use regex::Regex;

/// Branch designators stripped from store names before comparison.
/// "지점" must be removed before "점" so the longer token does not leave
/// a stray leading syllable behind.
const BRANCH_TOKENS: [&str; 2] = ["지점", "점"];

/// Normalizes establishment names so that cosmetic differences between
/// the registry spelling and a platform listing do not defeat matching.
///
/// Pipeline: drop everything but word characters and whitespace, drop
/// all whitespace, drop branch designators, lowercase.
pub struct PlaceNameNormalizer {
    strip_pattern: Regex,
}

impl PlaceNameNormalizer {
    pub fn new() -> Self {
        Self {
            // \w is Unicode-aware here, so Hangul survives the strip
            strip_pattern: Regex::new(r"[^\w\s]").expect("static pattern"),
        }
    }

    pub fn normalize(&self, name: &str) -> String {
        let stripped = self.strip_pattern.replace_all(name, "");

        let mut collapsed: String = stripped.split_whitespace().collect();

        for token in BRANCH_TOKENS {
            collapsed = collapsed.replace(token, "");
        }

        collapsed.to_lowercase()
    }
}

impl Default for PlaceNameNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_whitespace() {
        let n = PlaceNameNormalizer::new();
        assert_eq!(n.normalize("Blue Bottle Coffee"), "bluebottlecoffee");
        assert_eq!(n.normalize("카페! 온리-원"), "카페온리원");
    }

    #[test]
    fn removes_branch_designators() {
        let n = PlaceNameNormalizer::new();
        assert_eq!(n.normalize("스타벅스 강남점"), "스타벅스강남");
        assert_eq!(n.normalize("스타벅스 강남지점"), "스타벅스강남");
    }

    #[test]
    fn lowercases_latin_text() {
        let n = PlaceNameNormalizer::new();
        assert_eq!(n.normalize("CAFE Onion"), "cafeonion");
    }

    #[test]
    fn normalization_is_idempotent() {
        let n = PlaceNameNormalizer::new();
        for name in ["Blue Bottle Coffee 성수점", "커피한약방", "A Twosome Place"] {
            let once = n.normalize(name);
            assert_eq!(n.normalize(&once), once);
        }
    }

    #[test]
    fn symbols_only_name_normalizes_to_empty() {
        let n = PlaceNameNormalizer::new();
        assert_eq!(n.normalize("!!! ???"), "");
        assert_eq!(n.normalize("   "), "");
    }
}
