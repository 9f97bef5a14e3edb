use rand::Rng;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

/// What a book's rating becomes when the catalog service has none.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RatingFallback {
    /// A whole number drawn uniformly from 3, 4 and 5.
    #[default]
    Random,
    Fixed(f64),
}

impl RatingFallback {
    pub fn from_fixed(fixed: Option<f64>) -> Self {
        match fixed {
            Some(rating) => RatingFallback::Fixed(rating),
            None => RatingFallback::Random,
        }
    }

    pub fn rating(&self) -> f64 {
        match self {
            RatingFallback::Random => f64::from(rand::thread_rng().gen_range(3u8..=5)),
            RatingFallback::Fixed(rating) => *rating,
        }
    }

    /// Resolves a source rating, treating absent or non-positive values as missing.
    pub fn resolve(&self, source: Option<f64>) -> f64 {
        match source {
            Some(rating) if rating > 0.0 => rating.clamp(MIN_RATING, MAX_RATING),
            _ => self.rating(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_fallback_stays_in_range() {
        for _ in 0..200 {
            let rating = RatingFallback::Random.resolve(None);

            assert!((3.0..=5.0).contains(&rating), "{rating} out of range");
            assert_eq!(rating.fract(), 0.0);
        }
    }

    #[test]
    fn source_rating_wins_and_is_clamped() {
        let fallback = RatingFallback::Fixed(4.0);

        assert_eq!(fallback.resolve(Some(3.5)), 3.5);
        assert_eq!(fallback.resolve(Some(7.0)), 5.0);
    }

    #[test]
    fn non_positive_rating_counts_as_missing() {
        let fallback = RatingFallback::Fixed(4.0);

        assert_eq!(fallback.resolve(Some(0.0)), 4.0);
        assert_eq!(fallback.resolve(None), 4.0);
    }

    #[test]
    fn from_fixed() {
        assert_eq!(RatingFallback::from_fixed(None), RatingFallback::Random);
        assert_eq!(
            RatingFallback::from_fixed(Some(3.0)),
            RatingFallback::Fixed(3.0)
        );
    }
}
