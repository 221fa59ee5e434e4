//! Rating scale conversion.
//!
//! Popularimeter frames store a rating from 0 to 255, while most players show a rating of
//! 0 to 5 stars. Star counts map onto the byte values that common players write. Any other
//! byte is not a star rating and reads as unrated.

/// A raw popularimeter rating, where 0 means unrated.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PopularimeterRating(pub u8);

/// A rating from 0 to 5 stars, where 0 means unrated.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FiveStarRating(u8);

const STAR_VALUES: [u8; 6] = [0, 1, 64, 128, 196, 255];

impl FiveStarRating {
    /// Create a rating, clamping `stars` to 5.
    pub fn new(stars: u8) -> Self {
        Self(stars.min(5))
    }

    pub fn stars(&self) -> u8 {
        self.0
    }
}

impl From<PopularimeterRating> for FiveStarRating {
    fn from(rating: PopularimeterRating) -> Self {
        let stars = STAR_VALUES
            .iter()
            .position(|&value| value == rating.0)
            .unwrap_or(0);

        Self(stars as u8)
    }
}

impl From<FiveStarRating> for PopularimeterRating {
    fn from(rating: FiveStarRating) -> Self {
        Self(STAR_VALUES[usize::from(rating.0)])
    }
}
