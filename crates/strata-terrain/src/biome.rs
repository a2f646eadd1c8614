//! Biome classification from elevation, temperature and humidity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default sea level, in blocks.
pub const SEA_LEVEL: i32 = 32;

/// Height above sea level still counted as beach.
const BEACH_BAND: f64 = 2.0;

/// The closed set of biomes the shifter paints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BiomeTag {
    Ocean,
    Beach,
    Desert,
    Plains,
    Snow,
    Mountains,
    Forest,
}

impl BiomeTag {
    /// Every tag, in declaration order.
    pub const ALL: [BiomeTag; 7] = [
        BiomeTag::Ocean,
        BiomeTag::Beach,
        BiomeTag::Desert,
        BiomeTag::Plains,
        BiomeTag::Snow,
        BiomeTag::Mountains,
        BiomeTag::Forest,
    ];

    /// Lowercase name, e.g. `"mountains"`.
    pub fn name(self) -> &'static str {
        match self {
            BiomeTag::Ocean => "ocean",
            BiomeTag::Beach => "beach",
            BiomeTag::Desert => "desert",
            BiomeTag::Plains => "plains",
            BiomeTag::Snow => "snow",
            BiomeTag::Mountains => "mountains",
            BiomeTag::Forest => "forest",
        }
    }
}

impl fmt::Display for BiomeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classifies columns against a fixed sea level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeClassifier {
    pub sea_level: f64,
}

impl BiomeClassifier {
    pub fn new(sea_level: i32) -> Self {
        Self {
            sea_level: f64::from(sea_level),
        }
    }

    /// Maps `(elevation, temperature, humidity)` to a biome. First match wins.
    ///
    /// Elevation bands take precedence over climate; the climate ranges overlap,
    /// so the order of the checks below is significant.
    pub fn classify(&self, elevation: f64, temperature: f64, humidity: f64) -> BiomeTag {
        let (t, h) = (temperature, humidity);
        if elevation <= self.sea_level {
            BiomeTag::Ocean
        } else if elevation <= self.sea_level + BEACH_BAND {
            BiomeTag::Beach
        } else if t >= 0.5 && h < 0.3 {
            BiomeTag::Desert
        } else if (0.3..=0.6).contains(&h) && t >= 0.5 {
            BiomeTag::Plains
        } else if t <= 0.3 && h > 0.5 {
            BiomeTag::Snow
        } else if (0.2..=0.6).contains(&h) && t < 0.5 {
            BiomeTag::Mountains
        } else {
            BiomeTag::Forest
        }
    }
}

impl Default for BiomeClassifier {
    fn default() -> Self {
        Self::new(SEA_LEVEL)
    }
}

/// [`BiomeClassifier::classify`] at the default [`SEA_LEVEL`].
pub fn classify(elevation: f64, temperature: f64, humidity: f64) -> BiomeTag {
    BiomeClassifier::default().classify(elevation, temperature, humidity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> impl Iterator<Item = (f64, f64)> {
        (0..=20).flat_map(|t| (0..=20).map(move |h| (t as f64 / 20.0, h as f64 / 20.0)))
    }

    #[test]
    fn test_at_or_below_sea_level_is_ocean() {
        for y in [-100.0, 0.0, 31.5, 32.0] {
            for (t, h) in grid() {
                assert_eq!(classify(y, t, h), BiomeTag::Ocean, "y={y} t={t} h={h}");
            }
        }
    }

    #[test]
    fn test_beach_band() {
        for y in [32.01, 33.0, 34.0] {
            for (t, h) in grid() {
                assert_eq!(classify(y, t, h), BiomeTag::Beach, "y={y} t={t} h={h}");
            }
        }
        assert_ne!(classify(34.01, 0.9, 0.9), BiomeTag::Beach);
    }

    #[test]
    fn test_climate_table() {
        assert_eq!(classify(100.0, 0.6, 0.1), BiomeTag::Desert);
        assert_eq!(classify(100.0, 0.6, 0.45), BiomeTag::Plains);
        assert_eq!(classify(100.0, 0.1, 0.6), BiomeTag::Snow);
        assert_eq!(classify(100.0, 0.1, 0.4), BiomeTag::Mountains);
        assert_eq!(classify(100.0, 0.9, 0.9), BiomeTag::Forest);
    }

    #[test]
    fn test_threshold_edges() {
        // Desert needs humidity strictly below 0.3; 0.3 falls through to plains.
        assert_eq!(classify(100.0, 0.5, 0.3), BiomeTag::Plains);
        assert_eq!(classify(100.0, 0.5, 0.6), BiomeTag::Plains);
        // Snow overrides mountains where both match.
        assert_eq!(classify(100.0, 0.3, 0.55), BiomeTag::Snow);
        assert_eq!(classify(100.0, 0.31, 0.55), BiomeTag::Mountains);
        assert_eq!(classify(100.0, 0.4, 0.1), BiomeTag::Forest);
    }

    #[test]
    fn test_classify_is_pure() {
        for (t, h) in grid() {
            assert_eq!(classify(80.0, t, h), classify(80.0, t, h));
        }
    }

    #[test]
    fn test_custom_sea_level() {
        let classifier = BiomeClassifier::new(64);
        assert_eq!(classifier.classify(50.0, 0.6, 0.1), BiomeTag::Ocean);
        assert_eq!(classifier.classify(66.0, 0.6, 0.1), BiomeTag::Beach);
        assert_eq!(classifier.classify(67.0, 0.6, 0.1), BiomeTag::Desert);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(BiomeTag::Mountains.to_string(), "mountains");
        assert_eq!(BiomeTag::ALL.len(), 7);
    }
}
