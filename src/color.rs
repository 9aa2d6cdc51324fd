//! 24-bit RGB colour value carried by entities and particles

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Packed 0xRRGGBB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Rgb(pub u32);

impl From<u32> for Rgb {
    fn from(packed: u32) -> Self {
        Self::new(packed)
    }
}

impl From<Rgb> for u32 {
    fn from(color: Rgb) -> Self {
        color.0
    }
}

impl Rgb {
    pub const RED: Rgb = Rgb(0xFF0000);

    /// Build from a packed value, discarding anything above 24 bits
    pub const fn new(packed: u32) -> Self {
        Self(packed & 0x00FF_FFFF)
    }

    /// Parse `#RRGGBB` (or `RRGGBB`, or `0xRRGGBB`)
    pub fn parse_hex(s: &str) -> Option<Self> {
        let s = s.trim();
        let digits = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty()
            || digits.len() > 6
            || !digits.chars().all(|c| c.is_ascii_hexdigit())
        {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::new)
    }

    /// Uniformly random 24-bit colour
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(0..=0x00FF_FFFF))
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_parse_hex_variants() {
        assert_eq!(Rgb::parse_hex("#1E90FF"), Some(Rgb(0x1E90FF)));
        assert_eq!(Rgb::parse_hex("ff0000"), Some(Rgb::RED));
        assert_eq!(Rgb::parse_hex("0x00ff00"), Some(Rgb(0x00FF00)));
        // Short forms are read as plain hex numbers
        assert_eq!(Rgb::parse_hex("#fff"), Some(Rgb(0x000FFF)));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert_eq!(Rgb::parse_hex(""), None);
        assert_eq!(Rgb::parse_hex("#"), None);
        assert_eq!(Rgb::parse_hex("#GGGGGG"), None);
        assert_eq!(Rgb::parse_hex("#1234567"), None);
        assert_eq!(Rgb::parse_hex("#+12345"), None);
        assert_eq!(Rgb::parse_hex("-12345"), None);
    }

    #[test]
    fn test_display_and_mask() {
        assert_eq!(Rgb(0x123456).to_string(), "#123456");
        assert_eq!(Rgb::new(0xAB123456), Rgb(0x123456));
    }

    #[test]
    fn test_deserialize_masks_to_24_bits() {
        let c: Rgb = serde_json::from_str("4294967295").unwrap();
        assert_eq!(c, Rgb(0x00FF_FFFF));
        assert_eq!(c.to_string(), "#FFFFFF");
        assert_eq!(serde_json::to_string(&Rgb::RED).unwrap(), "16711680");
    }

    #[test]
    fn test_random_stays_24_bit() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            assert!(Rgb::random(&mut rng).0 <= 0x00FF_FFFF);
        }
    }
}
