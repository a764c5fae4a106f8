use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Header → (condition, crop name)
// ---------------------------------------------------------------------------

/// Longest alternative first so `Stressed_` is not read as `Stress` + `ed_`.
static CONDITION_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(stressed|stress|healthy)[_-]*").expect("valid condition prefix regex")
});

static REPLICATE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)_s\d+$").expect("valid replicate suffix regex"));

/// Crop condition encoded in a column header prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Condition {
    Healthy,
    Stressed,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Healthy => write!(f, "Healthy"),
            Condition::Stressed => write!(f, "Stressed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLabel {
    /// `None` when the header carries no recognised condition prefix.
    pub condition: Option<Condition>,
    pub crop: String,
}

/// Split a raw header such as `Healthy_Maize_S1` into its condition and a
/// display crop name (`Maize`).
///
/// The replicate suffix `_S<n>` is dropped so replicates of the same crop
/// compare equal. Headers without a prefix still get a crop name.
pub fn normalize_label(raw: &str) -> NormalizedLabel {
    let (condition, rest) = match CONDITION_PREFIX.captures(raw) {
        Some(caps) => {
            let condition = match caps[1].to_lowercase().as_str() {
                "healthy" => Condition::Healthy,
                _ => Condition::Stressed,
            };
            (Some(condition), &raw[caps[0].len()..])
        }
        None => (None, raw),
    };

    let rest = match REPLICATE_SUFFIX.find(rest) {
        Some(m) => &rest[..m.start()],
        None => rest,
    };

    NormalizedLabel {
        condition,
        crop: title_case(&rest.replace('_', " ")),
    }
}

/// Upper-case the first letter of every whitespace-separated word and
/// lower-case the rest, keeping the whitespace as is.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            at_word_start = false;
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(condition: Option<Condition>, crop: &str) -> NormalizedLabel {
        NormalizedLabel {
            condition,
            crop: crop.to_string(),
        }
    }

    #[test]
    fn replicates_share_crop_name() {
        assert_eq!(
            normalize_label("Healthy_Maize_S1"),
            label(Some(Condition::Healthy), "Maize")
        );
        assert_eq!(
            normalize_label("Stressed_Maize_S2"),
            label(Some(Condition::Stressed), "Maize")
        );
    }

    #[test]
    fn short_stress_prefix() {
        assert_eq!(
            normalize_label("Stress_Wheat"),
            label(Some(Condition::Stressed), "Wheat")
        );
    }

    #[test]
    fn prefix_is_case_insensitive_with_separators() {
        assert_eq!(
            normalize_label("HEALTHY-_sweet_potato_s12"),
            label(Some(Condition::Healthy), "Sweet Potato")
        );
        assert_eq!(
            normalize_label("stressedSorghum"),
            label(Some(Condition::Stressed), "Sorghum")
        );
    }

    #[test]
    fn no_prefix_still_normalizes() {
        assert_eq!(normalize_label("SoilType"), label(None, "Soiltype"));
        assert_eq!(normalize_label("soil_moisture_S3"), label(None, "Soil Moisture"));
    }

    #[test]
    fn suffix_only_stripped_at_end() {
        // `_S` without digits, or not at the end, is part of the name.
        assert_eq!(
            normalize_label("Healthy_Maize_S1_Field"),
            label(Some(Condition::Healthy), "Maize S1 Field")
        );
        assert_eq!(
            normalize_label("Healthy_Maize_Sx"),
            label(Some(Condition::Healthy), "Maize Sx")
        );
    }

    #[test]
    fn empty_remainder_is_empty_crop() {
        assert_eq!(normalize_label("Healthy_"), label(Some(Condition::Healthy), ""));
        assert_eq!(normalize_label("Healthy_-"), label(Some(Condition::Healthy), ""));
        // The prefix separators absorb the underscore, so `S4` is the name.
        assert_eq!(normalize_label("Stressed_S4"), label(Some(Condition::Stressed), "S4"));
        assert_eq!(normalize_label(""), label(None, ""));
    }

    #[test]
    fn title_case_keeps_spacing() {
        assert_eq!(title_case("dry  BEAN"), "Dry  Bean");
    }
}
