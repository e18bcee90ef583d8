use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Canonical icon vocabulary consumed by the portal's display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Sunny,
    Moon,
    Cloudy,
    CloudyNight,
    Overcast,
    Rain,
    Drizzle,
    FreezingRain,
    Snow,
    Sleet,
    Hail,
    Storm,
    Fog,
}

impl Icon {
    pub fn key(self) -> &'static str {
        match self {
            Icon::Sunny => "sunny",
            Icon::Moon => "moon",
            Icon::Cloudy => "cloudy",
            Icon::CloudyNight => "cloudy-night",
            Icon::Overcast => "overcast",
            Icon::Rain => "rain",
            Icon::Drizzle => "drizzle",
            Icon::FreezingRain => "freezing-rain",
            Icon::Snow => "snow",
            Icon::Sleet => "sleet",
            Icon::Hail => "hail",
            Icon::Storm => "storm",
            Icon::Fog => "fog",
        }
    }
}

// WMO 4677 code groups as delivered by Open-Meteo.
const STORM_CODES: [u8; 3] = [95, 96, 99];
const HAIL_CODES: [u8; 2] = [96, 99];
const SNOW_CODES: [u8; 5] = [71, 73, 75, 85, 86];
const SNOW_GRAINS_CODE: u8 = 77;
const FREEZING_CODES: [u8; 4] = [56, 57, 66, 67];
const FOG_CODES: [u8; 2] = [45, 48];
const DRIZZLE_CODES: [u8; 3] = [51, 53, 55];
const RAIN_CODES: [u8; 6] = [61, 63, 65, 80, 81, 82];
const CLEAR_CODES: [u8; 2] = [0, 1];
const PARTLY_CLOUDY_CODE: u8 = 2;
const OVERCAST_CODE: u8 = 3;

/// Probability at or above which the rain override wins regardless of code.
const RAIN_OVERRIDE_PROB: u8 = 40;
/// Lower bound of the ambiguity band that demotes a clear code to cloudy.
const AMBIGUITY_PROB: u8 = 25;

fn is_rain_class(code: u8) -> bool {
    DRIZZLE_CODES.contains(&code) || RAIN_CODES.contains(&code)
}

/// Map a provider weather code to a canonical icon.
///
/// Rules apply in fixed precedence, first match wins: severe groups
/// (storm/snow/freezing/fog) outrank the probability overrides, which
/// outrank the base code mapping. Total over all inputs; unknown codes
/// fall through to cloudy.
pub fn classify(code: u8, is_day: bool, precip_prob: u8) -> Icon {
    if STORM_CODES.contains(&code) {
        if HAIL_CODES.contains(&code) {
            return Icon::Hail;
        }
        return Icon::Storm;
    }

    if SNOW_CODES.contains(&code) {
        return Icon::Snow;
    }
    if code == SNOW_GRAINS_CODE {
        return Icon::Sleet;
    }

    if FREEZING_CODES.contains(&code) {
        return Icon::FreezingRain;
    }

    if FOG_CODES.contains(&code) {
        return Icon::Fog;
    }

    // Perception correction: a clear code with a high rain chance must
    // not render as sunny.
    if precip_prob >= RAIN_OVERRIDE_PROB {
        return Icon::Rain;
    }

    // Ambiguity hedge: a clear sky the model itself half-doubts shows
    // as cloudy instead.
    if precip_prob >= AMBIGUITY_PROB && CLEAR_CODES.contains(&code) {
        return cloudy(is_day);
    }

    // Low-confidence suppression: rain-coded hours with a low
    // probability downgrade to cloudy.
    if precip_prob < AMBIGUITY_PROB && is_rain_class(code) {
        return cloudy(is_day);
    }

    if CLEAR_CODES.contains(&code) {
        return if is_day { Icon::Sunny } else { Icon::Moon };
    }
    if code == PARTLY_CLOUDY_CODE {
        return cloudy(is_day);
    }
    if code == OVERCAST_CODE {
        return Icon::Overcast;
    }
    if DRIZZLE_CODES.contains(&code) {
        return Icon::Drizzle;
    }
    if RAIN_CODES.contains(&code) {
        return Icon::Rain;
    }

    Icon::Cloudy
}

fn cloudy(is_day: bool) -> Icon {
    if is_day {
        Icon::Cloudy
    } else {
        Icon::CloudyNight
    }
}

/// Human-readable condition text for a canonical icon.
pub fn condition_text(icon: Icon) -> &'static str {
    match icon {
        Icon::Sunny => "Sunny",
        Icon::Moon => "Clear night",
        Icon::Cloudy | Icon::CloudyNight => "Partly cloudy",
        Icon::Overcast => "Overcast",
        Icon::Rain => "Rain",
        Icon::Drizzle => "Drizzle",
        Icon::FreezingRain => "Freezing rain",
        Icon::Snow => "Snow",
        Icon::Sleet => "Sleet",
        Icon::Hail => "Hail",
        Icon::Storm => "Thunderstorm",
        Icon::Fog => "Fog",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_day_low_prob_is_sunny() {
        assert_eq!(classify(0, true, 10), Icon::Sunny);
        assert_eq!(classify(1, true, 0), Icon::Sunny);
    }

    #[test]
    fn test_clear_night_is_moon() {
        assert_eq!(classify(0, false, 10), Icon::Moon);
    }

    #[test]
    fn test_ambiguity_band_demotes_clear_to_cloudy() {
        assert_eq!(classify(0, true, 30), Icon::Cloudy);
        assert_eq!(classify(0, false, 25), Icon::CloudyNight);
        assert_eq!(classify(1, true, 39), Icon::Cloudy);
    }

    #[test]
    fn test_low_confidence_rain_suppressed_to_cloudy() {
        assert_eq!(classify(61, true, 15), Icon::Cloudy);
        assert_eq!(classify(80, false, 0), Icon::CloudyNight);
        assert_eq!(classify(51, true, 24), Icon::Cloudy);
    }

    #[test]
    fn test_high_probability_forces_rain() {
        assert_eq!(classify(0, true, 60), Icon::Rain);
        assert_eq!(classify(2, false, 40), Icon::Rain);
        assert_eq!(classify(61, true, 90), Icon::Rain);
    }

    #[test]
    fn test_storm_wins_over_probability() {
        assert_eq!(classify(95, true, 0), Icon::Storm);
        assert_eq!(classify(95, false, 100), Icon::Storm);
        assert_eq!(classify(96, true, 50), Icon::Hail);
        assert_eq!(classify(99, false, 0), Icon::Hail);
    }

    #[test]
    fn test_snow_family() {
        assert_eq!(classify(71, true, 80), Icon::Snow);
        assert_eq!(classify(86, false, 10), Icon::Snow);
        assert_eq!(classify(77, true, 50), Icon::Sleet);
    }

    #[test]
    fn test_freezing_and_fog() {
        assert_eq!(classify(56, true, 10), Icon::FreezingRain);
        assert_eq!(classify(67, false, 90), Icon::FreezingRain);
        assert_eq!(classify(45, true, 70), Icon::Fog);
        assert_eq!(classify(48, false, 0), Icon::Fog);
    }

    #[test]
    fn test_base_mapping() {
        assert_eq!(classify(2, true, 10), Icon::Cloudy);
        assert_eq!(classify(2, false, 10), Icon::CloudyNight);
        assert_eq!(classify(3, true, 10), Icon::Overcast);
        assert_eq!(classify(53, true, 30), Icon::Drizzle);
        assert_eq!(classify(63, true, 30), Icon::Rain);
    }

    #[test]
    fn test_unknown_code_falls_back_to_cloudy() {
        assert_eq!(classify(42, true, 10), Icon::Cloudy);
        assert_eq!(classify(250, false, 10), Icon::Cloudy);
    }

    #[test]
    fn test_total_over_full_input_range() {
        // Must never panic, and identical inputs give identical outputs.
        for code in 0..=u8::MAX {
            for prob in 0..=100u8 {
                let a = classify(code, true, prob);
                let b = classify(code, true, prob);
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_high_probability_never_sunny_or_moon() {
        for code in 0..=u8::MAX {
            for prob in 40..=100u8 {
                for is_day in [true, false] {
                    let icon = classify(code, is_day, prob);
                    assert!(
                        icon != Icon::Sunny && icon != Icon::Moon,
                        "code {code} prob {prob} yielded {icon:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_icon_keys_are_kebab_case() {
        assert_eq!(Icon::FreezingRain.key(), "freezing-rain");
        assert_eq!(Icon::CloudyNight.key(), "cloudy-night");
        assert_eq!(
            serde_json::to_string(&Icon::FreezingRain).unwrap(),
            "\"freezing-rain\""
        );
    }
}
