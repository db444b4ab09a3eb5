/*
[INPUT]:  OpenWeatherMap current-weather JSON
[OUTPUT]: Coordinates, WeatherReport and the condition-to-tip mapping
[POS]:    Data types for the weather collaborator
[UPDATE]: When response fields or tip rules change
*/

use serde::{Deserialize, Serialize};

use crate::error::{Result, WeatherError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Broad condition class that selects the icon and tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherKind {
    Sunny,
    Rainy,
    Standard,
}

impl WeatherKind {
    pub fn from_condition(condition: &str) -> Self {
        let condition = condition.to_lowercase();
        if condition.contains("sun") {
            WeatherKind::Sunny
        } else if condition.contains("rain") {
            WeatherKind::Rainy
        } else {
            WeatherKind::Standard
        }
    }

    pub fn tip(self) -> &'static str {
        match self {
            WeatherKind::Sunny => "Remember your sunglasses today",
            WeatherKind::Rainy => "Remember your umbrella today",
            WeatherKind::Standard => "Clear skies today",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WeatherKind::Sunny => "Sunny weather",
            WeatherKind::Rainy => "Rainy weather",
            WeatherKind::Standard => "Partly cloudy weather",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            WeatherKind::Sunny => "☀",
            WeatherKind::Rainy => "☂",
            WeatherKind::Standard => "⛅",
        }
    }
}

/// What the readout shows. `temperature_c` is `None` when the lookup failed.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub temperature_c: Option<i32>,
    pub condition: String,
    pub location: Option<String>,
}

impl WeatherReport {
    pub fn unavailable() -> Self {
        Self {
            temperature_c: None,
            condition: "standard".to_string(),
            location: None,
        }
    }

    pub fn kind(&self) -> WeatherKind {
        WeatherKind::from_condition(&self.condition)
    }

    pub fn tip(&self) -> &'static str {
        self.kind().tip()
    }

    /// One-line readout, e.g. `12° ☂ Remember your umbrella today`.
    pub fn summary(&self) -> String {
        let temperature = self
            .temperature_c
            .map(|t| format!("{t}°"))
            .unwrap_or_else(|| "--°".to_string());
        format!("{temperature} {} {}", self.kind().icon(), self.tip())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentWeatherResponse {
    pub(crate) main: MainReading,
    #[serde(default)]
    pub(crate) weather: Vec<ConditionEntry>,
    #[serde(default)]
    pub(crate) name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainReading {
    pub(crate) temp: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionEntry {
    pub(crate) main: String,
}

impl CurrentWeatherResponse {
    pub(crate) fn into_report(self) -> Result<WeatherReport> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .map(|entry| entry.main)
            .ok_or_else(|| WeatherError::InvalidResponse("missing weather condition".to_string()))?;
        if !self.main.temp.is_finite() {
            return Err(WeatherError::InvalidResponse(format!(
                "non-finite temperature {}",
                self.main.temp
            )));
        }
        Ok(WeatherReport {
            temperature_c: Some(round_half_up(self.main.temp)),
            condition,
            location: self.name.filter(|name| !name.is_empty()),
        })
    }
}

/// Rounds .5 towards positive infinity.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Sunny", WeatherKind::Sunny)]
    #[case("Rain", WeatherKind::Rainy)]
    #[case("light RAIN showers", WeatherKind::Rainy)]
    #[case("Clouds", WeatherKind::Standard)]
    #[case("Clear", WeatherKind::Standard)]
    #[case("standard", WeatherKind::Standard)]
    #[case("", WeatherKind::Standard)]
    fn condition_maps_to_kind(#[case] condition: &str, #[case] expected: WeatherKind) {
        assert_eq!(WeatherKind::from_condition(condition), expected);
    }

    #[test]
    fn tips_match_kind() {
        assert_eq!(WeatherKind::Sunny.tip(), "Remember your sunglasses today");
        assert_eq!(WeatherKind::Rainy.tip(), "Remember your umbrella today");
        assert_eq!(WeatherKind::Standard.tip(), "Clear skies today");
    }

    #[test]
    fn unavailable_report_is_standard_without_temperature() {
        let report = WeatherReport::unavailable();
        assert_eq!(report.temperature_c, None);
        assert_eq!(report.kind(), WeatherKind::Standard);
        assert!(report.summary().starts_with("--°"));
    }

    #[rstest]
    #[case(12.4, 12)]
    #[case(12.5, 13)]
    #[case(-2.5, -2)]
    #[case(-2.6, -3)]
    fn temperature_rounds_half_up(#[case] raw: f64, #[case] expected: i32) {
        assert_eq!(round_half_up(raw), expected);
    }

    #[test]
    fn response_without_condition_is_invalid() {
        let response: CurrentWeatherResponse =
            serde_json::from_str(r#"{"main": {"temp": 3.2}, "weather": []}"#).unwrap();
        assert!(matches!(
            response.into_report(),
            Err(WeatherError::InvalidResponse(_))
        ));
    }

    #[test]
    fn coordinates_validate_ranges() {
        assert!(Coordinates::new(56.0465, 12.6945).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -181.0).is_valid());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
    }
}
