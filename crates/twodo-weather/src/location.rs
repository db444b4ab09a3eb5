use tracing::{debug, warn};

use crate::types::Coordinates;

/// Helsingborg, used whenever no usable location is available.
pub const FALLBACK_LOCATION: Coordinates = Coordinates {
    latitude: 56.0465,
    longitude: 12.6945,
};

/// Resolves where to look up the weather.
#[derive(Debug, Clone, Default)]
pub struct LocationSource {
    configured: Option<Coordinates>,
}

impl LocationSource {
    /// Both halves must be present for the configured location to count.
    pub fn new(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        let configured = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            (None, None) => None,
            _ => {
                warn!("weather location needs both latitude and longitude; ignoring partial value");
                None
            }
        };
        Self { configured }
    }

    pub fn resolve(&self) -> Coordinates {
        match self.configured {
            Some(coords) if coords.is_valid() => coords,
            Some(coords) => {
                warn!(
                    latitude = coords.latitude,
                    longitude = coords.longitude,
                    "configured location out of range; using fallback"
                );
                FALLBACK_LOCATION
            }
            None => {
                debug!("no location configured; using fallback");
                FALLBACK_LOCATION
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_uses_fallback() {
        assert_eq!(LocationSource::default().resolve(), FALLBACK_LOCATION);
    }

    #[test]
    fn configured_location_wins() {
        let source = LocationSource::new(Some(59.33), Some(18.07));
        assert_eq!(source.resolve(), Coordinates::new(59.33, 18.07));
    }

    #[test]
    fn partial_or_invalid_location_falls_back() {
        assert_eq!(LocationSource::new(Some(59.33), None).resolve(), FALLBACK_LOCATION);
        assert_eq!(
            LocationSource::new(Some(123.0), Some(18.0)).resolve(),
            FALLBACK_LOCATION
        );
    }
}
