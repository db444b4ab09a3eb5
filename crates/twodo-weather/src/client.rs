/*
[INPUT]:  Client configuration (base URL, API key, timeouts) and coordinates
[OUTPUT]: WeatherReport for the readout, never an error at the report() level
[POS]:    HTTP layer - OpenWeatherMap current-weather lookup
[UPDATE]: When adding connection options or changing the endpoint
*/

use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{Result, WeatherError};
use crate::types::{Coordinates, CurrentWeatherResponse, WeatherReport};

pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub units: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: OPENWEATHER_BASE_URL.to_string(),
            api_key: None,
            units: "metric".to_string(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    http_client: Client,
    base_url: Url,
    api_key: Option<String>,
    units: String,
}

impl WeatherClient {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_config(ClientConfig {
            api_key,
            ..ClientConfig::default()
        })
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(&config.base_url)?,
            api_key: config.api_key.filter(|key| !key.trim().is_empty()),
            units: config.units,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn current_weather_url(&self, coords: Coordinates, api_key: &str) -> Result<Url> {
        let mut url = self.base_url.join(CURRENT_WEATHER_PATH)?;
        url.query_pairs_mut()
            .append_pair("lat", &coords.latitude.to_string())
            .append_pair("lon", &coords.longitude.to_string())
            .append_pair("appid", api_key)
            .append_pair("units", &self.units);
        Ok(url)
    }

    /// Current weather at `coords`.
    ///
    /// GET /data/2.5/weather?lat={lat}&lon={lon}&appid={key}&units={units}
    pub async fn current(&self, coords: Coordinates) -> Result<WeatherReport> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;
        let url = self.current_weather_url(coords, api_key)?;
        debug!(
            latitude = coords.latitude,
            longitude = coords.longitude,
            "fetching current weather"
        );

        // reqwest errors echo the request URL, which carries the API key
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|err| WeatherError::Http(err.without_url()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| WeatherError::Http(err.without_url()))?;
        if !status.is_success() {
            return Err(WeatherError::api_error(status, body));
        }

        let parsed: CurrentWeatherResponse = serde_json::from_str(&body)?;
        parsed.into_report()
    }

    /// Like [`current`](Self::current) but degrades to
    /// [`WeatherReport::unavailable`] on any failure.
    pub async fn report(&self, coords: Coordinates) -> WeatherReport {
        match self.current(coords).await {
            Ok(report) => report,
            Err(WeatherError::MissingApiKey) => {
                debug!("weather API key not configured");
                WeatherReport::unavailable()
            }
            Err(err) => {
                warn!(error = %err, transient = err.is_transient(), "weather lookup failed");
                WeatherReport::unavailable()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::FALLBACK_LOCATION;

    #[test]
    fn test_url_contains_query() {
        let client = WeatherClient::new(Some("secret".to_string())).unwrap();
        let url = client
            .current_weather_url(FALLBACK_LOCATION, "secret")
            .unwrap();
        assert_eq!(url.path(), "/data/2.5/weather");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("lat".to_string(), "56.0465".to_string())));
        assert!(pairs.contains(&("lon".to_string(), "12.6945".to_string())));
        assert!(pairs.contains(&("appid".to_string(), "secret".to_string())));
        assert!(pairs.contains(&("units".to_string(), "metric".to_string())));
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let client = WeatherClient::new(Some("  ".to_string())).unwrap();
        assert!(client.api_key.is_none());
    }

    #[test]
    fn test_invalid_base_url() {
        let result = WeatherClient::with_config(ClientConfig {
            base_url: "not a url".to_string(),
            ..ClientConfig::default()
        });
        assert!(matches!(result, Err(WeatherError::UrlParse(_))));
    }

    #[tokio::test]
    async fn test_missing_key_reports_unavailable() {
        let client = WeatherClient::new(None).unwrap();
        assert!(matches!(
            client.current(FALLBACK_LOCATION).await,
            Err(WeatherError::MissingApiKey)
        ));
        assert_eq!(
            client.report(FALLBACK_LOCATION).await,
            WeatherReport::unavailable()
        );
    }
}
