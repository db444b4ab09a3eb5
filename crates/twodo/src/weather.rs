use tracing::{info, warn};
use twodo_weather::{WeatherClient, WeatherReport};

use crate::config::WeatherConfig;

/// Look up the readout for the configured (or fallback) location.
/// Never fails; problems are logged and yield an unavailable report.
pub async fn fetch_report(config: &WeatherConfig) -> WeatherReport {
    let client = match WeatherClient::with_config(config.client_config()) {
        Ok(client) => client,
        Err(err) => {
            warn!(error = %err, "weather client setup failed");
            return WeatherReport::unavailable();
        }
    };
    let coords = config.location().resolve();
    let report = client.report(coords).await;
    info!(
        temperature = ?report.temperature_c,
        condition = %report.condition,
        "weather readout ready"
    );
    report
}
