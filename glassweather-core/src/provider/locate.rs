//! Best-effort city lookup from the caller's public IP address.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

pub const DEFAULT_LOCATE_URL: &str = "https://ipapi.co/json/";

/// City used whenever the lookup fails or returns no city.
pub const FALLBACK_CITY: &str = "Chennai";

#[derive(Debug, Deserialize)]
struct IpLocation {
    #[serde(default)]
    city: Option<String>,
}

/// [`locate_city`] against the public ipapi.co endpoint.
pub async fn locate() -> String {
    locate_city(&Client::new(), DEFAULT_LOCATE_URL).await
}

/// Resolve the caller's city via an IP geolocation endpoint.
///
/// Never fails: any transport, status or parse problem yields
/// [`FALLBACK_CITY`].
pub async fn locate_city(http: &Client, url: &str) -> String {
    match lookup(http, url).await {
        Ok(Some(city)) => {
            debug!(%city, "located city from IP");
            city
        }
        Ok(None) => {
            warn!("IP lookup returned no city, using fallback");
            FALLBACK_CITY.to_string()
        }
        Err(err) => {
            warn!(error = %err, "IP lookup failed, using fallback");
            FALLBACK_CITY.to_string()
        }
    }
}

async fn lookup(http: &Client, url: &str) -> reqwest::Result<Option<String>> {
    let location: IpLocation = http
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(location.city.filter(|c| !c.trim().is_empty()))
}
