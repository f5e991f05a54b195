use jiff::SignedDuration;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum OsrmError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {code} - {message}")]
    Api { code: String, message: String },

    #[error("Incomplete response")]
    IncompleteResponse,

    #[error("Trip takes {time}, more than the allowed {max_time}")]
    ExceedsMaxTime {
        time: SignedDuration,
        max_time: SignedDuration,
    },

    #[error("Missing environment variable {0}")]
    MissingUrl(&'static str),
}

#[derive(Deserialize)]
struct OsrmTripResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    trips: Vec<OsrmTripLeg>,
    #[serde(default)]
    waypoints: Vec<OsrmWaypoint>,
}

#[derive(Deserialize)]
struct OsrmTripLeg {
    /// Seconds
    duration: f64,

    /// Meters
    distance: f64,
}

#[derive(Deserialize)]
struct OsrmWaypoint {
    waypoint_index: usize,
    trips_index: usize,
}

/// A trip through every requested point.
#[derive(Debug, Clone, PartialEq)]
pub struct OsrmTrip {
    /// Indices of the input points in visiting order
    pub order: Vec<usize>,

    /// Travel time in seconds
    pub duration: f64,

    /// Distance in meters
    pub distance: f64,
}

pub struct OsrmTripClientParams {
    pub osrm_url: String,
    pub profile: String,
}

pub const OSRM_URL_ENV_VAR: &str = "HERMES_OSRM_URL";
pub const OSRM_PROFILE_ENV_VAR: &str = "HERMES_OSRM_PROFILE";
pub const OSRM_DEFAULT_PROFILE: &str = "driving";
pub const OSRM_TRIP_API_PATH: &str = "/trip/v1/";

impl OsrmTripClientParams {
    pub fn from_env() -> Result<Self, OsrmError> {
        let osrm_url =
            std::env::var(OSRM_URL_ENV_VAR).map_err(|_| OsrmError::MissingUrl(OSRM_URL_ENV_VAR))?;
        let profile = std::env::var(OSRM_PROFILE_ENV_VAR)
            .unwrap_or_else(|_| OSRM_DEFAULT_PROFILE.to_string());

        Ok(Self { osrm_url, profile })
    }
}

pub struct OsrmTripClient {
    params: OsrmTripClientParams,
}

impl OsrmTripClient {
    pub fn new(params: OsrmTripClientParams) -> Self {
        Self { params }
    }

    /// Solves a round trip starting at the first point.
    pub async fn fetch_trip<P>(
        &self,
        client: &reqwest::Client,
        points: &[P],
    ) -> Result<OsrmTrip, OsrmError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let mut url = self.params.osrm_url.trim_end_matches('/').to_string();
        url.push_str(OSRM_TRIP_API_PATH);
        url.push_str(&self.params.profile);
        url.push('/');

        for (i, point) in points.iter().enumerate() {
            let point: geo_types::Point = point.into();
            url.push_str(&format!("{},{}", point.x(), point.y()));

            if i < points.len() - 1 {
                url.push(';');
            }
        }

        debug!(points = points.len(), "OSRM: Requesting trip");

        let response = client
            .get(url)
            .query(&[
                ("source", "first"),
                ("roundtrip", "true"),
                ("overview", "false"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let trip_response: OsrmTripResponse = match serde_json::from_str(&body) {
            Ok(trip_response) => trip_response,
            Err(_) if !status.is_success() => {
                return Err(OsrmError::Api {
                    code: status.as_u16().to_string(),
                    message: body,
                });
            }
            Err(_) => return Err(OsrmError::IncompleteResponse),
        };

        if trip_response.code != "Ok" {
            return Err(OsrmError::Api {
                code: trip_response.code,
                message: trip_response.message.unwrap_or_default(),
            });
        }

        let trip = trip_response
            .trips
            .first()
            .ok_or(OsrmError::IncompleteResponse)?;

        if trip_response.waypoints.len() != points.len()
            || trip_response
                .waypoints
                .iter()
                .any(|waypoint| waypoint.trips_index != 0)
        {
            return Err(OsrmError::IncompleteResponse);
        }

        let mut order: Vec<usize> = (0..points.len()).collect();
        order.sort_by_key(|&input_index| trip_response.waypoints[input_index].waypoint_index);

        Ok(OsrmTrip {
            order,
            duration: trip.duration,
            distance: trip.distance,
        })
    }
}
