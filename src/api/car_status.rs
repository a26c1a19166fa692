use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{VehicleId, VehicleStatus};
use crate::geometry::{InvalidPolygon, Point, Polygon};

const USER_AGENT: &str = concat!("fencewatch/", env!("CARGO_PKG_VERSION"));

/// Why a vehicle's status could not be obtained this cycle
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed status response: {0}")]
    Malformed(&'static str),
    #[error("unusable geofence: {0}")]
    InvalidFence(#[from] InvalidPolygon),
}

/// Supplies the current (location, geofence) observation for a vehicle.
///
/// Calls are best-effort: any failure surfaces as a `FetchError` and the
/// orchestrator skips the vehicle for that cycle.
pub trait StatusSource {
    fn vehicle_status(&self, id: VehicleId) -> Result<VehicleStatus, FetchError>;
}

impl<T: StatusSource + ?Sized> StatusSource for &T {
    fn vehicle_status(&self, id: VehicleId) -> Result<VehicleStatus, FetchError> {
        (**self).vehicle_status(id)
    }
}

/// Raw carStatus response: a GeoJSON-style feature collection
#[derive(Debug, Deserialize)]
pub struct CarStatusResponse {
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
}

/// Geometry payload, tagged by its GeoJSON type
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

/// Blocking client for the fleet status API
pub struct CarStatusClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl CarStatusClient {
    /// # Arguments
    /// * `base_url` - API root, e.g. `https://fleet.example.com`
    /// * `timeout` - per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn status_url(&self, id: VehicleId) -> String {
        format!("{}/carStatus/{}", self.base_url, id)
    }
}

impl StatusSource for CarStatusClient {
    fn vehicle_status(&self, id: VehicleId) -> Result<VehicleStatus, FetchError> {
        let response: CarStatusResponse = self
            .client
            .get(self.status_url(id))
            .send()?
            .error_for_status()?
            .json()?;
        parse_status(response)
    }
}

/// Convert a raw feature collection into a validated observation.
///
/// The first feature must be the vehicle location (a Point geometry), the
/// second the geofence (a Polygon geometry) whose first ring is the
/// boundary. A GeoJSON closing vertex (last == first) is stripped before
/// the boundary is validated.
pub fn parse_status(response: CarStatusResponse) -> Result<VehicleStatus, FetchError> {
    let mut features = response.features.into_iter();

    let location = match features.next().map(|f| f.geometry) {
        Some(Geometry::Point { coordinates }) => Point::from(coordinates),
        Some(Geometry::Polygon { .. }) => {
            return Err(FetchError::Malformed("first feature is not a point location"));
        }
        None => return Err(FetchError::Malformed("missing location feature")),
    };
    if !location.is_finite() {
        return Err(FetchError::Malformed("location has a non-finite coordinate"));
    }

    let ring = match features.next().map(|f| f.geometry) {
        Some(Geometry::Polygon { coordinates }) => coordinates
            .into_iter()
            .next()
            .ok_or(FetchError::Malformed("geofence polygon has no rings"))?,
        Some(Geometry::Point { .. }) => {
            return Err(FetchError::Malformed("second feature is not a polygon geofence"));
        }
        None => return Err(FetchError::Malformed("missing geofence feature")),
    };

    let mut vertices: Vec<Point> = ring.into_iter().map(Point::from).collect();
    // GeoJSON rings repeat the first vertex at the end
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    let geofence = Polygon::new(vertices)?;

    Ok(VehicleStatus::new(location, geofence))
}
