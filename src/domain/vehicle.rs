use std::fmt;

use serde::Deserialize;

use crate::geometry::{Point, Polygon};

/// Opaque vehicle identifier assigned by the fleet system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub u32);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VehicleId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// One fetched observation: where a vehicle is and where it may be.
///
/// The geofence is already validated, so every status in circulation can
/// be evaluated directly.
#[derive(Debug, Clone)]
pub struct VehicleStatus {
    pub location: Point,
    pub geofence: Polygon,
}

impl VehicleStatus {
    pub fn new(location: Point, geofence: Polygon) -> Self {
        Self { location, geofence }
    }

    /// True when the vehicle sits inside or on its geofence boundary
    pub fn is_in_bounds(&self) -> bool {
        self.geofence.contains(self.location)
    }
}
