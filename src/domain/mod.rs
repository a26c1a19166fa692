pub mod vehicle;

pub use vehicle::{VehicleId, VehicleStatus};
