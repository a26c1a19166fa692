pub mod car_status;

pub use car_status::{CarStatusClient, CarStatusResponse, FetchError, StatusSource, parse_status};
