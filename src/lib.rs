//! fencewatch - Watch a vehicle fleet and alert on geofence violations

pub mod api;
pub mod config;
pub mod domain;
pub mod geometry;
pub mod monitor;
pub mod notify;
