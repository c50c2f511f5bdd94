//! DTOs bridging the controller with the backend's wire format.

pub mod api;
pub mod payload;
