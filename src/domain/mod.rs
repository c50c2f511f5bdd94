//! Domain types of the console: entity records, the resource catalog and the
//! list query state.

pub mod client;
pub mod content;
pub mod entity;
pub mod inquiry;
pub mod lenient;
pub mod query;
pub mod resource;
pub mod trip;
pub mod types;
