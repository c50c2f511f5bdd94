//! List-management core of the travel booking admin console.
//!
//! Every list screen (tours, treks, blogs, quotes, ...) is driven by a
//! [`controller::ListController`] that keeps a query, a result cache and the
//! backend in step.

pub mod confirm;
pub mod context;
pub mod controller;
pub mod domain;
pub mod dto;
mod error_conversions;
pub mod forms;
pub mod models;
pub mod notifications;
pub mod pagination;
pub mod repository;
pub mod services;
