//! Perfume catalog: domain types, repository seam, image storage, service and query adapters.

pub mod domain;
pub mod repository;
pub mod image_store;
pub mod service;
pub mod query;
