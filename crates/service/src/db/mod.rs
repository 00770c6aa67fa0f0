//! SeaORM query functions, one module per entity.

pub mod perfume_service;
