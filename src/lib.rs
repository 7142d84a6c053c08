//! Creational patterns: Factory Method and Builder
//!
//! Run the demonstrations with:
//!   cargo run --bin complete_44_factory_method
//!   cargo run --bin complete_46_builder

pub mod builder;
pub mod factory;
pub mod settings;
