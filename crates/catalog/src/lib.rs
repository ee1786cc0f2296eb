//! Catalog layer for the point-of-sale core.
//!
//! This crate provides the static reference data used to price orders:
//! - Product, Size and Topping value types
//! - Canonical category enums with ingestion-time translation of external spellings
//! - The `CatalogSource` trait and a validated `Catalog` snapshot
//! - The shop's default menu

pub mod catalog;
pub mod category;
pub mod error;
pub mod menu;
pub mod model;
pub mod source;

pub use catalog::Catalog;
pub use category::{ProductCategory, ToppingCategory};
pub use error::CatalogError;
pub use model::{Product, ProductId, Size, SizeId, Topping, ToppingId};
pub use source::{CatalogSource, InMemoryCatalogSource, ProductRecord, SizeRecord, ToppingRecord};
