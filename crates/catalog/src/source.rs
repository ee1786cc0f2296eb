//! Catalog source trait, raw records and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::menu;
use crate::model::{Product, Size, Topping};

/// A product row as provided by an external source.
///
/// Categories are free-form strings here and prices are decimal reais;
/// both are validated and translated by `Catalog::from_records`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub base_price: Decimal,
    pub category: String,
}

/// A size row as provided by an external source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeRecord {
    pub id: String,
    pub name: String,
    pub volume: String,
    pub price_multiplier: Decimal,
}

/// A topping row as provided by an external source.
///
/// A missing price is treated as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToppingRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            base_price: product.base_price.to_decimal(),
            category: product.category.as_str().to_string(),
        }
    }
}

impl From<&Size> for SizeRecord {
    fn from(size: &Size) -> Self {
        Self {
            id: size.id.to_string(),
            name: size.name.clone(),
            volume: size.volume.clone(),
            price_multiplier: size.price_multiplier,
        }
    }
}

impl From<&Topping> for ToppingRecord {
    fn from(topping: &Topping) -> Self {
        Self {
            id: topping.id.to_string(),
            name: topping.name.clone(),
            price: Some(topping.price.to_decimal()),
            category: topping.category.as_str().to_string(),
            image: topping.image.clone(),
        }
    }
}

/// Read-only provider of catalog data.
///
/// Assumed static for the duration of an order-building session.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Lists all products.
    async fn list_products(&self) -> Result<Vec<ProductRecord>>;

    /// Lists all sizes.
    async fn list_sizes(&self) -> Result<Vec<SizeRecord>>;

    /// Lists all toppings.
    async fn list_toppings(&self) -> Result<Vec<ToppingRecord>>;
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    products: Vec<ProductRecord>,
    sizes: Vec<SizeRecord>,
    toppings: Vec<ToppingRecord>,
    fail_on_list: bool,
}

/// In-memory catalog source for tests and the default binary.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogSource {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalogSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source serving the shop's default menu.
    pub fn default_menu() -> Self {
        let source = Self::new();
        source.set_products(menu::products().iter().map(ProductRecord::from).collect());
        source.set_sizes(menu::sizes().iter().map(SizeRecord::from).collect());
        source.set_toppings(menu::toppings().iter().map(ToppingRecord::from).collect());
        source
    }

    /// Replaces the product rows.
    pub fn set_products(&self, products: Vec<ProductRecord>) {
        self.write().products = products;
    }

    /// Replaces the size rows.
    pub fn set_sizes(&self, sizes: Vec<SizeRecord>) {
        self.write().sizes = sizes;
    }

    /// Replaces the topping rows.
    pub fn set_toppings(&self, toppings: Vec<ToppingRecord>) {
        self.write().toppings = toppings;
    }

    /// Configures the source to fail on every list call.
    pub fn set_fail_on_list(&self, fail: bool) {
        self.write().fail_on_list = fail;
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, InMemoryCatalogState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, InMemoryCatalogState>> {
        let state = self
            .state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if state.fail_on_list {
            return Err(CatalogError::Source("catalog unavailable".to_string()));
        }
        Ok(state)
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalogSource {
    async fn list_products(&self) -> Result<Vec<ProductRecord>> {
        Ok(self.read()?.products.clone())
    }

    async fn list_sizes(&self) -> Result<Vec<SizeRecord>> {
        Ok(self.read()?.sizes.clone())
    }

    async fn list_toppings(&self) -> Result<Vec<ToppingRecord>> {
        Ok(self.read()?.toppings.clone())
    }
}
