//! Catalog value types.

use common::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::{ProductCategory, ToppingCategory};

/// Product identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Size identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeId(String);

impl SizeId {
    /// Creates a new size ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the size ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SizeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SizeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Topping identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToppingId(String);

impl ToppingId {
    /// Creates a new topping ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the topping ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ToppingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ToppingId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A product on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,

    /// Image URL, if any.
    pub image: Option<String>,

    /// Unit price before size and topping adjustments.
    pub base_price: Money,

    pub category: ProductCategory,
}

impl Product {
    /// Creates a product with no description or image.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        base_price: Money,
        category: ProductCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            image: None,
            base_price,
            category,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// A cup size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub id: SizeId,
    pub name: String,

    /// Display volume, e.g. "500ml".
    pub volume: String,

    /// Factor applied to a product's base price.
    pub price_multiplier: Decimal,
}

impl Size {
    /// Creates a new size.
    pub fn new(
        id: impl Into<SizeId>,
        name: impl Into<String>,
        volume: impl Into<String>,
        price_multiplier: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            volume: volume.into(),
            price_multiplier,
        }
    }
}

/// An add-on priced per unit of the line it is added to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topping {
    pub id: ToppingId,
    pub name: String,
    pub price: Money,
    pub category: ToppingCategory,
    pub image: Option<String>,
}

impl Topping {
    /// Creates a topping without an image.
    pub fn new(
        id: impl Into<ToppingId>,
        name: impl Into<String>,
        price: Money,
        category: ToppingCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category,
            image: None,
        }
    }

    /// Sets the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}
