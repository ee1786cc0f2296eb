//! Canonical product and topping categories.
//!
//! External data has used several spellings for the same category over time
//! ("sorvete" and "iceCream", "frutas" and "fruits", ...). Everything is
//! translated into these enums at ingestion; the Portuguese labels are for
//! display only.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

fn normalize(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .collect()
}

/// Category of a product on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    /// Açaí bowls and cups.
    Acai,

    /// Ice cream.
    IceCream,

    /// Standalone extras sold as products.
    Complement,
}

impl ProductCategory {
    /// Returns the canonical tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Acai => "acai",
            ProductCategory::IceCream => "ice_cream",
            ProductCategory::Complement => "complement",
        }
    }

    /// Returns the display label used on receipts and screens.
    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::Acai => "Açaí",
            ProductCategory::IceCream => "Sorvete",
            ProductCategory::Complement => "Complemento",
        }
    }
}

impl FromStr for ProductCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "acai" | "açaí" | "açai" | "acaí" => Ok(ProductCategory::Acai),
            "icecream" | "sorvete" | "sorvetes" => Ok(ProductCategory::IceCream),
            "complement" | "complements" | "complemento" | "complementos" => {
                Ok(ProductCategory::Complement)
            }
            _ => Err(CatalogError::UnknownCategory {
                kind: "product",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display grouping for toppings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToppingCategory {
    Fruits,
    Syrups,
    Sweets,
    Complements,
    Other,
}

impl ToppingCategory {
    /// Returns the canonical tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToppingCategory::Fruits => "fruits",
            ToppingCategory::Syrups => "syrups",
            ToppingCategory::Sweets => "sweets",
            ToppingCategory::Complements => "complements",
            ToppingCategory::Other => "other",
        }
    }

    /// Returns the display label used on screens.
    pub fn label(&self) -> &'static str {
        match self {
            ToppingCategory::Fruits => "Frutas",
            ToppingCategory::Syrups => "Caldas",
            ToppingCategory::Sweets => "Doces",
            ToppingCategory::Complements => "Complementos",
            ToppingCategory::Other => "Outros",
        }
    }
}

impl FromStr for ToppingCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "fruits" | "fruit" | "frutas" | "fruta" => Ok(ToppingCategory::Fruits),
            "syrups" | "syrup" | "caldas" | "calda" => Ok(ToppingCategory::Syrups),
            "sweets" | "sweet" | "doces" | "doce" => Ok(ToppingCategory::Sweets),
            "complements" | "complement" | "complementos" | "complemento" => {
                Ok(ToppingCategory::Complements)
            }
            "other" | "others" | "outros" | "outro" => Ok(ToppingCategory::Other),
            _ => Err(CatalogError::UnknownCategory {
                kind: "topping",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ToppingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_category_aliases() {
        assert_eq!("acai".parse::<ProductCategory>().unwrap(), ProductCategory::Acai);
        assert_eq!("Açaí".parse::<ProductCategory>().unwrap(), ProductCategory::Acai);
        assert_eq!(
            "sorvete".parse::<ProductCategory>().unwrap(),
            ProductCategory::IceCream
        );
        assert_eq!(
            "iceCream".parse::<ProductCategory>().unwrap(),
            ProductCategory::IceCream
        );
        assert_eq!(
            "ice_cream".parse::<ProductCategory>().unwrap(),
            ProductCategory::IceCream
        );
        assert_eq!(
            " complemento ".parse::<ProductCategory>().unwrap(),
            ProductCategory::Complement
        );
    }

    #[test]
    fn test_topping_category_aliases() {
        assert_eq!(
            "frutas".parse::<ToppingCategory>().unwrap(),
            ToppingCategory::Fruits
        );
        assert_eq!(
            "fruits".parse::<ToppingCategory>().unwrap(),
            ToppingCategory::Fruits
        );
        assert_eq!(
            "caldas".parse::<ToppingCategory>().unwrap(),
            ToppingCategory::Syrups
        );
        assert_eq!(
            "sweets".parse::<ToppingCategory>().unwrap(),
            ToppingCategory::Sweets
        );
        assert_eq!(
            "Complementos".parse::<ToppingCategory>().unwrap(),
            ToppingCategory::Complements
        );
        assert_eq!("other".parse::<ToppingCategory>().unwrap(), ToppingCategory::Other);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = "bebida".parse::<ProductCategory>().unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownCategory { kind: "product", .. }
        ));
        assert!("".parse::<ToppingCategory>().is_err());
    }

    #[test]
    fn test_serialization_uses_canonical_tags() {
        assert_eq!(
            serde_json::to_string(&ProductCategory::IceCream).unwrap(),
            "\"ice_cream\""
        );
        assert_eq!(
            serde_json::to_string(&ToppingCategory::Fruits).unwrap(),
            "\"fruits\""
        );
        assert_eq!(ProductCategory::IceCream.to_string(), "ice_cream");
        assert_eq!(ProductCategory::IceCream.label(), "Sorvete");
    }
}
