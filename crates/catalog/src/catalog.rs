//! Validated catalog snapshot.

use std::collections::{BTreeMap, HashSet};

use common::Money;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::category::{ProductCategory, ToppingCategory};
use crate::error::{CatalogError, Result};
use crate::menu;
use crate::model::{Product, ProductId, Size, SizeId, Topping, ToppingId};
use crate::source::{CatalogSource, ProductRecord, SizeRecord, ToppingRecord};

/// A validated snapshot of the menu.
///
/// Every price and multiplier is non-negative, ids are unique per entity
/// and categories are canonical. Pricing code relies on these guarantees
/// and does not re-check signs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    products: Vec<Product>,
    sizes: Vec<Size>,
    toppings: Vec<Topping>,
}

impl Catalog {
    /// Loads and validates the catalog from a source.
    #[tracing::instrument(skip(source))]
    pub async fn load<S: CatalogSource + ?Sized>(source: &S) -> Result<Self> {
        let products = source.list_products().await?;
        let sizes = source.list_sizes().await?;
        let toppings = source.list_toppings().await?;

        let catalog = Self::from_records(products, sizes, toppings)?;
        tracing::info!(
            products = catalog.products.len(),
            sizes = catalog.sizes.len(),
            toppings = catalog.toppings.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Builds a catalog from raw records, translating categories and prices.
    pub fn from_records(
        products: Vec<ProductRecord>,
        sizes: Vec<SizeRecord>,
        toppings: Vec<ToppingRecord>,
    ) -> Result<Self> {
        let products = products
            .into_iter()
            .map(product_from_record)
            .collect::<Result<Vec<_>>>()?;
        let sizes = sizes
            .into_iter()
            .map(size_from_record)
            .collect::<Result<Vec<_>>>()?;
        let toppings = toppings
            .into_iter()
            .map(topping_from_record)
            .collect::<Result<Vec<_>>>()?;

        Self::new(products, sizes, toppings)
    }

    /// Builds a catalog from typed values, validating them.
    pub fn new(products: Vec<Product>, sizes: Vec<Size>, toppings: Vec<Topping>) -> Result<Self> {
        ensure_unique("product", products.iter().map(|p| p.id.as_str()))?;
        ensure_unique("size", sizes.iter().map(|s| s.id.as_str()))?;
        ensure_unique("topping", toppings.iter().map(|t| t.id.as_str()))?;

        for product in &products {
            ensure_named("product", product.id.as_str(), &product.name)?;
            if product.base_price.is_negative() {
                return Err(CatalogError::NegativePrice {
                    entity: "product",
                    id: product.id.to_string(),
                });
            }
        }

        for size in &sizes {
            ensure_named("size", size.id.as_str(), &size.name)?;
            if size.price_multiplier.is_sign_negative() && !size.price_multiplier.is_zero() {
                return Err(CatalogError::NegativeMultiplier {
                    id: size.id.to_string(),
                });
            }
        }

        for topping in &toppings {
            ensure_named("topping", topping.id.as_str(), &topping.name)?;
            if topping.price.is_negative() {
                return Err(CatalogError::NegativePrice {
                    entity: "topping",
                    id: topping.id.to_string(),
                });
            }
        }

        Ok(Self {
            products,
            sizes,
            toppings,
        })
    }

    /// Returns the shop's default menu.
    pub fn default_menu() -> Self {
        Self {
            products: menu::products(),
            sizes: menu::sizes(),
            toppings: menu::toppings(),
        }
    }

    /// Returns all products in menu order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Returns all sizes in menu order.
    pub fn sizes(&self) -> &[Size] {
        &self.sizes
    }

    /// Returns all toppings in menu order.
    pub fn toppings(&self) -> &[Topping] {
        &self.toppings
    }

    /// Looks up a product by ID.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Looks up a size by ID.
    pub fn size(&self, id: &SizeId) -> Option<&Size> {
        self.sizes.iter().find(|s| &s.id == id)
    }

    /// Looks up a topping by ID.
    pub fn topping(&self, id: &ToppingId) -> Option<&Topping> {
        self.toppings.iter().find(|t| &t.id == id)
    }

    /// Resolves topping IDs in the given order.
    ///
    /// Fails on the first unknown ID with the offending ID.
    pub fn resolve_toppings<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a ToppingId>,
    ) -> std::result::Result<Vec<Topping>, ToppingId> {
        ids.into_iter()
            .map(|id| self.topping(id).cloned().ok_or_else(|| id.clone()))
            .collect()
    }

    /// Returns the products of one category.
    pub fn products_in(&self, category: ProductCategory) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// Groups toppings by category, keeping menu order within each group.
    pub fn toppings_by_category(&self) -> BTreeMap<ToppingCategory, Vec<&Topping>> {
        let mut groups: BTreeMap<ToppingCategory, Vec<&Topping>> = BTreeMap::new();
        for topping in &self.toppings {
            groups.entry(topping.category).or_default().push(topping);
        }
        groups
    }
}

fn ensure_unique<'a>(entity: &'static str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                entity,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn ensure_named(entity: &'static str, id: &str, name: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(CatalogError::MissingField {
            entity,
            field: "id",
            id: id.to_string(),
        });
    }
    if name.trim().is_empty() {
        return Err(CatalogError::MissingField {
            entity,
            field: "name",
            id: id.to_string(),
        });
    }
    Ok(())
}

fn money_from(entity: &'static str, id: &str, amount: Decimal) -> Result<Money> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(CatalogError::NegativePrice {
            entity,
            id: id.to_string(),
        });
    }
    Money::try_from_decimal(amount).ok_or_else(|| CatalogError::AmountOutOfRange {
        entity,
        id: id.to_string(),
    })
}

fn product_from_record(record: ProductRecord) -> Result<Product> {
    let category: ProductCategory = record.category.parse()?;
    let base_price = money_from("product", &record.id, record.base_price)?;

    Ok(Product {
        id: ProductId::new(record.id),
        name: record.name,
        description: record.description,
        image: record.image.filter(|url| !url.trim().is_empty()),
        base_price,
        category,
    })
}

fn size_from_record(record: SizeRecord) -> Result<Size> {
    Ok(Size {
        id: SizeId::new(record.id),
        name: record.name,
        volume: record.volume,
        price_multiplier: record.price_multiplier,
    })
}

fn topping_from_record(record: ToppingRecord) -> Result<Topping> {
    let category: ToppingCategory = record.category.parse()?;
    let price = money_from(
        "topping",
        &record.id,
        record.price.unwrap_or(Decimal::ZERO),
    )?;

    Ok(Topping {
        id: ToppingId::new(record.id),
        name: record.name,
        price,
        category,
        image: record.image.filter(|url| !url.trim().is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_record(id: &str, price: Decimal, category: &str) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: String::new(),
            image: None,
            base_price: price,
            category: category.to_string(),
        }
    }

    fn size_record(id: &str, multiplier: Decimal) -> SizeRecord {
        SizeRecord {
            id: id.to_string(),
            name: format!("Size {id}"),
            volume: "300ml".to_string(),
            price_multiplier: multiplier,
        }
    }

    fn topping_record(id: &str, price: Option<Decimal>, category: &str) -> ToppingRecord {
        ToppingRecord {
            id: id.to_string(),
            name: format!("Topping {id}"),
            price,
            category: category.to_string(),
            image: Some(String::new()),
        }
    }

    #[test]
    fn test_from_records_translates_categories_and_prices() {
        let catalog = Catalog::from_records(
            vec![product_record("p1", Decimal::new(1200, 2), "sorvete")],
            vec![size_record("s1", Decimal::new(15, 1))],
            vec![topping_record("t1", None, "frutas")],
        )
        .unwrap();

        let product = catalog.product(&ProductId::new("p1")).unwrap();
        assert_eq!(product.category, ProductCategory::IceCream);
        assert_eq!(product.base_price, Money::from_reais(12));

        let topping = catalog.topping(&ToppingId::new("t1")).unwrap();
        assert_eq!(topping.category, ToppingCategory::Fruits);
        assert_eq!(topping.price, Money::zero());
        assert_eq!(topping.image, None);
    }

    #[test]
    fn test_negative_prices_are_rejected() {
        let err = Catalog::from_records(
            vec![product_record("p1", Decimal::new(-100, 2), "acai")],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::NegativePrice { entity: "product", .. }
        ));

        let err = Catalog::from_records(
            vec![],
            vec![],
            vec![topping_record("t1", Some(Decimal::new(-1, 0)), "caldas")],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::NegativePrice { entity: "topping", .. }
        ));
    }

    #[test]
    fn test_negative_multiplier_is_rejected() {
        let err =
            Catalog::from_records(vec![], vec![size_record("s1", Decimal::new(-5, 1))], vec![])
                .unwrap_err();
        assert!(matches!(err, CatalogError::NegativeMultiplier { .. }));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let err = Catalog::from_records(
            vec![
                product_record("p1", Decimal::ONE, "acai"),
                product_record("p1", Decimal::TWO, "acai"),
            ],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DuplicateId { entity: "product", .. }
        ));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = Catalog::from_records(
            vec![product_record("p1", Decimal::ONE, "bebida")],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCategory { .. }));
    }

    #[test]
    fn test_default_menu_lookups() {
        let catalog = Catalog::default_menu();
        assert_eq!(catalog.products_in(ProductCategory::Acai).count(), 3);
        assert_eq!(catalog.products_in(ProductCategory::IceCream).count(), 3);

        let medium = catalog.size(&SizeId::new("medium")).unwrap();
        assert_eq!(medium.price_multiplier, Decimal::new(15, 1));

        let groups = catalog.toppings_by_category();
        assert_eq!(groups[&ToppingCategory::Fruits].len(), 3);
        assert!(!groups.contains_key(&ToppingCategory::Complements));
    }

    #[test]
    fn test_resolve_toppings_keeps_order_and_reports_unknown() {
        let catalog = Catalog::default_menu();
        let ids = [ToppingId::new("t3"), ToppingId::new("t1")];
        let toppings = catalog.resolve_toppings(&ids).unwrap();
        assert_eq!(toppings[0].name, "Granola");
        assert_eq!(toppings[1].name, "Morango");

        let missing = [ToppingId::new("t1"), ToppingId::new("nope")];
        assert_eq!(
            catalog.resolve_toppings(&missing).unwrap_err(),
            ToppingId::new("nope")
        );
    }
}
