//! Integration tests for loading the catalog from a source.

use catalog::{
    Catalog, CatalogError, CatalogSource, InMemoryCatalogSource, ProductCategory, ProductId,
    ProductRecord, SizeId, ToppingCategory, ToppingRecord,
};
use common::Money;
use rust_decimal::Decimal;

#[tokio::test]
async fn default_menu_round_trips_through_records() {
    let source = InMemoryCatalogSource::default_menu();
    let loaded = Catalog::load(&source).await.unwrap();

    assert_eq!(loaded, Catalog::default_menu());
}

#[tokio::test]
async fn legacy_spellings_are_canonicalized_on_load() {
    let source = InMemoryCatalogSource::default_menu();
    source.set_products(vec![ProductRecord {
        id: "9".to_string(),
        name: "Sorvete de Flocos".to_string(),
        description: String::new(),
        image: None,
        base_price: Decimal::new(1050, 2),
        category: "iceCream".to_string(),
    }]);
    source.set_toppings(vec![ToppingRecord {
        id: "t9".to_string(),
        name: "Calda de Caramelo".to_string(),
        price: Some(Decimal::new(175, 2)),
        category: "caldas".to_string(),
        image: None,
    }]);

    let catalog = Catalog::load(&source).await.unwrap();

    let product = catalog.product(&ProductId::new("9")).unwrap();
    assert_eq!(product.category, ProductCategory::IceCream);
    assert_eq!(product.base_price, Money::from_cents(1050));
    assert_eq!(catalog.toppings()[0].category, ToppingCategory::Syrups);
    assert!(catalog.size(&SizeId::new("large")).is_some());
}

#[tokio::test]
async fn source_failure_is_reported() {
    let source = InMemoryCatalogSource::default_menu();
    source.set_fail_on_list(true);

    let result = Catalog::load(&source).await;
    assert!(matches!(result, Err(CatalogError::Source(_))));
}

#[tokio::test]
async fn works_through_trait_object() {
    let source: Box<dyn CatalogSource> = Box::new(InMemoryCatalogSource::default_menu());
    let catalog = Catalog::load(source.as_ref()).await.unwrap();
    assert_eq!(catalog.products().len(), 6);
}
