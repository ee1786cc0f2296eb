//! The shop's default menu.

use common::Money;
use rust_decimal::Decimal;

use crate::category::{ProductCategory, ToppingCategory};
use crate::model::{Product, Size, Topping};

const IMAGE_BASE: &str = "https://images.unsplash.com";

fn image(path: &str) -> String {
    format!("{IMAGE_BASE}/{path}?w=500&auto=format&fit=crop&q=60")
}

/// Default products.
pub fn products() -> Vec<Product> {
    vec![
        Product::new("1", "Açaí Tradicional", Money::from_reais(12), ProductCategory::Acai)
            .with_description("Puro açaí batido na hora")
            .with_image(image("photo-1615485290382-441e4d049cb5")),
        Product::new("2", "Açaí com Banana", Money::from_reais(14), ProductCategory::Acai)
            .with_description("Açaí batido com banana")
            .with_image(image("photo-1490323935964-3522e2be9db0")),
        Product::new("3", "Açaí com Morango", Money::from_reais(15), ProductCategory::Acai)
            .with_description("Açaí batido com morango")
            .with_image(image("photo-1502825751399-28bde8401def")),
        Product::new(
            "4",
            "Sorvete de Chocolate",
            Money::from_reais(10),
            ProductCategory::IceCream,
        )
        .with_description("Sorvete cremoso de chocolate")
        .with_image(image("photo-1563805042-7684c019e1cb")),
        Product::new(
            "5",
            "Sorvete de Baunilha",
            Money::from_reais(10),
            ProductCategory::IceCream,
        )
        .with_description("Sorvete cremoso de baunilha")
        .with_image(image("photo-1563805042-7684c019e1cb")),
        Product::new(
            "6",
            "Sorvete de Morango",
            Money::from_reais(10),
            ProductCategory::IceCream,
        )
        .with_description("Sorvete cremoso de morango")
        .with_image(image("photo-1563805042-7684c019e1cb")),
    ]
}

/// Default cup sizes.
pub fn sizes() -> Vec<Size> {
    vec![
        Size::new("small", "Pequeno", "300ml", Decimal::ONE),
        Size::new("medium", "Médio", "500ml", Decimal::new(15, 1)),
        Size::new("large", "Grande", "700ml", Decimal::TWO),
    ]
}

/// Default toppings.
pub fn toppings() -> Vec<Topping> {
    vec![
        Topping::new("t1", "Morango", Money::from_cents(200), ToppingCategory::Fruits)
            .with_image(image("photo-1464965911861-746a04b4bca6")),
        Topping::new("t2", "Banana", Money::from_cents(150), ToppingCategory::Fruits)
            .with_image(image("photo-1528825871115-3581a5387919")),
        Topping::new("t3", "Granola", Money::from_cents(100), ToppingCategory::Other)
            .with_image(image("photo-1517093157656-b9eccef91cb1")),
        Topping::new(
            "t4",
            "Leite Condensado",
            Money::from_cents(150),
            ToppingCategory::Syrups,
        )
        .with_image(image("photo-1589375890993-7b68b92ebc81")),
        Topping::new(
            "t5",
            "Chocolate Granulado",
            Money::from_cents(100),
            ToppingCategory::Sweets,
        )
        .with_image(image("photo-1511381939415-e44015466834")),
        Topping::new("t6", "Kiwi", Money::from_cents(250), ToppingCategory::Fruits)
            .with_image(image("photo-1618897996318-5a901fa6ca71")),
        Topping::new("t7", "Mel", Money::from_cents(150), ToppingCategory::Syrups)
            .with_image(image("photo-1587049352851-8d4e89133924")),
        Topping::new("t8", "Confete", Money::from_cents(100), ToppingCategory::Sweets)
            .with_image(image("photo-1535359056830-d4badde79747")),
    ]
}
