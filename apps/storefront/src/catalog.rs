//! # Product Catalog
//!
//! The static, externally supplied product collection.
//!
//! The catalog is read-only for the whole session: the cart references
//! products as they exist here at add-time and freezes their data into
//! cart lines. There is no persistence and no catalog mutation.

use soko_core::types::Product;
use tracing::debug;

/// Seed products for the storefront.
///
/// Format: (slug id, display name, price in whole UGX). Images are
/// derived from the slug; the terminal renderer ignores them but they
/// stay on each product for frontends that render cards.
const SEED_PRODUCTS: &[(&str, &str, i64)] = &[
    ("matooke-bunch", "Matooke (Bunch)", 15_000),
    ("super-rice-1kg", "Super Rice 1kg", 5_000),
    ("kinyara-sugar-1kg", "Kinyara Sugar 1kg", 5_500),
    ("cooking-oil-1l", "Cooking Oil 1L", 9_000),
    ("maize-flour-2kg", "Maize Flour 2kg", 6_000),
    ("fresh-milk-500ml", "Fresh Milk 500ml", 2_000),
    ("bread-loaf", "Bread Loaf", 4_500),
    ("eggs-tray", "Eggs (Tray of 30)", 12_000),
    ("beans-1kg", "Beans 1kg", 4_000),
    ("groundnuts-500g", "Groundnuts 500g", 5_000),
    ("tea-leaves-250g", "Tea Leaves 250g", 3_500),
    ("bar-soap", "Bar Soap", 2_500),
    ("tomatoes-1kg", "Tomatoes 1kg", 3_000),
    ("onions-1kg", "Onions 1kg", 3_500),
    ("irish-potatoes-2kg", "Irish Potatoes 2kg", 7_000),
];

/// The static product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds the seeded catalog.
    pub fn seeded() -> Self {
        let products = SEED_PRODUCTS
            .iter()
            .map(|(id, name, price_ugx)| Product {
                id: (*id).to_string(),
                name: (*name).to_string(),
                price_ugx: *price_ugx,
                image: format!("images/{}.jpg", id),
            })
            .collect::<Vec<_>>();

        debug!(count = products.len(), "Catalog seeded");
        Catalog { products }
    }

    /// Builds a catalog from explicit products (tests, alternate seeds).
    pub fn from_products(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// All products, in display order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by its slug id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soko_core::validation::{validate_price_ugx, validate_product_name};

    #[test]
    fn test_seeded_catalog_lookup() {
        let catalog = Catalog::seeded();
        assert!(!catalog.products().is_empty());

        let rice = catalog.get("super-rice-1kg").expect("rice in catalog");
        assert_eq!(rice.name, "Super Rice 1kg");
        assert_eq!(rice.price_ugx, 5_000);
        assert_eq!(rice.image, "images/super-rice-1kg.jpg");

        assert!(catalog.get("no-such-product").is_none());
    }

    #[test]
    fn test_seed_data_is_valid() {
        let catalog = Catalog::seeded();
        for product in catalog.products() {
            validate_product_name(&product.name).expect("valid name");
            validate_price_ugx(product.price_ugx).expect("non-negative price");
        }
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let catalog = Catalog::seeded();
        let mut ids: Vec<_> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.products().len());
    }
}
