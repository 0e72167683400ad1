//! Bakery products.

use serde::{Deserialize, Serialize};

use crate::define_id;
use crate::error::{ValidationError, require_non_blank};
use crate::types::price::Price;

define_id!(ProductId);

/// A product shown on the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Price,
    /// Image URL or `/uploads/...` path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub is_sold_out: bool,
}

/// Input for creating a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_sold_out: bool,
}

impl NewProduct {
    /// Validate the input and build a product with the given id.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the name is blank or the price is missing.
    pub fn into_product(self, id: ProductId) -> Result<Product, ValidationError> {
        require_non_blank("name", &self.name)?;
        let price = self.price.ok_or(ValidationError::Required("price"))?;

        Ok(Product {
            id,
            name: self.name.trim().to_string(),
            description: non_empty(self.description),
            price,
            image: non_empty(self.image),
            is_sold_out: self.is_sold_out,
        })
    }
}

/// Partial update for a product. Absent fields keep their current value.
///
/// `id` is accepted so legacy clients can send it in the body; it never
/// changes the stored id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default)]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_sold_out: Option<bool>,
}

impl Product {
    /// Merge submitted fields into this product.
    ///
    /// Validation runs before any field is touched, so a rejected patch leaves
    /// the product unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Required` if the patch submits a blank name.
    pub fn apply(&mut self, patch: ProductPatch) -> Result<(), ValidationError> {
        if let Some(name) = &patch.name {
            require_non_blank("name", name)?;
        }

        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = non_empty(Some(description));
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(image) = patch.image {
            self.image = non_empty(Some(image));
        }
        if let Some(is_sold_out) = patch.is_sold_out {
            self.is_sold_out = is_sold_out;
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: ProductId::new("1700000000000"),
            name: "Country Sourdough".to_string(),
            description: Some("Naturally leavened".to_string()),
            price: Price::won(6500),
            image: Some("/uploads/1700000000000-sourdough.jpg".to_string()),
            is_sold_out: false,
        }
    }

    #[test]
    fn test_into_product_requires_name_and_price() {
        let input = NewProduct {
            price: Some(Price::won(1000)),
            ..NewProduct::default()
        };
        assert_eq!(
            input.into_product(ProductId::new("1")),
            Err(ValidationError::Required("name"))
        );

        let input = NewProduct {
            name: "Bagel".to_string(),
            ..NewProduct::default()
        };
        assert_eq!(
            input.into_product(ProductId::new("1")),
            Err(ValidationError::Required("price"))
        );
    }

    #[test]
    fn test_into_product_drops_blank_optionals() {
        let input = NewProduct {
            name: " Bagel ".to_string(),
            description: Some("  ".to_string()),
            price: Some(Price::won(2500)),
            image: Some(String::new()),
            is_sold_out: true,
        };
        let product = input.into_product(ProductId::new("7")).unwrap();
        assert_eq!(product.name, "Bagel");
        assert_eq!(product.description, None);
        assert_eq!(product.image, None);
        assert!(product.is_sold_out);
    }

    #[test]
    fn test_apply_changes_only_submitted_fields() {
        let mut product = sample();
        let before = product.clone();

        product
            .apply(ProductPatch {
                is_sold_out: Some(true),
                ..ProductPatch::default()
            })
            .unwrap();

        assert!(product.is_sold_out);
        assert_eq!(product.name, before.name);
        assert_eq!(product.description, before.description);
        assert_eq!(product.price, before.price);
        assert_eq!(product.image, before.image);
    }

    #[test]
    fn test_apply_never_changes_id() {
        let mut product = sample();
        product
            .apply(ProductPatch {
                id: Some(ProductId::new("other")),
                price: Some(Price::won(7000)),
                ..ProductPatch::default()
            })
            .unwrap();
        assert_eq!(product.id.as_str(), "1700000000000");
        assert_eq!(product.price, Price::won(7000));
    }

    #[test]
    fn test_apply_rejects_blank_name_without_side_effects() {
        let mut product = sample();
        let before = product.clone();
        let result = product.apply(ProductPatch {
            name: Some(" ".to_string()),
            price: Some(Price::won(1)),
            ..ProductPatch::default()
        });
        assert_eq!(result, Err(ValidationError::Required("name")));
        assert_eq!(product, before);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["isSoldOut"], serde_json::json!(false));
        assert_eq!(json["price"], serde_json::json!(6500));

        let product: Product =
            serde_json::from_str(r#"{"id":"1","name":"Scone","price":3000}"#).unwrap();
        assert!(!product.is_sold_out);
        assert_eq!(product.description, None);
    }
}
