//! Product repository.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use doughda_core::{NewProduct, Product, ProductId, ProductPatch};
use tracing::instrument;

use crate::assets::AssetStore;
use crate::error::RepositoryError;
use crate::keys;
use crate::kv::KeyValueStore;
use crate::typed::Collection;

/// Product CRUD over the `products` array.
#[derive(Clone)]
pub struct ProductRepository {
    products: Collection<Product>,
    assets: Arc<dyn AssetStore>,
}

impl ProductRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, assets: Arc<dyn AssetStore>) -> Self {
        Self {
            products: Collection::new(store, keys::PRODUCTS),
            assets,
        }
    }

    /// All products in stored order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the document cannot be read.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        self.products.load().await
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get(&self, id: &ProductId) -> Result<Product, RepositoryError> {
        self.products
            .load()
            .await?
            .into_iter()
            .find(|p| &p.id == id)
            .ok_or(RepositoryError::NotFound)
    }

    /// Create a product with a fresh timestamp id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` for a blank name or missing price.
    pub async fn create(&self, input: NewProduct) -> Result<Product, RepositoryError> {
        self.create_at(input, Utc::now()).await
    }

    /// Create a product, deriving its id from `now`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` for a blank name or missing price.
    #[instrument(skip(self, input))]
    pub async fn create_at(
        &self,
        input: NewProduct,
        now: DateTime<Utc>,
    ) -> Result<Product, RepositoryError> {
        let mut products = self.products.load().await?;
        let id = ProductId::generate(now.timestamp_millis(), products.iter().map(|p| &p.id));
        let product = input.into_product(id)?;

        products.push(product.clone());
        self.products.save(&products).await?;

        tracing::info!(product_id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Merge submitted fields into a product.
    ///
    /// When the image changes, the previous image is deleted after the save,
    /// best effort like [`Self::delete`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id, or
    /// `RepositoryError::Validation` if the patch is invalid.
    #[instrument(skip(self, patch), fields(product_id = %id))]
    pub async fn update(
        &self,
        id: &ProductId,
        patch: ProductPatch,
    ) -> Result<Product, RepositoryError> {
        let mut products = self.products.load().await?;
        let product = products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        let previous_image = product.image.clone();
        product.apply(patch)?;
        let updated = product.clone();
        self.products.save(&products).await?;
        tracing::info!(product_id = %updated.id, "Product updated");

        if let Some(old) = previous_image
            && updated.image.as_ref() != Some(&old)
        {
            self.discard_image(&old).await;
        }

        Ok(updated)
    }

    /// Flip the sold-out flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id.
    pub async fn toggle_sold_out(&self, id: &ProductId) -> Result<Product, RepositoryError> {
        let current = self.get(id).await?;
        self.update(
            id,
            ProductPatch {
                is_sold_out: Some(!current.is_sold_out),
                ..ProductPatch::default()
            },
        )
        .await
    }

    /// Remove a product and then try to delete its image.
    ///
    /// Image deletion is best effort: failures are logged and the removed
    /// product is still returned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: &ProductId) -> Result<Product, RepositoryError> {
        let mut products = self.products.load().await?;
        let index = products
            .iter()
            .position(|p| &p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        let removed = products.remove(index);
        self.products.save(&products).await?;
        tracing::info!(product_id = %removed.id, "Product deleted");

        if let Some(image) = &removed.image {
            self.discard_image(image).await;
        }

        Ok(removed)
    }

    async fn discard_image(&self, image: &str) {
        match self.assets.delete(image).await {
            Ok(true) => tracing::debug!(image = %image, "Product image deleted"),
            Ok(false) => {}
            Err(e) => tracing::warn!(error = %e, image = %image, "Failed to delete product image"),
        }
    }
}
