/// Catalog browsing: products, categories, filtered search, favorites.
// region:    --- Imports
use crate::api::{routes, ApiClient};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

// endregion: --- Imports

// region:    --- Model

/// How a listing is sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleType {
    Auction,
    QuickSale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A seller's listing as shown on browse and detail pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub sale_type: SaleType,
    pub condition: String,
    pub category: Category,
    pub seller_id: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Search filters; unset fields are not sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_type: Option<SaleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

// endregion: --- Model

// region:    --- Gateway

/// Catalog resource calls.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>>;
    async fn get_product(&self, product_id: i64) -> Result<Product>;
    async fn search_products(&self, filter: &ProductFilter) -> Result<Vec<Product>>;
    async fn favorite_product(&self, product_id: i64) -> Result<()>;
    async fn unfavorite_product(&self, product_id: i64) -> Result<()>;
}

#[async_trait]
impl CatalogGateway for ApiClient {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.get(routes::CATEGORIES).await
    }

    async fn get_product(&self, product_id: i64) -> Result<Product> {
        info!("{:<12} --> product detail id: {}", "Catalog", product_id);
        self.get(&routes::product(product_id)).await
    }

    async fn search_products(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        info!("{:<12} --> product search: {:?}", "Catalog", filter);
        self.post(routes::PRODUCT_SEARCH, filter).await
    }

    async fn favorite_product(&self, product_id: i64) -> Result<()> {
        self.post_action(&routes::product_favorite(product_id)).await
    }

    async fn unfavorite_product(&self, product_id: i64) -> Result<()> {
        self.delete(&routes::product_favorite(product_id)).await
    }
}

// endregion: --- Gateway

// region:    --- Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_filter_fields_are_not_sent() {
        let filter = ProductFilter {
            keyword: Some("art deco".to_string()),
            max_price: Some(2_000.0),
            ..ProductFilter::default()
        };
        let body = serde_json::to_value(&filter).unwrap();
        assert_eq!(body.get("keyword").and_then(|v| v.as_str()), Some("art deco"));
        assert!(body.get("category_id").is_none());
        assert!(body.get("sale_type").is_none());
    }
}

// endregion: --- Tests
