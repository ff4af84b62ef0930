// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::pagination::{default_limit, default_page};

// --- 1. Produtos (catálogo) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "product_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductKind {
    Asset,
    Consumable,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub kind: ProductKind,
    pub default_cost: Decimal,
    pub reorder_level: i32,
    pub category: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O SKU é obrigatório."))]
    pub sku: String,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub kind: ProductKind,
    #[serde(default)]
    pub default_cost: Decimal,
    #[serde(default)]
    #[validate(range(min = 0, message = "O nível de reposição não pode ser negativo."))]
    pub reorder_level: i32,
    pub category: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    pub kind: Option<ProductKind>,
    pub q: Option<String>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "A página começa em 1."))]
    pub page: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "O limite deve estar entre 1 e 100."))]
    pub limit: i64,
}

impl Default for ListProductsQuery {
    fn default() -> Self {
        Self {
            kind: None,
            q: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

// --- 2. Saldos de consumíveis ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ConsumableStock {
    pub id: Uuid,
    pub product_id: Uuid,
    pub location: Option<String>,
    pub quantity: i32,
    pub unit_cost: Decimal,
    pub updated_at: DateTime<Utc>,
}

// Linha de listagem já com os dados do produto (join), como a tela de
// consumíveis consome.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsumableStockRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub product_sku: String,
    pub reorder_level: i32,
    pub location: Option<String>,
    pub quantity: i32,
    pub unit_cost: Decimal,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewConsumableStock {
    pub product_id: Uuid,
    pub location: Option<String>,
    pub quantity: i32,
    pub unit_cost: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockPayload {
    pub product_id: Uuid,
    pub location: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, message = "A quantidade não pode ser negativa."))]
    pub quantity: i32,
    #[serde(default)]
    pub unit_cost: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListStockQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "A página começa em 1."))]
    pub page: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "O limite deve estar entre 1 e 100."))]
    pub limit: i64,
}

impl Default for ListStockQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

// --- 3. Movimentações (livro-razão, append-only) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "stock_movement_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockMovementKind {
    Receive,
    Issue,
    Adjust,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub kind: StockMovementKind,
    pub quantity: i32, // delta com sinal
    pub previous_quantity: i32,
    pub new_quantity: i32,
    pub note: Option<String>,
    pub performed_by: Option<Uuid>,
    pub performed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewStockMovement {
    pub product_id: Uuid,
    pub kind: StockMovementKind,
    pub quantity: i32,
    pub previous_quantity: i32,
    pub new_quantity: i32,
    pub note: Option<String>,
    pub performed_by: Option<Uuid>,
}

// RECEIVE soma, ISSUE subtrai, ADJUST define a quantidade absoluta.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStockPayload {
    pub kind: StockMovementKind,
    #[validate(range(min = 0, message = "A quantidade não pode ser negativa."))]
    pub quantity: i32,
    pub note: Option<String>,
}
