// src/services/catalog_service.rs

use std::sync::Arc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::pagination::Page,
    db::{ProductRepository, StockRepository},
    models::catalog::{
        AdjustStockPayload, ConsumableStock, ConsumableStockRow, CreateProductPayload,
        CreateStockPayload, ListProductsQuery, ListStockQuery, NewConsumableStock,
        NewStockMovement, Product, StockMovementKind,
    },
};

// Catálogo de produtos e saldos de consumíveis. Toda mutação de saldo é
// seguida de uma linha no livro-razão de movimentações, na mesma ordem
// saldo-depois-histórico dos eventos de ativo.
#[derive(Clone)]
pub struct CatalogService {
    products: Arc<dyn ProductRepository>,
    stocks: Arc<dyn StockRepository>,
}

impl CatalogService {
    pub fn new(products: Arc<dyn ProductRepository>, stocks: Arc<dyn StockRepository>) -> Self {
        Self { products, stocks }
    }

    // --- Produtos ---

    pub async fn create_product(&self, payload: CreateProductPayload) -> Result<Product, AppError> {
        self.products.insert(&payload).await
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product, AppError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn list_products(&self, query: ListProductsQuery) -> Result<Page<Product>, AppError> {
        let (items, total) = self
            .products
            .list(query.kind, query.q.as_deref(), query.page, query.limit)
            .await?;
        Ok(Page::new(items, query.page, query.limit, total))
    }

    // --- Consumíveis ---

    pub async fn create_stock(
        &self,
        actor_id: Uuid,
        payload: CreateStockPayload,
    ) -> Result<ConsumableStock, AppError> {
        if self.products.find_by_id(payload.product_id).await?.is_none() {
            return Err(AppError::ProductNotFound);
        }

        let new = NewConsumableStock {
            product_id: payload.product_id,
            location: payload.location,
            quantity: payload.quantity,
            unit_cost: payload.unit_cost,
        };
        let stock = self.stocks.insert(&new).await?;

        // Saldo inicial diferente de zero também entra no histórico.
        if stock.quantity != 0 {
            self.stocks
                .record_movement(&NewStockMovement {
                    product_id: stock.product_id,
                    kind: StockMovementKind::Adjust,
                    quantity: stock.quantity,
                    previous_quantity: 0,
                    new_quantity: stock.quantity,
                    note: Some("Saldo inicial".to_string()),
                    performed_by: Some(actor_id),
                })
                .await?;
        }

        Ok(stock)
    }

    pub async fn list_stock(
        &self,
        query: ListStockQuery,
    ) -> Result<Page<ConsumableStockRow>, AppError> {
        let (items, total) = self.stocks.list(query.page, query.limit).await?;
        Ok(Page::new(items, query.page, query.limit, total))
    }

    // RECEIVE soma, ISSUE subtrai (sem deixar o saldo negativo) e ADJUST
    // define a quantidade absoluta.
    pub async fn adjust_stock(
        &self,
        actor_id: Uuid,
        id: Uuid,
        payload: AdjustStockPayload,
    ) -> Result<ConsumableStock, AppError> {
        let stock = self
            .stocks
            .find_by_id(id)
            .await?
            .ok_or(AppError::StockNotFound)?;

        let previous = stock.quantity;
        let new_quantity = match payload.kind {
            StockMovementKind::Receive => previous + payload.quantity,
            StockMovementKind::Issue => {
                let remaining = previous - payload.quantity;
                if remaining < 0 {
                    return Err(AppError::InsufficientStock);
                }
                remaining
            }
            StockMovementKind::Adjust => payload.quantity,
        };

        let updated = self
            .stocks
            .set_quantity(id, new_quantity)
            .await?
            .ok_or(AppError::StockNotFound)?;

        self.stocks
            .record_movement(&NewStockMovement {
                product_id: stock.product_id,
                kind: payload.kind,
                quantity: new_quantity - previous,
                previous_quantity: previous,
                new_quantity,
                note: payload.note,
                performed_by: Some(actor_id),
            })
            .await?;

        Ok(updated)
    }
}
