//! Dublês em memória dos repositórios, para exercitar os serviços sem
//! um Postgres de verdade. A lógica de filtro/paginação reproduz a das
//! queries reais (ILIKE = substring sem diferenciar maiúsculas, ordem
//! por criação decrescente, limites inclusivos de data).
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::types::Json;
use uuid::Uuid;

use patrimonio_backend::common::error::AppError;
use patrimonio_backend::common::pagination::offset;
use patrimonio_backend::db::{
    AssetEventRepository, AssetRepository, ProductRepository, StockRepository, UserRepository,
};
use patrimonio_backend::models::catalog::CreateProductPayload;
use patrimonio_backend::models::asset::{
    Asset, AssetEvent, AssetFilter, AssetStatus, EventFilter, NewAsset, NewAssetEvent,
    UpdateAssetPayload,
};
use patrimonio_backend::models::auth::{Role, UpdateUserPayload, User};
use patrimonio_backend::models::catalog::{
    ConsumableStock, ConsumableStockRow, NewConsumableStock, NewStockMovement, Product,
    ProductKind, StockMovement,
};
use patrimonio_backend::models::report::StatusBreakdownRow;

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn paginate<T: Clone>(items: &[T], page: i64, limit: i64) -> Vec<T> {
    items
        .iter()
        .skip(offset(page, limit) as usize)
        .take(limit as usize)
        .cloned()
        .collect()
}

// --- Usuários ---

#[derive(Default)]
pub struct InMemoryUserRepository {
    pub users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn seed(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }
}

pub fn test_user(role: Role) -> User {
    let id = Uuid::new_v4();
    User {
        id,
        email: format!("{id}@example.com"),
        name: Some("Usuário de Teste".to_string()),
        role,
        password_hash: "hash".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(
        &self,
        email: &str,
        name: Option<&str>,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(AppError::EmailAlreadyExists);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.map(str::to_string),
            role: Role::User,
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(
        &self,
        q: Option<&str>,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<User>, i64), AppError> {
        let users = self.users.lock().unwrap();
        let mut matching: Vec<User> = users
            .iter()
            .filter(|u| match q {
                Some(q) => {
                    contains_ci(&u.email, q)
                        || u.name.as_deref().is_some_and(|name| contains_ci(name, q))
                }
                None => true,
            })
            .cloned()
            .collect();
        matching.sort_by_key(|u| std::cmp::Reverse(u.created_at));
        let total = matching.len() as i64;
        Ok((paginate(&matching, page, limit), total))
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &UpdateUserPayload,
    ) -> Result<Option<User>, AppError> {
        let mut users = self.users.lock().unwrap();
        if let Some(email) = &changes.email {
            if users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(AppError::EmailAlreadyExists);
            }
        }
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            user.name = name.clone();
        }
        if let Some(email) = &changes.email {
            user.email = email.clone();
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn set_role(&self, id: Uuid, role: Role) -> Result<Option<User>, AppError> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.role = role;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

// --- Ativos ---

#[derive(Default)]
pub struct InMemoryAssetRepository {
    pub assets: Mutex<Vec<Asset>>,
}

impl InMemoryAssetRepository {
    pub fn find_by_id_sync(&self, id: Uuid) -> Asset {
        self.assets
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .expect("ativo deve existir")
    }
}

fn matches_asset(asset: &Asset, filter: &AssetFilter) -> bool {
    if let Some(status) = filter.status {
        if asset.status != status {
            return false;
        }
    }
    if let Some(owner_id) = filter.owner_id {
        if asset.owner_id != Some(owner_id) {
            return false;
        }
    }
    if let Some(q) = &filter.q {
        if !(contains_ci(&asset.tag, q)
            || contains_ci(&asset.name, q)
            || contains_ci(&asset.asset_type, q))
        {
            return false;
        }
    }
    true
}

#[async_trait]
impl AssetRepository for InMemoryAssetRepository {
    async fn insert(&self, new: &NewAsset) -> Result<Asset, AppError> {
        let mut assets = self.assets.lock().unwrap();
        if assets.iter().any(|a| a.tag == new.tag) {
            return Err(AppError::TagAlreadyExists);
        }
        let asset = Asset {
            id: Uuid::new_v4(),
            tag: new.tag.clone(),
            name: new.name.clone(),
            asset_type: new.asset_type.clone(),
            status: new.status,
            owner_id: new.owner_id,
            purchase_cost: new.purchase_cost,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assets.push(asset.clone());
        Ok(asset)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Asset>, AppError> {
        let assets = self.assets.lock().unwrap();
        Ok(assets.iter().find(|a| a.id == id).cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &UpdateAssetPayload,
    ) -> Result<Option<Asset>, AppError> {
        let mut assets = self.assets.lock().unwrap();
        if let Some(tag) = &changes.tag {
            if assets.iter().any(|a| a.id != id && &a.tag == tag) {
                return Err(AppError::TagAlreadyExists);
            }
        }
        let Some(asset) = assets.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        if let Some(tag) = &changes.tag {
            asset.tag = tag.clone();
        }
        if let Some(name) = &changes.name {
            asset.name = name.clone();
        }
        if let Some(asset_type) = &changes.asset_type {
            asset.asset_type = asset_type.clone();
        }
        if let Some(status) = changes.status {
            asset.status = status;
        }
        if let Some(purchase_cost) = changes.purchase_cost {
            asset.purchase_cost = purchase_cost;
        }
        // Tri-estado: só mexe no responsável quando a chave veio no JSON.
        if let Some(owner_id) = changes.owner_id {
            asset.owner_id = owner_id;
        }
        asset.updated_at = Utc::now();
        Ok(Some(asset.clone()))
    }

    async fn set_owner(
        &self,
        id: Uuid,
        owner_id: Option<Uuid>,
    ) -> Result<Option<Asset>, AppError> {
        let mut assets = self.assets.lock().unwrap();
        let Some(asset) = assets.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        asset.owner_id = owner_id;
        asset.updated_at = Utc::now();
        Ok(Some(asset.clone()))
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: AssetStatus,
    ) -> Result<Option<Asset>, AppError> {
        let mut assets = self.assets.lock().unwrap();
        let Some(asset) = assets.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        asset.status = status;
        asset.updated_at = Utc::now();
        Ok(Some(asset.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut assets = self.assets.lock().unwrap();
        let before = assets.len();
        assets.retain(|a| a.id != id);
        Ok(assets.len() < before)
    }

    async fn list(
        &self,
        filter: &AssetFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Asset>, i64), AppError> {
        let assets = self.assets.lock().unwrap();
        let mut matching: Vec<Asset> = assets
            .iter()
            .filter(|a| matches_asset(a, filter))
            .cloned()
            .collect();
        matching.sort_by_key(|a| std::cmp::Reverse(a.created_at));
        let total = matching.len() as i64;
        Ok((paginate(&matching, page, limit), total))
    }

    async fn status_breakdown(&self) -> Result<Vec<StatusBreakdownRow>, AppError> {
        let assets = self.assets.lock().unwrap();
        let mut rows: Vec<StatusBreakdownRow> = Vec::new();
        for asset in assets.iter() {
            match rows.iter_mut().find(|r| r.status == asset.status) {
                Some(row) => {
                    row.count += 1;
                    row.total_cost += asset.purchase_cost;
                }
                None => rows.push(StatusBreakdownRow {
                    status: asset.status,
                    count: 1,
                    total_cost: asset.purchase_cost,
                }),
            }
        }
        Ok(rows)
    }
}

// --- Eventos ---

// `fail` simula o armazenamento de eventos fora do ar, para testar o
// contrato não-atômico do par escrita-do-ativo/escrita-do-evento.
#[derive(Default)]
pub struct InMemoryEventRepository {
    pub events: Mutex<Vec<AssetEvent>>,
    pub fail: AtomicBool,
}

impl InMemoryEventRepository {
    pub fn fail_next_writes(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn count_for(&self, asset_id: Uuid) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.asset_id == asset_id)
            .count()
    }
}

fn matches_event(event: &AssetEvent, filter: &EventFilter) -> bool {
    if let Some(asset_id) = filter.asset_id {
        if event.asset_id != asset_id {
            return false;
        }
    }
    if let Some(created_by) = filter.created_by {
        if event.created_by != created_by {
            return false;
        }
    }
    if let Some(action) = filter.action {
        if event.action != action {
            return false;
        }
    }
    if let Some(from) = filter.from {
        if event.created_at < from {
            return false;
        }
    }
    if let Some(to) = filter.to {
        if event.created_at > to {
            return false;
        }
    }
    if let Some(q) = &filter.q {
        if !(contains_ci(&event.asset_tag, q)
            || contains_ci(&event.asset_name, q)
            || contains_ci(&event.asset_type, q))
        {
            return false;
        }
    }
    true
}

#[async_trait]
impl AssetEventRepository for InMemoryEventRepository {
    async fn append(&self, new: &NewAssetEvent) -> Result<AssetEvent, AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("armazenamento de eventos indisponível").into());
        }
        let event = AssetEvent {
            id: Uuid::new_v4(),
            asset_id: new.asset_id,
            asset_tag: new.asset_tag.clone(),
            asset_name: new.asset_name.clone(),
            asset_type: new.asset_type.clone(),
            asset_status: new.asset_status,
            action: new.action,
            created_by: new.created_by,
            meta: new.meta.clone().map(Json),
            created_at: Utc::now(),
        };
        self.events.lock().unwrap().push(event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AssetEvent>, AppError> {
        let events = self.events.lock().unwrap();
        Ok(events.iter().find(|e| e.id == id).cloned())
    }

    async fn list(
        &self,
        filter: &EventFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<AssetEvent>, i64), AppError> {
        let events = self.events.lock().unwrap();
        let mut matching: Vec<AssetEvent> = events
            .iter()
            .filter(|e| matches_event(e, filter))
            .cloned()
            .collect();
        matching.sort_by_key(|e| std::cmp::Reverse(e.created_at));
        let total = matching.len() as i64;
        Ok((paginate(&matching, page, limit), total))
    }

    async fn for_asset(&self, asset_id: Uuid) -> Result<Vec<AssetEvent>, AppError> {
        let events = self.events.lock().unwrap();
        let mut matching: Vec<AssetEvent> = events
            .iter()
            .filter(|e| e.asset_id == asset_id)
            .cloned()
            .collect();
        matching.sort_by_key(|e| std::cmp::Reverse(e.created_at));
        Ok(matching)
    }
}

// --- Consumíveis ---

#[derive(Default)]
pub struct InMemoryStockRepository {
    pub products: Mutex<Vec<Product>>,
    pub stocks: Mutex<Vec<ConsumableStock>>,
    pub movements: Mutex<Vec<StockMovement>>,
}

impl InMemoryStockRepository {
    pub fn seed_product(&self, name: &str, reorder_level: i32) -> Product {
        let id = Uuid::new_v4();
        let product = Product {
            id,
            sku: format!("SKU-{id}"),
            name: name.to_string(),
            kind: ProductKind::Consumable,
            default_cost: Decimal::ZERO,
            reorder_level,
            category: None,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.products.lock().unwrap().push(product.clone());
        product
    }

    pub fn seed_stock(&self, product_id: Uuid, quantity: i32, unit_cost: Decimal) -> ConsumableStock {
        let stock = ConsumableStock {
            id: Uuid::new_v4(),
            product_id,
            location: None,
            quantity,
            unit_cost,
            updated_at: Utc::now(),
        };
        self.stocks.lock().unwrap().push(stock.clone());
        stock
    }

    fn to_row(&self, stock: &ConsumableStock) -> ConsumableStockRow {
        let products = self.products.lock().unwrap();
        let product = products
            .iter()
            .find(|p| p.id == stock.product_id)
            .expect("produto do saldo deve existir");
        ConsumableStockRow {
            id: stock.id,
            product_id: stock.product_id,
            product_name: product.name.clone(),
            product_sku: product.sku.clone(),
            reorder_level: product.reorder_level,
            location: stock.location.clone(),
            quantity: stock.quantity,
            unit_cost: stock.unit_cost,
            updated_at: stock.updated_at,
        }
    }
}

// O mesmo dublê serve de catálogo de produtos, para que o join dos
// saldos e o serviço enxerguem os mesmos registros.
#[async_trait]
impl ProductRepository for InMemoryStockRepository {
    async fn insert(&self, new: &CreateProductPayload) -> Result<Product, AppError> {
        let mut products = self.products.lock().unwrap();
        if products.iter().any(|p| p.sku == new.sku) {
            return Err(AppError::SkuAlreadyExists);
        }
        let product = Product {
            id: Uuid::new_v4(),
            sku: new.sku.clone(),
            name: new.name.clone(),
            kind: new.kind,
            default_cost: new.default_cost,
            reorder_level: new.reorder_level,
            category: new.category.clone(),
            description: new.description.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        products.push(product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let products = self.products.lock().unwrap();
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn list(
        &self,
        kind: Option<ProductKind>,
        q: Option<&str>,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Product>, i64), AppError> {
        let products = self.products.lock().unwrap();
        let mut matching: Vec<Product> = products
            .iter()
            .filter(|p| kind.is_none_or(|kind| p.kind == kind))
            .filter(|p| match q {
                Some(q) => contains_ci(&p.sku, q) || contains_ci(&p.name, q),
                None => true,
            })
            .cloned()
            .collect();
        matching.sort_by_key(|p| std::cmp::Reverse(p.created_at));
        let total = matching.len() as i64;
        Ok((paginate(&matching, page, limit), total))
    }
}

#[async_trait]
impl StockRepository for InMemoryStockRepository {
    async fn insert(&self, new: &NewConsumableStock) -> Result<ConsumableStock, AppError> {
        if !self
            .products
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.id == new.product_id)
        {
            return Err(AppError::ProductNotFound);
        }
        let stock = ConsumableStock {
            id: Uuid::new_v4(),
            product_id: new.product_id,
            location: new.location.clone(),
            quantity: new.quantity,
            unit_cost: new.unit_cost,
            updated_at: Utc::now(),
        };
        self.stocks.lock().unwrap().push(stock.clone());
        Ok(stock)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ConsumableStock>, AppError> {
        let stocks = self.stocks.lock().unwrap();
        Ok(stocks.iter().find(|s| s.id == id).cloned())
    }

    async fn set_quantity(
        &self,
        id: Uuid,
        quantity: i32,
    ) -> Result<Option<ConsumableStock>, AppError> {
        let mut stocks = self.stocks.lock().unwrap();
        let Some(stock) = stocks.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        stock.quantity = quantity;
        stock.updated_at = Utc::now();
        Ok(Some(stock.clone()))
    }

    async fn list(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<ConsumableStockRow>, i64), AppError> {
        let rows: Vec<ConsumableStockRow> = {
            let stocks = self.stocks.lock().unwrap();
            stocks.iter().map(|s| self.to_row(s)).collect()
        };
        let total = rows.len() as i64;
        Ok((paginate(&rows, page, limit), total))
    }

    async fn low_stock(&self) -> Result<Vec<ConsumableStockRow>, AppError> {
        let rows: Vec<ConsumableStockRow> = {
            let stocks = self.stocks.lock().unwrap();
            stocks.iter().map(|s| self.to_row(s)).collect()
        };
        Ok(rows
            .into_iter()
            .filter(|r| r.quantity <= r.reorder_level)
            .collect())
    }

    async fn consumable_value(&self) -> Result<Decimal, AppError> {
        let stocks = self.stocks.lock().unwrap();
        Ok(stocks.iter().fold(Decimal::ZERO, |acc, s| {
            acc + Decimal::from(s.quantity) * s.unit_cost
        }))
    }

    async fn record_movement(&self, new: &NewStockMovement) -> Result<StockMovement, AppError> {
        let movement = StockMovement {
            id: Uuid::new_v4(),
            product_id: new.product_id,
            kind: new.kind,
            quantity: new.quantity,
            previous_quantity: new.previous_quantity,
            new_quantity: new.new_quantity,
            note: new.note.clone(),
            performed_by: new.performed_by,
            performed_at: Utc::now(),
        };
        self.movements.lock().unwrap().push(movement.clone());
        Ok(movement)
    }
}
