pub mod asset_repo;
pub use asset_repo::{AssetRepository, PgAssetRepository};
pub mod event_repo;
pub use event_repo::{AssetEventRepository, PgAssetEventRepository};
pub mod user_repo;
pub use user_repo::{PgUserRepository, UserRepository};
pub mod product_repo;
pub use product_repo::{PgProductRepository, ProductRepository};
pub mod stock_repo;
pub use stock_repo::{PgStockRepository, StockRepository};
pub mod ticket_repo;
pub use ticket_repo::{PgTicketRepository, TicketRepository};
