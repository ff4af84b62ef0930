pub mod assets;
pub mod auth;
pub mod consumables;
pub mod events;
pub mod products;
pub mod reports;
pub mod tickets;
pub mod users;
