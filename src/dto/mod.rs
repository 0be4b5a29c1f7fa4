pub mod auth;
pub mod cart;
pub mod combos;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod stores;
pub mod users;
