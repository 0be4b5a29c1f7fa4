use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod cart;
pub mod categories;
pub mod combos;
pub mod contacts;
pub mod couriers;
pub mod doc;
pub mod health;
pub mod orders;
pub mod params;
pub mod products;
pub mod reviews;
pub mod stores;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(stores::router())
        .merge(products::router())
        .merge(combos::router())
        .merge(cart::router())
        .merge(reviews::router())
        .nest("/user", users::router())
        .nest("/category", categories::router())
        .nest("/contact", contacts::router())
        .nest("/order", orders::router())
        .nest("/courier", couriers::router())
}
