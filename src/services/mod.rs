pub mod auth_service;
pub mod cart_service;
pub mod category_service;
pub mod combo_service;
pub mod contact_service;
pub mod courier_service;
pub mod order_service;
pub mod product_service;
pub mod review_service;
pub mod store_service;
pub mod user_service;
