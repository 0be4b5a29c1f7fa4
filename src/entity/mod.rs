pub mod carts;
pub mod categories;
pub mod combos;
pub mod contacts;
pub mod courier_reviews;
pub mod couriers;
pub mod orders;
pub mod products;
pub mod store_reviews;
pub mod stores;
pub mod users;

pub use carts::Entity as Carts;
pub use categories::Entity as Categories;
pub use combos::Entity as Combos;
pub use contacts::Entity as Contacts;
pub use courier_reviews::Entity as CourierReviews;
pub use couriers::Entity as Couriers;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
pub use store_reviews::Entity as StoreReviews;
pub use stores::Entity as Stores;
pub use users::Entity as Users;
