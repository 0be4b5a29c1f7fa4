use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, LogoutRequest, RegisterRequest},
        cart::{AddCartItemRequest, CartItemDto, CartItemList, UpdateCartItemRequest},
        combos::{ComboList, CreateComboRequest, UpdateComboRequest},
        orders::{CreateOrderRequest, OrderList, UpdateOrderRequest},
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        reviews::{
            CourierReviewList, CreateCourierReviewRequest, CreateStoreReviewRequest,
            StoreReviewDisplay, StoreReviewList, UpdateCourierReviewRequest,
            UpdateStoreReviewRequest,
        },
        stores::{CreateStoreRequest, StoreDetail, StoreList, StoreListItem, UpdateStoreRequest},
        users::{ReviewAuthor, UpdateUserRequest, UserProfile, UserProfileList, UserSummary},
    },
    models::{
        Cart, CartItem, Category, Combo, Contact, Courier, CourierReview, Order, Product, Store,
        StoreReview,
    },
    response::{ApiResponse, Meta},
    routes::{
        auth, cart, categories, combos, contacts, couriers, health, orders, params, products,
        reviews, stores, users,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::logout,
        stores::list_stores,
        stores::store_detail,
        stores::create_store,
        stores::update_store,
        stores::delete_store,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        combos::list_combos,
        combos::get_combo,
        combos::create_combo,
        combos::update_combo,
        combos::delete_combo,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        contacts::list_contacts,
        contacts::get_contact,
        contacts::create_contact,
        contacts::update_contact,
        contacts::delete_contact,
        cart::list_carts,
        cart::create_cart,
        cart::get_cart,
        cart::delete_cart,
        cart::list_cart_items,
        cart::add_cart_item,
        cart::update_cart_item,
        cart::remove_cart_item,
        orders::list_orders,
        orders::get_order,
        orders::create_order,
        orders::update_order,
        orders::delete_order,
        couriers::list_couriers,
        couriers::get_courier,
        couriers::create_courier,
        couriers::update_courier,
        couriers::delete_courier,
        reviews::list_store_reviews,
        reviews::get_store_review,
        reviews::create_store_review,
        reviews::update_store_review,
        reviews::delete_store_review,
        reviews::list_courier_reviews,
        reviews::get_courier_review,
        reviews::create_courier_review,
        reviews::update_courier_review,
        reviews::delete_courier_review,
        users::list_profiles,
        users::get_profile,
        users::update_profile,
        users::delete_profile
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            LogoutRequest,
            UserProfile,
            UserProfileList,
            UserSummary,
            ReviewAuthor,
            UpdateUserRequest,
            Category,
            categories::CreateCategoryRequest,
            categories::UpdateCategoryRequest,
            categories::CategoryList,
            Store,
            StoreList,
            StoreListItem,
            StoreDetail,
            CreateStoreRequest,
            UpdateStoreRequest,
            Contact,
            contacts::CreateContactRequest,
            contacts::UpdateContactRequest,
            contacts::ContactList,
            Product,
            ProductList,
            CreateProductRequest,
            UpdateProductRequest,
            Combo,
            ComboList,
            CreateComboRequest,
            UpdateComboRequest,
            Cart,
            CartItem,
            CartItemDto,
            CartItemList,
            AddCartItemRequest,
            UpdateCartItemRequest,
            Order,
            OrderList,
            CreateOrderRequest,
            UpdateOrderRequest,
            Courier,
            couriers::CreateCourierRequest,
            couriers::UpdateCourierRequest,
            couriers::CourierList,
            StoreReview,
            StoreReviewDisplay,
            StoreReviewList,
            CreateStoreReviewRequest,
            UpdateStoreReviewRequest,
            CourierReview,
            CourierReviewList,
            CreateCourierReviewRequest,
            UpdateCourierReviewRequest,
            params::Pagination,
            params::StoreQuery,
            params::ProductQuery,
            params::ComboQuery,
            params::OrderListQuery,
            Meta,
            ApiResponse<StoreList>,
            ApiResponse<StoreDetail>,
            ApiResponse<ProductList>,
            ApiResponse<ComboList>,
            ApiResponse<OrderList>,
            ApiResponse<UserProfile>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and logout"),
        (name = "Stores", description = "Store listing, detail and management"),
        (name = "Products", description = "Product endpoints"),
        (name = "Combos", description = "Product combo endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Contacts", description = "Store contact endpoints"),
        (name = "Cart", description = "Cart and cart item endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Couriers", description = "Courier endpoints"),
        (name = "Reviews", description = "Store and courier reviews"),
        (name = "Users", description = "Profile endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
