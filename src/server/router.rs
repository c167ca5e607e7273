use axum::{
    routing::{get, post, put},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{
    model::{
        analytics::{AnalyticsDto, DailyRevenueDto, DashboardDto, LowStockProductDto, TopProductDto},
        api::{ErrorDto, StatusDto},
        cart::{AddCartItemDto, CartDto, CartLineDto, UpdateCartItemDto},
        checkout::{CheckoutDto, CheckoutResultDto, PaymentLinkDto},
        order::{OrderDto, OrderItemDto, OrderStatusDto, PaginatedOrdersDto, UpdateOrderStatusDto},
        pet::{PetProfileDto, SavePetProfileDto},
        product::{PaginatedProductsDto, ProductDto, SaveProductDto, SpeciesDto},
        subscription::{
            CreateSubscriptionDto, DeliveryFrequencyDto, PaginatedSubscriptionsDto,
            SubscriptionDto, SubscriptionItemDto, SubscriptionItemInputDto,
            SubscriptionStatusDto, UpdateSubscriptionDto,
        },
        user::{LoginDto, PaginatedUsersDto, RegisterDto, RoleDto, UpdateRoleDto, UserDto},
    },
    server::{
        controller::{
            analytics, auth, cart, health, order, pet_profile, product, subscription, user,
            webhook,
        },
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "KibbleDrop API"),
    paths(
        auth::register,
        auth::login,
        auth::logout,
        auth::get_user,
        user::get_all_users,
        user::update_user_role,
        product::get_products,
        product::get_product,
        product::get_all_products,
        product::create_product,
        product::update_product,
        product::archive_product,
        cart::get_cart,
        cart::add_cart_item,
        cart::update_cart_item,
        cart::remove_cart_item,
        cart::clear_cart,
        order::checkout,
        order::get_orders,
        order::get_order,
        order::cancel_order,
        order::create_payment_link,
        order::get_all_orders,
        order::update_order_status,
        subscription::get_subscriptions,
        subscription::create_subscription,
        subscription::get_subscription,
        subscription::update_subscription,
        subscription::pause_subscription,
        subscription::resume_subscription,
        subscription::skip_subscription,
        subscription::cancel_subscription,
        subscription::get_all_subscriptions,
        pet_profile::get_pets,
        pet_profile::create_pet,
        pet_profile::get_pet,
        pet_profile::update_pet,
        pet_profile::delete_pet,
        analytics::get_analytics,
        analytics::get_dashboard,
        webhook::tradesafe_webhook,
        health::health,
    ),
    components(schemas(
        ErrorDto,
        StatusDto,
        UserDto,
        RoleDto,
        RegisterDto,
        LoginDto,
        UpdateRoleDto,
        PaginatedUsersDto,
        ProductDto,
        SpeciesDto,
        SaveProductDto,
        PaginatedProductsDto,
        CartDto,
        CartLineDto,
        AddCartItemDto,
        UpdateCartItemDto,
        CheckoutDto,
        CheckoutResultDto,
        PaymentLinkDto,
        OrderDto,
        OrderItemDto,
        OrderStatusDto,
        UpdateOrderStatusDto,
        PaginatedOrdersDto,
        SubscriptionDto,
        SubscriptionItemDto,
        SubscriptionItemInputDto,
        SubscriptionStatusDto,
        DeliveryFrequencyDto,
        CreateSubscriptionDto,
        UpdateSubscriptionDto,
        PaginatedSubscriptionsDto,
        PetProfileDto,
        SavePetProfileDto,
        AnalyticsDto,
        DailyRevenueDto,
        TopProductDto,
        DashboardDto,
        LowStockProductDto,
    )),
    tags(
        (name = "auth", description = "Registration, login and session"),
        (name = "user", description = "Account administration"),
        (name = "product", description = "Catalog"),
        (name = "cart", description = "Shopping cart"),
        (name = "order", description = "Checkout, orders and fulfilment"),
        (name = "subscription", description = "Recurring deliveries"),
        (name = "pet", description = "Pet profiles"),
        (name = "analytics", description = "Sales analytics and dashboard"),
        (name = "webhook", description = "Payment provider notifications"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/api/health", get(health::health))
        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/user", get(auth::get_user))
        // Catalog
        .route("/api/products", get(product::get_products))
        .route("/api/products/{slug}", get(product::get_product))
        // Cart and checkout
        .route("/api/cart", get(cart::get_cart).delete(cart::clear_cart))
        .route("/api/cart/items", post(cart::add_cart_item))
        .route(
            "/api/cart/items/{product_id}",
            put(cart::update_cart_item).delete(cart::remove_cart_item),
        )
        .route("/api/checkout", post(order::checkout))
        // Orders
        .route("/api/orders", get(order::get_orders))
        .route("/api/orders/{id}", get(order::get_order))
        .route("/api/orders/{id}/cancel", post(order::cancel_order))
        .route("/api/orders/{id}/payment", post(order::create_payment_link))
        // Subscriptions
        .route(
            "/api/subscriptions",
            get(subscription::get_subscriptions).post(subscription::create_subscription),
        )
        .route(
            "/api/subscriptions/{id}",
            get(subscription::get_subscription).put(subscription::update_subscription),
        )
        .route(
            "/api/subscriptions/{id}/pause",
            post(subscription::pause_subscription),
        )
        .route(
            "/api/subscriptions/{id}/resume",
            post(subscription::resume_subscription),
        )
        .route(
            "/api/subscriptions/{id}/skip",
            post(subscription::skip_subscription),
        )
        .route(
            "/api/subscriptions/{id}/cancel",
            post(subscription::cancel_subscription),
        )
        // Pets
        .route(
            "/api/pets",
            get(pet_profile::get_pets).post(pet_profile::create_pet),
        )
        .route(
            "/api/pets/{id}",
            get(pet_profile::get_pet)
                .put(pet_profile::update_pet)
                .delete(pet_profile::delete_pet),
        )
        // Admin
        .route("/api/admin/users", get(user::get_all_users))
        .route("/api/admin/users/{id}/role", put(user::update_user_role))
        .route(
            "/api/admin/products",
            get(product::get_all_products).post(product::create_product),
        )
        .route(
            "/api/admin/products/{id}",
            put(product::update_product).delete(product::archive_product),
        )
        .route("/api/admin/orders", get(order::get_all_orders))
        .route(
            "/api/admin/orders/{id}/status",
            put(order::update_order_status),
        )
        .route(
            "/api/admin/subscriptions",
            get(subscription::get_all_subscriptions),
        )
        .route("/api/admin/analytics", get(analytics::get_analytics))
        .route("/api/admin/dashboard", get(analytics::get_dashboard))
        // Payment provider
        .route("/api/webhooks/tradesafe", post(webhook::tradesafe_webhook))
}
