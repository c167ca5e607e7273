pub use super::cart_item::Entity as CartItem;
pub use super::order::Entity as Order;
pub use super::order_item::Entity as OrderItem;
pub use super::pet_profile::Entity as PetProfile;
pub use super::product::Entity as Product;
pub use super::subscription::Entity as Subscription;
pub use super::subscription_item::Entity as SubscriptionItem;
pub use super::trade::Entity as Trade;
pub use super::user::Entity as User;
