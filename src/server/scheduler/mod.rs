pub mod subscription_renewals;
