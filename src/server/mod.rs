//! KibbleDrop API backend.
//!
//! The server follows a layered architecture:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Business rules, transactions and TradeSafe calls
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Session access and authentication guards
//!
//! Supporting modules:
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, TradeSafe client, store settings)
//! - **Startup** (`startup`) - Initialization of database, sessions and outbound clients
//! - **Router** (`router`) - Axum route configuration and OpenAPI document
//! - **Scheduler** (`scheduler/`) - Cron job renewing due subscriptions
//!
//! A request passes router, session layer and controller; the controller checks access
//! with `AuthGuard`, converts the DTO into a param and calls a service, which works
//! against the data layer and returns domain models that the controller turns back
//! into DTOs.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
