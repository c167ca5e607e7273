//! Administrative services.
//!
//! Holds the one-time code that lets the first account claim the admin role on a fresh
//! installation.

pub mod code;
