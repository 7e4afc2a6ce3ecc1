//! # Storefront
//!
//! E-commerce backend that serves a product catalog from MongoDB and keeps
//! answering catalog reads from a built-in sample catalog when the database
//! is unreachable.
//!
//! ## Layout
//!
//! ```text
//! ┌────────────┐   ┌────────────┐
//! │  CLI       │   │  HTTP API  │
//! │  (clap)    │   │  (axum)    │
//! └─────┬──────┘   └─────┬──────┘
//!       └───────┬────────┘
//!               ▼
//!       ┌───────────────┐      ┌─────────────────┐
//!       │   resolver    │ ───▶ │ storefront-core │
//!       └───────┬───────┘      │ (fallback, types)│
//!               ▼              └─────────────────┘
//!       ┌───────────────┐
//!       │    store      │  MongoDB / memory / unavailable
//!       └───────────────┘
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod resolver;
pub mod store;
