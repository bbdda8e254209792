//! # dealcalc-history: Calculation History for DealCalc
//!
//! This crate stores recent calculations in SQLite using sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        DealCalc Data Flow                               │
//! │                                                                         │
//! │  Caller (CLI / frontend bridge)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  dealcalc-history (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ (history.rs)  │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (dealcalc.db)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Retention Contract
//! The history keeps the [`dealcalc_core::HISTORY_CAPACITY`] newest entries
//! and evicts the oldest on insert. It is a convenience view of recent
//! calculations, not an archive; no further durability is promised.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - The history repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dealcalc_history::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./dealcalc.db")).await?;
//!
//! db.history().insert(&entry).await?;
//! let recent = db.history().list(10).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::history::HistoryRepository;
