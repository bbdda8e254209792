//! # Repository Module
//!
//! Database repository implementations for DealCalc.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Caller                                                                 │
//! │       │                                                                 │
//! │       │  db.history().insert(&entry)                                    │
//! │       ▼                                                                 │
//! │  HistoryRepository                                                      │
//! │  ├── insert(&self, entry)     - with capacity eviction                  │
//! │  ├── list(&self, limit)       - newest first                            │
//! │  ├── get_by_id(&self, id)                                               │
//! │  ├── set_advice(&self, id, text)                                        │
//! │  ├── clear(&self)                                                       │
//! │  └── count(&self)                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod history;
