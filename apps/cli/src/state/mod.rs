//! # State Module
//!
//! Session state for the CLI.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────────────┬──────────────────┐               │
//! │          ▼                          ▼                                   │
//! │  ┌──────────────────────┐  ┌──────────────────┐                        │
//! │  │     CartStore        │  │   ConfigState    │                        │
//! │  │                      │  │                  │                        │
//! │  │  Cart (owned)        │  │  currency_symbol │                        │
//! │  │  watch::Sender<      │  │  preview chars   │                        │
//! │  │    CartSnapshot>     │  │                  │                        │
//! │  └──────────────────────┘  └──────────────────┘                        │
//! │                                                                         │
//! │  • CartStore: one writer (&mut), any number of watch receivers         │
//! │  • ConfigState: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::{CartSnapshot, CartStore, CartTotals};
pub use config::ConfigState;
