//! # Commands Module
//!
//! One module per view of the shop.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CLI Commands                                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  CATALOG (catalog.rs)                                           │   │
//! │  │  • catalog       - Browse list (never fails)                    │   │
//! │  │  • show          - One product, full description                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  CART (cart.rs)                                                 │   │
//! │  │  • fill_cart     - Add catalog products by id                   │   │
//! │  │  • render_cart   - Lines and total                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  ADMIN (admin.rs)                                               │   │
//! │  │  • AdminPanel    - Form, create/update/delete, reload           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod admin;
pub mod cart;
pub mod catalog;
