//! # Tienda CLI Library
//!
//! Command line front end of the shop.
//!
//! ## Module Organization
//! ```text
//! tienda_cli/
//! ├── lib.rs          ◄─── You are here (argument parsing & dispatch)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart store with watch observers
//! │   └── config.rs   ◄─── Display configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Browse list and product detail
//! │   ├── cart.rs     ◄─── Cart filling and rendering
//! │   └── admin.rs    ◄─── Admin panel (create/update/delete)
//! └── error.rs        ◄─── App error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse arguments (clap)                                              │
//! │  2. Initialize tracing (stderr, RUST_LOG)                               │
//! │  3. Load CatalogConfig (file → env → validate)                          │
//! │  4. Build ProductRepository over HTTP                                   │
//! │  5. Run the subcommand, print its output to stdout                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tienda_catalog::{CatalogConfig, ProductRepository};
use tienda_core::{ProductForm, ProductId};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::admin::AdminPanel;
use commands::{cart, catalog};
use error::{AppError, AppResult};
use state::{CartSnapshot, CartStore, ConfigState};

// =============================================================================
// Command Line
// =============================================================================

/// Browse the shop, fill a cart and manage products.
#[derive(Debug, Parser)]
#[command(name = "tienda", version, about)]
pub struct Cli {
    /// Path to a tienda.toml config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all products
    Catalog {
        /// Show full descriptions instead of a preview
        #[arg(long)]
        full: bool,
    },

    /// Show one product
    Show { id: ProductId },

    /// Put products in a cart and show the total
    Cart {
        /// Product ids; repeat an id to add it again
        #[arg(required = true)]
        ids: Vec<ProductId>,

        /// Take a product's line out again after filling
        #[arg(long = "remove", value_name = "ID")]
        remove: Vec<ProductId>,
    },

    /// Create a product
    Create(FormArgs),

    /// Replace a product's fields
    Update {
        id: ProductId,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Delete a product
    Delete { id: ProductId },
}

/// Admin form fields. Omitted fields keep the form's current value.
#[derive(Debug, Clone, Default, Args)]
pub struct FormArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Price as a plain decimal, e.g. 9.99
    #[arg(long)]
    pub price: Option<String>,

    /// Image URL (placeholder when empty)
    #[arg(long)]
    pub image: Option<String>,

    /// Category (default category when empty)
    #[arg(long)]
    pub category: Option<String>,
}

impl FormArgs {
    fn apply_to(self, form: &mut ProductForm) {
        let fields = [
            (self.name, &mut form.name),
            (self.description, &mut form.description),
            (self.price, &mut form.price),
            (self.image, &mut form.image),
            (self.category, &mut form.category),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[derive(Serialize)]
struct CartOutput<'a> {
    cart: &'a CartSnapshot,
    skipped: &'a [AppError],
}

// =============================================================================
// Entry Points
// =============================================================================

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tienda_catalog=trace` - Trace the API adapter only
/// - Default: INFO, DEBUG for tienda crates
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tienda=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads configuration and runs the parsed command.
///
/// An explicit `--config` file must load; the default location falls back
/// to built-in defaults.
pub async fn run(cli: Cli) -> AppResult<String> {
    let config = match &cli.config {
        Some(path) => CatalogConfig::load(Some(path.clone()))?,
        None => CatalogConfig::load_or_default(None),
    };
    info!(base_url = %config.api.base_url, "Starting tienda");

    let repo = ProductRepository::from_config(&config)?;
    let display = ConfigState::from_env();

    execute(cli.command, cli.json, repo, &display).await
}

/// Runs one command against an already built repository.
pub async fn execute(
    command: Command,
    json: bool,
    repo: ProductRepository,
    display: &ConfigState,
) -> AppResult<String> {
    match command {
        Command::Catalog { full } => {
            if json {
                to_json(&repo.list_products().await)
            } else {
                Ok(catalog::catalog(&repo, display, full).await)
            }
        }

        Command::Show { id } => {
            if json {
                to_json(&repo.get_product(&id).await?)
            } else {
                catalog::show(&repo, display, &id).await
            }
        }

        Command::Cart { ids, remove } => {
            let mut store = CartStore::new();
            let mut changes = store.subscribe();

            let report = cart::fill_cart(&repo, &mut store, &ids).await;
            for id in &remove {
                if !store.remove_product(id) {
                    debug!(%id, "Not in cart, nothing to remove");
                }
            }

            if changes.has_changed().unwrap_or(false) {
                let snapshot = changes.borrow_and_update();
                info!(
                    session_id = %store.session_id(),
                    lines = snapshot.totals.line_count,
                    total = %snapshot.totals.total,
                    "Cart updated"
                );
            }

            if json {
                return to_json(&CartOutput {
                    cart: &store.snapshot(),
                    skipped: &report.skipped,
                });
            }

            let mut out = String::new();
            for skipped in &report.skipped {
                out.push_str(&format!("skipped: {}\n", skipped.message));
            }
            out.push_str(&cart::render_cart(&store, display));
            Ok(out)
        }

        Command::Create(form) => {
            let mut panel = AdminPanel::new(repo);
            form.apply_to(panel.form_mut());
            let product = panel.submit().await?;
            admin_output(json, "Created", &product, &panel, display)
        }

        Command::Update { id, form } => {
            let mut panel = AdminPanel::new(repo);
            if !panel.load().await {
                let message = panel.last_error().unwrap_or_default().to_string();
                return Err(AppError::network(message));
            }
            panel.begin_edit(&id).await?;
            form.apply_to(panel.form_mut());
            let product = panel.submit().await?;
            admin_output(json, "Updated", &product, &panel, display)
        }

        Command::Delete { id } => {
            let mut panel = AdminPanel::new(repo);
            panel.delete(&id).await?;
            if json {
                return to_json(&serde_json::json!({ "deleted": id }));
            }
            Ok(format!(
                "Deleted {}\n\n{}",
                id,
                catalog::render_catalog(panel.products(), display, false)
            ))
        }
    }
}

fn admin_output(
    json: bool,
    verb: &str,
    product: &tienda_core::Product,
    panel: &AdminPanel,
    display: &ConfigState,
) -> AppResult<String> {
    if json {
        return to_json(product);
    }
    Ok(format!(
        "{} {}\n{}",
        verb,
        catalog::render_product(product, display, false),
        catalog::render_catalog(panel.products(), display, false)
    ))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value)
        .map(|s| s + "\n")
        .map_err(|e| AppError::internal(format!("Cannot encode output: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use tienda_catalog::memory::MemoryTransport;
    use tienda_catalog::WriteDefaults;

    fn repo() -> (Arc<MemoryTransport>, ProductRepository) {
        let transport = Arc::new(MemoryTransport::with_records([
            json!({"id": 1, "title": "Shirt", "price": 10, "description": "Cotton"}),
            json!({"id": 2, "title": "Mug", "price": 5, "description": "Ceramic"}),
        ]));
        let repo = ProductRepository::new(transport.clone(), WriteDefaults::default());
        (transport, repo)
    }

    #[test]
    fn test_parse_cart_ids() {
        let cli = Cli::try_parse_from(["tienda", "cart", "1", "abc", "1"]).unwrap();
        match cli.command {
            Command::Cart { ids, .. } => assert_eq!(
                ids,
                vec![ProductId::from(1), ProductId::from("abc"), ProductId::from(1)]
            ),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cart_requires_ids() {
        assert!(Cli::try_parse_from(["tienda", "cart"]).is_err());
    }

    #[test]
    fn test_parse_update_with_global_flags() {
        let cli = Cli::try_parse_from([
            "tienda", "update", "3", "--price", "4.50", "--json", "--config", "shop.toml",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("shop.toml")));
        match cli.command {
            Command::Update { id, form } => {
                assert_eq!(id, ProductId::from(3));
                assert_eq!(form.price.as_deref(), Some("4.50"));
                assert!(form.name.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_form_args_only_override_given_fields() {
        let mut form = ProductForm {
            name: "Mug".to_string(),
            description: "Ceramic".to_string(),
            price: "12.50".to_string(),
            ..Default::default()
        };
        FormArgs {
            price: Some("14".to_string()),
            ..Default::default()
        }
        .apply_to(&mut form);

        assert_eq!(form.name, "Mug");
        assert_eq!(form.price, "14");
    }

    #[tokio::test]
    async fn test_cart_command_reports_skipped_ids() {
        let (_transport, repo) = repo();
        let command = Command::Cart {
            ids: vec![ProductId::from(1), ProductId::from(7), ProductId::from(1)],
            remove: vec![],
        };

        let out = execute(command, false, repo, &ConfigState::default())
            .await
            .unwrap();
        assert!(out.starts_with("skipped: Product not found: 7\n"));
        assert!(out.contains("$20.00"));
    }

    #[tokio::test]
    async fn test_cart_command_json() {
        let (_transport, repo) = repo();
        let command = Command::Cart {
            ids: vec![ProductId::from(1), ProductId::from(2), ProductId::from(1)],
            remove: vec![],
        };

        let out = execute(command, true, repo, &ConfigState::default())
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["cart"]["totals"]["total"], json!(2500));
        assert_eq!(value["cart"]["totals"]["totalQuantity"], json!(3));
        assert_eq!(value["skipped"], json!([]));
    }

    #[test]
    fn test_parse_cart_remove() {
        let cli = Cli::try_parse_from(["tienda", "cart", "1", "2", "--remove", "2"]).unwrap();
        match cli.command {
            Command::Cart { ids, remove } => {
                assert_eq!(ids, vec![ProductId::from(1), ProductId::from(2)]);
                assert_eq!(remove, vec![ProductId::from(2)]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cart_command_removes_lines() {
        let (_transport, repo) = repo();
        let command = Command::Cart {
            ids: vec![ProductId::from(1), ProductId::from(2), ProductId::from(1)],
            remove: vec![ProductId::from(2), ProductId::from(9)],
        };

        let out = execute(command, true, repo, &ConfigState::default())
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["cart"]["totals"]["lineCount"], json!(1));
        assert_eq!(value["cart"]["totals"]["totalQuantity"], json!(2));
        assert_eq!(value["cart"]["totals"]["total"], json!(2000));
    }

    #[tokio::test]
    async fn test_create_command_validates_before_sending() {
        let (transport, repo) = repo();
        let command = Command::Create(FormArgs {
            description: Some("Wool".to_string()),
            price: Some("3".to_string()),
            ..Default::default()
        });

        let err = execute(command, false, repo, &ConfigState::default())
            .await
            .unwrap_err();
        assert_eq!(err.message, "name is required");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_update_command_keeps_unspecified_fields() {
        let (transport, repo) = repo();
        let command = Command::Update {
            id: ProductId::from(2),
            form: FormArgs {
                price: Some("6.25".to_string()),
                ..Default::default()
            },
        };

        let out = execute(command, false, repo, &ConfigState::default())
            .await
            .unwrap();
        assert!(out.starts_with("Updated [2] Mug  $6.25"));

        let stored = transport.record(2).unwrap();
        assert_eq!(stored["title"], "Mug");
        assert_eq!(stored["description"], "Ceramic");
    }

    #[tokio::test]
    async fn test_delete_command_lists_remaining() {
        let (_transport, repo) = repo();
        let out = execute(
            Command::Delete { id: ProductId::from(1) },
            false,
            repo,
            &ConfigState::default(),
        )
        .await
        .unwrap();

        assert!(out.starts_with("Deleted 1\n"));
        assert!(out.contains("[2] Mug"));
        assert!(!out.contains("Shirt"));
    }
}
