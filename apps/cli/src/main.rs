//! # Tienda CLI Entry Point
//!
//! ```text
//! tienda catalog                       browse the products
//! tienda show 3                        one product in full
//! tienda cart 1 1 4                    fill a cart, print the total
//! tienda cart 1 4 --remove 4           fill, then take a line out again
//! tienda create --name Hat --description "Wool hat" --price 15
//! tienda update 3 --price 12.50        change some fields of a product
//! tienda delete 3
//! ```
//!
//! The setup lives in lib.rs for testability.

use std::process::ExitCode;

use clap::Parser;
use tienda_cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    tienda_cli::init_tracing();

    match tienda_cli::run(cli).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
