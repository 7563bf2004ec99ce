//! # Soko Storefront Library
//!
//! Session layer for the Soko storefront demo, plus a terminal
//! front-end that plays the role of the rendering sink.
//!
//! ## Module Organization
//! ```text
//! soko_storefront/
//! ├── lib.rs          ◄─── You are here (tracing setup & demo loop)
//! ├── catalog.rs      ◄─── Static product catalog
//! ├── config.rs       ◄─── Configuration state (env + defaults)
//! ├── error.rs        ◄─── ApiError / ErrorCode
//! ├── gateway.rs      ◄─── PaymentGateway trait + simulators
//! └── session.rs      ◄─── Session state + command surface
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load config from environment (`SOKO_*` overrides)
//! 3. Seed the catalog, create the session, wire the simulator
//! 4. Run the terminal loop: commands in, rendered views out

pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod session;

use std::io::{self, BufRead, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog::Catalog;
use config::ConfigState;
use gateway::MomoSimulator;
use session::{CartView, CheckoutView, PaymentNotice, Storefront};
use soko_core::types::{PaymentProvider, PaymentStatus};

/// Runs the storefront demo.
///
/// ## Commands
/// ```text
/// catalog              list products
/// add <product-id>     add a product to the cart
/// remove <index>       remove the cart line at position (0-based)
/// cart                 show cart, count, subtotal, checkout control
/// checkout             open the checkout summary
/// distance <km>        set the delivery distance
/// pay <mtn|airtel> <phone>   submit the payment
/// close                close the checkout without paying
/// quit                 exit
/// ```
pub async fn run() {
    init_tracing();

    let config = ConfigState::from_env();
    info!(store = %config.store_name, "Starting Soko storefront");

    let gateway = MomoSimulator::from_config(&config);
    let front = Storefront::new(Catalog::seeded(), config, gateway);

    println!("== {} ==", front.config().store_name);
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    loop {
        print!("soko> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(err) => {
                eprintln!("input error: {err}");
                break;
            }
        }

        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command {
            "help" => print_help(),
            "catalog" => render_catalog(&front),
            "cart" => render_cart(&front, &front.cart_view()),
            "add" => match parts.next() {
                Some(id) => match front.add_to_cart(id) {
                    Ok(view) => render_cart(&front, &view),
                    Err(err) => println!("{}", err.message),
                },
                None => println!("usage: add <product-id>"),
            },
            "remove" => match parts.next().and_then(|raw| raw.parse::<usize>().ok()) {
                Some(index) => render_cart(&front, &front.remove_from_cart(index)),
                None => println!("usage: remove <index>"),
            },
            "checkout" => match front.open_checkout() {
                Ok(view) => render_checkout(&front, &view),
                Err(err) => println!("{}", err.message),
            },
            "distance" => {
                let raw = parts.next().unwrap_or("");
                render_checkout(&front, &front.set_distance(raw));
            }
            "pay" => {
                let provider = parts.next().unwrap_or("");
                let phone = parts.next().unwrap_or("");
                match provider.parse::<PaymentProvider>() {
                    Ok(provider) => match front.submit_payment(provider, phone).await {
                        Ok(notice) => render_notice(&front, &notice),
                        Err(err) => println!("{}", err.message),
                    },
                    Err(err) => println!("{err}"),
                }
            }
            "close" => match front.close_checkout() {
                Ok(view) => render_cart(&front, &view),
                Err(err) => println!("{}", err.message),
            },
            "quit" | "exit" => break,
            other => println!("unknown command '{other}' (try 'help')"),
        }
    }

    info!("Storefront session ended");
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=soko_core=trace` - Show trace for one crate only
/// - Default: INFO, with debug for the soko crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,soko_storefront=debug,soko_core=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_help() {
    println!("  catalog                    list products");
    println!("  add <product-id>           add a product to the cart");
    println!("  remove <index>             remove cart line at position");
    println!("  cart                       show the cart");
    println!("  checkout                   open the checkout summary");
    println!("  distance <km>              set the delivery distance");
    println!("  pay <mtn|airtel> <phone>   submit the payment");
    println!("  close                      close checkout without paying");
    println!("  quit                       exit");
}

fn render_catalog<G>(front: &Storefront<G>) {
    for product in front.catalog().products() {
        println!(
            "  {:<20} {:<24} {}",
            product.id,
            product.name,
            front.config().format_currency(product.price_ugx)
        );
    }
}

fn render_cart<G>(front: &Storefront<G>, view: &CartView) {
    if view.lines.is_empty() {
        println!("Your cart is empty.");
    } else {
        for (index, line) in view.lines.iter().enumerate() {
            println!(
                "  [{index}] {:<24} {}",
                line.name,
                front.config().format_currency(line.price_ugx)
            );
        }
    }
    println!(
        "  {} item(s), subtotal {}",
        view.totals.count,
        front.config().format_currency(view.totals.subtotal_ugx)
    );
    println!("  [{}]", view.checkout_label);
}

fn render_checkout<G>(front: &Storefront<G>, view: &CheckoutView) {
    let config = front.config();
    println!("  Distance:     {} km", view.distance_km);
    println!(
        "  Subtotal:     {}",
        config.format_currency(view.quote.subtotal_ugx)
    );
    println!(
        "  Delivery fee: {}",
        config.format_currency(view.quote.delivery_fee_ugx)
    );
    println!(
        "  Total:        {}",
        config.format_currency(view.quote.total_ugx)
    );
}

fn render_notice<G>(front: &Storefront<G>, notice: &PaymentNotice) {
    match notice.status {
        PaymentStatus::Succeeded => {
            println!(
                "Success! {} (Transaction ID: {})",
                notice.message,
                notice.transaction_id.as_deref().unwrap_or("-")
            );
            println!(
                "Charged {} via {}",
                front.config().format_currency(notice.amount_ugx),
                notice.provider
            );
        }
        _ => println!("Error: {}", notice.message),
    }
}
