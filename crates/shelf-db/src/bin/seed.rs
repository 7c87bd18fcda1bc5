//! # Seed Data Generator
//!
//! Populates the database with a small demo catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./data/shelf.db
//! cargo run -p shelf-db --bin seed
//!
//! # Specify database path
//! cargo run -p shelf-db --bin seed -- --db ./data/dev.db
//! ```
//!
//! ## Generated Items
//! - Books across Fiction, Sci-Fi, History, Programming
//! - The demo shoes, as catalog items in the Sneakers category
//!
//! Discounted items carry an `original_price` and a selling `price` derived
//! from it, so the discounted view has something to show.

use chrono::{Duration, Utc};
use shelf_core::{ItemInput, Money};
use shelf_db::{generate_item_id, Database, DbConfig};
use std::env;

/// (title, author, year, category, price, discount %, rating, reviews, is_new, pages)
type BookSpec = (
    &'static str,
    &'static str,
    i32,
    &'static str,
    i64,
    u32,
    f64,
    u32,
    bool,
    Option<u32>,
);

const BOOKS: &[BookSpec] = &[
    ("Dune", "Frank Herbert", 1965, "Sci-Fi", 1999, 0, 4.7, 1820, false, Some(412)),
    ("Foundation", "Isaac Asimov", 1951, "Sci-Fi", 1599, 15, 4.4, 960, false, Some(255)),
    ("The Left Hand of Darkness", "Ursula K. Le Guin", 1969, "Sci-Fi", 1450, 0, 4.2, 410, false, None),
    ("Pride and Prejudice", "Jane Austen", 1813, "Fiction", 999, 30, 4.6, 2210, false, Some(432)),
    ("The Remains of the Day", "Kazuo Ishiguro", 1989, "Fiction", 1350, 0, 4.1, 380, true, Some(258)),
    ("Piranesi", "Susanna Clarke", 2020, "Fiction", 1699, 10, 4.5, 640, true, Some(272)),
    ("SPQR", "Mary Beard", 2015, "History", 2199, 0, 4.0, 330, false, Some(608)),
    ("The Guns of August", "Barbara W. Tuchman", 1962, "History", 1899, 25, 4.3, 270, false, None),
    ("The Rust Programming Language", "Steve Klabnik", 2023, "Programming", 3999, 0, 4.8, 150, true, Some(560)),
    ("Zero to Production in Rust", "Luca Palmieri", 2022, "Programming", 4500, 20, 4.7, 90, true, Some(0)),
];

/// (title, brand, price in whole units, description)
const SHOES: &[(&str, &str, i64, &str)] = &[
    ("Air Force 1", "Nike", 3500, "Classic low-top leather sneaker"),
    ("Ultraboost 22", "Adidas", 4200, "Cushioned running shoe"),
    ("574 Classic", "New Balance", 2800, "Suede and mesh everyday trainer"),
];

fn book_input(spec: &BookSpec) -> ItemInput {
    let &(title, author, year, category, cents, discount, rating, reviews, is_new, pages) = spec;
    let original = Money::from_cents(cents);

    let mut input = ItemInput::new(title, author, original.apply_percentage_discount(discount));
    input.year = Some(year);
    input.category = Some(category.to_string());
    input.discount = discount;
    input.original_price = (discount > 0).then_some(original);
    input.rating = rating;
    input.reviews_count = reviews;
    input.is_new = is_new;
    input.pages = pages;
    input.language = Some("English".to_string());
    input
}

fn shoe_input(&(title, brand, price, description): &(&str, &str, i64, &str)) -> ItemInput {
    let mut input = ItemInput::new(title, brand, Money::from_major_minor(price, 0));
    input.category = Some("Sneakers".to_string());
    input.description = Some(description.to_string());
    input.is_new = true;
    input
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./data/shelf.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Shelf Catalog Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./data/shelf.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Shelf Catalog Seed Data Generator");
    println!("====================================");
    println!("Database: {}", db_path);
    println!();

    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let inputs: Vec<ItemInput> = BOOKS
        .iter()
        .map(book_input)
        .chain(SHOES.iter().map(shoe_input))
        .collect();

    // Space the timestamps so "new arrivals" has a stable order
    let start = Utc::now() - Duration::minutes(inputs.len() as i64);
    let mut generated = 0;

    for (offset, input) in inputs.iter().enumerate() {
        let now = start + Duration::minutes(offset as i64);
        if let Err(e) = db.items().insert(&generate_item_id(), input, now).await {
            eprintln!("Failed to insert {}: {}", input.title, e);
            continue;
        }
        generated += 1;
    }

    println!("✓ Generated {} items", generated);

    let categories = db.items().categories().await?;
    println!("  Categories: {}", categories.join(", "));

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
