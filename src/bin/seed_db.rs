use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::macros::date;

use salesdash::{Transaction, TransactionBuilder, initialize_db, insert_transactions};

/// A utility for creating a SQLite database populated with sample sale
/// records for manual testing of the reporting API.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Inserting sample sale records...");
    let inserted = insert_transactions(sample_transactions(), &conn)?;

    println!("Success! Inserted {} records.", inserted.len());

    Ok(())
}

/// A fixed catalogue of sale records spread across months, categories, price
/// bands and sold states.
fn sample_transactions() -> Vec<TransactionBuilder> {
    vec![
        Transaction::build("Wireless Mouse", 29.99, date!(2022 - 01 - 04))
            .description("Compact wireless mouse with USB receiver")
            .sold(true)
            .category(Some("electronics")),
        Transaction::build("Mechanical Keyboard", 119.0, date!(2022 - 01 - 18))
            .description("Tenkeyless mechanical keyboard, brown switches")
            .category(Some("electronics")),
        Transaction::build("Winter Jacket", 249.5, date!(2022 - 02 - 02))
            .description("Insulated winter jacket, water resistant")
            .sold(true)
            .category(Some("clothing")),
        Transaction::build("Running Shoes", 89.95, date!(2022 - 02 - 21))
            .description("Lightweight running shoes")
            .category(Some("clothing")),
        Transaction::build("Product 1", 50.0, date!(2022 - 03 - 02))
            .description("First sample product")
            .sold(true)
            .category(Some("misc")),
        Transaction::build("Product 2", 150.0, date!(2022 - 03 - 12))
            .description("Second sample product")
            .category(Some("misc")),
        Transaction::build("Bookshelf", 950.0, date!(2022 - 03 - 25))
            .description("Tall oak bookshelf")
            .sold(true)
            .category(Some("furniture")),
        Transaction::build("Desk Lamp", 45.5, date!(2022 - 04 - 07))
            .description("LED desk lamp with dimmer"),
        Transaction::build("Office Chair", 410.0, date!(2022 - 04 - 19))
            .description("Ergonomic office chair")
            .sold(true)
            .category(Some("furniture")),
        Transaction::build("Espresso Machine", 620.0, date!(2022 - 05 - 05))
            .description("Semi-automatic espresso machine")
            .category(Some("appliances")),
        Transaction::build("Blender", 75.0, date!(2022 - 05 - 23))
            .description("High speed blender, 1.5L jug")
            .sold(true)
            .category(Some("appliances")),
        Transaction::build("Gaming Monitor", 330.0, date!(2022 - 06 - 10))
            .description("27 inch 144Hz gaming monitor")
            .sold(true)
            .category(Some("electronics")),
        Transaction::build("Acoustic Guitar", 540.0, date!(2022 - 06 - 28))
            .description("Full size acoustic guitar with gig bag"),
        Transaction::build("Road Bike", 1450.0, date!(2022 - 07 - 08))
            .description("Aluminium frame road bike, 21 speed")
            .category(Some("sports")),
        Transaction::build("Yoga Mat", 25.0, date!(2022 - 07 - 15))
            .description("Non-slip yoga mat")
            .sold(true)
            .category(Some("sports")),
        Transaction::build("Smart Watch", 199.0, date!(2022 - 08 - 03))
            .description("Fitness tracking smart watch")
            .sold(true)
            .category(Some("electronics")),
        Transaction::build("Camping Tent", 185.0, date!(2022 - 08 - 26))
            .description("Three person dome tent")
            .category(Some("outdoors")),
        Transaction::build("Leather Boots", 160.0, date!(2022 - 09 - 09))
            .description("Handmade leather boots")
            .sold(true)
            .category(Some("clothing")),
        Transaction::build("Record Player", 285.0, date!(2022 - 10 - 14))
            .description("Belt drive turntable with built-in preamp"),
        Transaction::build("Air Fryer", 99.0, date!(2022 - 11 - 02))
            .description("4L air fryer")
            .sold(true)
            .category(Some("appliances")),
        Transaction::build("Board Game Bundle", 65.0, date!(2022 - 11 - 30))
            .description("Bundle of three strategy board games")
            .category(Some("toys")),
        Transaction::build("Electric Heater", 110.0, date!(2022 - 12 - 12))
            .description("Oil column electric heater")
            .sold(true)
            .category(Some("appliances")),
    ]
}
