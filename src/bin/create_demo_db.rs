use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use kasku::{
    ensure_default_categories, initialize_db,
    models::{PasswordHash, Transaction, TransactionType, ValidatedPassword},
    stores::{
        CategoryStore, NewUser, TransactionStore, UserStore,
        sqlite::{SQLiteCategoryStore, SQLiteTransactionStore, SQLiteUserStore},
    },
};

/// A utility for creating a demo database for the Kasku API server.
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

    let connection = Arc::new(Mutex::new(conn));
    let mut user_store = SQLiteUserStore::new(connection.clone());
    let mut category_store = SQLiteCategoryStore::new(connection.clone());
    let mut transaction_store = SQLiteTransactionStore::new(connection);

    println!("Creating demo user mockuser@email.com...");

    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked("mockpassword"),
        PasswordHash::DEFAULT_COST,
    )?;

    let user = user_store.create(NewUser {
        email: "mockuser@email.com".parse()?,
        password_hash,
        name: Some("Mock User".to_owned()),
        business_name: Some("Mock Business".to_owned()),
        business_owner: Some("Mock Owner".to_owned()),
        phone_number: Some("+628123456789".to_owned()),
    })?;

    println!("Seeding default categories...");
    ensure_default_categories(&mut category_store, user.id())?;

    let categories = category_store.get_by_user(user.id())?;
    let income_categories: Vec<_> = categories
        .iter()
        .filter(|category| category.category_type() == TransactionType::Income)
        .collect();
    let expense_categories: Vec<_> = categories
        .iter()
        .filter(|category| category.category_type() == TransactionType::Expense)
        .collect();

    println!("Seeding demo transactions...");

    let now = OffsetDateTime::now_utc();

    for i in 0..5 {
        let date = now - Duration::days(i as i64);

        let income = Transaction::build(
            TransactionType::Income,
            1_000_000.0 + 100_000.0 * i as f64,
            date,
            format!("Mock Income {}", i + 1),
            income_categories[i % income_categories.len()].id(),
            user.id(),
        )?;
        transaction_store.create(income)?;

        let expense = Transaction::build(
            TransactionType::Expense,
            500_000.0 + 50_000.0 * i as f64,
            date,
            format!("Mock Expense {}", i + 1),
            expense_categories[i % expense_categories.len()].id(),
            user.id(),
        )?;
        transaction_store.create(expense)?;
    }

    println!("Success!");
    println!("Log in with mockuser@email.com and the password 'mockpassword'.");

    Ok(())
}
