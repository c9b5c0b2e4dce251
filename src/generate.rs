//! Synthetic messy order dataset generation.
//!
//! Produces the same families of quality defects the cleaning pipeline
//! repairs: exact duplicate rows, irregular whitespace, invalid emails,
//! punctuation-variant phone numbers, mixed date formats (including future
//! dates), currency-formatted prices, zero/negative quantities, and
//! category/status spelling variants. Seeded for reproducibility.

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate, Utc};
use log::info;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{cli::GenerateArgs, io_utils};

pub const HEADERS: [&str; 10] = [
    "order_id",
    "customer_name",
    "email",
    "phone",
    "order_date",
    "product_name",
    "category",
    "quantity",
    "price",
    "status",
];

const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Michael", "Sarah", "David", "Emily", "Robert", "Lisa", "William", "Maria",
    "James", "Jennifer", "Richard", "Linda", "Thomas", "Christopher", "Jessica", "Daniel",
    "Michelle", "Matthew",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Taylor", "Thomas", "Moore",
    "Jackson", "Martin", "Lee",
];

const PRODUCTS: &[(&str, &[&str])] = &[
    (
        "Electronics",
        &[
            "iPhone 13",
            "iphone 13",
            "IPHONE 13",
            "iPhone13",
            "Samsung Galaxy",
            "samsung galaxy",
            "SamsungGalaxy",
            "MacBook Pro",
            "MacBook  Pro",
            "AirPods",
            "Air Pods",
        ],
    ),
    (
        "Clothing",
        &[
            "Men's T-Shirt",
            "mens tshirt",
            "MEN'S T-SHIRT",
            "Jeans",
            "JEANS",
            "Running Shoes",
            "RunningShoes",
        ],
    ),
    (
        "Home & Garden",
        &[
            "Coffee Maker",
            "COFFEE MAKER",
            "CoffeeMaker",
            "Vacuum Cleaner",
            "VacuumCleaner",
        ],
    ),
    (
        "Books",
        &[
            "Python Programming",
            "PYTHON PROGRAMMING",
            "Data Science Handbook",
            "data science handbook",
        ],
    ),
];

const STATUS_VARIANTS: &[&str] = &[
    "Pending", "pending", "PENDING", "Pnding", "P", "Shipped", "shipped", "SHIPPED", "Shippd",
    "Ship", "Delivered", "delivered", "DELIVERED", "Deliverd", "Complete", "Cancelled",
    "cancelled", "CANCELLED", "Canceled", "CNCLLD",
];

pub fn execute(args: &GenerateArgs) -> Result<()> {
    let delimiter = io_utils::resolve_output_delimiter(
        args.output.as_deref(),
        args.delimiter,
        io_utils::DEFAULT_CSV_DELIMITER,
    );
    let rows = generate_rows(args.rows, args.seed, Utc::now().date_naive());

    let mut writer = io_utils::open_csv_writer(args.output.as_deref(), delimiter)?;
    writer
        .write_record(HEADERS)
        .context("Writing dataset headers")?;
    for (idx, row) in rows.iter().enumerate() {
        writer
            .write_record(row.iter())
            .with_context(|| format!("Writing row {}", idx + 2))?;
    }
    writer.flush().context("Flushing dataset writer")?;

    let destination = args
        .output
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());
    info!(
        "Generated {} messy row(s) (seed {}) -> {}",
        rows.len(),
        args.seed,
        destination
    );
    Ok(())
}

/// Missing values are represented as empty fields.
pub fn generate_rows(count: usize, seed: u64, today: NaiveDate) -> Vec<Vec<String>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(count);

    for i in 0..count {
        // A slice of the dataset repeats an earlier order verbatim so the
        // dedup stage has something to find. Copies are exact: every
        // non-duplicate row carries a distinct order_id, so two rows can
        // only become identical after cleaning if they started identical.
        if i > 20 && rng.gen_bool(0.15) {
            let source = rng.gen_range(i.saturating_sub(50)..i);
            rows.push(rows[source].clone());
            continue;
        }

        let first = pick(&mut rng, FIRST_NAMES);
        let last = pick(&mut rng, LAST_NAMES);
        let (category, products) = PRODUCTS[rng.gen_range(0..PRODUCTS.len())];

        rows.push(vec![
            order_id(&mut rng, i),
            customer_name(&mut rng, first, last),
            email(&mut rng, first, last),
            phone(&mut rng),
            order_date(&mut rng, today),
            pick(&mut rng, products).to_string(),
            category_variant(&mut rng, category),
            quantity(&mut rng),
            price(&mut rng),
            pick(&mut rng, STATUS_VARIANTS).to_string(),
        ]);
    }
    rows
}

fn pick<'a>(rng: &mut StdRng, items: &'a [&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

fn order_id(rng: &mut StdRng, i: usize) -> String {
    let number = 1000 + i;
    match rng.gen_range(0..5) {
        0 => format!("ORD{number}"),
        1 => format!("#{number}"),
        2 => format!("ORD-{number}"),
        3 => format!("{number}"),
        _ => format!("order{number}"),
    }
}

fn customer_name(rng: &mut StdRng, first: &str, last: &str) -> String {
    if !rng.gen_bool(0.4) {
        return format!("{first} {last}");
    }
    match rng.gen_range(0..5) {
        0 => format!("{first} {last}"),
        1 => format!("  {first}  {last}  "),
        2 => format!("{} {}", first.to_uppercase(), last.to_uppercase()),
        3 => format!("{} {}", first.to_lowercase(), last.to_lowercase()),
        _ => format!("{first}\t{last}"),
    }
}

fn email(rng: &mut StdRng, first: &str, last: &str) -> String {
    let first = first.to_lowercase();
    let last = last.to_lowercase();
    if rng.gen_bool(0.15) {
        return String::new();
    }
    if rng.gen_bool(0.12) {
        return match rng.gen_range(0..5) {
            0 => format!("{first}.{last}"),
            1 => format!("{first}@"),
            2 => format!("@{last}.com"),
            3 => format!("{first} {last}@email.com"),
            _ => "invalidemail".to_string(),
        };
    }
    let base = format!("{first}.{last}@example.com");
    if rng.gen_bool(0.3) {
        if rng.gen_bool(0.5) {
            base.to_uppercase()
        } else {
            format!("  {base}  ")
        }
    } else {
        base
    }
}

fn phone(rng: &mut StdRng) -> String {
    if rng.gen_bool(0.20) {
        return String::new();
    }
    let area = rng.gen_range(200..=999);
    let prefix = rng.gen_range(200..=999);
    let line = rng.gen_range(1000..=9999);
    match rng.gen_range(0..6) {
        0 => format!("({area})-{prefix}-{line}"),
        1 => format!("{area}-{prefix}-{line}"),
        2 => format!("{area}{prefix}{line}"),
        3 => format!("({area}) {prefix}-{line}"),
        4 => format!("+1-{area}-{prefix}-{line}"),
        _ => format!("{area}.{prefix}.{line}"),
    }
}

fn order_date(rng: &mut StdRng, today: NaiveDate) -> String {
    if rng.gen_bool(0.05) {
        let future = today + Days::new(rng.gen_range(1..=100));
        return future.format("%m/%d/%Y").to_string();
    }
    if rng.gen_bool(0.03) {
        return String::new();
    }
    let base = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(today)
        + Days::new(rng.gen_range(0..400));
    let fmt = match rng.gen_range(0..5) {
        0 => "%m/%d/%Y",
        1 => "%d-%m-%Y",
        2 => "%Y-%m-%d",
        3 => "%b %d, %Y",
        _ => "%d %B %Y",
    };
    base.format(fmt).to_string()
}

fn category_variant(rng: &mut StdRng, category: &str) -> String {
    if !rng.gen_bool(0.3) {
        return category.to_string();
    }
    match rng.gen_range(0..5) {
        0 => category.to_string(),
        1 => category.to_uppercase(),
        2 => category.to_lowercase(),
        3 => category.chars().take(4).collect(),
        _ => category.replace('&', "and"),
    }
}

fn quantity(rng: &mut StdRng) -> String {
    if rng.gen_bool(0.05) {
        return format!("-{}", rng.gen_range(1..=5));
    }
    if rng.gen_bool(0.05) {
        return "0".to_string();
    }
    rng.gen_range(1..=10).to_string()
}

fn price(rng: &mut StdRng) -> String {
    let base = rng.gen_range(999u32..=59999) as f64 / 100.0;
    if rng.gen_bool(0.25) {
        return format!("${base:.2}");
    }
    if rng.gen_bool(0.15) {
        // Thousands-separated rendering, e.g. $1,234.56 territory when the
        // random range allows it; small values just keep the symbol.
        let whole = base.trunc() as u64;
        let cents = ((base.fract() * 100.0).round()) as u64;
        return if whole >= 1000 {
            format!("${},{:03}.{cents:02}", whole / 1000, whole % 1000)
        } else {
            format!("${whole}.{cents:02}")
        };
    }
    if rng.gen_bool(0.05) {
        return String::new();
    }
    format!("{base:.2}")
}
