//! Shared helpers for the `localrec` binaries: logging setup and result printing.

use localrec_core::{Item, ScoredItem};
use tracing_subscriber::EnvFilter;

/// Install a `RUST_LOG`-driven subscriber, defaulting to `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

pub fn print_banner(title: &str) {
    println!("\n{title}");
    println!("{}", "=".repeat(50));
}

pub fn print_similar(query: &str, recs: &[ScoredItem]) {
    println!("\n🔍 Recommendations for {query}:");
    if recs.is_empty() { println!("  (no other products in catalog)"); }
    for r in recs {
        println!("- {} (Category: {}, Price: ${:.2}) score={:.3}", r.item.name, r.item.category, r.item.price, r.score);
    }
}

pub fn print_category(category: &str, top_k: usize, items: &[Item]) {
    println!("\n🏷️ Top {top_k} Products in {category} Category:");
    if items.is_empty() { println!("  (no products in this category)"); }
    for item in items {
        println!("- {} (Price: ${:.2})", item.name, item.price);
    }
}

pub fn print_preview(items: &[Item]) {
    println!("\nProduct Data Preview:");
    println!("{:>6}  {:<28} {:<14} {:>9}", "id", "name", "category", "price");
    for item in items {
        println!("{:>6}  {:<28} {:<14} {:>9.2}", item.id, truncate(&item.name, 28), truncate(&item.category, 14), item.price);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max { s.to_string() } else { s.chars().take(max - 1).chain(std::iter::once('…')).collect() }
}
