use std::env;

use anyhow::Context;

use localrec_cli::{init_logging, print_banner, print_category, print_preview, print_similar};
use localrec_core::config::Config;
use localrec_core::ItemId;
use localrec_engine::RecommendationEngine;

struct Args {
    cmd: Option<String>,
    rest: Vec<String>,
    json: bool,
}

fn parse_args() -> Args {
    let mut json = false;
    let mut positional = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            _ => positional.push(arg),
        }
    }
    let cmd = if positional.is_empty() { None } else { Some(positional.remove(0)) };
    Args { cmd, rest: positional, json }
}

fn usage() -> ! {
    eprintln!("Usage: localrec [--json] [similar <product_id> [k] | random [k] | category <name> [k]]");
    std::process::exit(1)
}

fn parse_k(arg: Option<&String>, default_k: usize) -> anyhow::Result<usize> {
    arg.map_or(Ok(default_k), |s| s.parse::<usize>().with_context(|| format!("invalid k '{s}'")))
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {e}"); e })?;
    let default_k = config.settings()?.recommend.default_top_k;
    let mut engine = RecommendationEngine::from_config(&config)?;
    let args = parse_args();

    match args.cmd.as_deref() {
        None => run_demo(&mut engine, default_k),
        Some("similar") => {
            let id: ItemId = args.rest.first().unwrap_or_else(|| usage()).parse().context("product_id must be an integer")?;
            let k = parse_k(args.rest.get(1), default_k)?;
            let recs = engine.recommend_scored(Some(id), k)?;
            if args.json { println!("{}", serde_json::to_string_pretty(&recs)?); } else { print_similar(&format!("Product ID {id}"), &recs); }
            Ok(())
        }
        Some("random") => {
            let k = parse_k(args.rest.first(), default_k)?;
            let recs = engine.recommend_scored(None, k)?;
            if args.json { println!("{}", serde_json::to_string_pretty(&recs)?); } else { print_similar("a random product", &recs); }
            Ok(())
        }
        Some("category") => {
            let category = args.rest.first().unwrap_or_else(|| usage());
            let k = parse_k(args.rest.get(1), default_k)?;
            let items = engine.recommend_by_category(category, k)?;
            if args.json { println!("{}", serde_json::to_string_pretty(&items)?); } else { print_category(category, k, &items); }
            Ok(())
        }
        Some(other) => { eprintln!("Unknown command: {other}"); usage() }
    }
}

/// Load, train, then show random, id-based and category-based recommendations.
/// A failing step is reported and the remaining steps still run.
fn run_demo(engine: &mut RecommendationEngine, k: usize) -> anyhow::Result<()> {
    print_banner("🚀 Recommendation System Initialization 🚀");
    match engine.load() {
        Ok(count) => {
            println!("✅ Loaded {count} products");
            if let Some(catalog) = engine.catalog() {
                print_preview(catalog.preview(5));
            }
        }
        Err(e) => { eprintln!("❌ Error loading data: {e}"); return Err(e.into()); }
    }

    print_banner("🧠 Training Recommendation Model");
    match engine.train() {
        Ok(()) => println!("✅ Recommendation model trained successfully"),
        Err(e) => { eprintln!("❌ Training failed: {e}"); return Err(e.into()); }
    }

    print_banner("🎲 Random Product Recommendations");
    match engine.recommend_scored(None, k) {
        Ok(recs) => print_similar("a random product", &recs),
        Err(e) => eprintln!("❌ {e}"),
    }

    print_banner("🔍 Specific Product Recommendations");
    println!("Recommending similar products to Product ID 2");
    match engine.recommend_scored(Some(2), k) {
        Ok(recs) => print_similar("Product ID 2", &recs),
        Err(e) => eprintln!("❌ {e}"),
    }

    print_banner("🏷️ Category-based Recommendations");
    for category in ["Electronics", "Wearables"] {
        match engine.recommend_by_category(category, k) {
            Ok(items) => print_category(category, k, &items),
            Err(e) => eprintln!("❌ Error in category recommendation: {e}"),
        }
    }
    Ok(())
}
