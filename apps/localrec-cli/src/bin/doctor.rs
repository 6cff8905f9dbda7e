//! Environment report: platform, configuration, project files, an engine
//! smoke test, and available system resources.

use std::path::Path;

use sysinfo::System;

use localrec_cli::{init_logging, print_banner};
use localrec_core::config::Config;
use localrec_engine::RecommendationEngine;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

fn main() -> anyhow::Result<()> {
    init_logging();
    println!("🔍 localrec environment verification 🔍");

    print_banner("=== Build & Platform ===");
    println!("Package: {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("Target: {}-{}", std::env::consts::ARCH, std::env::consts::OS);
    println!("OS: {} {}", System::name().unwrap_or_default(), System::os_version().unwrap_or_default());
    println!("Executable: {}", std::env::current_exe().map(|p| p.display().to_string()).unwrap_or_else(|_| "unknown".into()));

    print_banner("=== Configuration ===");
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => { println!("❌ Config: {e}"); return Ok(()); }
    };
    let settings = config.settings()?;
    println!("RUST_ENV: {}", std::env::var("RUST_ENV").unwrap_or_else(|_| "dev".into()));
    println!("Base directory: {}", config.base_dir().display());
    println!("Stop words: {:?}", settings.vectorizer.stop_words);
    println!("Lowercase: {}  Min term length: {}", settings.vectorizer.lowercase, settings.vectorizer.min_term_len);
    println!("Default top-k: {}  Train policy: {:?}", settings.recommend.default_top_k, settings.recommend.train_policy);

    print_banner("=== Project Files ===");
    let catalog_path = config.catalog_path()?;
    report_file(&catalog_path);
    for name in ["config.toml", "config.dev.toml", "config.prod.toml"] {
        report_file(&config.base_dir().join(name));
    }

    print_banner("=== Recommendation Engine Test ===");
    smoke_test(&config);

    print_banner("=== System Compatibility ===");
    let sys = System::new_all();
    let total = sys.total_memory() as f64;
    let available = sys.available_memory() as f64;
    println!("Total Memory: {:.2} GB", total / GIB);
    println!("Available Memory: {:.2} GB", available / GIB);
    if total > 0.0 { println!("Memory Usage: {:.1}%", (total - available) / total * 100.0); }
    println!("CPU Cores: {}", sys.cpus().len());
    Ok(())
}

fn report_file(path: &Path) {
    match std::fs::metadata(path) {
        Ok(meta) => println!("✅ {}: EXISTS ({} bytes)", path.display(), meta.len()),
        Err(_) => println!("❌ {}: NOT FOUND", path.display()),
    }
}

fn smoke_test(config: &Config) {
    let mut engine = match RecommendationEngine::from_config(config) {
        Ok(engine) => engine,
        Err(e) => { println!("❌ Engine setup failed: {e}"); return; }
    };
    println!("Loading data...");
    match engine.load() {
        Ok(count) => println!("✅ Data Loaded Successfully ({count} products)"),
        Err(e) => { println!("❌ Failed to load data: {e}"); return; }
    }
    println!("Training model...");
    if let Err(e) = engine.train() { println!("❌ Training failed: {e}"); return; }
    println!("✅ Model Trained Successfully");
    println!("Generating recommendations...");
    match engine.recommend(None, 5) {
        Ok(recs) => {
            println!("✅ Recommendations Generated Successfully");
            for item in recs {
                println!("- {} (Category: {}, Price: ${:.2})", item.name, item.category, item.price);
            }
        }
        Err(e) => println!("❌ Failed to generate recommendations: {e}"),
    }
}
