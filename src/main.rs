// =============================================================================
// crypto-squeeze — CLI market summary
// =============================================================================
//
// Runs one full opportunity scan over the catalog, then a detailed
// three-timeframe report for each recommended pair, printing both to stdout.

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crypto_squeeze::analyzer::{IndicatorSnapshot, PairAnalysis, PairAnalyzer};
use crypto_squeeze::coinbase::CoinbaseClient;
use crypto_squeeze::config::EngineConfig;
use crypto_squeeze::scanner::{Opportunity, OpportunityScanner};

const CONFIG_PATH: &str = "squeeze_config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = EngineConfig::load(CONFIG_PATH).unwrap_or_else(|e| {
        warn!(error = %e, "failed to load config, using defaults");
        EngineConfig::default()
    });

    // Env overrides.
    if let Ok(suffix) = std::env::var("SQUEEZE_QUOTE_SUFFIX") {
        config.quote_suffix = suffix;
    }
    if let Ok(min_volume) = std::env::var("SQUEEZE_MIN_VOLUME") {
        match min_volume.parse() {
            Ok(v) => config.min_volume_24h = v,
            Err(_) => warn!(value = %min_volume, "ignoring non-numeric SQUEEZE_MIN_VOLUME"),
        }
    }
    if let Ok(pairs) = std::env::var("SQUEEZE_PAIRS") {
        config.recommended_pairs = pairs
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
    }

    info!(
        quote_suffix = %config.quote_suffix,
        min_volume_24h = config.min_volume_24h,
        pairs = ?config.recommended_pairs,
        "starting market analysis"
    );

    let client = Arc::new(CoinbaseClient::new(config.request_interval()));

    // ── 1. Opportunity scan over the whole catalog ───────────────────────
    let scanner =
        OpportunityScanner::new(client.clone(), client.clone(), config.quote_suffix.as_str());
    let opportunities = scanner.scan(config.min_volume_24h).await;

    if opportunities.is_empty() {
        println!("\nNo opportunities found matching the current criteria.");
    } else {
        println!("\nFound {} market opportunities:", opportunities.len());
        for opp in &opportunities {
            print_opportunity(opp);
        }
    }

    // ── 2. Detailed report for the recommended pairs ─────────────────────
    println!("\nAnalyzing recommended cryptocurrency pairs...");
    let analyzer = PairAnalyzer::new(
        client.clone(),
        client.clone(),
        config.recommended_pairs.clone(),
    );
    let analyses = analyzer.analyze_recommended().await;

    if analyses.is_empty() {
        println!("\nNo detailed analysis available for recommended pairs.");
    } else {
        for analysis in &analyses {
            print_analysis(analysis);
        }
    }

    Ok(())
}

fn print_opportunity(opp: &Opportunity) {
    println!("\nProduct: {}", opp.pair);
    println!("Current Price: ${:.2}", opp.price);
    println!("24h Volume: ${:.2}", opp.volume_24h);
    println!("Signals: {}", opp.triggers.active().join(", "));
    println!("{}", "-".repeat(50));
}

fn print_analysis(analysis: &PairAnalysis) {
    println!("\n{} Analysis:", analysis.pair);
    println!("Current Price: ${:.2}", analysis.current_price);
    println!("24h Volume: ${:.2}", analysis.volume_24h);
    println!("24h Change: {:+.2}%", analysis.stats.price_change_pct_24h);

    println!("\nTechnical Metrics:");
    print_snapshot("Short-term (24h)", &analysis.short_term);
    print_snapshot("Medium-term (7d)", &analysis.medium_term);
    print_snapshot("Long-term (30d)", &analysis.long_term);

    println!("\nPrice Analysis:");
    match &analysis.momentum {
        Some(m) => println!("- Momentum: {} (Strength: {:.2}%)", m.trend, m.strength_pct),
        None => println!("- Momentum: n/a"),
    }
    match &analysis.trend {
        Some(t) => println!("- Trend: {} (Strength: {:.2})", t.direction, t.strength),
        None => println!("- Trend: n/a"),
    }
    match &analysis.levels {
        Some(band) => {
            println!("- Support Level: ${:.2}", band.support);
            println!("- Resistance Level: ${:.2}", band.resistance);
        }
        None => println!("- Support/Resistance: n/a"),
    }
    println!("{}", "-".repeat(50));
}

fn print_snapshot(label: &str, snapshot: &IndicatorSnapshot) {
    println!("{label}:");
    println!("- RSI: {}", fmt_value(snapshot.rsi, 2));
    println!("- Volume Trend: {}x", fmt_value(snapshot.volume_trend, 2));
    println!("- Volatility: {}", fmt_value(snapshot.volatility, 4));
}

/// Render an optional indicator value; missing values print as "n/a", never
/// as zero.
fn fmt_value(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "n/a".to_string(),
    }
}
