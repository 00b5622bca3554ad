//! Analog search over a synthetic daily price series.
//!
//! Builds a noisy trending series, plants a copy of the most recent shape
//! (rescaled and shifted) further back in history, and asks the engine for
//! the ranked, non-overlapping analogs of the current segment.
//!
//! Run with: RUST_LOG=analog_rs=debug cargo run --release --example analog_search

use analog_rs::{AnalogConfig, Bar, DtwEngine, Series};
use chrono::{Days, NaiveDate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let n = 750;
    let window = 15;
    let start = NaiveDate::from_ymd_opt(2021, 1, 4).ok_or("bad start date")?;

    let mut opens: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64;
            100.0 + t * 0.05 + (t * 0.21).sin() * 4.0 + ((t * 7.1).sin() * (t * 3.3).cos()) * 0.8
        })
        .collect();

    // Plant the current shape at index 200, at a lower price level and scale
    let current: Vec<f64> = opens[n - window..].to_vec();
    for (k, v) in current.iter().enumerate() {
        opens[200 + k] = v * 0.6 - 20.0;
    }

    // Every seventh day has no trade, except inside the two copies of the shape
    let planted = 200..200 + window;
    let recent = n - window..n;
    let bars: Vec<Bar> = opens
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let gap = i % 7 == 6 && !planted.contains(&i) && !recent.contains(&i);
            let open = if gap { None } else { Some(v) };
            Bar::new(start + Days::new(i as u64), open)
        })
        .collect();
    let series = Series::from_bars(&bars)?.with_labels("DEMO.US", "daily");

    let config = AnalogConfig::new(window).with_min_score(60.0);
    let engine = DtwEngine::new(config)?;
    let report = engine.report(&series)?;

    println!("Analog Search");
    println!("=============");
    println!("Bars: {n} ({} with an open)", series.len());
    println!("Window length: {window}");
    println!("Analogs found: {}", report.results.len());
    for (rank, m) in report.results.iter().take(10).enumerate() {
        println!(
            "  #{:<2} {}  score {:.3}",
            rank + 1,
            m.starting_date,
            m.similarity_score
        );
    }

    println!("\nJSON:");
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
