//! Generates the 30-day demo dataset and prints the headline statistics the
//! dashboard would render: overall correlation, strength label, and insights.
//!
//! Run with: cargo run --example demo_dashboard

use chrono::Utc;
use helio_core::generator::{self, GeneratorProfile};
use helio_core::{derive_insights, pearson, CorrelationStrength};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() {
    let profile = GeneratorProfile::default();
    let mut rng = ChaCha8Rng::from_entropy();
    let today = Utc::now().date_naive();

    let (activity, solar) = generator::generate_daily(&mut rng, &profile, today, 30);

    let commits: Vec<f64> = activity.iter().map(|d| f64::from(d.commits)).collect();
    let flux: Vec<f64> = solar.iter().map(|d| d.solar_flux).collect();
    let coefficient = pearson(&commits, &flux).expect("series are generated pairwise");
    let strength = CorrelationStrength::classify(coefficient);

    println!("=== 30-Day Demo Dataset ===\n");
    for (a, s) in activity.iter().zip(solar.iter()) {
        println!(
            "{}  commits {:>3}  prs {:>2}  issues {:>2}  |  flux {:>3.0}  sunspots {:>3}  kp {}",
            a.date, a.commits, a.pull_requests, a.issues, s.solar_flux, s.sunspots, s.geomagnetic
        );
    }

    println!(
        "\nPearson r = {:.3} ({})",
        coefficient,
        strength.label()
    );

    for insight in derive_insights(&activity, &solar) {
        println!("[{:?}] {}: {}", insight.kind, insight.title, insight.detail);
    }
}
