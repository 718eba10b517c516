//! Console summary of a finished run.

use console::style;

use crate::aggregate::Statistics;

/// Specialties listed in the summary.
const TOP_SPECIALTIES: usize = 10;

pub fn print_summary(stats: &Statistics, pages_visited: usize) {
    let separator = "─".repeat(50);

    println!();
    println!("{}", style("Scrape summary").bold());
    println!("{}", separator);
    println!("  {:<24} {:>8}", "Pages visited:", pages_visited);
    println!("  {:<24} {:>8}", "Practitioners:", stats.total_practitioners);
    println!("  {:<24} {:>8}", "Clinics:", stats.distinct_clinics);
    println!("  {:<24} {:>8}", "With bio:", stats.with_bio);
    match stats.average_rating {
        Some(avg) => println!(
            "  {:<24} {:>8} (avg {:.2})",
            "Rated:", stats.rated_count, avg
        ),
        None => println!("  {:<24} {:>8}", "Rated:", 0),
    }

    if !stats.by_state.is_empty() {
        println!();
        println!("{}", style("BY STATE").cyan().bold());
        for (state, count) in &stats.by_state {
            println!("  {:<24} {:>8}", state, count);
        }
    }

    let top = stats.top_specialties(TOP_SPECIALTIES);
    if !top.is_empty() {
        println!();
        println!("{}", style("TOP SPECIALTIES").cyan().bold());
        for (name, count) in top {
            println!("  {:<40} {:>8}", name, count);
        }
    }
}
