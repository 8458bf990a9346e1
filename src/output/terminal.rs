// Colored terminal output for the end-of-run summary.
//
// The report files hold the full results; this is the short, scannable
// version printed after a run so you can sanity-check the corpus without
// opening them.

use colored::Colorize;

use crate::analysis::similarity::PairKey;
use crate::pipeline::analyze::RunSummary;

/// Display the run summary and the most similar pairs.
pub fn display_run(summary: &RunSummary, top_pairs: &[(&PairKey, f64)]) {
    println!("\n{}", "=== Analysis Complete ===".bold());
    println!("  Documents analyzed: {}", summary.documents_analyzed);
    if summary.documents_skipped > 0 {
        println!(
            "  Documents skipped:  {}",
            summary.documents_skipped.to_string().yellow()
        );
    }
    println!("  Pairs compared:     {}", summary.pairs_compared);

    if top_pairs.is_empty() {
        println!("\n  {}", "Not enough documents for pairwise comparison.".dimmed());
        return;
    }

    println!("\n  {}", "Most similar pairs:".bold());
    for (i, (pair, score)) in top_pairs.iter().enumerate() {
        let score_str = format!("{score:.3}");
        let colored_score = if *score >= 0.5 {
            score_str.bright_green()
        } else if *score >= 0.2 {
            score_str.bright_yellow()
        } else {
            score_str.dimmed()
        };
        println!("  {:>3}. {} {}", i + 1, colored_score, pair);
    }
    println!();
}
