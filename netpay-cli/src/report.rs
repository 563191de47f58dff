//! Plain-text report rendering for a scenario result.
//!
//! Everything here is display-only; amounts arrive already computed and
//! are merely formatted (thousands separators, no decimal places).

use netpay_core::{BracketCap, Jurisdiction, OverlayOutcome, ScenarioResult, Slab};
use rust_decimal::Decimal;

/// Formats an amount with thousands separators and no decimal places.
pub fn format_amount(value: Decimal) -> String {
    let rounded =
        value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < Decimal::ZERO {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats a fractional rate as a percentage, trailing zeros trimmed.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

fn format_cap(cap: BracketCap) -> String {
    match cap {
        BracketCap::Capped(limit) => format_amount(limit),
        BracketCap::OpenEnded => "∞".to_string(),
    }
}

fn print_slabs(slabs: &[Slab]) {
    println!("  {:>14}  {:>14}  {:>7}  {:>14}  {:>14}", "From", "To", "Rate", "Amount", "Tax");
    for slab in slabs {
        println!(
            "  {:>14}  {:>14}  {:>7}  {:>14}  {:>14}",
            format_amount(slab.from),
            format_cap(slab.to),
            format_rate(slab.rate),
            format_amount(slab.amount),
            format_amount(slab.tax),
        );
    }
}

/// Prints the full report for one evaluated scenario.
pub fn print_report(
    jurisdiction: Jurisdiction,
    result: &ScenarioResult,
) {
    let currency = jurisdiction.currency_code();

    println!("{}", jurisdiction.display_name());
    println!(
        "Total Comp (excl. Y1 RSU): {} {currency}",
        format_amount(result.figures.earned)
    );
    println!(
        "Total Comp (incl. Y1 RSU): {} {currency}",
        format_amount(result.figures.total)
    );
    println!();

    println!("Local Tax: {} {currency}", format_amount(result.local.tax));
    println!(
        "Net After Local Tax: {} {currency}",
        format_amount(result.local.net)
    );
    if !result.local.slabs.is_empty() {
        print_slabs(&result.local.slabs);
    }
    if let Some(detail) = &result.local.surcharge {
        println!(
            "  Base tax {} + surcharge {} ({}) + cess {}",
            format_amount(detail.base_tax),
            format_amount(detail.surcharge),
            format_rate(detail.surcharge_rate),
            format_amount(detail.cess),
        );
    }

    if let Some(usd) = &result.usd {
        println!();
        println!("Local Tax (USD): {}", format_amount(usd.local_tax_usd));
        println!(
            "Net After Local Tax (USD): {}",
            format_amount(usd.local_net_usd)
        );
    }

    println!();
    match &result.overlay {
        OverlayOutcome::Skipped(reason) => println!("US Overlay: skipped ({reason})"),
        OverlayOutcome::Computed(overlay) => {
            println!("US Overlay");
            println!(
                "  US Taxable Base (USD): {}",
                format_amount(overlay.taxable_base)
            );
            println!(
                "  US Tentative Tax (USD): {}",
                format_amount(overlay.tentative_tax)
            );
            println!(
                "  Foreign Tax Credit used (USD): {}",
                format_amount(overlay.credit_used)
            );
            println!("  US Tax Due (USD): {}", format_amount(overlay.tax_due));
            println!(
                "  Combined Tax (USD): {}",
                format_amount(overlay.combined_tax)
            );
            println!(
                "  Net After All Taxes (USD): {}",
                format_amount(overlay.combined_net)
            );
            if !overlay.slabs.is_empty() {
                print_slabs(&overlay.slabs);
            }
        }
    }
}
