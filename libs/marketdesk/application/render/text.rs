//! Terminal rendering of a market snapshot

use crate::domain::{FxPanel, MarketSnapshot, Quote, QuoteOrigin, QuoteState, TechnicalLine};

const LABEL_WIDTH: usize = 14;

fn row(label: &str, quote: &Quote, note: &str) -> String {
    format!(
        "  {:<width$} {:>12} {:>8}  {:<7} {}\n",
        label,
        quote.price,
        quote.change,
        quote.direction.as_str(),
        note,
        width = LABEL_WIDTH
    )
}

fn origin_label(origin: Option<&QuoteOrigin>) -> String {
    match origin {
        Some(QuoteOrigin::Network(source)) => format!("[{source}]"),
        Some(QuoteOrigin::Approximation) => "[approximation]".to_string(),
        Some(QuoteOrigin::LocalFile) => "[market-data file]".to_string(),
        None => String::new(),
    }
}

fn state_row(label: &str, state: &QuoteState) -> String {
    match state {
        QuoteState::Succeeded { quote, origin } => row(label, quote, &origin_label(Some(origin))),
        QuoteState::Failed { reason } => {
            format!("  {:<width$} unavailable ({})\n", label, reason, width = LABEL_WIDTH)
        }
        other => format!(
            "  {:<width$} {}\n",
            label,
            other.name(),
            width = LABEL_WIDTH
        ),
    }
}

/// Plain-text table of the snapshot
pub fn snapshot_table(snapshot: &MarketSnapshot) -> String {
    let mut out = format!("Market snapshot, {}\n", snapshot.captured_label());
    if let Some(label) = &snapshot.last_updated {
        out.push_str(&format!("Commentary last updated: {label}\n"));
    }

    match &snapshot.fx_majors {
        FxPanel::Loaded { majors, source } => {
            out.push_str(&format!("\nFX Majors [{source}]\n"));
            for (pair, quote) in majors.rows() {
                out.push_str(&row(pair, quote, ""));
            }
        }
        FxPanel::Unavailable { reason } => {
            out.push_str(&format!("\nFX Majors\n  unavailable ({reason})\n"));
        }
    }

    out.push_str("\nRates & Indices\n");
    out.push_str(&state_row("USD/INR", &snapshot.usdinr));
    out.push_str(&state_row("DXY", &snapshot.dollar_index));
    out.push_str(&state_row("Nifty 50", &snapshot.nifty));
    out.push_str(&state_row("Bank Nifty", &snapshot.bank_nifty));

    let comments = snapshot.comments_or_default();

    out.push_str("\nFPI/DII Activity\n");
    for flow in comments.fpi_dii_rows() {
        out.push_str(&format!(
            "  {:<width$} {:>12} {:>8}  {}\n",
            flow.label,
            flow.value,
            flow.note,
            flow.direction.as_str(),
            width = LABEL_WIDTH
        ));
    }

    out.push_str("\nTechnical Pulse\n");
    for line in comments.technical_lines() {
        match line {
            TechnicalLine::Labeled { label, text } => {
                out.push_str(&format!("  {label}: {text}\n"))
            }
            TechnicalLine::Plain { text } => out.push_str(&format!("  {text}\n")),
        }
    }

    out
}
