/// Bid ledger rendering: a pure projection of the bid history, most recent
/// first, with the winning bid flagged. No network, no mutable state.
// region:    --- Imports
use crate::auction::model::Bid;
use chrono::{DateTime, Utc};

// endregion: --- Imports

// region:    --- Ledger

/// One row of the rendered ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub bid_id: i64,
    pub bidder_label: String,
    pub amount: f64,
    pub placed_at: DateTime<Utc>,
    pub winning: bool,
}

/// Project the bid list into display rows, descending by placement time.
/// An empty bid list yields an empty row list (the caller renders the
/// empty-state affordance).
pub fn ledger_rows(bids: &[Bid], winning_bid_id: Option<i64>) -> Vec<LedgerRow> {
    let mut rows: Vec<LedgerRow> = bids
        .iter()
        .map(|bid| LedgerRow {
            bid_id: bid.id,
            bidder_label: bid.bidder_label.clone(),
            amount: bid.amount,
            placed_at: bid.placed_at,
            winning: winning_bid_id == Some(bid.id),
        })
        .collect();
    rows.sort_by(|a, b| b.placed_at.cmp(&a.placed_at).then(b.bid_id.cmp(&a.bid_id)));
    rows
}

/// Basic locale-style currency formatting with thousands grouping.
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}€{grouped},{fraction:02}")
}

// endregion: --- Ledger

// region:    --- Tests

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn bid(id: i64, amount: f64, placed_minutes_ago: i64) -> Bid {
        Bid {
            id,
            auction_id: 7,
            bidder_id: id,
            bidder_label: format!("Bidder {id}"),
            amount,
            placed_at: Utc::now() - Duration::minutes(placed_minutes_ago),
        }
    }

    #[test]
    fn rows_are_most_recent_first_and_winner_is_flagged() {
        let bids = vec![bid(1, 100.0, 30), bid(2, 150.0, 20), bid(3, 200.0, 10)];
        let rows = ledger_rows(&bids, Some(3));

        assert_eq!(rows[0].bid_id, 3);
        assert!(rows[0].winning);
        assert_eq!(rows[1].bid_id, 2);
        assert!(!rows[1].winning);
        assert_eq!(rows[2].bid_id, 1);
    }

    #[test]
    fn empty_bids_yield_empty_rows() {
        assert!(ledger_rows(&[], None).is_empty());
    }

    #[test]
    fn amounts_format_with_grouping() {
        assert_eq!(format_amount(1234.5), "€1.234,50");
        assert_eq!(format_amount(50.0), "€50,00");
        assert_eq!(format_amount(1_000_000.0), "€1.000.000,00");
    }
}

// endregion: --- Tests
