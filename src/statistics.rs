//! The monthly aggregation folds.
//!
//! Each fold consumes one filtered set (all transactions whose sale date
//! falls in the requested month, any year) and produces an independent
//! summary. The three folds share no state, so a caller can run them in any
//! order over the same slice.

use indexmap::IndexMap;
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::transaction::Transaction;

/// Sale totals for one month of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesTotals {
    /// The sum of `price` over sold transactions. Unsold items contribute
    /// zero by policy.
    pub total_sale_amount: f64,
    /// The number of sold transactions.
    pub total_sold_items: u64,
    /// The number of unsold transactions.
    pub total_not_sold_items: u64,
}

/// Fold the filtered set into its sale totals.
///
/// An empty set yields all-zero totals.
pub fn sales_totals(transactions: &[Transaction]) -> SalesTotals {
    let total_sale_amount = transactions
        .iter()
        .filter(|transaction| transaction.sold)
        .map(|transaction| transaction.price)
        .sum();
    let total_sold_items = transactions
        .iter()
        .filter(|transaction| transaction.sold)
        .count() as u64;
    let total_not_sold_items = transactions.len() as u64 - total_sold_items;

    SalesTotals {
        total_sale_amount,
        total_sold_items,
        total_not_sold_items,
    }
}

/// The labels for the ten fixed price buckets, in bucket order.
pub const PRICE_BUCKET_LABELS: [&str; 10] = [
    "0-100",
    "101-200",
    "201-300",
    "301-400",
    "401-500",
    "501-600",
    "601-700",
    "701-800",
    "801-900",
    "901-above",
];

/// Counts of transactions per fixed price bucket.
///
/// Buckets have inclusive upper bounds: [0,100], [101,200], ..., [801,900]
/// and [901,∞). Zero-count buckets are kept so that chart axes stay stable.
/// Serializes as an object keyed by [PRICE_BUCKET_LABELS] in bucket order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceHistogram {
    counts: [u64; 10],
}

impl PriceHistogram {
    /// The index of the bucket `price` falls in.
    ///
    /// Prices at or below 100 fall in the lowest bucket. Imported records
    /// never have negative prices (the seed importer rejects them), but the
    /// clamp keeps this function total.
    fn bucket_index(price: f64) -> usize {
        if price <= 100.0 {
            0
        } else {
            ((price / 100.0).ceil() as usize - 1).min(9)
        }
    }

    /// The count for the bucket at `index`, in bucket order.
    pub fn count(&self, index: usize) -> u64 {
        self.counts[index]
    }

    /// The total count across all buckets.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl Serialize for PriceHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (label, count) in PRICE_BUCKET_LABELS.iter().zip(self.counts) {
            map.serialize_entry(label, &count)?;
        }
        map.end()
    }
}

/// Fold the filtered set into a price histogram.
///
/// Each transaction increments exactly one bucket, regardless of whether it
/// was sold.
pub fn price_histogram(transactions: &[Transaction]) -> PriceHistogram {
    let mut histogram = PriceHistogram::default();

    for transaction in transactions {
        histogram.counts[PriceHistogram::bucket_index(transaction.price)] += 1;
    }

    histogram
}

/// Fold the filtered set into a map from category name to occurrence count.
///
/// Categories appear only once they occur at least once; keys iterate in
/// insertion order of first occurrence.
pub fn category_distribution(transactions: &[Transaction]) -> IndexMap<String, u64> {
    let mut distribution = IndexMap::new();

    for transaction in transactions {
        *distribution.entry(transaction.category.clone()).or_insert(0) += 1;
    }

    distribution
}
