//! Fractional ranking and tie counting.

use std::cmp::Ordering;

/// 1-based ranks of `values`, with tied values sharing the mean of the ranks
/// they span.
///
/// Two values tied for positions 3 and 4 both receive rank 3.5.
#[must_use]
pub fn fractional_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| values[i].partial_cmp(&values[j]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let value = values[order[start]];
        let end = start + order[start..].iter().take_while(|&&k| values[k] == value).count();
        // Positions start..end hold ranks start+1..=end; their mean:
        let rank = (start + end + 1) as f64 / 2.0;
        for &k in &order[start..end] {
            ranks[k] = rank;
        }
        start = end;
    }
    ranks
}

/// Number of tied pairs, `sum t * (t - 1) / 2` over runs of equal adjacent
/// values. `sorted` must already be sorted.
#[must_use]
pub fn tied_pairs(sorted: &[f64]) -> u64 {
    sorted
        .chunk_by(|x, y| x == y)
        .map(|run| {
            let t = run.len() as u64;
            t * (t - 1) / 2
        })
        .sum()
}
