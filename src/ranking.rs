/**
 * SimReco
 * Copyright (C) 2018 Sebastian Schelter
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde_derive::Serialize;

use crate::error::Result;
use crate::similarity::Similarity;
use crate::types::{self, PreferenceMatrix, Ratings};

/// Number of matches returned by `top_matches` unless asked otherwise
pub const DEFAULT_NUM_MATCHES: usize = 5;

/// A row or column id together with its score. Used for all rankings, and as entry of the
/// neighborhood tables.
#[derive(PartialEq, Clone, Debug, Serialize)]
pub struct ScoredItem {
    pub score: f64,
    pub item: String,
}

impl ScoredItem {
    pub fn new(score: f64, item: &str) -> Self {
        ScoredItem { score, item: item.to_owned() }
    }
}

/// Ordering for our max-heap, note that we must use a special implementation here as there is no
/// total order on floating point numbers. Better items compare as smaller, so the top of the heap
/// always holds the weakest of the current top-k. Equal scores fall back to the id, the greater
/// id ranks first.
fn cmp_reverse(scored_item_a: &ScoredItem, scored_item_b: &ScoredItem) -> Ordering {
    match scored_item_a.score.partial_cmp(&scored_item_b.score) {
        Some(Ordering::Less) => Ordering::Greater,
        Some(Ordering::Greater) => Ordering::Less,
        _ => scored_item_b.item.cmp(&scored_item_a.item),
    }
}

impl Eq for ScoredItem {}

impl Ord for ScoredItem {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_reverse(self, other)
    }
}

impl PartialOrd for ScoredItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(cmp_reverse(self, other))
    }
}

/// Keeps the `k` best of the scored items offered to it.
pub struct TopK {
    k: usize,
    heap: BinaryHeap<ScoredItem>,
}

impl TopK {

    pub fn new(k: usize) -> Self {
        TopK { k, heap: BinaryHeap::with_capacity(k) }
    }

    pub fn offer(&mut self, scored_item: ScoredItem) {
        if self.k == 0 {
            return;
        }

        if self.heap.len() < self.k {
            self.heap.push(scored_item);
        } else if let Some(mut top) = self.heap.peek_mut() {
            if scored_item < *top {
                *top = scored_item;
            }
        }
    }

    /// Best item first
    pub fn into_sorted_vec(self) -> Vec<ScoredItem> {
        self.heap.into_sorted_vec()
    }
}

/// Sorts a complete ranking in place, best item first.
pub fn sort_ranking(ranking: &mut [ScoredItem]) {
    ranking.sort();
}

/// Scores every other row of the matrix against the `reference` row and returns the `n` most
/// similar ones, best match first. The reference row never matches itself.
pub fn top_matches(
    matrix: &PreferenceMatrix,
    reference: &str,
    n: usize,
    similarity: Similarity,
) -> Result<Vec<ScoredItem>> {

    let reference_ratings = types::ratings_of(matrix, reference)?;

    Ok(top_matches_of_row(matrix, reference, reference_ratings, n, similarity))
}

/// Same as `top_matches`, for a reference row which has already been looked up.
pub(crate) fn top_matches_of_row(
    matrix: &PreferenceMatrix,
    reference: &str,
    reference_ratings: &Ratings,
    n: usize,
    similarity: Similarity,
) -> Vec<ScoredItem> {

    let mut top_k = TopK::new(n);

    for (other, other_ratings) in matrix.iter() {
        if other != reference {
            let score = similarity.between(reference_ratings, other_ratings);
            top_k.offer(ScoredItem::new(score, other));
        }
    }

    top_k.into_sorted_vec()
}
