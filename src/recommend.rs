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

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use fnv::FnvHashMap;
use scoped_pool::Pool;
use tracing::{debug, info};

use crate::error::{RecommendError, Result};
use crate::ranking::{self, ScoredItem};
use crate::similarity::Similarity;
use crate::types::{self, ItemNeighborhoodTable, PreferenceMatrix, RankedRecommendation, Ratings};

/// Number of neighbors precomputed per item unless asked otherwise
pub const DEFAULT_NUM_NEIGHBORS: usize = 10;

/// The neighborhood builder reports its progress every that many items
pub const PROGRESS_INTERVAL: usize = 100;

/// Decides which stored ratings count as "not rated yet".
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UnratedPolicy {
    /// Only items without an entry are unrated
    Absent,
    /// Items without an entry or with a stored rating of exactly zero are unrated. Needed for
    /// rectangular indicator matrices, which store 0.0 for every item an entity never touched.
    AbsentOrZero,
}

impl Default for UnratedPolicy {
    fn default() -> Self {
        UnratedPolicy::AbsentOrZero
    }
}

impl UnratedPolicy {
    pub fn has_rated(self, ratings: &Ratings, item: &str) -> bool {
        match ratings.get(item) {
            None => false,
            Some(rating) => !(self == UnratedPolicy::AbsentOrZero && *rating == 0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RecommendConfig {
    pub similarity: Similarity,
    pub unrated: UnratedPolicy,
}

#[derive(Clone, Copy, Debug)]
pub struct NeighborhoodConfig {
    pub num_neighbors: usize,
    pub similarity: Similarity,
    pub num_threads: usize,
}

impl Default for NeighborhoodConfig {
    fn default() -> Self {
        NeighborhoodConfig {
            num_neighbors: DEFAULT_NUM_NEIGHBORS,
            similarity: Similarity::default(),
            num_threads: num_cpus::get(),
        }
    }
}

/// Observer for the neighborhood builder, called with the number of finished items and the
/// total number of items.
pub type Progress<'a> = &'a (dyn Fn(usize, usize) + Sync);

/// Running sums for the weighted average of a single candidate item
#[derive(Default)]
struct WeightedSum {
    total: f64,
    similarity_sum: f64,
}

fn into_ranking(candidates: FnvHashMap<&str, WeightedSum>) -> RankedRecommendation {

    let mut rankings: RankedRecommendation = candidates.into_iter()
        .filter(|(_, sums)| sums.similarity_sum != 0.0)
        .map(|(item, sums)| ScoredItem::new(sums.total / sums.similarity_sum, item))
        .collect();

    ranking::sort_ranking(&mut rankings);

    rankings
}

/// Entity-based recommendation: ranks the items `person` has not rated by the similarity weighted
/// average rating of all other entities. Entities with a non-positive similarity to `person` are
/// ignored, so the ranking is empty if nobody resembles `person`.
pub fn get_recommendations(
    matrix: &PreferenceMatrix,
    person: &str,
    config: &RecommendConfig,
) -> Result<RankedRecommendation> {

    let ratings = types::ratings_of(matrix, person)?;

    let mut candidates: FnvHashMap<&str, WeightedSum> = FnvHashMap::default();

    for (other, other_ratings) in matrix.iter() {

        if other == person {
            continue;
        }

        let similarity = config.similarity.between(ratings, other_ratings);

        if similarity <= 0.0 {
            continue;
        }

        for (item, other_rating) in other_ratings.iter() {
            if !config.unrated.has_rated(ratings, item) {
                let sums = candidates.entry(item.as_str()).or_insert_with(WeightedSum::default);
                sums.total += other_rating * similarity;
                sums.similarity_sum += similarity;
            }
        }
    }

    debug!(person, num_candidates = candidates.len(), "scored entity-based candidates");

    Ok(into_ranking(candidates))
}

/// Precomputes the `num_neighbors` most similar items for every item of the matrix. The item rows
/// are scored in parallel on a thread pool, the matrix is only read during that phase.
pub fn calculate_similar_items(
    matrix: &PreferenceMatrix,
    config: &NeighborhoodConfig,
    progress: Option<Progress>,
) -> ItemNeighborhoodTable {

    let start = Instant::now();

    let item_prefs = types::transpose(matrix);

    let items: Vec<(&String, &Ratings)> = item_prefs.iter().collect();
    let num_items = items.len();

    let mut neighborhoods: Vec<Mutex<Vec<ScoredItem>>> = Vec::with_capacity(num_items);
    for _ in 0..num_items {
        neighborhoods.push(Mutex::new(Vec::new()));
    }

    let num_done = AtomicUsize::new(0);

    let pool = Pool::new(config.num_threads.max(1));

    pool.scoped(|scope| {
        for (&(item, item_ratings), neighborhood) in items.iter().zip(neighborhoods.iter()) {

            let reference_to_item_prefs = &item_prefs;
            let reference_to_num_done = &num_done;
            let num_neighbors = config.num_neighbors;
            let similarity = config.similarity;

            scope.execute(move || {
                let neighbors = ranking::top_matches_of_row(
                    reference_to_item_prefs,
                    item,
                    item_ratings,
                    num_neighbors,
                    similarity,
                );

                let mut neighbors_of_item = match neighborhood.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                *neighbors_of_item = neighbors;

                let done = reference_to_num_done.fetch_add(1, Ordering::SeqCst) + 1;
                if done % PROGRESS_INTERVAL == 0 || done == num_items {
                    if let Some(report) = progress {
                        report(done, num_items);
                    }
                }
            });
        }
    });

    pool.shutdown();

    let table: ItemNeighborhoodTable = items.into_iter()
        .zip(neighborhoods.into_iter())
        .map(|((item, _), neighborhood)| {
            let neighbors = match neighborhood.into_inner() {
                Ok(neighbors) => neighbors,
                Err(poisoned) => poisoned.into_inner(),
            };
            (item.clone(), neighbors)
        })
        .collect();

    info!(
        num_items,
        num_neighbors = config.num_neighbors,
        similarity = %config.similarity,
        duration_ms = start.elapsed().as_millis() as u64,
        "computed item neighborhoods"
    );

    table
}

/// Item-based recommendation: ranks the items `user` has no entry for by the similarity weighted
/// average of the user's own ratings of the neighboring items. Every stored rating counts as
/// rated here, a stored 0.0 included. Requires a neighborhood table computed by
/// `calculate_similar_items` from the same matrix.
pub fn get_recommended_items(
    matrix: &PreferenceMatrix,
    item_match: &ItemNeighborhoodTable,
    user: &str,
) -> Result<RankedRecommendation> {

    let user_ratings = types::ratings_of(matrix, user)?;

    let mut candidates: FnvHashMap<&str, WeightedSum> = FnvHashMap::default();

    for (item, rating) in user_ratings.iter() {

        let neighbors = item_match.get(item)
            .ok_or_else(|| RecommendError::MissingNeighborhood(item.clone()))?;

        for neighbor in neighbors.iter() {
            if !user_ratings.contains_key(&neighbor.item) {
                let sums = candidates.entry(neighbor.item.as_str())
                    .or_insert_with(WeightedSum::default);
                sums.total += neighbor.score * rating;
                sums.similarity_sum += neighbor.score;
            }
        }
    }

    debug!(user, num_candidates = candidates.len(), "scored item-based candidates");

    Ok(into_ranking(candidates))
}
