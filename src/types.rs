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

use fnv::FnvHashMap;

use crate::error::{RecommendError, Result};
use crate::ranking::ScoredItem;

/// The ratings of a single entity, keyed by item
pub type Ratings = FnvHashMap<String, f64>;

/// Sparse entity x item matrix, an entity's row need not contain every item
pub type PreferenceMatrix = FnvHashMap<String, Ratings>;

/// Item x entity view of a `PreferenceMatrix`, see `transpose`
pub type TransposedMatrix = PreferenceMatrix;

/// Most similar items per item, each list sorted descending by score
pub type ItemNeighborhoodTable = FnvHashMap<String, Vec<ScoredItem>>;

/// Items sorted descending by their predicted score
pub type RankedRecommendation = Vec<ScoredItem>;

pub fn new_preference_matrix(num_rows: usize) -> PreferenceMatrix {
    FnvHashMap::with_capacity_and_hasher(num_rows, Default::default())
}

pub fn new_ratings(num_items: usize) -> Ratings {
    FnvHashMap::with_capacity_and_hasher(num_items, Default::default())
}

/// Looks up the row of an entity, an absent entity is a contract violation
pub fn ratings_of<'a>(matrix: &'a PreferenceMatrix, entity: &str) -> Result<&'a Ratings> {
    matrix.get(entity)
        .ok_or_else(|| RecommendError::UnknownEntity(entity.to_owned()))
}

/// Swaps the two key levels, so that items become rows and entities become columns.
pub fn transpose(matrix: &PreferenceMatrix) -> TransposedMatrix {

    let mut transposed = new_preference_matrix(matrix.len());

    for (entity, ratings) in matrix.iter() {
        for (item, rating) in ratings.iter() {
            transposed.entry(item.clone())
                .or_insert_with(|| new_ratings(matrix.len()))
                .insert(entity.clone(), *rating);
        }
    }

    transposed
}
