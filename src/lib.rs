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

// Similarity based collaborative filtering over sparse rating matrices: similarity metrics,
// top matches, user-based and item-based recommendations and Tanimoto topic overlap.

pub mod bookmarks;
pub mod error;
pub mod io;
pub mod ranking;
pub mod recommend;
pub mod similarity;
pub mod tanimoto;
pub mod types;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod usage_tests;

pub use crate::error::{RecommendError, Result};
pub use crate::ranking::{top_matches, ScoredItem, DEFAULT_NUM_MATCHES};
pub use crate::recommend::{
    calculate_similar_items,
    get_recommendations,
    get_recommended_items,
    NeighborhoodConfig,
    RecommendConfig,
    UnratedPolicy,
};
pub use crate::similarity::Similarity;
pub use crate::tanimoto::tanimoto_score;
pub use crate::types::{
    transpose,
    ItemNeighborhoodTable,
    PreferenceMatrix,
    RankedRecommendation,
    TransposedMatrix,
};
