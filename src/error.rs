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

use std::io;

use thiserror::Error;

/// Errors raised when a matrix or a lookup table violates the contract of an operation.
///
/// Empty overlaps, zero variance and missing positive similarities are not errors, they
/// yield neutral scores or empty rankings.
#[derive(Error, Debug)]
pub enum RecommendError {

    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// The item-based recommender was handed a table without an entry for a rated item.
    #[error("no neighborhood precomputed for item: {0}")]
    MissingNeighborhood(String),

    #[error("non-binary value {value} for item {item} of entity {entity}")]
    NonBinaryValue { entity: String, item: String, value: f64 },

    #[error("invalid rating {value:?} in line {line}")]
    InvalidRating { value: String, line: u64 },

    #[error("unknown similarity metric: {0} (expected: distance or correlation)")]
    InvalidSimilarity(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
