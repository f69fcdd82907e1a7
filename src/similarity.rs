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

use std::fmt;
use std::str::FromStr;

use crate::error::{RecommendError, Result};
use crate::types::{self, PreferenceMatrix, Ratings};

/// The similarity metrics we can compare two rows of a matrix with. Higher scores mean more
/// similar rows, both metrics are symmetric.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Similarity {
    /// `1 / (1 + euclidean distance)` over the shared items, in `(0, 1]`
    Distance,
    /// Pearson correlation over the shared items, in `[-1, 1]`
    Correlation,
}

impl Default for Similarity {
    fn default() -> Self {
        Similarity::Correlation
    }
}

impl Similarity {

    /// Similarity of the rows of `entity_a` and `entity_b`.
    pub fn score(self, matrix: &PreferenceMatrix, entity_a: &str, entity_b: &str) -> Result<f64> {
        let ratings_a = types::ratings_of(matrix, entity_a)?;
        let ratings_b = types::ratings_of(matrix, entity_b)?;

        Ok(self.between(ratings_a, ratings_b))
    }

    /// Similarity of two rows which have already been looked up.
    pub fn between(self, ratings_a: &Ratings, ratings_b: &Ratings) -> f64 {
        match self {
            Similarity::Distance => distance_score(ratings_a, ratings_b),
            Similarity::Correlation => correlation_score(ratings_a, ratings_b),
        }
    }
}

impl FromStr for Similarity {
    type Err = RecommendError;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "distance" | "euclidean" => Ok(Similarity::Distance),
            "correlation" | "pearson" => Ok(Similarity::Correlation),
            _ => Err(RecommendError::InvalidSimilarity(name.to_owned())),
        }
    }
}

impl fmt::Display for Similarity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Similarity::Distance => write!(f, "distance"),
            Similarity::Correlation => write!(f, "correlation"),
        }
    }
}

/// Pairs of ratings for the items both rows have rated
fn shared_ratings<'a>(
    ratings_a: &'a Ratings,
    ratings_b: &'a Ratings,
) -> impl Iterator<Item=(f64, f64)> + 'a {

    ratings_a.iter()
        .filter_map(move |(item, rating_a)| {
            ratings_b.get(item).map(|rating_b| (*rating_a, *rating_b))
        })
}

/// Euclidean distance based score. Rows without shared items are maximally dissimilar and
/// score 0.
pub fn distance_score(ratings_a: &Ratings, ratings_b: &Ratings) -> f64 {

    let mut num_shared = 0;
    let mut sum_of_squares = 0.0;

    for (rating_a, rating_b) in shared_ratings(ratings_a, ratings_b) {
        num_shared += 1;
        sum_of_squares += (rating_a - rating_b).powi(2);
    }

    if num_shared == 0 {
        return 0.0;
    }

    1.0 / (1.0 + sum_of_squares.sqrt())
}

/// Pearson correlation score. Returns 0 for rows without shared items and for rows whose
/// shared ratings have no variance.
pub fn correlation_score(ratings_a: &Ratings, ratings_b: &Ratings) -> f64 {

    let mut num_shared = 0;

    let mut sum_a = 0.0;
    let mut sum_b = 0.0;
    let mut sum_of_squares_a = 0.0;
    let mut sum_of_squares_b = 0.0;
    let mut sum_of_products = 0.0;

    for (rating_a, rating_b) in shared_ratings(ratings_a, ratings_b) {
        num_shared += 1;

        sum_a += rating_a;
        sum_b += rating_b;
        sum_of_squares_a += rating_a * rating_a;
        sum_of_squares_b += rating_b * rating_b;
        sum_of_products += rating_a * rating_b;
    }

    if num_shared == 0 {
        return 0.0;
    }

    let n = num_shared as f64;

    let numerator = sum_of_products - (sum_a * sum_b / n);
    let denominator = ((sum_of_squares_a - sum_a.powi(2) / n) *
        (sum_of_squares_b - sum_b.powi(2) / n)).sqrt();

    // Also catches the NaN of a tiny negative radicand caused by round off
    if denominator == 0.0 || denominator.is_nan() {
        return 0.0;
    }

    numerator / denominator
}
