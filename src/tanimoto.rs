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

// Tanimoto overlap of topics in binary matrices, where an entity either follows a topic (1.0)
// or does not (0.0 or no entry at all).

use fnv::{FnvHashMap, FnvHashSet};

use crate::error::{RecommendError, Result};
use crate::ranking::{ScoredItem, TopK};
use crate::types::{self, PreferenceMatrix};

type Members<'a> = FnvHashSet<&'a str>;

/// Returns a rectangular copy of the matrix, in which every row holds every item that occurs
/// anywhere in the matrix. Missing entries are filled with 0.0, the input is left untouched.
pub fn normalize(matrix: &PreferenceMatrix) -> PreferenceMatrix {

    let all_items: FnvHashSet<&String> = matrix.values()
        .flat_map(|ratings| ratings.keys())
        .collect();

    let mut normalized = types::new_preference_matrix(matrix.len());

    for (entity, ratings) in matrix.iter() {
        let mut row = types::new_ratings(all_items.len());

        for item in all_items.iter() {
            let rating = ratings.get(*item).cloned().unwrap_or(0.0);
            row.insert((*item).clone(), rating);
        }

        normalized.insert(entity.clone(), row);
    }

    normalized
}

fn is_member(entity: &str, topic: &str, value: Option<&f64>) -> Result<bool> {
    match value {
        None => Ok(false),
        Some(value) if *value == 0.0 => Ok(false),
        Some(value) if *value == 1.0 => Ok(true),
        Some(value) => Err(RecommendError::NonBinaryValue {
            entity: entity.to_owned(),
            item: topic.to_owned(),
            value: *value,
        }),
    }
}

fn overlap(members_a: &Members<'_>, members_b: &Members<'_>) -> f64 {
    let num_shared = members_a.intersection(members_b).count();

    if num_shared == 0 {
        return 0.0;
    }

    num_shared as f64 / (members_a.len() + members_b.len() - num_shared) as f64
}

/// Entities following each topic, validates the whole matrix on the way.
fn members_per_topic(matrix: &PreferenceMatrix) -> Result<FnvHashMap<&str, Members<'_>>> {

    let mut members: FnvHashMap<&str, Members> = FnvHashMap::default();

    for (entity, ratings) in matrix.iter() {
        for (topic, value) in ratings.iter() {
            let topic_members = members.entry(topic.as_str()).or_insert_with(Members::default);
            if is_member(entity, topic, Some(value))? {
                topic_members.insert(entity.as_str());
            }
        }
    }

    Ok(members)
}

/// Tanimoto coefficient of two topics: the number of entities following both topics divided by
/// the number of entities following at least one of them. Topics without any shared follower
/// score 0.
pub fn tanimoto_score(matrix: &PreferenceMatrix, ref_topic: &str, other_topic: &str) -> Result<f64> {

    let mut ref_members = Members::default();
    let mut other_members = Members::default();

    let mut ref_topic_known = false;
    let mut other_topic_known = false;

    for (entity, ratings) in matrix.iter() {
        let ref_value = ratings.get(ref_topic);
        let other_value = ratings.get(other_topic);

        ref_topic_known |= ref_value.is_some();
        other_topic_known |= other_value.is_some();

        if is_member(entity, ref_topic, ref_value)? {
            ref_members.insert(entity.as_str());
        }
        if is_member(entity, other_topic, other_value)? {
            other_members.insert(entity.as_str());
        }
    }

    if !ref_topic_known {
        return Err(RecommendError::UnknownItem(ref_topic.to_owned()));
    }
    if !other_topic_known {
        return Err(RecommendError::UnknownItem(other_topic.to_owned()));
    }

    Ok(overlap(&ref_members, &other_members))
}

/// The `n` topics with the highest Tanimoto coefficient to `topic`, best first.
pub fn similar_topics(matrix: &PreferenceMatrix, topic: &str, n: usize) -> Result<Vec<ScoredItem>> {

    let members = members_per_topic(matrix)?;

    let topic_members = members.get(topic)
        .ok_or_else(|| RecommendError::UnknownItem(topic.to_owned()))?;

    let mut top_k = TopK::new(n);

    for (other_topic, other_members) in members.iter() {
        if *other_topic != topic {
            top_k.offer(ScoredItem::new(overlap(topic_members, other_members), other_topic));
        }
    }

    Ok(top_k.into_sorted_vec())
}
