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

#[cfg(test)]
mod tests {

    use crate::{
        calculate_similar_items,
        get_recommendations,
        get_recommended_items,
        tanimoto_score,
        top_matches,
        transpose,
        NeighborhoodConfig,
        PreferenceMatrix,
        RecommendConfig,
        Similarity,
    };
    use crate::fixtures;

    #[test]
    fn programmatic_usage() {

        /* Our input data is a sparse matrix of ratings, keyed by entity and item. The identifiers
           can be strings of arbitrary length and structure, and nobody has to rate everything. */
        let ratings: PreferenceMatrix = fixtures::matrix(&[
            ("alice", &[("apple", 5.0), ("dog", 1.0), ("pony", 4.0), ("bike", 2.0)]),
            ("bob", &[("apple", 4.5), ("dog", 1.5), ("pony", 4.0), ("tent", 4.5)]),
            ("charles", &[("apple", 1.0), ("dog", 5.0), ("bike", 4.0), ("tent", 1.0)]),
            ("dana", &[("apple", 5.0), ("dog", 2.0), ("tent", 4.0)]),
        ]);

        /* People similar to alice, according to the correlation of their shared ratings. */
        let neighbors = top_matches(&ratings, "alice", 2, Similarity::Correlation).unwrap();
        assert_eq!(neighbors.len(), 2);
        assert!(neighbors.iter().all(|neighbor| neighbor.item != "charles"));

        /* User-based recommendations aggregate the opinions of the people similar to alice. */
        let for_alice = get_recommendations(&ratings, "alice", &RecommendConfig::default()).unwrap();
        assert_eq!(for_alice.len(), 1);
        assert_eq!(for_alice[0].item, "tent");
        assert!(for_alice[0].score > 4.0);

        /* Item-based recommendations first precompute the most similar items per item, which can
           be reused for every user until the ratings change. */
        let config = NeighborhoodConfig { similarity: Similarity::Distance, ..Default::default() };
        let item_match = calculate_similar_items(&ratings, &config, None);
        assert_eq!(item_match.len(), transpose(&ratings).len());

        let for_dana = get_recommended_items(&ratings, &item_match, "dana").unwrap();
        assert_eq!(for_dana.len(), 2);
        assert_eq!(for_dana[0].item, "pony");
        assert_eq!(for_dana[1].item, "bike");

        /* Binary topic matrices can be compared with the Tanimoto coefficient. */
        let topics = fixtures::topics();
        assert_eq!(tanimoto_score(&topics, "Porn", "Historic").unwrap(), 1.0);
    }
}
