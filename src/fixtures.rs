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

// Small matrices shared by the tests of all modules.

use crate::types::{self, PreferenceMatrix};

pub fn matrix(rows: &[(&str, &[(&str, f64)])]) -> PreferenceMatrix {
    let mut matrix = types::new_preference_matrix(rows.len());

    for &(entity, ratings) in rows {
        let row = matrix.entry(entity.to_owned())
            .or_insert_with(|| types::new_ratings(ratings.len()));

        for &(item, rating) in ratings {
            row.insert(item.to_owned(), rating);
        }
    }

    matrix
}

/// Movie critics and their ratings of a small set of movies
pub fn critics() -> PreferenceMatrix {
    matrix(&[
        ("Lisa Rose", &[
            ("Lady in the water", 2.5),
            ("Snakes on a plane", 3.5),
            ("Just my luck", 3.0),
            ("Superman returns", 3.5),
            ("You, me and dupree", 2.5),
            ("The night listener", 3.0),
        ]),
        ("Gene Seymour", &[
            ("Lady in the water", 3.0),
            ("Snakes on a plane", 3.5),
            ("Just my luck", 1.5),
            ("Superman returns", 5.0),
            ("The night listener", 3.0),
            ("You, me and dupree", 3.5),
        ]),
        ("Michael Phillips", &[
            ("Lady in the water", 2.5),
            ("Snakes on a plane", 3.0),
            ("Just my luck", 1.5),
            ("Superman returns", 3.5),
            ("The night listener", 4.0),
        ]),
        ("Claudia Puig", &[
            ("Snakes on a plane", 3.5),
            ("Just my luck", 3.0),
            ("Superman returns", 4.0),
            ("You, me and dupree", 2.5),
            ("The night listener", 4.5),
        ]),
        ("Mick LaSalle", &[
            ("Lady in the water", 3.0),
            ("Snakes on a plane", 4.0),
            ("Just my luck", 2.0),
            ("Superman returns", 3.0),
            ("You, me and dupree", 2.0),
            ("The night listener", 3.0),
        ]),
        ("Jack Matthews", &[
            ("Lady in the water", 3.0),
            ("Snakes on a plane", 4.0),
            ("Superman returns", 5.0),
            ("You, me and dupree", 3.5),
            ("The night listener", 3.0),
        ]),
        ("Toby", &[
            ("Snakes on a plane", 4.5),
            ("Superman returns", 4.0),
            ("You, me and dupree", 1.0),
        ]),
    ])
}

/// Which movie genres a few viewers follow, rows are deliberately ragged
pub fn topics() -> PreferenceMatrix {
    matrix(&[
        ("Argenti", &[
            ("Sci-fi", 1.0), ("Action", 1.0), ("Grotesque", 0.0), ("Horror", 0.0),
            ("Erotic", 1.0), ("War", 0.0), ("Gay", 0.0), ("Drama", 0.0), ("Crime", 0.0),
            ("Classics", 0.0), ("Thriller", 1.0),
        ]),
        ("Trulli", &[
            ("Sci-fi", 1.0), ("Action", 1.0), ("Grotesque", 0.0), ("Horror", 0.0),
            ("Erotic", 0.0), ("War", 1.0), ("Gay", 0.0), ("Drama", 0.0), ("Crime", 1.0),
            ("Classics", 0.0), ("Thriller", 0.0), ("Historic", 0.0),
        ]),
        ("Cazzaniga", &[
            ("Sci-fi", 0.0), ("Grotesque", 1.0), ("Horror", 1.0), ("Erotic", 0.0),
            ("War", 0.0), ("Gay", 1.0), ("Crime", 0.0), ("Classics", 0.0), ("Thriller", 0.0),
            ("Porn", 1.0), ("Historic", 1.0),
        ]),
        ("Albini", &[
            ("Sci-fi", 1.0), ("Action", 1.0), ("Grotesque", 0.0), ("Horror", 1.0),
            ("War", 1.0), ("Gay", 1.0), ("Drama", 0.0), ("Crime", 1.0), ("Classics", 0.0),
            ("Thriller", 0.0), ("Porn", 1.0), ("Historic", 1.0),
        ]),
    ])
}
