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

use std::fs::File;
use std::io::prelude::*;
use std::io::stdout;
use std::path::Path;

use fnv::FnvHashMap;
use serde_derive::Serialize;
use tracing::info;

use crate::error::{RecommendError, Result};
use crate::ranking::ScoredItem;
use crate::types::{self, ItemNeighborhoodTable, PreferenceMatrix};

/// Reads a CSV input file. We expect NO headers, and the given separator between fields.
pub fn csv_reader(path: &Path, delimiter: u8) -> Result<csv::Reader<File>> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .quoting(false)
        .flexible(true)
        .from_path(path)?;

    Ok(reader)
}

fn line_of(record: &csv::ByteRecord) -> u64 {
    record.position().map(|position| position.line()).unwrap_or(0)
}

/// MovieLens files are ISO-8859-1 encoded, every byte maps to the char with the same code point.
fn latin1_field(record: &csv::ByteRecord, index: usize) -> String {
    record.get(index)
        .map(|bytes| bytes.iter().map(|&byte| byte as char).collect())
        .unwrap_or_default()
}

fn parse_rating(record: &csv::ByteRecord, index: usize) -> Result<f64> {
    let value = latin1_field(record, index);

    match value.trim().parse::<f64>() {
        Ok(rating) if rating.is_finite() => Ok(rating),
        _ => Err(RecommendError::InvalidRating { value, line: line_of(record) }),
    }
}

fn add_rating(matrix: &mut PreferenceMatrix, entity: String, item: String, rating: f64) {
    matrix.entry(entity)
        .or_insert_with(|| types::new_ratings(10))
        .insert(item, rating);
}

/// Reads a preference matrix from a tab separated file with an entity, an item and a rating
/// per line.
pub fn read_ratings(path: &Path) -> Result<PreferenceMatrix> {

    let mut reader = csv_reader(path, b'\t')?;
    let mut matrix = types::new_preference_matrix(100);

    let mut num_ratings: u64 = 0;

    for record in reader.byte_records() {
        let record = record?;

        if record.len() == 1 && record[0].is_empty() {
            continue;
        }

        let rating = parse_rating(&record, 2)?;
        add_rating(&mut matrix, latin1_field(&record, 0), latin1_field(&record, 1), rating);

        num_ratings += 1;
    }

    info!(path = %path.display(), num_ratings, num_entities = matrix.len(), "read ratings");

    Ok(matrix)
}

/// Loads the MovieLens 100k dataset from its directory. Movie ids in `u.data` are resolved to the
/// titles listed in `u.item`, so the items of the resulting matrix are movie titles.
pub fn load_movielens(directory: &Path) -> Result<PreferenceMatrix> {

    let mut movies: FnvHashMap<String, String> = FnvHashMap::default();

    let mut item_reader = csv_reader(&directory.join("u.item"), b'|')?;
    for record in item_reader.byte_records() {
        let record = record?;
        if record.len() >= 2 {
            movies.insert(latin1_field(&record, 0), latin1_field(&record, 1));
        }
    }

    let mut matrix = types::new_preference_matrix(1000);
    let mut num_ratings: u64 = 0;

    let mut data_reader = csv_reader(&directory.join("u.data"), b'\t')?;
    for record in data_reader.byte_records() {
        let record = record?;

        if record.len() == 1 && record[0].is_empty() {
            continue;
        }

        let movie_id = latin1_field(&record, 1);
        let title = movies.get(&movie_id)
            .ok_or_else(|| RecommendError::UnknownItem(movie_id.clone()))?;

        let rating = parse_rating(&record, 2)?;
        add_rating(&mut matrix, latin1_field(&record, 0), title.clone(), rating);

        num_ratings += 1;
    }

    info!(
        directory = %directory.display(),
        num_movies = movies.len(),
        num_users = matrix.len(),
        num_ratings,
        "loaded MovieLens ratings"
    );

    Ok(matrix)
}

/// Struct used for JSON serialization of a ranking. Field names will be used in JSON.
#[derive(Serialize)]
struct Ranking<'a> {
    for_entity: &'a str,
    items: &'a [ScoredItem],
}

/// Struct used for JSON serialization of a single neighborhood.
#[derive(Serialize)]
struct Neighborhood<'a> {
    for_item: &'a str,
    neighbors: &'a [ScoredItem],
}

/// If an `output_path` is supplied, we write to a file at the specified path, otherwise, we output
/// to stdout.
fn output(output_path: Option<&Path>) -> Result<Box<dyn Write>> {
    let out: Box<dyn Write> = match output_path {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(stdout()),
    };

    Ok(out)
}

/// Outputs a ranking as a single line of JSON.
pub fn write_ranking(
    for_entity: &str,
    ranking: &[ScoredItem],
    output_path: Option<&Path>,
) -> Result<()> {

    let mut out = output(output_path)?;

    let ranking_as_json = serde_json::to_string(&Ranking { for_entity, items: ranking })?;
    writeln!(out, "{}", ranking_as_json)?;

    out.flush()?;

    Ok(())
}

/// Outputs the neighborhood table in JSON format, one line per item in the order of the item ids.
pub fn write_neighborhoods(table: &ItemNeighborhoodTable, output_path: Option<&Path>) -> Result<()> {

    let mut out = output(output_path)?;

    let mut items: Vec<&String> = table.keys().collect();
    items.sort();

    for item in items {
        let neighborhood = Neighborhood { for_item: item, neighbors: &table[item] };
        writeln!(out, "{}", serde_json::to_string(&neighborhood)?)?;
    }

    out.flush()?;

    Ok(())
}


#[cfg(test)]
mod tests {

    use std::fs;
    use std::path::Path;

    use crate::error::RecommendError;
    use crate::io;
    use crate::ranking::ScoredItem;
    use crate::types;

    fn write_file(directory: &Path, name: &str, content: &[u8]) {
        fs::write(directory.join(name), content).unwrap();
    }

    #[test]
    fn read_tab_separated_ratings() {
        let directory = tempfile::tempdir().unwrap();
        write_file(directory.path(), "ratings.tsv",
            b"alice\tapple\t4.5\nalice\tpony\t1\nbob\tapple\t2.0\n");

        let matrix = io::read_ratings(&directory.path().join("ratings.tsv")).unwrap();

        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix["alice"]["apple"], 4.5);
        assert_eq!(matrix["alice"]["pony"], 1.0);
        assert_eq!(matrix["bob"]["apple"], 2.0);
    }

    #[test]
    fn invalid_ratings_are_reported_with_their_line() {
        let directory = tempfile::tempdir().unwrap();
        write_file(directory.path(), "ratings.tsv", b"alice\tapple\t4.5\nbob\tapple\tgreat\n");

        match io::read_ratings(&directory.path().join("ratings.tsv")) {
            Err(RecommendError::InvalidRating { value, line }) => {
                assert_eq!(value, "great");
                assert_eq!(line, 2);
            },
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn missing_file_fails() {
        let directory = tempfile::tempdir().unwrap();
        assert!(io::read_ratings(&directory.path().join("missing.tsv")).is_err());
    }

    #[test]
    fn load_movielens_resolves_titles() {
        let directory = tempfile::tempdir().unwrap();
        write_file(directory.path(), "u.item",
            b"1|Toy Story (1995)|01-Jan-1995||http://example.org|0|0|1\n\
              2|Caf\xe9 au lait (1994)|01-Jan-1994||http://example.org|0|1|0\n");
        write_file(directory.path(), "u.data",
            b"196\t1\t3\t881250949\n186\t2\t5\t891717742\n196\t2\t1\t878887116\n");

        let matrix = io::load_movielens(directory.path()).unwrap();

        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix["196"]["Toy Story (1995)"], 3.0);
        assert_eq!(matrix["196"]["Caf\u{e9} au lait (1994)"], 1.0);
        assert_eq!(matrix["186"]["Caf\u{e9} au lait (1994)"], 5.0);
    }

    #[test]
    fn load_movielens_rejects_unknown_movies() {
        let directory = tempfile::tempdir().unwrap();
        write_file(directory.path(), "u.item", b"1|Toy Story (1995)|01-Jan-1995\n");
        write_file(directory.path(), "u.data", b"196\t7\t3\t881250949\n");

        match io::load_movielens(directory.path()) {
            Err(RecommendError::UnknownItem(id)) => assert_eq!(id, "7"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn write_ranking_as_json() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("ranking.json");

        let ranking = vec![ScoredItem::new(3.5, "pony"), ScoredItem::new(1.0, "dog")];
        io::write_ranking("alice", &ranking, Some(path.as_path())).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(fs::read_to_string(&path).unwrap().trim()).unwrap();

        assert_eq!(written["for_entity"], "alice");
        assert_eq!(written["items"][0]["item"], "pony");
        assert_eq!(written["items"][0]["score"], 3.5);
        assert_eq!(written["items"][1]["item"], "dog");
    }

    #[test]
    fn write_neighborhoods_sorted_by_item() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("neighborhoods.json");

        let mut table = types::ItemNeighborhoodTable::default();
        table.insert("pony".to_owned(), vec![ScoredItem::new(0.5, "apple")]);
        table.insert("apple".to_owned(), vec![ScoredItem::new(0.5, "pony")]);

        io::write_neighborhoods(&table, Some(path.as_path())).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = content.lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["for_item"], "apple");
        assert_eq!(lines[0]["neighbors"][0]["item"], "pony");
        assert_eq!(lines[1]["for_item"], "pony");
    }
}
