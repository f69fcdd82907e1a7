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

use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

use getopts::{Matches, Options};
use tracing::info;
use tracing_subscriber::EnvFilter;

use simreco::io;
use simreco::recommend::{self, NeighborhoodConfig, RecommendConfig, UnratedPolicy};
use simreco::{ranking, tanimoto, PreferenceMatrix, Similarity};

/// What to compute for the loaded matrix
enum Task {
    Recommendations { user: String, item_based: bool },
    Matches { user: String },
    Neighborhoods,
    SimilarTopics { topic: String },
}

struct Job {
    task: Task,
    n: usize,
    similarity: Similarity,
    unrated: UnratedPolicy,
    output_path: Option<PathBuf>,
}

fn main() {

    init_logging();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("i", "inputfile", "Input file name. The input consists of ratings of items by \
        users, one user, item and rating per line, separated by tabs.", "PATH");
    opts.optopt("m", "movielens", "Directory of the MovieLens 100k dataset (u.item and u.data), \
        used instead of an inputfile.", "DIR");
    opts.optopt("o", "outputfile", "Output file name (optional, output will be written to stdout \
        by default).", "PATH");
    opts.optopt("u", "user", "User to compute recommendations or matches for.", "NAME");
    opts.optopt("t", "topic", "Rank the topics most similar to this one by their Tanimoto \
        coefficient. Requires a binary input.", "NAME");
    opts.optopt("n", "num-results", "Number of results per user or item (optional, defaults to \
        5 for matches and topics and to 10 otherwise).", "NUMBER");
    opts.optopt("s", "similarity", "Similarity metric, 'distance' or 'correlation' (optional, \
        defaults to correlation).", "METRIC");
    opts.optflag("", "item-based", "Recommend from precomputed item neighborhoods.");
    opts.optflag("", "matches", "Output the most similar users instead of recommendations.");
    opts.optflag("", "neighborhoods", "Output the most similar items for every item.");
    opts.optflag("", "keep-zeros", "Treat stored zero ratings as rated for user-based \
        recommendations. Item-based recommendations always do.");
    opts.optflag("h", "help", "Print this help menu");

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(failure) => {
            let hint = failure.to_string();
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    if matches.opt_present("h") {
        return print_usage_and_exit(&program, opts, None);
    }

    if !matches.opt_present("i") && !matches.opt_present("m") {
        return print_usage_and_exit(
            &program,
            opts,
            Some("Please specify an inputfile via --inputfile or a dataset via --movielens."),
        );
    }

    let job = match job_from(&matches) {
        Ok(job) => job,
        Err(hint) => return print_usage_and_exit(&program, opts, Some(&hint)),
    };

    let matrix = match read_matrix(&matches) {
        Ok(matrix) => matrix,
        Err(failure) => {
            eprintln!("Could not read the input: {}", failure);
            process::exit(1);
        },
    };

    if let Err(failure) = run(&matrix, &job) {
        eprintln!("{}", failure);
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage_and_exit(
    program: &str,
    opts: Options,
    hint: Option<&str>
) {

    if let Some(hint) = hint {
        eprintln!("\n{}\n", hint);
    }

    let brief = format!("Usage: {} [options]", program);
    eprint!("{}", opts.usage(&brief));

    process::exit(if hint.is_some() { 2 } else { 0 });
}

fn job_from(matches: &Matches) -> Result<Job, String> {

    let user = matches.opt_str("u");

    let task = if let Some(topic) = matches.opt_str("t") {
        Task::SimilarTopics { topic }
    } else if matches.opt_present("neighborhoods") {
        Task::Neighborhoods
    } else {
        let user = user.ok_or_else(|| String::from("Please specify a user via --user."))?;
        if matches.opt_present("matches") {
            Task::Matches { user }
        } else {
            Task::Recommendations { user, item_based: matches.opt_present("item-based") }
        }
    };

    let default_n = match task {
        Task::Matches { .. } | Task::SimilarTopics { .. } => ranking::DEFAULT_NUM_MATCHES,
        _ => recommend::DEFAULT_NUM_NEIGHBORS,
    };

    let n: usize = matches.opt_get_default("n", default_n)
        .map_err(|failure| format!("Problem with option 'n': {}", failure))?;

    let similarity = match matches.opt_str("s") {
        Some(name) => name.parse::<Similarity>().map_err(|failure| failure.to_string())?,
        None => Similarity::default(),
    };

    let unrated = if matches.opt_present("keep-zeros") {
        UnratedPolicy::Absent
    } else {
        UnratedPolicy::AbsentOrZero
    };

    Ok(Job { task, n, similarity, unrated, output_path: matches.opt_str("o").map(PathBuf::from) })
}

fn read_matrix(matches: &Matches) -> simreco::Result<PreferenceMatrix> {
    match matches.opt_str("m") {
        Some(directory) => {
            info!("Reading MovieLens dataset from {}", directory);
            io::load_movielens(Path::new(&directory))
        },
        None => {
            let interactions_path = matches.opt_str("i").unwrap_or_default();
            info!("Reading ratings from {}", interactions_path);
            io::read_ratings(Path::new(&interactions_path))
        },
    }
}

fn run(matrix: &PreferenceMatrix, job: &Job) -> Result<(), Box<dyn Error>> {

    let output_path = job.output_path.as_deref();

    let neighborhood_config = NeighborhoodConfig {
        num_neighbors: job.n,
        similarity: job.similarity,
        ..NeighborhoodConfig::default()
    };

    let progress: recommend::Progress =
        &|done: usize, total: usize| info!("{} / {} items", done, total);

    match job.task {
        Task::Recommendations { ref user, item_based: false } => {
            let config = RecommendConfig { similarity: job.similarity, unrated: job.unrated };
            let mut rankings = recommend::get_recommendations(matrix, user, &config)?;
            rankings.truncate(job.n);
            io::write_ranking(user, &rankings, output_path)?;
        },
        Task::Recommendations { ref user, item_based: true } => {
            let config = NeighborhoodConfig {
                num_neighbors: recommend::DEFAULT_NUM_NEIGHBORS,
                ..neighborhood_config
            };
            let item_match = recommend::calculate_similar_items(matrix, &config, Some(progress));
            let mut rankings = recommend::get_recommended_items(matrix, &item_match, user)?;
            rankings.truncate(job.n);
            io::write_ranking(user, &rankings, output_path)?;
        },
        Task::Matches { ref user } => {
            let matches = ranking::top_matches(matrix, user, job.n, job.similarity)?;
            io::write_ranking(user, &matches, output_path)?;
        },
        Task::Neighborhoods => {
            let item_match =
                recommend::calculate_similar_items(matrix, &neighborhood_config, Some(progress));
            info!("Writing neighborhoods...");
            io::write_neighborhoods(&item_match, output_path)?;
        },
        Task::SimilarTopics { ref topic } => {
            let similar = tanimoto::similar_topics(matrix, topic, job.n)?;
            io::write_ranking(topic, &similar, output_path)?;
        },
    }

    Ok(())
}
