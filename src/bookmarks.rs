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

// Builds a user x link matrix from a social bookmarking service. Users are the people who posted
// the most popular links for a tag, an entry is 1.0 if the user posted the link and 0.0 otherwise.

use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::tanimoto;
use crate::types::{self, PreferenceMatrix};

/// A failed request to the bookmarking service, usually worth another try.
#[derive(Error, Debug)]
#[error("bookmark request failed: {0}")]
pub struct BookmarkError(pub String);

/// The queries we need from a bookmarking service.
pub trait BookmarkSource {
    /// Urls of the most posted links for a tag, most popular first
    fn popular_items(&self, tag: &str) -> Result<Vec<String>, BookmarkError>;
    /// Users who posted a link
    fn item_posters(&self, item: &str) -> Result<Vec<String>, BookmarkError>;
    /// Urls of all links posted by a user
    fn user_posts(&self, user: &str) -> Result<Vec<String>, BookmarkError>;
}

#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy { max_attempts: 3, delay: Duration::from_secs(4) }
    }
}

fn with_retry<T, F>(retry: &RetryPolicy, request: &str, mut fetch: F) -> Option<T>
    where F: FnMut() -> Result<T, BookmarkError> {

    for attempt in 1..=retry.max_attempts {
        match fetch() {
            Ok(result) => return Some(result),
            Err(failure) => {
                warn!(request, attempt, error = %failure, "bookmark request failed");
                if attempt < retry.max_attempts {
                    thread::sleep(retry.delay);
                }
            },
        }
    }

    None
}

/// Collects the users who posted one of the `count` most popular links for `tag`. Every user gets
/// an empty row.
pub fn initialize_user_dict<S: BookmarkSource>(
    source: &S,
    tag: &str,
    count: usize,
    retry: &RetryPolicy,
) -> PreferenceMatrix {

    let mut users = types::new_preference_matrix(count * 10);

    let popular = match with_retry(retry, tag, || source.popular_items(tag)) {
        Some(popular) => popular,
        None => {
            warn!(tag, "giving up on popular links");
            return users;
        },
    };

    for item in popular.iter().take(count) {
        match with_retry(retry, item, || source.item_posters(item)) {
            Some(posters) => {
                for user in posters {
                    users.entry(user).or_insert_with(|| types::new_ratings(0));
                }
            },
            None => warn!(item = item.as_str(), "skipping link, posters unavailable"),
        }
    }

    users
}

/// Marks the links posted by every user with 1.0 and rectangularizes the matrix with 0.0. Users
/// whose posts cannot be fetched within the retry budget are dropped.
pub fn fill_items<S: BookmarkSource>(
    source: &S,
    users: &PreferenceMatrix,
    retry: &RetryPolicy,
) -> PreferenceMatrix {

    let mut matrix = types::new_preference_matrix(users.len());

    for user in users.keys() {
        match with_retry(retry, user, || source.user_posts(user)) {
            Some(posts) => {
                let mut ratings = types::new_ratings(posts.len());
                for url in posts {
                    ratings.insert(url, 1.0);
                }
                debug!(user = user.as_str(), num_posts = ratings.len(), "fetched posts");
                matrix.insert(user.clone(), ratings);
            },
            None => warn!(user = user.as_str(), "skipping user, posts unavailable"),
        }
    }

    tanimoto::normalize(&matrix)
}

pub fn build_user_matrix<S: BookmarkSource>(
    source: &S,
    tag: &str,
    count: usize,
    retry: &RetryPolicy,
) -> PreferenceMatrix {
    let users = initialize_user_dict(source, tag, count, retry);
    fill_items(source, &users, retry)
}
