//! Sample dataset installed when no collection has been stored yet.

use crate::model::collection::{Bookmark, Collection, Group};

/// Returns the fixed seed collection.
///
/// Ids are fixed so repeated seeding yields identical documents; orders are
/// dense at both levels.
pub fn seed_collection() -> Collection {
    Collection {
        groups: vec![
            seed_group(
                "id-sample-dev",
                "Development",
                0,
                &[
                    ("id-sample-github", "GitHub", "https://github.com"),
                    (
                        "id-sample-stackoverflow",
                        "Stack Overflow",
                        "https://stackoverflow.com",
                    ),
                    ("id-sample-mdn", "MDN Web Docs", "https://developer.mozilla.org"),
                ],
            ),
            seed_group(
                "id-sample-social",
                "Social",
                1,
                &[
                    ("id-sample-twitter", "Twitter", "https://twitter.com"),
                    ("id-sample-reddit", "Reddit", "https://www.reddit.com"),
                ],
            ),
            seed_group(
                "id-sample-news",
                "News",
                2,
                &[
                    (
                        "id-sample-hackernews",
                        "Hacker News",
                        "https://news.ycombinator.com",
                    ),
                    ("id-sample-bbc", "BBC News", "https://www.bbc.com/news"),
                ],
            ),
        ],
    }
}

fn seed_group(id: &str, name: &str, order: i64, bookmarks: &[(&str, &str, &str)]) -> Group {
    let mut group = Group::new(id, name, order);
    group.bookmarks = bookmarks
        .iter()
        .enumerate()
        .map(|(index, (id, title, url))| Bookmark::new(*id, *title, *url, index as i64))
        .collect();
    group
}
