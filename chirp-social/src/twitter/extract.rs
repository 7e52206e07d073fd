//! Derive the time span and the mentioned users of a set of posts.
//!
//! A mention is `@name` where `name` is one or more of `[A-Za-z0-9_-]` and the `@` is
//! not directly preceded by one of those characters. That keeps `alice@mit.edu` and
//! `word@bob` out of the result.
use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::twitter::types::{Post, Timespan, Username};
use crate::{Result, SocialError};

static MENTION: OnceLock<Regex> = OnceLock::new();
static HASHTAG: OnceLock<Regex> = OnceLock::new();

// The leading group consumes at most one non-name character, never the next `@`'s
// predecessor, so adjacent mentions like `@a,@b` are both found.
fn mention_regex() -> &'static Regex {
    MENTION.get_or_init(|| {
        Regex::new(r"(?:^|[^A-Za-z0-9_-])@([A-Za-z0-9_-]+)").expect("static mention pattern")
    })
}

fn hashtag_regex() -> &'static Regex {
    HASHTAG.get_or_init(|| {
        Regex::new(r"(?:^|[^A-Za-z0-9_-])#([A-Za-z0-9_-]+)").expect("static hashtag pattern")
    })
}

/// Earliest and latest timestamps across `posts`.
///
/// Returns [`SocialError::EmptyTimeline`] when there is nothing to span.
pub fn get_timespan(posts: &[Post]) -> Result<Timespan> {
    let mut stamps = posts.iter().map(Post::timestamp);
    let first = stamps.next().ok_or(SocialError::EmptyTimeline)?;
    let (start, end) = stamps.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts)));
    Timespan::new(start, end)
}

/// Usernames mentioned in a single piece of text, in order of appearance.
///
/// Duplicates are not removed.
///
/// ```
/// use chirp_social::twitter::extract::mentions_in;
///
/// let found: Vec<&str> = mentions_in("@bob, ask alice@mit.edu or @Charlie-B!").collect();
/// assert_eq!(found, ["bob", "Charlie-B"]);
/// ```
pub fn mentions_in(text: &str) -> impl Iterator<Item = &str> {
    mention_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Hashtags (without the leading `#`) in a single piece of text.
pub fn hashtags_in(text: &str) -> impl Iterator<Item = &str> {
    hashtag_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Every user mentioned in any of `posts`, deduplicated case-insensitively.
///
/// When a name shows up with several casings the first one seen is kept.
pub fn get_mentioned_users(posts: &[Post]) -> BTreeSet<Username> {
    let mut users = BTreeSet::new();
    for post in posts {
        for name in mentions_in(post.text()) {
            tracing::trace!(post = post.id(), mention = name, "mention");
            // BTreeSet::insert leaves an existing equal element in place.
            users.insert(Username::new(name));
        }
    }
    users
}

/// Distinct hashtags used across `posts`, lower-cased.
pub fn get_hashtags(posts: &[Post]) -> BTreeSet<String> {
    posts
        .iter()
        .flat_map(|post| hashtags_in(post.text()))
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use time::macros::datetime;

    const D1: OffsetDateTime = datetime!(2016-02-17 10:00 UTC);
    const D2: OffsetDateTime = datetime!(2016-02-17 11:00 UTC);
    const D3: OffsetDateTime = datetime!(2016-02-17 12:00 UTC);
    const D4: OffsetDateTime = datetime!(2016-02-17 09:00 UTC);

    fn post(id: u64, author: &str, text: &str, ts: OffsetDateTime) -> Post {
        Post::new(id, author, text, ts)
    }

    fn keys(users: &BTreeSet<Username>) -> Vec<&str> {
        users.iter().map(Username::key).collect()
    }

    #[test]
    fn timespan_of_two_posts() {
        let posts = [
            post(1, "alyssa", "is it reasonable to talk about rivest so much?", D1),
            post(2, "bbitdiddle", "rivest talk in 30 minutes #hype", D2),
        ];
        let span = get_timespan(&posts).unwrap();
        assert_eq!(span.start(), D1);
        assert_eq!(span.end(), D2);
    }

    #[test]
    fn timespan_of_single_post_is_a_point() {
        let span = get_timespan(&[post(1, "alyssa", "hi", D1)]).unwrap();
        assert_eq!(span.start(), D1);
        assert_eq!(span.end(), D1);
    }

    #[test]
    fn timespan_ignores_input_order() {
        let posts = [
            post(1, "a", "x", D1),
            post(3, "b", "noon", D3),
            post(4, "c", "earliest", D4),
            post(2, "d", "y", D2),
        ];
        let span = get_timespan(&posts).unwrap();
        assert_eq!(span.start(), D4);
        assert_eq!(span.end(), D3);
    }

    #[test]
    fn timespan_of_nothing_is_an_error() {
        assert!(matches!(get_timespan(&[]), Err(SocialError::EmptyTimeline)));
    }

    #[test]
    fn no_mentions_in_plain_text() {
        let posts = [post(1, "alyssa", "is it reasonable to talk about rivest so much?", D1)];
        assert!(get_mentioned_users(&posts).is_empty());
        assert!(get_mentioned_users(&[]).is_empty());
    }

    #[test]
    fn finds_mentions_at_start_middle_and_end() {
        let posts = [post(1, "alyssa", "@bob hey @charlie, meet @dave", D1)];
        assert_eq!(keys(&get_mentioned_users(&posts)), ["bob", "charlie", "dave"]);
    }

    #[test]
    fn mentions_dedup_across_case_and_posts() {
        let posts = [
            post(1, "alice", "hey @BOB", D1),
            post(2, "ben", "hi @bob again @Bob", D2),
        ];
        let users = get_mentioned_users(&posts);
        assert_eq!(users.len(), 1);
        assert_eq!(users.iter().next().map(Username::as_str), Some("BOB"));
    }

    #[test]
    fn email_addresses_are_not_mentions() {
        let posts = [post(1, "alice", "email me at alice@mit.edu please", D1)];
        assert!(get_mentioned_users(&posts).is_empty());
    }

    #[test]
    fn at_inside_a_word_is_not_a_mention() {
        assert_eq!(mentions_in("word@bob should not match").count(), 0);
        assert_eq!(mentions_in("under_@bob dash-@bob digit9@bob").count(), 0);
    }

    #[test]
    fn punctuation_ends_a_mention() {
        let found: Vec<&str> = mentions_in("hey @bob! and @charlie. (@dave) @eve's").collect();
        assert_eq!(found, ["bob", "charlie", "dave", "eve"]);
    }

    #[test]
    fn name_characters_include_digits_underscore_and_dash() {
        let found: Vec<&str> =
            mentions_in("hey @bob_smith and @charlie-brown, @user123").collect();
        assert_eq!(found, ["bob_smith", "charlie-brown", "user123"]);
    }

    #[test]
    fn adjacent_and_doubled_markers() {
        let found: Vec<&str> = mentions_in("@a,@b @@c @ d @").collect();
        assert_eq!(found, ["a", "b", "c"]);
        // the second `@` follows a name character
        assert_eq!(mentions_in("@a@b").collect::<Vec<_>>(), ["a"]);
    }

    #[test]
    fn hashtags_follow_the_same_boundary_rule() {
        let found: Vec<&str> = hashtags_in("#rust talk in 30 minutes #Hype c#sharp").collect();
        assert_eq!(found, ["rust", "Hype"]);
        let posts = [post(1, "a", "#hype", D1), post(2, "b", "#HYPE #mit", D2)];
        let tags: Vec<String> = get_hashtags(&posts).into_iter().collect();
        assert_eq!(tags, ["hype", "mit"]);
    }
}
