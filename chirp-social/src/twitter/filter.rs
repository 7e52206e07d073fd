//! Select subsets of posts by author, time window, or keyword.
//!
//! Every filter keeps the relative order of its input and never duplicates a post.
use crate::twitter::types::{Post, Timespan, Username};

/// Posts whose author is `username`, ignoring case.
pub fn written_by(posts: &[Post], username: &str) -> Vec<Post> {
    let wanted = Username::new(username);
    posts
        .iter()
        .filter(|post| post.author_name() == wanted)
        .cloned()
        .collect()
}

/// Posts whose timestamp falls inside `timespan`, bounds included.
pub fn in_timespan(posts: &[Post], timespan: &Timespan) -> Vec<Post> {
    posts
        .iter()
        .filter(|post| timespan.contains(post.timestamp()))
        .cloned()
        .collect()
}

/// Posts whose text contains at least one of `words` as a case-insensitive substring.
///
/// An empty `words` selects nothing.
pub fn containing<S: AsRef<str>>(posts: &[Post], words: &[S]) -> Vec<Post> {
    let needles = lowercase_all(words);
    posts
        .iter()
        .filter(|post| contains_any(post, &needles))
        .cloned()
        .collect()
}

fn lowercase_all<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    words.iter().map(|w| w.as_ref().to_lowercase()).collect()
}

fn contains_any(post: &Post, needles: &[String]) -> bool {
    if needles.is_empty() {
        return false;
    }
    let haystack = post.text().to_lowercase();
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

/// Combined criteria for [`matching`]. Unset criteria accept every post.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub author: Option<String>,
    pub timespan: Option<Timespan>,
    pub words: Vec<String>,
}

impl PostQuery {
    pub fn accepts(&self, post: &Post) -> bool {
        self.accepts_with(post, &lowercase_all(&self.words))
    }

    // `needles` is `self.words`, lower-cased once by the caller.
    fn accepts_with(&self, post: &Post, needles: &[String]) -> bool {
        let by_author = self
            .author
            .as_deref()
            .is_none_or(|author| post.author_name().matches(author));
        let in_window = self
            .timespan
            .is_none_or(|span| span.contains(post.timestamp()));
        let has_word = needles.is_empty() || contains_any(post, needles);
        by_author && in_window && has_word
    }
}

/// Posts accepted by every criterion set in `query`.
pub fn matching(posts: &[Post], query: &PostQuery) -> Vec<Post> {
    let needles = lowercase_all(&query.words);
    let selected: Vec<Post> = posts
        .iter()
        .filter(|post| query.accepts_with(post, &needles))
        .cloned()
        .collect();
    tracing::debug!(
        total = posts.len(),
        selected = selected.len(),
        "filtered posts"
    );
    selected
}
