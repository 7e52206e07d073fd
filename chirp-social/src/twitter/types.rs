use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Result, SocialError};

/// A username with case-insensitive identity.
///
/// The display form keeps whatever casing the name was first seen with; equality,
/// hashing and ordering all go through the lower-cased key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Username {
    display: String,
    key: String,
}

impl Username {
    pub fn new(name: impl Into<String>) -> Self {
        let display = name.into();
        let key = display.to_lowercase();
        Self { display, key }
    }

    /// The name as it was written.
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// Canonical lower-cased form.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Case-insensitive comparison against a raw name.
    pub fn matches(&self, name: &str) -> bool {
        self.key == name.to_lowercase()
    }
}

impl PartialEq for Username {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Username {}

impl Hash for Username {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for Username {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Username {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl From<String> for Username {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Username {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.display
    }
}

/// A single immutable post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    id: u64,
    author: String,
    text: String,
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
}

impl Post {
    pub fn new(
        id: u64,
        author: impl Into<String>,
        text: impl Into<String>,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            author: author.into(),
            text: text.into(),
            timestamp,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    /// Author as a case-insensitive [`Username`].
    pub fn author_name(&self) -> Username {
        Username::new(self.author.as_str())
    }
}

/// Decode a JSON array of posts.
///
/// Timestamps are RFC 3339 strings.
///
/// ```
/// use chirp_social::twitter::types::posts_from_json;
///
/// let posts = posts_from_json(
///     r#"[{"id": 1, "author": "alyssa", "text": "hi @bob", "timestamp": "2016-02-17T10:00:00Z"}]"#,
/// )
/// .unwrap();
/// assert_eq!(posts[0].author(), "alyssa");
/// ```
pub fn posts_from_json(json: &str) -> Result<Vec<Post>> {
    let posts: Vec<Post> = serde_json::from_str(json)?;
    tracing::debug!(count = posts.len(), "decoded posts");
    Ok(posts)
}

/// Closed interval of time; both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timespan {
    #[serde(with = "time::serde::rfc3339")]
    start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end: OffsetDateTime,
}

impl Timespan {
    /// Build a timespan, rejecting `start > end`.
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Result<Self> {
        if start > end {
            return Err(SocialError::InvertedTimespan { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> OffsetDateTime {
        self.start
    }

    pub fn end(&self) -> OffsetDateTime {
        self.end
    }

    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}
