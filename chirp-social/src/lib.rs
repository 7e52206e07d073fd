//! Post analysis for Chirp: mention extraction, filtering, and follows-graph inference.
//!
//! Everything here is a pure function over in-memory posts. The [`twitter`] module holds
//! the data model and the three analysis passes:
//!
//! - [`twitter::extract`]: time span and @-mentions of a set of posts
//! - [`twitter::filter`]: author, time window, and keyword selection
//! - [`twitter::network`]: follows-graph guessing and influencer ranking
//!
//! ```rust
//! use chirp_social::twitter::{network, Post};
//! use time::macros::datetime;
//!
//! let posts = vec![
//!     Post::new(1, "alice", "hey @bob", datetime!(2016-02-17 10:00 UTC)),
//!     Post::new(2, "bob", "hi @charlie", datetime!(2016-02-17 11:00 UTC)),
//! ];
//! let graph = network::guess_follows_graph(&posts);
//! let ranked = network::influencers(&graph);
//! assert_eq!(ranked.last().map(|u| u.as_str()), Some("alice"));
//! ```
use time::OffsetDateTime;

pub mod twitter;

/// Errors produced while analysing posts.
#[derive(thiserror::Error, Debug)]
pub enum SocialError {
    /// A time span was requested for an empty list of posts.
    #[error("cannot compute a timespan over zero posts")]
    EmptyTimeline,

    /// A timespan was constructed with its bounds reversed.
    #[error("timespan start {start} is after end {end}")]
    InvertedTimespan {
        start: OffsetDateTime,
        end: OffsetDateTime,
    },

    /// Post data could not be decoded.
    #[error("failed to decode posts: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Convenient alias for results that use [`SocialError`].
pub type Result<T> = std::result::Result<T, SocialError>;
