//! Post model and the analysis passes run over it.
//!
//! Usernames compare case-insensitively everywhere in this module; see [`Username`].
pub mod extract;
pub mod filter;
pub mod network;
pub mod types;

pub use network::{FollowsGraph, GraphOptions, Influencer};
pub use types::{Post, Timespan, Username};
