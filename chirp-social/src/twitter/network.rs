//! Follows-graph inference and influencer ranking.
//!
//! An author is guessed to follow everyone they @-mention. Every author becomes a key
//! of the graph, with an empty set if they never mention anyone; users who are only
//! ever mentioned show up as targets but not as keys. Self-mentions never produce an
//! edge.
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::twitter::extract::{hashtags_in, mentions_in};
use crate::twitter::types::{Post, Username};

/// Directed graph of who is guessed to follow whom, keyed case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FollowsGraph {
    edges: BTreeMap<Username, BTreeSet<Username>>,
}

impl FollowsGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `user` is a key, following nobody if it was not already present.
    pub fn add_user(&mut self, user: Username) {
        self.edges.entry(user).or_default();
    }

    /// Record `follower -> followee`.
    ///
    /// Returns `false` for self-loops and for edges that already exist.
    pub fn add_follow(&mut self, follower: Username, followee: Username) -> bool {
        if follower == followee {
            return false;
        }
        self.edges.entry(follower).or_default().insert(followee)
    }

    /// Who `user` follows, if `user` is a key.
    pub fn follows(&self, user: &str) -> Option<&BTreeSet<Username>> {
        self.edges.get(&Username::new(user))
    }

    /// Keys that follow `user`.
    pub fn followers_of(&self, user: &str) -> Vec<&Username> {
        let target = Username::new(user);
        self.edges
            .iter()
            .filter(|(_, followed)| followed.contains(&target))
            .map(|(follower, _)| follower)
            .collect()
    }

    /// Every user in the graph, as a key or as a target.
    pub fn users(&self) -> BTreeSet<&Username> {
        let mut users: BTreeSet<&Username> = self.edges.keys().collect();
        users.extend(self.edges.values().flatten());
        users
    }

    /// In-degree of every user in the graph, including those with none.
    pub fn follower_counts(&self) -> BTreeMap<&Username, usize> {
        let mut counts: BTreeMap<&Username, usize> =
            self.users().into_iter().map(|user| (user, 0)).collect();
        for followee in self.edges.values().flatten() {
            *counts.entry(followee).or_default() += 1;
        }
        counts
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Username, &BTreeSet<Username>)> {
        self.edges.iter()
    }
}

impl<S, I> FromIterator<(S, I)> for FollowsGraph
where
    S: Into<Username>,
    I: IntoIterator,
    I::Item: Into<Username>,
{
    fn from_iter<T: IntoIterator<Item = (S, I)>>(iter: T) -> Self {
        let mut graph = Self::new();
        for (follower, followed) in iter {
            let follower = follower.into();
            graph.add_user(follower.clone());
            for followee in followed {
                graph.add_follow(follower.clone(), followee.into());
            }
        }
        graph
    }
}

/// Knobs for [`guess_follows_graph_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphOptions {
    /// Authors who used the same hashtag follow each other.
    #[serde(default)]
    pub link_shared_hashtags: bool,
}

/// Guess the follows graph from @-mentions alone.
pub fn guess_follows_graph(posts: &[Post]) -> FollowsGraph {
    guess_follows_graph_with(posts, &GraphOptions::default())
}

/// Guess the follows graph from @-mentions plus whatever `options` enables.
pub fn guess_follows_graph_with(posts: &[Post], options: &GraphOptions) -> FollowsGraph {
    let mut graph = FollowsGraph::new();

    for post in posts {
        let author = post.author_name();
        graph.add_user(author.clone());
        for name in mentions_in(post.text()) {
            if author.matches(name) {
                tracing::trace!(post = post.id(), author = %author, "skipping self-mention");
                continue;
            }
            graph.add_follow(author.clone(), Username::new(name));
        }
    }

    if options.link_shared_hashtags {
        let mut by_tag: BTreeMap<String, BTreeSet<Username>> = BTreeMap::new();
        for post in posts {
            for tag in hashtags_in(post.text()) {
                by_tag
                    .entry(tag.to_lowercase())
                    .or_default()
                    .insert(post.author_name());
            }
        }
        for authors in by_tag.values() {
            for follower in authors {
                for followee in authors {
                    graph.add_follow(follower.clone(), followee.clone());
                }
            }
        }
    }

    tracing::debug!(
        posts = posts.len(),
        users = graph.len(),
        edges = graph.edge_count(),
        hashtags = options.link_shared_hashtags,
        "guessed follows graph"
    );
    graph
}

/// A user and how many users in the graph follow them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Influencer {
    pub user: Username,
    pub followers: usize,
}

/// Every user in `graph`, most followed first.
///
/// Equal follower counts are ordered by lower-cased username.
pub fn rank_influencers(graph: &FollowsGraph) -> Vec<Influencer> {
    let mut ranking: Vec<Influencer> = graph
        .follower_counts()
        .into_iter()
        .map(|(user, followers)| Influencer {
            user: user.clone(),
            followers,
        })
        .collect();
    ranking.sort_by(|a, b| {
        b.followers
            .cmp(&a.followers)
            .then_with(|| a.user.cmp(&b.user))
    });
    tracing::debug!(users = ranking.len(), "ranked influencers");
    ranking
}

/// Usernames of [`rank_influencers`], in rank order.
pub fn influencers(graph: &FollowsGraph) -> Vec<Username> {
    rank_influencers(graph)
        .into_iter()
        .map(|influencer| influencer.user)
        .collect()
}
