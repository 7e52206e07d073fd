//! Command-line surface of the `chirp` binary.
use std::path::PathBuf;

use anyhow::Result;
use chirp_config::GraphSettings;
use chirp_social::twitter::filter::{self, PostQuery};
use chirp_social::twitter::{extract, network, GraphOptions, Post, Timespan};
use clap::{Parser, Subcommand, ValueEnum};
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::report::Report;

#[derive(Debug, Parser)]
#[command(name = "chirp", version, about = "Mentions, filters and influencers over a set of posts")]
pub struct Cli {
    /// JSON array of posts: `[{"id", "author", "text", "timestamp"}]`.
    #[arg(short, long, env = "CHIRP_POSTS")]
    pub posts: PathBuf,

    /// Config file merged over the per-user `chirp.yaml`.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Shorthand for `--format json`.
    #[arg(long, conflicts_with = "format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Earliest and latest timestamps.
    Timespan,
    /// Users @-mentioned anywhere in the posts.
    Mentions,
    /// Distinct hashtags, lower-cased.
    Hashtags,
    /// Posts matching every given criterion.
    Filter {
        #[arg(long)]
        author: Option<String>,
        /// Inclusive lower bound (RFC 3339).
        #[arg(long, value_parser = parse_instant)]
        from: Option<OffsetDateTime>,
        /// Inclusive upper bound (RFC 3339).
        #[arg(long, value_parser = parse_instant)]
        to: Option<OffsetDateTime>,
        /// Keep posts containing any of these words; repeatable.
        #[arg(long = "word", short = 'w')]
        words: Vec<String>,
    },
    /// Guessed follows graph.
    Graph {
        /// Also link authors who share a hashtag.
        #[arg(long)]
        hashtags: bool,
    },
    /// Users guessed to follow `user`.
    Followers {
        user: String,
        /// Also link authors who share a hashtag.
        #[arg(long)]
        hashtags: bool,
    },
    /// Users ranked by follower count.
    Influencers {
        #[arg(long)]
        top: Option<usize>,
        /// Also link authors who share a hashtag.
        #[arg(long)]
        hashtags: bool,
    },
}

fn parse_instant(raw: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(raw, &Rfc3339).map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

fn graph_options(settings: &GraphSettings, hashtags_flag: bool) -> GraphOptions {
    GraphOptions {
        link_shared_hashtags: hashtags_flag || settings.link_shared_hashtags,
    }
}

impl Command {
    pub fn run(&self, posts: &[Post], settings: &GraphSettings) -> Result<Report> {
        let report = match self {
            Command::Timespan => Report::Timespan(extract::get_timespan(posts)?),
            Command::Mentions => {
                Report::Users(extract::get_mentioned_users(posts).into_iter().collect())
            }
            Command::Hashtags => Report::Tags(extract::get_hashtags(posts).into_iter().collect()),
            Command::Filter {
                author,
                from,
                to,
                words,
            } => {
                let timespan = match (from, to) {
                    (None, None) => None,
                    _ => Some(Timespan::new(
                        from.unwrap_or(PrimitiveDateTime::MIN.assume_utc()),
                        to.unwrap_or(PrimitiveDateTime::MAX.assume_utc()),
                    )?),
                };
                let query = PostQuery {
                    author: author.clone(),
                    timespan,
                    words: words.clone(),
                };
                Report::Posts(filter::matching(posts, &query))
            }
            Command::Graph { hashtags } => Report::Graph(network::guess_follows_graph_with(
                posts,
                &graph_options(settings, *hashtags),
            )),
            Command::Followers { user, hashtags } => {
                let graph =
                    network::guess_follows_graph_with(posts, &graph_options(settings, *hashtags));
                Report::Users(graph.followers_of(user).into_iter().cloned().collect())
            }
            Command::Influencers { top, hashtags } => {
                let graph =
                    network::guess_follows_graph_with(posts, &graph_options(settings, *hashtags));
                let mut ranking = network::rank_influencers(&graph);
                if let Some(n) = top {
                    ranking.truncate(*n);
                }
                Report::Ranking(ranking)
            }
        };
        Ok(report)
    }
}
