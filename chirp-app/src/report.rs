//! Rendering of command results as text, JSON or YAML.
use std::io::Write;

use anyhow::Result;
use chirp_social::twitter::{FollowsGraph, Influencer, Post, Timespan, Username};
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::cli::OutputFormat;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Timespan(Timespan),
    Users(Vec<Username>),
    Tags(Vec<String>),
    Posts(Vec<Post>),
    Graph(FollowsGraph),
    Ranking(Vec<Influencer>),
}

pub fn write_report<W: Write>(report: &Report, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(report, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Yaml => serde_yaml::to_writer(&mut *out, report)?,
    }
    Ok(())
}

fn stamp(instant: OffsetDateTime) -> Result<String> {
    Ok(instant.format(&Rfc3339)?)
}

fn write_text<W: Write>(report: &Report, out: &mut W) -> Result<()> {
    match report {
        Report::Timespan(span) => {
            writeln!(out, "start  {}", stamp(span.start())?)?;
            writeln!(out, "end    {}", stamp(span.end())?)?;
            writeln!(out, "length {}s", span.duration().whole_seconds())?;
        }
        Report::Users(users) => {
            for user in users {
                writeln!(out, "@{user}")?;
            }
        }
        Report::Tags(tags) => {
            for tag in tags {
                writeln!(out, "#{tag}")?;
            }
        }
        Report::Posts(posts) => {
            for post in posts {
                writeln!(
                    out,
                    "{:>6}  {}  {:<16} {}",
                    post.id(),
                    stamp(post.timestamp())?,
                    post.author(),
                    post.text()
                )?;
            }
        }
        Report::Graph(graph) => {
            for (user, followed) in graph.iter() {
                let names: Vec<String> = followed.iter().map(|u| format!("@{u}")).collect();
                writeln!(out, "{user} -> {}", names.join(" "))?;
            }
        }
        Report::Ranking(ranking) => {
            for (rank, entry) in ranking.iter().enumerate() {
                writeln!(out, "{:>4}. {:<20} {}", rank + 1, entry.user.as_str(), entry.followers)?;
            }
        }
    }
    Ok(())
}
