use chirp_social::twitter::types::posts_from_json;
use chirp_social::twitter::{extract, filter, network, Post, Timespan, Username};
use time::macros::datetime;

const FEED: &str = r#"[
    {"id": 1, "author": "alyssa", "text": "@bbitdiddle is it reasonable to talk about rivest so much?", "timestamp": "2016-02-17T10:00:00Z"},
    {"id": 2, "author": "bbitdiddle", "text": "rivest talk in 30 minutes #hype, cc @Alyssa @ben", "timestamp": "2016-02-17T11:00:00Z"},
    {"id": 3, "author": "Ben", "text": "mail ben@mit.edu, not @ben. ping @ALYSSA", "timestamp": "2016-02-17T09:30:00Z"},
    {"id": 4, "author": "carol", "text": "just listening #hype", "timestamp": "2016-02-17T12:00:00Z"}
]"#;

fn feed() -> Vec<Post> {
    posts_from_json(FEED).expect("fixture decodes")
}

#[test]
fn timespan_bounds_are_post_timestamps() {
    let posts = feed();
    let span = extract::get_timespan(&posts).unwrap();
    assert!(span.start() <= span.end());
    assert_eq!(span.start(), datetime!(2016-02-17 09:30 UTC));
    assert_eq!(span.end(), datetime!(2016-02-17 12:00 UTC));
    assert!(posts.iter().any(|p| p.timestamp() == span.start()));
    assert!(posts.iter().any(|p| p.timestamp() == span.end()));
    assert_eq!(filter::in_timespan(&posts, &span), posts);
}

#[test]
fn mentions_skip_email_addresses() {
    let users = extract::get_mentioned_users(&feed());
    let keys: Vec<&str> = users.iter().map(Username::key).collect();
    assert_eq!(keys, ["alyssa", "bbitdiddle", "ben"]);
    // first casing seen wins
    assert!(users.iter().any(|u| u.as_str() == "Alyssa"));
}

#[test]
fn graph_has_no_self_loops_and_ranks_every_user() {
    let graph = network::guess_follows_graph(&feed());
    for (user, followed) in graph.iter() {
        assert!(!followed.contains(user), "{user} follows themselves");
    }

    let ranking = network::rank_influencers(&graph);
    assert_eq!(ranking.len(), graph.users().len());
    assert!(ranking.windows(2).all(|w| w[0].followers >= w[1].followers));

    let top: Vec<(&str, usize)> = ranking
        .iter()
        .map(|i| (i.user.key(), i.followers))
        .collect();
    let expected: [(&str, usize); 4] = [
        ("alyssa", 2),
        ("bbitdiddle", 1),
        ("ben", 1),
        ("carol", 0),
    ];
    assert_eq!(top, expected);
}

#[test]
fn hashtag_affinity_adds_mutual_follows() {
    let options = network::GraphOptions {
        link_shared_hashtags: true,
    };
    let graph = network::guess_follows_graph_with(&feed(), &options);
    assert!(graph.follows("carol").is_some_and(|f| f.contains(&Username::new("bbitdiddle"))));
    assert!(graph.follows("BBITDIDDLE").is_some_and(|f| f.contains(&Username::new("carol"))));
}

#[test]
fn filters_compose() {
    let posts = feed();
    let window = Timespan::new(
        datetime!(2016-02-17 10:00 UTC),
        datetime!(2016-02-17 11:00 UTC),
    )
    .unwrap();
    let recent = filter::in_timespan(&posts, &window);
    let about_rivest = filter::containing(&recent, &["RIVEST"]);
    let by_alyssa = filter::written_by(&about_rivest, "Alyssa");
    assert_eq!(by_alyssa.iter().map(Post::id).collect::<Vec<_>>(), [1]);

    let none: Vec<String> = Vec::new();
    assert!(filter::containing(&posts, &none).is_empty());
}
