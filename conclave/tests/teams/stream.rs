//! Stream: one snapshot per node, lazily produced.

use futures::StreamExt;
use serde_json::{json, Value};

use conclave::{RunConfig, TeamState};

use crate::common::{research_team, ScriptedRouter};

/// **Scenario**: snapshots alternate supervisor and worker, ending with the FINISH decision.
#[tokio::test]
async fn stream_yields_node_updates_in_order() {
    let graph = research_team(ScriptedRouter::new(&["web_scraper"]), "unused", "summary");
    let snaps: Vec<_> = graph
        .stream(TeamState::from_user("q"), RunConfig::default())
        .map(|s| s.expect("no error"))
        .collect()
        .await;

    let lines: Vec<Value> = snaps
        .iter()
        .map(|s| serde_json::from_str(&s.to_trace_line()).unwrap())
        .collect();
    assert_eq!(
        lines,
        vec![
            json!({"supervisor": {"next": "web_scraper"}}),
            json!({"web_scraper": {"messages": [
                {"role": "user", "content": "summary", "name": "web_scraper"}
            ]}}),
            json!({"supervisor": {"next": "FINISH"}}),
        ]
    );
}

/// **Scenario**: nothing runs until the stream is polled, and each poll runs one node.
#[tokio::test]
async fn stream_is_lazy() {
    let router = ScriptedRouter::new(&["search"]);
    let graph = research_team(router.clone(), "facts", "unused");

    let mut steps = graph.stream(TeamState::from_user("q"), RunConfig::default());
    assert_eq!(router.calls(), 0);

    let first = steps.next().await.unwrap().unwrap();
    assert_eq!(first.node, "supervisor");
    assert_eq!(router.calls(), 1);

    let second = steps.next().await.unwrap().unwrap();
    assert_eq!(second.node, "search");
    assert_eq!(router.calls(), 1);

    assert!(steps.next().await.unwrap().is_ok());
    assert!(steps.next().await.is_none());
    assert!(steps.next().await.is_none());
}
