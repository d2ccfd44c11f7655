//! Invoke: routing loop runs supervisor → worker → supervisor until FINISH.

use conclave::{Message, Role, RunConfig, TeamState};

use crate::common::{research_team, FailingWorker, FixedWorker, ScriptedRouter};

/// **Scenario**: Supervisor routes to search, then web_scraper, then FINISH; each worker
/// appends exactly one named User message.
#[tokio::test]
async fn invoke_runs_workers_in_supervisor_order() {
    let router = ScriptedRouter::new(&["search", "web_scraper"]);
    let graph = research_team(router.clone(), "facts", "page summary");

    let out = graph
        .invoke(TeamState::from_user("find X"), &RunConfig::default())
        .await
        .expect("invoke succeeds");

    let got: Vec<_> = out
        .messages
        .iter()
        .map(|m| (m.name.clone(), m.text()))
        .collect();
    assert_eq!(
        got,
        vec![
            (None, "find X".to_string()),
            (Some("search".to_string()), "facts".to_string()),
            (Some("web_scraper".to_string()), "page summary".to_string()),
        ]
    );
    assert!(out.messages[1..].iter().all(|m| m.role == Role::User));
    assert_eq!(out.next.as_deref(), Some("FINISH"));
    assert_eq!(router.calls(), 3);
}

/// **Scenario**: Immediate FINISH returns the input state unchanged apart from `next`.
#[tokio::test]
async fn immediate_finish_leaves_messages_untouched() {
    let graph = research_team(ScriptedRouter::new(&[]), "unused", "unused");
    let input = TeamState::new(vec![Message::user("a"), Message::user("b")]);

    let out = graph
        .invoke(input.clone(), &RunConfig::default())
        .await
        .unwrap();
    assert_eq!(out.messages, input.messages);
    assert_eq!(out.next.as_deref(), Some("FINISH"));
}

/// **Scenario**: Each supervisor decision sees every message appended so far.
#[tokio::test]
async fn supervisor_sees_appended_history() {
    let router = ScriptedRouter::new(&["search", "search"]);
    let graph = research_team(router.clone(), "facts", "unused");
    graph
        .invoke(TeamState::from_user("q"), &RunConfig::default())
        .await
        .unwrap();

    let lens: Vec<_> = router.seen().iter().map(|s| s.messages.len()).collect();
    assert_eq!(lens, vec![1, 2, 3]);
}

/// **Scenario**: A failing worker is reported in-band and the supervisor keeps routing.
#[tokio::test]
async fn worker_failure_becomes_message_and_run_continues() {
    let router = ScriptedRouter::new(&["search", "web_scraper"]);
    let graph = crate::common::compiled(
        "research_team",
        &["search", "web_scraper"],
        router.clone(),
        vec![
            std::sync::Arc::new(FailingWorker {
                name: "search",
                message: "quota exceeded",
            }),
            FixedWorker::new("web_scraper", "fallback page"),
        ],
    );

    let out = graph
        .invoke(TeamState::from_user("q"), &RunConfig::default())
        .await
        .expect("worker failure does not abort the run");
    let failure = &out.messages[1];
    assert_eq!(failure.name.as_deref(), Some("search"));
    assert!(failure.text().starts_with("search failed:"), "{}", failure.text());
    assert!(failure.text().contains("quota exceeded"));
    assert_eq!(out.messages[2].text(), "fallback page");
    assert_eq!(router.calls(), 3);
}
