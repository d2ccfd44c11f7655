//! Team-as-worker adapter: seeding, attribution, error propagation.

use std::sync::Arc;

use conclave::{
    AgentError, CompiledTeamGraph, ContentBlock, Goto, Message, MessageContent, Node, Role,
    Roster, RunConfig, SupervisorNode, TeamGraph, TeamState, TeamWorker,
};

use async_trait::async_trait;
use conclave::{Decision, Router};

use crate::common::{compiled, research_team, FixedWorker, LoopRouter, ScriptedRouter};

/// Router whose reasoning service is down.
struct UnavailableRouter;

#[async_trait]
impl Router for UnavailableRouter {
    async fn decide(&self, _: &TeamState, _: &Roster) -> Result<Decision, AgentError> {
        Err(AgentError::ExecutionFailed("503 Service Unavailable".into()))
    }
}

/// Root team whose only worker is `adapter`.
fn root_over_adapter(adapter: TeamWorker, root_router: Arc<ScriptedRouter>) -> CompiledTeamGraph {
    let roster = Roster::new(["research_team"]).unwrap();
    TeamGraph::new("root", SupervisorNode::new(roster, root_router))
        .add_worker(Arc::new(adapter))
        .compile()
        .unwrap()
}

fn root_over(sub: CompiledTeamGraph, root_router: Arc<ScriptedRouter>) -> CompiledTeamGraph {
    root_over_adapter(TeamWorker::new(sub), root_router)
}

/// Runs the adapter as a node and returns its single report.
async fn run_adapter(adapter: &TeamWorker, state: &TeamState) -> Message {
    let cmd = adapter.run(state).await.expect("team worker runs");
    assert_eq!(cmd.goto, Goto::Supervisor);
    assert_eq!(cmd.update.messages.len(), 1);
    cmd.update.messages.into_iter().next().unwrap()
}

/// **Scenario**: with N prior messages, the sub-team starts from exactly the last one.
#[tokio::test]
async fn sub_team_is_seeded_with_last_message_only() {
    let sub_router = ScriptedRouter::new(&["search"]);
    let sub = research_team(sub_router.clone(), "facts", "unused");
    let root = root_over(sub, ScriptedRouter::new(&["research_team"]));

    let history = TeamState::new(vec![
        Message::user("one"),
        Message::assistant("two"),
        Message::user("three"),
        Message::user("latest request"),
    ]);
    root.invoke(history, &RunConfig::default()).await.unwrap();

    let first = &sub_router.seen()[0];
    assert_eq!(first.messages, vec![Message::user("latest request")]);
}

/// **Scenario**: the report is attributed to the team, never to its inner worker.
#[tokio::test]
async fn report_is_attributed_to_team_name() {
    let sub = research_team(ScriptedRouter::new(&["web_scraper"]), "unused", "page facts");
    let root = root_over(sub, ScriptedRouter::new(&["research_team"]));

    let out = root
        .invoke(TeamState::from_user("q"), &RunConfig::default())
        .await
        .unwrap();
    assert_eq!(out.messages.len(), 2);
    let report = &out.messages[1];
    assert_eq!(report.name.as_deref(), Some("research_team"));
    assert_eq!(report.role, Role::User);
    assert_eq!(report.text(), "page facts");
}

/// **Scenario**: structured content from the sub-team is passed up unchanged.
#[tokio::test]
async fn block_content_is_preserved() {
    let blocks = vec![
        ContentBlock::Text {
            text: "Paris, Marseille, Lyon".into(),
        },
        ContentBlock::ImageUrl {
            url: "https://example.com/chart.png".into(),
        },
    ];
    let sub = compiled(
        "research_team",
        &["search"],
        ScriptedRouter::new(&["search"]),
        vec![FixedWorker::new("search", blocks.clone())],
    );
    let adapter = TeamWorker::new(sub).with_config(RunConfig::default());
    let out = run_adapter(&adapter, &TeamState::from_user("q")).await;
    assert_eq!(out.content, MessageContent::Blocks(blocks));
    assert_eq!(out.name.as_deref(), Some("research_team"));
}

/// **Scenario**: a routing violation inside the sub-team aborts the enclosing run.
#[tokio::test]
async fn nested_contract_violation_propagates() {
    let sub = research_team(ScriptedRouter::new(&["translator"]), "x", "y");
    let root = root_over(sub, ScriptedRouter::new(&["research_team"]));

    let err = root
        .invoke(TeamState::from_user("q"), &RunConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AgentError::RoutingContractViolation { ref name, .. } if name == "translator"
    ));
}

/// **Scenario**: a nested step limit is fatal to the enclosing run too.
#[tokio::test]
async fn nested_step_limit_propagates() {
    let sub = research_team(Arc::new(LoopRouter("search")), "x", "y");
    let adapter = TeamWorker::new(sub).with_config(RunConfig::default().with_recursion_limit(4));
    let root = root_over_adapter(adapter, ScriptedRouter::new(&["research_team"]));

    let err = root
        .invoke(TeamState::from_user("q"), &RunConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::StepLimitExceeded { limit: 4 }));
}

/// **Scenario**: an outage inside the sub-team is reported to the enclosing supervisor,
/// which keeps routing instead of aborting.
#[tokio::test]
async fn nested_service_failure_becomes_team_report() {
    let sub = research_team(Arc::new(UnavailableRouter), "x", "y");
    let root_router = ScriptedRouter::new(&["research_team"]);
    let root = root_over(sub, root_router.clone());

    let out = root
        .invoke(TeamState::from_user("q"), &RunConfig::default())
        .await
        .expect("nested outage does not abort the root run");
    assert_eq!(out.messages.len(), 2);
    let report = &out.messages[1];
    assert_eq!(report.name.as_deref(), Some("research_team"));
    assert_eq!(report.role, Role::User);
    assert!(report.text().starts_with("research_team failed: "), "{}", report.text());
    assert!(report.text().contains("503 Service Unavailable"), "{}", report.text());
    assert_eq!(root_router.calls(), 2);
}
