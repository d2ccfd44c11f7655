//! Fatal routing errors: contract violation, step limit, invalid transition.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;

use conclave::{
    AgentError, Command, Goto, Message, Node, Roster, RunConfig, SupervisorNode, TeamGraph,
    TeamState, DEFAULT_RECURSION_LIMIT,
};

use crate::common::{research_team, LoopRouter, ScriptedRouter};

/// **Scenario**: Supervisor names "translator", which is not in {search, web_scraper}.
#[tokio::test]
async fn unknown_worker_fails_with_contract_violation() {
    let graph = research_team(ScriptedRouter::new(&["translator"]), "x", "y");
    let err = graph
        .invoke(TeamState::from_user("q"), &RunConfig::default())
        .await
        .unwrap_err();
    match err {
        AgentError::RoutingContractViolation { name, roster } => {
            assert_eq!(name, "translator");
            assert_eq!(roster, vec!["search", "web_scraper"]);
        }
        other => panic!("expected RoutingContractViolation, got {:?}", other),
    }
}

/// **Scenario**: Supervisor never emits FINISH within 150 cycles.
#[tokio::test]
async fn never_finishing_supervisor_hits_default_step_limit() {
    let graph = research_team(Arc::new(LoopRouter("search")), "again", "unused");
    let err = graph
        .invoke(TeamState::from_user("q"), &RunConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AgentError::StepLimitExceeded { limit } if limit == DEFAULT_RECURSION_LIMIT
    ));
}

/// **Scenario**: no node runs more often than the cap allows; the stream stops at the error.
#[tokio::test]
async fn step_limit_bounds_visited_nodes() {
    let graph = research_team(Arc::new(LoopRouter("search")), "again", "unused");
    let items: Vec<_> = graph
        .stream(
            TeamState::from_user("q"),
            RunConfig::default().with_recursion_limit(5),
        )
        .collect()
        .await;
    assert_eq!(items.len(), 6);
    assert!(items[..5].iter().all(|i| i.is_ok()));
    assert!(matches!(
        items[5],
        Err(AgentError::StepLimitExceeded { limit: 5 })
    ));
}

/// Worker that tries to route to another worker directly.
struct Hijacker {
    target: Roster,
}

#[async_trait]
impl Node for Hijacker {
    fn id(&self) -> &str {
        "search"
    }

    async fn run(&self, _: &TeamState) -> Result<Command, AgentError> {
        let id = self.target.worker_id("web_scraper").expect("member");
        Ok(Command {
            goto: Goto::Worker(id),
            update: conclave::StateUpdate::message(Message::user("hijack").with_name("search")),
        })
    }
}

struct Quiet;

#[async_trait]
impl Node for Quiet {
    fn id(&self) -> &str {
        "web_scraper"
    }

    async fn run(&self, _: &TeamState) -> Result<Command, AgentError> {
        Ok(Command::to_supervisor(Message::user("ok").with_name("web_scraper")))
    }
}

/// **Scenario**: workers cannot route to other workers; the update is not applied.
#[tokio::test]
async fn worker_to_worker_transition_is_rejected() {
    let roster = Roster::new(["search", "web_scraper"]).unwrap();
    let graph = TeamGraph::new(
        "research_team",
        SupervisorNode::new(roster.clone(), ScriptedRouter::new(&["search"])),
    )
    .add_worker(Arc::new(Hijacker { target: roster }))
    .add_worker(Arc::new(Quiet))
    .compile()
    .unwrap();

    let err = graph
        .invoke(TeamState::from_user("q"), &RunConfig::default())
        .await
        .unwrap_err();
    match err {
        AgentError::InvalidTransition { from, goto } => {
            assert_eq!(from, "search");
            assert_eq!(goto, "worker web_scraper");
        }
        other => panic!("expected InvalidTransition, got {:?}", other),
    }
}
