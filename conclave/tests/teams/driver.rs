//! Driver: trace accumulation, pacing, final answer capture.

use std::sync::Arc;
use std::time::Duration;

use conclave::{
    build_hierarchy_with_workers, AgentError, ContentBlock, Driver, DriverConfig, FinalAnswer,
    HierarchyOptions, TeamRouters, Worker,
};

use crate::common::{FixedWorker, ScriptedRouter};

/// Demo hierarchy with scripted supervisors and fixed worker replies.
fn france_hierarchy(root: &[&str]) -> conclave::CompiledTeamGraph {
    let routers = TeamRouters {
        root: ScriptedRouter::new(root),
        research: ScriptedRouter::new(&["search"]),
        writing: ScriptedRouter::new(&["chart_generator"]),
    };
    let chart = vec![ContentBlock::Text {
        text: "Bar chart: Paris 2.1M, Marseille 0.87M, Lyon 0.52M".into(),
    }];
    let workers: Vec<Arc<dyn Worker>> = vec![
        FixedWorker::new("search", "Paris 2.1M, Marseille 0.87M, Lyon 0.52M"),
        FixedWorker::new("web_scraper", "unused"),
        FixedWorker::new("doc_writer", "unused"),
        FixedWorker::new("note_taker", "unused"),
        FixedWorker::new("chart_generator", chart),
    ];
    build_hierarchy_with_workers(routers, workers, &HierarchyOptions::default()).unwrap()
}

fn no_delay() -> DriverConfig {
    DriverConfig::default().with_step_delay(Duration::ZERO)
}

/// **Scenario**: root → research_team → writing_team → FINISH; the final answer is the
/// last writing_team message, unwrapped from its content blocks.
#[tokio::test]
async fn final_answer_is_last_designated_team_report() {
    let driver = Driver::new(
        france_hierarchy(&["research_team", "writing_team"]),
        no_delay(),
    );
    let outcome = driver
        .run(
            "Find the three largest cities in France and plot their populations",
            |_, _| {},
        )
        .await
        .unwrap();
    assert_eq!(
        outcome.answer,
        FinalAnswer::Answer("Bar chart: Paris 2.1M, Marseille 0.87M, Lyon 0.52M".into())
    );
}

/// **Scenario**: with only research_team designated and no research report, the driver
/// emits the no-answer sentinel.
#[tokio::test]
async fn no_designated_report_yields_sentinel() {
    let driver = Driver::new(
        france_hierarchy(&["writing_team"]),
        no_delay().with_answer_from(["research_team"]),
    );
    let outcome = driver.run("plot something", |_, _| {}).await.unwrap();
    assert_eq!(outcome.answer, FinalAnswer::NoAnswer);
    assert_eq!(outcome.answer.text(), "No final answer generated.");
}

#[tokio::test]
async fn immediate_finish_yields_sentinel() {
    let driver = Driver::new(france_hierarchy(&[]), no_delay());
    let outcome = driver.run("hi", |_, _| {}).await.unwrap();
    assert_eq!(outcome.answer.text(), "No final answer generated.");
    assert_eq!(outcome.trace.matches("\n\n").count(), 1);
}

/// **Scenario**: each snapshot is appended to the trace followed by a blank line, and the
/// callback sees the trace grow.
#[tokio::test]
async fn trace_accumulates_one_entry_per_snapshot() {
    let driver = Driver::new(france_hierarchy(&["research_team"]), no_delay());
    let mut seen = Vec::new();
    let outcome = driver
        .run("q", |snap, trace| seen.push((snap.node.clone(), trace.len())))
        .await
        .unwrap();

    let nodes: Vec<_> = seen.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(nodes, vec!["supervisor", "research_team", "supervisor"]);
    assert!(seen.windows(2).all(|w| w[0].1 < w[1].1));

    let entries: Vec<_> = outcome.trace.split_terminator("\n\n").collect();
    assert_eq!(entries.len(), 3);
    assert!(entries[1].starts_with(r#"{"research_team":"#), "{}", entries[1]);
    assert!(outcome.trace.ends_with("\n\n"));
    assert_eq!(
        outcome.answer.text(),
        "Paris 2.1M, Marseille 0.87M, Lyon 0.52M"
    );
}

/// **Scenario**: the driver waits the configured delay after every snapshot.
#[tokio::test(start_paused = true)]
async fn step_delay_paces_every_snapshot() {
    let driver = Driver::new(
        france_hierarchy(&["research_team"]),
        DriverConfig::default(),
    );
    let start = tokio::time::Instant::now();
    driver.run("q", |_, _| {}).await.unwrap();
    assert_eq!(start.elapsed(), Duration::from_secs(12 * 3));
}

/// **Scenario**: a routing violation aborts the run with no answer.
#[tokio::test]
async fn contract_violation_aborts_without_answer() {
    let driver = Driver::new(france_hierarchy(&["translator"]), no_delay());
    let mut steps = 0;
    let err = driver.run("q", |_, _| steps += 1).await.unwrap_err();
    assert!(matches!(err, AgentError::RoutingContractViolation { .. }));
    assert_eq!(steps, 0);
}

/// **Scenario**: the driver's recursion limit caps the root graph.
#[tokio::test]
async fn driver_recursion_limit_applies_to_root() {
    let driver = Driver::new(
        france_hierarchy(&["research_team", "research_team", "research_team"]),
        no_delay().with_recursion_limit(3),
    );
    let err = driver.run("q", |_, _| {}).await.unwrap_err();
    assert!(matches!(err, AgentError::StepLimitExceeded { limit: 3 }));
}
