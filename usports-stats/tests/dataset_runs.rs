use std::time::Duration;

use usports_stats::{
    Batch, DatasetKind, DatasetPlan, ExtractError, FixtureRow, FixtureSet, FixtureView,
    MemoryProvider, MissingColumnPolicy, PLAYER_LAYOUT, PLAYER_SORT_CATEGORIES, PipelineOptions,
    PipelineState, RetryPolicy, TEAM_LAYOUT, UNKNOWN_CONFERENCE, merge, run_dataset,
};

const STATS: &str = "teams?pos=off";
const STANDINGS: &str = "standings-conf";

fn options(max_attempts: u32) -> PipelineOptions {
    PipelineOptions {
        navigation_timeout: Duration::from_secs(2),
        retry: RetryPolicy {
            max_attempts,
            initial_backoff_ms: 0,
            max_backoff_ms: 0,
            multiplier: 2.0,
        },
        missing_columns: MissingColumnPolicy::Advance,
    }
}

/// Stats view with one segment per team group. Every value in group `g` is
/// `"{prefix}-{g}-{i}"`, so each field's origin is visible in assertions.
fn team_stats_view(teams: &[(&str, &str)]) -> FixtureView {
    let segments = TEAM_LAYOUT
        .catalog
        .groups()
        .iter()
        .enumerate()
        .map(|(g, group)| {
            let mut rows = vec![FixtureRow::cells(["Team"])];
            for (rank, (name, prefix)) in teams.iter().enumerate() {
                let mut cells = vec![(rank + 1).to_string(), (*name).to_string(), "24".to_string()];
                cells.extend((0..group.field_count).map(|i| format!("{prefix}-{g}-{i}")));
                rows.push(FixtureRow::Cells(cells));
            }
            rows
        })
        .collect();
    FixtureView::new(segments)
}

fn standings_row(name: &str, wins: u32) -> FixtureRow {
    FixtureRow::cells([
        "1".to_string(),
        wins.to_string(),
        "4".to_string(),
        "0".to_string(),
        ".833".to_string(),
        "8-2".to_string(),
        "W3".to_string(),
        "1650".to_string(),
        "1400".to_string(),
    ])
    .with_header(name)
}

fn standings_view(conferences: Vec<Vec<FixtureRow>>) -> FixtureView {
    let mut segments: Vec<Vec<FixtureRow>> = conferences
        .into_iter()
        .map(|mut rows| {
            rows.insert(0, FixtureRow::cells(["Conference"]));
            rows
        })
        .collect();
    segments.resize(6, vec![FixtureRow::cells(["Conference"])]);
    FixtureView::new(segments)
}

fn team_plan() -> DatasetPlan {
    DatasetPlan::new(DatasetKind::TEAM_MENS, vec![Batch::new("teams", STATS)])
        .unwrap()
        .with_standings(STANDINGS)
}

#[test]
fn team_dataset_fills_every_populated_field() {
    let mut provider = MemoryProvider::new();
    provider.insert_view(STATS, team_stats_view(&[("Acadia", "a"), ("UBC", "u")]));
    provider.insert_view(
        STANDINGS,
        standings_view(vec![
            vec![standings_row("Acadia", 20)],
            vec![standings_row(" UBC ", 18)],
        ]),
    );

    let outcome = tokio_test::block_on(run_dataset(&mut provider, &team_plan(), options(1)));

    assert!(outcome.is_complete(), "{:?}", outcome.error);
    assert_eq!(outcome.state, PipelineState::Done);
    assert_eq!(outcome.entities.len(), 2);

    let acadia = outcome.entities.get("Acadia").unwrap();
    assert_eq!(acadia.len(), TEAM_LAYOUT.schema.len() - 1);
    assert_eq!(acadia.get("games_played"), Some("24"));
    assert_eq!(acadia.get("field_goals"), Some("a-0-0"));
    assert_eq!(acadia.get("points_per_game"), Some("a-0-6"));
    assert_eq!(acadia.get("off_rebounds_per_game"), Some("a-1-0"));
    assert_eq!(acadia.get("field_goals_against"), Some("a-4-0"));
    assert_eq!(acadia.get("def_efficiency"), Some("a-7-1"));
    assert_eq!(acadia.get("total_wins"), Some("20"));
    assert_eq!(acadia.get("total_points"), Some("1650"));
    assert_eq!(acadia.get("total_points_against"), None);
    assert_eq!(acadia.get("conference"), Some("AUS"));

    let ubc = outcome.entities.get("UBC").unwrap();
    assert_eq!(ubc.get("total_wins"), Some("18"));
    assert_eq!(ubc.get("conference"), Some("CW"));

    let report = &outcome.report;
    assert!(report.complete);
    assert_eq!(report.batches_completed, 1);
    assert_eq!(report.groups_extracted, 8);
    assert_eq!(report.standings_segments, 6);
    assert_eq!(report.entities, 2);
    assert_eq!(report.tally.entities_created, 2);
    assert_eq!(provider.history(), [STATS, STANDINGS]);
}

#[test]
fn standings_for_unseen_program_fail_the_dataset_without_losing_stats() {
    let mut provider = MemoryProvider::new();
    provider.insert_view(STATS, team_stats_view(&[("Acadia", "a")]));
    provider.insert_view(
        STANDINGS,
        standings_view(vec![vec![standings_row("Acadia", 20), standings_row("Saint Mary's", 9)]]),
    );

    let outcome = tokio_test::block_on(run_dataset(&mut provider, &team_plan(), options(1)));

    assert_eq!(outcome.state, PipelineState::Failed);
    assert_eq!(
        outcome.error,
        Some(ExtractError::UnknownEntity {
            name: "Saint Mary's".into()
        })
    );
    let acadia = outcome.entities.get("Acadia").unwrap();
    assert_eq!(acadia.get("field_goals"), Some("a-0-0"));
    assert!(!acadia.contains("total_wins"));
    assert!(!outcome.report.complete);
    assert!(outcome.report.failure.as_deref().unwrap().contains("Saint Mary's"));
}

#[test]
fn transient_navigation_failures_are_retried() {
    let mut provider = MemoryProvider::new();
    provider.insert_view(STATS, team_stats_view(&[("Dalhousie", "d")]));
    provider.insert_view(STANDINGS, standings_view(vec![vec![standings_row("Dalhousie", 11)]]));
    provider.fail_next_navigations(2);

    let outcome = tokio_test::block_on(run_dataset(&mut provider, &team_plan(), options(3)));

    assert!(outcome.is_complete());
    assert_eq!(provider.history(), [STATS, STATS, STATS, STANDINGS]);
    assert_eq!(
        outcome.entities.get("Dalhousie").unwrap().get("conference"),
        Some("AUS")
    );
}

#[test]
fn exhausted_retries_abort_with_timeout() {
    let mut provider = MemoryProvider::new();
    provider.insert_view(STATS, team_stats_view(&[("Dalhousie", "d")]));
    provider.fail_next_navigations(3);

    let outcome = tokio_test::block_on(run_dataset(&mut provider, &team_plan(), options(3)));

    match outcome.error {
        Some(ExtractError::Provider(err)) => assert!(err.is_timeout()),
        other => panic!("expected navigation timeout, got {other:?}"),
    }
    assert!(outcome.entities.is_empty());
    assert_eq!(outcome.report.batches_completed, 0);
}

#[test]
fn empty_view_is_segment_not_found() {
    let mut provider = MemoryProvider::new();
    provider.insert_view(STATS, FixtureView::default());

    let outcome = tokio_test::block_on(run_dataset(&mut provider, &team_plan(), options(1)));

    assert_eq!(
        outcome.error,
        Some(ExtractError::SegmentNotFound {
            index: 0,
            available: 0
        })
    );
}

#[test]
fn unmapped_program_gets_unknown_conference() {
    let mut provider = MemoryProvider::new();
    provider.insert_view(STATS, team_stats_view(&[("Expansion Tech", "e")]));
    provider.insert_view(
        STANDINGS,
        standings_view(vec![vec![standings_row("Expansion Tech", 3)]]),
    );

    let outcome = tokio_test::block_on(run_dataset(&mut provider, &team_plan(), options(1)));

    assert!(outcome.is_complete());
    assert_eq!(
        outcome.entities.get("Expansion Tech").unwrap().get("conference"),
        Some(UNKNOWN_CONFERENCE)
    );
}

#[test]
fn fixture_documents_drive_player_batches() {
    let json = r#"{
        "views": {
            "sort=gp": { "segments": [
                [["Players"]], [["Players"]], [["Players"]],
                [["1", "Jane Doe", "UBC", "20", "20", "31.2", "5", ".450", "2", ".380", "3", ".800", "15.1"]],
                [["1", "Jane Doe", "UBC", "20", "20", "1.1", "4.0", "5.1", "3.3", "2.0", "1.2", "0.4"]],
                [["1", "Jane Doe", "UBC", "20", "20", "2.2", "0", "1.65"]]
            ]},
            "sort=pts": { "segments": [
                [], [], [],
                [["1", "Jane Doe", "Victoria", "21", "19", "31.5", "6", ".460", "2", ".390", "3", ".810", "15.9"]],
                [],
                []
            ]}
        }
    }"#;
    let mut provider = MemoryProvider::from_fixtures(FixtureSet::from_json(json).unwrap());
    let plan = DatasetPlan::new(
        DatasetKind::PLAYER_WOMENS,
        vec![Batch::new("gp", "sort=gp"), Batch::new("pts", "sort=pts")],
    )
    .unwrap();

    let outcome = tokio_test::block_on(run_dataset(&mut provider, &plan, options(1)));

    assert!(outcome.is_complete());
    let jane = outcome.entities.get("Jane Doe").unwrap();
    assert_eq!(jane.len(), PLAYER_LAYOUT.schema.len());
    assert_eq!(jane.get("team"), Some("UBC"));
    assert_eq!(jane.get("games_played"), Some("20"));
    assert_eq!(jane.get("total_points"), Some("15.9"));
    assert_eq!(jane.get("blocks"), Some("0.4"));
    assert_eq!(jane.get("assist_to_turnover_ratio"), Some("1.65"));
}

#[test]
fn every_dataset_layout_accounts_for_its_schema() {
    for kind in DatasetKind::ALL {
        let layout = kind.layout();
        assert_eq!(
            layout.cursor_start.index() + layout.catalog.total_fields() + layout.trailing_reserved,
            layout.schema.len(),
            "{kind}"
        );
        assert!(DatasetPlan::new(kind, Vec::new()).is_ok());
    }
    assert_eq!(PLAYER_SORT_CATEGORIES.len(), 20);
}

#[test]
fn datasets_run_independently_and_merge() {
    let mut mens_provider = MemoryProvider::new();
    mens_provider.insert_view(STATS, team_stats_view(&[("Carleton", "c")]));
    let mut womens_provider = MemoryProvider::new();
    womens_provider.insert_view(STATS, team_stats_view(&[("Laval", "l")]));

    let mens_plan = DatasetPlan::new(DatasetKind::TEAM_MENS, vec![Batch::new("teams", STATS)]).unwrap();
    let womens_plan =
        DatasetPlan::new(DatasetKind::TEAM_WOMENS, vec![Batch::new("teams", STATS)]).unwrap();

    let (mens, womens) = tokio_test::block_on(async {
        tokio::join!(
            run_dataset(&mut mens_provider, &mens_plan, options(1)),
            run_dataset(&mut womens_provider, &womens_plan, options(1)),
        )
    });

    let data = merge([
        (mens.kind, mens.entities.clone()),
        (womens.kind, womens.entities.clone()),
    ]);
    assert_eq!(data.get(DatasetKind::TEAM_MENS), &mens.entities);
    assert_eq!(data.get(DatasetKind::TEAM_WOMENS), &womens.entities);
    assert!(data.team.mens.contains("Carleton"));
    assert!(!data.team.mens.contains("Laval"));
}
