use crate::fixtures::{corridor, intersection, square};
use crate::matcher::{MatchConfig, MatchError, MatchRequest, Matcher, Strategy};
use crate::network::EdgeId;
use crate::route::{Objective, RouteError};
use crate::snap::SnapConfig;

use approx::assert_relative_eq;
use geo::{LineString, wkt};
use itertools::Itertools;

fn straight_trajectory() -> LineString {
    wkt! { LINESTRING(0.0 0.0,50.0 0.0,100.0 0.0,150.0 0.0,200.0 0.0,250.0 0.0,300.0 0.0,350.0 0.0,400.0 0.0) }
}

/// Leaves the main road at `x = 200` and rejoins it at `x = 300` through the south.
fn southern_trajectory() -> LineString {
    wkt! {
        LINESTRING(
            0.0 0.0,50.0 0.0,100.0 0.0,150.0 0.0,200.0 0.0,
            200.0 -50.0,200.0 -100.0,250.0 -100.0,300.0 -100.0,300.0 -50.0,
            300.0 0.0,350.0 0.0,400.0 0.0
        )
    }
}

fn southern_route() -> Vec<EdgeId> {
    [corridor::MAIN[0], corridor::MAIN[1]]
        .into_iter()
        .chain(corridor::SOUTH)
        .chain([corridor::MAIN[3]])
        .collect_vec()
}

#[test_log::test]
fn defaults() {
    let config = MatchConfig::default();

    assert_eq!(config.max_distances, vec![0.0, 0.01, 0.025, 0.05, 0.1]);
    assert_eq!(config.thresholds, vec![1]);
    assert_relative_eq!(config.acceptance_threshold, 5e-5);
    assert!(config.early_stop);
    assert_eq!(config.reconcile_objective, Objective::Fastest);
    assert_eq!(config.snap, SnapConfig { attempts: 90 });
}

#[test_log::test]
fn single_edge_trajectory() -> Result<(), MatchError> {
    let network = square::network().expect("square fixture");
    let trajectory = wkt! { LINESTRING(0.0 0.0,2.5 0.0,5.0 0.0,7.5 0.0,10.0 0.0) };

    let result = Matcher::new(&network).match_trajectory(&trajectory, square::A, square::A)?;

    assert_eq!(result.edges, vec![square::A]);
    assert!(result.score.abs() < 1e-9);
    assert_relative_eq!(result.length, 10.0);
    assert_eq!(result.strategy, Strategy::Fastest);

    Ok(())
}

#[test_log::test]
fn shortest_accepted_on_main_road() -> Result<(), MatchError> {
    let network = corridor::network().expect("corridor fixture");
    let matcher = Matcher::new(&network);
    let (start, end) = (corridor::MAIN[0], corridor::MAIN[3]);

    let fastest = matcher.match_fastest(&straight_trajectory(), start, end)?;
    assert!(fastest.score > 1.0);

    let result = matcher.match_trajectory(&straight_trajectory(), start, end)?;
    assert_eq!(result.edges, corridor::MAIN.to_vec());
    assert_eq!(result.strategy, Strategy::Shortest);
    assert!(result.score.abs() < 1e-9);
    assert_relative_eq!(result.length, 400.0);

    Ok(())
}

#[test_log::test]
fn adaptive_search_finds_detour() -> Result<(), MatchError> {
    let network = corridor::network().expect("corridor fixture");
    let matcher = Matcher::new(&network);
    let (start, end) = (corridor::MAIN[0], corridor::MAIN[3]);

    let shortest = matcher.match_shortest(&southern_trajectory(), start, end)?;
    assert_eq!(shortest.edges, corridor::MAIN.to_vec());
    assert!(shortest.score > 1.0);

    let result = matcher.match_trajectory(&southern_trajectory(), start, end)?;
    assert_eq!(result.edges, southern_route());
    assert!(result.score.abs() < 1e-9);
    assert_relative_eq!(result.length, 600.0);
    assert_eq!(
        result.strategy,
        Strategy::Adaptive {
            max_distance: 0.0,
            threshold: 1
        }
    );

    Ok(())
}

#[test_log::test]
fn exhaustive_grid_keeps_earliest_tie() -> Result<(), MatchError> {
    let network = corridor::network().expect("corridor fixture");
    let matcher = Matcher::new(&network).with_config(
        MatchConfig::default()
            .with_early_stop(false)
            .with_thresholds([1, 2]),
    );

    let adaptive = matcher
        .match_adaptive(&southern_trajectory(), corridor::MAIN[0], corridor::MAIN[3])?
        .expect("grid is not empty");

    assert_eq!(adaptive.edges, southern_route());
    assert_eq!(
        adaptive.strategy,
        Strategy::Adaptive {
            max_distance: 0.0,
            threshold: 1
        }
    );

    Ok(())
}

#[test_log::test]
fn empty_grid_falls_back_to_direct_routes() -> Result<(), MatchError> {
    let network = corridor::network().expect("corridor fixture");
    let matcher = Matcher::new(&network).with_config(MatchConfig::default().with_max_distances([]));
    let (start, end) = (corridor::MAIN[0], corridor::MAIN[3]);

    assert_eq!(matcher.match_adaptive(&southern_trajectory(), start, end)?, None);

    let result = matcher.match_trajectory(&southern_trajectory(), start, end)?;
    assert_eq!(result.strategy, Strategy::Shortest);
    assert_eq!(result.edges, corridor::MAIN.to_vec());

    Ok(())
}

#[test_log::test]
fn unreachable_end_uses_direct_pair() -> Result<(), MatchError> {
    let network = intersection::network().expect("intersection fixture");
    let trajectory = wkt! { LINESTRING(105.0 50.0,105.0 60.0) };

    let result = Matcher::new(&network).match_trajectory(
        &trajectory,
        intersection::LEFT,
        intersection::APPROACH,
    )?;

    assert_eq!(result.edges, vec![intersection::LEFT, intersection::APPROACH]);
    assert_eq!(result.strategy, Strategy::Fastest);
    assert!(result.score.is_finite());
    assert_relative_eq!(result.length, 200.0);

    Ok(())
}

#[test_log::test]
fn invalid_input() {
    let network = corridor::network().expect("corridor fixture");
    let matcher = Matcher::new(&network);

    let empty = LineString::new(vec![]);
    assert_eq!(
        matcher.match_trajectory(&empty, corridor::MAIN[0], corridor::MAIN[3]),
        Err(MatchError::NoPointsProvided)
    );

    assert_eq!(
        matcher.match_trajectory(&straight_trajectory(), EdgeId(999), corridor::MAIN[3]),
        Err(MatchError::Route(RouteError::InvalidEdge(EdgeId(999))))
    );
}

#[test_log::test]
fn batch_matches_in_order() {
    let network = corridor::network().expect("corridor fixture");
    let matcher = Matcher::new(&network);
    let (start, end) = (corridor::MAIN[0], corridor::MAIN[3]);

    let requests = vec![
        MatchRequest::new(southern_trajectory(), start, end),
        MatchRequest::new(LineString::new(vec![]), start, end),
        MatchRequest::new(straight_trajectory(), start, end),
    ];

    let results = matcher.match_batch(&requests);
    assert_eq!(results.len(), 3);

    assert_eq!(
        results[0],
        matcher.match_trajectory(&southern_trajectory(), start, end)
    );
    assert_eq!(results[1], Err(MatchError::NoPointsProvided));
    assert_eq!(
        results[2].as_ref().map(|result| result.strategy),
        Ok(Strategy::Shortest)
    );
}
