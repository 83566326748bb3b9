use crate::candidate::{
    CandidateBuilder, CandidateSkeleton, build_candidates, persistent_edges, reconcile,
    remove_loops,
};
use crate::fixtures::{corridor, intersection};
use crate::metric::sspd;
use crate::network::EdgeId;
use crate::route::{Objective, RouteError};
use crate::snap::Snap;
use crate::trip::Trip;

use geo::{LineString, wkt};
use itertools::Itertools;

fn snap(edge: u64, distance: f64) -> Snap {
    Snap {
        edge: Some(EdgeId(edge)),
        distance,
    }
}

/// Travels the corridor through its southern detour, two points per edge.
fn southern_trajectory() -> LineString {
    wkt! {
        LINESTRING(
            50.0 0.0,60.0 0.0,
            150.0 0.0,160.0 0.0,
            200.0 -30.0,200.0 -60.0,
            250.0 -100.0,260.0 -100.0,
            300.0 -70.0,300.0 -40.0,
            350.0 0.0,360.0 0.0
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
fn runs_must_exceed_threshold() {
    let snaps = [
        snap(1, 0.0),
        snap(1, 0.2),
        snap(7, 0.1),
        snap(2, 0.3),
        snap(2, 0.0),
        snap(2, 0.0),
        Snap::unsnapped(),
        snap(2, 0.0),
        snap(1, 0.9),
        snap(1, 0.0),
    ];

    let kept = persistent_edges(&snaps, 1);
    assert_eq!(
        kept,
        vec![(EdgeId(1), 0.0), (EdgeId(2), 0.3), (EdgeId(1), 0.0)]
    );

    let strict = persistent_edges(&snaps, 3);
    assert_eq!(strict, vec![(EdgeId(2), 0.3)]);

    assert!(persistent_edges(&[], 0).is_empty());
}

#[test_log::test]
fn skeletons_collapse_when_sparse() {
    let persistent = [(EdgeId(3), 0.0), (EdgeId(4), 0.5), (EdgeId(3), 0.0)];

    let skeleton = CandidateSkeleton::select(&persistent, EdgeId(1), EdgeId(9), 1.0);
    assert!(skeleton.degenerate);
    assert_eq!(skeleton.edges, vec![EdgeId(1), EdgeId(9)]);

    let persistent = [
        (EdgeId(1), 0.0),
        (EdgeId(3), 0.0),
        (EdgeId(4), 0.5),
        (EdgeId(3), 0.0),
    ];

    let skeleton = CandidateSkeleton::select(&persistent, EdgeId(1), EdgeId(9), 1.0);
    assert!(!skeleton.degenerate);
    assert_eq!(
        skeleton.edges,
        vec![EdgeId(1), EdgeId(3), EdgeId(4), EdgeId(9)]
    );
}

#[test_log::test]
fn no_distances_no_candidates() -> Result<(), RouteError> {
    let network = corridor::network().expect("corridor fixture");
    let candidates = build_candidates(
        &network,
        &southern_trajectory(),
        corridor::MAIN[0],
        corridor::MAIN[3],
        &[],
        1,
    )?;

    assert!(candidates.is_empty());
    Ok(())
}

#[test_log::test]
fn follows_the_trajectory() -> Result<(), RouteError> {
    let network = corridor::network().expect("corridor fixture");
    let (start, end) = (corridor::MAIN[0], corridor::MAIN[3]);

    let candidates =
        build_candidates(&network, &southern_trajectory(), start, end, &[0.0, 1e6], 1)?;

    assert_eq!(candidates.len(), 2);
    for candidate in &candidates {
        assert_eq!(candidate.edges, southern_route());
    }

    assert_eq!(candidates[0].max_distance, 0.0);
    assert_eq!(candidates[1].max_distance, 1e6);

    Ok(())
}

#[test_log::test]
fn distant_snaps_need_a_larger_max_distance() -> Result<(), RouteError> {
    let network = corridor::network().expect("corridor fixture");
    let (start, end) = (corridor::MAIN[0], corridor::MAIN[3]);

    // Every point sits half a unit off its edge.
    let trajectory = wkt! {
        LINESTRING(
            150.0 0.5,160.0 0.5,
            200.5 -30.0,200.5 -60.0,
            250.0 -99.5,260.0 -99.5,
            299.5 -70.0,299.5 -40.0
        )
    };

    let candidates = build_candidates(&network, &trajectory, start, end, &[0.0, 1.0], 1)?;

    // Nothing survives at zero distance, so the direct (fastest) route is tried.
    let direct = [start]
        .into_iter()
        .chain(corridor::NORTH)
        .chain([corridor::MAIN[2], end])
        .collect_vec();
    assert_eq!(candidates[0].edges, direct);

    assert_eq!(candidates[1].edges, southern_route());

    Ok(())
}

#[test_log::test]
fn wider_max_distances_never_score_worse() -> Result<(), RouteError> {
    let network = corridor::network().expect("corridor fixture");
    let (start, end) = (corridor::MAIN[0], corridor::MAIN[3]);

    // The first four points drift 0.03 off the main road.
    let trajectory = wkt! {
        LINESTRING(
            50.0 0.03,60.0 0.03,
            150.0 0.03,160.0 0.03,
            200.0 -30.0,200.0 -60.0,
            250.0 -100.0,260.0 -100.0,
            300.0 -70.0,300.0 -40.0,
            350.0 0.0,360.0 0.0
        )
    };

    let candidates = build_candidates(&network, &trajectory, start, end, &[0.0, 0.01, 0.05], 1)?;
    assert_eq!(candidates.len(), 3);

    // Without the drifting waypoints the fastest join takes the northern detour.
    let northern = [start]
        .into_iter()
        .chain(corridor::NORTH)
        .chain(corridor::SOUTH)
        .chain([end])
        .collect_vec();
    assert_eq!(candidates[0].edges, northern);
    assert_eq!(candidates[1].edges, northern);
    assert_eq!(candidates[2].edges, southern_route());

    let scores = candidates
        .iter()
        .map(|candidate| -> Result<f64, RouteError> {
            let trip = Trip::new_with_network(&network, &candidate.edges)?;
            Ok(sspd(trip.linestring(), &trajectory))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (wider, narrower) in scores.iter().skip(1).zip(&scores) {
        assert!(wider <= narrower, "scores increased: {scores:?}");
    }
    assert!(scores[2] < scores[0], "scores did not improve: {scores:?}");

    Ok(())
}

#[test_log::test]
fn noise_and_unsnappable_points_are_ignored() -> Result<(), RouteError> {
    let network = corridor::network().expect("corridor fixture");

    let trajectory = wkt! {
        LINESTRING(
            50.0 0.0,60.0 0.0,
            150.0 0.0,150.0 100.0,160.0 0.0,170.0 0.0,
            200.0 -30.0,9000.0 9000.0,200.0 -60.0,
            250.0 -100.0,260.0 -100.0,
            300.0 -70.0,300.0 -40.0,
            350.0 0.0,360.0 0.0
        )
    };

    let candidates = build_candidates(
        &network,
        &trajectory,
        corridor::MAIN[0],
        corridor::MAIN[3],
        &[0.0],
        1,
    )?;

    assert_eq!(candidates[0].edges, southern_route());
    Ok(())
}

#[test_log::test]
fn unknown_endpoints_are_errors() {
    let network = corridor::network().expect("corridor fixture");

    let result = build_candidates(
        &network,
        &southern_trajectory(),
        EdgeId(500),
        corridor::MAIN[3],
        &[0.0],
        1,
    );

    assert_eq!(result, Err(RouteError::InvalidEdge(EdgeId(500))));
}

#[test_log::test]
fn reconciliation_skips_unreachable_pairs() -> Result<(), RouteError> {
    let network = intersection::network().expect("intersection fixture");
    let skeleton = CandidateSkeleton {
        max_distance: 0.0,
        edges: vec![
            intersection::LEFT,
            intersection::APPROACH,
            intersection::STRAIGHT,
        ],
        degenerate: false,
    };

    let path = reconcile(&network, &skeleton, Objective::Fastest, None)?;
    assert_eq!(
        path.edges,
        vec![intersection::APPROACH, intersection::STRAIGHT]
    );

    Ok(())
}

#[test_log::test]
fn builder_uses_its_objective() -> Result<(), RouteError> {
    let network = corridor::network().expect("corridor fixture");
    let (start, end) = (corridor::MAIN[0], corridor::MAIN[3]);
    let trajectory = wkt! { LINESTRING(50.0 0.0,60.0 0.0) };

    let shortest = CandidateBuilder::new(&network)
        .with_objective(Objective::Shortest)
        .build(&trajectory, start, end, &[0.0], 1)?;
    assert_eq!(shortest[0].edges, corridor::MAIN.to_vec());

    Ok(())
}

#[test_log::test]
fn loop_removal() {
    let plain = [1, 2, 3, 4].map(EdgeId);
    assert_eq!(remove_loops(&plain), plain.to_vec());

    let single = [1, 2, 3, 4, 2, 5].map(EdgeId);
    let removed = remove_loops(&single);
    assert!(removed.len() < single.len());
    assert_eq!(removed.iter().filter(|edge| **edge == EdgeId(2)).count(), 1);
    assert_eq!(removed, [1, 2, 5].map(EdgeId).to_vec());

    // Overlapping loops are handled in order of first appearance.
    let overlapping = [1, 2, 3, 1, 4, 2, 5].map(EdgeId);
    let removed = remove_loops(&overlapping);
    assert_eq!(removed, [1, 4, 2, 5].map(EdgeId).to_vec());
    assert!(removed.iter().all_unique());

    // A second pass changes nothing.
    assert_eq!(remove_loops(&removed), removed);
}
