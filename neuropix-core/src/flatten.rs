//! Ragged-to-flat transformation of per-event hit lists.

use crate::error::{Error, Result};
use crate::hit::HitColumns;
use crate::source::{SimulationSource, GLOBAL_BRANCH};

/// Flattens the per-event hit lists of one detector into parallel columns.
///
/// All four record collections are resolved once, up front: the hit,
/// charge, and particle collections by detector name, the track collection
/// by its reserved `"global"` branch. Every resolved branch must carry one
/// entry list per event; events are then visited in input order and each
/// hit appended as one `(event, x, y, time)` row, so `event_number` comes
/// out non-decreasing with hits of one event contiguous.
///
/// Charge, particle, and track entries are required and validated for
/// event synchronization but carry no output fields yet.
///
/// # Errors
/// Returns an error if a branch cannot be resolved for the detector name
/// or a collection is not synchronized to the hit collection's event count.
#[allow(clippy::cast_possible_wrap)]
pub fn flatten_events<S: SimulationSource>(source: &S, detector: &str) -> Result<HitColumns> {
    let hits = resolve_branch(source.pixel_hits().branch(detector), "PixelHit", detector)?;
    let charges = resolve_branch(
        source.pixel_charges().branch(detector),
        "PixelCharge",
        detector,
    )?;
    let particles = resolve_branch(
        source.mc_particles().branch(detector),
        "MCParticle",
        detector,
    )?;
    let tracks = resolve_branch(
        source.mc_tracks().branch(GLOBAL_BRANCH),
        "MCTrack",
        GLOBAL_BRANCH,
    )?;

    let event_count = hits.len();
    check_synchronized("PixelCharge", event_count, charges.len())?;
    check_synchronized("MCParticle", event_count, particles.len())?;
    check_synchronized("MCTrack", event_count, tracks.len())?;

    let mut columns = HitColumns::with_capacity(event_count);
    for (iev, event_hits) in hits.iter().enumerate() {
        for hit in event_hits {
            columns.push(iev as i64, hit.x, hit.y, hit.global_time);
        }
    }

    Ok(columns)
}

fn resolve_branch<'a, T>(
    branch: Option<&'a [Vec<T>]>,
    collection: &'static str,
    detector: &str,
) -> Result<&'a [Vec<T>]> {
    branch.ok_or_else(|| Error::DetectorNotFound {
        collection,
        detector: detector.to_string(),
    })
}

fn check_synchronized(collection: &'static str, expected: usize, actual: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::DesynchronizedCollection {
            collection,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Collection, McParticle, McTrack, PixelCharge, PixelHit, SimulationData};
    use approx::assert_relative_eq;

    fn hit(x: i32, y: i32, global_time: f64) -> PixelHit {
        PixelHit { x, y, global_time }
    }

    fn sample_source(detector: &str, hits: Vec<Vec<PixelHit>>) -> SimulationData {
        let events = hits.len();
        let mut data = SimulationData::default();
        data.pixel_hits.insert_branch(detector, hits);
        data.pixel_charges
            .insert_branch(detector, vec![vec![PixelCharge { charge: 600 }]; events]);
        data.mc_particles
            .insert_branch(detector, vec![vec![McParticle { particle_id: 11 }]; events]);
        data.mc_tracks
            .insert_branch(GLOBAL_BRANCH, vec![vec![McTrack { particle_id: 11 }]; events]);
        data
    }

    #[test]
    fn test_flatten_preserves_hit_tuples_in_order() {
        let source = sample_source(
            "timepix",
            vec![
                vec![hit(1, 2, 0.25), hit(3, 4, 0.50)],
                vec![],
                vec![hit(5, 6, 0.75)],
            ],
        );

        let columns = flatten_events(&source, "timepix").unwrap();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns.event_number, vec![0, 0, 2]);
        assert_eq!(columns.x, vec![1, 3, 5]);
        assert_eq!(columns.y, vec![2, 4, 6]);
        assert_relative_eq!(columns.time[0], 0.25);
        assert_relative_eq!(columns.time[2], 0.75);
    }

    #[test]
    fn test_flatten_event_numbers_non_decreasing() {
        let hits: Vec<Vec<PixelHit>> = (0..10)
            .map(|iev| vec![hit(iev, iev, f64::from(iev)); (iev as usize) % 3])
            .collect();
        let source = sample_source("timepix", hits);

        let columns = flatten_events(&source, "timepix").unwrap();
        assert!(columns
            .event_number
            .windows(2)
            .all(|pair| pair[0] <= pair[1]));
        assert!(columns.event_number.iter().all(|&ev| ev >= 0 && ev < 10));
    }

    #[test]
    fn test_flatten_no_events() {
        let source = sample_source("timepix", vec![]);
        let columns = flatten_events(&source, "timepix").unwrap();
        assert!(columns.is_empty());
    }

    #[test]
    fn test_unknown_detector_is_fatal() {
        let source = sample_source("timepix", vec![vec![hit(1, 1, 0.0)]]);
        let err = flatten_events(&source, "medipix").unwrap_err();
        match err {
            Error::DetectorNotFound {
                collection,
                detector,
            } => {
                assert_eq!(collection, "PixelHit");
                assert_eq!(detector, "medipix");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_global_track_branch_is_fatal() {
        let mut source = sample_source("timepix", vec![vec![hit(1, 1, 0.0)]]);
        source.mc_tracks = Collection::new();
        let err = flatten_events(&source, "timepix").unwrap_err();
        assert!(matches!(
            err,
            Error::DetectorNotFound {
                collection: "MCTrack",
                ..
            }
        ));
    }

    #[test]
    fn test_desynchronized_collection_is_fatal() {
        let mut source = sample_source("timepix", vec![vec![hit(1, 1, 0.0)], vec![]]);
        source.pixel_charges = Collection::new();
        source
            .pixel_charges
            .insert_branch("timepix", vec![vec![PixelCharge { charge: 1 }]]);
        let err = flatten_events(&source, "timepix").unwrap_err();
        assert!(matches!(
            err,
            Error::DesynchronizedCollection {
                collection: "PixelCharge",
                expected: 2,
                actual: 1,
            }
        ));
    }
}
