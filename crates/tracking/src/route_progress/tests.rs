//! Unit tests for the route progress engine.

#[cfg(test)]
mod tests {
    use chrono::Local;

    use crate::config::TrackingConfig;
    use crate::fleet::{
        PassengerAssignment, PassengerResponses, PickupStatus, StopCoordinates, Van, VanStatus,
    };
    use crate::geo::{Bounds, LatLng};
    use crate::route_progress::engine::*;

    fn line_stops() -> StopCoordinates {
        let mut stops = StopCoordinates::default();
        stops.insert("A", LatLng::new(0.0, 0.0));
        stops.insert("B", LatLng::new(1.0, 0.0));
        stops.insert("C", LatLng::new(2.0, 0.0));
        stops
    }

    fn en_route(id: u32, route: &[&str]) -> Van {
        let mut van = Van::new(
            id,
            format!("Van {id}"),
            route.iter().map(|s| s.to_string()).collect(),
            LatLng::new(0.0, 0.0),
        );
        van.status = VanStatus::EnRoute;
        van
    }

    fn config() -> TrackingConfig {
        TrackingConfig {
            arrival_threshold: 0.01,
            ..Default::default()
        }
    }

    fn step(vans: Vec<Van>, stops: &StopCoordinates, config: &TrackingConfig) -> TickOutcome {
        let responses = PassengerResponses::default();
        let ctx = TickContext {
            stops,
            responses: &responses,
            config,
            now: Local::now(),
        };
        advance_fleet(&vans, &ctx)
    }

    #[test]
    fn test_segment_at() {
        assert_eq!(segment_at(0.0, 2), (0, 0.0));
        let (i, f) = segment_at(0.75, 2);
        assert_eq!(i, 1);
        assert!((f - 0.5).abs() < 1e-12);
        assert_eq!(segment_at(-0.2, 2), (0, 0.0));
    }

    #[test]
    fn test_first_tick_moves_toward_second_stop() {
        let stops = line_stops();
        let config = config();
        let outcome = step(vec![en_route(1, &["A", "B", "C"])], &stops, &config);
        let van = &outcome.vans[0];
        assert!((van.progress - config.progress_increment).abs() < 1e-12);
        assert!(van.current_location.lat > 0.0);
        assert_eq!(van.current_stop, "B");
        assert_eq!(van.eta, "22 min");
        // Still right at A, so A counts as reached.
        assert_eq!(van.completed_stops, vec!["A".to_string()]);
        assert_eq!(outcome.arrivals.len(), 1);
    }

    #[test]
    fn test_idle_and_completed_vans_untouched() {
        let stops = line_stops();
        let config = config();
        let idle = {
            let mut v = en_route(1, &["A", "B"]);
            v.status = VanStatus::Idle;
            v
        };
        let done = {
            let mut v = en_route(2, &["A", "B"]);
            v.status = VanStatus::Completed;
            v.current_location = LatLng::new(9.0, 9.0);
            v
        };
        let outcome = step(vec![idle.clone(), done.clone()], &stops, &config);
        assert_eq!(outcome.vans, vec![idle, done]);
        assert!(outcome.arrivals.is_empty());
        assert!(outcome.completed.is_empty());
    }

    #[test]
    fn test_progress_is_clamped_below_one() {
        let stops = line_stops();
        let config = config();
        let mut van = en_route(1, &["A", "B", "C"]);
        van.progress = config.max_progress - config.progress_increment / 2.0;
        let outcome = step(vec![van], &stops, &config);
        let van = &outcome.vans[0];
        assert_eq!(van.progress, config.max_progress);
        assert_eq!(van.status, VanStatus::EnRoute);
    }

    #[test]
    fn test_completion_snaps_to_last_stop() {
        let stops = line_stops();
        let config = config();
        let mut van = en_route(1, &["A", "B", "C"]);
        van.progress = config.max_progress;
        van.current_location = LatLng::new(1.98, 0.0);
        van.passengers = vec![PassengerAssignment::waiting("Dana", "B")];

        let outcome = step(vec![van], &stops, &config);
        let van = &outcome.vans[0];
        assert_eq!(van.status, VanStatus::Completed);
        assert_eq!(van.current_location, LatLng::new(2.0, 0.0));
        assert_eq!(van.completed_stops, vec!["A", "B", "C"]);
        assert_eq!(van.current_stop, "C");
        assert_eq!(van.eta, "0 min");
        assert_eq!(van.passengers[0].status, PickupStatus::Picked);
        assert!(van.passengers[0].pickup_time.is_some());
        assert_eq!(outcome.completed, vec![1]);
        assert_eq!(outcome.arrivals.len(), 3);
    }

    #[test]
    fn test_short_route_stays_parked() {
        let stops = line_stops();
        let config = config();
        let mut single = en_route(1, &["A"]);
        single.current_location = LatLng::new(0.5, 0.5);
        let empty = en_route(2, &[]);

        let outcome = step(vec![single.clone(), empty.clone()], &stops, &config);
        assert_eq!(outcome.vans, vec![single, empty]);
        assert_eq!(outcome.parked, vec![1, 2]);
    }

    #[test]
    fn test_missing_stop_holds_position() {
        let stops = line_stops();
        let config = config();
        let mut van = en_route(1, &["A", "Nowhere", "C"]);
        van.current_location = LatLng::new(0.3, 0.0);

        let outcome = step(vec![van, en_route(2, &["A", "B", "C"])], &stops, &config);
        let held = &outcome.vans[0];
        assert_eq!(held.current_location, LatLng::new(0.3, 0.0));
        assert!(held.progress > 0.0, "progress still advances");
        assert_eq!(
            outcome.unresolved,
            vec![UnresolvedStop {
                van: 1,
                stop: "Nowhere".into()
            }]
        );

        let other = &outcome.vans[1];
        assert!(other.current_location.lat > 0.0, "other vans keep moving");
    }

    #[test]
    fn test_position_stays_inside_segment_bounds() {
        let mut stops = StopCoordinates::default();
        stops.insert("P", LatLng::new(32.08, 34.78));
        stops.insert("Q", LatLng::new(32.10, 34.80));
        stops.insert("R", LatLng::new(32.09, 34.83));
        let config = TrackingConfig {
            progress_increment: 0.013,
            ..Default::default()
        };

        let mut vans = vec![en_route(1, &["P", "Q", "R"])];
        for _ in 0..200 {
            let outcome = step(vans, &stops, &config);
            vans = outcome.vans;
            let van = &vans[0];
            if van.status != VanStatus::EnRoute {
                break;
            }
            let (i, _) = segment_at(van.progress, van.segment_count());
            let a = stops.get(&van.stops[i]).unwrap();
            let b = stops.get(&van.stops[i + 1]).unwrap();
            assert!(
                Bounds::of_segment(a, b).contains(van.current_location),
                "position {:?} outside segment {i}",
                van.current_location
            );
        }
        assert_eq!(vans[0].status, VanStatus::Completed);
    }

    #[test]
    fn test_eta_counts_down() {
        let stops = line_stops();
        let config = TrackingConfig {
            progress_increment: 0.25,
            ..config()
        };
        let mut vans = vec![en_route(1, &["A", "B", "C"])];
        let mut etas = Vec::new();
        for _ in 0..3 {
            vans = step(vans, &stops, &config).vans;
            etas.push(vans[0].eta.clone());
        }
        assert_eq!(etas, vec!["17 min", "11 min", "6 min"]);
    }

    #[test]
    fn test_nonmatching_passenger_waits_until_completion() {
        let stops = line_stops();
        let config = config();
        let mut van = en_route(1, &["A", "B", "C"]);
        van.passengers = vec![PassengerAssignment::waiting("Eli", "C")];
        let outcome = step(vec![van], &stops, &config);
        assert_eq!(outcome.vans[0].passengers[0].status, PickupStatus::Waiting);
    }
}
