use std::sync::{Arc, Mutex};
use std::time::Instant;

use super::sim_error::SimError;
use super::update::{NavSink, NavigationUpdate};
use super::vessel::{Direction, VesselState};
use super::waypoint::Waypoint;
use super::{KNOTS_TO_MPS, TICK_FREQUENCY_MILLIS};

/// Tunable parameters of the motion model.
///
/// The arrival threshold is a physical distance in meters; `time_scale` is
/// an independent multiplier on elapsed time, useful for speeding up a
/// simulation run without also widening the arrival radius.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub tick_interval_ms: u64,
    pub max_turn_rate_deg: f64,
    pub arrival_threshold_m: f64,
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            tick_interval_ms: TICK_FREQUENCY_MILLIS,
            max_turn_rate_deg: 10.0,
            arrival_threshold_m: 5.0,
            time_scale: 1.0,
        }
    }
}

struct TickState {
    vessel: VesselState,
    last_tick: Instant,
}

/// Advances a single vessel along an oscillating patrol route and emits a
/// navigation update to the broadcast sink after every tick.
///
/// The vessel state lives behind a `Mutex`, so ticks are serialized even if
/// the caller schedules them from more than one thread.
pub struct Simulator {
    route: Vec<Waypoint>,
    config: SimConfig,
    state: Mutex<TickState>,
    sink: Arc<dyn NavSink>,
}

impl Simulator {
    /// Creates a simulator seeded at the first waypoint of `route`, heading
    /// toward the second.
    ///
    /// Routes with fewer than two waypoints cannot define a direction of
    /// travel and are rejected.
    pub fn new(
        route: Vec<Waypoint>,
        config: SimConfig,
        sink: Arc<dyn NavSink>,
    ) -> Result<Self, SimError> {
        if route.len() < 2 {
            return Err(SimError::RouteTooShort(route.len()));
        }

        let start = &route[0];
        let initial_course = start.position.bearing_to(&route[1].position);
        let vessel = VesselState {
            position: start.position,
            course_over_ground: initial_course,
            heading: initial_course,
            speed_mps: start.target_speed_knots * KNOTS_TO_MPS,
            active_waypoint: 0,
            direction: Direction::Forward,
        };

        Ok(Simulator {
            route,
            config,
            state: Mutex::new(TickState {
                vessel,
                last_tick: Instant::now(),
            }),
            sink,
        })
    }

    /// Runs one tick using the wall-clock time elapsed since the previous
    /// tick and publishes the resulting update. Elapsed time is scaled by
    /// `time_scale` inside the motion step.
    ///
    /// A long gap between ticks (e.g. after a pause) may overshoot a
    /// waypoint in a single move; the arrival check runs on the post-move
    /// distance, so the overshoot is detected on the following tick rather
    /// than prevented.
    pub fn tick(&self) -> Result<NavigationUpdate, SimError> {
        let update = {
            let mut state = self
                .state
                .lock()
                .map_err(|_| SimError::StateLockError("vessel state lock poisoned".to_string()))?;

            let now = Instant::now();
            let dt = now.duration_since(state.last_tick).as_secs_f64();
            state.last_tick = now;

            self.step(&mut state.vessel, dt);
            NavigationUpdate::from(&state.vessel)
        };

        self.sink.publish(&update);
        Ok(update)
    }

    /// Runs one tick with an explicit elapsed time in seconds. This is the
    /// deterministic core behind `tick`.
    pub fn advance(&self, dt_seconds: f64) -> Result<NavigationUpdate, SimError> {
        let update = {
            let mut state = self
                .state
                .lock()
                .map_err(|_| SimError::StateLockError("vessel state lock poisoned".to_string()))?;

            state.last_tick = Instant::now();
            self.step(&mut state.vessel, dt_seconds);
            NavigationUpdate::from(&state.vessel)
        };

        self.sink.publish(&update);
        Ok(update)
    }

    /// Returns a snapshot of the current vessel state.
    pub fn state(&self) -> Result<VesselState, SimError> {
        let state = self
            .state
            .lock()
            .map_err(|_| SimError::StateLockError("vessel state lock poisoned".to_string()))?;
        Ok(state.vessel)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn route(&self) -> &[Waypoint] {
        &self.route
    }

    // One step of the motion model: move along the current course, check
    // arrival against the post-move distance, reverse at the route ends,
    // then steer toward the target with a bounded turn rate.
    fn step(&self, vessel: &mut VesselState, dt_seconds: f64) {
        let travelled = vessel.speed_mps * dt_seconds * self.config.time_scale;
        let new_position = vessel
            .position
            .destination_point(vessel.course_over_ground, travelled);

        let target = &self.route[vessel.target_index()];
        if new_position.distance_to(&target.position) < self.config.arrival_threshold_m {
            vessel.active_waypoint = vessel.target_index();
            vessel.speed_mps = self.route[vessel.active_waypoint].target_speed_knots * KNOTS_TO_MPS;

            let last = self.route.len() - 1;
            if vessel.active_waypoint == last && vessel.direction == Direction::Forward {
                vessel.direction = vessel.direction.flipped();
            } else if vessel.active_waypoint == 0 && vessel.direction == Direction::Reverse {
                vessel.direction = vessel.direction.flipped();
            }
        }

        let next = &self.route[vessel.target_index()];
        let desired = new_position.bearing_to(&next.position);

        // Shortest-turn delta, clamped to the per-tick turn rate. The clamp
        // is exact: a large required change produces exactly the maximum
        // turn, never a proportional fraction of it.
        let max = self.config.max_turn_rate_deg;
        let delta = ((desired - vessel.course_over_ground + 180.0).rem_euclid(360.0) - 180.0)
            .clamp(-max, max);
        vessel.course_over_ground = (vessel.course_over_ground + delta).rem_euclid(360.0);
        vessel.heading = vessel.course_over_ground;

        vessel.position = new_position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geodesy::GeoPoint;

    struct CollectSink {
        updates: Mutex<Vec<NavigationUpdate>>,
    }

    impl CollectSink {
        fn new() -> Arc<Self> {
            Arc::new(CollectSink {
                updates: Mutex::new(Vec::new()),
            })
        }
    }

    impl NavSink for CollectSink {
        fn publish(&self, update: &NavigationUpdate) {
            self.updates.lock().unwrap().push(update.clone());
        }
    }

    const HARBOR: GeoPoint = GeoPoint {
        lat: 55.6761,
        lon: 12.5683,
    };

    // A straight eastbound leg of the given length in meters.
    fn straight_route(leg_m: f64) -> Vec<Waypoint> {
        vec![
            Waypoint::new(HARBOR, 6.0),
            Waypoint::new(HARBOR.destination_point(90.0, leg_m), 6.0),
        ]
    }

    #[test]
    fn test_rejects_routes_with_fewer_than_two_waypoints() {
        let sink = CollectSink::new();
        assert!(matches!(
            Simulator::new(Vec::new(), SimConfig::default(), sink.clone()),
            Err(SimError::RouteTooShort(0))
        ));
        assert!(matches!(
            Simulator::new(vec![Waypoint::new(HARBOR, 6.0)], SimConfig::default(), sink),
            Err(SimError::RouteTooShort(1))
        ));
    }

    #[test]
    fn test_initial_state_seeded_from_first_waypoint() {
        let route = straight_route(1_000.0);
        let sim = Simulator::new(route.clone(), SimConfig::default(), CollectSink::new()).unwrap();

        let state = sim.state().unwrap();
        assert_eq!(state.position, HARBOR);
        assert_eq!(state.active_waypoint, 0);
        assert_eq!(state.direction, Direction::Forward);
        assert!((state.speed_mps - 6.0 * KNOTS_TO_MPS).abs() < 1e-12);

        let expected_course = HARBOR.bearing_to(&route[1].position);
        assert_eq!(state.course_over_ground, expected_course);
        assert_eq!(state.heading, state.course_over_ground);
    }

    #[test]
    fn test_approach_is_monotonic_and_advances_exactly_once() {
        let route = straight_route(1_000.0);
        let target = route[1].position;
        let sim = Simulator::new(route, SimConfig::default(), CollectSink::new()).unwrap();

        let mut previous = sim.state().unwrap().position.distance_to(&target);
        let mut advancements = 0;
        for _ in 0..1_000 {
            sim.advance(1.0).unwrap();
            let state = sim.state().unwrap();
            if state.active_waypoint == 1 {
                advancements += 1;
                break;
            }
            let distance = state.position.distance_to(&target);
            assert!(
                distance < previous,
                "distance did not decrease: {} -> {}",
                previous,
                distance
            );
            previous = distance;
        }

        assert_eq!(advancements, 1, "never arrived at the target waypoint");
        assert!(previous < 10.0, "advanced while still {} m away", previous);

        // No second advancement right after arrival
        sim.advance(1.0).unwrap();
        assert_eq!(sim.state().unwrap().active_waypoint, 1);
    }

    #[test]
    fn test_direction_reverses_at_route_ends() {
        let mid = HARBOR.destination_point(90.0, 1_000.0);
        let route = vec![
            Waypoint::new(HARBOR, 6.0),
            Waypoint::new(mid, 6.0),
            Waypoint::new(mid.destination_point(90.0, 1_000.0), 6.0),
        ];
        let sim = Simulator::new(route, SimConfig::default(), CollectSink::new()).unwrap();

        for _ in 0..2_000 {
            sim.advance(1.0).unwrap();
            if sim.state().unwrap().active_waypoint == 2 {
                break;
            }
        }

        let state = sim.state().unwrap();
        assert_eq!(state.active_waypoint, 2, "never reached the last waypoint");
        assert_eq!(state.direction, Direction::Reverse);
        // The vessel now targets the second-to-last waypoint.
        assert_eq!(state.target_index(), 1);
    }

    #[test]
    fn test_returns_to_start_and_flips_forward_again() {
        let route = straight_route(500.0);
        let sim = Simulator::new(route, SimConfig::default(), CollectSink::new()).unwrap();

        let mut saw_reverse = false;
        for _ in 0..2_000 {
            sim.advance(1.0).unwrap();
            let state = sim.state().unwrap();
            if state.direction == Direction::Reverse {
                saw_reverse = true;
            }
            if saw_reverse && state.active_waypoint == 0 {
                assert_eq!(state.direction, Direction::Forward);
                return;
            }
        }
        panic!("vessel never completed a full patrol lap");
    }

    #[test]
    fn test_turn_rate_is_clamped_exactly() {
        // The second waypoint sits inside the arrival radius, so the first
        // tick arrives immediately and the target jumps to a waypoint at a
        // right angle from the current course.
        let near = HARBOR.destination_point(90.0, 4.0);
        let north = HARBOR.destination_point(0.0, 1_000.0);
        let route = vec![
            Waypoint::new(HARBOR, 6.0),
            Waypoint::new(near, 10.0),
            Waypoint::new(north, 10.0),
        ];
        let sim = Simulator::new(route, SimConfig::default(), CollectSink::new()).unwrap();
        let initial_course = sim.state().unwrap().course_over_ground;
        assert!((initial_course - 90.0).abs() < 0.01);

        sim.advance(0.1).unwrap();
        let state = sim.state().unwrap();
        assert_eq!(state.active_waypoint, 1);
        // Required change is close to -90 degrees; the applied change must
        // be exactly the 10-degree limit.
        assert_eq!(state.course_over_ground, initial_course - 10.0);
        assert_eq!(state.heading, state.course_over_ground);
    }

    #[test]
    fn test_speed_adopts_target_speed_on_arrival() {
        let near = HARBOR.destination_point(90.0, 4.0);
        let far = HARBOR.destination_point(90.0, 1_000.0);
        let route = vec![
            Waypoint::new(HARBOR, 6.0),
            Waypoint::new(near, 10.0),
            Waypoint::new(far, 10.0),
        ];
        let sim = Simulator::new(route, SimConfig::default(), CollectSink::new()).unwrap();

        sim.advance(0.1).unwrap();
        let state = sim.state().unwrap();
        assert_eq!(state.active_waypoint, 1);
        assert!((state.speed_mps - 10.0 * KNOTS_TO_MPS).abs() < 1e-12);
    }

    #[test]
    fn test_every_tick_reaches_the_sink() {
        let sink = CollectSink::new();
        let sim = Simulator::new(straight_route(1_000.0), SimConfig::default(), sink.clone())
            .unwrap();

        sim.advance(1.0).unwrap();
        sim.advance(1.0).unwrap();

        let updates = sink.updates.lock().unwrap();
        assert_eq!(updates.len(), 2);

        let state = sim.state().unwrap();
        let last = updates.last().unwrap();
        assert_eq!(last.position, [state.position.lon, state.position.lat]);
        assert_eq!(last.cog, state.course_over_ground);
        assert_eq!(last.hdg, state.heading);
        assert_eq!(last.speed, state.speed_mps);
    }

    #[test]
    fn test_time_scale_multiplies_travelled_distance() {
        let route = straight_route(10_000.0);
        let config = SimConfig {
            time_scale: 10.0,
            ..SimConfig::default()
        };
        let scaled = Simulator::new(route.clone(), config, CollectSink::new()).unwrap();
        let plain = Simulator::new(route, SimConfig::default(), CollectSink::new()).unwrap();

        scaled.advance(1.0).unwrap();
        plain.advance(1.0).unwrap();
        let d_scaled = HARBOR.distance_to(&scaled.state().unwrap().position);
        let d_plain = HARBOR.distance_to(&plain.state().unwrap().position);
        assert!(
            (d_scaled - 10.0 * d_plain).abs() < 0.01,
            "scaled {} vs plain {}",
            d_scaled,
            d_plain
        );
    }
}
