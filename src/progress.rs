use crate::physics::vehicle::VehicleState;
use crate::track::TrackGeometry;
use crate::GLOBAL_CONFIG;

// a lap is a wraparound of the progress index: leaving the late stretch of
// the sample range and reappearing in the early stretch
const LATE_FRACTION: f64 = 0.8;
const EARLY_FRACTION: f64 = 0.2;

pub fn update_progress(vehicle: &mut VehicleState, track: &TrackGeometry, now: f64) {
    let count = track.sample_count() as f64;
    let prev = vehicle.lap_info.prev_progress_index as f64;
    let current = vehicle.nearest_sample as f64;

    let wrapped = prev > count * LATE_FRACTION && current < count * EARLY_FRACTION;
    // the debounce rejects back-and-forth jitter right on the start line
    let debounced =
        now - vehicle.lap_info.last_lap_timestamp >= GLOBAL_CONFIG.lap_debounce_seconds;
    if wrapped && debounced {
        vehicle.lap_info.lap += 1;
        vehicle.lap_info.last_lap_timestamp = now;
    }

    vehicle.lap_info.prev_progress_index = vehicle.nearest_sample;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::TrackParams;
    use glam::DVec3;

    const DT: f64 = 1.0 / 60.0;

    fn test_track() -> TrackGeometry {
        TrackGeometry::build(&TrackParams::default()).unwrap()
    }

    // march the progress index around the loop as if driving at a steady
    // speed, one sample per tick
    fn march(vehicle: &mut VehicleState, track: &TrackGeometry, clock: &mut f64, steps: usize) {
        let count = track.sample_count();
        let from = vehicle.nearest_sample;
        for step in 1..=steps {
            *clock += DT;
            vehicle.nearest_sample = (from + step) % count;
            update_progress(vehicle, track, *clock);
        }
    }

    #[test]
    fn test_one_revolution_counts_one_lap() {
        let track = test_track();
        let mut vehicle = VehicleState::new(DVec3::ZERO, 0.0);
        let mut clock = 0.0;

        let count = track.sample_count();
        march(&mut vehicle, &track, &mut clock, count - 1);
        assert_eq!(vehicle.lap_info.lap, 0);

        // crossing the seam completes the lap, once
        march(&mut vehicle, &track, &mut clock, 5);
        assert_eq!(vehicle.lap_info.lap, 1);

        march(&mut vehicle, &track, &mut clock, count);
        assert_eq!(vehicle.lap_info.lap, 2);
    }

    #[test]
    fn test_start_line_jitter_is_debounced() {
        let track = test_track();
        let mut vehicle = VehicleState::new(DVec3::ZERO, 0.0);
        let mut clock = 0.0;

        let count = track.sample_count();
        march(&mut vehicle, &track, &mut clock, count + 2);
        assert_eq!(vehicle.lap_info.lap, 1);

        // rocking back and forth across the line within the debounce window
        // must not count extra laps
        for _ in 0..20 {
            clock += DT;
            vehicle.nearest_sample = count - 1;
            update_progress(&mut vehicle, &track, clock);
            clock += DT;
            vehicle.nearest_sample = 1;
            update_progress(&mut vehicle, &track, clock);
        }
        assert_eq!(vehicle.lap_info.lap, 1);
    }

    #[test]
    fn test_stationary_vehicle_never_laps() {
        let track = test_track();
        let mut vehicle = VehicleState::new(DVec3::ZERO, 0.0);

        let mut clock = 0.0;
        for _ in 0..1000 {
            clock += DT;
            update_progress(&mut vehicle, &track, clock);
        }
        assert_eq!(vehicle.lap_info.lap, 0);
    }

    #[test]
    fn test_lap_count_is_monotonic() {
        let track = test_track();
        let mut vehicle = VehicleState::new(DVec3::ZERO, 0.0);
        let mut clock = 0.0;

        let mut last_lap = 0;
        for lap in 0..4 {
            march(&mut vehicle, &track, &mut clock, track.sample_count());
            assert!(vehicle.lap_info.lap >= last_lap);
            last_lap = vehicle.lap_info.lap;
            assert_eq!(last_lap, lap + 1);
        }
    }
}
