use glam::{DMat3, DQuat, DVec3};

use crate::player::lap_info::LapInformation;
use crate::player::player_inputs::InputIntent;
use crate::track::{TrackGeometry, TrackSample};
use crate::GLOBAL_CONFIG;

// below this the car is parked; stops resistance terms from jittering the
// velocity around zero
const STOP_SPEED: f64 = 0.05;

pub struct VehicleState {
    pub position: DVec3,
    pub velocity: DVec3,
    // yaw around world up; the sole steering degree of freedom
    pub heading: f64,
    // render orientation, eased toward the local track frame
    pub orientation: DQuat,
    pub boost_fraction: f64,
    pub nearest_sample: usize,
    pub lap_info: LapInformation,
}

impl VehicleState {
    pub fn new(position: DVec3, heading: f64) -> VehicleState {
        VehicleState {
            position,
            velocity: DVec3::ZERO,
            heading,
            orientation: DQuat::from_rotation_y(heading),
            boost_fraction: 1.0,
            nearest_sample: 0,
            lap_info: LapInformation::new(),
        }
    }

    // unit forward in the ground plane for the current heading
    pub fn forward(&self) -> DVec3 {
        DVec3::new(self.heading.sin(), 0.0, self.heading.cos())
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    pub fn render_pose(&self) -> (DVec3, DQuat) {
        (self.position, self.orientation)
    }

    fn is_boosting(&self, input: &InputIntent) -> bool {
        input.boost && self.boost_fraction > 0.0
    }

    fn speed_cap(&self, input: &InputIntent) -> f64 {
        if self.is_boosting(input) {
            GLOBAL_CONFIG.max_car_speed * GLOBAL_CONFIG.boost_speed_factor
        } else {
            GLOBAL_CONFIG.max_car_speed
        }
    }

    // sharper turning at low speed, floored so the car can always orient
    fn turn_rate(&self) -> f64 {
        (GLOBAL_CONFIG.car_turn_rate / (1.0 + self.speed() / GLOBAL_CONFIG.turn_falloff_speed))
            .clamp(GLOBAL_CONFIG.min_turn_rate, GLOBAL_CONFIG.car_turn_rate)
    }

    fn accelerator_acceleration(&self, input: &InputIntent) -> DVec3 {
        if input.accelerate {
            self.forward() * GLOBAL_CONFIG.car_accelerator
        } else {
            DVec3::ZERO
        }
    }

    // braking acts against the current direction of travel, not the heading;
    // capped so a tick never decelerates through zero into reverse
    fn brake_acceleration(&self, input: &InputIntent, dt: f64) -> DVec3 {
        if input.brake {
            self.velocity.normalize_or_zero() * -GLOBAL_CONFIG.car_brake.min(self.speed() / dt)
        } else {
            DVec3::ZERO
        }
    }

    fn boost_acceleration(&self, input: &InputIntent) -> DVec3 {
        if self.is_boosting(input) {
            self.forward() * GLOBAL_CONFIG.boost_accelerator
        } else {
            DVec3::ZERO
        }
    }

    fn drag_acceleration(&self) -> DVec3 {
        self.velocity * -GLOBAL_CONFIG.drag_coefficient * self.speed()
    }

    fn rolling_resistance_acceleration(&self) -> DVec3 {
        self.velocity * -GLOBAL_CONFIG.rolling_resistance_coefficient
    }

    // linear drain while boosting, linear regeneration while the button is
    // released; a held button on an empty tank does neither
    fn update_boost_tank(&mut self, input: &InputIntent, dt: f64) {
        if self.is_boosting(input) {
            self.boost_fraction -= dt / GLOBAL_CONFIG.boost_drain_seconds;
        } else if !input.boost {
            self.boost_fraction += dt / GLOBAL_CONFIG.boost_regen_seconds;
        }
        self.boost_fraction = self.boost_fraction.clamp(0.0, 1.0);
    }

    fn clamp_speed(&mut self, cap: f64) {
        if self.speed() > cap {
            self.velocity = self.velocity.normalize_or_zero() * cap;
        } else if self.speed() < STOP_SPEED {
            self.velocity = DVec3::ZERO;
        }
    }

    // heading yaw reconciled with the local track frame
    fn target_orientation(&self, sample: &TrackSample) -> DQuat {
        let up = sample.normal;
        let mut forward = (self.forward() - up * self.forward().dot(up)).normalize_or_zero();
        if forward.length_squared() < 0.5 {
            forward = sample.tangent;
        }
        DQuat::from_mat3(&DMat3::from_cols(up.cross(forward), up, forward))
    }

    // generous box around the whole track; a safety net against runaway
    // extrapolation, not part of normal gameplay
    fn enforce_world_bounds(&mut self, track: &TrackGeometry) {
        let (min_corner, max_corner) = track.bounds();
        for axis in 0..3 {
            let low = min_corner[axis] - GLOBAL_CONFIG.world_margin;
            let high = max_corner[axis] + GLOBAL_CONFIG.world_margin;
            if self.position[axis] < low || self.position[axis] > high {
                self.position[axis] = self.position[axis].clamp(low, high);
                self.velocity[axis] = 0.0;
            }
        }
    }

    // a non-finite value here is a programming error: assert in debug builds,
    // clamp back to a safe state and log in release builds
    fn sanitize(&mut self, track: &TrackGeometry) {
        let finite = self.position.is_finite()
            && self.velocity.is_finite()
            && self.heading.is_finite()
            && self.orientation.is_finite()
            && self.boost_fraction.is_finite();
        debug_assert!(
            finite,
            "non-finite vehicle state: position {:?} velocity {:?}",
            self.position, self.velocity
        );
        if !finite {
            log::warn!(
                "resetting non-finite vehicle state near sample {}",
                self.nearest_sample
            );
            if !self.position.is_finite() {
                self.position = track.sample(self.nearest_sample).position;
            }
            if !self.velocity.is_finite() {
                self.velocity = DVec3::ZERO;
            }
            if !self.heading.is_finite() {
                self.heading = 0.0;
            }
            if !self.orientation.is_finite() {
                self.orientation = DQuat::IDENTITY;
            }
            if !self.boost_fraction.is_finite() {
                self.boost_fraction = 0.0;
            }
        }
    }

    pub fn tick(&mut self, track: &TrackGeometry, input: &InputIntent, dt: f64) {
        // steering
        self.heading += input.turn_axis() * self.turn_rate() * dt;

        // longitudinal inputs and passive losses; the cap is sampled before
        // the tank drains so a tick that empties it still gets the boosted cap
        let cap = self.speed_cap(input);
        let acceleration = self.accelerator_acceleration(input)
            + self.brake_acceleration(input, dt)
            + self.boost_acceleration(input)
            + self.drag_acceleration()
            + self.rolling_resistance_acceleration();
        self.velocity += acceleration * dt;
        self.update_boost_tank(input, dt);

        // damp the velocity component along the car's right axis so motion
        // stays car-like instead of free-body
        let right = self.forward().cross(DVec3::Y);
        let lateral_speed = self.velocity.dot(right);
        let decay = 1.0 - (-GLOBAL_CONFIG.lateral_damping * dt).exp();
        self.velocity -= right * (lateral_speed * decay);

        self.clamp_speed(cap);

        self.nearest_sample = track.nearest_sample_index(self.position);
        let sample = track.sample(self.nearest_sample);

        // snap to the track surface; there is no separate vertical physics
        let offset = self.position - sample.position;
        self.position -= sample.normal * offset.dot(sample.normal);

        // soft wall: cancel the outward component, push back in proportion to
        // the excess and scrub a little speed
        let lateral = offset.dot(sample.left);
        let limit = track.half_width() + GLOBAL_CONFIG.wall_margin;
        if lateral.abs() > limit {
            let outward = sample.left * lateral.signum();
            let excess = lateral.abs() - limit;
            let outward_speed = self.velocity.dot(outward).max(0.0);
            self.velocity -= outward * outward_speed;
            self.velocity -= outward * (excess * GLOBAL_CONFIG.wall_push);
            self.velocity *= 1.0 - (GLOBAL_CONFIG.wall_friction * dt).min(1.0);
            self.clamp_speed(cap);
        }

        // ease the render orientation toward the track frame; a hard snap pops
        let target = self.target_orientation(sample);
        let blend = 1.0 - (-GLOBAL_CONFIG.orientation_blend_rate * dt).exp();
        self.orientation = self.orientation.slerp(target, blend).normalize();

        self.position += self.velocity * dt;

        self.enforce_world_bounds(track);
        self.sanitize(track);
    }
}
