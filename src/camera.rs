use glam::DVec3;

use crate::physics::vehicle::VehicleState;
use crate::GLOBAL_CONFIG;

// chase camera: trails the vehicle, pulling back and up as it speeds up
pub struct CameraState {
    pub position: DVec3,
    pub look_target: DVec3,
}

impl CameraState {
    // spawn already in the follow slot so the opening frames don't swoop
    pub fn new(vehicle: &VehicleState) -> CameraState {
        CameraState {
            position: Self::desired_position(vehicle),
            look_target: Self::desired_look_target(vehicle),
        }
    }

    fn follow_fraction(vehicle: &VehicleState) -> f64 {
        (vehicle.speed() / GLOBAL_CONFIG.max_car_speed).clamp(0.0, 1.0)
    }

    fn desired_position(vehicle: &VehicleState) -> DVec3 {
        let fraction = Self::follow_fraction(vehicle);
        let distance = GLOBAL_CONFIG.camera_min_distance
            + (GLOBAL_CONFIG.camera_max_distance - GLOBAL_CONFIG.camera_min_distance) * fraction;
        let height = GLOBAL_CONFIG.camera_min_height
            + (GLOBAL_CONFIG.camera_max_height - GLOBAL_CONFIG.camera_min_height) * fraction;
        vehicle.position - vehicle.forward() * distance + DVec3::Y * height
    }

    fn desired_look_target(vehicle: &VehicleState) -> DVec3 {
        vehicle.position
            + vehicle.forward() * GLOBAL_CONFIG.camera_look_ahead
            + DVec3::Y * GLOBAL_CONFIG.camera_look_height
    }

    // exponential smoothing parameterized by dt, so the feel doesn't change
    // with frame pacing
    pub fn update(&mut self, vehicle: &VehicleState, dt: f64) {
        let blend = 1.0 - (-GLOBAL_CONFIG.camera_smoothing * dt).exp();
        self.position = self.position.lerp(Self::desired_position(vehicle), blend);
        self.look_target = Self::desired_look_target(vehicle);
    }
}
