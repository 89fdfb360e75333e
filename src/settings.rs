use config::{Config, ConfigError, File};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Settings {
    // track shape
    pub track_samples: usize,
    pub track_half_width: f64,
    pub max_bank_angle: f64,
    pub bank_damping: f64,

    // confinement
    pub wall_margin: f64,
    pub wall_push: f64,
    pub wall_friction: f64,
    // slack around the track's bounding box before the safety-net clamp
    pub world_margin: f64,

    // vehicle
    pub car_accelerator: f64,
    pub car_brake: f64,
    // drag scales with the square of speed, rolling resistance linearly, so
    // rolling resistance is what actually stops a slow car
    pub drag_coefficient: f64,
    pub rolling_resistance_coefficient: f64,
    pub max_car_speed: f64,
    pub car_turn_rate: f64,
    pub min_turn_rate: f64,
    pub turn_falloff_speed: f64,
    pub lateral_damping: f64,
    pub orientation_blend_rate: f64,

    // boost economy
    pub boost_accelerator: f64,
    pub boost_speed_factor: f64,
    pub boost_drain_seconds: f64,
    pub boost_regen_seconds: f64,

    // camera
    pub camera_min_distance: f64,
    pub camera_max_distance: f64,
    pub camera_min_height: f64,
    pub camera_max_height: f64,
    pub camera_smoothing: f64,
    pub camera_look_ahead: f64,
    pub camera_look_height: f64,

    // race rules
    pub lap_debounce_seconds: f64,
    pub race_laps: u32,
}

impl Settings {
    fn new() -> Result<Settings, ConfigError> {
        let config = Config::builder()
            .set_default("track_samples", 200)?
            .set_default("track_half_width", 7.0)?
            .set_default("max_bank_angle", 0.28)?
            .set_default("bank_damping", 0.85)?
            .set_default("wall_margin", 1.5)?
            .set_default("wall_push", 4.0)?
            .set_default("wall_friction", 0.8)?
            .set_default("world_margin", 150.0)?
            .set_default("car_accelerator", 25.0)?
            .set_default("car_brake", 12.0)?
            .set_default("drag_coefficient", 0.02)?
            .set_default("rolling_resistance_coefficient", 0.35)?
            .set_default("max_car_speed", 30.0)?
            .set_default("car_turn_rate", 2.6)?
            .set_default("min_turn_rate", 0.6)?
            .set_default("turn_falloff_speed", 12.0)?
            .set_default("lateral_damping", 4.0)?
            .set_default("orientation_blend_rate", 8.0)?
            .set_default("boost_accelerator", 20.0)?
            .set_default("boost_speed_factor", 1.35)?
            .set_default("boost_drain_seconds", 3.0)?
            .set_default("boost_regen_seconds", 9.0)?
            .set_default("camera_min_distance", 8.0)?
            .set_default("camera_max_distance", 14.0)?
            .set_default("camera_min_height", 3.0)?
            .set_default("camera_max_height", 5.5)?
            .set_default("camera_smoothing", 6.0)?
            .set_default("camera_look_ahead", 10.0)?
            .set_default("camera_look_height", 1.5)?
            .set_default("lap_debounce_seconds", 2.0)?
            .set_default("race_laps", 3)?
            .add_source(File::with_name("config.yaml").required(false))
            .build()?;

        config.try_deserialize()
    }
}

lazy_static! {
    pub static ref GLOBAL_CONFIG: Settings = Settings::new().expect("failed to read config file");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_coherent() {
        let settings = Settings::new().unwrap();
        assert!(settings.track_samples >= 3);
        assert!(settings.track_half_width > 0.0);
        assert!(settings.max_bank_angle > 0.0);
        assert!(settings.bank_damping < 1.0);
        assert!(settings.camera_max_distance > settings.camera_min_distance);
        assert!(settings.camera_max_height > settings.camera_min_height);
        assert!(settings.boost_drain_seconds > 0.0 && settings.boost_regen_seconds > 0.0);
        assert!(settings.min_turn_rate > 0.0 && settings.min_turn_rate <= settings.car_turn_rate);
    }
}
