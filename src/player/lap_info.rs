use serde::{Deserialize, Serialize};

pub type LapNumber = u32;

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct LapInformation {
    pub lap: LapNumber,
    // race-clock seconds of the most recent lap completion; used to debounce
    // start-line crossings
    pub last_lap_timestamp: f64,
    pub prev_progress_index: usize,
}

impl LapInformation {
    pub fn new() -> Self {
        LapInformation {
            lap: 0,
            last_lap_timestamp: 0.0,
            prev_progress_index: 0,
        }
    }
}

impl Default for LapInformation {
    fn default() -> Self {
        LapInformation::new()
    }
}
