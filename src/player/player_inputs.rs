use serde::{Deserialize, Serialize};

// InputIntent is produced by the host's input layer once per tick to tell
// the simulation what a player wants to do; it is consumed, never stored
// beyond the tick it was made for
#[derive(Copy, Clone, Default, Debug, Serialize, Deserialize)]
pub struct InputIntent {
    pub accelerate: bool,
    pub brake: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub boost: bool,
}

impl InputIntent {
    // +1 steers left, -1 steers right, opposing inputs cancel
    pub fn turn_axis(&self) -> f64 {
        (self.turn_left as i8 - self.turn_right as i8) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_axis() {
        let mut input = InputIntent::default();
        assert_eq!(input.turn_axis(), 0.0);

        input.turn_left = true;
        assert_eq!(input.turn_axis(), 1.0);

        input.turn_right = true;
        assert_eq!(input.turn_axis(), 0.0);

        input.turn_left = false;
        assert_eq!(input.turn_axis(), -1.0);
    }
}
