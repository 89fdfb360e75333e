use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};

use glam::{DQuat, DVec3};
use serde::Serialize;

use crate::camera::CameraState;
use crate::physics::vehicle::VehicleState;
use crate::player::player_inputs::InputIntent;
use crate::progress;
use crate::track::{TrackError, TrackGeometry, TrackParams};
use crate::{PlayerID, GLOBAL_CONFIG};

// lobby/network events only ever queue signals; the simulation consumes them
// at the next tick boundary, keeping the tick the single writer of race state
#[derive(Copy, Clone, Debug)]
pub enum SessionSignal {
    StartRace,
    EndRace,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RacePhase {
    Lobby,
    Racing,
    Finished,
}

pub struct Racer {
    pub vehicle: VehicleState,
    pub camera: CameraState,
    input: InputIntent,
    finish_time: Option<f64>,
}

impl Racer {
    pub fn render_pose(&self) -> (DVec3, DQuat) {
        self.vehicle.render_pose()
    }

    pub fn finish_time(&self) -> Option<f64> {
        self.finish_time
    }
}

// the read-only view the HUD and minimap consume
#[derive(Serialize, Clone, Copy, Debug)]
pub struct HudSnapshot {
    pub position: DVec3,
    pub lap: u32,
    pub boost_fraction: f64,
}

pub struct RaceSession {
    track: TrackGeometry,
    phase: RacePhase,
    clock: f64,
    racers: HashMap<PlayerID, Racer>,
    roster: Vec<PlayerID>,
    signals: VecDeque<SessionSignal>,
}

impl RaceSession {
    // the start-race boundary: the track is built exactly once per session;
    // dropping the session is the end-race teardown
    pub fn new(params: TrackParams) -> Result<RaceSession, TrackError> {
        let track = TrackGeometry::build(&params)?;
        Ok(RaceSession {
            track,
            phase: RacePhase::Lobby,
            clock: 0.0,
            racers: HashMap::new(),
            roster: Vec::new(),
            signals: VecDeque::new(),
        })
    }

    pub fn track(&self) -> &TrackGeometry {
        &self.track
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn add_player(&mut self, id: PlayerID) {
        if !self.roster.contains(&id) {
            self.roster.push(id);
        }
    }

    pub fn queue_signal(&mut self, signal: SessionSignal) {
        self.signals.push_back(signal);
    }

    pub fn set_input(&mut self, id: PlayerID, input: InputIntent) {
        if let Some(racer) = self.racers.get_mut(&id) {
            racer.input = input;
        }
    }

    pub fn racer(&self, id: PlayerID) -> Option<&Racer> {
        self.racers.get(&id)
    }

    pub fn hud_snapshot(&self, id: PlayerID) -> Option<HudSnapshot> {
        self.racers.get(&id).map(|racer| HudSnapshot {
            position: racer.vehicle.position,
            lap: racer.vehicle.lap_info.lap,
            boost_fraction: racer.vehicle.boost_fraction,
        })
    }

    pub fn tick(&mut self, dt: f64) {
        self.drain_signals();
        if self.phase != RacePhase::Racing {
            return;
        }
        self.clock += dt;

        for racer in self.racers.values_mut() {
            let input = racer.input;
            racer.vehicle.tick(&self.track, &input, dt);
            progress::update_progress(&mut racer.vehicle, &self.track, self.clock);
            racer.camera.update(&racer.vehicle, dt);

            // finished racers keep simulating (they coast past the line) but
            // their time is latched once
            if racer.finish_time.is_none()
                && racer.vehicle.lap_info.lap >= GLOBAL_CONFIG.race_laps
            {
                racer.finish_time = Some(self.clock);
            }
        }

        if !self.racers.is_empty() && self.racers.values().all(|r| r.finish_time.is_some()) {
            self.phase = RacePhase::Finished;
        }
    }

    // placement order: finishers by time, everyone else by how far around
    // they are
    pub fn standings(&self) -> Vec<PlayerID> {
        let mut ids: Vec<PlayerID> = self.racers.keys().copied().collect();
        ids.sort_by(|a, b| {
            let ra = &self.racers[a];
            let rb = &self.racers[b];
            match (ra.finish_time, rb.finish_time) {
                (Some(ta), Some(tb)) => ta.partial_cmp(&tb).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => (rb.vehicle.lap_info.lap, rb.vehicle.nearest_sample)
                    .cmp(&(ra.vehicle.lap_info.lap, ra.vehicle.nearest_sample)),
            }
        });
        ids
    }

    fn drain_signals(&mut self) {
        while let Some(signal) = self.signals.pop_front() {
            match signal {
                SessionSignal::StartRace => self.start_race(),
                SessionSignal::EndRace => self.end_race(),
            }
        }
    }

    // stagger the grid across the start line, everyone inside the band and
    // facing down the first tangent
    fn start_race(&mut self) {
        self.racers.clear();
        self.clock = 0.0;

        let start = self.track.sample(0);
        let heading = start.tangent.x.atan2(start.tangent.z);
        let slots = self.roster.len().max(1) as f64;
        for (slot, id) in self.roster.iter().enumerate() {
            let lane = (slot as f64 + 0.5) / slots - 0.5;
            let position = start.position + start.left * (lane * self.track.half_width());
            let vehicle = VehicleState::new(position, heading);
            let camera = CameraState::new(&vehicle);
            self.racers.insert(
                *id,
                Racer {
                    vehicle,
                    camera,
                    input: InputIntent::default(),
                    finish_time: None,
                },
            );
        }
        self.phase = RacePhase::Racing;
    }

    fn end_race(&mut self) {
        self.racers.clear();
        self.clock = 0.0;
        self.phase = RacePhase::Lobby;
    }
}
