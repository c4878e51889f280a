//! Core domain: counters kept for the current run.

use bevy::prelude::*;

#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub enemies_stomped: u32,
    pub knockbacks_taken: u32,
}

impl RunStats {
    pub fn record_stomp(&mut self) {
        self.enemies_stomped += 1;
    }

    pub fn record_knockback(&mut self) {
        self.knockbacks_taken += 1;
    }
}
