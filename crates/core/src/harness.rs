//! Headless driver for scripted puzzle sessions.
//!
//! Wraps an `AssocModule`, records every event it raises, and knows how
//! to settle pose timelines and play out a winning order. The simulator
//! binary and the end-to-end tests both run on this.

use crate::module::{AssocModule, ModuleConfig, ModuleError, ModuleEvent};
use crate::transition::{ShelfPose, Stage};

/// Upper bound on settle ticks so a stuck timeline cannot hang a script.
const MAX_SETTLE_TICKS: usize = 10_000;

pub struct Harness {
    module: AssocModule,
    events: Vec<ModuleEvent>,
}

impl Harness {
    pub fn from_seed(config: ModuleConfig, seed: u64) -> Self {
        Self {
            module: AssocModule::from_seed(config, seed),
            events: Vec::new(),
        }
    }

    pub fn module(&self) -> &AssocModule {
        &self.module
    }

    /// Every event raised so far, in order.
    pub fn events(&self) -> &[ModuleEvent] {
        &self.events
    }

    pub fn saw(&self, event: &ModuleEvent) -> bool {
        self.events.contains(event)
    }

    pub fn press_wire(&mut self, wire: usize) -> Result<(), ModuleError> {
        let events = self.module.wire_pressed(wire)?;
        self.events.extend(events);
        Ok(())
    }

    pub fn press_button(&mut self, btn: usize) -> Result<Vec<usize>, ModuleError> {
        self.module.button_pressed(btn)
    }

    pub fn submit(&mut self) {
        let events = self.module.submit();
        self.events.extend(events);
    }

    /// Tick in fixed `step` increments until the shelf settles, and
    /// return the final pose.
    pub fn settle(&mut self, step: f64) -> ShelfPose {
        let mut pose = self.module.tick(step);
        let mut ticks = 0;
        while self.module.is_busy() && ticks < MAX_SETTLE_TICKS {
            pose = self.module.tick(step);
            ticks += 1;
        }
        pose
    }

    /// Wires in the order verification expects them.
    pub fn solution_order(&self) -> Vec<usize> {
        (0..self.module.num_wires())
            .map(|letter| self.module.association().wire_of(letter))
            .collect()
    }

    /// Commit through any remaining grouping passes, then enter the full
    /// winning order.
    pub fn solve(&mut self, step: f64) -> Result<(), ModuleError> {
        while matches!(
            self.module.stage(),
            Stage::LowerGrouping | Stage::UpperGrouping
        ) {
            self.submit();
            self.settle(step);
        }
        for wire in self.solution_order() {
            self.press_wire(wire)?;
            self.settle(step);
        }
        Ok(())
    }
}

// ─────────────────────────── Tests ───────────────────────────
