//! The wire-association puzzle state machine.
//!
//! A module owns the hidden association, one partition per grouping
//! pass, and the stage clock. Hosts feed it wire presses, group-button
//! presses, submits, and time steps; it hands back events to react to
//! and meshes to draw.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use tangle_geom::{generate_wire, MeshConfig, WireMeshes};

use crate::assoc::{self, Assoc};
use crate::layout;
use crate::partition::Partition;
use crate::transition::{ShelfPose, Stage, Transition};

/// Wire counts are drawn from this inclusive range.
pub const MIN_WIRES: usize = 11;
pub const MAX_WIRES: usize = 16;

/// Errors surfaced at the module boundary. Out-of-range indices are
/// rejected here so the inner state never sees them.
#[derive(Clone, Debug, PartialEq)]
pub enum ModuleError {
    /// A wire or button index at or above the wire count.
    InvalidWire { wire: usize, num_wires: usize },
    /// A requested wire count outside the supported range.
    InvalidWireCount(usize),
    /// Mesh generation failed, which points at a bad `MeshConfig`.
    Geometry(String),
}

impl std::fmt::Display for ModuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleError::InvalidWire { wire, num_wires } => write!(
                f,
                "wire index {wire} out of range (module has {num_wires} wires)"
            ),
            ModuleError::InvalidWireCount(n) => {
                write!(f, "wire count {n} outside [{MIN_WIRES}, {MAX_WIRES}]")
            }
            ModuleError::Geometry(msg) => write!(f, "wire generation failed: {msg}"),
        }
    }
}

impl std::error::Error for ModuleError {}

/// Signals raised by the input methods for the host to react to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ModuleEvent {
    /// Grouping changed or a new stage began; wire meshes must be
    /// re-fetched.
    GeometryChanged,
    /// The display now shows this expected letter.
    ExpectedLetter { letter: char },
    /// A wrong verification press. The puzzle has reset to the first
    /// pass with a fresh association.
    Strike,
    /// The full letter order was entered.
    Solved,
}

/// Module configuration. `Default` plays like the real thing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// XORed with the wire index to seed each wire's geometry.
    pub base_seed: u64,
    /// Added bend per cluster position, in degrees.
    pub angle_step_deg: f64,
    /// Length of the shelf pose timeline between stages, in seconds.
    /// Zero or negative means stage changes land with no timeline.
    pub transition_secs: f64,
    pub mesh: MeshConfig,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            base_seed: 0,
            angle_step_deg: 20.0,
            transition_secs: 0.9,
            mesh: MeshConfig::default(),
        }
    }
}

pub struct AssocModule {
    config: ModuleConfig,
    rng: StdRng,
    num_wires: usize,
    assoc: Assoc,
    lower: Partition,
    upper: Partition,
    stage: Stage,
    selected: Option<usize>,
    expect: usize,
    leds: Vec<bool>,
    display: String,
    transition: Option<Transition>,
}

impl AssocModule {
    /// Draw the wire count and association from `rng` and start at the
    /// first grouping pass.
    pub fn new(config: ModuleConfig, mut rng: StdRng) -> Self {
        let num_wires = rng.random_range(MIN_WIRES..=MAX_WIRES);
        Self::init(config, num_wires, rng)
    }

    /// Like `new` with a fixed wire count.
    pub fn with_wire_count(
        config: ModuleConfig,
        num_wires: usize,
        rng: StdRng,
    ) -> Result<Self, ModuleError> {
        if !(MIN_WIRES..=MAX_WIRES).contains(&num_wires) {
            return Err(ModuleError::InvalidWireCount(num_wires));
        }
        Ok(Self::init(config, num_wires, rng))
    }

    /// Like `new` with a seeded generator, so the whole session replays.
    pub fn from_seed(config: ModuleConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    fn init(config: ModuleConfig, num_wires: usize, mut rng: StdRng) -> Self {
        tracing::info!("Number of wires: {num_wires}");
        let assoc = Assoc::draw(num_wires, &mut rng);
        tracing::info!("Wires are: {}", assoc.table());
        Self {
            config,
            rng,
            num_wires,
            assoc,
            lower: Partition::discrete(num_wires),
            upper: Partition::discrete(num_wires),
            stage: Stage::LowerGrouping,
            selected: None,
            expect: 0,
            leds: vec![false; num_wires],
            display: "—".to_string(),
            transition: None,
        }
    }

    // ─────────────────────────── Queries ───────────────────────────

    pub fn num_wires(&self) -> usize {
        self.num_wires
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_solved(&self) -> bool {
        self.stage == Stage::Solved
    }

    /// True while a stage change's pose timeline is in flight. Input is
    /// ignored until the shelf settles.
    pub fn is_busy(&self) -> bool {
        self.transition.is_some()
    }

    /// Text on the one-character display.
    pub fn display_text(&self) -> &str {
        &self.display
    }

    /// The wire pending pairing, if a grouping press is half done.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Per-slot LED states from the last group-button press.
    pub fn leds(&self) -> &[bool] {
        &self.leds
    }

    /// The hidden association, for hosts, logs, and scripted sessions.
    pub fn association(&self) -> &Assoc {
        &self.assoc
    }

    /// Grouping on the lower face.
    pub fn lower_groups(&self) -> &[Vec<usize>] {
        self.lower.groups()
    }

    /// Grouping on the upper face.
    pub fn upper_groups(&self) -> &[Vec<usize>] {
        self.upper.groups()
    }

    /// Current shelf pose without advancing the clock.
    pub fn pose(&self) -> ShelfPose {
        match &self.transition {
            Some(t) => t.pose(),
            None => ShelfPose::resting(self.stage),
        }
    }

    // ─────────────────────────── Input ───────────────────────────

    /// Press a wire. During a grouping pass the first press selects and
    /// the second applies the pair action; during verification the press
    /// is checked against the expected letter.
    pub fn wire_pressed(&mut self, wire: usize) -> Result<Vec<ModuleEvent>, ModuleError> {
        self.check_index(wire)?;
        if self.is_busy() {
            tracing::debug!("Ignored wire {wire}: shelf is moving");
            return Ok(Vec::new());
        }
        match self.stage {
            Stage::Solved => Ok(Vec::new()),
            Stage::Verification => Ok(self.verify_press(wire)),
            Stage::LowerGrouping | Stage::UpperGrouping => Ok(self.grouping_press(wire)),
        }
    }

    fn grouping_press(&mut self, wire: usize) -> Vec<ModuleEvent> {
        match self.selected {
            None => {
                tracing::debug!("Selected wire {wire}");
                self.selected = Some(wire);
                Vec::new()
            }
            Some(pending) => {
                let partition = if self.stage == Stage::LowerGrouping {
                    &mut self.lower
                } else {
                    &mut self.upper
                };
                partition.act_on_pair(pending, wire);
                tracing::debug!("Groups are: {}", format_groups(partition.groups()));
                self.selected = None;
                vec![ModuleEvent::GeometryChanged]
            }
        }
    }

    fn verify_press(&mut self, wire: usize) -> Vec<ModuleEvent> {
        let expected = assoc::letter_char(self.expect);
        if self.assoc.letter_of(wire) == self.expect {
            tracing::info!("{}={} is correct", expected, wire + 1);
            self.expect += 1;
            if self.expect == self.num_wires {
                tracing::info!("Module solved");
                self.stage = Stage::Solved;
                self.display = "+".to_string();
                return vec![ModuleEvent::Solved];
            }
            let next = assoc::letter_char(self.expect);
            self.display = next.to_string();
            vec![ModuleEvent::ExpectedLetter { letter: next }]
        } else {
            tracing::info!("You entered {}={}. Strike!", expected, wire + 1);
            self.assoc = Assoc::draw(self.num_wires, &mut self.rng);
            tracing::info!("Wires are now: {}", self.assoc.table());
            let mut events = vec![ModuleEvent::Strike];
            events.extend(self.begin_stage(Stage::LowerGrouping));
            events
        }
    }

    /// Press the group button under a slot. Lights the LEDs of the
    /// opposite pass's group containing that slot, mapped through the
    /// association into the current face's index space. Returns the lit
    /// set.
    pub fn button_pressed(&mut self, btn: usize) -> Result<Vec<usize>, ModuleError> {
        self.check_index(btn)?;
        if self.is_busy() || self.is_solved() || !layout::buttons_active(self.stage) {
            tracing::debug!("Ignored button {btn}");
            return Ok(Vec::new());
        }
        let members = self.group_members_of(btn)?;
        self.leds.fill(false);
        for &i in &members {
            self.leds[i] = true;
        }
        Ok(members)
    }

    /// The cross-pass view behind the group buttons: the opposite pass's
    /// group containing `slot`, in the current face's index space. On
    /// the upper face that is the lower grouping pushed through the
    /// association; elsewhere it is the upper grouping pulled back.
    pub fn group_members_of(&self, slot: usize) -> Result<Vec<usize>, ModuleError> {
        self.check_index(slot)?;
        let mapped = match self.stage {
            Stage::UpperGrouping => self.assoc.groups_as_letters(self.lower.groups()),
            _ => self.assoc.groups_as_wires(self.upper.groups()),
        };
        Ok(mapped
            .into_iter()
            .find(|group| group.contains(&slot))
            .unwrap_or_default())
    }

    /// Commit the current grouping pass. Only the two grouping stages
    /// advance; verification commits itself wire by wire.
    pub fn submit(&mut self) -> Vec<ModuleEvent> {
        if self.is_busy() {
            tracing::debug!("Ignored submit: shelf is moving");
            return Vec::new();
        }
        match self.stage {
            Stage::LowerGrouping | Stage::UpperGrouping => {
                let next = self.stage.next();
                tracing::debug!("Committed {:?}", self.stage);
                self.begin_stage(next)
            }
            Stage::Verification | Stage::Solved => Vec::new(),
        }
    }

    /// Jump to a stage with no pose timeline. Hosts use this to restore
    /// saved sessions.
    pub fn set_stage_now(&mut self, stage: Stage) -> Vec<ModuleEvent> {
        self.transition = None;
        self.enter_stage(stage)
    }

    /// Advance the pose timeline by `dt` seconds and return the pose the
    /// host should apply this frame.
    pub fn tick(&mut self, dt: f64) -> ShelfPose {
        if let Some(t) = &mut self.transition {
            if !t.advance(dt) {
                return t.pose();
            }
            self.transition = None;
        }
        ShelfPose::resting(self.stage)
    }

    // ─────────────────────────── Geometry ───────────────────────────

    /// Meshes for one wire under the live grouping. During a grouping
    /// pass the wire runs from its slot to its group's span midpoint and
    /// bends by cluster position; verification shows every wire straight.
    pub fn wire_meshes(&self, wire: usize) -> Result<WireMeshes, ModuleError> {
        self.check_index(wire)?;
        let (end_slot, bend_deg) = match self.stage {
            Stage::Verification | Stage::Solved => (wire as f64, 0.0),
            Stage::LowerGrouping => (
                self.lower.group_span_mid(wire),
                self.config.angle_step_deg * self.lower.cluster_index_of(wire) as f64,
            ),
            Stage::UpperGrouping => (
                self.upper.group_span_mid(wire),
                self.config.angle_step_deg * self.upper.cluster_index_of(wire) as f64,
            ),
        };
        generate_wire(
            layout::wire_x(wire as f64, self.num_wires),
            layout::wire_x(end_slot, self.num_wires),
            bend_deg,
            self.stage == Stage::UpperGrouping,
            self.config.base_seed ^ wire as u64,
            &self.config.mesh,
        )
        .map_err(ModuleError::Geometry)
    }

    /// All wires in index order.
    pub fn all_wire_meshes(&self) -> Result<Vec<WireMeshes>, ModuleError> {
        (0..self.num_wires).map(|i| self.wire_meshes(i)).collect()
    }

    // ─────────────────────────── Internals ───────────────────────────

    /// Logical effects of arriving at `stage`. Selection and LEDs clear,
    /// the display changes, and the first pass starts both partitions
    /// over.
    fn enter_stage(&mut self, stage: Stage) -> Vec<ModuleEvent> {
        self.stage = stage;
        self.selected = None;
        self.leds.fill(false);
        let mut events = vec![ModuleEvent::GeometryChanged];
        match stage {
            Stage::LowerGrouping => {
                self.lower = Partition::discrete(self.num_wires);
                self.upper = Partition::discrete(self.num_wires);
                self.display = "—".to_string();
            }
            Stage::UpperGrouping => {
                self.display = "—".to_string();
            }
            Stage::Verification => {
                self.expect = 0;
                let first = assoc::letter_char(0);
                self.display = first.to_string();
                events.push(ModuleEvent::ExpectedLetter { letter: first });
            }
            Stage::Solved => {
                self.display = "+".to_string();
            }
        }
        events
    }

    /// Stage change plus its pose timeline.
    fn begin_stage(&mut self, stage: Stage) -> Vec<ModuleEvent> {
        let from = self.stage;
        let events = self.enter_stage(stage);
        if self.config.transition_secs > 0.0 {
            self.transition = Some(Transition::new(from, stage, self.config.transition_secs));
        }
        events
    }

    fn check_index(&self, wire: usize) -> Result<(), ModuleError> {
        if wire >= self.num_wires {
            tracing::warn!("Rejected index {wire}: module has {} wires", self.num_wires);
            return Err(ModuleError::InvalidWire {
                wire,
                num_wires: self.num_wires,
            });
        }
        Ok(())
    }
}

fn format_groups(groups: &[Vec<usize>]) -> String {
    groups
        .iter()
        .map(|group| {
            let inner = group
                .iter()
                .map(|w| w.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("[{inner}]")
        })
        .collect::<Vec<_>>()
        .join("; ")
}

// ─────────────────────────── Tests ───────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_config() -> ModuleConfig {
        ModuleConfig {
            transition_secs: 0.0,
            ..ModuleConfig::default()
        }
    }

    fn module(seed: u64) -> AssocModule {
        AssocModule::from_seed(instant_config(), seed)
    }

    /// Drive a module into verification with no grouping applied.
    fn at_verification(seed: u64) -> AssocModule {
        let mut m = module(seed);
        m.submit();
        m.submit();
        assert_eq!(m.stage(), Stage::Verification);
        m
    }

    #[test]
    fn test_initial_state() {
        let m = module(1);
        assert!((MIN_WIRES..=MAX_WIRES).contains(&m.num_wires()));
        assert_eq!(m.stage(), Stage::LowerGrouping);
        assert_eq!(m.display_text(), "—");
        assert_eq!(m.selected(), None);
        assert!(!m.is_busy());
        assert!(m.leds().iter().all(|&lit| !lit));
        assert_eq!(m.lower_groups().len(), m.num_wires());
        assert_eq!(m.upper_groups().len(), m.num_wires());
    }

    #[test]
    fn test_same_seed_replays_identically() {
        let a = module(99);
        let b = module(99);
        assert_eq!(a.num_wires(), b.num_wires());
        assert_eq!(a.association(), b.association());
    }

    #[test]
    fn test_wire_count_bounds() {
        let rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            AssocModule::with_wire_count(instant_config(), 10, rng),
            Err(ModuleError::InvalidWireCount(10))
        ));
        let rng = StdRng::seed_from_u64(0);
        let m = AssocModule::with_wire_count(instant_config(), 16, rng).unwrap();
        assert_eq!(m.num_wires(), 16);
    }

    #[test]
    fn test_out_of_range_indices_are_rejected() {
        let mut m = module(3);
        let n = m.num_wires();
        assert!(matches!(
            m.wire_pressed(n),
            Err(ModuleError::InvalidWire { wire, .. }) if wire == n
        ));
        assert!(m.button_pressed(n + 5).is_err());
        assert!(m.wire_meshes(n).is_err());
        // State is untouched after a rejected press.
        assert_eq!(m.selected(), None);
    }

    #[test]
    fn test_grouping_select_then_merge() {
        let mut m = module(7);
        assert_eq!(m.wire_pressed(2).unwrap(), Vec::new());
        assert_eq!(m.selected(), Some(2));
        let events = m.wire_pressed(5).unwrap();
        assert_eq!(events, vec![ModuleEvent::GeometryChanged]);
        assert_eq!(m.selected(), None);
        assert_eq!(m.lower_groups()[2], vec![2, 5]);
        // The upper pass is untouched by lower-pass merges.
        assert_eq!(m.upper_groups().len(), m.num_wires());
    }

    #[test]
    fn test_pressing_same_wire_twice_completes_the_pair() {
        let mut m = module(7);
        m.wire_pressed(4).unwrap();
        let events = m.wire_pressed(4).unwrap();
        // Singleton split leaves the discrete partition as it was but
        // still counts as a completed pair action.
        assert_eq!(events, vec![ModuleEvent::GeometryChanged]);
        assert_eq!(m.selected(), None);
        assert_eq!(m.lower_groups().len(), m.num_wires());
    }

    #[test]
    fn test_submit_walks_the_stages() {
        let mut m = module(11);
        m.wire_pressed(0).unwrap();
        m.wire_pressed(1).unwrap();

        let events = m.submit();
        assert!(events.contains(&ModuleEvent::GeometryChanged));
        assert_eq!(m.stage(), Stage::UpperGrouping);
        assert_eq!(m.display_text(), "—");
        // Lower grouping survives the commit.
        assert_eq!(m.lower_groups()[0], vec![0, 1]);

        let events = m.submit();
        assert_eq!(m.stage(), Stage::Verification);
        assert_eq!(m.display_text(), "A");
        assert!(events.contains(&ModuleEvent::ExpectedLetter { letter: 'A' }));

        // Verification does not submit.
        assert_eq!(m.submit(), Vec::new());
        assert_eq!(m.stage(), Stage::Verification);
    }

    #[test]
    fn test_submit_clears_selection_and_leds() {
        let mut m = module(13);
        m.wire_pressed(3).unwrap();
        assert_eq!(m.selected(), Some(3));
        m.submit();
        assert_eq!(m.selected(), None);
        assert!(m.leds().iter().all(|&lit| !lit));
    }

    #[test]
    fn test_correct_presses_advance_the_display() {
        let mut m = at_verification(17);
        let first = m.association().wire_of(0);
        let events = m.wire_pressed(first).unwrap();
        assert_eq!(events, vec![ModuleEvent::ExpectedLetter { letter: 'B' }]);
        assert_eq!(m.display_text(), "B");

        let second = m.association().wire_of(1);
        m.wire_pressed(second).unwrap();
        assert_eq!(m.display_text(), "C");
    }

    #[test]
    fn test_full_verification_solves() {
        let mut m = at_verification(23);
        let order: Vec<usize> = (0..m.num_wires())
            .map(|letter| m.association().wire_of(letter))
            .collect();
        for (i, wire) in order.iter().enumerate() {
            let events = m.wire_pressed(*wire).unwrap();
            if i + 1 == order.len() {
                assert_eq!(events, vec![ModuleEvent::Solved]);
            }
        }
        assert!(m.is_solved());
        assert_eq!(m.display_text(), "+");

        // Everything is inert after the solve.
        assert_eq!(m.wire_pressed(0).unwrap(), Vec::new());
        assert_eq!(m.button_pressed(0).unwrap(), Vec::<usize>::new());
        assert_eq!(m.submit(), Vec::new());
    }

    #[test]
    fn test_twelve_wires_solve_in_twelve_presses() {
        let rng = StdRng::seed_from_u64(8);
        let mut m = AssocModule::with_wire_count(instant_config(), 12, rng).unwrap();
        m.submit();
        m.submit();

        let mut presses = 0;
        for letter in 0..12 {
            let events = m.wire_pressed(m.association().wire_of(letter)).unwrap();
            presses += 1;
            assert!(!events.contains(&ModuleEvent::Strike));
        }
        assert_eq!(presses, 12);
        assert!(m.is_solved());
    }

    #[test]
    fn test_wrong_press_strikes_and_resets() {
        let mut m = at_verification(31);
        let before = m.association().clone();
        // Any wire that is not letter A's is wrong on the first press.
        let wrong = m.association().wire_of(1);
        let events = m.wire_pressed(wrong).unwrap();
        assert!(events.contains(&ModuleEvent::Strike));
        assert!(events.contains(&ModuleEvent::GeometryChanged));

        assert_eq!(m.stage(), Stage::LowerGrouping);
        assert_eq!(m.display_text(), "—");
        assert_eq!(m.selected(), None);
        assert_eq!(m.lower_groups().len(), m.num_wires());
        assert_eq!(m.upper_groups().len(), m.num_wires());
        // The association is redrawn, so old knowledge is useless.
        assert_ne!(m.association(), &before);
    }

    #[test]
    fn test_strike_resets_partitions() {
        let mut m = module(37);
        m.wire_pressed(0).unwrap();
        m.wire_pressed(1).unwrap();
        m.submit();
        m.wire_pressed(2).unwrap();
        m.wire_pressed(3).unwrap();
        m.submit();
        assert_eq!(m.stage(), Stage::Verification);

        let wrong = m.association().wire_of(2);
        m.wire_pressed(wrong).unwrap();
        assert_eq!(m.lower_groups().len(), m.num_wires());
        assert_eq!(m.upper_groups().len(), m.num_wires());
    }

    #[test]
    fn test_buttons_inactive_during_first_pass() {
        let mut m = module(41);
        assert_eq!(m.button_pressed(0).unwrap(), Vec::<usize>::new());
        assert!(m.leds().iter().all(|&lit| !lit));
    }

    #[test]
    fn test_button_lights_cross_pass_group() {
        let mut m = module(43);
        // Group wires 2 and 5 on the lower face, then look at them from
        // the upper face through the association.
        m.wire_pressed(2).unwrap();
        m.wire_pressed(5).unwrap();
        m.submit();
        assert_eq!(m.stage(), Stage::UpperGrouping);

        let a = m.association().letter_of(2);
        let b = m.association().letter_of(5);
        let mut expected = vec![a, b];
        expected.sort_unstable();

        let lit = m.button_pressed(a).unwrap();
        assert_eq!(lit, expected);
        for (i, &led) in m.leds().iter().enumerate() {
            assert_eq!(led, expected.contains(&i));
        }

        // The other member's button lights the same set.
        assert_eq!(m.button_pressed(b).unwrap(), expected);

        // An ungrouped wire's button lights only itself.
        let lone = m.association().letter_of(7);
        assert_eq!(m.button_pressed(lone).unwrap(), vec![lone]);
        let leds = m.leds();
        assert!(leds[lone]);
        assert!(!leds[a]);
    }

    #[test]
    fn test_button_view_inverts_on_later_faces() {
        let mut m = module(47);
        m.submit();
        assert_eq!(m.stage(), Stage::UpperGrouping);
        // Group letters 1 and 4 on the upper face.
        m.wire_pressed(1).unwrap();
        m.wire_pressed(4).unwrap();
        m.submit();
        assert_eq!(m.stage(), Stage::Verification);

        let a = m.association().wire_of(1);
        let b = m.association().wire_of(4);
        let mut expected = vec![a, b];
        expected.sort_unstable();
        assert_eq!(m.button_pressed(a).unwrap(), expected);
    }

    #[test]
    fn test_busy_module_ignores_input() {
        let mut m = AssocModule::from_seed(
            ModuleConfig {
                transition_secs: 1.0,
                ..ModuleConfig::default()
            },
            53,
        );
        m.submit();
        assert!(m.is_busy());
        assert_eq!(m.stage(), Stage::UpperGrouping);

        assert_eq!(m.wire_pressed(0).unwrap(), Vec::new());
        assert_eq!(m.selected(), None);
        assert_eq!(m.button_pressed(0).unwrap(), Vec::<usize>::new());
        assert_eq!(m.submit(), Vec::new());
        assert_eq!(m.stage(), Stage::UpperGrouping);

        // Clock out the timeline, then input lands again.
        let pose = m.tick(2.0);
        assert!(!m.is_busy());
        assert_eq!(pose, ShelfPose::resting(Stage::UpperGrouping));
        m.wire_pressed(0).unwrap();
        assert_eq!(m.selected(), Some(0));
    }

    #[test]
    fn test_tick_walks_the_pose_timeline() {
        let mut m = AssocModule::from_seed(
            ModuleConfig {
                transition_secs: 3.0,
                ..ModuleConfig::default()
            },
            59,
        );
        assert_eq!(m.pose(), ShelfPose::resting(Stage::LowerGrouping));
        m.submit();

        // Phase one: lid closing over the old face.
        let pose = m.tick(0.5);
        assert_eq!(pose.yaw_deg, 180.0);
        assert!(pose.lid < 1.0);

        // Phase two: turning while shut.
        let pose = m.tick(1.0);
        assert_eq!(pose.lid, 0.0);

        // Past the end the pose is the new face's resting pose.
        let pose = m.tick(10.0);
        assert_eq!(pose, ShelfPose::resting(Stage::UpperGrouping));
        assert!(!m.is_busy());
    }

    #[test]
    fn test_set_stage_now_skips_the_timeline() {
        let mut m = AssocModule::from_seed(ModuleConfig::default(), 61);
        let events = m.set_stage_now(Stage::Verification);
        assert!(!m.is_busy());
        assert_eq!(m.stage(), Stage::Verification);
        assert!(events.contains(&ModuleEvent::ExpectedLetter { letter: 'A' }));
    }

    #[test]
    fn test_verification_meshes_are_straight_and_stable() {
        let mut m = module(67);
        // Grouping changes lower-face geometry.
        let before = m.wire_meshes(0).unwrap();
        m.wire_pressed(0).unwrap();
        m.wire_pressed(3).unwrap();
        let after = m.wire_meshes(0).unwrap();
        assert_ne!(before.wire.vertices, after.wire.vertices);

        // Verification geometry ignores grouping entirely.
        m.submit();
        m.submit();
        let v1 = m.wire_meshes(0).unwrap();
        let v2 = m.wire_meshes(0).unwrap();
        assert_eq!(v1.wire.vertices, v2.wire.vertices);
        assert_eq!(v1.wire.vertices, before.wire.vertices);
    }

    #[test]
    fn test_all_wire_meshes_covers_every_wire() {
        let m = module(71);
        let meshes = m.all_wire_meshes().unwrap();
        assert_eq!(meshes.len(), m.num_wires());
        for wire in &meshes {
            assert!(wire.wire.triangle_count() > 0);
            assert!(wire.copper.triangle_count() > 0);
        }
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = ModuleConfig {
            base_seed: 5,
            angle_step_deg: 15.0,
            transition_secs: 0.25,
            ..ModuleConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ModuleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_config_json_uses_defaults() {
        let config: ModuleConfig = serde_json::from_str(r#"{"base_seed": 9}"#).unwrap();
        assert_eq!(config.base_seed, 9);
        assert_eq!(config.angle_step_deg, 20.0);
        assert_eq!(config.mesh, MeshConfig::default());
    }

    #[test]
    fn test_format_groups() {
        let groups = vec![vec![0, 3], vec![1], vec![2, 4, 5]];
        assert_eq!(format_groups(&groups), "[0, 3]; [1]; [2, 4, 5]");
    }
}
