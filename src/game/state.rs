//! The application state owned by the main loop: disk count, board,
//! playback and which controls are enabled. UI code reads it through
//! `frame()` and changes it only through `handle()` and `tick()`.

use super::config::{validate_disk_count, HanoiConfig, MAX_DISKS, MIN_DISKS};
use super::input::GameAction;
use crate::hanoi::animation::{AnimationDriver, TickEvent};
use crate::hanoi::error::HanoiError;
use crate::hanoi::layout::Layout;
use crate::hanoi::solver::{required_moves, solve};
use crate::hanoi::tower::{Board, Peg, Tower};

pub const NO_OPERATION_TEXT: &str = "Operacion: --";

/// A discrete user request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    IncrementDisks,
    DecrementDisks,
    StartVisualization,
    Restart,
}

impl Intent {
    pub fn from_action(action: GameAction) -> Option<Self> {
        match action {
            GameAction::IncrementDisks => Some(Self::IncrementDisks),
            GameAction::DecrementDisks => Some(Self::DecrementDisks),
            GameAction::StartVisualization => Some(Self::StartVisualization),
            GameAction::Restart => Some(Self::Restart),
            GameAction::OpenSettings => None,
        }
    }
}

/// Enablement of each control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls {
    pub increment: bool,
    pub decrement: bool,
    pub start: bool,
    pub restart: bool,
}

impl Controls {
    pub fn idle() -> Self {
        Self {
            increment: true,
            decrement: true,
            start: true,
            restart: false,
        }
    }

    pub fn playing() -> Self {
        Self {
            increment: false,
            decrement: false,
            start: false,
            restart: false,
        }
    }

    pub fn finished() -> Self {
        Self {
            restart: true,
            ..Self::playing()
        }
    }

    pub fn allows(&self, intent: Intent) -> bool {
        match intent {
            Intent::IncrementDisks => self.increment,
            Intent::DecrementDisks => self.decrement,
            Intent::StartVisualization => self.start,
            Intent::Restart => self.restart,
        }
    }
}

/// Everything the renderer needs for one frame.
pub struct Frame<'a> {
    pub layout: &'a Layout,
    pub towers: &'a [Tower; 3],
    pub status: String,
    pub controls: Controls,
    pub disk_count: u32,
    pub required_moves: u64,
    pub running: bool,
    pub finished: bool,
}

pub struct HanoiState {
    disk_count: u32,
    width: f32,
    height: f32,
    layout: Layout,
    board: Board,
    driver: AnimationDriver,
    controls: Controls,
    ticks_per_move: u32,
    log_moves: bool,
}

impl HanoiState {
    pub fn new(config: &HanoiConfig, disk_count: u32) -> Result<Self, HanoiError> {
        let disk_count = validate_disk_count(disk_count)?;
        let (width, height) = (config.window.width, config.window.height);
        let layout = Layout::compute(width, height, disk_count);
        let board = Board::new(&layout);
        Ok(Self {
            disk_count,
            width,
            height,
            layout,
            board,
            driver: AnimationDriver::new(),
            controls: Controls::idle(),
            ticks_per_move: config.animation.ticks_per_move(),
            log_moves: config.debug.log_moves,
        })
    }

    /// Applies `intent` if its control is enabled. Returns whether it was honored.
    pub fn handle(&mut self, intent: Intent) -> bool {
        if !self.controls.allows(intent) {
            log::debug!("ignoring {intent:?}: control disabled");
            return false;
        }
        match intent {
            Intent::IncrementDisks => self.set_disk_count(self.disk_count + 1),
            Intent::DecrementDisks => self.set_disk_count(self.disk_count.saturating_sub(1)),
            Intent::StartVisualization => self.start(),
            Intent::Restart => self.restart(),
        }
        true
    }

    fn set_disk_count(&mut self, count: u32) {
        let count = count.clamp(MIN_DISKS, MAX_DISKS);
        if count == self.disk_count {
            return;
        }
        self.disk_count = count;
        self.layout = Layout::compute(self.width, self.height, count);
        self.board.reset(&self.layout);
        log::info!("disk count: {count} ({} moves)", required_moves(count));
    }

    fn start(&mut self) {
        let plan = solve(self.disk_count, Peg::A, Peg::B, Peg::C);
        log::info!("starting visualization: {} disks, {} moves", self.disk_count, plan.len());
        self.board.reset(&self.layout);
        self.driver.start(plan, self.ticks_per_move);
        self.controls = Controls::playing();
    }

    /// Abandons playback, whatever its state, and restacks every disk on A.
    pub fn restart(&mut self) {
        log::info!("restarting visualization");
        self.driver.restart(&mut self.board, &self.layout);
        self.controls = Controls::idle();
    }

    /// Advances playback by one fixed tick.
    pub fn tick(&mut self) -> Result<TickEvent, HanoiError> {
        let event = self.driver.tick(&mut self.board, &self.layout)?;
        match event {
            TickEvent::Started(step) if self.log_moves => {
                if let Some(op) = self.driver.current_operation() {
                    log::info!("{}", op.describe(step, self.driver.plan().len()));
                }
            }
            TickEvent::Finished => {
                log::info!("visualization complete after {} moves", self.driver.committed().len());
                self.controls = Controls::finished();
            }
            _ => {}
        }
        Ok(event)
    }

    /// Description of the move being played, or of the last one once done.
    pub fn status_text(&self) -> String {
        let plan = self.driver.plan();
        let step = self.driver.index().min(plan.len().saturating_sub(1));
        match plan.get(step) {
            Some(op) => op.describe(step, plan.len()),
            None => NO_OPERATION_TEXT.to_string(),
        }
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            layout: &self.layout,
            towers: self.board.towers(),
            status: self.status_text(),
            controls: self.controls,
            disk_count: self.disk_count,
            required_moves: required_moves(self.disk_count),
            running: self.driver.is_running(),
            finished: self.driver.is_finished(),
        }
    }

    /// Takes effect at the next start.
    pub fn set_ticks_per_move(&mut self, ticks: u32) {
        self.ticks_per_move = ticks.max(1);
    }

    pub fn set_log_moves(&mut self, enabled: bool) {
        self.log_moves = enabled;
    }

    #[cfg(test)]
    pub fn disk_count(&self) -> u32 {
        self.disk_count
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    #[cfg(test)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[cfg(test)]
    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hanoi::animation::DriverState;

    fn new_state(disks: u32) -> HanoiState {
        let mut config = HanoiConfig::default();
        config.animation.move_seconds = 2.0 / 60.0;
        config.debug.log_moves = false;
        HanoiState::new(&config, disks).expect("valid disk count")
    }

    fn run_to_end(state: &mut HanoiState) {
        for _ in 0..100_000 {
            if state.driver().is_finished() {
                return;
            }
            state.tick().expect("legal plan");
        }
        panic!("playback never finished");
    }

    #[test]
    fn test_rejects_bad_disk_count() {
        let config = HanoiConfig::default();
        assert_eq!(HanoiState::new(&config, 0).err(), Some(HanoiError::DiskCount(0)));
        assert_eq!(HanoiState::new(&config, 16).err(), Some(HanoiError::DiskCount(16)));
    }

    #[test]
    fn test_idle_controls() {
        let state = new_state(3);
        assert_eq!(state.controls(), Controls::idle());
        let frame = state.frame();
        assert!(!frame.running);
        assert_eq!(frame.required_moves, 7);
        assert_eq!(frame.status, NO_OPERATION_TEXT);
    }

    #[test]
    fn test_increment_and_decrement_clamp() {
        let mut state = new_state(14);
        assert!(state.handle(Intent::IncrementDisks));
        assert!(state.handle(Intent::IncrementDisks));
        assert_eq!(state.disk_count(), 15);
        assert_eq!(state.board().tower(Peg::A).len(), 15);
        assert_eq!(state.layout().disk_count, 15);

        let mut state = new_state(2);
        state.handle(Intent::DecrementDisks);
        state.handle(Intent::DecrementDisks);
        assert_eq!(state.disk_count(), 1);
        assert_eq!(state.board().tower(Peg::A).len(), 1);
    }

    #[test]
    fn test_start_disables_controls() {
        let mut state = new_state(3);
        assert!(state.handle(Intent::StartVisualization));
        assert_eq!(state.controls(), Controls::playing());
        assert!(!state.handle(Intent::IncrementDisks));
        assert!(!state.handle(Intent::StartVisualization));
        assert!(!state.handle(Intent::Restart));
        assert_eq!(state.disk_count(), 3);
        assert_eq!(state.driver().plan().len(), 7);
        assert_eq!(state.status_text(), "[1/7] Mover disco 2 de A a C");
    }

    #[test]
    fn test_completion_enables_restart() {
        let mut state = new_state(3);
        state.handle(Intent::StartVisualization);
        run_to_end(&mut state);
        assert_eq!(state.controls(), Controls::finished());
        assert_eq!(state.board().tower(Peg::C).len(), 3);
        assert_eq!(state.status_text(), "[7/7] Mover disco 2 de A a C");
        let frame = state.frame();
        assert!(frame.running);
        assert!(frame.finished);
    }

    #[test]
    fn test_restart_returns_to_idle() {
        let mut state = new_state(4);
        state.handle(Intent::StartVisualization);
        run_to_end(&mut state);
        assert!(state.handle(Intent::Restart));
        assert_eq!(*state.driver().state(), DriverState::Idle);
        assert_eq!(state.controls(), Controls::idle());
        assert_eq!(state.board().tower(Peg::A).len(), 4);
        assert!(state.board().tower(Peg::C).is_empty());
        assert_eq!(state.status_text(), NO_OPERATION_TEXT);
    }

    #[test]
    fn test_restart_while_playing() {
        let mut state = new_state(3);
        state.handle(Intent::StartVisualization);
        for _ in 0..6 {
            state.tick().unwrap();
        }
        state.restart();
        assert!(!state.driver().is_running());
        assert_eq!(state.board().tower(Peg::A).len(), 3);
        assert!(state.handle(Intent::IncrementDisks));
    }

    #[test]
    fn test_ticks_per_move_applies_on_start() {
        let mut state = new_state(1);
        state.set_ticks_per_move(5);
        state.handle(Intent::StartVisualization);
        let mut ticks = 0;
        while !state.driver().is_finished() {
            state.tick().unwrap();
            ticks += 1;
        }
        // Five flight ticks, then the commit.
        assert_eq!(ticks, 6);
    }

    #[test]
    fn test_intent_from_action() {
        assert_eq!(Intent::from_action(GameAction::Restart), Some(Intent::Restart));
        assert_eq!(Intent::from_action(GameAction::OpenSettings), None);
    }
}
