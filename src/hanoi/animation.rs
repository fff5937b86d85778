//! Frame-driven playback of a precomputed plan.
//!
//! Each move flies its disk along a three-phase path: straight up to the
//! lift ceiling, across to the destination column, straight down. Progress
//! is counted in ticks, not wall-clock time, so playback is fully
//! deterministic for a given tick count.

use glam::Vec2;

use super::error::HanoiError;
use super::executor::apply_and_record;
use super::layout::Layout;
use super::solver::Operation;
use super::tower::{Board, Peg};

/// End of the lift phase, as a fraction of the move.
pub const LIFT_END: f32 = 3.0 / 8.0;
/// End of the traverse phase.
pub const TRAVERSE_END: f32 = 5.0 / 8.0;

/// Animation ticks for one move at the given tick rate, at least one.
pub fn ticks_per_move(move_seconds: f64, tick_rate: u32) -> u32 {
    ((move_seconds * tick_rate as f64).round() as u32).max(1)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Top-left corner of a disk `progress` of the way from `start` to `goal`.
pub fn flight_position(start: Vec2, goal: Vec2, lift_y: f32, progress: f32) -> Vec2 {
    let p = progress.clamp(0.0, 1.0);
    if p < LIFT_END {
        let t = p / LIFT_END;
        Vec2::new(start.x, lerp(start.y, lift_y, t))
    } else if p < TRAVERSE_END {
        let t = (p - LIFT_END) / (TRAVERSE_END - LIFT_END);
        Vec2::new(lerp(start.x, goal.x, t), lift_y)
    } else {
        let t = (p - TRAVERSE_END) / (1.0 - TRAVERSE_END);
        Vec2::new(goal.x, lerp(lift_y, goal.y, t))
    }
}

/// The in-progress move: the tower it leaves and the path it follows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flight {
    pub source: Peg,
    pub start: Vec2,
    pub goal: Vec2,
    pub lift_y: f32,
    elapsed: u32,
    duration: u32,
}

impl Flight {
    pub fn progress(&self) -> f32 {
        self.elapsed as f32 / self.duration as f32
    }

    pub fn position(&self) -> Vec2 {
        flight_position(self.start, self.goal, self.lift_y, self.progress())
    }

    pub fn is_landed(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DriverState {
    Idle,
    /// Playback started, first path not computed yet.
    MoveStarting,
    Animating(Flight),
    /// Disk has landed. The next tick commits the transfer and starts the
    /// following move.
    MoveSettling(Flight),
    Complete,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickEvent {
    /// Nothing to do (idle or complete).
    Halted,
    /// Move `step` began its flight. Any previous move is committed.
    Started(usize),
    Advanced,
    /// The last move was committed.
    Finished,
}

pub struct AnimationDriver {
    plan: Vec<Operation>,
    committed: Vec<Operation>,
    index: usize,
    state: DriverState,
    ticks_per_move: u32,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self {
            plan: Vec::new(),
            committed: Vec::new(),
            index: 0,
            state: DriverState::Idle,
            ticks_per_move: 1,
        }
    }

    /// Begins playing `plan`, each move taking `ticks_per_move` animation
    /// ticks. Ignored unless idle.
    pub fn start(&mut self, plan: Vec<Operation>, ticks_per_move: u32) -> bool {
        if self.state != DriverState::Idle {
            return false;
        }
        self.committed = Vec::with_capacity(plan.len());
        self.plan = plan;
        self.index = 0;
        self.ticks_per_move = ticks_per_move.max(1);
        self.state = DriverState::MoveStarting;
        true
    }

    /// Drops any playback in progress and restores the initial stack.
    pub fn restart(&mut self, board: &mut Board, layout: &Layout) {
        self.plan.clear();
        self.committed.clear();
        self.index = 0;
        self.state = DriverState::Idle;
        board.reset(layout);
    }

    /// Advances playback by one tick. A move spends exactly `ticks_per_move`
    /// ticks on screen: its first tick also commits the previous move, and
    /// one extra tick after the last landing commits the final move.
    pub fn tick(&mut self, board: &mut Board, layout: &Layout) -> Result<TickEvent, HanoiError> {
        match self.state {
            DriverState::Idle | DriverState::Complete => Ok(TickEvent::Halted),
            DriverState::MoveStarting => self.begin_move(board, layout),
            DriverState::Animating(flight) => {
                self.advance(board, flight);
                Ok(TickEvent::Advanced)
            }
            DriverState::MoveSettling(_) => {
                apply_and_record(board, &self.plan[self.index], &mut self.committed)?;
                self.index += 1;
                self.begin_move(board, layout)
            }
        }
    }

    fn begin_move(&mut self, board: &mut Board, layout: &Layout) -> Result<TickEvent, HanoiError> {
        let Some(op) = self.plan.get(self.index).copied() else {
            self.state = DriverState::Complete;
            return Ok(TickEvent::Finished);
        };
        let disk = board
            .tower(op.source)
            .top()
            .ok_or(HanoiError::EmptySource { peg: op.source })?;
        if disk.index() != op.disk {
            return Err(HanoiError::DiskMismatch {
                peg: op.source,
                expected: op.disk,
                found: disk.index(),
            });
        }
        let flight = Flight {
            source: op.source,
            start: disk.position,
            goal: board.tower(op.destination).next_resting_position(disk.width()),
            lift_y: layout.lift_y,
            elapsed: 0,
            duration: self.ticks_per_move,
        };
        self.advance(board, flight);
        Ok(TickEvent::Started(self.index))
    }

    fn advance(&mut self, board: &mut Board, mut flight: Flight) {
        flight.elapsed += 1;
        if let Some(disk) = board.tower_mut(flight.source).top_mut() {
            disk.position = flight.position();
        }
        self.state = if flight.is_landed() {
            DriverState::MoveSettling(flight)
        } else {
            DriverState::Animating(flight)
        };
    }

    pub fn state(&self) -> &DriverState {
        &self.state
    }

    /// Index of the move being played, or `plan().len()` once complete.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn plan(&self) -> &[Operation] {
        &self.plan
    }

    /// Moves already transferred on the board, in order.
    pub fn committed(&self) -> &[Operation] {
        &self.committed
    }

    pub fn is_running(&self) -> bool {
        self.state != DriverState::Idle
    }

    pub fn is_finished(&self) -> bool {
        self.state == DriverState::Complete
    }

    pub fn current_operation(&self) -> Option<&Operation> {
        self.plan.get(self.index)
    }

    #[cfg(test)]
    pub fn flight(&self) -> Option<&Flight> {
        match &self.state {
            DriverState::Animating(flight) | DriverState::MoveSettling(flight) => Some(flight),
            _ => None,
        }
    }
}
