//! Live play plumbing
//!
//! Front ends run two clocks (ball physics and paddle input) that must never
//! touch the match concurrently. Both send `Command`s into one channel and a
//! single owner applies them in arrival order.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::sim::{Match, Side};

/// Up/down key state for one paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keys {
    pub up: bool,
    pub down: bool,
}

impl Keys {
    /// Paddle movement for this key state; both or neither held is no movement
    pub fn delta(self, step: i32) -> i32 {
        match (self.up, self.down) {
            (true, false) => -step,
            (false, true) => step,
            _ => 0,
        }
    }
}

/// Key state for both sides, sampled by the input clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HumanInput {
    pub one: Keys,
    pub two: Keys,
}

impl HumanInput {
    pub fn keys(&self, side: Side) -> Keys {
        match side {
            Side::One => self.one,
            Side::Two => self.two,
        }
    }
}

/// Work for the session owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Advance the ball and resolve scoring
    PhysicsTick,
    /// Move human paddles from key state, CPU paddles by their controller
    PaddleTick(HumanInput),
}

/// Owns a `Match` and applies queued commands strictly in order
pub struct LiveSession {
    game: Match,
    sender: Sender<Command>,
    receiver: Receiver<Command>,
    stopped: bool,
}

impl LiveSession {
    pub fn new(game: Match) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            game,
            sender,
            receiver,
            stopped: false,
        }
    }

    /// Handle for a clock or input thread
    pub fn sender(&self) -> Sender<Command> {
        self.sender.clone()
    }

    pub fn game(&self) -> &Match {
        &self.game
    }

    /// The match finished; further physics ticks are ignored
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Apply everything queued so far; returns how many commands ran
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.receiver.try_recv() {
            self.apply(command);
            applied += 1;
        }
        applied
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::PhysicsTick => self.physics_tick(),
            Command::PaddleTick(input) => self.paddle_tick(input),
        }
    }

    fn physics_tick(&mut self) {
        if self.stopped {
            return;
        }
        self.game.record_frame(&mut ());
        self.game.advance_ball();
        self.game.time_ticks += 1;

        if self.game.is_game_over() {
            if self.game.is_match_over() {
                log::info!("Match over: {}", self.game.score);
                self.stopped = true;
            } else {
                self.game.start_new_game();
            }
        }
    }

    fn paddle_tick(&mut self, input: HumanInput) {
        let step = self.game.config().paddle_step;
        for side in Side::BOTH {
            if self.game.config().controller(side).is_human() {
                let delta = input.keys(side).delta(step);
                if delta != 0 {
                    self.game.move_paddle(side, delta);
                }
            } else {
                self.game.move_cpu_paddle(side);
            }
        }
    }
}

/// Send `PhysicsTick` every `period` until the session is dropped
pub fn spawn_physics_clock(sender: Sender<Command>, period: Duration) -> JoinHandle<()> {
    thread::spawn(move || {
        loop {
            thread::sleep(period);
            if sender.send(Command::PhysicsTick).is_err() {
                break;
            }
        }
    })
}
