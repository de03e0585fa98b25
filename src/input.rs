//! Polled input snapshot with edge semantics
//!
//! Keys are not consumed from an event queue; the simulation reads a snapshot
//! of tri-state action levels each tick. A level is `Pressed` for exactly one
//! logic pass before the driver advances it to `Held`, which is how
//! edge-triggered actions (restart, pause toggle) fire once per keystroke.

/// Tri-state level of a single action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionLevel {
    #[default]
    Released,
    /// Key went down since the last advance; observed by exactly one tick
    Pressed,
    /// Key is still down after being observed once
    Held,
}

impl ActionLevel {
    /// True while the key is down, regardless of edge state
    #[inline]
    pub fn is_down(self) -> bool {
        !matches!(self, ActionLevel::Released)
    }

    /// True only on the first tick after the key went down
    #[inline]
    pub fn just_pressed(self) -> bool {
        matches!(self, ActionLevel::Pressed)
    }
}

/// Logical actions the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Shift,
    Interact,
    Fire,
    Confirm,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Forward,
        Action::Backward,
        Action::Left,
        Action::Right,
        Action::Shift,
        Action::Interact,
        Action::Fire,
        Action::Confirm,
    ];

    #[inline]
    fn index(self) -> usize {
        match self {
            Action::Forward => 0,
            Action::Backward => 1,
            Action::Left => 2,
            Action::Right => 3,
            Action::Shift => 4,
            Action::Interact => 5,
            Action::Fire => 6,
            Action::Confirm => 7,
        }
    }

    /// Map a key name (DOM `KeyboardEvent.key` style) to an action.
    /// Unmapped keys are ignored, not an error.
    pub fn from_key(key: &str) -> Option<Action> {
        match key {
            "w" | "W" | "ArrowUp" => Some(Action::Forward),
            "s" | "S" | "ArrowDown" => Some(Action::Backward),
            "a" | "A" | "ArrowLeft" => Some(Action::Left),
            "d" | "D" | "ArrowRight" => Some(Action::Right),
            "Shift" => Some(Action::Shift),
            "f" | "F" => Some(Action::Interact),
            " " => Some(Action::Fire),
            "Enter" => Some(Action::Confirm),
            _ => None,
        }
    }
}

/// Snapshot of all action levels, advanced once per tick by the driver
#[derive(Debug, Clone, Default)]
pub struct InputState {
    levels: [ActionLevel; 8],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn level(&self, action: Action) -> ActionLevel {
        self.levels[action.index()]
    }

    #[inline]
    pub fn is_down(&self, action: Action) -> bool {
        self.level(action).is_down()
    }

    #[inline]
    pub fn just_pressed(&self, action: Action) -> bool {
        self.level(action).just_pressed()
    }

    /// Key-down transition. Repeats while held are ignored so auto-repeat
    /// cannot re-trigger an edge.
    pub fn press(&mut self, action: Action) {
        let level = &mut self.levels[action.index()];
        if *level == ActionLevel::Released {
            *level = ActionLevel::Pressed;
        }
    }

    /// Key-up transition
    pub fn release(&mut self, action: Action) {
        self.levels[action.index()] = ActionLevel::Released;
    }

    /// Decay `Pressed` to `Held`. The driver calls this after the logic pass,
    /// so each press is observed at the edge level exactly once.
    pub fn advance(&mut self) {
        for level in &mut self.levels {
            if *level == ActionLevel::Pressed {
                *level = ActionLevel::Held;
            }
        }
    }

    /// Release everything (focus loss, restart teardown)
    pub fn clear(&mut self) {
        self.levels = [ActionLevel::Released; 8];
    }
}
