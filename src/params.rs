//! Gripper parameter ranges and validation
//!
//! Values are validated before any UI interaction is attempted; an
//! out-of-range value is logged and reported as a plain `false`, matching the
//! boolean contract of every driver operation.

use std::ops::RangeInclusive;

use tracing::error;

pub const SPEED_RANGE: RangeInclusive<u32> = 10..=100;
pub const FORCE_RANGE: RangeInclusive<u32> = 20..=100;
pub const LOAD_RANGE: RangeInclusive<u32> = 10..=1000;

/// Default speed for the open task
pub const DEFAULT_OPEN_SPEED: u32 = 20;

/// Defaults for the close task's configuration dialog
pub const DEFAULT_CLOSE_SPEED: u32 = 50;
pub const DEFAULT_CLOSE_FORCE: u32 = 80;
pub const DEFAULT_CLOSE_LOAD: u32 = 400;

pub fn validate_speed(speed: u32) -> bool {
    if SPEED_RANGE.contains(&speed) {
        true
    } else {
        error!(
            "Speed {speed} out of range ({}-{})",
            SPEED_RANGE.start(),
            SPEED_RANGE.end()
        );
        false
    }
}

pub fn validate_force(force: u32) -> bool {
    if FORCE_RANGE.contains(&force) {
        true
    } else {
        error!(
            "Force {force} out of range ({}-{})",
            FORCE_RANGE.start(),
            FORCE_RANGE.end()
        );
        false
    }
}

pub fn validate_load(load: u32) -> bool {
    if LOAD_RANGE.contains(&load) {
        true
    } else {
        error!(
            "Load {load} out of range ({}-{})",
            LOAD_RANGE.start(),
            LOAD_RANGE.end()
        );
        false
    }
}

/// Parameters for the close task's configuration dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseParams {
    pub speed: u32,
    pub force: u32,
    pub load: u32,
}

impl CloseParams {
    /// All three ranges, checked up front so a bad value fails fast before
    /// any UI interaction
    pub fn validate(&self) -> bool {
        validate_speed(self.speed) && validate_force(self.force) && validate_load(self.load)
    }
}

impl Default for CloseParams {
    fn default() -> Self {
        Self {
            speed: DEFAULT_CLOSE_SPEED,
            force: DEFAULT_CLOSE_FORCE,
            load: DEFAULT_CLOSE_LOAD,
        }
    }
}
