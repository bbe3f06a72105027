//! Scripted input

use std::collections::VecDeque;

use super::InputSource;
use crate::sim::level::Level;
use crate::sim::tick::TickInput;

/// Replays a fixed list of inputs, one per frame
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<TickInput>,
    quit_at_end: bool,
    polled: u64,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            quit_at_end: false,
            polled: 0,
        }
    }

    /// Request quit once the script runs out instead of idling
    pub fn quit_at_end(mut self) -> Self {
        self.quit_at_end = true;
        self
    }

    /// Inputs not yet replayed
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    pub fn polled(&self) -> u64 {
        self.polled
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _level: &Level) -> TickInput {
        self.polled += 1;
        self.frames.pop_front().unwrap_or(TickInput {
            quit: self.quit_at_end,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{DifficultyParameters, parse_level};

    #[test]
    fn test_replays_then_idles_or_quits() {
        let description = parse_level("W 10 H 20\n").unwrap();
        let level = Level::new(&description, DifficultyParameters::default());
        let launch = TickInput {
            launch: true,
            ..Default::default()
        };

        let mut idle = ScriptedInput::new([launch]);
        assert_eq!(idle.poll(&level), launch);
        assert_eq!(idle.poll(&level), TickInput::default());
        assert_eq!(idle.polled(), 2);

        let mut quitting = ScriptedInput::new([launch]).quit_at_end();
        assert_eq!(quitting.remaining(), 1);
        quitting.poll(&level);
        assert!(quitting.poll(&level).quit);
    }
}
