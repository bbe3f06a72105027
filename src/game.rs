//! Frame loop driver
//!
//! `Game` owns the level catalog, the current level, the session and the
//! collaborators (renderer, input, audio). Each frame it renders, polls
//! input, ticks the simulation, plays cues and handles level transitions.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, ensure};

use crate::audio::{AudioSink, SoundEffect};
use crate::highscores::HighScore;
use crate::host::{FramePacer, InputSource};
use crate::persistence::LevelCatalog;
use crate::renderer::{Renderer, make_title};
use crate::settings::Settings;
use crate::sim::level::Level;
use crate::sim::state::{GameEvent, GamePhase, Session};
use crate::sim::tick::tick;

/// One running game
pub struct Game<R, I, A> {
    catalog: LevelCatalog,
    level: Level,
    session: Session,
    renderer: R,
    input: I,
    audio: A,
    highscore_path: PathBuf,
    frame_ms: f64,
    pacer: FramePacer,
    frame_limit: Option<u64>,
    frames: u64,
}

impl<R: Renderer, I: InputSource, A: AudioSink> Game<R, I, A> {
    /// Start at level 1 with the settings' lives and difficulty
    pub fn new(
        catalog: LevelCatalog,
        settings: &Settings,
        renderer: R,
        input: I,
        audio: A,
    ) -> Result<Self> {
        ensure!(settings.start_lives > 0, "start_lives must be positive");
        ensure!(
            settings.difficulty.is_playable(),
            "unplayable difficulty {:?}",
            settings.difficulty
        );
        let highscore = HighScore::load(&settings.highscore_path).score;
        let session = Session::new(
            catalog.len(),
            settings.start_lives,
            settings.difficulty,
            highscore,
        );
        let level = build_level(&catalog, &session)?;
        let frame_ms = settings.frame_ms();

        let mut game = Self {
            catalog,
            level,
            session,
            renderer,
            input,
            audio,
            highscore_path: settings.highscore_path.clone(),
            frame_ms,
            pacer: FramePacer::new(frame_ms),
            frame_limit: None,
            frames: 0,
        };
        game.update_title();
        Ok(game)
    }

    /// Replace the frame pacer
    pub fn with_pacer(mut self, pacer: FramePacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Exit once `frames` frames have been played
    pub fn with_frame_limit(mut self, frames: Option<u64>) -> Self {
        self.frame_limit = frames;
        self
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Frames stepped so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run until quit
    pub fn run(&mut self) -> Result<()> {
        log::info!(
            "Starting at level 1 of {} with {} lives",
            self.catalog.len(),
            self.session.lives
        );
        while self.step_frame()? {}
        log::info!(
            "Exited after {} frames: level {}, score {}, highscore {}",
            self.frames,
            self.session.level_index,
            self.session.score,
            self.session.highscore
        );
        Ok(())
    }

    /// Advance one frame; returns false once the game has exited
    pub fn step_frame(&mut self) -> Result<bool> {
        if self.frame_limit.is_some_and(|limit| self.frames >= limit) {
            log::info!("Frame limit reached after {} frames", self.frames);
            self.session.phase = GamePhase::Exit;
            return Ok(false);
        }
        let started = self.pacer.begin();

        self.renderer.render(&self.level);

        let input = self.input.poll(&self.level);
        self.frames += 1;

        if input.pause_toggled {
            log::info!("{}", if input.paused { "Paused" } else { "Resumed" });
            self.renderer.set_paused(input.paused);
        }

        let events = tick(&mut self.level, &mut self.session, &input, self.frame_ms);
        self.handle_events(&events);
        self.handle_transition()?;

        self.pacer.finish(started);
        Ok(self.session.phase != GamePhase::Exit)
    }

    fn handle_events(&mut self, events: &[GameEvent]) {
        let mut counters_changed = false;
        for event in events {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.audio.play(effect);
            }
            counters_changed |= matches!(
                event,
                GameEvent::BrickDestroyed { .. } | GameEvent::ExtraLife { .. } | GameEvent::BallLost
            );
        }
        if counters_changed {
            self.update_title();
        }
    }

    /// Load the next level after a clear or game over
    fn handle_transition(&mut self) -> Result<()> {
        match self.session.phase {
            GamePhase::GameOver => {
                if self.session.record_highscore() {
                    HighScore::new(self.session.highscore)
                        .save(&self.highscore_path)
                        .with_context(|| {
                            format!(
                                "failed saving highscore to {}",
                                self.highscore_path.display()
                            )
                        })?;
                }
            }
            GamePhase::LevelCleared | GamePhase::AllLevelsCleared => {}
            GamePhase::Playing | GamePhase::LifeLost | GamePhase::Exit => return Ok(()),
        }

        self.session.advance();
        self.level = build_level(&self.catalog, &self.session)?;
        self.update_title();
        Ok(())
    }

    fn update_title(&mut self) {
        let title = make_title(
            self.session.level_index,
            self.session.lives,
            self.session.score,
            self.session.highscore,
        );
        self.renderer.set_title(&title);
    }
}

fn build_level(catalog: &LevelCatalog, session: &Session) -> Result<Level> {
    let entry = catalog
        .get(session.level_index)
        .ok_or_else(|| anyhow!("level {} is not in the catalog", session.level_index))?;
    log::info!("Playing level {} ({})", session.level_index, entry.name);
    Ok(Level::new(&entry.description, session.difficulty))
}
