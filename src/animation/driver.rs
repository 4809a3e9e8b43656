//! Animation driver and session state
//!
//! Owns every piece of per-session mutable state: the feed cursor,
//! both entity systems, the aggregates, and the play controls. The
//! host calls `advance` with its frame timestamps; the driver decides
//! when a simulation tick is due and when the next commit is ingested.
//! One tick is: ingest if due, physics step, stats publish. Scenes are
//! assembled on demand from the current state.

use serde::Serialize;

use crate::color::{AuthorColors, GradientCache};
use crate::data::CommitFeed;
use crate::growth::TreeSystem;
use crate::metrics::{ContributionHistory, LanguageDistribution};
use crate::particles::ParticleSystem;
use crate::render::{self, Scene, Viewport};

const BASE_FPS: f64 = 75.0;
const BASE_FPS_MASSIVE: f64 = 60.0;
/// Commits are ingested every `interval / speed` frames
const COMMIT_INTERVAL: f32 = 30.0;
const COMMIT_INTERVAL_MASSIVE: f32 = 60.0;

const MIN_SPEED: f32 = 0.1;
const MAX_SPEED: f32 = 10.0;

/// Which entity system is live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Standard,
    Elaborate,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Standard => "standard",
            Mode::Elaborate => "elaborate",
        }
    }
}

/// Driver state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
    Completed,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Completed => "completed",
        }
    }
}

/// Textual frame summary for the host's stats panel
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RushStats {
    pub commits_ingested: usize,
    pub commit_total: usize,
    /// Feed size before massive-repo sampling
    pub commits_before_sampling: usize,
    pub unique_files: usize,
    pub live_entities: usize,
    pub speed: f32,
    pub mode: &'static str,
    pub state: &'static str,
    pub massive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_commit: Option<CurrentCommit>,
}

/// The most recently ingested commit
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentCommit {
    pub author: String,
    pub message: String,
    pub date: String,
}

/// Timer-driven sequencer over the whole simulation session
#[derive(Debug, Clone)]
pub struct Driver {
    feed: CommitFeed,
    colors: AuthorColors,
    gradients: GradientCache,
    particles: ParticleSystem,
    tree: TreeSystem,
    contributions: ContributionHistory,
    languages: LanguageDistribution,
    viewport: Viewport,
    mode: Mode,
    state: RunState,
    speed: f32,
    frame_count: u64,
    cursor: usize,
    last_frame_ms: Option<f64>,
    stopped: bool,
    seed: u32,
}

impl Driver {
    pub fn new(feed: CommitFeed, viewport: Viewport, seed: u32) -> Self {
        let authors = feed.authors_in_order();
        let colors = AuthorColors::assign(&authors);
        let massive = feed.is_massive();

        Self {
            feed,
            colors,
            gradients: GradientCache::new(),
            particles: ParticleSystem::new(massive, seed),
            tree: TreeSystem::new(massive, seed.wrapping_add(1)),
            contributions: ContributionHistory::new(),
            languages: LanguageDistribution::new(),
            viewport,
            mode: Mode::Standard,
            state: RunState::Running,
            speed: 1.0,
            frame_count: 0,
            cursor: 0,
            last_frame_ms: None,
            stopped: false,
            seed,
        }
    }

    /// Advance against a host timestamp. Runs at most one tick and
    /// returns whether one ran, so the host knows to redraw.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        if self.stopped || self.state != RunState::Running {
            return false;
        }

        let base_fps = if self.feed.is_massive() { BASE_FPS_MASSIVE } else { BASE_FPS };
        let frame_interval = 1000.0 / base_fps;

        let Some(last) = self.last_frame_ms else {
            self.last_frame_ms = Some(now_ms);
            return false;
        };

        let delta = now_ms - last;
        if delta < frame_interval {
            return false;
        }

        self.tick();
        self.last_frame_ms = Some(now_ms - (delta % frame_interval));
        true
    }

    /// One simulation tick: ingest if due, then step physics.
    pub fn tick(&mut self) {
        if self.state != RunState::Running {
            return;
        }

        self.frame_count += 1;

        let base_interval = if self.feed.is_massive() {
            COMMIT_INTERVAL_MASSIVE
        } else {
            COMMIT_INTERVAL
        };
        let ingest_every = ((base_interval / self.speed).floor() as u64).max(1);

        if self.frame_count % ingest_every == 0 && self.cursor < self.feed.len() {
            self.ingest();
        }

        match self.mode {
            Mode::Standard => self.particles.update(&self.viewport),
            Mode::Elaborate => self.tree.update(&self.viewport),
        }

        if self.cursor >= self.feed.len() {
            self.state = RunState::Completed;
        }
    }

    fn ingest(&mut self) {
        let Some(commit) = self.feed.get(self.cursor) else {
            return;
        };
        let commit = commit.clone();

        match self.mode {
            Mode::Standard => self.particles.spawn_commit(
                &commit,
                &self.colors,
                &mut self.gradients,
                &self.viewport,
            ),
            Mode::Elaborate => self.tree.spawn_commit(&commit, &self.colors, &self.viewport),
        }

        self.contributions.record(self.feed.commits(), self.cursor);
        self.languages.record(&commit);
        self.cursor += 1;
    }

    /// Running <-> Paused; no-op once Completed.
    pub fn toggle_pause(&mut self) {
        match self.state {
            RunState::Running => self.state = RunState::Paused,
            RunState::Paused => {
                self.state = RunState::Running;
                // Resync so the pause gap is not counted as elapsed time
                self.last_frame_ms = None;
            }
            RunState::Completed => {}
        }
    }

    /// Adjust speed by a delta, clamped to the allowed range.
    pub fn change_speed(&mut self, delta: f32) {
        self.set_speed(self.speed + delta);
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Clear all simulation and aggregate state and start over from
    /// the first commit. Mode and speed survive a restart; the
    /// gradient cache does too, since registered resources stay valid
    /// for the whole session.
    pub fn restart(&mut self) {
        let massive = self.feed.is_massive();
        self.particles = ParticleSystem::new(massive, self.seed);
        self.tree = TreeSystem::new(massive, self.seed.wrapping_add(1));
        self.contributions.clear();
        self.languages.clear();
        self.cursor = 0;
        self.frame_count = 0;
        self.state = RunState::Running;
        self.last_frame_ms = None;

        if self.mode == Mode::Elaborate {
            self.tree.seed_root(&self.viewport);
        }
    }

    /// Switch between standard and elaborate mode, clearing all entity
    /// collections. Available while Running or Paused only.
    pub fn toggle_mode(&mut self) {
        if self.state == RunState::Completed {
            return;
        }

        self.mode = match self.mode {
            Mode::Standard => Mode::Elaborate,
            Mode::Elaborate => Mode::Standard,
        };
        self.particles.clear();
        self.tree.clear();
        if self.mode == Mode::Elaborate {
            self.tree.seed_root(&self.viewport);
        }
    }

    /// Stop scheduling ticks for good. Idempotent.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Assemble the current frame.
    pub fn scene(&self) -> Scene {
        let shapes = match self.mode {
            Mode::Standard => render::render_standard(
                &self.particles,
                &self.colors,
                &self.contributions,
                &self.languages,
                self.cursor,
                &self.viewport,
            ),
            Mode::Elaborate => render::render_elaborate(
                &self.tree,
                &self.colors,
                &self.contributions,
                &self.languages,
                self.cursor,
                &self.viewport,
            ),
        };

        Scene {
            mode: self.mode.as_str(),
            defs: self.gradients.defs().to_vec(),
            shapes,
        }
    }

    pub fn stats(&self) -> RushStats {
        let current_commit = self
            .cursor
            .checked_sub(1)
            .and_then(|index| self.feed.get(index))
            .map(|commit| CurrentCommit {
                author: commit.author.clone(),
                message: commit.short_message(),
                date: commit.date.clone(),
            });

        RushStats {
            commits_ingested: self.cursor,
            commit_total: self.feed.len(),
            commits_before_sampling: self.feed.total_commits(),
            unique_files: self.languages.total_files(),
            live_entities: self.live_entities(),
            speed: self.speed,
            mode: self.mode.as_str(),
            state: self.state.as_str(),
            massive: self.feed.is_massive(),
            current_commit,
        }
    }

    pub fn live_entities(&self) -> usize {
        match self.mode {
            Mode::Standard => self.particles.live_count(),
            Mode::Elaborate => self.tree.node_count(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn tree(&self) -> &TreeSystem {
        &self.tree
    }

    pub fn contributions(&self) -> &ContributionHistory {
        &self.contributions
    }
}
