//! Standard-mode particle engine
//!
//! Every ingested commit bursts one particle per changed file from the
//! origin, distributed around evenly spaced angular slots. Particles
//! never expire on their own; the working set is bounded by a cap that
//! freezes the whole live set into static outlines and starts over.

use std::collections::HashMap;

use crate::color::{file_color, AuthorColors, GradientCache};
use crate::data::CommitRecord;
use crate::math::{Lcg, Vec3};
use crate::render::project::Viewport;

/// Live particle cap before a flush to static outlines
pub const MAX_PARTICLES: usize = 90;
/// Reduced cap for massive repositories
pub const MAX_PARTICLES_MASSIVE: usize = 45;
/// Per-commit file cap for massive repositories
const MASSIVE_FILES_PER_COMMIT: usize = 10;

const GRAVITY: f32 = 0.02;
const DAMPING: f32 = 0.99;
const RESTITUTION: f32 = 0.7;
const GROUND_FRICTION: f32 = 0.9;
const MAX_DEPTH: f32 = 400.0;

/// One simulated point representing a changed file
#[derive(Debug, Clone)]
pub struct Particle {
    /// Unique id: commit hash + full file path
    pub id: String,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Paint handle from the gradient cache
    pub fill: String,
    pub file_color: &'static str,
    pub size: f32,
    pub age: u32,
    /// Standard-mode particles never age out on their own
    pub max_age: Option<u32>,
    pub filename: String,
    pub author: String,
    pub commit_hash: String,
}

/// Frozen snapshot of a particle's last projected appearance
#[derive(Debug, Clone)]
pub struct StaticOutline {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub color: String,
    pub opacity: f32,
}

/// Connective link between two particles of the same commit directory.
/// Endpoints are resolved by id at render time; a flushed endpoint
/// silently drops the edge from that frame.
#[derive(Debug, Clone)]
pub struct EdgeLink {
    pub source_id: String,
    pub target_id: String,
    pub directory: String,
}

/// Owns all standard-mode entities and advances their physics
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    outlines: Vec<StaticOutline>,
    edges: Vec<EdgeLink>,
    cap: usize,
    massive: bool,
    rng: Lcg,
}

impl ParticleSystem {
    pub fn new(massive: bool, seed: u32) -> Self {
        Self {
            particles: Vec::new(),
            outlines: Vec::new(),
            edges: Vec::new(),
            cap: if massive { MAX_PARTICLES_MASSIVE } else { MAX_PARTICLES },
            massive,
            rng: Lcg::new(seed),
        }
    }

    /// Spawn particles for one commit, flushing the live set first if
    /// it has reached the cap.
    pub fn spawn_commit(
        &mut self,
        commit: &CommitRecord,
        colors: &AuthorColors,
        gradients: &mut GradientCache,
        viewport: &Viewport,
    ) {
        if self.particles.len() >= self.cap {
            self.flush(viewport);
        }

        let author_color = colors.get(&commit.author);
        let files: Vec<&str> = if self.massive {
            commit.files.iter().take(MASSIVE_FILES_PER_COMMIT).map(String::as_str).collect()
        } else {
            commit.files.iter().map(String::as_str).collect()
        };

        let first_new = self.particles.len();
        let count = files.len();

        for (i, filename) in files.iter().enumerate() {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let elevation = (self.rng.next_f32() - 0.5) * std::f32::consts::PI * 0.5;
            let speed = self.rng.range(1.5, 3.0);

            let fc = file_color(filename);
            self.particles.push(Particle {
                id: format!("{}-{}", commit.hash, filename),
                position: Vec3::ZERO,
                velocity: Vec3::new(
                    angle.cos() * elevation.cos() * speed,
                    elevation.sin() * speed,
                    angle.sin() * elevation.cos() * speed,
                ),
                fill: gradients.intern(fc, author_color),
                file_color: fc,
                size: self.rng.range(6.0, 11.0),
                age: 0,
                max_age: None,
                filename: CommitRecord::short_name(filename).to_string(),
                author: commit.author.clone(),
                commit_hash: commit.hash.clone(),
            });
        }

        if !self.massive {
            self.link_directory_groups(first_new, &files);
        }
    }

    /// Pair up same-commit particles sharing a parent directory.
    fn link_directory_groups(&mut self, first_new: usize, files: &[&str]) {
        let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
        for (offset, filename) in files.iter().enumerate() {
            groups
                .entry(CommitRecord::directory(filename))
                .or_default()
                .push(first_new + offset);
        }

        for (directory, members) in groups {
            for i in 0..members.len() {
                for j in (i + 1)..members.len() {
                    self.edges.push(EdgeLink {
                        source_id: self.particles[members[i]].id.clone(),
                        target_id: self.particles[members[j]].id.clone(),
                        directory: directory.to_string(),
                    });
                }
            }
        }
    }

    /// Snapshot every live particle into a static outline, then clear
    /// the live set and all edges.
    fn flush(&mut self, viewport: &Viewport) {
        for p in &self.particles {
            let proj = viewport.project(p.position);
            self.outlines.push(StaticOutline {
                x: proj.x,
                y: proj.y,
                r: p.size * proj.scale,
                color: p.fill.clone(),
                opacity: 0.6,
            });
        }
        self.particles.clear();
        self.edges.clear();
    }

    /// One physics tick: gravity, integration, damping, then reflective
    /// bounds against the projected footprint.
    pub fn update(&mut self, viewport: &Viewport) {
        let width = viewport.width;
        let height = viewport.height;

        for p in &mut self.particles {
            p.age += 1;

            p.velocity.y += GRAVITY;
            p.position = p.position + p.velocity;
            p.velocity = p.velocity.scale(DAMPING);

            let proj = viewport.project(p.position);
            let radius = p.size * proj.scale;

            if proj.y + radius > height {
                p.position.y = (height - radius - height / 2.0) / proj.scale;
                p.velocity.y = -p.velocity.y * RESTITUTION;
                p.velocity.x *= GROUND_FRICTION;
                p.velocity.z *= GROUND_FRICTION;
            }

            if proj.y - radius < 0.0 {
                p.position.y = (radius - height / 2.0) / proj.scale;
                p.velocity.y = -p.velocity.y * RESTITUTION;
            }

            if proj.x - radius < 0.0 || proj.x + radius > width {
                if proj.x - radius < 0.0 {
                    p.position.x = (-width / 2.0 - radius) / proj.scale;
                } else {
                    p.position.x = (width / 2.0 - radius) / proj.scale;
                }
                p.velocity.x = -p.velocity.x * RESTITUTION;
            }

            if p.position.z < -MAX_DEPTH || p.position.z > MAX_DEPTH {
                p.position.z = p.position.z.clamp(-MAX_DEPTH, MAX_DEPTH);
                p.velocity.z = -p.velocity.z * RESTITUTION;
            }
        }

        self.particles
            .retain(|p| p.max_age.map_or(true, |max| p.age < max));
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn outlines(&self) -> &[StaticOutline] {
        &self.outlines
    }

    pub fn edges(&self) -> &[EdgeLink] {
        &self.edges
    }

    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Drop every entity (restart or mode switch)
    pub fn clear(&mut self) {
        self.particles.clear();
        self.outlines.clear();
        self.edges.clear();
    }
}
