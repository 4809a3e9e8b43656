//! Elaborate-mode tree growth engine
//!
//! Commits grow an organic tree instead of a particle burst: each
//! changed file buds a node off a recently added parent, connected by
//! a decaying branch and announced by transient pulse/spiral/bloom
//! decorations. Nodes live in a flat list and are only removed by a
//! session reset; adjacency exists solely in the branch list, since a
//! node may carry zero or many connections and none is authoritative.

use crate::color::{file_color, AuthorColors, FALLBACK_WHITE};
use crate::data::CommitRecord;
use crate::math::Lcg;
use crate::render::project::Viewport;

/// Parent candidates are drawn from this many most-recent nodes
const PARENT_WINDOW: usize = 20;
/// At most this many files of a commit become branches
const MAX_BRANCHES_PER_COMMIT: usize = 5;
/// Per-commit file cap for massive repositories
const MASSIVE_FILES_PER_COMMIT: usize = 10;

const BRANCH_MAX_AGE: u32 = 120;
const PULSE_MAX_AGE: u32 = 60;
const SPIRAL_MAX_AGE: u32 = 180;
const BLOOM_MAX_AGE: u32 = 150;
const SPIRAL_POINT_CAP: usize = 60;
const SPIRAL_CHANCE: f32 = 0.3;

const EDGE_MARGIN: f32 = 20.0;
const JITTER: f32 = 0.05;
const NODE_DAMPING: f32 = 0.95;

/// A tree node representing one changed file (or the session root)
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: &'static str,
    pub author_color: Option<&'static str>,
    pub size: f32,
    pub age: u32,
    pub is_root: bool,
    pub filename: Option<String>,
    pub commit_hash: Option<String>,
    pub author: Option<String>,
}

impl TreeNode {
    fn root(viewport: &Viewport) -> Self {
        Self {
            x: viewport.width / 2.0,
            y: viewport.height - 50.0,
            vx: 0.0,
            vy: 0.0,
            color: FALLBACK_WHITE,
            author_color: None,
            size: 8.0,
            age: 0,
            is_root: true,
            filename: None,
            commit_hash: None,
            author: None,
        }
    }
}

/// Decaying connection between two nodes, held by index into the node
/// list (nodes are never removed outside a full reset, so indices are
/// stable for the branch's lifetime).
#[derive(Debug, Clone)]
pub struct Branch {
    pub from: usize,
    pub to: usize,
    pub color: &'static str,
    pub width: f32,
    pub age: u32,
    pub max_age: u32,
}

/// Expanding ring announcing a new node
#[derive(Debug, Clone)]
pub struct PulseEffect {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub max_radius: f32,
    pub color: &'static str,
    pub age: u32,
    pub max_age: u32,
}

/// Outward-winding trail anchored at a node
#[derive(Debug, Clone)]
pub struct SpiralPath {
    pub center_x: f32,
    pub center_y: f32,
    pub angle: f32,
    pub radius: f32,
    pub color: &'static str,
    pub age: u32,
    pub max_age: u32,
    pub points: Vec<(f32, f32)>,
}

/// Petaled bloom marking a commit that touched many files
#[derive(Debug, Clone)]
pub struct GrowthPoint {
    pub x: f32,
    pub y: f32,
    pub petals: usize,
    pub color: &'static str,
    pub file_color: &'static str,
    pub size: f32,
    pub age: u32,
    pub max_age: u32,
    pub rotation: f32,
}

/// Owns all elaborate-mode entities and advances them each tick
#[derive(Debug, Clone)]
pub struct TreeSystem {
    nodes: Vec<TreeNode>,
    branches: Vec<Branch>,
    pulses: Vec<PulseEffect>,
    spirals: Vec<SpiralPath>,
    blooms: Vec<GrowthPoint>,
    massive: bool,
    rng: Lcg,
}

impl TreeSystem {
    pub fn new(massive: bool, seed: u32) -> Self {
        Self {
            nodes: Vec::new(),
            branches: Vec::new(),
            pulses: Vec::new(),
            spirals: Vec::new(),
            blooms: Vec::new(),
            massive,
            rng: Lcg::new(seed),
        }
    }

    /// Clear everything and plant the single root node. Exactly one
    /// root exists per session; it never moves and never ages out.
    pub fn seed_root(&mut self, viewport: &Viewport) {
        self.clear();
        self.nodes.push(TreeNode::root(viewport));
    }

    /// Grow branches for one commit.
    pub fn spawn_commit(
        &mut self,
        commit: &CommitRecord,
        colors: &AuthorColors,
        viewport: &Viewport,
    ) {
        let author_color = colors.get(&commit.author);
        let files: Vec<&str> = if self.massive {
            commit.files.iter().take(MASSIVE_FILES_PER_COMMIT).map(String::as_str).collect()
        } else {
            commit.files.iter().map(String::as_str).collect()
        };
        let branch_count = files.len().min(MAX_BRANCHES_PER_COMMIT);

        for (i, filename) in files.iter().take(branch_count).enumerate() {
            if self.nodes.is_empty() {
                self.nodes.push(TreeNode::root(viewport));
            }

            let window = self.nodes.len().min(PARENT_WINDOW);
            let parent_index = self.nodes.len() - window + self.rng.index(window);
            let parent = &self.nodes[parent_index];

            // Forward-biased arc, pointing mostly upward
            let angle = (self.rng.next_f32() - 0.5) * std::f32::consts::PI * 0.8
                - std::f32::consts::FRAC_PI_2;
            let distance = self.rng.range(40.0, 100.0);

            let node = TreeNode {
                x: parent.x + angle.cos() * distance,
                y: parent.y + angle.sin() * distance,
                vx: angle.cos() * 2.0,
                vy: angle.sin() * 2.0,
                color: file_color(filename),
                author_color: Some(author_color),
                size: self.rng.range(4.0, 8.0),
                age: 0,
                is_root: false,
                filename: Some(CommitRecord::short_name(filename).to_string()),
                commit_hash: Some(commit.hash.clone()),
                author: Some(commit.author.clone()),
            };

            let node_index = self.nodes.len();
            self.nodes.push(node);

            self.branches.push(Branch {
                from: parent_index,
                to: node_index,
                color: author_color,
                width: self.rng.range(2.0, 4.0),
                age: 0,
                max_age: BRANCH_MAX_AGE,
            });

            let child = &self.nodes[node_index];
            self.pulses.push(PulseEffect {
                x: child.x,
                y: child.y,
                radius: 0.0,
                max_radius: self.rng.range(40.0, 70.0),
                color: child.color,
                age: 0,
                max_age: PULSE_MAX_AGE,
            });

            if self.rng.chance(SPIRAL_CHANCE) {
                self.spirals.push(SpiralPath {
                    center_x: child.x,
                    center_y: child.y,
                    angle: 0.0,
                    radius: 5.0,
                    color: author_color,
                    age: 0,
                    max_age: SPIRAL_MAX_AGE,
                    points: Vec::new(),
                });
            }
        }

        if files.len() > 3 && self.rng.chance(0.5) {
            if let Some(center) = self.nodes.last() {
                self.blooms.push(GrowthPoint {
                    x: center.x,
                    y: center.y,
                    petals: files.len(),
                    color: author_color,
                    file_color: file_color(files[0]),
                    size: self.rng.range(20.0, 40.0),
                    age: 0,
                    max_age: BLOOM_MAX_AGE,
                    rotation: self.rng.next_f32() * std::f32::consts::TAU,
                });
            }
        }
    }

    /// One tick: jitter and integrate non-root nodes, age decorations,
    /// evict everything past its max age.
    pub fn update(&mut self, viewport: &Viewport) {
        for branch in &mut self.branches {
            branch.age += 1;
        }
        self.branches.retain(|b| b.age <= b.max_age);

        for node in &mut self.nodes {
            if node.is_root {
                continue;
            }

            node.age += 1;
            node.vx += (self.rng.next_f32() - 0.5) * JITTER * 2.0;
            node.vy += (self.rng.next_f32() - 0.5) * JITTER * 2.0;
            node.vx *= NODE_DAMPING;
            node.vy *= NODE_DAMPING;
            node.x += node.vx;
            node.y += node.vy;

            // Hard clamp with a plain sign flip; unlike standard mode
            // there is no restitution factor here.
            if node.x < EDGE_MARGIN {
                node.x = EDGE_MARGIN;
                node.vx = node.vx.abs();
            }
            if node.x > viewport.width - EDGE_MARGIN {
                node.x = viewport.width - EDGE_MARGIN;
                node.vx = -node.vx.abs();
            }
            if node.y < EDGE_MARGIN {
                node.y = EDGE_MARGIN;
                node.vy = node.vy.abs();
            }
            if node.y > viewport.height - EDGE_MARGIN {
                node.y = viewport.height - EDGE_MARGIN;
                node.vy = -node.vy.abs();
            }
        }

        for pulse in &mut self.pulses {
            pulse.age += 1;
            pulse.radius = pulse.age as f32 / pulse.max_age as f32 * pulse.max_radius;
        }
        self.pulses.retain(|p| p.age <= p.max_age);

        for spiral in &mut self.spirals {
            spiral.age += 1;
            spiral.angle += 0.15;
            spiral.radius += 0.5;

            let x = spiral.center_x + spiral.angle.cos() * spiral.radius;
            let y = spiral.center_y + spiral.angle.sin() * spiral.radius;
            spiral.points.push((x, y));
            if spiral.points.len() > SPIRAL_POINT_CAP {
                spiral.points.remove(0);
            }
        }
        self.spirals.retain(|s| s.age <= s.max_age);

        for bloom in &mut self.blooms {
            bloom.age += 1;
            bloom.rotation += 0.02;
        }
        self.blooms.retain(|g| g.age <= g.max_age);
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn pulses(&self) -> &[PulseEffect] {
        &self.pulses
    }

    pub fn spirals(&self) -> &[SpiralPath] {
        &self.spirals
    }

    pub fn blooms(&self) -> &[GrowthPoint] {
        &self.blooms
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.branches.clear();
        self.pulses.clear();
        self.spirals.clear();
        self.blooms.clear();
    }
}
