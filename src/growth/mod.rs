pub mod tree;

pub use tree::{Branch, GrowthPoint, PulseEffect, SpiralPath, TreeNode, TreeSystem};
