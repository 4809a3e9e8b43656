pub mod standard;

pub use standard::{EdgeLink, Particle, ParticleSystem, StaticOutline};
