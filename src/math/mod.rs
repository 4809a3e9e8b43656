pub mod rng;
pub mod vec3;

pub use rng::Lcg;
pub use vec3::Vec3;
