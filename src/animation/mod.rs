pub mod driver;

pub use driver::{Driver, Mode, RunState, RushStats};
