pub mod gradient;
pub mod palette;

pub use gradient::{GradientCache, GradientDef};
pub use palette::{extension_color, file_color, name_hash, AuthorColors};
pub use palette::{AUTHOR_PALETTE, FALLBACK_WHITE, FILE_PALETTE, NO_EXTENSION_GRAY};
