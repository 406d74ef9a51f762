pub mod cursor;
pub mod dynamic;
pub mod resolver;

pub use cursor::KeyLocator;
pub use dynamic::{dynamic_prefix, is_dynamic, DYNAMIC_MARKERS};
pub use resolver::{KeyResolver, Location, DISPLAY_LIMIT};
