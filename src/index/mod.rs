pub mod locale_index;
pub mod post_process;
pub mod scanner;
pub mod snapshot;

pub use locale_index::LocaleIndex;
pub use post_process::{deduplicate, normalize_entry, post_process};
pub use scanner::{ScanStats, Scanner};
pub use snapshot::IndexSnapshot;
