pub mod format;

pub use self::format::{format_optional, truncate};
