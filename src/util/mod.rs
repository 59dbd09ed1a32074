mod format;

pub use format::{format_delta_mb, format_mb, format_timestamp, now_unix};
