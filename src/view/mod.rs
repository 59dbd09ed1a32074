mod report;
mod status;

pub use report::{render_report, REPORT_HEADER};
pub use status::{emit, BufferSink, ConsoleSink, StatusSink};
