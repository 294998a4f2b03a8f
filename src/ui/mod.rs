//! Console output

mod reporter;

pub use reporter::{format_notice, format_report, ConsoleReporter, Notice, NoticeLevel};
