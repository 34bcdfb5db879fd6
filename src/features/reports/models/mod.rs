mod report;

pub use report::{GroupCount, NewReport, ReportSummary};
