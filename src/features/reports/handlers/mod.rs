pub mod report_handler;

pub use report_handler::{
    __path_list_reports, __path_submit_report, filters_from_pairs, list_reports, submit_report,
    QueryPairs, ReportState,
};
