/// Table holding every submitted rider report
pub const REPORTS_TABLE: &str = "datos_metro_cdmx";

/// Maximum rows returned by the report listing
pub const REPORT_LIST_LIMIT: i64 = 500;

/// Maximum entries in the dashboard's primary chart
pub const TOP_SERIES_LIMIT: i64 = 5;

/// Maximum alerts returned by the public alert feed
pub const PUBLIC_ALERTS_LIMIT: i64 = 20;
