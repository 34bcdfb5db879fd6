mod aggregation_planner;

pub use aggregation_planner::{count_query, AggregationPlan};
