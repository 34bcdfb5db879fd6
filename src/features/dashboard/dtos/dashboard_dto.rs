use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reports::models::GroupCount;

/// Chart-ready series: `labels[i]` has `data[i]` matching reports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChartSeriesDto {
    pub labels: Vec<Option<String>>,
    pub data: Vec<i64>,
}

impl From<Vec<GroupCount>> for ChartSeriesDto {
    fn from(rows: Vec<GroupCount>) -> Self {
        let (labels, data) = rows.into_iter().map(|r| (r.label, r.total)).unzip();
        Self { labels, data }
    }
}

impl ChartSeriesDto {
    pub fn sum(&self) -> i64 {
        self.data.iter().sum()
    }
}

/// Dashboard aggregate for one filter set
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    /// Reports matching the filters
    pub total: i64,
    /// Title of the primary chart (top stations within a line, or top lines)
    pub titulo_grafico: String,
    /// Top 5 groups by report count, descending
    pub grafico_principal: ChartSeriesDto,
    /// Report count per sentiment label
    pub por_opinion: ChartSeriesDto,
}
