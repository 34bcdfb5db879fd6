use sqlx::{PgConnection, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::{ChartSeriesDto, DashboardDto};
use crate::features::reports::filters::{FilterSet, Predicate, ReportColumn};
use crate::features::reports::models::GroupCount;
use crate::shared::constants::{REPORTS_TABLE, TOP_SERIES_LIMIT};

/// Dimension of the dashboard's primary chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupDimension {
    /// Top stations within the filtered line
    Station,
    /// Top lines across the network
    Line,
}

impl GroupDimension {
    pub fn column(&self) -> ReportColumn {
        match self {
            GroupDimension::Station => ReportColumn::Station,
            GroupDimension::Line => ReportColumn::Line,
        }
    }
}

/// Both aggregate series of a dashboard response
#[derive(Debug, Clone, Default)]
pub struct AggregateSeries {
    pub top: Vec<GroupCount>,
    pub sentiment: Vec<GroupCount>,
}

/// Query shape for the dashboard aggregates.
///
/// A line filter switches the primary chart from "top lines" to "top stations of that line".
/// The sentiment distribution is always computed over the same predicate and is uncapped.
/// Ties at the top-N cutoff are broken by whatever order the database returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationPlan {
    dimension: GroupDimension,
    title: String,
}

impl AggregationPlan {
    pub fn for_filters(filters: &FilterSet) -> Self {
        match filters.line() {
            Some(line) => Self {
                dimension: GroupDimension::Station,
                title: format!("Top Estaciones ({})", line),
            },
            None => Self {
                dimension: GroupDimension::Line,
                title: "Top Líneas (Global)".to_string(),
            },
        }
    }

    pub fn dimension(&self) -> GroupDimension {
        self.dimension
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn top_series_query(&self, predicate: &Predicate) -> QueryBuilder<'static, Postgres> {
        grouped_query(self.dimension.column(), predicate, Some(TOP_SERIES_LIMIT))
    }

    pub fn sentiment_query(&self, predicate: &Predicate) -> QueryBuilder<'static, Postgres> {
        grouped_query(ReportColumn::Opinion, predicate, None)
    }

    /// Run both grouped queries on the given connection
    pub async fn fetch(
        &self,
        conn: &mut PgConnection,
        predicate: &Predicate,
    ) -> Result<AggregateSeries> {
        let mut top_query = self.top_series_query(predicate);
        let top = top_query
            .build_query_as::<GroupCount>()
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch top series: {:?}", e);
                AppError::Database(e)
            })?;

        let mut sentiment_query = self.sentiment_query(predicate);
        let sentiment = sentiment_query
            .build_query_as::<GroupCount>()
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch sentiment distribution: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(AggregateSeries { top, sentiment })
    }

    pub fn into_dashboard(self, total: i64, series: AggregateSeries) -> DashboardDto {
        DashboardDto {
            total,
            titulo_grafico: self.title,
            grafico_principal: ChartSeriesDto::from(series.top),
            por_opinion: ChartSeriesDto::from(series.sentiment),
        }
    }
}

/// `SELECT COUNT(*)` over the predicate
pub fn count_query(predicate: &Predicate) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", REPORTS_TABLE));
    predicate.write_where(&mut builder);
    builder
}

fn grouped_query(
    column: ReportColumn,
    predicate: &Predicate,
    limit: Option<i64>,
) -> QueryBuilder<'static, Postgres> {
    let column = column.as_sql();
    let mut builder = QueryBuilder::new(format!(
        "SELECT {} AS label, COUNT(*) AS total FROM {}",
        column, REPORTS_TABLE
    ));
    predicate.write_where(&mut builder);
    builder.push(format!(" GROUP BY {}", column));

    if let Some(limit) = limit {
        builder.push(" ORDER BY total DESC LIMIT ");
        builder.push_bind(limit);
    }

    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(pairs: &[(&str, &str)]) -> FilterSet {
        FilterSet::from_query_pairs(pairs.iter().copied())
    }

    fn counts(rows: &[(&str, i64)]) -> Vec<GroupCount> {
        rows.iter()
            .map(|(label, total)| GroupCount {
                label: Some(label.to_string()),
                total: *total,
            })
            .collect()
    }

    #[test]
    fn test_line_filter_groups_by_station() {
        let plan = AggregationPlan::for_filters(&filters(&[("linea", "L1")]));

        assert_eq!(plan.dimension(), GroupDimension::Station);
        assert_eq!(plan.title(), "Top Estaciones (L1)");
    }

    #[test]
    fn test_no_line_filter_groups_by_line() {
        let plan = AggregationPlan::for_filters(&filters(&[("estacion", "Pantitlán")]));

        assert_eq!(plan.dimension(), GroupDimension::Line);
        assert_eq!(plan.title(), "Top Líneas (Global)");
    }

    #[test]
    fn test_blank_line_groups_by_line() {
        let plan = AggregationPlan::for_filters(&filters(&[("linea", "")]));
        assert_eq!(plan.dimension(), GroupDimension::Line);
    }

    #[test]
    fn test_top_series_query_is_capped_and_sorted() {
        let set = filters(&[("linea", "L1"), ("categorias", "Limpieza")]);
        let plan = AggregationPlan::for_filters(&set);

        let query = plan.top_series_query(&set.predicate());

        assert_eq!(
            query.sql(),
            "SELECT estacion AS label, COUNT(*) AS total FROM datos_metro_cdmx \
             WHERE linea = $1 AND categoria IN ($2) GROUP BY estacion ORDER BY total DESC LIMIT $3"
        );
    }

    #[test]
    fn test_sentiment_query_is_uncapped() {
        let set = filters(&[]);
        let plan = AggregationPlan::for_filters(&set);

        let query = plan.sentiment_query(&set.predicate());

        assert_eq!(
            query.sql(),
            "SELECT opinion AS label, COUNT(*) AS total FROM datos_metro_cdmx GROUP BY opinion"
        );
    }

    #[test]
    fn test_count_query_shares_predicate() {
        let set = filters(&[("fecha_inicio", "2024-01-01"), ("fecha_fin", "2024-01-31")]);

        let query = count_query(&set.predicate());

        assert_eq!(
            query.sql(),
            "SELECT COUNT(*) FROM datos_metro_cdmx WHERE fecha BETWEEN $1 AND $2"
        );
    }

    #[test]
    fn test_into_dashboard_keeps_series_order() {
        let plan = AggregationPlan::for_filters(&filters(&[]));
        let series = AggregateSeries {
            top: counts(&[("L1", 2), ("L2", 1)]),
            sentiment: counts(&[("pos", 2), ("neg", 1)]),
        };

        let dashboard = plan.into_dashboard(3, series);

        assert_eq!(dashboard.total, 3);
        assert_eq!(dashboard.titulo_grafico, "Top Líneas (Global)");
        assert_eq!(
            dashboard.grafico_principal.labels,
            vec![Some("L1".to_string()), Some("L2".to_string())]
        );
        assert_eq!(dashboard.grafico_principal.data, vec![2, 1]);
        assert_eq!(dashboard.por_opinion.data, vec![2, 1]);
        assert_eq!(dashboard.por_opinion.sum(), dashboard.total);
    }

    #[test]
    fn test_dashboard_serializes_wire_names() {
        let plan = AggregationPlan::for_filters(&filters(&[("linea", "L2")]));
        let dashboard = plan.into_dashboard(
            1,
            AggregateSeries {
                top: counts(&[("A", 1)]),
                sentiment: counts(&[("pos", 1)]),
            },
        );

        let json = serde_json::to_value(&dashboard).unwrap();

        assert_eq!(json["total"], 1);
        assert_eq!(json["titulo_grafico"], "Top Estaciones (L2)");
        assert_eq!(json["grafico_principal"]["labels"][0], "A");
        assert_eq!(json["por_opinion"]["data"][0], 1);
    }
}
