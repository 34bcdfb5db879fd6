//! Report filters and the parameterized predicates derived from them.
//!
//! Query parameters arrive as loose string pairs. [`FilterSet::from_query_pairs`] normalizes
//! them without ever failing, and [`FilterSet::predicate`] turns the result into a list of
//! typed [`Clause`]s. Each clause writes its SQL text and the values it binds through the same
//! [`PredicateSink`] call sequence, so placeholder count and bound values always agree.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use sqlx::{Postgres, QueryBuilder};

pub const PARAM_LINE: &str = "linea";
pub const PARAM_STATION: &str = "estacion";
pub const PARAM_START_DATE: &str = "fecha_inicio";
pub const PARAM_END_DATE: &str = "fecha_fin";
pub const PARAM_CATEGORIES: &str = "categorias";
/// Alternate spelling sent by clients that encode arrays with a bracket suffix
pub const PARAM_CATEGORIES_BRACKETED: &str = "categorias[]";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Columns of the report table that filters and groupings refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportColumn {
    Line,
    Station,
    Date,
    Category,
    Opinion,
}

impl ReportColumn {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ReportColumn::Line => "linea",
            ReportColumn::Station => "estacion",
            ReportColumn::Date => "fecha",
            ReportColumn::Category => "categoria",
            ReportColumn::Opinion => "opinion",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Normalized, optional constraints on the report history.
///
/// An empty `FilterSet` matches every report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    line: Option<String>,
    station: Option<String>,
    date_range: Option<DateRange>,
    categories: Vec<String>,
}

impl FilterSet {
    /// Parse-tolerant constructor.
    ///
    /// Malformed or partial input is dropped rather than rejected:
    /// - `linea` / `estacion` only count when non-blank (first occurrence wins)
    /// - the date range needs both `fecha_inicio` and `fecha_fin` as `YYYY-MM-DD`
    ///   (ISO datetimes are reduced to their date)
    /// - `categorias` may repeat; when it yields nothing, `categorias[]` is used instead.
    ///   Blank entries are skipped and duplicates are kept.
    pub fn from_query_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut line = None;
        let mut station = None;
        let mut start = None;
        let mut end = None;
        let mut categories = Vec::new();
        let mut bracketed_categories = Vec::new();

        for (key, value) in pairs {
            match key {
                PARAM_LINE => {
                    line.get_or_insert(value);
                }
                PARAM_STATION => {
                    station.get_or_insert(value);
                }
                PARAM_START_DATE => {
                    start.get_or_insert(value);
                }
                PARAM_END_DATE => {
                    end.get_or_insert(value);
                }
                PARAM_CATEGORIES => push_non_blank(&mut categories, value),
                PARAM_CATEGORIES_BRACKETED => push_non_blank(&mut bracketed_categories, value),
                _ => {}
            }
        }

        if categories.is_empty() {
            categories = bracketed_categories;
        }

        let date_range = match (start.and_then(parse_date), end.and_then(parse_date)) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        };

        Self {
            line: line.and_then(non_blank),
            station: station.and_then(non_blank),
            date_range,
            categories,
        }
    }

    pub fn line(&self) -> Option<&str> {
        self.line.as_deref()
    }

    #[cfg(test)]
    pub fn station(&self) -> Option<&str> {
        self.station.as_deref()
    }

    #[cfg(test)]
    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    #[cfg(test)]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.line.is_none()
            && self.station.is_none()
            && self.date_range.is_none()
            && self.categories.is_empty()
    }

    /// Build the predicate. Clause order is always line, station, date range, categories.
    pub fn predicate(&self) -> Predicate {
        let mut clauses = Vec::new();

        if let Some(line) = &self.line {
            clauses.push(Clause::Equals {
                column: ReportColumn::Line,
                value: FilterValue::Text(line.clone()),
            });
        }
        if let Some(station) = &self.station {
            clauses.push(Clause::Equals {
                column: ReportColumn::Station,
                value: FilterValue::Text(station.clone()),
            });
        }
        if let Some(range) = self.date_range {
            clauses.push(Clause::Between {
                column: ReportColumn::Date,
                start: FilterValue::Date(range.start),
                end: FilterValue::Date(range.end),
            });
        }
        if !self.categories.is_empty() {
            clauses.push(Clause::In {
                column: ReportColumn::Category,
                values: self
                    .categories
                    .iter()
                    .cloned()
                    .map(FilterValue::Text)
                    .collect(),
            });
        }

        Predicate { clauses }
    }
}

fn push_non_blank(target: &mut Vec<String>, value: &str) {
    let trimmed = value.trim();
    if !trimmed.is_empty() {
        target.push(trimmed.to_string());
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// `YYYY-MM-DD`, or an ISO datetime (with or without offset) reduced to its date
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|datetime| datetime.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|datetime| datetime.date_naive())
        })
}

/// A value bound to a predicate placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Date(NaiveDate),
}

/// Destination for predicate SQL. Values can only be added through `push_value`,
/// which is also what emits their placeholder.
pub trait PredicateSink {
    fn push_sql(&mut self, sql: &str);
    fn push_value(&mut self, value: &FilterValue);
}

impl PredicateSink for QueryBuilder<'_, Postgres> {
    fn push_sql(&mut self, sql: &str) {
        self.push(sql);
    }

    fn push_value(&mut self, value: &FilterValue) {
        match value {
            FilterValue::Text(text) => {
                self.push_bind(text.clone());
            }
            FilterValue::Date(date) => {
                self.push_bind(*date);
            }
        }
    }
}

/// Predicate rendered to text with `$n` placeholders, for logging and inspection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedPredicate {
    pub sql: String,
    pub values: Vec<FilterValue>,
}

impl RenderedPredicate {
    #[cfg(test)]
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('$').count()
    }
}

impl PredicateSink for RenderedPredicate {
    fn push_sql(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    fn push_value(&mut self, value: &FilterValue) {
        self.values.push(value.clone());
        self.sql.push('$');
        self.sql.push_str(&self.values.len().to_string());
    }
}

/// One ANDed condition of a predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Equals {
        column: ReportColumn,
        value: FilterValue,
    },
    Between {
        column: ReportColumn,
        start: FilterValue,
        end: FilterValue,
    },
    In {
        column: ReportColumn,
        values: Vec<FilterValue>,
    },
}

impl Clause {
    pub fn write_to<S: PredicateSink + ?Sized>(&self, sink: &mut S) {
        match self {
            Clause::Equals { column, value } => {
                sink.push_sql(column.as_sql());
                sink.push_sql(" = ");
                sink.push_value(value);
            }
            Clause::Between { column, start, end } => {
                sink.push_sql(column.as_sql());
                sink.push_sql(" BETWEEN ");
                sink.push_value(start);
                sink.push_sql(" AND ");
                sink.push_value(end);
            }
            Clause::In { column, values } => {
                sink.push_sql(column.as_sql());
                sink.push_sql(" IN (");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        sink.push_sql(", ");
                    }
                    sink.push_value(value);
                }
                sink.push_sql(")");
            }
        }
    }

    /// Number of values this clause binds
    pub fn arity(&self) -> usize {
        match self {
            Clause::Equals { .. } => 1,
            Clause::Between { .. } => 2,
            Clause::In { values, .. } => values.len(),
        }
    }
}

/// Parameterized, storage-ready form of a [`FilterSet`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Total number of bound values
    pub fn arity(&self) -> usize {
        self.clauses.iter().map(Clause::arity).sum()
    }

    /// Write ` WHERE a AND b ...`, or nothing when there are no clauses
    pub fn write_where<S: PredicateSink + ?Sized>(&self, sink: &mut S) {
        for (i, clause) in self.clauses.iter().enumerate() {
            sink.push_sql(if i == 0 { " WHERE " } else { " AND " });
            clause.write_to(sink);
        }
    }

    pub fn render(&self) -> RenderedPredicate {
        let mut rendered = RenderedPredicate::default();
        self.write_where(&mut rendered);
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(pairs: &[(&str, &str)]) -> FilterSet {
        FilterSet::from_query_pairs(pairs.iter().copied())
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let set = filters(&[]);
        assert!(set.is_empty());

        let rendered = set.predicate().render();
        assert_eq!(rendered.sql, "");
        assert!(rendered.values.is_empty());
    }

    #[test]
    fn test_full_filter_set_renders_in_fixed_order() {
        let set = filters(&[
            ("categorias", "Limpieza"),
            ("fecha_fin", "2024-03-31"),
            ("estacion", "Pantitlán"),
            ("fecha_inicio", "2024-03-01"),
            ("linea", "Línea 1"),
            ("categorias", "Seguridad"),
        ]);

        let rendered = set.predicate().render();

        assert_eq!(
            rendered.sql,
            " WHERE linea = $1 AND estacion = $2 AND fecha BETWEEN $3 AND $4 AND categoria IN ($5, $6)"
        );
        assert_eq!(
            rendered.values,
            vec![
                FilterValue::Text("Línea 1".to_string()),
                FilterValue::Text("Pantitlán".to_string()),
                FilterValue::Date(date("2024-03-01")),
                FilterValue::Date(date("2024-03-31")),
                FilterValue::Text("Limpieza".to_string()),
                FilterValue::Text("Seguridad".to_string()),
            ]
        );
    }

    #[test]
    fn test_placeholders_always_match_values() {
        let queries: Vec<Vec<(&str, &str)>> = vec![
            vec![],
            vec![("linea", "L1")],
            vec![("estacion", "A"), ("categorias", "x")],
            vec![("fecha_inicio", "2024-01-01"), ("fecha_fin", "2024-02-01")],
            vec![("categorias[]", "a"), ("categorias[]", "b"), ("categorias[]", "c")],
            vec![
                ("linea", "L2"),
                ("estacion", "B"),
                ("fecha_inicio", "2024-01-01"),
                ("fecha_fin", "2024-12-31"),
                ("categorias", "a"),
                ("categorias", "a"),
            ],
        ];

        for query in queries {
            let predicate = filters(&query).predicate();
            let rendered = predicate.render();
            let expected: usize = predicate.clauses().iter().map(Clause::arity).sum();

            assert_eq!(rendered.placeholder_count(), rendered.values.len());
            assert_eq!(rendered.values.len(), expected);
            assert_eq!(predicate.arity(), expected);
        }
    }

    #[test]
    fn test_partial_date_range_is_ignored() {
        let only_start = filters(&[("fecha_inicio", "2024-01-01")]);
        assert_eq!(only_start.date_range(), None);
        assert!(only_start.predicate().is_empty());

        let only_end = filters(&[("fecha_fin", "2024-01-31")]);
        assert_eq!(only_end.date_range(), None);
    }

    #[test]
    fn test_datetime_bounds_keep_their_date() {
        let set = filters(&[
            ("fecha_inicio", "2024-01-05T00:00:00"),
            ("fecha_fin", "2024-01-06"),
        ]);
        assert_eq!(
            set.date_range(),
            Some(DateRange {
                start: date("2024-01-05"),
                end: date("2024-01-06"),
            })
        );

        let spaced = filters(&[
            ("fecha_inicio", "2024-01-05 08:30:00"),
            ("fecha_fin", "2024-01-06T23:59:59-06:00"),
        ]);
        assert_eq!(
            spaced.date_range(),
            Some(DateRange {
                start: date("2024-01-05"),
                end: date("2024-01-06"),
            })
        );
    }

    #[test]
    fn test_unparsable_date_drops_range() {
        let set = filters(&[("fecha_inicio", "yesterday"), ("fecha_fin", "2024-01-31")]);
        assert_eq!(set.date_range(), None);
    }

    #[test]
    fn test_blank_line_and_station_are_not_filters() {
        let set = filters(&[("linea", "   "), ("estacion", "")]);
        assert_eq!(set.line(), None);
        assert_eq!(set.station(), None);
        assert!(set.is_empty());
    }

    #[test]
    fn test_line_is_trimmed() {
        let set = filters(&[("linea", "  L3 ")]);
        assert_eq!(set.line(), Some("L3"));
    }

    #[test]
    fn test_bracketed_categories_are_a_fallback() {
        let set = filters(&[("categorias[]", "Retrasos"), ("categorias[]", "Limpieza")]);
        assert_eq!(set.categories(), ["Retrasos", "Limpieza"]);

        let both = filters(&[("categorias[]", "Retrasos"), ("categorias", "Limpieza")]);
        assert_eq!(both.categories(), ["Limpieza"]);
    }

    #[test]
    fn test_duplicate_categories_are_kept() {
        let set = filters(&[("categorias", "a"), ("categorias", "a")]);
        let rendered = set.predicate().render();
        assert_eq!(rendered.sql, " WHERE categoria IN ($1, $2)");
    }

    #[test]
    fn test_empty_category_list_is_no_filter() {
        let set = filters(&[("categorias", ""), ("categorias", " ")]);
        assert!(set.categories().is_empty());
        assert!(set.predicate().is_empty());
    }

    #[test]
    fn test_query_builder_receives_same_sql() {
        let set = filters(&[("linea", "L1"), ("categorias", "a"), ("categorias", "b")]);
        let predicate = set.predicate();

        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM datos_metro_cdmx");
        predicate.write_where(&mut builder);

        assert_eq!(
            builder.sql(),
            format!("SELECT COUNT(*) FROM datos_metro_cdmx{}", predicate.render().sql)
        );
    }
}
