use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FilterCondition, FilterOrderInfo, SqlResult};

/// Column carrying the page position inside `to_page_sql`; stripped from the returned records
const PAGE_ROW_COLUMN: &str = "page_row";

pub struct Filter {
    table_name: String,
    conditions: Vec<FilterCondition>,
    order_data: Vec<FilterOrderInfo>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl Filter {
    pub fn new(table_name: impl Into<String>) -> Result<Self, FilterError> {
        let table_name = table_name.into();
        Self::validate_identifier(&table_name)
            .map_err(|_| FilterError::InvalidTableName(format!("Invalid table name format: {}", table_name)))?;
        Ok(Self {
            table_name,
            conditions: vec![],
            order_data: vec![],
            limit: None,
            offset: None,
        })
    }

    /// Add a condition; all conditions are ANDed together
    pub fn where_condition(&mut self, condition: FilterCondition) -> &mut Self {
        self.conditions.push(condition);
        self
    }

    pub fn order(&mut self, info: FilterOrderInfo) -> Result<&mut Self, FilterError> {
        Self::validate_identifier(&info.column)?;
        self.order_data.push(info);
        Ok(self)
    }

    pub fn limit(&mut self, limit: i64, offset: Option<i64>) -> Result<&mut Self, FilterError> {
        if limit < 0 { return Err(FilterError::InvalidLimit("Limit must be non-negative".to_string())); }
        if let Some(off) = offset { if off < 0 { return Err(FilterError::InvalidOffset("Offset must be non-negative".to_string())); } }
        self.limit = Some(limit);
        self.offset = offset;
        Ok(self)
    }

    pub fn to_sql(&self) -> Result<SqlResult, FilterError> {
        let where_result = self.to_where_sql()?;
        let query = self.select_statement("*", &where_result.query)?;
        Ok(SqlResult { query, params: where_result.params })
    }

    pub fn to_where_sql(&self) -> Result<SqlResult, FilterError> {
        let (where_clause, params) = FilterWhere::generate(&self.conditions)?;
        Ok(SqlResult { query: where_clause, params })
    }

    /// Single statement returning the exact match count (`total`, bigint) and the
    /// ordered, windowed rows as a JSON array (`data`, jsonb). Both halves share
    /// the same WHERE parameters.
    pub fn to_page_sql(&self) -> Result<SqlResult, FilterError> {
        let where_result = self.to_where_sql()?;
        let order_terms = FilterOrder::generate_terms(&self.order_data)?;
        let window = if order_terms.is_empty() { String::new() } else { format!("ORDER BY {}", order_terms) };

        let numbered = format!(
            "\"{table}\".*, row_number() OVER ({window}) AS {row}",
            table = self.table_name,
            window = window,
            row = PAGE_ROW_COLUMN,
        );
        let inner = self.select_statement(&numbered, &where_result.query)?;

        let query = format!(
            "SELECT (SELECT COUNT(*) FROM \"{table}\" WHERE {where_clause}) AS total, \
             COALESCE((SELECT jsonb_agg(to_jsonb(page) - '{row}' ORDER BY page.{row}) FROM ({inner}) AS page), '[]'::jsonb) AS data",
            table = self.table_name,
            where_clause = where_result.query,
            row = PAGE_ROW_COLUMN,
            inner = inner,
        );

        Ok(SqlResult { query, params: where_result.params })
    }

    /// Identifiers must match `[A-Za-z_][A-Za-z0-9_]*`
    pub fn validate_identifier(name: &str) -> Result<(), FilterError> {
        let mut chars = name.chars();
        let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
        if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(FilterError::InvalidColumn(format!("Invalid column name format: {}", name)));
        }
        Ok(())
    }

    fn select_statement(&self, select_clause: &str, where_clause: &str) -> Result<String, FilterError> {
        let order_clause = FilterOrder::generate(&self.order_data)?;
        let limit_clause = self.build_limit_clause();

        Ok([
            format!("SELECT {}", select_clause),
            format!("FROM \"{}\"", self.table_name),
            format!("WHERE {}", where_clause),
            order_clause,
            limit_clause,
        ].into_iter().filter(|s| !s.is_empty()).collect::<Vec<_>>().join(" "))
    }

    fn build_limit_clause(&self) -> String {
        match (self.limit, self.offset) {
            (Some(l), Some(o)) => format!("LIMIT {} OFFSET {}", l, o),
            (Some(l), None) => format!("LIMIT {}", l),
            (None, Some(o)) => format!("OFFSET {}", o),
            (None, None) => String::new(),
        }
    }
}
