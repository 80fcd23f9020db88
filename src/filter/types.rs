use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
    ILike,
    In,
    /// Renders IS NULL; `data` is not used
    IsNull,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterWhereInfo {
    pub column: String,
    pub operator: FilterOp,
    pub data: Value,
}

/// A WHERE condition: a single column test or an OR group of conditions
#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    Field(FilterWhereInfo),
    Any(Vec<FilterCondition>),
}

impl FilterCondition {
    pub fn field(column: impl Into<String>, operator: FilterOp, data: Value) -> Self {
        FilterCondition::Field(FilterWhereInfo { column: column.into(), operator, data })
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Self::field(column, FilterOp::IsNull, Value::Null)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsOrder {
    First,
    Last,
}

impl NullsOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            NullsOrder::First => "NULLS FIRST",
            NullsOrder::Last => "NULLS LAST",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
    pub nulls: Option<NullsOrder>,
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}
