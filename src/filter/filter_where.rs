use serde_json::Value;

use super::error::FilterError;
use super::filter::Filter;
use super::types::{FilterCondition, FilterOp, FilterWhereInfo};

pub struct FilterWhere {
    param_values: Vec<Value>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    /// Render conditions joined by AND. Parameters are numbered from `$1`.
    pub fn generate(conditions: &[FilterCondition]) -> Result<(String, Vec<Value>), FilterError> {
        let mut filter_where = Self::new(0);
        let mut sql_conditions = Vec::with_capacity(conditions.len());
        for condition in conditions {
            sql_conditions.push(filter_where.build_condition(condition)?);
        }
        let where_clause = if sql_conditions.is_empty() { "1=1".to_string() } else { sql_conditions.join(" AND ") };
        Ok((where_clause, filter_where.param_values))
    }

    fn build_condition(&mut self, condition: &FilterCondition) -> Result<String, FilterError> {
        match condition {
            FilterCondition::Field(info) => self.build_sql_condition(info),
            FilterCondition::Any(group) => {
                if group.is_empty() {
                    return Ok("1=0".to_string());
                }
                let mut parts = Vec::with_capacity(group.len());
                for sub in group {
                    parts.push(self.build_condition(sub)?);
                }
                Ok(format!("({})", parts.join(" OR ")))
            }
        }
    }

    fn build_sql_condition(&mut self, condition: &FilterWhereInfo) -> Result<String, FilterError> {
        Filter::validate_identifier(&condition.column)
            .map_err(|_| FilterError::InvalidColumn(condition.column.clone()))?;

        let quoted_column = format!("\"{}\"", condition.column);
        match condition.operator {
            FilterOp::Eq => Ok(format!("{} = {}", quoted_column, self.scalar_param(condition, &condition.data)?)),
            FilterOp::Gte => Ok(format!("{} >= {}", quoted_column, self.scalar_param(condition, &condition.data)?)),
            FilterOp::Lte => Ok(format!("{} <= {}", quoted_column, self.scalar_param(condition, &condition.data)?)),
            FilterOp::ILike => Ok(format!("{} ILIKE {}", quoted_column, self.scalar_param(condition, &condition.data)?)),
            FilterOp::In => {
                let Value::Array(values) = &condition.data else {
                    return Err(FilterError::InvalidOperatorData(format!(
                        "In on \"{}\" requires an array",
                        condition.column
                    )));
                };
                if values.is_empty() {
                    return Ok("1=0".to_string());
                }
                let mut params = Vec::with_capacity(values.len());
                for value in values {
                    params.push(self.scalar_param(condition, value)?);
                }
                Ok(format!("{} IN ({})", quoted_column, params.join(", ")))
            }
            FilterOp::IsNull => Ok(format!("{} IS NULL", quoted_column)),
        }
    }

    /// Bind a string, number or bool. Anything else would need a typed bind the repository does not do.
    fn scalar_param(&mut self, condition: &FilterWhereInfo, value: &Value) -> Result<String, FilterError> {
        match value {
            Value::Null | Value::Array(_) | Value::Object(_) => Err(FilterError::InvalidOperatorData(format!(
                "{:?} on \"{}\" requires scalar values",
                condition.operator, condition.column
            ))),
            v => Ok(self.param(v.clone())),
        }
    }

    fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}
