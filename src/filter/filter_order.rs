use super::error::FilterError;
use super::filter::Filter;
use super::types::FilterOrderInfo;

pub struct FilterOrder;

impl FilterOrder {
    /// Column list without the `ORDER BY` keyword, for reuse inside window functions
    pub fn generate_terms(infos: &[FilterOrderInfo]) -> Result<String, FilterError> {
        let mut parts = Vec::with_capacity(infos.len());
        for info in infos {
            Filter::validate_identifier(&info.column)
                .map_err(|_| FilterError::InvalidColumn(info.column.clone()))?;
            let mut term = format!("\"{}\" {}", info.column, info.sort.to_sql());
            if let Some(nulls) = info.nulls {
                term.push(' ');
                term.push_str(nulls.to_sql());
            }
            parts.push(term);
        }
        Ok(parts.join(", "))
    }

    pub fn generate(infos: &[FilterOrderInfo]) -> Result<String, FilterError> {
        if infos.is_empty() { return Ok(String::new()); }
        Ok(format!("ORDER BY {}", Self::generate_terms(infos)?))
    }
}
