use serde_json::json;

use crate::database::models::TokenColumn;
use crate::filter::{Filter, FilterCondition, FilterOp};

/// Liveness values a row may carry and still be listed; null is listable too
pub const LISTABLE_STATUSES: [&str; 2] = ["active", "pending"];

/// One optional restriction on the listing. Predicates are independent of
/// each other and may be applied in any order.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Standing rule: website status is active, pending or unset
    Listable,
    MinScore(f64),
    MaxScore(f64),
    Network(String),
    Tier(String),
    /// Case-insensitive substring of symbol or name
    Search(String),
    MinLiquidity(f64),
    MaxLiquidity(f64),
    TokenType(String),
}

/// The fixed query-builder surface predicates are expressed against.
/// Implemented by the SQL [`Filter`] and by any other store that evaluates rows itself.
pub trait PredicateSink {
    fn equals(&mut self, column: TokenColumn, value: &str);
    fn at_least(&mut self, column: TokenColumn, bound: f64);
    fn at_most(&mut self, column: TokenColumn, bound: f64);
    fn one_of_or_null(&mut self, column: TokenColumn, values: &[&str]);
    fn contains_any(&mut self, columns: &[TokenColumn], needle: &str);
}

impl Predicate {
    pub fn apply<S: PredicateSink + ?Sized>(&self, sink: &mut S) {
        match self {
            Predicate::Listable => sink.one_of_or_null(TokenColumn::WebsiteStatus, &LISTABLE_STATUSES),
            Predicate::MinScore(v) => sink.at_least(TokenColumn::WebsiteStage1Score, *v),
            Predicate::MaxScore(v) => sink.at_most(TokenColumn::WebsiteStage1Score, *v),
            Predicate::Network(v) => sink.equals(TokenColumn::Network, v),
            Predicate::Tier(v) => sink.equals(TokenColumn::WebsiteStage1Tier, v),
            Predicate::Search(v) => sink.contains_any(&[TokenColumn::Symbol, TokenColumn::Name], v),
            Predicate::MinLiquidity(v) => sink.at_least(TokenColumn::CurrentLiquidityUsd, *v),
            Predicate::MaxLiquidity(v) => sink.at_most(TokenColumn::CurrentLiquidityUsd, *v),
            Predicate::TokenType(v) => sink.equals(TokenColumn::TokenType, v),
        }
    }
}

impl PredicateSink for Filter {
    fn equals(&mut self, column: TokenColumn, value: &str) {
        self.where_condition(FilterCondition::field(column.as_str(), FilterOp::Eq, json!(value)));
    }

    fn at_least(&mut self, column: TokenColumn, bound: f64) {
        self.where_condition(FilterCondition::field(column.as_str(), FilterOp::Gte, json!(bound)));
    }

    fn at_most(&mut self, column: TokenColumn, bound: f64) {
        self.where_condition(FilterCondition::field(column.as_str(), FilterOp::Lte, json!(bound)));
    }

    fn one_of_or_null(&mut self, column: TokenColumn, values: &[&str]) {
        self.where_condition(FilterCondition::Any(vec![
            FilterCondition::field(column.as_str(), FilterOp::In, json!(values)),
            FilterCondition::is_null(column.as_str()),
        ]));
    }

    fn contains_any(&mut self, columns: &[TokenColumn], needle: &str) {
        let pattern = format!("%{}%", escape_like(needle));
        let group = columns
            .iter()
            .map(|c| FilterCondition::field(c.as_str(), FilterOp::ILike, json!(pattern)))
            .collect();
        self.where_condition(FilterCondition::Any(group));
    }
}

/// Escape LIKE metacharacters so user text matches literally (`\` is Postgres' default escape)
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
