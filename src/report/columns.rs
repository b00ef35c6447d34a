//! Parameter and column suggestions for pasted report SQL
//!
//! Column names come from the projection of the query, parsed with
//! `sqlparser`. Placeholders are rewritten to `NULL` at the token level
//! first, so dialects without named-placeholder support still parse.

use std::collections::HashSet;

use sqlparser::ast::{Expr, Query, SelectItem, SetExpr, Statement};
use sqlparser::dialect::{
    Dialect, GenericDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect,
};
use sqlparser::parser::Parser;
use sqlparser::tokenizer::{Token, Tokenizer};

use super::definition::{ParamType, ReportColumn, ReportDefinition, ReportParam};
use crate::error::SqlReportError;
use crate::params::extract_params;

/// SQL dialect used when parsing report projections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SqlDialect {
    #[default]
    Generic,
    MySql,
    PostgreSql,
    MsSql,
    SQLite,
}

impl std::str::FromStr for SqlDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "generic" | "ansi" => Ok(SqlDialect::Generic),
            "mysql" | "mariadb" => Ok(SqlDialect::MySql),
            "postgresql" | "postgres" => Ok(SqlDialect::PostgreSql),
            "mssql" | "sqlserver" | "tsql" => Ok(SqlDialect::MsSql),
            "sqlite" => Ok(SqlDialect::SQLite),
            _ => Err(format!("Unknown SQL dialect: {}", s)),
        }
    }
}

impl SqlDialect {
    fn dialect(&self) -> Box<dyn Dialect> {
        match self {
            SqlDialect::Generic => Box::new(GenericDialect {}),
            SqlDialect::MySql => Box::new(MySqlDialect {}),
            SqlDialect::PostgreSql => Box::new(PostgreSqlDialect {}),
            SqlDialect::MsSql => Box::new(MsSqlDialect {}),
            SqlDialect::SQLite => Box::new(SQLiteDialect {}),
        }
    }
}

/// Output columns found in a query's projection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSuggestion {
    pub columns: Vec<ReportColumn>,
    /// `*` or `t.*` items, which cannot be resolved without a schema
    pub wildcards: usize,
}

/// Suggest report columns from the projection of `sql`.
///
/// Aliased items use the alias, identifiers their last name part, and any
/// other expression its SQL text. Repeated field names keep the first.
pub fn suggest_columns(sql: &str, dialect: SqlDialect) -> Result<ColumnSuggestion, SqlReportError> {
    if sql.trim().is_empty() {
        return Err(SqlReportError::ColumnExtraction {
            message: "SQL is empty".to_string(),
        });
    }

    let dialect = dialect.dialect();
    let tokens = Tokenizer::new(dialect.as_ref(), sql)
        .tokenize()
        .map_err(|e| SqlReportError::ColumnExtraction {
            message: e.to_string(),
        })?;

    let statements = Parser::new(dialect.as_ref())
        .with_tokens(replace_placeholders(tokens))
        .parse_statements()?;

    let query = match statements.first() {
        Some(Statement::Query(query)) => query,
        Some(other) => {
            return Err(SqlReportError::ColumnExtraction {
                message: format!("expected a query, found: {}", statement_keyword(other)),
            })
        }
        None => {
            return Err(SqlReportError::ColumnExtraction {
                message: "no statement found".to_string(),
            })
        }
    };

    let projection = leftmost_projection(query).ok_or_else(|| SqlReportError::ColumnExtraction {
        message: "query has no SELECT projection".to_string(),
    })?;

    let mut suggestion = ColumnSuggestion::default();
    let mut seen = HashSet::new();
    for item in projection {
        let field_name = match item {
            SelectItem::ExprWithAlias { alias, .. } => alias.value.clone(),
            SelectItem::UnnamedExpr(expr) => expr_field_name(expr),
            SelectItem::Wildcard(_) | SelectItem::QualifiedWildcard(..) => {
                suggestion.wildcards += 1;
                continue;
            }
        };
        if seen.insert(field_name.clone()) {
            suggestion.columns.push(ReportColumn::new(field_name));
        }
    }

    tracing::debug!(
        columns = suggestion.columns.len(),
        wildcards = suggestion.wildcards,
        "suggested report columns"
    );
    Ok(suggestion)
}

/// One required `STRING` parameter per placeholder, in extraction order
pub fn suggest_params(sql: &str) -> Vec<ReportParam> {
    extract_params(sql)
        .into_iter()
        .map(|name| ReportParam::new(name, ParamType::String).required())
        .collect()
}

/// Build a report definition from raw SQL with suggested params and columns
pub fn scaffold_definition(
    name: &str,
    sql: &str,
    dialect: SqlDialect,
) -> Result<ReportDefinition, SqlReportError> {
    let columns = suggest_columns(sql, dialect)?.columns;
    Ok(ReportDefinition {
        name: name.to_string(),
        sql: sql.trim().to_string(),
        params: suggest_params(sql),
        columns,
        ..Default::default()
    })
}

/// Rewrite `:name` token pairs to a `NULL` keyword
fn replace_placeholders(tokens: Vec<Token>) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter().peekable();
    while let Some(token) = iter.next() {
        match token {
            // `arr[1:2]` is a slice, not a placeholder
            Token::Colon if matches!(iter.peek(), Some(Token::Word(_))) => {
                iter.next();
                output.push(Token::make_keyword("NULL"));
            }
            Token::Placeholder(ref p) if p.starts_with(':') => {
                output.push(Token::make_keyword("NULL"));
            }
            other => output.push(other),
        }
    }
    output
}

fn leftmost_projection(query: &Query) -> Option<&Vec<SelectItem>> {
    let mut body = query.body.as_ref();
    loop {
        match body {
            SetExpr::Select(select) => return Some(&select.projection),
            SetExpr::Query(inner) => body = inner.body.as_ref(),
            SetExpr::SetOperation { left, .. } => body = left.as_ref(),
            _ => return None,
        }
    }
}

fn expr_field_name(expr: &Expr) -> String {
    match expr {
        Expr::Identifier(ident) => ident.value.clone(),
        Expr::CompoundIdentifier(parts) => parts
            .last()
            .map(|i| i.value.clone())
            .unwrap_or_default(),
        Expr::Nested(inner) => expr_field_name(inner),
        other => other.to_string(),
    }
}

fn statement_keyword(statement: &Statement) -> String {
    statement
        .to_string()
        .split_whitespace()
        .next()
        .unwrap_or("statement")
        .to_uppercase()
}
