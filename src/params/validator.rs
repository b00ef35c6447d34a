//! Declared-versus-referenced parameter comparison

use std::collections::HashSet;

use super::extractor::extract_params;

/// Outcome of comparing the parameters a SQL text references with the
/// parameters a caller declared.
///
/// Both lists have set semantics. They are kept in a stable order: `missing`
/// follows the SQL, `extra` follows the declared list with repeats dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamValidation {
    /// Referenced by the SQL but not declared
    pub missing: Vec<String>,
    /// Declared but not referenced by the SQL
    pub extra: Vec<String>,
}

impl ParamValidation {
    /// True when nothing is missing and nothing is extra
    pub fn is_match(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Compare the parameters referenced by `sql` against `provided`.
///
/// Membership is exact string equality. Repeated names in `provided` do not
/// affect the result.
pub fn validate_params<S: AsRef<str>>(sql: &str, provided: &[S]) -> ParamValidation {
    let sql_params = extract_params(sql);
    compare(&sql_params, provided)
}

/// [`validate_params`] for SQL that may be absent; `None` references nothing.
pub fn validate_params_opt<S: AsRef<str>>(sql: Option<&str>, provided: &[S]) -> ParamValidation {
    validate_params(sql.unwrap_or_default(), provided)
}

/// True when `provided` matches the parameters of `sql` exactly.
pub fn is_params_match<S: AsRef<str>>(sql: &str, provided: &[S]) -> bool {
    validate_params(sql, provided).is_match()
}

fn compare<S: AsRef<str>>(sql_params: &[String], provided: &[S]) -> ParamValidation {
    let provided_set: HashSet<&str> = provided.iter().map(|p| p.as_ref()).collect();
    let sql_set: HashSet<&str> = sql_params.iter().map(String::as_str).collect();

    let missing = sql_params
        .iter()
        .filter(|name| !provided_set.contains(name.as_str()))
        .cloned()
        .collect();

    let mut seen = HashSet::new();
    let extra = provided
        .iter()
        .map(|p| p.as_ref())
        .filter(|name| !sql_set.contains(name) && seen.insert(*name))
        .map(str::to_string)
        .collect();

    ParamValidation { missing, extra }
}
