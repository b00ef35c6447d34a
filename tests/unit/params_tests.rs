//! Unit tests for placeholder extraction and validation
//!
//! Scenarios and laws that must hold for any SQL text, exercised through the
//! public API.

use pretty_assertions::assert_eq;
use sqlreport::params::{
    extract_params, extract_params_opt, is_params_match, sanitize, validate_params,
    validate_params_opt,
};

/// A mix of placeholders, comments, literals and repeats
const SAMPLES: &[&str] = &[
    "",
    "   ",
    "SELECT * FROM products",
    "SELECT * FROM users WHERE age > :minAge AND status = :status",
    "SELECT * FROM users WHERE a = :third AND b = :first AND c = :second",
    "SELECT * FROM users WHERE age > :minAge -- :commentedParam\nAND status = :status",
    "SELECT * FROM users WHERE name = ':notAParam' AND age > :minAge",
    "SELECT * FROM orders WHERE price > :minPrice AND discount < :maxDiscount AND total > :minPrice",
    "SELECT :a'x' /* :b\n:c */ \"q :d\" :e -- :f",
    "WHERE x = :x AND y = ':y' AND z = \":z\" AND x2 = :x",
];

// ============================================================================
// Extraction scenarios
// ============================================================================

#[test]
fn test_extract_basic_sql() {
    let sql = "SELECT * FROM users WHERE age > :minAge AND status = :status";
    assert_eq!(extract_params(sql), vec!["minAge", "status"]);
}

#[test]
fn test_extract_order_is_appearance_not_alphabetical() {
    let sql = "SELECT * FROM users WHERE a = :third AND b = :first AND c = :second";
    assert_eq!(extract_params(sql), vec!["third", "first", "second"]);
}

#[test]
fn test_extract_skips_line_comment() {
    let sql = "SELECT * FROM users WHERE age > :minAge -- :commentedParam\nAND status = :status";
    let params = extract_params(sql);
    assert_eq!(params, vec!["minAge", "status"]);
    assert!(!params.contains(&"commentedParam".to_string()));
}

#[test]
fn test_extract_skips_string_literal() {
    let sql = "SELECT * FROM users WHERE name = ':notAParam' AND age > :minAge";
    assert_eq!(extract_params(sql), vec!["minAge"]);
}

#[test]
fn test_extract_deduplicates() {
    let sql = "SELECT * FROM orders WHERE price > :minPrice AND discount < :maxDiscount AND total > :minPrice";
    assert_eq!(extract_params(sql), vec!["minPrice", "maxDiscount"]);
}

#[test]
fn test_extract_complex_sql() {
    let sql = r#"
        SELECT u.id, u.name, o.total
        FROM users u
        INNER JOIN orders o ON u.id = o.user_id
        WHERE u.age > :minAge
          AND u.department = :dept
          AND o.created_at BETWEEN :startDate AND :endDate
          -- AND u.status = :inactiveStatus (commented out)
          AND u.active = :isActive
        ORDER BY o.created_at DESC
    "#;
    assert_eq!(
        extract_params(sql),
        vec!["minAge", "dept", "startDate", "endDate", "isActive"]
    );
}

#[test]
fn test_extract_multiline_block_comment() {
    let sql = "SELECT *\n/* disabled:\n  AND a = :a\n*/\nFROM t WHERE b = :b";
    assert_eq!(extract_params(sql), vec!["b"]);
}

#[test]
fn test_extract_double_quoted_literal() {
    let sql = r#"SELECT "col:alias" FROM t WHERE a = :a"#;
    assert_eq!(extract_params(sql), vec!["a"]);
}

#[test]
fn test_literal_glued_to_placeholder() {
    assert_eq!(extract_params("SELECT :a'x'"), vec!["a"]);
    assert_eq!(extract_params("SELECT 'x':a"), vec!["a"]);
}

#[test]
fn test_extract_absent_or_blank() {
    assert!(extract_params_opt(None).is_empty());
    assert!(extract_params("").is_empty());
    assert!(extract_params("   ").is_empty());
}

// ============================================================================
// Validation scenarios
// ============================================================================

#[test]
fn test_validate_both_missing_and_extra() {
    let sql = "SELECT * FROM users WHERE age > :minAge AND dept = :department";
    let result = validate_params(sql, &["minAge", "status"]);
    assert_eq!(result.missing, vec!["department"]);
    assert_eq!(result.extra, vec!["status"]);
    assert!(!result.is_match());
}

#[test]
fn test_validate_absent_sql() {
    let result = validate_params_opt(None, &["a", "b"]);
    assert!(result.missing.is_empty());
    assert_eq!(result.extra, vec!["a", "b"]);
}

// ============================================================================
// Laws
// ============================================================================

#[test]
fn test_extraction_is_deterministic() {
    for sql in SAMPLES {
        assert_eq!(extract_params(sql), extract_params(sql), "{:?}", sql);
    }
}

#[test]
fn test_extraction_has_no_duplicates() {
    for sql in SAMPLES {
        let params = extract_params(sql);
        let mut sorted = params.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), params.len(), "{:?}", sql);
    }
}

#[test]
fn test_order_follows_first_occurrence_in_sanitized_text() {
    for sql in SAMPLES {
        let cleaned = sanitize(sql);
        let positions: Vec<usize> = extract_params(sql)
            .iter()
            .map(|name| {
                let needle = format!(":{}", name);
                cleaned
                    .find(&needle)
                    .unwrap_or_else(|| panic!("{} not in {:?}", needle, cleaned))
            })
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted, "{:?}", sql);
    }
}

#[test]
fn test_hidden_names_never_appear() {
    let sql = SAMPLES[8];
    assert_eq!(extract_params(sql), vec!["a", "e"]);
}

#[test]
fn test_self_consistency() {
    for sql in SAMPLES {
        let extracted = extract_params(sql);
        let result = validate_params(sql, &extracted);
        assert!(result.missing.is_empty(), "{:?}", sql);
        assert!(result.extra.is_empty(), "{:?}", sql);
    }
}

#[test]
fn test_is_params_match_agrees_with_validate() {
    let provided_sets: &[&[&str]] = &[&[], &["minAge"], &["minAge", "status"], &["x"]];
    for sql in SAMPLES {
        for provided in provided_sets.iter().copied() {
            let result = validate_params(sql, provided);
            assert_eq!(
                is_params_match(sql, provided),
                result.missing.is_empty() && result.extra.is_empty()
            );
        }
    }
}
