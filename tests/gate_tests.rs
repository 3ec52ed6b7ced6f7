//! Integration tests for the SQL gate.
//!
//! These exercise the public API end to end: the documented acceptance and
//! rejection cases, step ordering, custom policies and concurrent use.

use sql_gate::completion::{review_completion, CompletionError};
use sql_gate::security::sanitize;
use sql_gate::{GatePolicy, PolicyConfig, QueryGate, Rejection, RejectionKind, Verdict};
use std::sync::Arc;
use std::thread;

fn gate() -> QueryGate {
    QueryGate::default()
}

fn gate_with(config: PolicyConfig) -> QueryGate {
    QueryGate::new(Arc::new(GatePolicy::from_config(&config).unwrap()))
}

#[test]
fn test_documented_cases() {
    let g = gate();

    assert_eq!(g.validate("SELECT '; DROP TABLE x; ' AS note"), Verdict::Accepted);
    assert_eq!(
        g.validate("SELECT 1; SELECT 2;"),
        Verdict::Rejected(Rejection::MultipleStatements)
    );
    assert_eq!(g.validate("SELECT 1 -- DROP TABLE\n"), Verdict::Accepted);
    assert_eq!(g.validate("SELECT \"DROP\" AS col"), Verdict::Accepted);
    assert_eq!(
        g.validate("WITH t AS (SELECT 1) SELECT * FROM t"),
        Verdict::Accepted
    );
    assert_eq!(
        g.validate("WITH t AS (VALUES (1))"),
        Verdict::Rejected(Rejection::DanglingWith)
    );
}

#[test]
fn test_insert_is_refused() {
    // With the default denylist the keyword stage catches DML first.
    assert_eq!(
        gate().validate("insert into t values (1)").reason(),
        Some(RejectionKind::DisallowedKeyword)
    );

    // With DML off the denylist, the classifier names the statement.
    let g = gate_with(PolicyConfig {
        denylist: vec!["drop".to_string()],
        ..PolicyConfig::default()
    });
    assert_eq!(
        g.validate("insert into t values (1)"),
        Verdict::Rejected(Rejection::NonSelectStatement("insert".to_string()))
    );
    assert_eq!(
        g.validate("INSERT INTO t VALUES (1)"),
        Verdict::Rejected(Rejection::NonSelectStatement("insert".to_string()))
    );
}

#[test]
fn test_too_long_regardless_of_content() {
    let max = gate().policy().max_length();
    for filler in ["x", ";", "'", "é", "\0"] {
        let sql = filler.repeat(max + 1);
        assert_eq!(
            gate().validate(&sql),
            Verdict::Rejected(Rejection::TooLong { max_length: max })
        );
    }

    let at_limit = format!("SELECT {}", "1".repeat(max - "SELECT ".len()));
    assert!(gate().validate(&at_limit).is_accepted());
}

#[test]
fn test_stacking_hidden_by_comments() {
    let g = gate();
    assert!(g.validate("SELECT 1 /* ; */ ;").is_accepted());
    assert_eq!(
        g.validate("SELECT 1 /* x */ ; SELECT 2"),
        Verdict::Rejected(Rejection::MultipleStatements)
    );
    // Closing a literal early exposes the stacked statement.
    assert_eq!(
        g.validate("SELECT 'a'; DELETE FROM t; --'"),
        Verdict::Rejected(Rejection::MultipleStatements)
    );
}

#[test]
fn test_escaped_quotes_do_not_leak() {
    let g = gate();
    assert!(g.validate("SELECT 'it''s; drop' AS s").is_accepted());
    assert_eq!(
        g.validate("SELECT 'it''s' AS s, drop"),
        Verdict::Rejected(Rejection::DisallowedKeyword("drop".to_string()))
    );
}

#[test]
fn test_unterminated_spans_are_absorbed() {
    let g = gate();
    assert!(g.validate("SELECT 1 /* ; DROP TABLE t").is_accepted());
    assert!(g.validate("SELECT 'unterminated ; delete").is_accepted());
}

#[test]
fn test_realistic_model_queries() {
    let g = gate();
    let queries = [
        "SELECT collision_severity_label, COUNT(*) AS crashes\n\
         FROM collisions\n\
         WHERE collision_year = (SELECT MAX(collision_year) FROM collisions)\n\
         GROUP BY 1\n\
         ORDER BY crashes DESC;",
        "SELECT local_authority_ons_district_label, COUNT(*) AS crashes\n\
         FROM collisions\n\
         WHERE collision_year = (SELECT MAX(collision_year) FROM collisions)\n\
             AND collision_severity_label = 'Serious'\n\
         GROUP BY 1\n\
         ORDER BY crashes DESC\n\
         LIMIT 5;",
        "SELECT CAST(SUBSTR(time,1,2) AS INTEGER) AS hour, COUNT(*) FROM collisions GROUP BY 1",
    ];
    for sql in queries {
        assert!(g.validate(sql).is_accepted(), "should accept: {sql}");
    }
}

#[test]
fn test_sanitize_idempotent() {
    let samples = [
        "SELECT '; DROP TABLE x; ' AS note",
        "SELECT 1 -- DROP TABLE\n",
        "SELECT /* a */ \"b\"\"c\" 'd''e' -- f",
        "/* never closed",
        "'never closed",
    ];
    for sql in samples {
        let once = sanitize(sql);
        assert_eq!(sanitize(&once), once);
    }
}

#[test]
fn test_deterministic() {
    let g = gate();
    let samples = [
        "SELECT 1",
        "SELECT 1; SELECT 2",
        "WITH t AS (VALUES (1))",
        "DROP TABLE t",
        "",
    ];
    for sql in samples {
        assert_eq!(g.validate(sql), g.validate(sql));
    }
}

#[test]
fn test_concurrent_validation() {
    let g = gate();
    let samples: Vec<(&str, bool)> = vec![
        ("SELECT * FROM collisions", true),
        ("SELECT 1; SELECT 2", false),
        ("DELETE FROM collisions", false),
        ("WITH t AS (SELECT 1) SELECT * FROM t", true),
    ];

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let g = g.clone();
            let samples = samples.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    for (sql, expected) in &samples {
                        assert_eq!(g.validate(sql).is_accepted(), *expected);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_policy_from_json() {
    let config = PolicyConfig::from_json_str(
        r#"{"version": 1, "max_length": 40, "denylist": ["attach", "copy"]}"#,
    )
    .unwrap();
    let g = gate_with(config);

    assert_eq!(
        g.validate("SELECT 1 FROM t WHERE a = copy"),
        Verdict::Rejected(Rejection::DisallowedKeyword("copy".to_string()))
    );
    // `drop` is no longer denylisted and is not a major statement.
    assert!(g.validate("SELECT drop FROM t").is_accepted());
    assert_eq!(g.validate(&"x".repeat(41)).reason(), Some(RejectionKind::TooLong));
}

#[test]
fn test_completion_review() {
    let g = gate();

    let ok = review_completion(
        &g,
        "```json\n{\"sql\": \"SELECT COUNT(*) FROM collisions;\", \"reason\": \"count\"}\n```",
    )
    .unwrap();
    assert_eq!(ok.sql, "SELECT COUNT(*) FROM collisions;");

    let err = review_completion(
        &g,
        r#"{"sql": "SELECT 1; SELECT 2", "reason": "two"}"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CompletionError::Rejected(Rejection::MultipleStatements)
    ));
}
