//! End-to-end tests for the condition engine

use chrono::NaiveDate;
use std::io::Write;
use typoscript_sdk::*;

fn weekday_context(engine: &ConditionEngine) -> PredicateContext {
    let friday_afternoon = NaiveDate::from_ymd_opt(2024, 3, 15)
        .and_then(|date| date.and_hms_opt(15, 0, 0))
        .unwrap();
    engine
        .context()
        .with_remote_addr("127.0.0.1")
        .with_page(12, [1, 5, 12])
        .with_evaluation_time(friday_afternoon)
}

// =============================================================================
// Matching
// =============================================================================

#[test]
fn test_engine_uses_configured_defaults() {
    let engine = ConditionEngineBuilder::new()
        .application_context("Development/Local")
        .dev_ip_mask("127.0.0.1")
        .build()
        .unwrap();
    let context = weekday_context(&engine);

    assert!(engine.matches("[applicationContext = Development*]", &context));
    assert!(engine.matches("[IP = devIP] && [PIDinRootline = 5]", &context));
    assert!(!engine.matches("[applicationContext = Production]", &context));
}

#[test]
fn test_user_functions_need_allow_list() {
    let engine = ConditionEngineBuilder::new()
        .register_user_function("isWorkday", |_args: &[String]| true)
        .register_user_function("dangerous", |_args: &[String]| true)
        .allow_user_function("isWorkday")
        .build()
        .unwrap();
    let context = engine.context();

    assert!(engine.matches("[userFunc = isWorkday()]", &context));
    assert!(!engine.matches("[userFunc = dangerous()]", &context));
    assert!(!engine.matches("[userFunc = neverRegistered()]", &context));
}

#[test]
fn test_custom_condition_functions() {
    let engine = ConditionEngineBuilder::new()
        .register_condition_fn("InSection", |args: &[String], context: &PredicateContext| {
            args.iter()
                .filter_map(|arg| arg.parse::<i64>().ok())
                .any(|id| context.rootline.contains(&id))
        })
        .build()
        .unwrap();
    let context = weekday_context(&engine);

    assert!(engine.matches("[InSection 7, 5]", &context));
    assert!(!engine.matches("[InSection 7]", &context));
    assert!(engine.matches("[InSection 7] || [hour = >12]", &context));
}

#[test]
fn test_simulation_from_config() {
    let engine = ConditionEngineBuilder::new()
        .with_config(MatcherConfig::new().with_simulate_match_condition("[browser = msie]"))
        .build()
        .unwrap();
    let context = engine.context();

    assert!(engine.matches("[browser = msie]", &context));
    assert!(!engine.matches("[applicationContext = Production]", &context));

    let trace = engine.matches_with_trace("[browser = msie]", &context);
    assert!(trace.simulated);
    assert!(trace.evaluations.is_empty());
}

// =============================================================================
// Build errors
// =============================================================================

#[test]
fn test_allow_listed_function_must_exist() {
    let result = ConditionEngineBuilder::new().allow_user_function("missing").build();
    assert!(matches!(result, Err(SdkError::ConfigError(_))));
}

#[test]
fn test_registration_errors_are_reported() {
    let result = ConditionEngineBuilder::new()
        .register_modifier("appendString", |_: &str, current: &str| current.to_string())
        .build();
    assert!(matches!(result, Err(SdkError::ParseError(_))));

    let result = ConditionEngineBuilder::new()
        .register_user_function("twice", |_: &[String]| true)
        .register_user_function("twice", |_: &[String]| false)
        .build();
    assert!(matches!(result, Err(SdkError::RuntimeError(_))));
}

#[test]
fn test_missing_config_file() {
    let result = ConditionEngineBuilder::new()
        .with_config_file("/nonexistent/typoscript-matcher.yaml")
        .build();
    assert!(matches!(result, Err(SdkError::IoError(_))));
}

#[test]
fn test_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "application_context: Production/Staging").unwrap();
    writeln!(file, "allowed_user_functions: [isStaging]").unwrap();

    let engine = ConditionEngineBuilder::new()
        .with_config_file(file.path())
        .register_user_function("isStaging", |_: &[String]| true)
        .build()
        .unwrap();
    let context = engine.context();

    assert_eq!(engine.config().application_context, "Production/Staging");
    assert!(engine.matches("[applicationContext = Production/*] && [userFunc = isStaging()]", &context));
}

// =============================================================================
// Modifiers and TypoScript
// =============================================================================

#[test]
fn test_modifiers_through_engine() {
    let engine = ConditionEngineBuilder::new()
        .register_modifier("upper", |_: &str, current: &str| current.to_uppercase())
        .build()
        .unwrap();

    assert_eq!(engine.apply_modifier("addToList", "789", "123,456"), "123,456,789");
    assert_eq!(engine.apply_modifier("upper", "", "abc"), "ABC");
    assert_eq!(engine.apply_modifier("unknown", "x", "abc"), "abc");
}

#[test]
fn test_parse_typoscript_with_conditions() {
    let engine = ConditionEngineBuilder::new()
        .register_modifier("upper", |_: &str, current: &str| current.to_uppercase())
        .build()
        .unwrap();
    let context = weekday_context(&engine).with_request_params(serde_json::json!({ "L": "1" }));

    let parsed = engine.parse_typoscript(
        r#"
page = PAGE
page.10 = TEXT
page.10.value = hello
page.10.value := upper()

[globalVar = GP:L = 1] && [dayofweek = 1,2,3,4,5]
page.10.value = hallo
[else]
page.10.value = fallback
[end]

[IP = 10.*]
page.20 = TEXT
[global]
"#,
        &context,
    );

    assert!(!parsed.has_issues(), "{:?}", parsed.issues);
    assert_eq!(parsed.tree.value("page.10.value"), Some("hallo"));
    assert_eq!(parsed.tree.value("page.20"), None);
    assert_eq!(parsed.sections.len(), 2);
    assert_eq!(parsed.matched_sections, vec!["[globalVar = GP:L = 1] && [dayofweek = 1,2,3,4,5]"]);
}
