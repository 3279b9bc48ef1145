//! Condition Matching Example
//!
//! Evaluates condition expressions against a simulated request:
//! - Built-in conditions (client, network, time, page and variables)
//! - A custom `[Name arguments]` condition
//! - An allow-listed user function
//! - Match traces

use chrono::NaiveDate;
use typoscript_demos::{init_tracing, report};
use typoscript_sdk::{ConditionEngineBuilder, FrontendUser, PredicateContext};

fn main() -> anyhow::Result<()> {
    init_tracing();

    println!("=== Condition Matching Example ===\n");

    let engine = ConditionEngineBuilder::new()
        .application_context("Development/Local")
        .dev_ip_mask("127.0.0.1,::1,192.168.*")
        .register_condition_fn("InSection", |args: &[String], context: &PredicateContext| {
            args.iter()
                .filter_map(|arg| arg.parse::<i64>().ok())
                .any(|id| context.rootline.contains(&id))
        })
        .register_user_function("isMaintenanceWindow", |args: &[String]| {
            args.first().map(|arg| arg == "night").unwrap_or(false)
        })
        .allow_user_function("isMaintenanceWindow")
        .build()?;

    let evaluation_time = NaiveDate::from_ymd_opt(2024, 3, 15)
        .and_then(|date| date.and_hms_opt(22, 30, 0))
        .ok_or_else(|| anyhow::anyhow!("invalid demo date"))?;

    let context = engine
        .context()
        .with_user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) Gecko/20100101 Firefox/121.0")
        .with_remote_addr("192.168.1.20")
        .with_accept_language("de-DE,de;q=0.9,en;q=0.8")
        .with_page(42, [1, 7, 42])
        .with_user(FrontendUser::new(5).with_groups([1, 3]))
        .with_request_params(serde_json::json!({ "L": "1", "tx_news": { "id": "17" } }))
        .with_evaluation_time(evaluation_time);

    let expressions = [
        "[browser = firefox] && [system = win10]",
        "[language = *de*]",
        "[IP = devIP]",
        "[applicationContext = Development*]",
        "[hour = >20] && [dayofweek = 1,2,3,4,5]",
        "[treeLevel = 2] && [PIDinRootline = 7]",
        "[loginUser = *] && [usergroup = 3]",
        "[globalVar = GP:L = 1] && [globalVar = GP:tx_news|id > 10]",
        "[globalString = IENV:HTTP_HOST = *.example.org]",
        "[InSection 7, 99]",
        "[userFunc = isMaintenanceWindow(night)]",
        "[browser = msie] || [unknownCondition = 1]",
    ];

    println!("Expressions:");
    for expression in expressions {
        report(expression, engine.matches(expression, &context));
    }

    println!("\nTrace of a mixed expression:");
    let trace = engine.matches_with_trace("[browser = msie] || [IP = 10.*] || [InSection 1]", &context);
    for evaluation in &trace.evaluations {
        println!("  {:<30} {:?}", evaluation.condition, evaluation.resolution);
    }
    println!("  => {}", trace.result);

    println!("\nTrace as JSON:");
    println!("{}", serde_json::to_string_pretty(&trace)?);

    Ok(())
}
