//! Template Parsing Example
//!
//! Parses a TypoScript setup whose condition blocks are decided by the
//! condition engine, then prints the resulting tree and any issues.

use typoscript_demos::init_tracing;
use typoscript_sdk::ConditionEngineBuilder;

const SETUP: &str = r#"
page = PAGE
page {
  typeNum = 0
  10 = TEXT
  10.value = Welcome
  10.wrap (
    <h1>|</h1>
  )
}

lib.languages = en
lib.languages := addToList(de,fr)
lib.languages := sortList()

[globalVar = GP:L = 1]
page.10.value = Willkommen
[else]
page.10.value := appendString( visitor)
[end]

[applicationContext = Development*]
page.20 = TEXT
page.20.value = Debug output enabled
[global]

lib.footer < page.10
lib.footer.value := upper()
broken := missingModifier(1)
"#;

fn main() -> anyhow::Result<()> {
    init_tracing();

    println!("=== Template Parsing Example ===\n");

    let engine = ConditionEngineBuilder::new()
        .application_context("Development")
        .register_modifier("upper", |_: &str, current: &str| current.to_uppercase())
        .build()?;

    for language in ["0", "1"] {
        let context = engine
            .context()
            .with_request_params(serde_json::json!({ "L": language }));
        let parsed = engine.parse_typoscript(SETUP, &context);

        println!("L = {}", language);
        println!("  matched sections: {:?}", parsed.matched_sections);
        println!("  page.10.value:    {:?}", parsed.tree.value("page.10.value"));
        println!("  lib.footer.value: {:?}", parsed.tree.value("lib.footer.value"));
        for issue in &parsed.issues {
            println!("  issue: {}", issue);
        }
        println!();
    }

    let context = engine.context();
    let parsed = engine.parse_typoscript(SETUP, &context);
    println!("Setup as JSON:");
    println!("{}", serde_json::to_string_pretty(&parsed.tree.to_setup_json())?);

    Ok(())
}
