//! Value Modifiers Example
//!
//! Applies the built-in `:=` modifiers and a custom one, and shows how
//! dotted keys with escaped dots are split.

use typoscript_demos::init_tracing;
use typoscript_parser::{split_key_path, ModifierEngine};

fn main() -> anyhow::Result<()> {
    init_tracing();

    println!("=== Value Modifiers Example ===\n");

    let mut modifiers = ModifierEngine::new();
    modifiers.register("wrapBrackets", |argument: &str, current: &str| {
        format!("{}[{}]{}", argument, current, argument)
    })?;

    let calls = [
        ("prependString", "Hello ", "world"),
        ("appendString", "!", "Hello world"),
        ("removeString", "o", "Hello world"),
        ("replaceString", "world|there", "Hello world"),
        ("addToList", "4,5", "1,2,3"),
        ("removeFromList", "2", "1,2,3,2"),
        ("uniqueList", "", "a,b,a,c,b"),
        ("reverseList", "", "1,2,3"),
        ("sortList", "", "c,a,b"),
        ("sortList", "numeric", "10,9,100,-1"),
        ("sortList", "numeric,descending", "10,9,100,-1"),
        ("wrapBrackets", "*", "value"),
        ("notAModifier", "x", "unchanged"),
    ];

    println!("Modifiers:");
    for (name, argument, current) in calls {
        let result = modifiers.apply(name, argument, current);
        println!("  {:<16} {:<22} {:<14} => {}", name, format!("({})", argument), current, result);
    }

    println!("\nKey paths:");
    for key in ["page.10.value", "files.logo\\.png.title", "a\\\\.b", "lib..empty"] {
        println!("  {:<24} => {:?}", key, split_key_path(key));
    }

    Ok(())
}
