//! TypoScript text parser
//!
//! Line-oriented parser producing a [`ConfigTree`]. Supported syntax:
//!
//! ```text
//! # comment, // comment, /* block comment */
//! page = PAGE
//! page.10 = TEXT
//! page.10 {
//!   value = Hello
//!   value := appendString( world)
//!   wrap (
//!     <p>|</p>
//!   )
//! }
//! lib.copy < page.10
//! lib.copy >
//! [globalVar = GP:L = 1]
//! page.10.value = Hallo
//! [else]
//! page.10.value = Hi
//! [end]
//! ```
//!
//! Problems are collected as [`ParseIssue`]s and never abort the parse.

use crate::modifier::{parse_modifier_call, ModifierEngine};
use crate::tree::ConfigTree;
use std::fmt;

/// Decides whether the lines following a `[condition]` line apply
pub trait ConditionEvaluator {
    fn evaluate(&self, expression: &str) -> bool;
}

impl<F> ConditionEvaluator for F
where
    F: Fn(&str) -> bool,
{
    fn evaluate(&self, expression: &str) -> bool {
        self(expression)
    }
}

/// Kind of a parse problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// `}` without a matching open block
    UnbalancedBrace,
    /// End of input inside one or more `{` blocks
    MissingClosingBrace,
    /// Condition line inside a `{` block
    ConditionInsideBraces,
    /// `[else]` without a preceding condition
    ElseWithoutCondition,
    /// Line without a recognizable operator or object path
    InvalidLine,
    /// `:=` line that is not `name(argument)`
    InvalidModifierCall,
    /// `:=` with a modifier nobody knows
    UnknownModifier,
    /// End of input inside a `(` multi-line value
    UnterminatedMultiline,
}

/// A problem found while parsing, with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    pub line: usize,
    pub kind: IssueKind,
    pub message: String,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.message)
    }
}

/// Result of parsing a TypoScript text
#[derive(Debug, Clone, Default)]
pub struct ParsedTypoScript {
    pub tree: ConfigTree,
    pub issues: Vec<ParseIssue>,
    /// Every condition line met, in order
    pub sections: Vec<String>,
    /// Condition lines that matched
    pub matched_sections: Vec<String>,
}

impl ParsedTypoScript {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

struct Multiline {
    path: String,
    lines: Vec<String>,
    start_line: usize,
}

#[derive(Default)]
struct ParseState {
    blocks: Vec<String>,
    in_comment: bool,
    multiline: Option<Multiline>,
    /// Lines are applied while this is true
    active: bool,
    /// Result of the current condition, `None` outside condition blocks
    condition: Option<bool>,
}

/// TypoScript text parser
#[derive(Debug, Clone, Default)]
pub struct TypoScriptParser {
    modifiers: ModifierEngine,
}

impl TypoScriptParser {
    /// Create a parser knowing only the built-in modifiers
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with a prepared modifier engine
    pub fn with_modifiers(modifiers: ModifierEngine) -> Self {
        Self { modifiers }
    }

    pub fn modifiers(&self) -> &ModifierEngine {
        &self.modifiers
    }

    /// Parse a text where no condition ever matches
    pub fn parse_unconditional(&self, text: &str) -> ParsedTypoScript {
        self.parse(text, &|_: &str| false)
    }

    /// Parse a text, deciding condition blocks with `conditions`
    pub fn parse(&self, text: &str, conditions: &dyn ConditionEvaluator) -> ParsedTypoScript {
        let mut result = ParsedTypoScript::default();
        let mut state = ParseState {
            active: true,
            ..ParseState::default()
        };

        for (index, raw_line) in text.lines().enumerate() {
            let line_no = index + 1;
            self.parse_line(raw_line, line_no, &mut state, &mut result, conditions);
        }

        let last_line = text.lines().count();
        if let Some(multiline) = state.multiline.take() {
            Self::issue(
                &mut result,
                multiline.start_line,
                IssueKind::UnterminatedMultiline,
                format!("Multi-line value for '{}' is never closed", multiline.path),
            );
        }
        if !state.blocks.is_empty() {
            Self::issue(
                &mut result,
                last_line,
                IssueKind::MissingClosingBrace,
                format!("The script is short of {} end brace(s)", state.blocks.len()),
            );
        }

        result
    }

    fn parse_line(
        &self,
        raw_line: &str,
        line_no: usize,
        state: &mut ParseState,
        result: &mut ParsedTypoScript,
        conditions: &dyn ConditionEvaluator,
    ) {
        let line = raw_line.trim();

        if state.active {
            if let Some(multiline) = state.multiline.as_mut() {
                if line.starts_with(')') {
                    let value = multiline.lines.join("\n");
                    let path = multiline.path.clone();
                    state.multiline = None;
                    self.set_value(&path, value, line_no, result);
                } else {
                    multiline.lines.push(raw_line.to_string());
                }
                return;
            }

            if state.in_comment {
                if line.starts_with("*/") {
                    state.in_comment = false;
                }
                return;
            }
        }

        if line.starts_with('[') {
            self.parse_condition_line(line, line_no, state, result, conditions);
            return;
        }

        if !state.active || line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            return;
        }

        if line.starts_with("/*") {
            state.in_comment = !line[2..].contains("*/");
            return;
        }

        if line.starts_with('}') {
            if state.blocks.pop().is_none() {
                Self::issue(
                    result,
                    line_no,
                    IssueKind::UnbalancedBrace,
                    "An end brace is in excess".to_string(),
                );
            }
            return;
        }

        self.parse_assignment(line, line_no, state, result);
    }

    fn parse_condition_line(
        &self,
        line: &str,
        line_no: usize,
        state: &mut ParseState,
        result: &mut ParsedTypoScript,
        conditions: &dyn ConditionEvaluator,
    ) {
        if !state.blocks.is_empty() {
            Self::issue(
                result,
                line_no,
                IssueKind::ConditionInsideBraces,
                format!(
                    "Condition inside braces, the script was short of {} end brace(s)",
                    state.blocks.len()
                ),
            );
            state.blocks.clear();
        }
        state.multiline = None;
        state.in_comment = false;

        let keyword = line.to_ascii_uppercase();
        match keyword.as_str() {
            "[GLOBAL]" | "[END]" => {
                state.active = true;
                state.condition = None;
            }
            "[ELSE]" => match state.condition {
                Some(matched) => {
                    state.active = !matched;
                    state.condition = Some(!matched);
                }
                None => {
                    Self::issue(
                        result,
                        line_no,
                        IssueKind::ElseWithoutCondition,
                        "[ELSE] without a preceding condition".to_string(),
                    );
                }
            },
            _ => {
                let matched = conditions.evaluate(line);
                log::debug!("Condition {} evaluated to {}", line, matched);
                result.sections.push(line.to_string());
                if matched {
                    result.matched_sections.push(line.to_string());
                }
                state.active = matched;
                state.condition = Some(matched);
            }
        }
    }

    fn parse_assignment(
        &self,
        line: &str,
        line_no: usize,
        state: &mut ParseState,
        result: &mut ParsedTypoScript,
    ) {
        let name_len = line
            .find(|c: char| matches!(c, ' ' | '\t' | '{' | '=' | '<' | '>' | ':' | '('))
            .unwrap_or(line.len());
        let name = &line[..name_len];
        let rest = line[name_len..].trim_start();

        if name.is_empty() {
            Self::issue(
                result,
                line_no,
                IssueKind::InvalidLine,
                format!("Object name missing in '{}'", line),
            );
            return;
        }

        let path = Self::full_path(&state.blocks, name);

        match rest.chars().next() {
            Some('=') => {
                self.set_value(&path, rest[1..].trim().to_string(), line_no, result);
            }
            Some(':') if rest.starts_with(":=") => {
                self.apply_modifier_line(&path, &rest[2..], line_no, result);
            }
            Some('{') => state.blocks.push(path),
            Some('(') => {
                state.multiline = Some(Multiline {
                    path,
                    lines: Vec::new(),
                    start_line: line_no,
                });
            }
            Some('<') => {
                let source = rest[1..].trim();
                let source = match source.strip_prefix('.') {
                    Some(relative) => match state.blocks.last() {
                        Some(block) => format!("{}.{}", block, relative),
                        None => relative.to_string(),
                    },
                    None => source.to_string(),
                };
                if let Err(e) = result.tree.copy(&source, &path) {
                    Self::issue(result, line_no, IssueKind::InvalidLine, e.to_string());
                }
            }
            Some('>') => {
                if let Err(e) = result.tree.unset(&path) {
                    Self::issue(result, line_no, IssueKind::InvalidLine, e.to_string());
                }
            }
            _ => {
                Self::issue(
                    result,
                    line_no,
                    IssueKind::InvalidLine,
                    format!("Object name '{}' is not followed by an operator", name),
                );
            }
        }
    }

    fn apply_modifier_line(
        &self,
        path: &str,
        call: &str,
        line_no: usize,
        result: &mut ParsedTypoScript,
    ) {
        let Some((name, argument)) = parse_modifier_call(call) else {
            Self::issue(
                result,
                line_no,
                IssueKind::InvalidModifierCall,
                "No function name given or invalid syntax".to_string(),
            );
            return;
        };

        if !self.modifiers.is_known(&name) {
            Self::issue(
                result,
                line_no,
                IssueKind::UnknownModifier,
                format!("Missing function definition for {}", name),
            );
            return;
        }

        if let Err(e) = result.tree.modify(path, &self.modifiers, &name, &argument) {
            Self::issue(result, line_no, IssueKind::InvalidLine, e.to_string());
        }
    }

    fn set_value(&self, path: &str, value: String, line_no: usize, result: &mut ParsedTypoScript) {
        if let Err(e) = result.tree.set_value(path, value) {
            Self::issue(result, line_no, IssueKind::InvalidLine, e.to_string());
        }
    }

    fn full_path(blocks: &[String], name: &str) -> String {
        match blocks.last() {
            Some(block) => format!("{}.{}", block, name),
            None => name.to_string(),
        }
    }

    fn issue(result: &mut ParsedTypoScript, line: usize, kind: IssueKind, message: String) {
        let issue = ParseIssue {
            line,
            kind,
            message,
        };
        log::warn!("TypoScript parse issue: {}", issue);
        result.issues.push(issue);
    }
}
