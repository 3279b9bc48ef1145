//! Conditions on the evaluation time

use crate::compare::compare_number;
use crate::context::PredicateContext;
use chrono::{Datelike, Timelike};
use typoscript_core::types::{is_integer_string, trim_explode};
use typoscript_core::Value;

/// `value` is a comma list of operator tests; a bare integer means `=`
pub(super) fn matches(context: &PredicateContext, unit: &str, value: &str) -> bool {
    let time = context.evaluation_time;
    let current = match unit {
        "hour" => time.hour() as i64,
        "minute" => time.minute() as i64,
        "month" => time.month() as i64,
        "year" => time.year() as i64,
        "dayofweek" => time.weekday().num_days_from_sunday() as i64,
        "dayofmonth" => time.day() as i64,
        "dayofyear" => time.ordinal0() as i64,
        _ => return false,
    };
    let current = Value::from(current);

    trim_explode(',', value, true).iter().any(|test| {
        if is_integer_string(test) {
            compare_number(&format!("={}", test), &current)
        } else {
            compare_number(test, &current)
        }
    })
}
