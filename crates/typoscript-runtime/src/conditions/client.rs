//! Conditions on the client: browser, version, system, device, user agent, language

use crate::compare::search_string_wildcard;
use crate::context::PredicateContext;
use typoscript_core::types::{leading_number, trim_explode};

/// Case-insensitive substring of any detected engine with its version
/// (`msie6`, `chrome12`)
pub(super) fn browser(context: &PredicateContext, value: &str) -> bool {
    let browsers = context.client().all_browsers_with_versions();
    trim_explode(',', value, true)
        .iter()
        .any(|test| browsers.contains(&test.to_lowercase()))
}

/// `=6`, `<7`, `>5.5` compare numerically; anything else is a version prefix.
/// The version is the one of the last engine named in the user agent.
pub(super) fn version(context: &PredicateContext, value: &str) -> bool {
    let version = &context.client().version;
    let current = leading_number(version);

    trim_explode(',', value, true).iter().any(|test| {
        if let Some(rest) = test.strip_prefix('=') {
            leading_number(rest) == current
        } else if let Some(rest) = test.strip_prefix('<') {
            current < leading_number(rest)
        } else if let Some(rest) = test.strip_prefix('>') {
            current > leading_number(rest)
        } else {
            version.starts_with(test.as_str())
        }
    })
}

/// Prefix of any detected operating system (`win` matches `winXP`)
pub(super) fn system(context: &PredicateContext, value: &str) -> bool {
    let systems = &context.client().systems;
    trim_explode(',', value, true)
        .iter()
        .any(|test| systems.iter().any(|system| system.starts_with(test.as_str())))
}

pub(super) fn device(context: &PredicateContext, value: &str) -> bool {
    let device = &context.client().device;
    trim_explode(',', value, true).iter().any(|test| test == device)
}

/// Wildcard match against the raw user agent; the value is not split
pub(super) fn useragent(context: &PredicateContext, value: &str) -> bool {
    let test = value.trim();
    !test.is_empty() && search_string_wildcard(context.user_agent(), test)
}

/// `*de*` looks for `de` among the accepted languages, anything else must
/// equal the whole `Accept-Language` header
pub(super) fn language(context: &PredicateContext, value: &str) -> bool {
    let header = context.accept_language();

    trim_explode(',', value, true).iter().any(|test| {
        if test.len() > 2 && test.starts_with('*') && test.ends_with('*') {
            let wanted = &test[1..test.len() - 1];
            header
                .split([',', ';'])
                .any(|language| language.trim() == wanted)
        } else {
            header == test
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const IE6_XP: &str = "Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.1; SV1)";
    const CHROME_WIN10: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const EDGE_WIN10: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.2210.91";
    const SAFARI_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15";

    fn ie6() -> PredicateContext {
        PredicateContext::new().with_user_agent(IE6_XP)
    }

    #[test]
    fn test_browser() {
        let context = ie6();
        assert!(browser(&context, "msie"));
        assert!(browser(&context, "MSIE6"));
        assert!(browser(&context, "opera, msie"));
        assert!(!browser(&context, "firefox"));
        assert!(!browser(&context, ""));
    }

    #[test]
    fn test_browser_with_several_engines() {
        let chrome = PredicateContext::new().with_user_agent(CHROME_WIN10);
        assert!(browser(&chrome, "chrome"));
        assert!(browser(&chrome, "Chrome120"));
        assert!(browser(&chrome, "webkit"));
        assert!(browser(&chrome, "safari537"));
        assert!(!browser(&chrome, "firefox"));
        assert!(!browser(&chrome, "chrome119"));

        let edge = PredicateContext::new().with_user_agent(EDGE_WIN10);
        assert!(browser(&edge, "chrome"));
        assert!(!browser(&edge, "msie"));

        let safari = PredicateContext::new().with_user_agent(SAFARI_MAC);
        assert!(browser(&safari, "safari605"));
        assert!(!browser(&safari, "chrome"));
    }

    #[test]
    fn test_version_with_several_engines() {
        let chrome = PredicateContext::new().with_user_agent(CHROME_WIN10);
        assert!(version(&chrome, "537"));
        assert!(version(&chrome, ">500"));
        assert!(!version(&chrome, "=120"));

        let safari = PredicateContext::new().with_user_agent(SAFARI_MAC);
        assert!(version(&safari, "=605.1"));
        assert!(version(&safari, "<606"));
    }

    #[test]
    fn test_version() {
        let context = ie6();
        assert!(version(&context, "=6"));
        assert!(version(&context, "<7"));
        assert!(version(&context, ">5.5"));
        assert!(version(&context, "6"));
        assert!(!version(&context, "7"));
        assert!(!version(&context, ">6"));
    }

    #[test]
    fn test_system() {
        let context = ie6();
        assert!(system(&context, "win"));
        assert!(system(&context, "winXP"));
        assert!(!system(&context, "mac"));
        assert!(!system(&context, "win7"));
    }

    #[test]
    fn test_device() {
        let robot = PredicateContext::new().with_user_agent("Googlebot/2.1");
        assert!(device(&robot, "robot"));
        assert!(device(&robot, "wap, robot"));
        assert!(!device(&ie6(), "robot"));
    }

    #[test]
    fn test_useragent() {
        let context = ie6();
        assert!(useragent(&context, "*MSIE 6.0*"));
        assert!(useragent(&context, IE6_XP));
        assert!(!useragent(&context, "*Firefox*"));
        assert!(!useragent(&context, " "));
    }

    #[test]
    fn test_language() {
        let context = PredicateContext::new().with_accept_language("de-DE,de;q=0.9,en;q=0.8");
        assert!(language(&context, "*de*"));
        assert!(language(&context, "*en*"));
        assert!(language(&context, "*fr*, *de-DE*"));
        assert!(!language(&context, "*fr*"));
        assert!(!language(&context, "de"));
    }

    #[test]
    fn test_language_exact_header() {
        let context = PredicateContext::new().with_accept_language("de");
        assert!(language(&context, "de"));
        assert!(!language(&context, "*en*"));
    }
}
