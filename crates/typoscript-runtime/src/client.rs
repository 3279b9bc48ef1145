//! Browser, operating system and device detection from the user agent

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static BROWSER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(msie|firefox|webkit|opera|netscape|konqueror|gecko|chrome|safari|seamonkey|navigator|mosaic|lynx|amaya|omniweb|avant|camino|flock|aol)(?:[/ ]+|/?\s*)([0-9]+(?:\.[0-9]+)?)",
    )
    .unwrap_or_else(|_| unreachable!("browser regex is valid"))
});

static TRIDENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"trident/[0-9.]+.*rv[: ]([0-9]+(?:\.[0-9]+)?)").unwrap_or_else(|_| unreachable!("trident regex is valid"))
});

const ROBOT_MARKERS: &[&str] = &[
    "crawler",
    "spider",
    "googlebot",
    "searchbot",
    "infoseek",
    "altavista",
    "diibot",
];

const WAP_PREFIXES: &[&str] = &["noki", "eric", "r380", "up.b", "winw", "wapa"];

/// What the user agent reveals about the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientInfo {
    pub useragent: String,
    /// Lower-case browser name, the last known engine named in the user agent
    pub browser: String,
    /// Version reported for `browser`, `"0"` when unknown
    pub version: String,
    /// Every known browser token with its version, in order of appearance
    pub all_browsers: Vec<(String, String)>,
    /// Detected operating systems, most specific first
    pub systems: Vec<String>,
    /// `pda`, `wap`, `grabber`, `robot` or empty
    pub device: String,
}

impl ClientInfo {
    pub fn detect(useragent: &str) -> Self {
        let lower = useragent.to_lowercase();

        let mut all_browsers: Vec<(String, String)> = BROWSER_PATTERN
            .captures_iter(&lower)
            .map(|captures| (captures[1].to_string(), captures[2].to_string()))
            .collect();
        if all_browsers.iter().all(|(name, _)| name != "msie") {
            if let Some(captures) = TRIDENT_PATTERN.captures(&lower) {
                all_browsers.push(("msie".to_string(), captures[1].to_string()));
            }
        }

        let (browser, version) = all_browsers
            .last()
            .cloned()
            .unwrap_or_else(|| ("unknown".to_string(), "0".to_string()));

        Self {
            useragent: useragent.to_string(),
            browser,
            version,
            all_browsers,
            systems: detect_systems(useragent),
            device: detect_device(&lower).to_string(),
        }
    }

    /// Browser name followed by its version, as matched by `[browser = ...]`
    pub fn browser_with_version(&self) -> String {
        format!("{}{}", self.browser, self.version)
    }

    /// Every detected engine as `nameversion`, space separated
    /// (`webkit537.36 chrome120.0 safari537.36`)
    pub fn all_browsers_with_versions(&self) -> String {
        self.all_browsers
            .iter()
            .map(|(name, version)| format!("{}{}", name, version))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn detect_systems(useragent: &str) -> Vec<String> {
    let has = |needle: &str| useragent.contains(needle);
    let mut systems = Vec::new();

    if has("Win") {
        let specific = if has("Windows NT 10") {
            Some("win10")
        } else if has("Windows NT 6.3") || has("Windows NT 6.2") {
            Some("win8")
        } else if has("Windows NT 6.1") {
            Some("win7")
        } else if has("Windows NT 6.0") {
            Some("winVista")
        } else if has("Windows NT 5.1") {
            Some("winXP")
        } else if has("Windows NT 5.0") {
            Some("win2k")
        } else if has("Win98") || has("Windows 98") {
            Some("win98")
        } else if has("Win95") || has("Windows 95") {
            Some("win95")
        } else if has("WinNT") || has("Windows NT") {
            Some("winNT")
        } else {
            None
        };
        systems.extend(specific.map(str::to_string));
        systems.push("win".to_string());
    } else if has("iPad") || has("iPhone") || has("iPod") {
        systems.push("iOS".to_string());
        systems.push("mobile".to_string());
    } else if has("Mac") {
        systems.push("mac".to_string());
    } else if has("Android") {
        systems.push("android".to_string());
        systems.push("mobile".to_string());
    } else if has("Linux") || has("X11") {
        systems.push("linux".to_string());
    } else if has("BSD") {
        systems.push("unix_bsd".to_string());
    } else if has("SGI") && has("IRIX") {
        systems.push("unix_sgi".to_string());
    } else if has("SunOS") || has("Sun OS") {
        systems.push("unix_sun".to_string());
    } else if has("HP-UX") {
        systems.push("unix_hp".to_string());
    } else if has("webOS") {
        systems.push("webos".to_string());
        systems.push("mobile".to_string());
    } else if has("Symbian") || has("SymbOS") {
        systems.push("symbian".to_string());
        systems.push("mobile".to_string());
    } else if has("BlackBerry") {
        systems.push("blackberry".to_string());
        systems.push("mobile".to_string());
    } else if has("CrOS") {
        systems.push("chrome".to_string());
    }

    systems
}

fn detect_device(lower: &str) -> &'static str {
    if lower.contains("avantgo") {
        return "pda";
    }
    if lower.contains("wap") || WAP_PREFIXES.iter().any(|prefix| lower.starts_with(prefix)) {
        return "wap";
    }
    if lower.contains("g.r.a.b.") || lower.contains("utilmind httpget") {
        return "grabber";
    }
    if lower.is_empty() || ROBOT_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return "robot";
    }
    ""
}
