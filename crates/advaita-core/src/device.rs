//! Decides whether the intro runs at all.

use crate::constants::MOBILE_MAX_WIDTH;

const MOBILE_AGENTS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Case-insensitive match against common handheld user agents.
pub fn is_mobile_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_AGENTS.iter().any(|pat| ua.contains(pat))
}

/// Value of an explicit `skipIntro` flag in a query string, if any.
///
/// Accepts `?skipIntro=1`, `?skipIntro` (bare) and the usual boolean words.
pub fn skip_flag(query: &str) -> Option<bool> {
    let query = query.trim_start_matches('?');
    for pair in query.split('&') {
        let (name, value) = match pair.split_once('=') {
            Some((n, v)) => (n, v),
            None => (pair, ""),
        };
        if !name.eq_ignore_ascii_case("skipIntro") {
            continue;
        }
        return match value.to_ascii_lowercase().as_str() {
            "" | "1" | "true" | "yes" => Some(true),
            "0" | "false" | "no" => Some(false),
            other => {
                log::warn!("[device] ignoring skipIntro={}", other);
                None
            }
        };
    }
    None
}

/// Skip on an explicit flag, otherwise on narrow viewports or mobile agents.
pub fn should_skip_intro(viewport_width: f64, user_agent: &str, query: &str) -> bool {
    if let Some(flag) = skip_flag(query) {
        return flag;
    }
    viewport_width <= MOBILE_MAX_WIDTH || is_mobile_agent(user_agent)
}
