//! Client platform detection for the Windows-only download buttons.

pub const DISABLED_CLASS: &str = "btn--disabled";
pub const DISABLED_TITLE: &str = "Windows 10/11 only";

/// `ua_platform` is `navigator.userAgentData.platform` where the browser has it.
pub fn is_windows(ua_platform: &str, platform: &str, user_agent: &str) -> bool {
    let has = |s: &str, needle: &str| s.to_ascii_lowercase().contains(needle);
    has(ua_platform, "win") || has(platform, "win") || has(user_agent, "windows")
}
