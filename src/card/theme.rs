//! Theme colors keyed by run conclusion.

/// Fallback color for conclusions without a dedicated theme.
pub const DEFAULT_THEME_COLOR: &str = "957DAD";

/// Map a workflow conclusion to its card theme color (`RRGGBB`).
pub fn conclusion_color(conclusion: &str) -> &'static str {
    match conclusion {
        "success" => "90C978",
        "cancelled" => "FFF175",
        "failure" => "EF6D6D",
        _ => DEFAULT_THEME_COLOR,
    }
}
