/// CSS class of an instance status badge.
pub fn status_badge_class(running: bool) -> &'static str {
    if running {
        "badge badge-running"
    } else {
        "badge badge-other"
    }
}
