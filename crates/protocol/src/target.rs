/// Joins a record target onto an origin. Absolute `http(s)` targets pass through.
pub fn join_target(origin: &str, target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        return target.to_string();
    }
    let origin = origin.trim_end_matches('/');
    if target.starts_with('/') {
        format!("{origin}{target}")
    } else {
        format!("{origin}/{target}")
    }
}
