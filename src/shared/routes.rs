//! Route names and path normalisation.

/// Login page
pub const LOGIN: &str = "/login";
/// Registration page
pub const REGISTER: &str = "/register";
/// Home feed
pub const HOME: &str = "/";

/// Routes reachable without a session
pub const DEFAULT_PUBLIC_ROUTES: [&str; 2] = [LOGIN, REGISTER];

/// Entries of the navigation shell, in display order.
pub const NAV_ITEMS: [(&str, &str); 6] = [
    ("Home", "/"),
    ("Search", "/search"),
    ("Create", "/create"),
    ("Activity", "/notifications"),
    ("Messages", "/messages"),
    ("Profile", "/profile"),
];

/// Strip query string, fragment and trailing slashes so that `/login/?next=x`
/// and `/login` name the same route. The root stays `/`.
pub fn normalize(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim().trim_end_matches('/');

    if trimmed.is_empty() {
        return HOME.to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
