// Route path constants - single source of truth for all API paths

/// Bare root: the key is empty, which GET and DELETE reject.
pub const ROOT: &str = "/";

/// Everything after the leading slash is the key, slashes included.
pub const KEY: &str = "/{*key}";
