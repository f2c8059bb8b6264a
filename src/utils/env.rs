/// Reads an optional environment variable.
///
/// An unset variable and an empty value are both treated as absent.
pub fn optional_env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
