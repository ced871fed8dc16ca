/// True if the variable is set to anything but "".
pub fn env_var_non_empty(name: &str) -> bool {
    std::env::var_os(name).is_some_and(|v| !v.is_empty())
}
