//! Worker identity sent in REGISTER.

/// Name used when nothing else is available.
pub const FALLBACK_IDENTITY: &str = "worker";

/// Resolves the REGISTER identity.
///
/// Tries the explicit `--name`, then the machine's host name, and falls back
/// to [`FALLBACK_IDENTITY`].  Blank values are skipped.
pub fn worker_identity(explicit: Option<&str>) -> String {
    resolve(explicit, system_hostname)
}

fn system_hostname() -> Option<String> {
    hostname::get()
        .ok()
        .map(|name| name.to_string_lossy().into_owned())
}

fn resolve(explicit: Option<&str>, hostname: impl FnOnce() -> Option<String>) -> String {
    let pick = |name: Option<String>| {
        name.map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
    };
    pick(explicit.map(str::to_string))
        .or_else(|| pick(hostname()))
        .unwrap_or_else(|| FALLBACK_IDENTITY.to_string())
}
