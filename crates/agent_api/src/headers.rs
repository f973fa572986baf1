use std::collections::BTreeMap;

use crate::config::AgentApiConfig;
use crate::error::AgentApiError;

pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_USER_AGENT: &str = "user-agent";

const JSON_MEDIA_TYPE: &str = "application/json";

/// Build a deterministic header map for agent requests.
///
/// Extra headers are trimmed and lowercased and override the defaults.
pub fn build_headers(config: &AgentApiConfig) -> Result<BTreeMap<String, String>, AgentApiError> {
    let mut headers = BTreeMap::new();

    headers.insert(HEADER_ACCEPT.to_owned(), JSON_MEDIA_TYPE.to_owned());
    headers.insert(HEADER_CONTENT_TYPE.to_owned(), JSON_MEDIA_TYPE.to_owned());

    let ua = match config.user_agent.as_deref() {
        Some(explicit) if !explicit.trim().is_empty() => explicit.trim().to_owned(),
        _ => default_user_agent(),
    };
    headers.insert(HEADER_USER_AGENT.to_owned(), ua);

    for (key, value) in &config.extra_headers {
        let key = key.trim().to_ascii_lowercase();
        if key.is_empty() {
            return Err(AgentApiError::InvalidHeader(
                "header name must not be empty".to_owned(),
            ));
        }
        headers.insert(key, value.trim().to_owned());
    }

    Ok(headers)
}

/// `cinebot/<version> (<os> <release>; <arch>)`, or without the platform suffix when
/// the platform is unknown.
pub fn default_user_agent() -> String {
    let product = concat!("cinebot/", env!("CARGO_PKG_VERSION"));
    match runtime_os_triplet() {
        Some((platform, release, arch)) => format!("{product} ({platform} {release}; {arch})"),
        None => product.to_owned(),
    }
}

fn normalize_arch(arch: &str) -> String {
    match arch.to_ascii_lowercase().as_str() {
        "x86_64" | "amd64" => "x64".to_owned(),
        "x86" | "i386" | "i686" => "ia32".to_owned(),
        "aarch64" => "arm64".to_owned(),
        normalized => normalized.to_owned(),
    }
}

#[cfg(unix)]
fn runtime_os_triplet() -> Option<(String, String, String)> {
    use std::ffi::CStr;
    use std::mem::MaybeUninit;

    let mut raw = MaybeUninit::<libc::utsname>::uninit();
    // SAFETY: `uname` initializes the provided `utsname` struct on success.
    let rc = unsafe { libc::uname(raw.as_mut_ptr()) };
    if rc != 0 {
        return None;
    }

    // SAFETY: `uname` returned success, so `raw` is initialized.
    let raw = unsafe { raw.assume_init() };
    // SAFETY: `uname` fills NUL-terminated fixed-size C strings.
    let (platform, release, machine) = unsafe {
        (
            CStr::from_ptr(raw.sysname.as_ptr()),
            CStr::from_ptr(raw.release.as_ptr()),
            CStr::from_ptr(raw.machine.as_ptr()),
        )
    };
    let platform = platform.to_string_lossy().to_lowercase();
    let release = release.to_string_lossy().into_owned();
    let arch = normalize_arch(&machine.to_string_lossy());

    if platform.is_empty() || release.is_empty() || arch.is_empty() {
        None
    } else {
        Some((platform, release, arch))
    }
}

#[cfg(not(unix))]
fn runtime_os_triplet() -> Option<(String, String, String)> {
    None
}
