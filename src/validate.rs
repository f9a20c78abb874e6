use url::Url;

pub const INVALID_TARGET_MESSAGE: &str =
    "Please enter a valid URL (including http:// or https://)";

/// Returns true when `input` is an absolute URL with both a scheme and an
/// authority. Anything that fails to parse is simply invalid.
pub fn is_valid_target(input: &str) -> bool {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return false;
    }

    let Ok(url) = Url::parse(trimmed) else {
        return false;
    };

    url.host_str().is_some_and(|host| !host.is_empty())
}
