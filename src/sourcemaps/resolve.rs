//! Computes the URL a bundle is served from.

use crate::config::UploaderOptions;

/// Resolve the URL Bugsnag should associate with a bundle's source map.
///
/// Precedence:
/// 1. `public_path` joined with the bundle's file name
/// 2. `bundle`, used verbatim
/// 3. the bundle path as emitted by the build
///
/// A single trailing slash is stripped from whichever value is used. A
/// `bundle` that is empty once stripped counts as unset, and a bundle path
/// that is only a slash is kept as is, so a non-empty bundle path never
/// resolves to an empty URL.
pub fn resolve_url(bundle_path: &str, options: &UploaderOptions) -> String {
    let name = file_name(bundle_path);
    if let Some(public_path) = options.public_path().filter(|_| !name.is_empty()) {
        return format!("{}/{}", strip_trailing_slash(public_path), name);
    }

    if let Some(bundle) = options
        .bundle()
        .map(strip_trailing_slash)
        .filter(|b| !b.is_empty())
    {
        return bundle.to_string();
    }

    match strip_trailing_slash(bundle_path) {
        "" => bundle_path.to_string(),
        stripped => stripped.to_string(),
    }
}

fn strip_trailing_slash(value: &str) -> &str {
    value.strip_suffix('/').unwrap_or(value)
}

fn file_name(path: &str) -> &str {
    let path = strip_trailing_slash(path);
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
