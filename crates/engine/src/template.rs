//! Destination path template resolution.
//!
//! The upload path may contain `[hash]` or `[hash:N]` tokens which are
//! substituted with the build's content hash (or its first `N`
//! characters). Resolution happens exactly once per build, before file
//! selection; every task shares the resolved prefix.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::DeployError;

/// `[hash]` or `[hash:N]`, case-insensitive. `N` must be a positive
/// integer; anything else is an unrecognized token and stays literal.
fn hash_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\[hash(?::([1-9][0-9]*))?\]").expect("hash token pattern is valid")
    })
}

/// Expands every recognized hash token in `template`.
///
/// Fails with [`DeployError::UnresolvedPlaceholder`] when the template
/// references the hash but no hash value is available. Unrecognized
/// placeholders (e.g. `[name]`) are left as literal text.
pub fn resolve(template: &str, hash: &str) -> Result<String, DeployError> {
    let re = hash_token();

    let Some(first) = re.find(template) else {
        return Ok(template.to_string());
    };

    if hash.is_empty() {
        return Err(DeployError::UnresolvedPlaceholder {
            token: first.as_str().to_string(),
        });
    }

    let resolved = re.replace_all(template, |caps: &regex::Captures<'_>| {
        match caps.get(1).and_then(|n| n.as_str().parse::<usize>().ok()) {
            Some(n) => hash.chars().take(n).collect::<String>(),
            None => hash.to_string(),
        }
    });

    Ok(resolved.into_owned())
}

/// Joins the resolved path prefix and a file name with `/`, posix-style.
///
/// An empty prefix yields the bare file name; a trailing slash on the
/// prefix does not produce a double separator.
pub fn destination_key(prefix: &str, file_name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{prefix}/{file_name}")
    }
}
