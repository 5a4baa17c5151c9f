//! Version parsing and ordering utilities for registry clients.

/// Checks if a Maven artifact version is a prerelease.
///
/// Covers snapshots, alpha/beta/rc/cr qualifiers, milestones (`-M1`, `.M2`)
/// and `preview` builds. Matching is case-insensitive.
pub fn is_prerelease_maven(version: &str) -> bool {
    let v = version.to_lowercase();
    if v.contains("snapshot")
        || v.contains("alpha")
        || v.contains("beta")
        || v.contains("preview")
    {
        return true;
    }

    v.split(['.', '-', '_'])
        .any(|part| is_qualifier(part, "rc") || is_qualifier(part, "cr") || is_qualifier(part, "m"))
}

/// `part` is `prefix` optionally followed by digits (e.g. "rc", "rc2", "m1")
fn is_qualifier(part: &str, prefix: &str) -> bool {
    match part.strip_prefix(prefix) {
        // A bare "m" is not a milestone marker
        Some("") => prefix != "m",
        Some(rest) => rest.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

/// Sort versions newest first.
///
/// Versions are ordered by semver only when every entry parses as semver;
/// otherwise the registry order is kept, reversed. Maven metadata lists
/// versions oldest first.
pub fn sort_newest_first(versions: &mut Vec<String>) {
    let parsed: Option<Vec<semver::Version>> = versions
        .iter()
        .map(|v| semver::Version::parse(v).ok())
        .collect();

    match parsed {
        Some(parsed) => {
            let mut pairs: Vec<(semver::Version, String)> =
                parsed.into_iter().zip(versions.drain(..)).collect();
            pairs.sort_by(|a, b| b.0.cmp(&a.0));
            versions.extend(pairs.into_iter().map(|(_, v)| v));
        }
        None => versions.reverse(),
    }
}
