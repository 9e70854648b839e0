//! Maven version parsing and ordering.
//!
//! Versions like `1.9.3.200-qa-SNAPSHOT` are ordered by their numeric
//! prefix first and their qualifier second. An unqualified version is a
//! final release and outranks any qualified one with the same numbers.

use std::cmp::Ordering;

/// Split form of a version string: the dot-separated numeric prefix plus
/// whatever trails it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionParts {
    pub numbers: Vec<u64>,
    pub qualifier: String,
}

/// Detects a trailing `-SNAPSHOT` (case-insensitive).
pub fn is_snapshot(version: &str) -> bool {
    strip_snapshot_suffix(version).len() != version.len()
}

/// Removes a trailing `-SNAPSHOT` (case-insensitive), if present.
pub fn strip_snapshot_suffix(version: &str) -> &str {
    let len = version.len();
    if len >= 9
        && version.is_char_boundary(len - 9)
        && version[len - 9..].eq_ignore_ascii_case("-snapshot")
    {
        &version[..len - 9]
    } else {
        version
    }
}

/// Parses a version string into numeric prefix and qualifier.
///
/// The text is split on `.` and `-` after the `-SNAPSHOT` suffix is
/// removed. Leading segments that parse as integers form the numeric
/// prefix; the first segment that does not (empty segments included)
/// switches the scan to qualifier mode, and every remaining segment is
/// joined with `-` into the qualifier. A version that was nothing but
/// numbers plus the snapshot marker keeps `SNAPSHOT` as its qualifier, so
/// that snapshot-ness still loses to a plain release.
pub fn parse_version(version: &str) -> VersionParts {
    let bare = strip_snapshot_suffix(version);
    let snapshot = bare.len() != version.len();

    let mut numbers = Vec::new();
    let mut qualifier_parts: Vec<&str> = Vec::new();
    let mut in_qualifier = false;

    for part in bare.split(['.', '-']) {
        match part.parse::<u64>() {
            Ok(n) if !in_qualifier => numbers.push(n),
            _ => {
                in_qualifier = true;
                qualifier_parts.push(part);
            }
        }
    }

    let mut qualifier = qualifier_parts.join("-");
    if qualifier.is_empty() && snapshot {
        qualifier = "SNAPSHOT".to_string();
    }

    VersionParts { numbers, qualifier }
}

/// Compares two Maven version strings.
///
/// Numeric prefixes are compared pairwise with zero padding for the
/// shorter side; qualifiers break ties. Total over arbitrary input, never
/// panics.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a_parts = parse_version(a);
    let b_parts = parse_version(b);

    let max_len = a_parts.numbers.len().max(b_parts.numbers.len());
    for i in 0..max_len {
        let an = a_parts.numbers.get(i).copied().unwrap_or(0);
        let bn = b_parts.numbers.get(i).copied().unwrap_or(0);

        let ord = an.cmp(&bn);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    compare_qualifiers(&a_parts.qualifier, &b_parts.qualifier)
}

/// Picks the maximum version under [`compare_versions`].
pub fn max_version<'a, I>(versions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    versions.into_iter().max_by(|a, b| compare_versions(a, b))
}

// Empty outranks non-empty; a qualifier with an embedded task number
// outranks one without and compares by that number; otherwise plain
// string order decides.
fn compare_qualifiers(a: &str, b: &str) -> Ordering {
    if a.is_empty() && b.is_empty() {
        return Ordering::Equal;
    }
    if a.is_empty() {
        return Ordering::Greater;
    }
    if b.is_empty() {
        return Ordering::Less;
    }

    match (embedded_task_number(a), embedded_task_number(b)) {
        (Some(an), Some(bn)) => an.cmp(&bn),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

// First run of ASCII digits, e.g. 4521 in "4521-rc". Runs that do not fit
// in u64 count as no task number.
fn embedded_task_number(qualifier: &str) -> Option<u64> {
    let start = qualifier.find(|c: char| c.is_ascii_digit())?;
    let rest = &qualifier[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_detection() {
        assert!(is_snapshot("1.0.0-SNAPSHOT"));
        assert!(is_snapshot("1.0.0-qa-snapshot"));
        assert!(!is_snapshot("1.0.0"));
        assert!(!is_snapshot("1.0.0.RELEASE"));
        assert!(!is_snapshot("SNAPSHOT-1"));
    }

    #[test]
    fn test_parse_numeric_prefix() {
        let parts = parse_version("1.9.3.200-qa-SNAPSHOT");
        assert_eq!(parts.numbers, vec![1, 9, 3, 200]);
        assert_eq!(parts.qualifier, "qa");
    }

    #[test]
    fn test_parse_numeric_after_qualifier_stays_in_qualifier() {
        let parts = parse_version("1.2-qa-7");
        assert_eq!(parts.numbers, vec![1, 2]);
        assert_eq!(parts.qualifier, "qa-7");
    }

    #[test]
    fn test_parse_plain_snapshot_keeps_marker() {
        let parts = parse_version("1.2.0-SNAPSHOT");
        assert_eq!(parts.numbers, vec![1, 2, 0]);
        assert_eq!(parts.qualifier, "SNAPSHOT");
    }

    #[test]
    fn test_parse_no_numeric_prefix() {
        let parts = parse_version("beta-2");
        assert!(parts.numbers.is_empty());
        assert_eq!(parts.qualifier, "beta-2");
    }

    #[test]
    fn test_numeric_ordering() {
        assert_eq!(compare_versions("1.0.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.0.1", "1.0.0"), Ordering::Greater);
        assert_eq!(compare_versions("2.0.0", "1.9.9"), Ordering::Greater);
        assert_eq!(compare_versions("10.0.0", "9.0.0"), Ordering::Greater);
        assert_eq!(
            compare_versions("1.9.3.200-qa-SNAPSHOT", "1.9.3.201-qa-SNAPSHOT"),
            Ordering::Less
        );
    }

    #[test]
    fn test_missing_segments_compare_as_zero() {
        assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.2", "1.2.1"), Ordering::Less);
    }

    #[test]
    fn test_unqualified_beats_snapshot() {
        assert_eq!(compare_versions("1.2.0-SNAPSHOT", "1.2.0"), Ordering::Less);
        assert_eq!(
            compare_versions("1.2.0", "1.2.0-SNAPSHOT"),
            Ordering::Greater
        );
    }

    #[test]
    fn test_task_segments_compare_numerically() {
        assert_eq!(
            compare_versions("1.2.0-5-SNAPSHOT", "1.2.0-3-SNAPSHOT"),
            Ordering::Greater
        );
        assert_eq!(
            compare_versions("1.2.0-5-SNAPSHOT", "1.2.0-40-SNAPSHOT"),
            Ordering::Less
        );
    }

    #[test]
    fn test_task_number_outranks_plain_qualifier() {
        assert_eq!(
            compare_versions("1.0-rc1", "1.0-beta"),
            Ordering::Greater // rc1 carries a digit run, beta does not
        );
        assert_eq!(compare_versions("1.0-rc2", "1.0-rc10"), Ordering::Less);
    }

    #[test]
    fn test_qualifier_lexicographic_fallback() {
        assert_eq!(
            compare_versions("1.0-qa-SNAPSHOT", "1.0-uat-SNAPSHOT"),
            Ordering::Less
        );
    }

    #[test]
    fn test_no_numeric_prefix_ranks_lowest_by_number() {
        assert_eq!(compare_versions("beta", "0.0.1"), Ordering::Less);
    }

    #[test]
    fn test_reflexivity() {
        let samples = [
            "",
            "1.0.0",
            "1.9.3.200-qa-SNAPSHOT",
            "2.0.0-SNAPSHOT",
            "1.2.0-4521-SNAPSHOT",
            "beta",
            "1.2.3.RELEASE",
        ];
        for v in samples {
            assert_eq!(compare_versions(v, v), Ordering::Equal, "version {v:?}");
        }
    }

    #[test]
    fn test_antisymmetry() {
        let samples = [
            "1.0.0",
            "1.0.1",
            "1.9.3.200-qa-SNAPSHOT",
            "1.9.3.200-uat-SNAPSHOT",
            "2.0.0-SNAPSHOT",
            "1.2.0-5-SNAPSHOT",
            "1.2.0-3-SNAPSHOT",
            "beta",
            "",
        ];
        for a in samples {
            for b in samples {
                assert_eq!(
                    compare_versions(a, b),
                    compare_versions(b, a).reverse(),
                    "versions {a:?} / {b:?}"
                );
            }
        }
    }

    #[test]
    fn test_max_version() {
        let versions = [
            "1.9.3.198-qa-SNAPSHOT",
            "1.9.3.200-qa-SNAPSHOT",
            "1.9.3.199-qa-SNAPSHOT",
        ];
        assert_eq!(max_version(versions), Some("1.9.3.200-qa-SNAPSHOT"));
        assert_eq!(max_version([]), None);
    }

    #[test]
    fn test_huge_digit_run_degrades_gracefully() {
        let v = "1.0-99999999999999999999999999";
        assert_eq!(compare_versions(v, v), Ordering::Equal);
        // The run does not fit in u64, so the x1 side is the only one with
        // a task number.
        assert_eq!(compare_versions(v, "1.0-x1"), Ordering::Less);
    }
}
