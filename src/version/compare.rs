//! Dotted-integer release comparison

use std::cmp::Ordering;

/// Parse a release string into its numeric components.
///
/// Every dot-separated segment must be a non-negative integer;
/// anything else (empty segments included) yields `None`.
///
/// Examples:
/// - "3.0.20" -> Some([3, 0, 20])
/// - "1.2" -> Some([1, 2])
/// - "abc" -> None
pub fn parse_release(version: &str) -> Option<Vec<u64>> {
    version
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect()
}

/// Compare two release strings component-wise.
///
/// The shorter sequence is zero-padded to the longer one's length before
/// comparison, so "1.2" and "1.2.0" are equal.
///
/// If either string fails to parse, the comparison degrades to
/// `Ordering::Equal` rather than erroring. This is a known-weak contract:
/// a malformed input silently suppresses a legitimate miscomparison, and
/// callers that care must validate with [`parse_release`] first.
pub fn compare_releases(v1: &str, v2: &str) -> Ordering {
    let (Some(a), Some(b)) = (parse_release(v1), parse_release(v2)) else {
        return Ordering::Equal;
    };

    let len = a.len().max(b.len());
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("3.0.20", Some(vec![3, 0, 20]))]
    #[case("1.2", Some(vec![1, 2]))]
    #[case("0", Some(vec![0]))]
    #[case("abc", None)]
    #[case("3.0.x", None)]
    #[case("3..20", None)]
    #[case("", None)]
    #[case("-1.0.0", None)]
    fn parse_release_accepts_only_dotted_integers(
        #[case] input: &str,
        #[case] expected: Option<Vec<u64>>,
    ) {
        assert_eq!(parse_release(input), expected);
    }

    #[rstest]
    #[case("3.0.19", "3.0.20", Ordering::Less)]
    #[case("3.0.20", "3.0.19", Ordering::Greater)]
    #[case("3.0.20", "3.0.20", Ordering::Equal)]
    #[case("2.9.9", "3.0.0", Ordering::Less)]
    #[case("10.0.0", "9.9.9", Ordering::Greater)]
    fn compare_releases_orders_strictly(
        #[case] v1: &str,
        #[case] v2: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare_releases(v1, v2), expected);
    }

    #[rstest]
    #[case("1.2", "1.2.0")]
    #[case("1.2.0", "1.2")]
    #[case("3", "3.0.0.0")]
    fn compare_releases_zero_pads_shorter_sequence(#[case] v1: &str, #[case] v2: &str) {
        assert_eq!(compare_releases(v1, v2), Ordering::Equal);
    }

    #[rstest]
    #[case("1.2", "1.2.1", Ordering::Less)]
    #[case("1.3", "1.2.9", Ordering::Greater)]
    fn compare_releases_pads_then_compares(
        #[case] v1: &str,
        #[case] v2: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare_releases(v1, v2), expected);
    }

    #[rstest]
    #[case("3.0.19", "3.0.20")]
    #[case("1.2", "1.2.0")]
    #[case("2.0.0", "10.0.0")]
    #[case("3.0.20", "3.0.20")]
    fn compare_releases_is_antisymmetric(#[case] a: &str, #[case] b: &str) {
        assert_eq!(compare_releases(a, b), compare_releases(b, a).reverse());
    }

    #[rstest]
    #[case("3.0.20")]
    #[case("1.2")]
    #[case("0.0.0")]
    fn compare_releases_is_reflexive(#[case] v: &str) {
        assert_eq!(compare_releases(v, v), Ordering::Equal);
    }

    // Documents the lenient contract: malformed input is treated as equal
    // instead of raising. Known weakness inherited from the tool's history.
    #[rstest]
    #[case("abc", "3.0.20")]
    #[case("3.0.20", "abc")]
    #[case("", "")]
    #[case("3.0.x", "3.0.20")]
    fn compare_releases_treats_unparseable_input_as_equal(#[case] v1: &str, #[case] v2: &str) {
        assert_eq!(compare_releases(v1, v2), Ordering::Equal);
    }
}
