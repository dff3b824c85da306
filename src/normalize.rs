//! Query-key normalization and natural address ordering.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)").expect("leading number pattern is valid")
});

/// Upper-cases a postcode and strips every whitespace character.
///
/// `"dn12 2dj"` and `" DN12\t2DJ "` both become `"DN122DJ"`. Idempotent.
pub fn normalize_postcode(raw: &str) -> String {
    raw.to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Trims surrounding whitespace only; addresses must match the stored form.
pub fn normalize_address(raw: &str) -> String {
    raw.trim().to_string()
}

/// Extracts the leading digit run of an address as an integer.
///
/// Returns `None` when the address has no leading digits or the run does not
/// fit in a `u64`.
pub fn leading_number(address: &str) -> Option<u64> {
    LEADING_NUMBER
        .captures(address)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Sort key for natural address ordering.
///
/// Numbered addresses come first in ascending numeric order, unnumbered ones
/// after them; the full text breaks ties in both groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSortKey<'a> {
    pub leading_number: Option<u64>,
    pub text: &'a str,
}

impl<'a> AddressSortKey<'a> {
    pub fn new(address: &'a str) -> Self {
        Self {
            leading_number: leading_number(address),
            text: address,
        }
    }
}

impl Ord for AddressSortKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_number = match (self.leading_number, other.leading_number) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_number.then_with(|| self.text.cmp(other.text))
    }
}

impl PartialOrd for AddressSortKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sorts addresses in place by [`AddressSortKey`].
pub fn sort_addresses(addresses: &mut [String]) {
    addresses.sort_by(|a, b| AddressSortKey::new(a).cmp(&AddressSortKey::new(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postcode_normalization() {
        assert_eq!(normalize_postcode("dn12 2dj"), "DN122DJ");
        assert_eq!(normalize_postcode("  DN12\t2DJ \n"), "DN122DJ");
        assert_eq!(normalize_postcode("DN122DJ"), "DN122DJ");
        assert_eq!(normalize_postcode("   "), "");
        assert_eq!(normalize_postcode(""), "");
    }

    #[test]
    fn test_address_is_only_trimmed() {
        assert_eq!(normalize_address("  1, Windmill Avenue "), "1, Windmill Avenue");
        assert_eq!(normalize_address("flat  a"), "flat  a");
        assert_eq!(normalize_address(" \t "), "");
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("12 High Street"), Some(12));
        assert_eq!(leading_number("1, Windmill Avenue"), Some(1));
        assert_eq!(leading_number("007 Bond Lane"), Some(7));
        assert_eq!(leading_number("Flat A, 3 Oak Rd"), None);
        assert_eq!(leading_number(" 4 Elm Close"), None);
        assert_eq!(leading_number(""), None);
        assert_eq!(leading_number("99999999999999999999999 Long Road"), None);
    }

    #[test]
    fn test_natural_ordering() {
        let mut addresses: Vec<String> = ["2 Oak Rd", "10 Oak Rd", "Flat A", "1 Oak Rd"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        sort_addresses(&mut addresses);
        assert_eq!(addresses, vec!["1 Oak Rd", "2 Oak Rd", "10 Oak Rd", "Flat A"]);
    }

    #[test]
    fn test_ties_and_unnumbered_group_are_lexicographic() {
        let mut addresses: Vec<String> = ["Rose Cottage", "3b Oak Rd", "3a Oak Rd", "Flat A", "03 Oak Rd"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        sort_addresses(&mut addresses);
        assert_eq!(
            addresses,
            vec!["03 Oak Rd", "3a Oak Rd", "3b Oak Rd", "Flat A", "Rose Cottage"]
        );
    }

    #[test]
    fn test_sort_key_comparator() {
        assert!(AddressSortKey::new("2 Oak Rd") < AddressSortKey::new("10 Oak Rd"));
        assert!(AddressSortKey::new("999 Oak Rd") < AddressSortKey::new("Acacia House"));
        assert!(AddressSortKey::new("Acacia House") < AddressSortKey::new("Birch House"));
        assert_eq!(
            AddressSortKey::new("5 Oak Rd").cmp(&AddressSortKey::new("5 Oak Rd")),
            Ordering::Equal
        );
    }
}
