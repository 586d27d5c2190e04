//! Text primitives: normalization, word splitting and edit distance.

/// Normalize text for comparison: lower-case, surrounding whitespace removed.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Split normalized text into whitespace-separated words.
pub(crate) fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Length in characters (not bytes).
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Levenshtein edit distance between two strings.
///
/// Counts the minimum number of single-character insertions, deletions and
/// substitutions (each of cost 1) that turn `a` into `b`. Characters are
/// Unicode scalar values. Callers normalize first when case and surrounding
/// whitespace should not count.
///
/// Rows run over `b` and columns over `a`; only two rows are kept live.
///
/// # Examples
///
/// ```
/// use bus_server::matcher::edit_distance;
///
/// assert_eq!(edit_distance("howra", "howrah"), 1);
/// assert_eq!(edit_distance("", "abc"), 3);
/// assert_eq!(edit_distance("kitten", "sitting"), 3);
/// ```
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // prev[j] = distance between b[..i-1] and a[..j]
    let mut prev: Vec<usize> = (0..=a.len()).collect();
    let mut curr = vec![0; a.len() + 1];

    for i in 1..=b.len() {
        curr[0] = i;
        for j in 1..=a.len() {
            curr[j] = if b[i - 1] == a[j - 1] {
                prev[j - 1]
            } else {
                1 + prev[j - 1].min(curr[j - 1]).min(prev[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[a.len()]
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Distance from a string to itself is zero
        #[test]
        fn identity(a in "\\PC{0,16}") {
            prop_assert_eq!(edit_distance(&a, &a), 0);
        }

        /// Distance is symmetric
        #[test]
        fn symmetry(a in "[a-z ]{0,12}", b in "[a-z ]{0,12}") {
            prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
        }

        /// Distance from the empty string is the other string's length
        #[test]
        fn empty_is_length(b in "\\PC{0,16}") {
            prop_assert_eq!(edit_distance("", &b), b.chars().count());
        }

        /// Zero exactly when the strings are equal
        #[test]
        fn zero_iff_equal(a in "[a-c]{0,6}", b in "[a-c]{0,6}") {
            prop_assert_eq!(edit_distance(&a, &b) == 0, a == b);
        }

        /// Bounded by the longer string's length
        #[test]
        fn bounded_by_longer(a in "[a-z]{0,12}", b in "[a-z]{0,12}") {
            let d = edit_distance(&a, &b);
            prop_assert!(d <= a.chars().count().max(b.chars().count()));
            prop_assert!(d >= a.chars().count().abs_diff(b.chars().count()));
        }

        /// Normalization is idempotent
        #[test]
        fn normalize_idempotent(x in "\\PC{0,20}") {
            let once = normalize(&x);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
