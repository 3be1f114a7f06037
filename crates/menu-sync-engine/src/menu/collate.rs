use std::cmp::Ordering;

/// Compare two display strings the way a Norwegian reader sorts them.
///
/// Letters compare case-insensitively first, with æ, ø and å after z. Ties
/// put lowercase before uppercase and finally fall back to code point order,
/// so the result is a total order.
pub fn compare(a: &str, b: &str) -> Ordering {
    let primary = a.chars().map(weight).cmp(b.chars().map(weight));
    primary
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

fn weight(c: char) -> u32 {
    let lower = c.to_lowercase().next().unwrap_or(c);
    match lower {
        'æ' | 'ä' => 'z' as u32 + 1,
        'ø' | 'ö' => 'z' as u32 + 2,
        'å' => 'z' as u32 + 3,
        other => other as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("apple", "banana", Ordering::Less)]
    #[case("Banana", "apple", Ordering::Greater)]
    #[case("zebra", "ærfugl", Ordering::Less)]
    #[case("ærfugl", "østers", Ordering::Less)]
    #[case("østers", "ål", Ordering::Less)]
    #[case("a", "A", Ordering::Less)]
    #[case("same", "same", Ordering::Equal)]
    #[case("abc", "abcd", Ordering::Less)]
    fn test_compare(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(compare(a, b), expected);
        assert_eq!(compare(b, a), expected.reverse());
    }
}
