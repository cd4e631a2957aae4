/// Canonical lower-case form shared by drug and excipient names.
///
/// Reproduces the normalization applied when the training data was labeled:
/// lower-case, drop parenthesized qualifiers such as grades or pharmacopeia
/// marks, keep only `[a-z0-9 ]`, collapse whitespace runs, trim. Total and
/// pure; an arbitrary string always normalizes to something.
pub fn normalize_name(value: &str) -> String {
    let lowered = value.to_lowercase();
    let unparenthesized = strip_parenthesized(lowered.trim());

    let mut cleaned = String::with_capacity(unparenthesized.len());
    for ch in unparenthesized.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch.is_whitespace() {
            cleaned.push(ch);
        }
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes shortest-span `(...)` groups. An unmatched `(` survives this pass
/// and is dropped by the character filter afterwards, which matches the
/// labeling pipeline's behavior.
fn strip_parenthesized(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());
    let mut index = 0;

    while index < chars.len() {
        if chars[index] == '(' {
            if let Some(offset) = chars[index..].iter().position(|&c| c == ')') {
                index += offset + 1;
                continue;
            }
        }
        out.push(chars[index]);
        index += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_parenthesized_grade() {
        assert_eq!(normalize_name("Lactose (USP)"), "lactose");
    }

    #[test]
    fn collapses_interior_whitespace() {
        assert_eq!(normalize_name("  PVP   K30 "), "pvp k30");
    }

    #[test]
    fn strips_punctuation_without_inserting_spaces() {
        assert_eq!(normalize_name("PVP-K30"), "pvpk30");
        assert_eq!(normalize_name("Magnesium Stearate, NF"), "magnesium stearate nf");
    }

    #[test]
    fn unmatched_parenthesis_falls_through_to_the_char_filter() {
        assert_eq!(normalize_name("starch (pregelatinized"), "starch pregelatinized");
        assert_eq!(normalize_name("sorbitol)"), "sorbitol");
    }

    #[test]
    fn nested_groups_drop_the_shortest_span() {
        // mirrors non-greedy matching: "a((x)y)" -> "a" + "y)" -> "ay"
        assert_eq!(normalize_name("a((x)y)"), "ay");
    }

    #[test]
    fn total_on_arbitrary_input() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("  \t "), "");
        assert_eq!(normalize_name("!!!"), "");
    }
}
