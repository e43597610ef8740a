//! Display-label formatting for catalog identifiers.
//!
//! `head_injury` → `Head Injury`. Every character that starts a word
//! (preceded by a non-word character or the start of the string) is
//! uppercased; the rest is left untouched. Not acronym-aware: `cpr`
//! becomes `Cpr`, which is what both the narrative and the PDF print.

/// Replace underscores with spaces, then uppercase the first letter of every word.
pub fn humanize(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut prev_is_word = false;

    for c in id.chars() {
        let c = if c == '_' { ' ' } else { c };
        if !prev_is_word && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = c.is_alphanumeric();
    }
    out
}

/// Humanize each id and join with ", ".
pub fn humanize_list<'a, I>(ids: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    ids.into_iter().map(humanize).collect::<Vec<_>>().join(", ")
}

/// Render a measurement the way the mobile client prints numbers:
/// whole values without a fractional part, others as-is.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// One decimal place, ties rounded away from zero (`37.25` → `37.3`),
/// matching how the mobile client formats temperatures.
pub fn format_one_decimal(value: f64) -> String {
    // Only quarter values (x.25, x.75) are exact ties in binary.
    let is_tie = value.is_finite() && (value * 4.0).fract() == 0.0 && (value * 2.0).fract() != 0.0;
    let value = if is_tie { value + 0.05_f64.copysign(value) } else { value };
    format!("{value:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_becomes_title_words() {
        assert_eq!(humanize("head_injury"), "Head Injury");
        assert_eq!(humanize("emergency_services"), "Emergency Services");
    }

    #[test]
    fn single_word_only_first_letter() {
        assert_eq!(humanize("cpr"), "Cpr");
        assert_eq!(humanize("walker"), "Walker");
    }

    #[test]
    fn already_humanized_is_unchanged() {
        assert_eq!(humanize("Living Room"), "Living Room");
        assert_eq!(humanize("UnConscious"), "UnConscious");
    }

    #[test]
    fn one_decimal_rounds_ties_up() {
        assert_eq!(format_one_decimal(37.25), "37.3");
        assert_eq!(format_one_decimal(38.75), "38.8");
        assert_eq!(format_one_decimal(-0.25), "-0.3");
        assert_eq!(format_one_decimal(37.24), "37.2");
        assert_eq!(format_one_decimal(36.0), "36.0");
        assert_eq!(format_one_decimal(37.5), "37.5");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn hyphen_starts_a_new_word() {
        assert_eq!(humanize("non-talkative"), "Non-Talkative");
    }

    #[test]
    fn repeated_calls_agree() {
        let first = humanize("wound_dressing");
        let second = humanize("wound_dressing");
        assert_eq!(first, second);
    }

    #[test]
    fn whole_numbers_have_no_decimals() {
        assert_eq!(format_number(120.0), "120");
        assert_eq!(format_number(97.5), "97.5");
    }

    #[test]
    fn list_is_comma_joined() {
        assert_eq!(humanize_list(["walker", "shoes"]), "Walker, Shoes");
        assert_eq!(humanize_list(Vec::<&str>::new()), "");
    }
}
