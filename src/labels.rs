//! Label generation from a point's ordinal within its series.

use crate::types::LabelStyle;

/// Roman numeral symbols in descending value order, subtractive pairs included.
const ROMAN_TABLE: [(&str, usize); 13] = [
    ("M", 1000),
    ("CM", 900),
    ("D", 500),
    ("CD", 400),
    ("C", 100),
    ("XC", 90),
    ("L", 50),
    ("XL", 40),
    ("X", 10),
    ("IX", 9),
    ("V", 5),
    ("IV", 4),
    ("I", 1),
];

/// Returns the display label for the point with zero-based `ordinal` in its series.
///
/// Labels are assigned once at creation and never recomputed, so `ordinal` is
/// the number of points that already belong to the series.
pub fn next_label(ordinal: usize, style: LabelStyle) -> String {
    match style {
        LabelStyle::Numeric => (ordinal + 1).to_string(),
        LabelStyle::Alpha => alpha_label(ordinal),
        LabelStyle::Roman => to_roman(ordinal + 1),
    }
}

/// Lowercase bijective base-26 label: `a`..`z`, then `aa`, `ab`, ...
pub fn alpha_label(ordinal: usize) -> String {
    let mut n = ordinal + 1;
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Greedy subtractive Roman numeral for `value`. Zero yields an empty string.
pub fn to_roman(mut value: usize) -> String {
    let mut roman = String::new();
    for (symbol, weight) in ROMAN_TABLE {
        while value >= weight {
            roman.push_str(symbol);
            value -= weight;
        }
    }
    roman
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_roman(s: &str) -> usize {
        let value = |c| match c {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => panic!("not a roman digit: {c}"),
        };
        let digits: Vec<usize> = s.chars().map(value).collect();
        let mut total = 0;
        for (i, d) in digits.iter().enumerate() {
            match digits.get(i + 1) {
                Some(next) if next > d => total -= *d as isize,
                _ => total += *d as isize,
            }
        }
        total as usize
    }

    #[test]
    fn numeric_labels_are_one_based() {
        assert_eq!(next_label(0, LabelStyle::Numeric), "1");
        assert_eq!(next_label(41, LabelStyle::Numeric), "42");
    }

    #[test]
    fn alpha_labels_start_at_a() {
        assert_eq!(next_label(0, LabelStyle::Alpha), "a");
        assert_eq!(next_label(25, LabelStyle::Alpha), "z");
    }

    #[test]
    fn alpha_labels_continue_past_z() {
        assert_eq!(alpha_label(26), "aa");
        assert_eq!(alpha_label(27), "ab");
        assert_eq!(alpha_label(51), "az");
        assert_eq!(alpha_label(52), "ba");
        assert_eq!(alpha_label(701), "zz");
        assert_eq!(alpha_label(702), "aaa");
    }

    #[test]
    fn roman_known_values() {
        assert_eq!(next_label(0, LabelStyle::Roman), "I");
        assert_eq!(next_label(3, LabelStyle::Roman), "IV");
        assert_eq!(next_label(8, LabelStyle::Roman), "IX");
        assert_eq!(next_label(89, LabelStyle::Roman), "XCIX");
        assert_eq!(to_roman(1994), "MCMXCIV");
        assert_eq!(to_roman(0), "");
    }

    #[test]
    fn roman_matches_conventional_value() {
        for ordinal in 0..3999 {
            let label = next_label(ordinal, LabelStyle::Roman);
            assert_eq!(from_roman(&label), ordinal + 1, "label {label}");
        }
    }

    #[test]
    fn unrecognized_style_name_is_numeric() {
        let style = LabelStyle::from_name("greek");
        assert_eq!(next_label(4, style), "5");
    }
}
