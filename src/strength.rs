use std::fmt;

pub const MAX_POINTS: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strength {
    None,
    Weak,
    Medium,
    Strong,
}

impl Strength {
    pub fn meter_percent(self) -> u8 {
        match self {
            Strength::None => 0,
            Strength::Weak => 33,
            Strength::Medium => 66,
            Strength::Strong => 100,
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Strength::None => "None",
            Strength::Weak => "Weak",
            Strength::Medium => "Medium",
            Strength::Strong => "Strong",
        };
        f.write_str(label)
    }
}

pub fn points(password: &str) -> u8 {
    let length = password.chars().count();

    [
        length >= 8,
        length >= 12,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ]
    .into_iter()
    .filter(|satisfied| *satisfied)
    .count() as u8
}

pub fn score(password: &str) -> Strength {
    if password.is_empty() {
        return Strength::None;
    }

    match points(password) {
        5.. => Strength::Strong,
        3..=4 => Strength::Medium,
        _ => Strength::Weak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_none() {
        assert_eq!(score(""), Strength::None);
        assert_eq!(points(""), 0);
    }

    #[test]
    fn test_lowercase_only_is_weak() {
        assert_eq!(points("abcdefgh"), 2);
        assert_eq!(score("abcdefgh"), Strength::Weak);
    }

    #[test]
    fn test_three_classes_is_medium() {
        assert_eq!(points("Abcdefgh12"), 4);
        assert_eq!(score("Abcdefgh12"), Strength::Medium);
    }

    #[test]
    fn test_all_classes_long_is_strong() {
        assert_eq!(points("Abcdefghij12!@"), MAX_POINTS);
        assert_eq!(score("Abcdefghij12!@"), Strength::Strong);
    }

    #[test]
    fn test_thresholds() {
        let cases = vec![
            ("a", Strength::Weak),
            ("aB", Strength::Weak),
            ("aB1", Strength::Medium),
            ("aB1!", Strength::Medium),
            ("aB1!aB1!", Strength::Strong),
            ("abcdefghijkl", Strength::Medium),
            ("ABCDEFGHIJK1", Strength::Medium),
            ("ABCDEFGHIJK!1", Strength::Strong),
        ];

        for (password, expected) in cases {
            assert_eq!(
                score(password),
                expected,
                "Unexpected label for {:?} ({} points)",
                password,
                points(password)
            );
        }
    }

    #[test]
    fn test_non_ascii_counts_as_symbol() {
        assert_eq!(points("é"), 1);
        assert_eq!(points(" "), 1);
    }

    #[test]
    fn test_length_counts_chars() {
        assert_eq!(points("éééééééé"), 2);
    }

    #[test]
    fn test_score_is_pure() {
        for password in ["", "abc", "Abcdefgh12", "Abcdefghij12!@"] {
            assert_eq!(score(password), score(password));
        }
    }

    #[test]
    fn test_display_and_meter() {
        assert_eq!(Strength::None.to_string(), "None");
        assert_eq!(Strength::Strong.to_string(), "Strong");
        assert_eq!(Strength::None.meter_percent(), 0);
        assert_eq!(Strength::Weak.meter_percent(), 33);
        assert_eq!(Strength::Medium.meter_percent(), 66);
        assert_eq!(Strength::Strong.meter_percent(), 100);
        assert!(Strength::Strong > Strength::Medium);
    }
}
