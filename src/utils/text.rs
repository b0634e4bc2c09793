/// Trims, case-folds and collapses internal whitespace runs to one space.
pub fn normalize_answer(s: &str) -> String {
    s.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_case_and_whitespace() {
        assert_eq!(normalize_answer("  Ki  Hajar\tDewantara \n"), "ki hajar dewantara");
    }

    #[test]
    fn numerals_stay_strings() {
        assert_eq!(normalize_answer(" 1945 "), "1945");
        assert_ne!(normalize_answer("1945.0"), normalize_answer("1945"));
    }
}
