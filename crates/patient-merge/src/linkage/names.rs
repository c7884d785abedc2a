/// Number of consecutive characters two names must share to be considered the
/// same person.
pub const OVERLAP_WINDOW: usize = 4;

/// Lowercases and trims a name cell; missing names compare as empty.
pub fn normalize_name(value: Option<&str>) -> String {
    value.map(|name| name.trim().to_lowercase()).unwrap_or_default()
}

/// Returns true when any window of [`OVERLAP_WINDOW`] characters taken from
/// `first` occurs somewhere in `second`.
///
/// Only windows of `first` are searched for, and a `first` shorter than the
/// window never matches. Swapping the arguments gives the same answer because
/// a shared window is a substring of both names.
pub fn names_overlap(first: &str, second: &str) -> bool {
    let chars: Vec<char> = first.chars().collect();
    let mut window = String::with_capacity(OVERLAP_WINDOW * 4);

    chars.windows(OVERLAP_WINDOW).any(|slice| {
        window.clear();
        window.extend(slice);
        second.contains(window.as_str())
    })
}

/// Title-cases a name for display: the first letter of every alphabetic run is
/// upper case and the remaining letters are lower case.
pub fn title_case(value: &str) -> String {
    let mut titled = String::with_capacity(value.len());
    let mut previous_alphabetic = false;

    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_alphabetic {
                titled.extend(ch.to_lowercase());
            } else {
                titled.extend(ch.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            titled.push(ch);
            previous_alphabetic = false;
        }
    }

    titled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_four_character_window_matches() {
        assert!(names_overlap("john", "johnathan"));
        assert!(names_overlap("smit", "blacksmith"));
        assert!(names_overlap("katherine", "cathrine"));
    }

    #[test]
    fn short_first_name_never_matches() {
        assert!(!names_overlap("ann", "hannah"));
        assert!(!names_overlap("ann", "ann"));
        assert!(!names_overlap("", "anything"));
    }

    #[test]
    fn swapped_arguments_share_the_same_window() {
        // Only windows of the first argument are searched for, but a shared window
        // of four characters is found from either side.
        let pairs = [
            ("smit", "blacksmith"),
            ("johnathan", "john"),
            ("katherine", "cathrine"),
            ("ann", "hannah"),
            ("jo", "joanna"),
            ("maria", "marta"),
        ];
        for (left, right) in pairs {
            assert_eq!(
                names_overlap(left, right),
                names_overlap(right, left),
                "{left} / {right}"
            );
        }
        assert!(names_overlap("blacksmith", "smit"));
        assert!(!names_overlap("maria", "marta"));
    }

    #[test]
    fn windows_count_characters_not_bytes() {
        assert!(!names_overlap("zoë", "zoë"));
        assert!(names_overlap("chloë", "chloë"));
        assert!(names_overlap("renée", "renée-marie"));
    }

    #[test]
    fn normalize_name_trims_and_lowercases() {
        assert_eq!(normalize_name(Some("  Jennifer ")), "jennifer");
        assert_eq!(normalize_name(Some("O'BRIEN")), "o'brien");
        assert_eq!(normalize_name(None), "");
    }

    #[test]
    fn title_case_capitalizes_each_alphabetic_run() {
        assert_eq!(title_case("jennifer"), "Jennifer");
        assert_eq!(title_case("mary-jane"), "Mary-Jane");
        assert_eq!(title_case("o'brien"), "O'Brien");
        assert_eq!(title_case("van der berg"), "Van Der Berg");
        assert_eq!(title_case("mcDONALD"), "Mcdonald");
        assert_eq!(title_case(""), "");
    }
}
