use tikkun_match::{
    BoundaryMatcher, MatchOptions, PrefixMode, find_positions, find_standalone_matches,
    replace_standalone,
};

#[test]
fn word_inside_longer_token_is_not_matched() {
    assert!(find_standalone_matches("אותיות", "אות").is_empty());
    assert!(find_standalone_matches("כתב אותיות יפות", "אות").is_empty());
}

#[test]
fn word_between_spaces_is_matched() {
    let matches = find_standalone_matches("כל אות וגם", "אות");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].char_offset, 3);
}

#[test]
fn hyphen_compound_elements_are_standalone() {
    assert_eq!(find_positions("אות-יד", "אות"), vec![0]);
    assert_eq!(find_positions("אות-יד", "יד"), vec![4]);
}

#[test]
fn maqaf_compound_elements_are_standalone() {
    assert_eq!(find_positions("בית־ספר גדול", "ספר"), vec![4]);
}

#[test]
fn start_and_end_of_text_are_boundaries() {
    assert_eq!(find_positions("אות", "אות"), vec![0]);
    assert_eq!(find_positions("אות אחת ועוד אות", "אות"), vec![0, 13]);
}

#[test]
fn punctuation_is_a_boundary() {
    assert_eq!(find_standalone_matches("(אות), אות; אות!", "אות").len(), 3);
}

#[test]
fn empty_word_yields_no_matches() {
    assert!(find_standalone_matches("כל אות וגם", "").is_empty());
    assert!(find_standalone_matches("כל אות וגם", "  ").is_empty());
    assert!(find_standalone_matches("", "אות").is_empty());
}

#[test]
fn digit_inside_decimal_is_not_matched() {
    assert!(find_standalone_matches("1.2 מליון", "2").is_empty());
    assert!(find_standalone_matches("1.2 מליון", "1").is_empty());
    assert!(find_standalone_matches("1,000 איש", "000").is_empty());
}

#[test]
fn digit_inside_longer_number_is_not_matched() {
    assert!(find_standalone_matches("שנת 1948", "9").is_empty());
    assert!(find_standalone_matches("שנת 1948", "194").is_empty());
}

#[test]
fn repeated_standalone_digits_are_all_matched() {
    assert_eq!(
        find_standalone_matches("יש 2 כבשים וגם 2 עזים", "2").len(),
        2
    );
}

#[test]
fn digit_at_sentence_end_is_matched() {
    assert_eq!(find_standalone_matches("קניתי 2.", "2").len(), 1);
}

#[test]
fn maqaf_date_idiom_excludes_digits_only() {
    let text = "ב־2 ביוני נסענו 45 קילומטר";
    assert!(find_standalone_matches(text, "2").is_empty());
    assert_eq!(find_standalone_matches(text, "45").len(), 1);
}

#[test]
fn plain_hyphen_before_digits_stays_a_boundary() {
    assert_eq!(find_standalone_matches("1948-1967", "1967").len(), 1);
}

#[test]
fn abbreviation_marks_inside_a_word_are_not_boundaries() {
    assert!(find_standalone_matches("צה\"ל", "ל").is_empty());
    assert!(find_standalone_matches("צה״ל", "צה").is_empty());
}

#[test]
fn trailing_geresh_keeps_the_abbreviation_whole() {
    assert!(find_standalone_matches("ראה מס׳ 5", "מס").is_empty());
    assert!(find_standalone_matches("ראה מס׳ 5 בעמוד", "מס").is_empty());
    assert!(find_standalone_matches("בקומה ד׳ שם", "ד").is_empty());
    assert_eq!(
        replace_standalone("ראה מס׳ 5 בעמוד", "מס", "מספר"),
        "ראה מס׳ 5 בעמוד"
    );
}

#[test]
fn apostrophe_after_a_hebrew_letter_reads_as_geresh() {
    assert!(find_standalone_matches("ראה מס' 5", "מס").is_empty());
    assert_eq!(find_standalone_matches("he said 'hello' twice", "hello").len(), 1);
}

#[test]
fn abbreviation_itself_is_matched() {
    assert_eq!(find_positions("ראה מס׳ 5", "מס׳"), vec![4]);
    assert_eq!(
        replace_standalone("ראה מס׳ 5", "מס׳", "מספר"),
        "ראה מספר 5"
    );
}

#[test]
fn quotation_marks_around_a_word_are_boundaries() {
    assert_eq!(find_standalone_matches("\"שלום\" אמר", "שלום").len(), 1);
    assert_eq!(find_standalone_matches("אמר ״שלום״", "שלום").len(), 1);
}

#[test]
fn pattern_metacharacters_are_literal() {
    assert_eq!(find_positions("a.b axb", "a.b"), vec![0]);
    assert!(find_standalone_matches("axb", "a.b").is_empty());
    assert_eq!(find_standalone_matches("(x+y) x+y", "x+y").len(), 2);
}

#[test]
fn vowel_points_are_not_folded() {
    assert!(find_standalone_matches("אוֹת", "אות").is_empty());
    assert_eq!(find_standalone_matches("אוֹת יפה", "אוֹת").len(), 1);
}

#[test]
fn attached_prefix_is_excluded_by_default() {
    assert!(find_standalone_matches("ואות", "אות").is_empty());
    assert!(find_standalone_matches("כתב באות", "אות").is_empty());
}

#[test]
fn attached_prefix_can_be_allowed() {
    let matcher = BoundaryMatcher::new(MatchOptions {
        prefix_mode: PrefixMode::AllowAttached,
    });
    assert_eq!(matcher.positions("ואות", "אות"), vec![1]);
    assert_eq!(matcher.positions("כתב באות", "אות"), vec![5]);
    // Two letters in front: the letter before the match is not itself at a boundary.
    assert!(matcher.find("והאות", "אות").is_empty());
    // A non-prefix letter never qualifies.
    assert!(matcher.find("תאות", "אות").is_empty());
}

#[test]
fn replace_leaves_other_text_identical() {
    assert_eq!(
        replace_standalone("(אות), אות; אותיות", "אות", "X"),
        "(X), X; אותיות"
    );
    assert_eq!(replace_standalone("אין כאן כלום", "אות", "X"), "אין כאן כלום");
}

#[test]
fn replace_then_find_reproduces_replaced_positions() {
    let text = "יש 2 כבשים וגם 2 עזים, ו-1.2 תרנגולות";
    let original = find_standalone_matches(text, "2");
    assert_eq!(original.len(), 2);

    let replaced = replace_standalone(text, "2", "שתי");
    assert_eq!(replaced, "יש שתי כבשים וגם שתי עזים, ו-1.2 תרנגולות");

    let growth = "שתי".chars().count() - "2".chars().count();
    let expected: Vec<usize> = original
        .iter()
        .enumerate()
        .map(|(i, m)| m.char_offset + i * growth)
        .collect();
    assert_eq!(find_positions(&replaced, "שתי"), expected);
}

#[test]
fn compiled_word_is_reusable_across_texts() {
    let matcher = BoundaryMatcher::default();
    let pattern = matcher.compile("אות").unwrap();
    for text in ["כל אות וגם", "אותיות", "אות-יד", "(אות), אות; אותיות"] {
        assert_eq!(pattern.find(text), matcher.find(text, "אות"));
        assert_eq!(pattern.positions(text), find_positions(text, "אות"));
        assert_eq!(pattern.replace(text, "X"), replace_standalone(text, "אות", "X"));
    }
    assert!(matcher.compile("  ").is_none());
}

#[test]
fn count_matches_find() {
    let matcher = BoundaryMatcher::default();
    assert_eq!(matcher.count("אות ואות אות", "אות"), 2);
}
