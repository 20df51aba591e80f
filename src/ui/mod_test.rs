use super::*;

#[test]
fn short_titles_are_untouched() {
    assert_eq!(truncate_display("Reuters", 24), "Reuters");
    assert_eq!(truncate_display("", 24), "");
}

#[test]
fn long_titles_end_with_ellipsis() {
    let out = truncate_display("The quick brown fox jumps over the lazy dog", 12);
    assert_eq!(out, "The quick b…");
}

#[test]
fn wide_characters_count_double() {
    // Each CJK character takes two columns.
    assert_eq!(truncate_display("日本語のニュース", 7), "日本語…");
}

#[test]
fn spinner_wraps_around() {
    assert_eq!(spinner(0), spinner(10));
    assert_ne!(spinner(0), spinner(1));
}
