use pretty_assertions::assert_eq;

use super::*;

#[test]
fn edit_distance_basics() {
    assert_eq!(edit_distance("kitten", "sitting"), 3);
    assert_eq!(edit_distance("abc", ""), 3);
    assert_eq!(edit_distance("", "ab"), 2);
    assert_eq!(edit_distance("same", "same"), 0);
}

#[test]
fn edit_distance_counts_characters_not_bytes() {
    assert_eq!(edit_distance("sayı", "sayi"), 1);
}

#[test]
fn suggests_close_name() {
    let names = ["toplam", "carpim", "fark"];
    assert_eq!(suggest_similar("toplamm", names), Some("toplam"));
}

#[test]
fn short_names_get_no_suggestion() {
    assert_eq!(suggest_similar("ab", ["ac"]), None);
}

#[test]
fn first_character_must_match() {
    assert_eq!(suggest_similar("xoplam", ["toplam"]), None);
}

#[test]
fn short_candidates_allow_one_edit() {
    assert_eq!(suggest_similar("adm", ["ad", "adim"]), Some("ad"));
    assert_eq!(suggest_similar("abcd", ["axyd"]), None);
}

#[test]
fn long_names_respect_ratio() {
    // 2 edits over 5 characters is above the ratio.
    assert_eq!(suggest_similar("liste", ["lisxx"]), None);
    // 2 edits over 6 characters is within it.
    assert_eq!(suggest_similar("sayacc", ["sayaxx"]), Some("sayaxx"));
    assert_eq!(suggest_similar("degerx", ["degery"]), Some("degery"));
}

#[test]
fn smallest_distance_wins() {
    let names = ["toplamx1", "toplam1"];
    assert_eq!(suggest_similar("toplam", names), Some("toplam1"));
}

#[test]
fn identical_name_is_not_suggested() {
    assert_eq!(suggest_similar("toplam", ["toplam"]), None);
}
