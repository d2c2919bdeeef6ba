//! Page-range text as users type it.

use rstest::rstest;

use pdfsplice::PageRangeSet;

#[rstest]
#[case("2,4,10-12", 12, &[2, 4, 10, 11, 12])]
#[case("1-3,5", 5, &[1, 2, 3, 5])]
#[case("99", 10, &[])]
#[case(" 3 , 1 - 2 ", 5, &[1, 2, 3])]
#[case("5-3,2", 5, &[2])]
#[case("1-2-3,4", 5, &[4])]
#[case("-2,3-,x,,4", 5, &[4])]
#[case("1-6", 5, &[])]
#[case("0,1", 5, &[1])]
#[case("2,2,1-3", 5, &[1, 2, 3])]
#[case("", 5, &[])]
fn test_parse_examples(#[case] text: &str, #[case] total: usize, #[case] expected: &[usize]) {
    assert_eq!(PageRangeSet::parse(text, total).pages(), expected);
}

#[test]
fn test_parse_against_empty_document() {
    assert!(PageRangeSet::parse("1", 0).is_empty());
}

#[test]
fn test_display_round_trips_through_parse() {
    let set = PageRangeSet::parse("12,10,11,4,2,6-7", 12);
    let text = set.to_string();

    assert_eq!(text, "2,4,6,7,10-12");
    assert_eq!(PageRangeSet::parse(&text, 12), set);
}

#[test]
fn test_indices_are_zero_based() {
    let set = PageRangeSet::parse("1,3", 3);
    assert_eq!(set.indices(), vec![0, 2]);
    assert!(set.contains(3));
    assert!(!set.contains(2));
}
