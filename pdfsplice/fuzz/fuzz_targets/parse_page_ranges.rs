#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfsplice::PageRangeSet;

fuzz_target!(|data: &[u8]| {
    let Some((&total, text)) = data.split_first() else {
        return;
    };
    let text = std::str::from_utf8(text).unwrap_or("");
    let total = usize::from(total);

    let set = PageRangeSet::parse(text, total);

    // Sorted, unique and inside the document.
    assert!(set.pages().windows(2).all(|w| w[0] < w[1]));
    assert!(set.pages().iter().all(|&p| (1..=total).contains(&p)));

    // The compact rendering parses back to the same set.
    assert_eq!(PageRangeSet::parse(&set.to_string(), total), set);
});
