#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfsplice::ops;

fuzz_target!(|data: &[u8]| {
    // Never panics, whatever the input.
    let info = ops::inspect(data);
    assert_eq!(info.is_readable(), ops::validate(data));
});
