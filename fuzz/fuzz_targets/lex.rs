#![no_main]

use inmanta::lexer::Lexer;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Stop at the first error like the parser does, but drive the iterator by hand.
        for token in Lexer::new(s) {
            if token.is_err() {
                break;
            }
        }
    }
});
