#![no_main]

use inmanta::{Namespace, compile_unit};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Ignore invalid UTF-8; source units are text
    if let Ok(s) = std::str::from_utf8(data) {
        if let Err(err) = compile_unit(&Namespace::root(), "fuzz.cf", s) {
            // Rendering the error must not panic either
            let _ = err.to_string();
        }
    }
});
