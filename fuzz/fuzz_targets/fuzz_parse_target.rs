#![no_main]

use libfuzzer_sys::fuzz_target;

use pagefx_core::counter::parse_target;
use pagefx_core::format::format_counter;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    // Should not panic, and plain integers must read back exactly
    let target = parse_target(raw);
    if let Ok(expected) = raw.parse::<i64>() {
        assert_eq!(target, Some(expected));
    }

    // Grouping must keep every digit
    let text = format_counter(target, true, ',', "");
    if let Some(v) = target {
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        assert_eq!(digits, v.unsigned_abs().to_string());
    }
});
