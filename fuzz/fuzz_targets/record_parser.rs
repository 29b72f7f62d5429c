#![no_main]

use libfuzzer_sys::fuzz_target;
use logchain::{decode_body, parse_record, Encoding};

const MAX_LINE_LEN: usize = 2048;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte picks between raw lines and well-formed lines around a fuzzed body
    let mode = data[0];
    let Ok(seed) = std::str::from_utf8(&data[1..]) else {
        return;
    };
    let seed: String = seed.chars().take(MAX_LINE_LEN).collect();

    let line = match mode % 3 {
        0 => seed.clone(),
        1 => format!("p id 0 [{}] -1", seed.replace(']', "")),
        _ => format!("p id 1 [{}] next", seed.replace(']', "")),
    };

    let Some(record) = parse_record(&line) else {
        assert_eq!(mode % 3, 0, "well-formed line rejected: {:?}", line);
        return;
    };

    assert!(!record.pipeline_id.is_empty());
    assert!(!record.id.is_empty());
    assert!(!record.next_id.is_empty());
    assert!(!record.id.contains(char::is_whitespace));

    if record.encoding == Encoding::Plain {
        assert!(line.contains(&format!("[{}]", record.body)));
    }

    // Decoding is total
    let _ = decode_body(record.encoding, &seed);
});
