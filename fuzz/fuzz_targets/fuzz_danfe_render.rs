#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must render.
    if let Ok(envelope) = danfe::nfe::from_xml(data) {
        danfe::danfe::render_html(&envelope).unwrap();
    }
});
