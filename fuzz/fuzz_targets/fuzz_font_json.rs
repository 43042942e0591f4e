#![no_main]

use glyphpack_engine::SymbolEngine;
use glyphpack_spec::{check_required_fields, validate_document, FontDocument, DEFAULT_SET_MARKER};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    if !check_required_fields(&value).is_ok() {
        return;
    }
    let Ok(doc) = FontDocument::from_value(value) else {
        return;
    };

    // Only the supplied rows are bounded; declared sizes may be anything.
    let supplied: usize = doc
        .symbols
        .iter()
        .flat_map(|g| g.data.iter().flatten())
        .map(|row| row.len())
        .sum();
    if supplied > 1 << 20 {
        return;
    }

    let _ = validate_document(&doc);
    let engine = SymbolEngine::from_document(&doc, DEFAULT_SET_MARKER);
    assert_eq!(engine.bitstream_size(), engine.bits_written().div_ceil(8));
    assert_eq!(engine.error_count(), engine.diagnostics().len());
    for descriptor in engine.descriptors() {
        let end = descriptor
            .geometry()
            .checked_area()
            .and_then(|area| descriptor.offset().checked_add(area));
        assert!(end.is_some());
        let _ = engine.glyph_bitmap(descriptor);
    }
});
