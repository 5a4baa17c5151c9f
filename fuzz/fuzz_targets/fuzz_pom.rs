#![no_main]

use libfuzzer_sys::fuzz_target;
use stalepom::oracle::FixedOracle;
use stalepom::parsers::Parser;
use stalepom::parsers::xml::XmlParser;
use stalepom::validate;
use std::panic::AssertUnwindSafe;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let parser = XmlParser::new();

        let result =
            std::panic::catch_unwind(AssertUnwindSafe(|| parser.parse("pom.xml", content)));

        let Ok(parsed) = result else {
            panic!("parser panicked");
        };
        let Ok(document) = parsed else {
            return;
        };

        let line_count = content.lines().count().max(1) as u32;

        for node in document.nodes() {
            assert!(node.line >= 1, "node.line must be 1-indexed");
            assert!(node.line <= line_count, "node.line out of range");
            assert!(content.contains(node.code()), "node.code must come from the input");
        }

        let diagnostics = validate(&document, &FixedOracle::new("0.0.0-fuzz"));
        for diag in &diagnostics {
            assert!(diag.line >= 1 && diag.line <= line_count, "diag.line out of range");
            assert!(!diag.code_fragment.is_empty(), "code_fragment must not be empty");
        }
    }
});
