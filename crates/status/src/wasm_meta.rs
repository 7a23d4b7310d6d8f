//! Extraction of contract-metadata sections from compiled modules.

use wasmparser::{Parser, Payload};

use soroscope_codec::CodecError;

/// Returns the payloads of every custom section named `section_name`.
///
/// Only the section envelope is inspected; payload bytes stay opaque and
/// are handed to the codec for decoding.
pub fn custom_sections<'a>(
    module: &'a [u8],
    section_name: &str,
) -> Result<Vec<&'a [u8]>, CodecError> {
    let mut sections = Vec::new();
    for payload in Parser::new(0).parse_all(module) {
        let payload =
            payload.map_err(|e| CodecError::malformed(format!("contract module: {e}")))?;
        if let Payload::CustomSection(reader) = payload {
            if reader.name() == section_name {
                sections.push(reader.data());
            }
        }
    }
    Ok(sections)
}
