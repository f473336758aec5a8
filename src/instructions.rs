use std::io::BufRead;
use std::path::Path;

use crate::error::Chip8Error;

/// Name a ROM is listed under: its file name without extension, upper-cased.
pub fn rom_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_uppercase())
        .unwrap_or_default()
}

/// Looks up how to play `rom_name` in a listing of `NAME: text` lines.
///
/// Names compare case-insensitively and the first match wins. Lines without a
/// colon are skipped. An entry with empty text counts as missing.
pub fn find_instructions(
    reader: impl BufRead,
    rom_name: &str,
) -> Result<Option<String>, Chip8Error> {
    for line in reader.lines() {
        let line = line?;
        let Some((name, text)) = line.split_once(':') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case(rom_name) {
            let text = text.trim();
            return Ok((!text.is_empty()).then(|| text.to_string()));
        }
    }
    Ok(None)
}

/// Heading plus one line per `<br>`-separated segment.
pub fn format_instructions(rom_name: &str, text: &str) -> String {
    let mut out = format!("<{}> INSTRUCTIONS:\n", rom_name);
    for line in text.split("<br>") {
        out.push_str(line.trim());
        out.push('\n');
    }
    out
}
