// =============================================================================
// SPIR-V DUMP - Binary file -> C byte array
// =============================================================================
//
// Turns a compiled shader into a C fragment the native side can link against:
//
//   #include <stdint.h>
//
//   const uint32_t <name>_size = 0x<len>;
//   const uint8_t <name>_data []  = {
//   	0x03, 0x02, 0x23, 0x07, ...
//   };
//
// The layout is consumed verbatim by downstream builds, so whitespace matters:
// a tab starts every row, and every byte (including the last) is followed by ", ".

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Array elements per row before wrapping
pub const BYTES_PER_ROW: usize = 10;

/// Returned when `--input` points at nothing. Checked before any read.
#[derive(Debug)]
pub struct InputNotFound {
    pub path: PathBuf,
}

impl fmt::Display for InputNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to find input file {}", self.path.display())
    }
}

impl std::error::Error for InputNotFound {}

/// What a successful dump produced, for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpStats {
    pub bytes: usize,
    pub rows: usize,
}

/// Build the whole output document in memory.
pub fn render(var_name: &str, bytes: &[u8]) -> String {
    // "0xHH, " is 6 chars, plus "\n\t" per row
    let mut out = String::with_capacity(96 + var_name.len() * 2 + bytes.len() * 6 + row_count(bytes.len()) * 2);

    out.push_str("#include <stdint.h>\n\n");
    out.push_str(&format!("const uint32_t {}_size = 0x{:x};\n", var_name, bytes.len()));
    out.push_str(&format!("const uint8_t {}_data []  = {{", var_name));

    for (i, byte) in bytes.iter().enumerate() {
        if i % BYTES_PER_ROW == 0 {
            out.push_str("\n\t");
        }
        out.push_str(&format!("0x{:02x}, ", byte));
    }

    out.push_str("\n};\n");
    out
}

/// Number of rows `render` produces for `len` bytes
pub fn row_count(len: usize) -> usize {
    len.div_ceil(BYTES_PER_ROW)
}

/// True if `name` can be pasted into a C identifier as-is.
///
/// Nothing is rejected on this basis, the caller only warns.
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Read `input` fully, render it, and overwrite `output` in a single write.
pub fn dump_file(input: &Path, output: &Path, var_name: &str) -> Result<DumpStats> {
    if !input.exists() {
        return Err(InputNotFound { path: input.to_path_buf() }.into());
    }

    let bytes = std::fs::read(input)
        .with_context(|| format!("Failed to read input file: {:?}", input))?;
    log::debug!("Read {} bytes from {:?}", bytes.len(), input);

    let text = render(var_name, &bytes);

    std::fs::write(output, text)
        .with_context(|| format!("Failed to write output file: {:?}", output))?;

    Ok(DumpStats {
        bytes: bytes.len(),
        rows: row_count(bytes.len()),
    })
}
