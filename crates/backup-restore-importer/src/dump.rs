use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::Path,
};

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use flate2::bufread::GzDecoder;
use tracing::{debug, info};

use crate::error::RunError;

/// Line breaks and other ASCII whitespace inside the payload are skipped.
pub fn decode_dump(encoded: &str) -> Result<Vec<u8>, RunError> {
    let compact = encoded
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect::<Vec<_>>();
    let bytes = BASE64.decode(compact)?;
    debug!("Decoded {} bytes of compressed dump", bytes.len());
    Ok(bytes)
}

pub fn save_dump(bytes: &[u8], path: &Path) -> Result<(), RunError> {
    std::fs::write(path, bytes)?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Inflates `gzip_file` into `output_file`, returning the number of bytes written.
pub fn decompress_gzip_file(gzip_file: &Path, output_file: &Path) -> Result<u64, RunError> {
    let reader = BufReader::new(File::open(gzip_file)?);
    let mut decoder = GzDecoder::new(reader);
    let mut writer = BufWriter::new(File::create(output_file)?);

    let written = io::copy(&mut decoder, &mut writer).map_err(|err| {
        // Framing and checksum failures surface from the decoder as these kinds.
        match err.kind() {
            io::ErrorKind::InvalidInput
            | io::ErrorKind::InvalidData
            | io::ErrorKind::UnexpectedEof => RunError::Gzip(err),
            _ => RunError::Io(err),
        }
    })?;

    writer.into_inner().map_err(|err| err.into_error())?;
    info!(
        "Decompressed {} into {} ({} bytes)",
        gzip_file.display(),
        output_file.display(),
        written
    );
    Ok(written)
}
