use anyhow::{anyhow, Context, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::Path;

const GZIP_MAGIC: [u8; 3] = [0x1F, 0x8B, 0x08];
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression detected from the first bytes of an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    Zstd,
    None,
}

/// Detect gzip (1F 8B 08) and zstd (28 B5 2F FD) by magic bytes
pub fn detect_compression(head: &[u8]) -> Compression {
    if head.starts_with(&GZIP_MAGIC) {
        Compression::Gzip
    } else if head.starts_with(&ZSTD_MAGIC) {
        Compression::Zstd
    } else {
        Compression::None
    }
}

/// Wrap `reader` in a decoder when its magic bytes say it is compressed
pub fn maybe_decompress<R: Read + 'static>(mut reader: R) -> io::Result<Box<dyn Read>> {
    let mut head = [0u8; 4];
    let mut filled = 0;
    // A single read may return fewer bytes than are available
    while filled < head.len() {
        let n = reader.read(&mut head[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    // Put the read bytes back in front using a cursor chain
    let chained = Cursor::new(head[..filled].to_vec()).chain(reader);

    match detect_compression(&head[..filled]) {
        Compression::Gzip => Ok(Box::new(MultiGzDecoder::new(chained))),
        Compression::Zstd => Ok(Box::new(zstd::Decoder::new(chained)?)),
        Compression::None => Ok(Box::new(chained)),
    }
}

/// Open a file for reading with transparent gzip/zstd decompression
pub fn open_file(path: &Path) -> Result<Box<dyn Read>> {
    if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
        if extension.eq_ignore_ascii_case("zip") {
            return Err(anyhow!(
                "ZIP file decompression is not supported. Only gzip and zstd files are supported. Extract the ZIP file first: unzip {}",
                path.display()
            ));
        }
    }

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    maybe_decompress(file)
        .with_context(|| format!("Failed to detect compression format of {}", path.display()))
}
