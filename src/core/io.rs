//! Input layer for matrix and bin files
//!
//! Transparent gzip/bzip2 decompression, memory mapping for large plain
//! files, allocation-free line iteration and whitespace field splitting.

use memchr::memchr2;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Default buffer size for BufReader (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Threshold for using memory mapping (100MB)
pub const MMAP_THRESHOLD: u64 = 100 * 1024 * 1024;

/// Compression format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

impl CompressionFormat {
    /// Classify from extension, falling back to magic bytes
    pub fn sniff(extension: &str, magic: &[u8]) -> Self {
        if extension == "gz" || magic.starts_with(&[0x1f, 0x8b]) {
            CompressionFormat::Gzip
        } else if extension == "bz2" || magic.starts_with(b"BZh") {
            CompressionFormat::Bzip2
        } else {
            CompressionFormat::Plain
        }
    }
}

/// Detect compression format from file path and content
pub fn detect_compression(path: &Path) -> io::Result<CompressionFormat> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;
    Ok(CompressionFormat::sniff(extension, &magic[..bytes_read]))
}

/// Memory-mapped file reader
pub struct MappedReader {
    mmap: Mmap,
    position: usize,
}

impl MappedReader {
    pub fn new(file: &File) -> io::Result<Self> {
        // SAFETY: We assume the file won't be modified while mapped
        let mmap = unsafe { Mmap::map(file)? };
        Ok(Self { mmap, position: 0 })
    }

    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }
}

impl Read for MappedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = &self.mmap[self.position..];
        let to_read = std::cmp::min(buf.len(), remaining.len());
        buf[..to_read].copy_from_slice(&remaining[..to_read]);
        self.position += to_read;
        Ok(to_read)
    }
}

impl BufRead for MappedReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(&self.mmap[self.position..])
    }

    fn consume(&mut self, amt: usize) {
        self.position = std::cmp::min(self.position + amt, self.mmap.len());
    }
}

/// Open a text input, decompressing and memory-mapping as appropriate
///
/// Plain files of at least [`MMAP_THRESHOLD`] bytes are memory-mapped; the
/// rest are read through a [`DEFAULT_BUFFER_SIZE`] buffer.
pub fn open_text_reader(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let format = detect_compression(path)?;
    let file = File::open(path)?;
    let reader: Box<dyn BufRead> = match format {
        CompressionFormat::Gzip => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            flate2::read::MultiGzDecoder::new(file),
        )),
        CompressionFormat::Bzip2 => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            bzip2::read::BzDecoder::new(file),
        )),
        CompressionFormat::Plain => {
            if file.metadata()?.len() >= MMAP_THRESHOLD {
                Box::new(MappedReader::new(&file)?)
            } else {
                Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))
            }
        }
    };
    Ok(reader)
}

/// Byte line iterator for zero-copy parsing
pub struct ByteLineIterator<R: BufRead> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: BufRead> ByteLineIterator<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::with_capacity(4096),
        }
    }

    /// Read the next line as bytes, without its line terminator
    pub fn next_line(&mut self) -> Option<io::Result<&[u8]>> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None, // EOF
            Ok(_) => {
                if self.buffer.last() == Some(&b'\n') {
                    self.buffer.pop();
                    if self.buffer.last() == Some(&b'\r') {
                        self.buffer.pop();
                    }
                }
                Some(Ok(&self.buffer))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// True for blank lines and `#`, `track` and `browser` header lines
pub fn is_skippable(line: &[u8]) -> bool {
    let trimmed = line.trim_ascii_start();
    trimmed.is_empty()
        || trimmed.starts_with(b"#")
        || trimmed.starts_with(b"track")
        || trimmed.starts_with(b"browser")
}

/// Split a line on runs of tabs and spaces, returning field byte ranges
pub fn field_bounds(line: &[u8]) -> Vec<(usize, usize)> {
    let mut bounds = Vec::with_capacity(8);
    let mut pos = 0;
    while pos < line.len() {
        match memchr2(b'\t', b' ', &line[pos..]) {
            Some(0) => pos += 1,
            Some(offset) => {
                bounds.push((pos, pos + offset));
                pos += offset + 1;
            }
            None => {
                bounds.push((pos, line.len()));
                break;
            }
        }
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn read_all(path: &Path) -> io::Result<String> {
        let mut reader = open_text_reader(path)?;
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(content)
    }

    #[test]
    fn test_sniff_by_extension_and_magic() {
        assert_eq!(CompressionFormat::sniff("gz", b""), CompressionFormat::Gzip);
        assert_eq!(CompressionFormat::sniff("bz2", b""), CompressionFormat::Bzip2);
        assert_eq!(
            CompressionFormat::sniff("txt", &[0x1f, 0x8b, 0x08]),
            CompressionFormat::Gzip
        );
        assert_eq!(CompressionFormat::sniff("", b"BZh"), CompressionFormat::Bzip2);
        assert_eq!(CompressionFormat::sniff("matrix", b"0\t1"), CompressionFormat::Plain);
    }

    #[test]
    fn test_open_plain() -> io::Result<()> {
        let mut temp = NamedTempFile::new()?;
        temp.write_all(b"0\t1\t2.5\n")?;
        temp.flush()?;
        assert_eq!(detect_compression(temp.path())?, CompressionFormat::Plain);
        assert_eq!(read_all(temp.path())?, "0\t1\t2.5\n");
        Ok(())
    }

    #[test]
    fn test_open_gzip() -> io::Result<()> {
        let mut temp = NamedTempFile::new()?;
        {
            let mut encoder =
                flate2::write::GzEncoder::new(&mut temp, flate2::Compression::default());
            encoder.write_all(b"chr1\t0\t100\n")?;
            encoder.finish()?;
        }
        temp.flush()?;
        assert_eq!(detect_compression(temp.path())?, CompressionFormat::Gzip);
        assert_eq!(read_all(temp.path())?, "chr1\t0\t100\n");
        Ok(())
    }

    #[test]
    fn test_open_bzip2() -> io::Result<()> {
        let mut temp = NamedTempFile::new()?;
        {
            let mut encoder =
                bzip2::write::BzEncoder::new(&mut temp, bzip2::Compression::default());
            encoder.write_all(b"1 2 3\n")?;
            encoder.finish()?;
        }
        temp.flush()?;
        assert_eq!(detect_compression(temp.path())?, CompressionFormat::Bzip2);
        assert_eq!(read_all(temp.path())?, "1 2 3\n");
        Ok(())
    }

    #[test]
    fn test_mapped_reader() -> io::Result<()> {
        let mut temp = NamedTempFile::new()?;
        temp.write_all(b"test content")?;
        temp.flush()?;

        let file = File::open(temp.path())?;
        let mut reader = MappedReader::new(&file)?;
        assert_eq!(reader.len(), 12);
        assert!(!reader.is_empty());
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        assert_eq!(content, "test content");
        Ok(())
    }

    #[test]
    fn test_byte_line_iterator() -> io::Result<()> {
        let data: &[u8] = b"line1\r\nline2\nline3";
        let mut iter = ByteLineIterator::new(data);

        assert_eq!(iter.next_line().unwrap()?, b"line1");
        assert_eq!(iter.next_line().unwrap()?, b"line2");
        assert_eq!(iter.next_line().unwrap()?, b"line3");
        assert!(iter.next_line().is_none());
        Ok(())
    }

    #[test]
    fn test_field_bounds_mixed_separators() {
        let line = b"chr1\t0  100 \t7";
        let fields: Vec<&[u8]> = field_bounds(line)
            .into_iter()
            .map(|(s, e)| &line[s..e])
            .collect();
        assert_eq!(fields, vec![&b"chr1"[..], b"0", b"100", b"7"]);
    }

    #[test]
    fn test_field_bounds_empty() {
        assert!(field_bounds(b"").is_empty());
        assert!(field_bounds(b" \t ").is_empty());
    }

    #[test]
    fn test_is_skippable() {
        assert!(is_skippable(b""));
        assert!(is_skippable(b"   "));
        assert!(is_skippable(b"# comment"));
        assert!(is_skippable(b"track name=x"));
        assert!(!is_skippable(b"chr1\t0\t100"));
    }
}
