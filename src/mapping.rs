use std::fs::File;
use std::io;
use std::path::Path;

use memmap2::Mmap;

/// Read-only byte view of the whole input file. The mapping outlives every
/// worker borrowing from it and is shared read-only, so workers need no
/// synchronization to read it.
pub struct MappedFile {
    map: Mmap,
}

impl MappedFile {
    /// Open and map `path`. Any failure here (missing file, stat or
    /// mapping error) is fatal to the run and propagates to the caller.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        let map = unsafe { Mmap::map(&file)? };
        Ok(Self { map })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_error() {
        assert!(MappedFile::open("/no/such/measurements.txt").is_err());
    }

    #[test]
    fn maps_whole_file() {
        let path = std::env::temp_dir().join("mapping-test-input.txt");
        std::fs::write(&path, b"abc;1.2\nde;3.4\n").unwrap();

        let mapped = MappedFile::open(&path).unwrap();
        assert_eq!(mapped.bytes(), b"abc;1.2\nde;3.4\n");

        std::fs::remove_file(&path).ok();
    }
}
