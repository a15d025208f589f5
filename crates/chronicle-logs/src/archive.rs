//! Single-file `.tar.gz` archives

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read};
use std::path::Path;
use tar::{Archive, Builder};

/// Compress `source` alone into `archive`, stored under its own file name.
///
/// An existing `archive` is never overwritten: that case fails with
/// `ErrorKind::AlreadyExists`. A partially written archive is removed on
/// failure. The source is left untouched either way.
pub fn archive_file(source: &Path, archive: &Path) -> io::Result<()> {
    let file = OpenOptions::new().write(true).create_new(true).open(archive)?;
    let result = write_archive(source, file);
    if result.is_err() {
        let _ = fs::remove_file(archive);
    }
    result
}

fn write_archive(source: &Path, file: File) -> io::Result<()> {
    let name = source.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("No file name in {}", source.display()),
        )
    })?;

    let mut builder = Builder::new(GzEncoder::new(file, Compression::default()));
    builder.append_path_with_name(source, name)?;
    let encoder = builder.into_inner()?;
    encoder.finish()?.sync_all()?;
    Ok(())
}

/// Read every entry of a `.tar.gz` as `(name, bytes)`
pub fn read_archive(archive: &Path) -> io::Result<Vec<(String, Vec<u8>)>> {
    let file = File::open(archive)?;
    let mut archive = Archive::new(GzDecoder::new(file));

    let mut entries = Vec::new();
    for entry in archive.entries()? {
        let mut entry = entry?;
        let name = entry.path()?.to_string_lossy().into_owned();
        let mut content = Vec::new();
        entry.read_to_end(&mut content)?;
        entries.push((name, content));
    }
    Ok(entries)
}
