//! Chunked digests over readers and files.
//!
//! Input is read in [`CHUNK_SIZE`] pieces and each piece is fed to the
//! incremental hasher using exactly the number of bytes the read returned;
//! the final short read needs no special casing.

#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use sha2::{Digest as _, Sha512};

use super::sha3::{Digest, DigestSize, Sha3};
use super::to_hex_upper;
use crate::error::Result;

/// Read buffer size (8 MiB).
pub const CHUNK_SIZE: usize = 8 * 1024 * 1024;

/// Drive `sink` with successive chunks of `reader`; returns total bytes read.
fn for_each_chunk<R, F>(mut reader: R, mut sink: F) -> Result<u64>
where
    R: Read,
    F: FnMut(&[u8]) -> Result<()>,
{
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;
    let mut chunks = 0u64;

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        sink(&buffer[..read])?;
        total += read as u64;
        chunks += 1;
    }

    log::debug!("hashed {total} bytes in {chunks} chunks");
    Ok(total)
}

/// SHA-512 of everything `reader` yields, as uppercase hex.
pub fn sha512_reader<R: Read>(reader: R) -> Result<String> {
    let mut hasher = Sha512::new();
    for_each_chunk(reader, |chunk| {
        hasher.update(chunk);
        Ok(())
    })?;
    Ok(to_hex_upper(hasher.finalize()))
}

/// SHA-512 of UTF-8 text, as uppercase hex.
pub fn sha512_hex(input: &str) -> String {
    to_hex_upper(Sha512::digest(input.as_bytes()))
}

/// SHA-3 of everything `reader` yields.
pub fn sha3_reader<R: Read>(reader: R, size: DigestSize) -> Result<Digest> {
    let mut engine = Sha3::new(size);
    for_each_chunk(reader, |chunk| engine.update(chunk))?;
    engine.finalize()
}

/// SHA-3 of a file's contents.
pub fn sha3_file(path: impl AsRef<Path>, size: DigestSize) -> Result<Digest> {
    let path = path.as_ref();
    log::debug!("{size} of {}", path.display());
    sha3_reader(File::open(path)?, size)
}

/// SHA3-512 of a file's contents, as uppercase hex.
pub fn sha3_512_file_hex(path: impl AsRef<Path>) -> Result<String> {
    sha3_file(path, DigestSize::Sha3_512).map(|d| d.to_hex())
}

/// SHA-512 of a file's contents, as uppercase hex.
pub fn sha512_file_hex(path: impl AsRef<Path>) -> Result<String> {
    sha512_reader(File::open(path.as_ref())?)
}
