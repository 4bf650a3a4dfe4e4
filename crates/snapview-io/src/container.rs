//! Reading and writing snapshot trace containers.
//!
//! A trace container is a JSON-encoded [`SnapshotCollection`], stored either
//! plain or gzip-compressed. Readers sniff the gzip magic bytes so callers
//! never have to say which form a file is in.

use crate::error::{LoadError, Result};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use snapview::SnapshotCollection;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub struct TraceContainer;

impl TraceContainer {
    /// Load a collection from a plain-JSON or gzip-compressed trace file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<SnapshotCollection> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Decode a collection from raw container bytes.
    pub fn from_bytes(data: &[u8]) -> Result<SnapshotCollection> {
        let json = if data.starts_with(&GZIP_MAGIC) {
            let mut decoder = GzDecoder::new(data);
            let mut buf = Vec::new();
            decoder.read_to_end(&mut buf)?;
            buf
        } else {
            data.to_vec()
        };
        Ok(serde_json::from_slice(&json)?)
    }

    /// Write a collection as plain JSON.
    pub fn save<P: AsRef<Path>>(path: P, collection: &SnapshotCollection) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, collection)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a collection as a gzip-compressed JSON container.
    pub fn save_compressed<P: AsRef<Path>>(
        path: P,
        collection: &SnapshotCollection,
    ) -> Result<()> {
        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        serde_json::to_writer(&mut encoder, collection)?;
        encoder.finish()?.flush()?;
        Ok(())
    }
}
