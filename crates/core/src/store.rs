//! Byte-addressable persistent stores
//!
//! The save format addresses a small fixed region byte by byte (like an
//! EEPROM). `ByteStore` is that region; integers are 32-bit little-endian.
//! Every access is bounds-checked, so a write past the end fails instead of
//! touching anything else.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::types::MEM_SIZE;

pub trait ByteStore {
    /// Size of the region in bytes
    fn capacity(&self) -> usize;

    fn read_byte(&self, addr: usize) -> Result<u8, StoreError>;

    fn write_byte(&mut self, addr: usize, value: u8) -> Result<(), StoreError>;

    /// Flush pending writes to the backing medium
    fn commit(&mut self) -> Result<(), StoreError>;

    fn read_i32(&self, addr: usize) -> Result<i32, StoreError> {
        check_range(addr, 4, self.capacity())?;
        let mut bytes = [0u8; 4];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = self.read_byte(addr + i)?;
        }
        Ok(i32::from_le_bytes(bytes))
    }

    fn write_i32(&mut self, addr: usize, value: i32) -> Result<(), StoreError> {
        check_range(addr, 4, self.capacity())?;
        for (i, b) in value.to_le_bytes().into_iter().enumerate() {
            self.write_byte(addr + i, b)?;
        }
        Ok(())
    }
}

fn check_range(addr: usize, len: usize, capacity: usize) -> Result<(), StoreError> {
    match addr.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(StoreError::OutOfBounds {
            addr,
            len,
            capacity,
        }),
    }
}

/// Zero-initialised in-memory region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    bytes: Vec<u8>,
    commits: usize,
}

impl MemoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity],
            commits: 0,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of `commit` calls so far
    pub fn commits(&self) -> usize {
        self.commits
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(MEM_SIZE)
    }
}

impl ByteStore for MemoryStore {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn read_byte(&self, addr: usize) -> Result<u8, StoreError> {
        check_range(addr, 1, self.bytes.len())?;
        Ok(self.bytes[addr])
    }

    fn write_byte(&mut self, addr: usize, value: u8) -> Result<(), StoreError> {
        check_range(addr, 1, self.bytes.len())?;
        self.bytes[addr] = value;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        self.commits += 1;
        Ok(())
    }
}

/// Region mirrored in a file. Writes stay in memory until `commit`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    image: MemoryStore,
}

impl FileStore {
    /// Open `path`, or start from a zeroed region if it does not exist yet.
    ///
    /// A shorter file is zero-padded and a longer one truncated to `capacity`.
    pub fn open(path: impl AsRef<Path>, capacity: usize) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let mut image = MemoryStore::new(capacity);
        match fs::read(&path) {
            Ok(data) => {
                let n = data.len().min(capacity);
                image.bytes[..n].copy_from_slice(&data[..n]);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(Self { path, image })
    }
}

impl ByteStore for FileStore {
    fn capacity(&self) -> usize {
        self.image.capacity()
    }

    fn read_byte(&self, addr: usize) -> Result<u8, StoreError> {
        self.image.read_byte(addr)
    }

    fn write_byte(&mut self, addr: usize, value: u8) -> Result<(), StoreError> {
        self.image.write_byte(addr, value)
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        // Write beside the target and rename so a crash never leaves half a save.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, self.image.bytes())?;
        fs::rename(&tmp, &self.path)?;
        self.image.commit()
    }
}
