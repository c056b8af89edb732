//! Mock collaborators shared by the unit tests
//!
//! `MockChannel` tracks the raw command stream and emulates just enough of
//! the coprocessor's flash engine (status transitions, `CMD_FLASHREAD`,
//! `CMD_FLASHUPDATE`) for the deployment paths to run end to end.
//! `MockStorage` is an in-memory file store with the real device's
//! single-open-handle rule.

use std::cell::Cell;
use std::rc::Rc;
use std::string::String;
use std::vec;
use std::vec::Vec;

use crate::bt81x::{cmd, reg, FlashStatus, RAM_FLASH, RAM_G_WORKING, SECTOR_SIZE};
use crate::traits::{
    CoprocessorChannel, IdleTimeout, OpenMode, Storage, StorageError, StorageFile,
};

pub struct MockChannel {
    /// Every word sent, in order
    pub commands: Vec<u32>,
    pub flushes: usize,
    pub waits: usize,
    /// Successful `wait_idle` calls allowed before reporting a timeout
    pub timeout_after: Option<usize>,
    /// Overrides the emulated REG_FLASH_STATUS readback
    pub force_flash_status: Option<u8>,
    /// Reported REG_FLASH_SIZE in MiB
    pub flash_size_mb: u32,
    /// RAM_G image; staging writes and CMD_FLASHREAD copies land here
    pub ram: Vec<u8>,
    /// Attached-flash image, addressed from RAM_FLASH
    pub flash: Vec<u8>,
    /// `(dest, src, len)` of every CMD_FLASHUPDATE processed
    pub updates: Vec<(u32, u32, u32)>,
    /// Staging-window snapshot taken at each CMD_FLASHUPDATE
    pub staged: Vec<Vec<u8>>,
    status: u8,
    processed: usize,
}

impl MockChannel {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            flushes: 0,
            waits: 0,
            timeout_after: None,
            force_flash_status: None,
            flash_size_mb: 8,
            ram: vec![0; 0x10_0000],
            flash: Vec::new(),
            updates: Vec::new(),
            staged: Vec::new(),
            status: FlashStatus::Init.as_u8(),
            processed: 0,
        }
    }

    /// Current contents of the sector staging window
    pub fn staging(&self) -> &[u8] {
        &self.ram[RAM_G_WORKING as usize..][..SECTOR_SIZE as usize]
    }

    /// Execute queued commands the way the coprocessor would on FIFO drain
    fn process(&mut self) {
        while self.processed < self.commands.len() {
            let word = self.commands[self.processed];
            self.processed += 1;
            match word {
                cmd::FLASHATTACH => self.status = FlashStatus::Basic.as_u8(),
                cmd::FLASHDETACH => self.status = FlashStatus::Detached.as_u8(),
                cmd::FLASHFAST => {
                    self.status = FlashStatus::Full.as_u8();
                    self.processed += 1; // result slot
                }
                cmd::FLASHREAD => {
                    let dest = self.commands[self.processed] as usize;
                    let src = self.commands[self.processed + 1] as usize;
                    let len = self.commands[self.processed + 2] as usize;
                    self.processed += 3;
                    let offset = src - RAM_FLASH as usize;
                    for i in 0..len {
                        self.ram[dest + i] = self.flash.get(offset + i).copied().unwrap_or(0xFF);
                    }
                }
                cmd::FLASHUPDATE => {
                    let dest = self.commands[self.processed];
                    let src = self.commands[self.processed + 1];
                    let len = self.commands[self.processed + 2];
                    self.processed += 3;
                    self.updates.push((dest, src, len));
                    self.staged
                        .push(self.ram[src as usize..][..len as usize].to_vec());
                }
                _ => {}
            }
        }
    }
}

impl CoprocessorChannel for MockChannel {
    fn send_command(&mut self, word: u32) {
        self.commands.push(word);
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }

    fn wait_idle(&mut self) -> Result<(), IdleTimeout> {
        if let Some(limit) = self.timeout_after {
            if self.waits >= limit {
                return Err(IdleTimeout);
            }
        }
        self.waits += 1;
        self.process();
        Ok(())
    }

    fn read_reg8(&mut self, addr: u32) -> u8 {
        match addr {
            reg::FLASH_STATUS => self.force_flash_status.unwrap_or(self.status),
            _ => 0,
        }
    }

    fn read_reg32(&mut self, addr: u32) -> u32 {
        match addr {
            reg::FLASH_SIZE => self.flash_size_mb,
            _ => 0,
        }
    }

    fn write_memory(&mut self, addr: u32, data: &[u8]) {
        let addr = addr as usize;
        self.ram[addr..addr + data.len()].copy_from_slice(data);
    }

    fn read_memory8(&mut self, addr: u32) -> u8 {
        self.ram[addr as usize]
    }
}

pub struct MockFile {
    data: Vec<u8>,
    pos: usize,
    open_flag: Rc<Cell<bool>>,
}

impl Drop for MockFile {
    fn drop(&mut self) {
        self.open_flag.set(false);
    }
}

impl StorageFile for MockFile {
    fn size(&self) -> u32 {
        self.data.len() as u32
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, StorageError> {
        let n = buf.len().min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn read_byte(&mut self) -> Result<u8, StorageError> {
        let byte = *self.data.get(self.pos).ok_or(StorageError::Io)?;
        self.pos += 1;
        Ok(byte)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, StorageError> {
        self.data.extend_from_slice(data);
        self.pos = self.data.len();
        Ok(data.len())
    }

    fn seek(&mut self, offset: u32) -> Result<(), StorageError> {
        if offset as usize > self.data.len() {
            return Err(StorageError::Io);
        }
        self.pos = offset as usize;
        Ok(())
    }

    fn position(&self) -> u32 {
        self.pos as u32
    }
}

pub struct MockStorage {
    files: Vec<(String, Vec<u8>)>,
    open_flag: Rc<Cell<bool>>,
    pub exists_calls: usize,
    pub open_calls: usize,
    /// Fail Write-mode opens with Io
    pub fail_create: bool,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            open_flag: Rc::new(Cell::new(false)),
            exists_calls: 0,
            open_calls: 0,
            fail_create: false,
        }
    }

    pub fn insert(&mut self, name: &str, data: &[u8]) {
        self.files.push((String::from(name), Vec::from(data)));
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.files.iter().any(|(n, _)| n.as_str() == name)
    }
}

impl Storage for MockStorage {
    type File = MockFile;

    fn exists(&mut self, name: &str) -> bool {
        self.exists_calls += 1;
        self.has_file(name)
    }

    fn open(&mut self, name: &str, mode: OpenMode) -> Result<MockFile, StorageError> {
        self.open_calls += 1;
        if self.open_flag.get() {
            return Err(StorageError::Busy);
        }
        let data = match mode {
            OpenMode::Read => self
                .files
                .iter()
                .find(|(n, _)| n.as_str() == name)
                .map(|(_, d)| d.clone())
                .ok_or(StorageError::NotFound)?,
            OpenMode::Write => {
                if self.fail_create {
                    return Err(StorageError::Io);
                }
                if !self.has_file(name) {
                    self.files.push((String::from(name), Vec::new()));
                }
                Vec::new()
            }
        };
        self.open_flag.set(true);
        Ok(MockFile {
            data,
            pos: 0,
            open_flag: Rc::clone(&self.open_flag),
        })
    }
}
