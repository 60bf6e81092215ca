#![allow(dead_code)]

//! Literal PE header fixtures.
//!
//! Layout of a PE32 fixture (all offsets absolute):
//!
//! ```text
//! 0x03c  u16  pointer to PE signature      = 0x80
//! 0x084  u16  Machine                      (0x80 + 4)
//! 0x086  u16  NumberOfSections             (0x80 + 6)
//! 0x098  u16  Magic                        (optional header, 0x80 + 24)
//! 0x0f4  u32  NumberOfRvaAndSizes          (0x98 + 92)
//! 0x168  u32  CLR directory RVA            (0x98 + 208)
//! 0x178       section table                (0x98 + 96 + 16 * 8)
//! 0x218  u32  COR flags                    (0x200 + 0x8 + 16)
//! ```
//!
//! PE32+ moves the directory count to `0x98 + 108` and the CLR entry to
//! `0x98 + 224`.

pub const COFF_OFFSET: usize = 0x80;
pub const OPTIONAL_OFFSET: usize = COFF_OFFSET + 24;
pub const TEXT_VIRTUAL_ADDRESS: u32 = 0x2000;
pub const TEXT_VIRTUAL_SIZE: u32 = 0x1000;
pub const TEXT_RAW_POINTER: u32 = 0x200;
pub const CLR_RVA: u32 = TEXT_VIRTUAL_ADDRESS + 8;
pub const COR_FLAGS_AT: usize = (TEXT_RAW_POINTER + 8 + 16) as usize;

pub const ILONLY: u32 = 0x0000_0001;
pub const REQUIRED_32BIT: u32 = 0x0000_0002;
pub const PREFERRED_32BIT: u32 = 0x0002_0000;

#[derive(Debug, Clone)]
pub struct PeFixture {
    bytes: Vec<u8>,
    plus: bool,
}

impl PeFixture {
    fn base(machine: u16, magic: u16, plus: bool) -> Self {
        let mut fixture = PeFixture {
            bytes: vec![0u8; 0x400],
            plus,
        };
        fixture.bytes[0..2].copy_from_slice(b"MZ");
        fixture.put_u16(0x3c, COFF_OFFSET as u16);
        fixture.bytes[COFF_OFFSET..COFF_OFFSET + 4].copy_from_slice(b"PE\0\0");
        fixture
            .machine(machine)
            .magic(magic)
            .directories(16)
            .section_count(1)
            .section(0, TEXT_VIRTUAL_SIZE, TEXT_VIRTUAL_ADDRESS, TEXT_RAW_POINTER)
    }

    pub fn pe32() -> Self {
        Self::base(0x14c, 0x10b, false)
    }

    pub fn pe32_plus() -> Self {
        Self::base(0x8664, 0x20b, true)
    }

    /// PE32 image with a CLR header in `.text` carrying `flags`.
    pub fn managed32(flags: u32) -> Self {
        Self::pe32().clr_rva(CLR_RVA).cor_flags(flags)
    }

    pub fn machine(mut self, machine: u16) -> Self {
        self.put_u16(COFF_OFFSET + 4, machine);
        self
    }

    pub fn section_count(mut self, count: u16) -> Self {
        self.put_u16(COFF_OFFSET + 6, count);
        self
    }

    pub fn magic(mut self, magic: u16) -> Self {
        self.put_u16(OPTIONAL_OFFSET, magic);
        self
    }

    pub fn directories(mut self, count: u32) -> Self {
        let at = OPTIONAL_OFFSET + if self.plus { 108 } else { 92 };
        self.put_u32(at, count);
        self
    }

    pub fn clr_rva(mut self, rva: u32) -> Self {
        let at = OPTIONAL_OFFSET + if self.plus { 224 } else { 208 };
        self.put_u32(at, rva);
        self
    }

    pub fn cor_flags(mut self, flags: u32) -> Self {
        self.put_u32(COR_FLAGS_AT, flags);
        self
    }

    /// Writes section descriptor `index` of a table that follows 16 data
    /// directories.
    ///
    /// PE32+ images never reach the section scan (a CLR entry makes them
    /// Managed64 directly), so their table is placed at its true PE32+
    /// position, past the CLR entry at `0x98 + 224`, rather than where the
    /// PE32 arithmetic would look.
    pub fn section(
        mut self,
        index: usize,
        virtual_size: u32,
        virtual_address: u32,
        raw: u32,
    ) -> Self {
        let fixed = if self.plus { 112 } else { 96 };
        let at = OPTIONAL_OFFSET + fixed + 16 * 8 + index * 40;
        self.bytes[at..at + 8].copy_from_slice(b".text\0\0\0");
        self.put_u32(at + 8, virtual_size);
        self.put_u32(at + 12, virtual_address);
        self.put_u32(at + 16, 0x200);
        self.put_u32(at + 20, raw);
        self
    }

    pub fn put_u16(&mut self, at: usize, value: u16) {
        self.bytes[at..at + 2].copy_from_slice(&value.to_le_bytes());
    }

    pub fn put_u32(&mut self, at: usize, value: u32) {
        self.bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
    }

    pub fn truncated(mut self, len: usize) -> Self {
        self.bytes.truncate(len);
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
