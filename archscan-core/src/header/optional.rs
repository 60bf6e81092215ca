use crate::header::{
    Header, OptionalMagic, CLR_DIRECTORY_INDEX, DATA_DIRECTORY_SIZE, MAX_DATA_DIRECTORIES,
    SECTION_TABLE_BASE,
};
use crate::{ByteSource, Error, Result};

/// The optional header, identified by its magic.
///
/// Only the magic is read eagerly. The directory count and the CLR entry are
/// read on demand so that a native image is never required to contain bytes
/// the classification does not look at.
#[derive(Debug, Clone, Copy)]
pub struct OptionalHeader {
    pub offset: u64,
    pub magic: OptionalMagic,
}

impl OptionalHeader {
    fn field(&self, relative: u64) -> Result<u64> {
        self.offset.checked_add(relative).ok_or(Error::OffsetOverflow)
    }

    /// `NumberOfRvaAndSizes`.
    pub fn directory_count<S: ByteSource + ?Sized>(&self, source: &mut S) -> Result<u32> {
        source.seek_to(self.field(self.magic.directory_count_offset())?)?;
        let count = source.read_u32()?;
        if count > MAX_DATA_DIRECTORIES {
            return Err(Error::TooManyDirectories(count));
        }
        log::debug!("NumberOfRvaAndSizes = {count}");
        Ok(count)
    }

    /// RVA of the CLR runtime header, or `None` when the table has no such
    /// entry or the entry is zero.
    pub fn clr_directory_rva<S: ByteSource + ?Sized>(
        &self,
        source: &mut S,
        directory_count: u32,
    ) -> Result<Option<u32>> {
        if directory_count <= CLR_DIRECTORY_INDEX {
            return Ok(None);
        }
        source.seek_to(self.field(self.magic.clr_directory_offset())?)?;
        let rva = source.read_u32()?;
        log::debug!("CLR directory RVA = {rva:#x}");
        Ok((rva != 0).then_some(rva))
    }

    /// First byte of the section table, which sits right after the data
    /// directories.
    pub fn section_table_offset(&self, directory_count: u32) -> Result<u64> {
        u64::from(directory_count)
            .checked_mul(DATA_DIRECTORY_SIZE)
            .and_then(|dirs| dirs.checked_add(SECTION_TABLE_BASE))
            .and_then(|rel| self.offset.checked_add(rel))
            .ok_or(Error::OffsetOverflow)
    }
}

impl Header for OptionalHeader {
    fn read_at<S: ByteSource + ?Sized>(source: &mut S, offset: u64) -> Result<Self> {
        source.seek_to(offset)?;
        let magic = OptionalMagic::try_from(source.read_u16()?)?;
        Ok(OptionalHeader { offset, magic })
    }
}
