use crate::header::{Header, Machine, COFF_HEADER_SIZE};
use crate::{ByteSource, Error, Result};

/// The fields of the PE signature + COFF file header that classification needs.
///
/// `offset` is the value of the pointer at `0x3C`, i.e. the position of the
/// `PE\0\0` signature; the file header proper starts four bytes later.
#[derive(Debug, Clone, Copy)]
pub struct CoffHeader {
    pub offset: u64,

    /// Target machine; only i386 and AMD64 are accepted.
    pub machine: Machine,

    /// Number of entries in the section table.
    pub number_of_sections: u16,
}

impl CoffHeader {
    /// Position of the optional header, which directly follows this one.
    pub fn optional_header_offset(&self) -> Result<u64> {
        self.offset
            .checked_add(COFF_HEADER_SIZE)
            .ok_or(Error::OffsetOverflow)
    }
}

impl Header for CoffHeader {
    fn read_at<S: ByteSource + ?Sized>(source: &mut S, offset: u64) -> Result<Self> {
        source.seek_to(offset.checked_add(4).ok_or(Error::OffsetOverflow)?)?;
        let machine = Machine::try_from(source.read_u16()?)?;
        let number_of_sections = source.read_u16()?;

        Ok(CoffHeader {
            offset,
            machine,
            number_of_sections,
        })
    }
}
