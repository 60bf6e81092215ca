use crate::{ByteSource, Error, Result};

/// Size of one `IMAGE_SECTION_HEADER`.
pub const SECTION_DESCRIPTOR_SIZE: u64 = 40;

/// The part of a section header that maps virtual addresses to file offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionDescriptor {
    pub virtual_size: u32,
    pub virtual_address: u32,
    pub pointer_to_raw_data: u32,
}

impl SectionDescriptor {
    /// Reads the descriptor whose first byte is at `offset`.
    pub fn read_at<S: ByteSource + ?Sized>(source: &mut S, offset: u64) -> Result<Self> {
        source.seek_to(offset)?;
        source.skip(8)?; // Name
        let virtual_size = source.read_u32()?;
        let virtual_address = source.read_u32()?;
        source.skip(4)?; // SizeOfRawData
        let pointer_to_raw_data = source.read_u32()?;

        Ok(SectionDescriptor {
            virtual_size,
            virtual_address,
            pointer_to_raw_data,
        })
    }

    pub fn contains(&self, rva: u32) -> bool {
        let start = u64::from(self.virtual_address);
        let end = start + u64::from(self.virtual_size);
        (start..end).contains(&u64::from(rva))
    }

    /// File offset of `rva` relative to this section's raw data.
    pub fn file_offset(&self, rva: u32) -> Result<u64> {
        let delta = rva
            .checked_sub(self.virtual_address)
            .ok_or(Error::OffsetOverflow)?;
        u64::from(self.pointer_to_raw_data)
            .checked_add(u64::from(delta))
            .ok_or(Error::OffsetOverflow)
    }
}

/// Translates `rva` to a file offset by scanning the `count` descriptors that
/// start at `table_offset`. The first section in table order that contains
/// the address wins.
pub fn resolve_rva<S: ByteSource + ?Sized>(
    source: &mut S,
    table_offset: u64,
    count: u16,
    rva: u32,
) -> Result<u64> {
    for index in 0..count {
        let offset = u64::from(index)
            .checked_mul(SECTION_DESCRIPTOR_SIZE)
            .and_then(|rel| table_offset.checked_add(rel))
            .ok_or(Error::OffsetOverflow)?;
        let section = SectionDescriptor::read_at(source, offset)?;
        if section.contains(rva) {
            log::debug!(
                "RVA {rva:#x} lies in section {index} ({:#x}+{:#x} -> {:#x})",
                section.virtual_address,
                section.virtual_size,
                section.pointer_to_raw_data
            );
            return section.file_offset(rva);
        }
    }
    Err(Error::ClrHeaderNotMapped { rva })
}
