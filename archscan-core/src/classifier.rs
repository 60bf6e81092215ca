//! The header walk that turns a PE image into a [`BinaryType`].
//!
//! [`try_classify`] is strict and reports the first inconsistency it finds.
//! [`classify`] and [`classify_file`] wrap it for bulk use: they never fail,
//! logging the reason and answering [`BinaryType::Unknown`] instead.

use crate::header::coff::CoffHeader;
use crate::header::optional::OptionalHeader;
use crate::header::{native_type, Header, PE_POINTER_OFFSET};
use crate::sections::resolve_rva;
use crate::{BinaryType, ByteSource, Error, PeReader, Result};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

/// Offset of `Flags` inside the CLR runtime header (`IMAGE_COR20_HEADER`).
pub const COR_FLAGS_OFFSET: u64 = 16;
/// `COMIMAGE_FLAGS_32BITREQUIRED`
pub const COR_FLAG_32BIT_REQUIRED: u32 = 0x0000_0002;
/// `COMIMAGE_FLAGS_32BITPREFERRED`
pub const COR_FLAG_32BIT_PREFERRED: u32 = 0x0002_0000;

/// Reads the COFF, optional and (for managed images) CLR headers of `source`.
pub fn try_classify<S: ByteSource + ?Sized>(source: &mut S) -> Result<BinaryType> {
    source.seek_to(PE_POINTER_OFFSET)?;
    let coff_offset = u64::from(source.read_u16()?);

    let coff = CoffHeader::read_at(source, coff_offset)?;
    let optional = OptionalHeader::read_at(source, coff.optional_header_offset()?)?;
    let native = native_type(coff.machine, optional.magic)?;
    log::debug!(
        "COFF header at {coff_offset:#x}: {:?}/{:?} -> {native:?}",
        coff.machine,
        optional.magic
    );

    let directory_count = optional.directory_count(source)?;
    let Some(clr_rva) = optional.clr_directory_rva(source, directory_count)? else {
        return Ok(native);
    };

    // A PE32+ image with a CLR header is an assembly forced to 64 bit; its
    // flags carry no further information.
    if native == BinaryType::Native64 {
        return Ok(BinaryType::Managed64);
    }

    let table_offset = optional.section_table_offset(directory_count)?;
    let cor_header = resolve_rva(source, table_offset, coff.number_of_sections, clr_rva)?;
    source.seek_to(
        cor_header
            .checked_add(COR_FLAGS_OFFSET)
            .ok_or(Error::OffsetOverflow)?,
    )?;
    let cor_flags = source.read_u32()?;
    log::debug!("COR header at {cor_header:#x}, flags {cor_flags:#010x}");

    Ok(managed_type(cor_flags))
}

/// Decodes the COR header flags of a PE32 assembly.
pub fn managed_type(cor_flags: u32) -> BinaryType {
    if cor_flags & COR_FLAG_32BIT_PREFERRED != 0 {
        BinaryType::ManagedAnyCpuPrefer32
    } else if cor_flags & COR_FLAG_32BIT_REQUIRED != 0 {
        BinaryType::Managed32
    } else {
        BinaryType::ManagedAnyCpu
    }
}

/// Classifies the image behind `reader`, answering `Unknown` on any failure.
pub fn classify<R: Read + Seek>(reader: R) -> BinaryType {
    let outcome = PeReader::new(reader).and_then(|mut source| try_classify(&mut source));
    settle(outcome, "<stream>")
}

/// Opens, classifies and closes the file at `path`, answering `Unknown` on any
/// failure.
pub fn classify_file<P: AsRef<Path>>(path: P) -> BinaryType {
    let path = path.as_ref();
    let outcome = File::open(path)
        .map_err(Error::from)
        .and_then(PeReader::new)
        .and_then(|mut source| try_classify(&mut source));
    settle(outcome, &path.display().to_string())
}

fn settle(outcome: Result<BinaryType>, origin: &str) -> BinaryType {
    match outcome {
        Ok(binary_type) => binary_type,
        Err(err) => {
            log::warn!("{origin}: {:?} error: {err}", err.kind());
            BinaryType::Unknown
        }
    }
}
