pub mod coff;
pub mod optional;

use crate::{BinaryType, ByteSource, Error, Result};

/// Offset of the 16-bit pointer to the PE signature / COFF header.
pub const PE_POINTER_OFFSET: u64 = 0x3c;
/// Signature plus COFF file header; the optional header follows immediately.
pub const COFF_HEADER_SIZE: u64 = 24;
/// Data directory index of the CLR runtime header.
pub const CLR_DIRECTORY_INDEX: u32 = 14;
/// Largest directory table a well-formed image carries.
pub const MAX_DATA_DIRECTORIES: u32 = 16;
/// Size of one `IMAGE_DATA_DIRECTORY` entry.
pub const DATA_DIRECTORY_SIZE: u64 = 8;
/// Fixed PE32 optional header fields preceding the data directories.
pub const SECTION_TABLE_BASE: u64 = 96;

pub trait Header: Sized + std::fmt::Debug {
    /// Reads the header whose first byte is at `offset`.
    fn read_at<S: ByteSource + ?Sized>(source: &mut S, offset: u64) -> Result<Self>;
}

/// COFF `Machine` values this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Machine {
    I386,
    Amd64,
}

impl Machine {
    pub const I386_RAW: u16 = 0x14c;
    pub const AMD64_RAW: u16 = 0x8664;

    pub fn raw(self) -> u16 {
        match self {
            Machine::I386 => Self::I386_RAW,
            Machine::Amd64 => Self::AMD64_RAW,
        }
    }
}

impl TryFrom<u16> for Machine {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            Self::I386_RAW => Ok(Machine::I386),
            Self::AMD64_RAW => Ok(Machine::Amd64),
            other => Err(Error::UnknownMachine(other)),
        }
    }
}

/// Optional header `Magic`, selecting the PE32 or PE32+ layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionalMagic {
    Pe32,
    Pe32Plus,
}

impl OptionalMagic {
    pub const PE32_RAW: u16 = 0x10b;
    pub const PE32_PLUS_RAW: u16 = 0x20b;

    pub fn raw(self) -> u16 {
        match self {
            OptionalMagic::Pe32 => Self::PE32_RAW,
            OptionalMagic::Pe32Plus => Self::PE32_PLUS_RAW,
        }
    }

    /// Offset of `NumberOfRvaAndSizes` from the start of the optional header.
    pub fn directory_count_offset(self) -> u64 {
        match self {
            OptionalMagic::Pe32 => 92,
            OptionalMagic::Pe32Plus => 108,
        }
    }

    /// Offset of the CLR runtime header directory entry.
    pub fn clr_directory_offset(self) -> u64 {
        match self {
            OptionalMagic::Pe32 => 208,
            OptionalMagic::Pe32Plus => 224,
        }
    }
}

impl TryFrom<u16> for OptionalMagic {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            Self::PE32_RAW => Ok(OptionalMagic::Pe32),
            Self::PE32_PLUS_RAW => Ok(OptionalMagic::Pe32Plus),
            other => Err(Error::UnknownMagic(other)),
        }
    }
}

/// Native type implied by the file header and optional header together.
pub fn native_type(machine: Machine, magic: OptionalMagic) -> Result<BinaryType> {
    match (machine, magic) {
        (Machine::I386, OptionalMagic::Pe32) => Ok(BinaryType::Native32),
        (Machine::Amd64, OptionalMagic::Pe32Plus) => Ok(BinaryType::Native64),
        _ => Err(Error::ArchitectureMismatch {
            machine: machine.raw(),
            magic: magic.raw(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn machine_and_magic_must_agree() {
        assert_eq!(
            native_type(Machine::I386, OptionalMagic::Pe32).unwrap(),
            BinaryType::Native32
        );
        assert_eq!(
            native_type(Machine::Amd64, OptionalMagic::Pe32Plus).unwrap(),
            BinaryType::Native64
        );
        assert!(matches!(
            native_type(Machine::I386, OptionalMagic::Pe32Plus),
            Err(Error::ArchitectureMismatch {
                machine: 0x14c,
                magic: 0x20b
            })
        ));
        assert!(matches!(
            native_type(Machine::Amd64, OptionalMagic::Pe32),
            Err(Error::ArchitectureMismatch { .. })
        ));
    }

    #[test]
    fn unrecognised_codes_are_rejected() {
        assert!(matches!(Machine::try_from(0xaa64), Err(Error::UnknownMachine(0xaa64))));
        assert!(matches!(OptionalMagic::try_from(0x107), Err(Error::UnknownMagic(0x107))));
    }
}
