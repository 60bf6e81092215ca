use thiserror::Error;

/// Broad category of a classification failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file could not be opened, or a read ran past the end of the data.
    Io,
    /// A header field failed validation.
    Format,
}

/// Everything that can stop the header walk of a single image.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A seek or read would have crossed the end of the stream.
    #[error("read at offset {offset:#x} runs past the end of the data ({len:#x} bytes)")]
    Truncated { offset: u64, len: u64 },

    #[error("unknown \"Machine\" in COFF header: {0:#x}")]
    UnknownMachine(u16),

    #[error("unknown \"Magic\" in optional header: {0:#x}")]
    UnknownMagic(u16),

    #[error(
        "COFF header ({machine:#x}) and optional header ({magic:#x}) state differing architectures"
    )]
    ArchitectureMismatch { machine: u16, magic: u16 },

    #[error("optional header declares {0} data directories")]
    TooManyDirectories(u32),

    #[error("no section maps the CLR header at RVA {rva:#x}")]
    ClrHeaderNotMapped { rva: u32 },

    #[error("header offset arithmetic overflowed")]
    OffsetOverflow,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) | Error::Truncated { .. } => ErrorKind::Io,
            _ => ErrorKind::Format,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
