//! Classifies PE images by target architecture and runtime by reading a
//! handful of header fields, without loading the image.

pub mod batch;
pub mod binary_type;
pub mod classifier;
pub mod discovery;
pub mod error;
pub mod header;
pub mod sections;
pub mod source;

pub use batch::*;
pub use binary_type::*;
pub use classifier::*;
pub use discovery::*;
pub use error::{Error, ErrorKind, Result};
pub use source::*;
