use std::fmt;

/// Outcome of classifying one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryType {
    Unknown,
    Native32,
    Native64,
    Managed32,
    Managed64,
    ManagedAnyCpu,
    ManagedAnyCpuPrefer32,
}

impl BinaryType {
    pub const ALL: [BinaryType; 7] = [
        BinaryType::Unknown,
        BinaryType::Native32,
        BinaryType::Native64,
        BinaryType::Managed32,
        BinaryType::Managed64,
        BinaryType::ManagedAnyCpu,
        BinaryType::ManagedAnyCpuPrefer32,
    ];

    /// Stable identifier, used for filtering and machine-readable output.
    pub fn name(self) -> &'static str {
        match self {
            BinaryType::Unknown => "Unknown",
            BinaryType::Native32 => "Native32",
            BinaryType::Native64 => "Native64",
            BinaryType::Managed32 => "Managed32",
            BinaryType::Managed64 => "Managed64",
            BinaryType::ManagedAnyCpu => "ManagedAnyCpu",
            BinaryType::ManagedAnyCpuPrefer32 => "ManagedAnyCpuPrefer32",
        }
    }

    pub fn is_managed(self) -> bool {
        matches!(
            self,
            BinaryType::Managed32
                | BinaryType::Managed64
                | BinaryType::ManagedAnyCpu
                | BinaryType::ManagedAnyCpuPrefer32
        )
    }
}

impl std::str::FromStr for BinaryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BinaryType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown binary type: {}", s))
    }
}

impl fmt::Display for BinaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            BinaryType::Native32 => "native 32 bit binary",
            BinaryType::Native64 => "native 64 bit binary",
            BinaryType::Managed32 => "32 bit .NET assembly",
            BinaryType::Managed64 => "64 bit .NET assembly",
            BinaryType::ManagedAnyCpu => "platform agnostic .NET assembly",
            BinaryType::ManagedAnyCpuPrefer32 => {
                "platform agnostic .NET assembly preferring 32 bit"
            }
            BinaryType::Unknown => "could not be analysed",
        };
        write!(f, "{}", description)
    }
}
