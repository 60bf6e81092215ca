use archscan_core::BinaryType;
use bitflags::bitflags;
use std::str::FromStr;

bitflags! {
    /// Set of classifications to display. The empty set shows everything.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BinaryTypeFilter: u32 {
        const NATIVE32 = 0x01;
        const NATIVE64 = 0x02;
        const MANAGED32 = 0x04;
        const MANAGED64 = 0x08;
        const ANY_CPU = 0x10;
        const ANY_CPU_PREFER32 = 0x20;
        const UNKNOWN = 0x40;
    }
}

impl BinaryTypeFilter {
    pub const MATCH_ALL: Self = Self::empty();

    pub fn for_type(binary_type: BinaryType) -> Self {
        match binary_type {
            BinaryType::Native32 => Self::NATIVE32,
            BinaryType::Native64 => Self::NATIVE64,
            BinaryType::Managed32 => Self::MANAGED32,
            BinaryType::Managed64 => Self::MANAGED64,
            BinaryType::ManagedAnyCpu => Self::ANY_CPU,
            BinaryType::ManagedAnyCpuPrefer32 => Self::ANY_CPU_PREFER32,
            BinaryType::Unknown => Self::UNKNOWN,
        }
    }

    pub fn matches(self, binary_type: BinaryType) -> bool {
        self.is_empty() || self.contains(Self::for_type(binary_type))
    }

    fn parse_term(term: &str) -> Result<Self, String> {
        if let Some(bits) = parse_number(term) {
            return Self::from_bits(bits).ok_or_else(|| format!("Unknown filter bits: {:#x}", bits));
        }
        if let Ok(binary_type) = BinaryType::from_str(term) {
            return Ok(Self::for_type(binary_type));
        }
        match term.to_lowercase().as_str() {
            "all" => Ok(Self::MATCH_ALL),
            "dotnet32" => Ok(Self::MANAGED32),
            "dotnet64" => Ok(Self::MANAGED64),
            "anycpu" => Ok(Self::ANY_CPU),
            "anycpu32preferred" | "anycpuprefer32" => Ok(Self::ANY_CPU_PREFER32),
            _ => Err(format!("Unknown filter: {}", term)),
        }
    }
}

fn parse_number(term: &str) -> Option<u32> {
    match term.strip_prefix("0x").or_else(|| term.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => term.parse().ok(),
    }
}

/// Accepts `all`, a comma-separated list of type names, or a numeric mask.
/// A leading `:` is ignored so `-f:native32` works.
impl FromStr for BinaryTypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix(':').unwrap_or(s);
        let mut filter = Self::MATCH_ALL;
        let mut any = false;
        for term in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let parsed = Self::parse_term(term)?;
            if parsed.is_empty() {
                // "all" anywhere wins
                return Ok(Self::MATCH_ALL);
            }
            filter |= parsed;
            any = true;
        }
        if !any {
            return Err("Empty filter".to_string());
        }
        Ok(filter)
    }
}
