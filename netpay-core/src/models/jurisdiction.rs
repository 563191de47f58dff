use serde::{Deserialize, Serialize};

/// Work jurisdictions the estimator models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    Korea,
    Taiwan,
    Singapore,
    Japan,
    India,
    UnitedStates,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 6] = [
        Self::Korea,
        Self::Taiwan,
        Self::Singapore,
        Self::Japan,
        Self::India,
        Self::UnitedStates,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Korea => "KR",
            Self::Taiwan => "TW",
            Self::Singapore => "SG",
            Self::Japan => "JP",
            Self::India => "IN",
            Self::UnitedStates => "US",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "KR" => Some(Self::Korea),
            "TW" => Some(Self::Taiwan),
            "SG" => Some(Self::Singapore),
            "JP" => Some(Self::Japan),
            "IN" => Some(Self::India),
            "US" => Some(Self::UnitedStates),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Korea => "Korea",
            Self::Taiwan => "Taiwan",
            Self::Singapore => "Singapore",
            Self::Japan => "Japan",
            Self::India => "India",
            Self::UnitedStates => "United States",
        }
    }

    /// ISO-style code of the local currency.
    pub fn currency_code(&self) -> &'static str {
        match self {
            Self::Korea => "KRW",
            Self::Taiwan => "NTD",
            Self::Singapore => "SGD",
            Self::Japan => "JPY",
            Self::India => "INR",
            Self::UnitedStates => "USD",
        }
    }
}
