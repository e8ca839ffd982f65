//! Closed category tables for the categorical model features.
//!
//! Each table maps a fixed set of labels to dense, zero-based integer codes.
//! The codes must match the encoding the model was trained with; nothing here
//! can verify that, so the tables are the single source of truth for it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ResaleError, Result};

/// A closed label → code table.
pub trait Category: Copy + Eq + Sized + 'static {
    /// Table name used in error messages.
    const TABLE: &'static str;
    /// Every entry, in code order.
    const ALL: &'static [Self];
    /// Every label, in code order.
    const LABELS: &'static [&'static str];

    /// Human-readable label.
    fn label(&self) -> &'static str;

    /// Integer code used by the model.
    fn code(&self) -> u32;

    /// Look up an entry by its label.
    fn from_label(label: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|entry| entry.label() == label)
            .ok_or_else(|| ResaleError::UnknownCategory {
                table: Self::TABLE,
                label: label.to_string(),
            })
    }

    /// Look up an entry by its code.
    fn from_code(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Encode a label straight to its code.
    fn encode(label: &str) -> Result<u32> {
        Self::from_label(label).map(|entry| entry.code())
    }
}

macro_rules! category_table {
    (
        $(#[$meta:meta])*
        $name:ident, $table:literal {
            $( $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $variant ),+
        }

        impl Category for $name {
            const TABLE: &'static str = $table;
            const ALL: &'static [Self] = &[$( $name::$variant ),+];
            const LABELS: &'static [&'static str] = &[$( $label ),+];

            fn label(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            fn code(&self) -> u32 {
                *self as u32
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ResaleError;

            fn from_str(s: &str) -> Result<Self> {
                Self::from_label(s)
            }
        }
    };
}

category_table! {
    /// Town the flat is located in.
    Town, "town" {
        AngMoKio => "ANG MO KIO",
        Bedok => "BEDOK",
        Bishan => "BISHAN",
        BukitBatok => "BUKIT BATOK",
        BukitMerah => "BUKIT MERAH",
        BukitPanjang => "BUKIT PANJANG",
        BukitTimah => "BUKIT TIMAH",
        CentralArea => "CENTRAL AREA",
        ChoaChuKang => "CHOA CHU KANG",
        Clementi => "CLEMENTI",
        Geylang => "GEYLANG",
        Hougang => "HOUGANG",
        JurongEast => "JURONG EAST",
        JurongWest => "JURONG WEST",
        KallangWhampoa => "KALLANG/WHAMPOA",
        LimChuKang => "LIM CHU KANG",
        MarineParade => "MARINE PARADE",
        PasirRis => "PASIR RIS",
        Punggol => "PUNGGOL",
        Queenstown => "QUEENSTOWN",
        Sembawang => "SEMBAWANG",
        Sengkang => "SENGKANG",
        Serangoon => "SERANGOON",
        Tampines => "TAMPINES",
        ToaPayoh => "TOA PAYOH",
        Woodlands => "WOODLANDS",
        Yishun => "YISHUN",
    }
}

category_table! {
    /// Number of rooms (flat type).
    FlatType, "flat type" {
        OneRoom => "1 ROOM",
        TwoRoom => "2 ROOM",
        ThreeRoom => "3 ROOM",
        FourRoom => "4 ROOM",
        FiveRoom => "5 ROOM",
        Executive => "EXECUTIVE",
        MultiGeneration => "MULTI-GENERATION",
    }
}

category_table! {
    /// Band of three floors the flat sits in.
    StoreyRange, "storey range" {
        Storey01To03 => "01 TO 03",
        Storey04To06 => "04 TO 06",
        Storey07To09 => "07 TO 09",
        Storey10To12 => "10 TO 12",
        Storey13To15 => "13 TO 15",
        Storey16To18 => "16 TO 18",
        Storey19To21 => "19 TO 21",
        Storey22To24 => "22 TO 24",
        Storey25To27 => "25 TO 27",
        Storey28To30 => "28 TO 30",
        Storey31To33 => "31 TO 33",
        Storey34To36 => "34 TO 36",
        Storey37To39 => "37 TO 39",
        Storey40To42 => "40 TO 42",
        Storey43To45 => "43 TO 45",
        Storey46To48 => "46 TO 48",
        Storey49To51 => "49 TO 51",
    }
}

category_table! {
    /// Flat model (building design).
    FlatModel, "flat model" {
        TwoRoom => "2-ROOM",
        ThreeGen => "3GEN",
        AdjoinedFlat => "ADJOINED FLAT",
        Apartment => "APARTMENT",
        Dbss => "DBSS",
        Improved => "IMPROVED",
        ImprovedMaisonette => "IMPROVED-MAISONETTE",
        Maisonette => "MAISONETTE",
        ModelA => "MODEL A",
        ModelAMaisonette => "MODEL A-MAISONETTE",
        ModelA2 => "MODEL A2",
        MultiGeneration => "MULTI GENERATION",
        NewGeneration => "NEW GENERATION",
        PremiumApartment => "PREMIUM APARTMENT",
        PremiumApartmentLoft => "PREMIUM APARTMENT LOFT",
        PremiumMaisonette => "PREMIUM MAISONETTE",
        Simplified => "SIMPLIFIED",
        Standard => "STANDARD",
        Terrace => "TERRACE",
        TypeS1 => "TYPE S1",
        TypeS2 => "TYPE S2",
    }
}

/// Runtime selector over the four category tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Town,
    FlatType,
    StoreyRange,
    FlatModel,
}

impl CategoryKind {
    /// All tables.
    pub const ALL: [CategoryKind; 4] = [
        CategoryKind::Town,
        CategoryKind::FlatType,
        CategoryKind::StoreyRange,
        CategoryKind::FlatModel,
    ];

    /// Table name, as used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            CategoryKind::Town => Town::TABLE,
            CategoryKind::FlatType => FlatType::TABLE,
            CategoryKind::StoreyRange => StoreyRange::TABLE,
            CategoryKind::FlatModel => FlatModel::TABLE,
        }
    }

    /// Labels in code order; these are the only values a selection widget offers.
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            CategoryKind::Town => Town::LABELS,
            CategoryKind::FlatType => FlatType::LABELS,
            CategoryKind::StoreyRange => StoreyRange::LABELS,
            CategoryKind::FlatModel => FlatModel::LABELS,
        }
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.labels().len()
    }

    /// Encode a label using this table.
    pub fn encode(&self, label: &str) -> Result<u32> {
        match self {
            CategoryKind::Town => Town::encode(label),
            CategoryKind::FlatType => FlatType::encode(label),
            CategoryKind::StoreyRange => StoreyRange::encode(label),
            CategoryKind::FlatModel => FlatModel::encode(label),
        }
    }
}

/// Encode `label` with the given table.
///
/// Fails with [`ResaleError::UnknownCategory`] when the label is not in the table.
pub fn encode(table: CategoryKind, label: &str) -> Result<u32> {
    table.encode(label)
}
