//! Swiss canton codes and name resolution.
//!
//! Geographic data arrives under several naming schemes: two-letter codes
//! in the accident rows, German names in the population table, and
//! multilingual labels ("Bern / Berne") in TopoJSON properties. Everything
//! resolves to the [`Canton`] enum at the parse boundary so the rest of
//! the crate never compares raw strings.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The 26 Swiss cantons, in constitutional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum Canton {
    ZH,
    BE,
    LU,
    UR,
    SZ,
    OW,
    NW,
    GL,
    ZG,
    FR,
    SO,
    BS,
    BL,
    SH,
    AR,
    AI,
    SG,
    GR,
    AG,
    TG,
    TI,
    VD,
    VS,
    NE,
    GE,
    JU,
}

/// Display names and their aliases across the national languages. Keys with
/// slashes also resolve per part, so "Berne" alone finds BE.
static NAME_TABLE: &[(&str, Canton)] = &[
    ("Zürich", Canton::ZH),
    ("Bern / Berne", Canton::BE),
    ("Luzern", Canton::LU),
    ("Uri", Canton::UR),
    ("Schwyz", Canton::SZ),
    ("Obwalden", Canton::OW),
    ("Nidwalden", Canton::NW),
    ("Glarus", Canton::GL),
    ("Zug", Canton::ZG),
    ("Fribourg / Freiburg", Canton::FR),
    ("Solothurn", Canton::SO),
    ("Basel-Stadt", Canton::BS),
    ("Basel-Landschaft", Canton::BL),
    ("Schaffhausen", Canton::SH),
    ("Appenzell Ausserrhoden", Canton::AR),
    ("Appenzell Innerrhoden", Canton::AI),
    ("St. Gallen", Canton::SG),
    ("Graubünden / Grigioni / Grischun", Canton::GR),
    ("Aargau", Canton::AG),
    ("Thurgau", Canton::TG),
    ("Ticino / Tessin", Canton::TI),
    ("Vaud / Waadt", Canton::VD),
    ("Valais / Wallis", Canton::VS),
    ("Neuchâtel / Neuenburg", Canton::NE),
    ("Genève / Genf", Canton::GE),
    ("Jura", Canton::JU),
];

static ALIASES: Lazy<HashMap<String, Canton>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (label, canton) in NAME_TABLE {
        map.insert(label.to_lowercase(), *canton);
        for part in label.split('/') {
            map.insert(part.trim().to_lowercase(), *canton);
        }
    }
    map
});

impl Canton {
    /// All cantons, in constitutional order.
    pub const ALL: [Canton; 26] = [
        Canton::ZH,
        Canton::BE,
        Canton::LU,
        Canton::UR,
        Canton::SZ,
        Canton::OW,
        Canton::NW,
        Canton::GL,
        Canton::ZG,
        Canton::FR,
        Canton::SO,
        Canton::BS,
        Canton::BL,
        Canton::SH,
        Canton::AR,
        Canton::AI,
        Canton::SG,
        Canton::GR,
        Canton::AG,
        Canton::TG,
        Canton::TI,
        Canton::VD,
        Canton::VS,
        Canton::NE,
        Canton::GE,
        Canton::JU,
    ];

    /// The official two-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            Canton::ZH => "ZH",
            Canton::BE => "BE",
            Canton::LU => "LU",
            Canton::UR => "UR",
            Canton::SZ => "SZ",
            Canton::OW => "OW",
            Canton::NW => "NW",
            Canton::GL => "GL",
            Canton::ZG => "ZG",
            Canton::FR => "FR",
            Canton::SO => "SO",
            Canton::BS => "BS",
            Canton::BL => "BL",
            Canton::SH => "SH",
            Canton::AR => "AR",
            Canton::AI => "AI",
            Canton::SG => "SG",
            Canton::GR => "GR",
            Canton::AG => "AG",
            Canton::TG => "TG",
            Canton::TI => "TI",
            Canton::VD => "VD",
            Canton::VS => "VS",
            Canton::NE => "NE",
            Canton::GE => "GE",
            Canton::JU => "JU",
        }
    }

    /// German display name, as shown in selectors and tooltips.
    pub fn name(&self) -> &'static str {
        match self {
            Canton::ZH => "Zürich",
            Canton::BE => "Bern",
            Canton::LU => "Luzern",
            Canton::UR => "Uri",
            Canton::SZ => "Schwyz",
            Canton::OW => "Obwalden",
            Canton::NW => "Nidwalden",
            Canton::GL => "Glarus",
            Canton::ZG => "Zug",
            Canton::FR => "Freiburg",
            Canton::SO => "Solothurn",
            Canton::BS => "Basel-Stadt",
            Canton::BL => "Basel-Landschaft",
            Canton::SH => "Schaffhausen",
            Canton::AR => "Appenzell Ausserrhoden",
            Canton::AI => "Appenzell Innerrhoden",
            Canton::SG => "St. Gallen",
            Canton::GR => "Graubünden",
            Canton::AG => "Aargau",
            Canton::TG => "Thurgau",
            Canton::TI => "Tessin",
            Canton::VD => "Waadt",
            Canton::VS => "Wallis",
            Canton::NE => "Neuenburg",
            Canton::GE => "Genf",
            Canton::JU => "Jura",
        }
    }

    /// Parse a two-letter code, tolerating surrounding whitespace and
    /// lowercase input. Unknown or foreign codes yield `None`.
    pub fn from_code(code: &str) -> Option<Canton> {
        let normalized = code.trim().to_uppercase();
        Canton::ALL.iter().find(|c| c.code() == normalized).copied()
    }

    /// Resolve a display name in any national language. Falls back to code
    /// parsing, so "GE", "Genf" and "Genève / Genf" all find the same
    /// canton.
    pub fn from_name(name: &str) -> Option<Canton> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(canton) = Canton::from_code(trimmed) {
            return Some(canton);
        }
        ALIASES.get(&trimmed.to_lowercase()).copied()
    }
}

impl fmt::Display for Canton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
