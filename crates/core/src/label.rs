//! Semantic classes stamped into the mask raster.

use serde::{Deserialize, Serialize};

/// Semantic class of a mask pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Background,
    Ground,
    Fish,
    Shark,
    Coral,
}

impl Label {
    /// All labels in index order.
    pub const ALL: [Label; 5] = [
        Label::Background,
        Label::Ground,
        Label::Fish,
        Label::Shark,
        Label::Coral,
    ];

    /// Dense class index, stable across datasets.
    pub fn index(self) -> u8 {
        match self {
            Label::Background => 0,
            Label::Ground => 1,
            Label::Fish => 2,
            Label::Shark => 3,
            Label::Coral => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Label::Background => "background",
            Label::Ground => "ground",
            Label::Fish => "fish",
            Label::Shark => "shark",
            Label::Coral => "coral",
        }
    }
}

/// How labels are written as mask bytes.
///
/// `Index` stores the dense class index. `Spread` stores values far apart in
/// the 8-bit range so masks are readable in an ordinary image viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelEncoding {
    Index,
    #[default]
    Spread,
}

impl LabelEncoding {
    pub fn encode(self, label: Label) -> u8 {
        match self {
            LabelEncoding::Index => label.index(),
            LabelEncoding::Spread => match label {
                Label::Background => 0,
                Label::Ground => 100,
                Label::Fish => 200,
                Label::Shark => 255,
                Label::Coral => 150,
            },
        }
    }

    /// Inverse of [`encode`](Self::encode); `None` for bytes no label maps to.
    pub fn decode(self, value: u8) -> Option<Label> {
        Label::ALL.into_iter().find(|&l| self.encode(l) == value)
    }

    /// Parses `"index"` or `"spread"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "index" => Some(LabelEncoding::Index),
            "spread" => Some(LabelEncoding::Spread),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn encodings_are_injective_and_keep_background_zero() {
        for enc in [LabelEncoding::Index, LabelEncoding::Spread] {
            let values: HashSet<u8> = Label::ALL.iter().map(|&l| enc.encode(l)).collect();
            assert_eq!(values.len(), Label::ALL.len(), "{enc:?} collides");
            assert_eq!(enc.encode(Label::Background), 0);
        }
    }

    #[test]
    fn decode_inverts_encode() {
        for enc in [LabelEncoding::Index, LabelEncoding::Spread] {
            for label in Label::ALL {
                assert_eq!(enc.decode(enc.encode(label)), Some(label));
            }
        }
        assert_eq!(LabelEncoding::Spread.decode(7), None);
    }

    #[test]
    fn index_order_matches_all() {
        for (i, label) in Label::ALL.iter().enumerate() {
            assert_eq!(label.index() as usize, i);
        }
    }

    #[test]
    fn from_name_parses_known_encodings() {
        assert_eq!(LabelEncoding::from_name("index"), Some(LabelEncoding::Index));
        assert_eq!(LabelEncoding::from_name("spread"), Some(LabelEncoding::Spread));
        assert_eq!(LabelEncoding::from_name("rainbow"), None);
    }
}
