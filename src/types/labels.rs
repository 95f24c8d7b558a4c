//! Detection labels and track identifiers
//!
//! Track identifiers are assigned by the external tracker and are the only
//! link between an entity in one frame and the same entity in the next.

// ============================================================================
// Track Identifier
// ============================================================================

/// Stable identifier assigned by the external tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackId(pub u64);

impl TrackId {
    /// Creates a new track identifier.
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for TrackId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for TrackId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Detection Label
// ============================================================================

/// Closed set of class labels produced by the detector.
///
/// The discriminants are the detector's class numbers. `Products` is not
/// emitted by the detector; it is the grouping key for the four product kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DetectionLabel {
    ProductA = 0,
    ProductB = 1,
    ProductC = 2,
    ProductD = 3,
    Person = 4,
    Hand = 5,
    Products = 6,
}

impl DetectionLabel {
    /// Maps a raw class number onto a label.
    pub const fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Self::ProductA),
            1 => Some(Self::ProductB),
            2 => Some(Self::ProductC),
            3 => Some(Self::ProductD),
            4 => Some(Self::Person),
            5 => Some(Self::Hand),
            6 => Some(Self::Products),
            _ => None,
        }
    }

    /// Returns the raw class number.
    #[inline]
    pub const fn class(self) -> u8 {
        self as u8
    }

    /// Returns the product kind for product labels.
    pub const fn product_kind(self) -> Option<ProductKind> {
        match self {
            Self::ProductA => Some(ProductKind::A),
            Self::ProductB => Some(ProductKind::B),
            Self::ProductC => Some(ProductKind::C),
            Self::ProductD => Some(ProductKind::D),
            _ => None,
        }
    }

    /// Returns the label entities of this class are grouped under.
    pub const fn group(self) -> Self {
        match self {
            Self::ProductA | Self::ProductB | Self::ProductC | Self::ProductD => Self::Products,
            other => other,
        }
    }
}

// ============================================================================
// Product Kind
// ============================================================================

/// The product sub-types the detector distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProductKind {
    A,
    B,
    C,
    D,
}

impl ProductKind {
    /// Display name used to build product codes.
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "cocas",
            Self::B => "ememes",
            Self::C => "pringles",
            Self::D => "doritos",
        }
    }

    /// Display color (BGR order, as the renderer expects).
    pub const fn color(self) -> [u8; 3] {
        match self {
            Self::A => [0, 0, 255],
            Self::B => [20, 230, 230],
            Self::C => [220, 100, 180],
            Self::D => [10, 100, 205],
        }
    }

    /// Returns the detector label for this kind.
    pub const fn label(self) -> DetectionLabel {
        match self {
            Self::A => DetectionLabel::ProductA,
            Self::B => DetectionLabel::ProductB,
            Self::C => DetectionLabel::ProductC,
            Self::D => DetectionLabel::ProductD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip_through_class() {
        for class in 0..=6 {
            let label = DetectionLabel::from_class(class).unwrap();
            assert_eq!(label.class() as i64, class);
        }
        assert_eq!(DetectionLabel::from_class(7), None);
        assert_eq!(DetectionLabel::from_class(-1), None);
    }

    #[test]
    fn test_product_labels_group_under_products() {
        assert_eq!(DetectionLabel::ProductC.group(), DetectionLabel::Products);
        assert_eq!(DetectionLabel::Person.group(), DetectionLabel::Person);
        assert_eq!(DetectionLabel::Hand.product_kind(), None);
        assert_eq!(
            DetectionLabel::ProductD.product_kind().map(ProductKind::name),
            Some("doritos")
        );
    }
}
