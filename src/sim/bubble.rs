//! Bubble and grid-cell types
//!
//! Bubbles are plain data records; identity is carried by `BubbleId`, never by
//! comparing payloads.

use serde::{Deserialize, Serialize};

/// Address of one grid slot: section (row) and item (column within the section)
///
/// Ordered by section first, so iteration over a set of addresses walks the grid
/// top to bottom, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellAddress {
    pub section: u16,
    pub item: u16,
}

impl CellAddress {
    #[inline]
    pub const fn new(section: u16, item: u16) -> Self {
        Self { section, item }
    }
}

/// Stable bubble identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BubbleId(pub u32);

/// Bubble colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BubbleColor {
    Blue,
    Red,
    Orange,
    Green,
}

impl BubbleColor {
    /// All colors, in palette order
    pub const ALL: [BubbleColor; 4] = [
        BubbleColor::Blue,
        BubbleColor::Red,
        BubbleColor::Orange,
        BubbleColor::Green,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BubbleColor::Blue => "blue",
            BubbleColor::Red => "red",
            BubbleColor::Orange => "orange",
            BubbleColor::Green => "green",
        }
    }
}

/// Special bubble powers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PowerKind {
    /// Clears its whole section
    Lightning,
    /// Clears itself and its neighbors
    Bomb,
    /// Clears everything matching whatever activated it
    Star,
    /// A power this core has no pattern for (inert)
    #[serde(other)]
    Unknown,
}

/// What a bubble is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BubbleKind {
    Colored(BubbleColor),
    Power(PowerKind),
    Indestructible, // Never removed; support can pass through it
}

/// A bubble entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameBubble {
    pub id: BubbleId,
    pub kind: BubbleKind,
}

impl GameBubble {
    pub fn colored(id: u32, color: BubbleColor) -> Self {
        Self {
            id: BubbleId(id),
            kind: BubbleKind::Colored(color),
        }
    }

    pub fn power(id: u32, power: PowerKind) -> Self {
        Self {
            id: BubbleId(id),
            kind: BubbleKind::Power(power),
        }
    }

    pub fn indestructible(id: u32) -> Self {
        Self {
            id: BubbleId(id),
            kind: BubbleKind::Indestructible,
        }
    }

    /// Color, if this is a colored bubble
    pub fn color(&self) -> Option<BubbleColor> {
        match self.kind {
            BubbleKind::Colored(color) => Some(color),
            _ => None,
        }
    }

    /// Power, if this is a power bubble
    pub fn power_kind(&self) -> Option<PowerKind> {
        match self.kind {
            BubbleKind::Power(power) => Some(power),
            _ => None,
        }
    }

    /// Returns true if any rule is allowed to take this bubble off the grid
    pub fn is_removable(&self) -> bool {
        !matches!(self.kind, BubbleKind::Indestructible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_cell_address_orders_by_section_then_item() {
        let cells: BTreeSet<_> = [
            CellAddress::new(1, 0),
            CellAddress::new(0, 5),
            CellAddress::new(0, 1),
        ]
        .into_iter()
        .collect();
        let ordered: Vec<_> = cells.into_iter().collect();
        assert_eq!(
            ordered,
            vec![
                CellAddress::new(0, 1),
                CellAddress::new(0, 5),
                CellAddress::new(1, 0)
            ]
        );
    }

    #[test]
    fn test_unknown_power_deserializes() {
        let kind: PowerKind = serde_json::from_str("\"Indestructible\"").unwrap();
        assert_eq!(kind, PowerKind::Unknown);
        let kind: PowerKind = serde_json::from_str("\"Bomb\"").unwrap();
        assert_eq!(kind, PowerKind::Bomb);
    }

    #[test]
    fn test_indestructible_not_removable() {
        assert!(!GameBubble::indestructible(1).is_removable());
        assert!(GameBubble::colored(2, BubbleColor::Red).is_removable());
        assert!(GameBubble::power(3, PowerKind::Star).is_removable());
    }
}
