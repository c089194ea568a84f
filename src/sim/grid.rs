//! Grid model: bubble placement, adjacency and removal
//!
//! The resolver only talks to a grid through `GridModel`. `HexGrid` is the
//! stock implementation: an offset hex layout where odd sections are shifted
//! right by half a cell and hold one cell fewer than even sections.
//!
//! ```text
//! section 0:  o o o o
//! section 1:   o o o
//! section 2:  o o o o
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};

use thiserror::Error;

use super::bubble::{BubbleId, CellAddress, GameBubble};
use crate::settings::Settings;

/// Grid collaborator contract consumed by the chain-reaction resolver
///
/// Lookups of missing cells return `None`/empty; `remove` on an empty cell is a no-op.
pub trait GridModel {
    /// Cell currently holding the bubble with this id
    fn address_of(&self, id: BubbleId) -> Option<CellAddress>;
    /// In-bounds neighbors of a cell (occupied or not)
    fn neighbors(&self, at: CellAddress) -> Vec<CellAddress>;
    /// Bubble at a cell
    fn bubble_at(&self, at: CellAddress) -> Option<&GameBubble>;
    /// Every cell currently holding a bubble
    fn occupied(&self) -> BTreeSet<CellAddress>;
    /// Every cell of the section containing `at`
    fn section_of(&self, at: CellAddress) -> Vec<CellAddress>;
    /// Take the bubble out of a cell (idempotent)
    fn remove(&mut self, at: CellAddress) -> Option<GameBubble>;
    /// Every cell of the top section
    fn top_section(&self) -> Vec<CellAddress>;
}

/// Errors from placing bubbles into a `HexGrid`
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell {0:?} is outside the grid")]
    OutOfBounds(CellAddress),
    #[error("cell {0:?} is already occupied")]
    Occupied(CellAddress),
    #[error("bubble {0:?} is already on the grid")]
    DuplicateBubble(BubbleId),
}

/// Offset hex grid backed by ordered storage
#[derive(Debug, Clone)]
pub struct HexGrid {
    sections: u16,
    columns: u16,
    cells: BTreeMap<CellAddress, GameBubble>,
    /// Reverse lookup, kept in sync with `cells`
    index: HashMap<BubbleId, CellAddress>,
}

impl HexGrid {
    /// Create an empty grid with `sections` rows; even sections hold `columns` cells
    pub fn new(sections: u16, columns: u16) -> Self {
        Self {
            sections,
            columns,
            cells: BTreeMap::new(),
            index: HashMap::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.grid_sections, settings.grid_columns)
    }

    pub fn sections(&self) -> u16 {
        self.sections
    }

    /// Number of cells in a section (odd sections are one short)
    pub fn section_len(&self, section: u16) -> u16 {
        if section % 2 == 0 {
            self.columns
        } else {
            self.columns.saturating_sub(1)
        }
    }

    /// Returns true if the address names a real cell of this grid
    pub fn contains(&self, at: CellAddress) -> bool {
        at.section < self.sections && at.item < self.section_len(at.section)
    }

    /// Put a bubble into an empty cell
    pub fn place(&mut self, at: CellAddress, bubble: GameBubble) -> Result<(), GridError> {
        if !self.contains(at) {
            return Err(GridError::OutOfBounds(at));
        }
        if self.cells.contains_key(&at) {
            return Err(GridError::Occupied(at));
        }
        if self.index.contains_key(&bubble.id) {
            return Err(GridError::DuplicateBubble(bubble.id));
        }
        self.index.insert(bubble.id, at);
        self.cells.insert(at, bubble);
        Ok(())
    }

    /// Number of bubbles on the grid
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bubbles in address order
    pub fn bubbles(&self) -> impl Iterator<Item = (CellAddress, &GameBubble)> {
        self.cells.iter().map(|(at, bubble)| (*at, bubble))
    }

    fn cell_if_valid(&self, section: i32, item: i32) -> Option<CellAddress> {
        if section < 0 || item < 0 || section > u16::MAX as i32 || item > u16::MAX as i32 {
            return None;
        }
        let at = CellAddress::new(section as u16, item as u16);
        self.contains(at).then_some(at)
    }
}

impl GridModel for HexGrid {
    fn address_of(&self, id: BubbleId) -> Option<CellAddress> {
        self.index.get(&id).copied()
    }

    fn neighbors(&self, at: CellAddress) -> Vec<CellAddress> {
        if !self.contains(at) {
            return Vec::new();
        }
        let s = at.section as i32;
        let i = at.item as i32;

        // Even sections sit half a cell left of their odd neighbors
        let diagonal = if at.section % 2 == 0 {
            [i - 1, i]
        } else {
            [i, i + 1]
        };

        let mut out = Vec::with_capacity(6);
        for di in [i - 1, i + 1] {
            out.extend(self.cell_if_valid(s, di));
        }
        for ds in [-1, 1] {
            for di in diagonal {
                out.extend(self.cell_if_valid(s + ds, di));
            }
        }
        out
    }

    fn bubble_at(&self, at: CellAddress) -> Option<&GameBubble> {
        self.cells.get(&at)
    }

    fn occupied(&self) -> BTreeSet<CellAddress> {
        self.cells.keys().copied().collect()
    }

    fn section_of(&self, at: CellAddress) -> Vec<CellAddress> {
        if at.section >= self.sections {
            return Vec::new();
        }
        (0..self.section_len(at.section))
            .map(|item| CellAddress::new(at.section, item))
            .collect()
    }

    fn remove(&mut self, at: CellAddress) -> Option<GameBubble> {
        let bubble = self.cells.remove(&at)?;
        self.index.remove(&bubble.id);
        Some(bubble)
    }

    fn top_section(&self) -> Vec<CellAddress> {
        if self.sections == 0 {
            return Vec::new();
        }
        self.section_of(CellAddress::new(0, 0))
    }
}

/// Build a grid from one string per section
///
/// `R G B O` colors, `L X S ?` lightning/bomb/star/unknown powers, `#` indestructible,
/// `.` empty. Ids are handed out from 1 in reading order.
#[cfg(test)]
pub(crate) fn grid_from_rows(rows: &[&str]) -> HexGrid {
    use crate::sim::bubble::{BubbleColor, PowerKind};

    let columns = rows.first().map_or(0, |r| r.len()) as u16;
    let mut grid = HexGrid::new(rows.len() as u16, columns);
    let mut next_id = 1;
    for (section, row) in rows.iter().enumerate() {
        for (item, ch) in row.chars().enumerate() {
            let bubble = match ch {
                'R' => GameBubble::colored(next_id, BubbleColor::Red),
                'G' => GameBubble::colored(next_id, BubbleColor::Green),
                'B' => GameBubble::colored(next_id, BubbleColor::Blue),
                'O' => GameBubble::colored(next_id, BubbleColor::Orange),
                'L' => GameBubble::power(next_id, PowerKind::Lightning),
                'X' => GameBubble::power(next_id, PowerKind::Bomb),
                'S' => GameBubble::power(next_id, PowerKind::Star),
                '?' => GameBubble::power(next_id, PowerKind::Unknown),
                '#' => GameBubble::indestructible(next_id),
                _ => continue,
            };
            grid.place(CellAddress::new(section as u16, item as u16), bubble)
                .unwrap();
            next_id += 1;
        }
    }
    grid
}
