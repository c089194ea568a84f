//! Shared helpers for integration tests

#![allow(dead_code)]

use std::collections::BTreeSet;

use bubble_blast::sim::{BubbleColor, CellAddress, GameBubble, GridModel, HexGrid, PowerKind};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a grid from one string per section
///
/// `R G B O` colors, `L X S ?` lightning/bomb/star/unknown powers, `#` indestructible,
/// `.` empty. Ids are handed out from 1 in reading order.
pub fn grid(rows: &[&str]) -> HexGrid {
    let columns = rows.first().map_or(0, |r| r.len()) as u16;
    let mut grid = HexGrid::new(rows.len() as u16, columns);
    let mut next_id = 1;
    for (section, row) in rows.iter().enumerate() {
        for (item, ch) in row.chars().enumerate() {
            let Some(bubble) = bubble_for(ch, next_id) else {
                continue;
            };
            grid.place(CellAddress::new(section as u16, item as u16), bubble)
                .expect("row strings fit the grid");
            next_id += 1;
        }
    }
    grid
}

pub fn bubble_for(ch: char, id: u32) -> Option<GameBubble> {
    let bubble = match ch {
        'R' => GameBubble::colored(id, BubbleColor::Red),
        'G' => GameBubble::colored(id, BubbleColor::Green),
        'B' => GameBubble::colored(id, BubbleColor::Blue),
        'O' => GameBubble::colored(id, BubbleColor::Orange),
        'L' => GameBubble::power(id, PowerKind::Lightning),
        'X' => GameBubble::power(id, PowerKind::Bomb),
        'S' => GameBubble::power(id, PowerKind::Star),
        '?' => GameBubble::power(id, PowerKind::Unknown),
        '#' => GameBubble::indestructible(id),
        _ => return None,
    };
    Some(bubble)
}

/// The bubble at a cell, panicking if the cell is empty
pub fn at(grid: &HexGrid, section: u16, item: u16) -> GameBubble {
    *grid
        .bubble_at(CellAddress::new(section, item))
        .expect("cell is occupied")
}

pub fn cells(list: &[(u16, u16)]) -> BTreeSet<CellAddress> {
    list.iter().map(|&(s, i)| CellAddress::new(s, i)).collect()
}
