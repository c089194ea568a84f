//! Chain-reaction resolver
//!
//! Given the bubble that just snapped into the grid, works out everything that
//! leaves the grid this turn:
//! 1. power bubbles touching the snapped bubble fire, chaining into each other
//! 2. the snapped bubble's same-color group pops if it is big enough
//! 3. anything no longer hanging from the top section drops
//!
//! All bookkeeping lives in a `Turn` created per call, so nothing leaks
//! between turns.

use std::collections::{BTreeSet, VecDeque};

use super::bubble::{BubbleColor, BubbleKind, CellAddress, GameBubble, PowerKind};
use super::grid::GridModel;
use crate::consts::MIN_GROUP_SIZE;
use crate::settings::Settings;

/// Everything one `resolve` call did to the grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Power bubbles that fired
    pub activated: BTreeSet<CellAddress>,
    /// Removed by power patterns or the same-color group
    pub popped: BTreeSet<CellAddress>,
    /// Removed because they lost their path to the top section
    pub dropped: BTreeSet<CellAddress>,
    /// Whether the snapped bubble itself left the grid (popped or dropped)
    pub snapped_removed: bool,
}

impl Resolution {
    /// All removed cells (`popped` and `dropped` never overlap)
    pub fn removed(&self) -> BTreeSet<CellAddress> {
        self.popped.union(&self.dropped).copied().collect()
    }

    /// Cells touched this turn: activations plus removals
    pub fn count(&self) -> usize {
        self.activated.len() + self.popped.len() + self.dropped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Resolves the consequences of a snapped bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainResolver {
    min_group_size: usize,
}

impl Default for ChainResolver {
    fn default() -> Self {
        Self::new(MIN_GROUP_SIZE)
    }
}

impl ChainResolver {
    pub fn new(min_group_size: usize) -> Self {
        Self { min_group_size }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.min_group_size)
    }

    pub fn min_group_size(&self) -> usize {
        self.min_group_size
    }

    /// Resolve a snapped bubble, returning the number of cells activated plus removed
    pub fn resolve<G>(&self, grid: &mut G, snapped: &GameBubble) -> usize
    where
        G: GridModel + ?Sized,
    {
        self.resolve_detailed(grid, snapped).count()
    }

    /// Resolve a snapped bubble, returning the full breakdown
    ///
    /// Only colored bubbles resolve; anything else (or a bubble the grid does not
    /// hold) leaves the grid untouched.
    pub fn resolve_detailed<G>(&self, grid: &mut G, snapped: &GameBubble) -> Resolution
    where
        G: GridModel + ?Sized,
    {
        let BubbleKind::Colored(color) = snapped.kind else {
            log::debug!("Bubble {:?} is not colored, nothing to resolve", snapped.id);
            return Resolution::default();
        };
        let Some(start) = grid.address_of(snapped.id) else {
            log::debug!("Bubble {:?} is not on the grid, nothing to resolve", snapped.id);
            return Resolution::default();
        };

        let mut turn = Turn::new(grid);

        turn.fire_powers_around(start, snapped.kind);
        let group_popped = turn.pop_group(snapped, color, self.min_group_size);
        turn.drop_floating();

        let snapped_removed = turn.grid.address_of(snapped.id).is_none();
        let resolution = Resolution {
            activated: turn.activated,
            popped: turn.popped,
            dropped: turn.dropped,
            snapped_removed,
        };

        log::debug!(
            "Resolved {:?} at {:?}: {} activated, {} popped (group: {}), {} dropped",
            snapped.id,
            start,
            resolution.activated.len(),
            resolution.popped.len(),
            group_popped,
            resolution.dropped.len()
        );

        resolution
    }
}

/// One pending unit of chain-reaction work
#[derive(Debug)]
enum Step {
    /// Fire the power bubble at `at`, `cause` being whatever set it off
    Activate { at: CellAddress, cause: BubbleKind },
    /// Remove a fired bubble's pattern once everything it chained into has fired
    Clear(Vec<CellAddress>),
}

/// Per-call state: the grid being resolved and the activation/removal sets
struct Turn<'g, G: GridModel + ?Sized> {
    grid: &'g mut G,
    activated: BTreeSet<CellAddress>,
    popped: BTreeSet<CellAddress>,
    dropped: BTreeSet<CellAddress>,
}

impl<'g, G: GridModel + ?Sized> Turn<'g, G> {
    fn new(grid: &'g mut G) -> Self {
        Self {
            grid,
            activated: BTreeSet::new(),
            popped: BTreeSet::new(),
            dropped: BTreeSet::new(),
        }
    }

    fn power_at(&self, at: CellAddress) -> Option<PowerKind> {
        self.grid.bubble_at(at).and_then(GameBubble::power_kind)
    }

    /// Remove a removable bubble; empty cells and indestructibles are skipped
    fn take(&mut self, at: CellAddress) -> bool {
        let removable = match self.grid.bubble_at(at) {
            Some(bubble) => bubble.is_removable(),
            None => {
                log::trace!("{at:?} already empty");
                return false;
            }
        };
        removable && self.grid.remove(at).is_some()
    }

    /// Queue activations for every power bubble in `cells` that has not fired yet
    ///
    /// Pushed in reverse so they pop off the stack in `cells` order.
    fn push_chain(&self, work: &mut Vec<Step>, cells: &[CellAddress], cause: BubbleKind) {
        for &at in cells.iter().rev() {
            if self.power_at(at).is_some() && !self.activated.contains(&at) {
                work.push(Step::Activate { at, cause });
            }
        }
    }

    /// Phase 1: fire every power bubble touching the snapped cell
    fn fire_powers_around(&mut self, snapped_at: CellAddress, cause: BubbleKind) {
        let neighbors = self.grid.neighbors(snapped_at);
        let mut work = Vec::new();
        self.push_chain(&mut work, &neighbors, cause);

        while let Some(step) = work.pop() {
            match step {
                Step::Clear(cells) => {
                    for at in cells {
                        if self.take(at) {
                            self.popped.insert(at);
                        }
                    }
                }
                Step::Activate { at, cause } => self.activate(at, cause, &mut work),
            }
        }
    }

    fn activate(&mut self, at: CellAddress, cause: BubbleKind, work: &mut Vec<Step>) {
        if self.activated.contains(&at) {
            return;
        }
        // Gone already, or no longer a power bubble
        let Some(power) = self.power_at(at) else {
            return;
        };

        match power {
            PowerKind::Lightning => {
                self.activated.insert(at);
                let pattern = self.grid.section_of(at);
                log::trace!("Lightning at {at:?} (cause {cause:?}) clears {} cells", pattern.len());
                self.push_chain_then_clear(work, pattern, BubbleKind::Power(power));
            }
            PowerKind::Bomb => {
                self.activated.insert(at);
                let mut pattern = self.grid.neighbors(at);
                pattern.push(at);
                log::trace!("Bomb at {at:?} (cause {cause:?})");
                self.push_chain_then_clear(work, pattern, BubbleKind::Power(power));
            }
            PowerKind::Star => {
                self.activated.insert(at);
                self.activate_star(at, cause, work);
            }
            PowerKind::Unknown => {
                log::trace!("Inert power bubble at {at:?}");
            }
        }
    }

    fn push_chain_then_clear(&self, work: &mut Vec<Step>, pattern: Vec<CellAddress>, cause: BubbleKind) {
        let mut chained = Vec::new();
        self.push_chain(&mut chained, &pattern, cause);
        work.push(Step::Clear(pattern));
        work.extend(chained);
    }

    /// A star takes on the identity of whatever set it off
    fn activate_star(&mut self, at: CellAddress, cause: BubbleKind, work: &mut Vec<Step>) {
        match cause {
            BubbleKind::Colored(color) => {
                let mut pattern: Vec<_> = self
                    .grid
                    .occupied()
                    .into_iter()
                    .filter(|cell| {
                        self.grid
                            .bubble_at(*cell)
                            .and_then(GameBubble::color)
                            .is_some_and(|c| c == color)
                    })
                    .collect();
                pattern.push(at);
                log::trace!("Star at {at:?} clears {} {} bubbles", pattern.len() - 1, color.as_str());
                work.push(Step::Clear(pattern));
            }
            BubbleKind::Power(kind) => {
                let same_power: Vec<_> = self
                    .grid
                    .occupied()
                    .into_iter()
                    .filter(|cell| self.power_at(*cell) == Some(kind))
                    .collect();
                log::trace!("Star at {at:?} fires {} {kind:?} bubbles", same_power.len());
                work.push(Step::Clear(vec![at]));
                self.push_chain(work, &same_power, cause);
            }
            BubbleKind::Indestructible => {
                work.push(Step::Clear(vec![at]));
            }
        }
    }

    /// Phase 2: pop the snapped bubble's same-color group if it is large enough
    fn pop_group(&mut self, snapped: &GameBubble, color: BubbleColor, min_size: usize) -> bool {
        // Phase 1 may have taken the snapped bubble already
        let Some(start) = self.grid.address_of(snapped.id) else {
            return false;
        };

        let mut visited = BTreeSet::from([start]);
        let mut group = vec![start];
        let mut queue = VecDeque::from([start]);

        while let Some(at) = queue.pop_front() {
            for neighbor in self.grid.neighbors(at) {
                if visited.contains(&neighbor) {
                    continue;
                }
                let same_color = self
                    .grid
                    .bubble_at(neighbor)
                    .and_then(GameBubble::color)
                    .is_some_and(|c| c == color);
                if !same_color {
                    continue;
                }
                visited.insert(neighbor);
                group.push(neighbor);
                queue.push_back(neighbor);
            }
        }

        if group.len() < min_size {
            log::trace!("Group of {} at {start:?} too small to pop", group.len());
            return false;
        }

        for at in group {
            if self.take(at) {
                self.popped.insert(at);
            }
        }
        true
    }

    /// Phase 3: drop every bubble with no path to the top section
    ///
    /// Paths may run through indestructible bubbles, but those only stay put
    /// when cut off; they never hold anything up on their own.
    fn drop_floating(&mut self) {
        let mut floating = self.grid.occupied();
        let mut queue = VecDeque::new();

        for at in self.grid.top_section() {
            if floating.remove(&at) {
                queue.push_back(at);
            }
        }

        while let Some(at) = queue.pop_front() {
            for neighbor in self.grid.neighbors(at) {
                if floating.remove(&neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        for at in floating {
            if self.take(at) {
                self.dropped.insert(at);
            }
        }
    }
}
