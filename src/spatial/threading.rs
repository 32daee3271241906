//! Threading patterns assigning each cell of the warp to one of the two blocks

use crate::algorithm::block::BlockId;
use crate::io::error::{Result, invalid_argument};
use std::fmt;
use std::str::FromStr;

/// Active pattern of the interactive loom
const SHORT_PATTERN: [u8; 11] = [1, 1, 1, 1, 2, 1, 2, 1, 2, 1, 2];

/// Extended pattern used for full-width carpets and the default
const FULL_PATTERN: [u8; 43] = [
    1, 1, 1, 1, 2, 1, 2, 1, 2, 1, 2, //
    1, 1, 2, 2, 1, 1, 2, 2, 1, 1, 2, 2, //
    1, 1, 1, 1, 2, 2, 2, 2, 1, 1, 1, 1, 2, 2, 2, 2, 1, 1, 1, 1,
];

/// Non-empty sequence of block selectors, one per cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Threading {
    cells: Vec<BlockId>,
}

impl Threading {
    /// Build a threading from numeric selectors
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the sequence is empty or holds a selector
    /// other than 1 or 2
    pub fn new(selectors: &[u8]) -> Result<Self> {
        if selectors.is_empty() {
            return Err(invalid_argument(
                "threading",
                &"[]",
                &"pattern must contain at least one cell",
            ));
        }
        let cells = selectors
            .iter()
            .map(|&selector| BlockId::from_selector(selector))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { cells })
    }

    /// The eleven-cell pattern the loom screen uses
    pub fn short() -> Self {
        Self {
            cells: SHORT_PATTERN.iter().copied().map(selector_to_block).collect(),
        }
    }

    /// The extended forty-three-cell pattern
    pub fn full() -> Self {
        Self {
            cells: FULL_PATTERN.iter().copied().map(selector_to_block).collect(),
        }
    }

    /// Parse `short`, `full`, or a comma separated list of selectors
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for unknown names, empty or non-numeric
    /// entries, or selectors other than 1 or 2
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim() {
            "short" => Ok(Self::short()),
            "full" => Ok(Self::full()),
            list => {
                let selectors = list
                    .split(',')
                    .map(str::trim)
                    .map(|entry| {
                        if entry.is_empty() {
                            return Err(invalid_argument(
                                "threading",
                                &list,
                                &"empty entry between commas",
                            ));
                        }
                        entry.parse::<u8>().map_err(|e| {
                            invalid_argument("threading", &entry, &format!("not a selector: {e}"))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Self::new(&selectors)
            }
        }
    }

    /// Cells in warp order
    pub fn cells(&self) -> &[BlockId] {
        &self.cells
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a validated threading
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Numeric selectors in warp order
    pub fn selectors(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.selector()).collect()
    }
}

impl Default for Threading {
    fn default() -> Self {
        Self::full()
    }
}

impl FromStr for Threading {
    type Err = crate::io::error::WeaveError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Threading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .cells
            .iter()
            .map(|cell| cell.selector().to_string())
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

// The built-in patterns only hold 1s and 2s
fn selector_to_block(selector: u8) -> BlockId {
    if selector == 2 {
        BlockId::Second
    } else {
        BlockId::First
    }
}
