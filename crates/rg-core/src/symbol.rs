//! Screen symbols
//!
//! The symbol table fixes the channel order of the symbolic renderer:
//! symbol `i` (for `i >= 1`) owns channel `i - 1`. The blank symbol has no
//! channel.

use serde::{Deserialize, Serialize};

/// Every symbol that can appear on screen, in channel order
pub const SYMBOLS: [char; 43] = [
    ' ', '@', '#', '.', '-', //
    '%', '+', '^', '!', '?', //
    ']', ')', '/', '*', ':', //
    '=', ',', 'A', 'B', 'C', //
    'D', 'E', 'F', 'G', 'H', //
    'I', 'J', 'K', 'L', 'M', //
    'N', 'O', 'P', 'Q', 'R', //
    'S', 'T', 'U', 'V', 'W', //
    'X', 'Y', 'Z',
];

/// Index into [`SYMBOLS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(u8);

impl Symbol {
    pub const BLANK: Symbol = Symbol(0);

    /// Look up the symbol drawn as `tile`
    ///
    /// Vertical walls share the horizontal wall symbol.
    pub fn from_tile(tile: char) -> Option<Symbol> {
        let tile = if tile == '|' { '-' } else { tile };
        SYMBOLS
            .iter()
            .position(|&c| c == tile)
            .map(|i| Symbol(i as u8))
    }

    /// Highest non-enemy symbol
    pub fn max_item() -> Symbol {
        Symbol(16)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn to_char(self) -> char {
        SYMBOLS[self.index()]
    }

    /// Symbolic channel of this symbol, `None` for blank
    pub fn channel(self) -> Option<usize> {
        self.index().checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_unique() {
        for (i, a) in SYMBOLS.iter().enumerate() {
            for b in &SYMBOLS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_walls_share_symbol() {
        assert_eq!(Symbol::from_tile('|'), Symbol::from_tile('-'));
    }

    #[test]
    fn test_max_item_is_last_before_enemies() {
        assert_eq!(Symbol::max_item().to_char(), ',');
        assert_eq!(SYMBOLS[Symbol::max_item().index() + 1], 'A');
    }

    #[test]
    fn test_channels() {
        assert_eq!(Symbol::BLANK.channel(), None);
        assert_eq!(Symbol::from_tile('@').unwrap().channel(), Some(0));
        assert_eq!(Symbol::from_tile('Z').unwrap().channel(), Some(41));
        assert!(Symbol::from_tile('$').is_none());
    }
}
