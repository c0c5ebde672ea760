//! The hidden wire-to-letter association.
//!
//! Verification order is a permutation drawn at setup and kept off the
//! board: wire `w` answers to letter `letter_of(w)`, and the solver has
//! to recover the mapping by comparing groupings across the two faces.

use rand::seq::SliceRandom;
use rand::Rng;

/// Display character for a letter index. Index 0 is `A`; wire counts
/// stay small enough that the alphabet never runs out.
pub fn letter_char(letter: usize) -> char {
    debug_assert!(letter < 26, "letter index {letter} out of range");
    (b'A' + letter as u8) as char
}

/// A bijection between wire indices and letter indices, stored in both
/// directions so lookups never search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assoc {
    letter_of: Vec<usize>,
    wire_of: Vec<usize>,
}

impl Assoc {
    /// Draw a uniform random association over `n` wires.
    pub fn draw(n: usize, rng: &mut impl Rng) -> Self {
        let mut letter_of: Vec<usize> = (0..n).collect();
        letter_of.shuffle(rng);
        Self::from_letters(letter_of)
    }

    fn from_letters(letter_of: Vec<usize>) -> Self {
        let mut wire_of = vec![0; letter_of.len()];
        for (wire, &letter) in letter_of.iter().enumerate() {
            wire_of[letter] = wire;
        }
        Self { letter_of, wire_of }
    }

    pub fn len(&self) -> usize {
        self.letter_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letter_of.is_empty()
    }

    /// Letter index assigned to `wire`.
    pub fn letter_of(&self, wire: usize) -> usize {
        self.letter_of[wire]
    }

    /// Wire index carrying `letter`.
    pub fn wire_of(&self, letter: usize) -> usize {
        self.wire_of[letter]
    }

    /// Map groups of wire indices into letter space. Used to light the
    /// lower face's grouping on the upper face, where slots are lettered.
    pub fn groups_as_letters(&self, groups: &[Vec<usize>]) -> Vec<Vec<usize>> {
        self.map_groups(groups, &self.letter_of)
    }

    /// Map groups of letter indices into wire space. Used to light the
    /// upper face's grouping on the numbered faces.
    pub fn groups_as_wires(&self, groups: &[Vec<usize>]) -> Vec<Vec<usize>> {
        self.map_groups(groups, &self.wire_of)
    }

    fn map_groups(&self, groups: &[Vec<usize>], table: &[usize]) -> Vec<Vec<usize>> {
        groups
            .iter()
            .map(|group| {
                let mut mapped: Vec<usize> =
                    group.iter().map(|&i| table[i]).collect();
                mapped.sort_unstable();
                mapped
            })
            .collect()
    }

    /// Log table in the manual's format: `1=D, 2=A, ...` (wires are
    /// 1-based in logs).
    pub fn table(&self) -> String {
        self.letter_of
            .iter()
            .enumerate()
            .map(|(wire, &letter)| format!("{}={}", wire + 1, letter_char(letter)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ─────────────────────────── Tests ───────────────────────────
