use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

pub const ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Letters added by the initial batch and milestones 1, 2, 3.
pub const BATCH_SIZES: [usize; 4] = [7, 6, 7, 6];

/// Collected letters; only grows until `reset`.
#[derive(Debug, Clone, Default)]
pub struct AlphabetProgress {
    revealed: BTreeSet<char>,
    batches_dealt: usize,
}

impl AlphabetProgress {
    pub fn revealed(&self) -> &BTreeSet<char> {
        &self.revealed
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    /// Highest milestone dealt so far; `None` before the initial batch.
    pub fn stage(&self) -> Option<u8> {
        self.batches_dealt.checked_sub(1).map(|stage| stage as u8)
    }

    pub fn letters(&self) -> String {
        self.revealed.iter().collect()
    }

    /// Deal every batch up to and including `milestone` that is still owed.
    ///
    /// Returns the letters added by this call.
    pub fn reveal_through<R: Rng + ?Sized>(&mut self, milestone: u32, rng: &mut R) -> Vec<char> {
        let target = (milestone as usize + 1).min(BATCH_SIZES.len());
        let mut added = Vec::new();
        while self.batches_dealt < target {
            added.extend(self.deal_batch(rng));
        }
        added
    }

    fn deal_batch<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<char> {
        let size = BATCH_SIZES[self.batches_dealt];
        let mut hidden: Vec<char> = ALPHABET
            .iter()
            .copied()
            .filter(|letter| !self.revealed.contains(letter))
            .collect();
        hidden.shuffle(rng);
        hidden.truncate(size);
        self.revealed.extend(hidden.iter().copied());
        self.batches_dealt += 1;
        hidden
    }

    pub(crate) fn reset(&mut self) {
        self.revealed.clear();
        self.batches_dealt = 0;
    }
}
