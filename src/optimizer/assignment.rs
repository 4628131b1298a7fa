/// Which candidate occupies which slot. Slots `[0, k)` are the selected
/// subset, slots `[k, n)` the reserve pool. `slots` and `positions` are
/// inverse permutations of each other at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAssignment {
    slots: Vec<usize>,
    positions: Vec<usize>,
    selected: usize,
}

impl SlotAssignment {
    /// Identity placement: slot p holds candidate p, so the `selected`
    /// highest-ranked candidates start out chosen.
    pub fn identity(n: usize, selected: usize) -> Self {
        assert!(selected <= n, "cannot select {} of {} candidates", selected, n);
        Self {
            slots: (0..n).collect(),
            positions: (0..n).collect(),
            selected,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Size of the selected subset (K).
    pub fn selected_len(&self) -> usize {
        self.selected
    }

    #[inline(always)]
    pub fn candidate_at(&self, slot: usize) -> usize {
        self.slots[slot]
    }

    #[inline(always)]
    pub fn slot_of(&self, candidate: usize) -> usize {
        self.positions[candidate]
    }

    #[inline(always)]
    pub fn is_selected(&self, candidate: usize) -> bool {
        self.positions[candidate] < self.selected
    }

    /// Candidates currently in the selected subset, in slot order.
    pub fn selected(&self) -> &[usize] {
        &self.slots[..self.selected]
    }

    pub fn reserve(&self) -> &[usize] {
        &self.slots[self.selected..]
    }

    /// Exchanges the occupants of two slots. Applying it twice restores the
    /// previous state.
    #[inline(always)]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        self.positions[self.slots[a]] = a;
        self.positions[self.slots[b]] = b;
    }

    /// True if every candidate sits in exactly one slot and the inverse table
    /// agrees.
    pub fn is_bijection(&self) -> bool {
        let n = self.slots.len();
        if self.positions.len() != n || self.selected > n {
            return false;
        }
        let mut seen = vec![false; n];
        for (slot, &c) in self.slots.iter().enumerate() {
            if c >= n || seen[c] || self.positions[c] != slot {
                return false;
            }
            seen[c] = true;
        }
        true
    }
}
