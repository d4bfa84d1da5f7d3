//! Declaration offset table.

use declpack_format::DeclId;

/// Byte offset of every written declaration, indexed by ID - 1.
///
/// Slots grow on demand when IDs are recorded out of order; a slot holding 0
/// has not been written yet.
#[derive(Debug, Default)]
pub struct OffsetTable {
    offsets: Vec<u64>,
}

impl OffsetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where the primary record of `id` starts.
    ///
    /// # Panics
    /// Panics if `id` is the sentinel or `offset` is 0.
    pub fn record(&mut self, id: DeclId, offset: u64) {
        let Some(slot) = id.slot() else {
            panic!("OffsetTable: cannot record an offset for the sentinel id");
        };
        assert!(offset != 0, "OffsetTable: offset 0 is reserved for unwritten slots");

        if slot >= self.offsets.len() {
            self.offsets.resize(slot + 1, 0);
        }
        self.offsets[slot] = offset;
    }

    pub fn get(&self, id: DeclId) -> Option<u64> {
        id.slot()
            .and_then(|slot| self.offsets.get(slot).copied())
            .filter(|&offset| offset != 0)
    }

    #[inline]
    pub fn is_written(&self, id: DeclId) -> bool {
        self.get(id).is_some()
    }

    /// Number of slots, written or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Check that every ID up to `minted` has been written.
    ///
    /// Returns the first ID whose slot is still empty.
    pub fn verify(&self, minted: usize) -> Result<(), DeclId> {
        match (0..minted).find(|&slot| self.offsets.get(slot).is_none_or(|&o| o == 0)) {
            Some(slot) => Err(DeclId::from_slot(slot)),
            None => Ok(()),
        }
    }

    /// Final table covering exactly `minted` IDs.
    pub fn into_table(mut self, minted: usize) -> Vec<u64> {
        self.offsets.resize(minted, 0);
        self.offsets
    }
}
