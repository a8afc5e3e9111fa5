//! Ownership layout: global point index to private/shared store slot.
//!
//! The private store holds one compact slab per piece; the shared store is a
//! single contended array. The layout fixes, once per mesh decomposition,
//! which of the two holds each point and at what index, so that every task
//! can address field data without recomputation.

use crate::partition::coloring::{Owner, PointColors};
use crate::partition::piece_partition::MembershipPolicy;

/// Where one global point's field value lives.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    /// Exclusively owned: slab of `piece`, slot `idx`. No other piece ever
    /// touches this value, so plain read-modify-write is safe.
    Private {
        /// Owning piece color.
        piece: usize,
        /// Index within that piece's slab.
        idx: usize,
    },
    /// Contended: slot `idx` of the shared store. Two or more pieces may
    /// process this point inside the same run; updates must go through the
    /// atomic path or be idempotent overwrites.
    Shared {
        /// Index within the shared store.
        idx: usize,
    },
}

/// Immutable point-to-slot assignment derived from a validated coloring.
#[derive(Clone, Debug)]
pub struct OwnershipLayout {
    colors: PointColors,
    policy: MembershipPolicy,
    slots: Vec<Slot>,
    primary: Vec<usize>,
    private_lens: Vec<usize>,
    shared_len: usize,
}

impl OwnershipLayout {
    /// Derive the layout from a coloring with the default membership policy.
    pub fn new(colors: PointColors) -> Self {
        Self::with_policy(colors, MembershipPolicy::default())
    }

    /// Derive the layout with an explicit multicolor membership policy.
    ///
    /// Private points are packed into per-piece slabs in global point order;
    /// shared points are packed into the shared store in global point order.
    /// The coloring is already validated, so this cannot fail.
    pub fn with_policy(colors: PointColors, policy: MembershipPolicy) -> Self {
        let pieces = colors.pieces();
        let mut slots = Vec::with_capacity(colors.len());
        let mut primary = Vec::with_capacity(colors.len());
        let mut private_lens = vec![0usize; pieces];
        let mut shared_len = 0usize;
        for (_, owner) in colors.iter() {
            match owner {
                Owner::Single(color) => {
                    slots.push(Slot::Private {
                        piece: *color,
                        idx: private_lens[*color],
                    });
                    private_lens[*color] += 1;
                    primary.push(*color);
                }
                Owner::Multi(list) => {
                    slots.push(Slot::Shared { idx: shared_len });
                    shared_len += 1;
                    let membership = match policy {
                        MembershipPolicy::FirstListed => list[0],
                        MembershipPolicy::LowestColor => {
                            *list.iter().min().expect("non-empty owner list")
                        }
                    };
                    primary.push(membership);
                }
            }
        }
        Self {
            colors,
            policy,
            slots,
            primary,
            private_lens,
            shared_len,
        }
    }

    /// The validated coloring this layout was derived from.
    #[inline]
    pub fn colors(&self) -> &PointColors {
        &self.colors
    }

    /// The multicolor membership policy in effect.
    #[inline]
    pub fn policy(&self) -> MembershipPolicy {
        self.policy
    }

    /// Number of piece colors.
    #[inline]
    pub fn pieces(&self) -> usize {
        self.private_lens.len()
    }

    /// Number of points in the global index space.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the index space is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Store slot of global point `p`.
    ///
    /// # Panics
    /// Panics if `p` is outside the index space.
    #[inline]
    pub fn slot(&self, p: usize) -> Slot {
        self.slots[p]
    }

    /// Store selector of global point `p`: `0` private, `1` shared.
    #[inline]
    pub fn selector(&self, p: usize) -> u8 {
        matches!(self.slots[p], Slot::Shared { .. }) as u8
    }

    /// Whether global point `p` is contended.
    #[inline]
    pub fn is_shared(&self, p: usize) -> bool {
        matches!(self.slots[p], Slot::Shared { .. })
    }

    /// Partition-membership color of global point `p` (for multicolor points,
    /// the color chosen by the membership policy).
    #[inline]
    pub fn primary_color(&self, p: usize) -> usize {
        self.primary[p]
    }

    /// Slab length of `piece`'s private store.
    #[inline]
    pub fn private_len(&self, piece: usize) -> usize {
        self.private_lens[piece]
    }

    /// Per-piece private slab lengths, indexed by color.
    #[inline]
    pub fn private_lens(&self) -> &[usize] {
        &self.private_lens
    }

    /// Length of the shared store.
    #[inline]
    pub fn shared_len(&self) -> usize {
        self.shared_len
    }
}
