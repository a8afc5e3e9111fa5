//! Total mapping from piece color to the local entities it iterates.

use crate::partition::coloring::Owner;
use crate::piece_error::MeshPiecesError;

/// Tie-break rule assigning a multicolor entity its single partition-membership
/// color (the piece whose task iterates it). The entity remains flagged shared
/// regardless of which owner wins membership.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MembershipPolicy {
    /// The first color in the owner list, in the order the decomposition
    /// produced it.
    #[default]
    FirstListed,
    /// The numerically smallest owning color.
    LowestColor,
}

impl MembershipPolicy {
    #[inline]
    fn membership(self, colors: &[usize]) -> usize {
        match self {
            // Owner lists are validated non-empty at coloring construction.
            MembershipPolicy::FirstListed => colors[0],
            MembershipPolicy::LowestColor => *colors.iter().min().expect("non-empty owner list"),
        }
    }
}

/// A total partition of `0..len` local entities over piece colors `0..pieces`.
///
/// # Invariants
/// - Exactly `pieces` buckets exist, even when empty; absence of a bucket is
///   not equivalent to an empty bucket and cannot occur.
/// - Every entity appears in exactly one bucket (its membership color).
/// - Bucket contents preserve entity order.
#[derive(Clone, Debug)]
pub struct PiecePartition {
    buckets: Vec<Vec<usize>>,
    shared: Vec<bool>,
    policy: MembershipPolicy,
}

impl PiecePartition {
    /// Build a partition for `len` entities over `pieces` colors, with the
    /// default [`MembershipPolicy::FirstListed`] tie-break.
    pub fn build<F>(len: usize, pieces: usize, owner_of: F) -> Result<Self, MeshPiecesError>
    where
        F: FnMut(usize) -> Owner,
    {
        Self::build_with_policy(len, pieces, MembershipPolicy::default(), owner_of)
    }

    /// Build a partition with an explicit membership tie-break policy.
    ///
    /// The owner function is re-validated here: partitions are also built over
    /// boundary-local subranges whose owner views are sliced out of a larger
    /// coloring, and a corrupt slice must fail identically.
    ///
    /// # Errors
    /// Same configuration errors as
    /// [`PointColors::new`](crate::partition::coloring::PointColors::new);
    /// all are fatal, indicating a corrupt mesh decomposition.
    pub fn build_with_policy<F>(
        len: usize,
        pieces: usize,
        policy: MembershipPolicy,
        mut owner_of: F,
    ) -> Result<Self, MeshPiecesError>
    where
        F: FnMut(usize) -> Owner,
    {
        if pieces == 0 {
            return Err(MeshPiecesError::ZeroPieces);
        }
        // Force all colors to exist, even if they stay empty.
        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); pieces];
        let mut shared = vec![false; len];
        for entity in 0..len {
            let color = match owner_of(entity) {
                Owner::Single(color) => {
                    if color >= pieces {
                        return Err(MeshPiecesError::ColorOutOfRange {
                            entity,
                            color,
                            pieces,
                        });
                    }
                    color
                }
                Owner::Multi(colors) => {
                    if colors.is_empty() {
                        return Err(MeshPiecesError::EmptyOwnerList { entity });
                    }
                    if let Some(&color) = colors.iter().find(|&&c| c >= pieces) {
                        return Err(MeshPiecesError::ColorOutOfRange {
                            entity,
                            color,
                            pieces,
                        });
                    }
                    shared[entity] = true;
                    policy.membership(&colors)
                }
            };
            buckets[color].push(entity);
        }
        let empty = buckets.iter().filter(|b| b.is_empty()).count();
        if empty > 0 {
            log::debug!("piece partition: {empty} of {pieces} colors own no entities");
        }
        Ok(Self {
            buckets,
            shared,
            policy,
        })
    }

    /// Number of piece colors. Always equals the bucket count.
    #[inline]
    pub fn pieces(&self) -> usize {
        self.buckets.len()
    }

    /// Number of partitioned entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.shared.len()
    }

    /// Whether the partitioned range is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shared.is_empty()
    }

    /// The membership tie-break policy this partition was built with.
    #[inline]
    pub fn policy(&self) -> MembershipPolicy {
        self.policy
    }

    /// Local entities whose membership color is `piece`, in entity order.
    ///
    /// # Panics
    /// Panics if `piece` is not a valid color.
    #[inline]
    pub fn bucket(&self, piece: usize) -> &[usize] {
        &self.buckets[piece]
    }

    /// Iterator over `(color, bucket)` for every color in `0..pieces`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.buckets.iter().enumerate().map(|(c, b)| (c, b.as_slice()))
    }

    /// Whether local entity `e` is flagged shared (multicolor).
    #[inline]
    pub fn is_shared(&self, e: usize) -> bool {
        self.shared[e]
    }

    /// The per-entity store selector field: `1` for shared entities, `0` for
    /// private ones. Persisted alongside the entity definition so any task can
    /// pick the correct backing store without recomputation.
    pub fn store_selectors(&self) -> Vec<u8> {
        self.shared.iter().map(|&s| s as u8).collect()
    }

    /// Check the partition invariants: bucket count equals the piece count and
    /// primary memberships cover every entity exactly once.
    pub fn validate_invariants(&self) -> Result<(), MeshPiecesError> {
        let mut seen = vec![false; self.len()];
        for bucket in &self.buckets {
            for &e in bucket {
                if e >= seen.len() || seen[e] {
                    return Err(MeshPiecesError::PointOutOfRange {
                        point: e,
                        count: seen.len(),
                    });
                }
                seen[e] = true;
            }
        }
        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(MeshPiecesError::PointOutOfRange {
                point: missing,
                count: seen.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owners() -> Vec<Owner> {
        vec![
            Owner::Single(0),
            Owner::Single(0),
            Owner::Single(1),
            Owner::Multi(vec![1, 0]),
        ]
    }

    #[test]
    fn every_color_has_a_bucket() {
        // Color 3 owns nothing but must still be present.
        let part = PiecePartition::build(2, 4, |e| owners()[e].clone()).unwrap();
        assert_eq!(part.pieces(), 4);
        assert_eq!(part.bucket(0), &[0]);
        assert_eq!(part.bucket(1), &[1]);
        assert_eq!(part.bucket(2), &[] as &[usize]);
        assert_eq!(part.bucket(3), &[] as &[usize]);
    }

    #[test]
    fn multicolor_defaults_to_first_listed_owner() {
        let part = PiecePartition::build(4, 2, |e| owners()[e].clone()).unwrap();
        // Entity 3 lists owners [1, 0]; FirstListed places it with piece 1.
        assert_eq!(part.bucket(0), &[0, 1]);
        assert_eq!(part.bucket(1), &[2, 3]);
        assert!(part.is_shared(3));
        assert!(!part.is_shared(2));
    }

    #[test]
    fn lowest_color_policy_changes_membership_not_sharing() {
        let part = PiecePartition::build_with_policy(
            4,
            2,
            MembershipPolicy::LowestColor,
            |e| owners()[e].clone(),
        )
        .unwrap();
        assert_eq!(part.bucket(0), &[0, 1, 3]);
        assert_eq!(part.bucket(1), &[2]);
        assert!(part.is_shared(3));
    }

    #[test]
    fn selectors_match_shared_flags() {
        let part = PiecePartition::build(4, 2, |e| owners()[e].clone()).unwrap();
        assert_eq!(part.store_selectors(), vec![0, 0, 0, 1]);
    }

    #[test]
    fn out_of_range_color_is_fatal() {
        let err = PiecePartition::build(1, 2, |_| Owner::Single(7)).unwrap_err();
        assert_eq!(
            err,
            MeshPiecesError::ColorOutOfRange {
                entity: 0,
                color: 7,
                pieces: 2
            }
        );
    }

    #[test]
    fn empty_owner_list_is_fatal() {
        let err = PiecePartition::build(1, 2, |_| Owner::Multi(vec![])).unwrap_err();
        assert_eq!(err, MeshPiecesError::EmptyOwnerList { entity: 0 });
    }

    #[test]
    fn invariants_hold_for_single_piece() {
        let part = PiecePartition::build(5, 1, |_| Owner::Single(0)).unwrap();
        assert_eq!(part.pieces(), 1);
        assert_eq!(part.bucket(0), &[0, 1, 2, 3, 4]);
        part.validate_invariants().unwrap();
    }
}
