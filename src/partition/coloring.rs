//! Per-entity piece ownership as computed by the external mesh decomposition.

use crate::piece_error::MeshPiecesError;

/// Ownership of one entity: a single piece color, or a multicolor marker with
/// the full (non-empty) list of owning colors.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Owner {
    /// The entity belongs to exactly one piece.
    Single(usize),
    /// The entity's true ownership set has more than one member; updates to it
    /// must go through the shared store.
    Multi(Vec<usize>),
}

impl Owner {
    /// Whether this entity is contended across pieces.
    #[inline]
    pub fn is_shared(&self) -> bool {
        matches!(self, Owner::Multi(_))
    }
}

/// A validated piece coloring for a contiguous entity range `0..len`.
///
/// Construction checks every color against the piece count and rejects empty
/// multicolor lists, so downstream consumers (partition builder, ownership
/// layout) never re-validate.
#[derive(Clone, Debug)]
pub struct PointColors {
    pieces: usize,
    owners: Vec<Owner>,
}

impl PointColors {
    /// Validate an owner list against `pieces`.
    ///
    /// # Errors
    /// - [`MeshPiecesError::ZeroPieces`] if `pieces == 0`.
    /// - [`MeshPiecesError::ColorOutOfRange`] naming the offending entity and
    ///   color if any owner color is `>= pieces`.
    /// - [`MeshPiecesError::EmptyOwnerList`] if a multicolor entity lists no
    ///   owning colors.
    pub fn new(pieces: usize, owners: Vec<Owner>) -> Result<Self, MeshPiecesError> {
        if pieces == 0 {
            return Err(MeshPiecesError::ZeroPieces);
        }
        for (entity, owner) in owners.iter().enumerate() {
            match owner {
                Owner::Single(color) => {
                    if *color >= pieces {
                        return Err(MeshPiecesError::ColorOutOfRange {
                            entity,
                            color: *color,
                            pieces,
                        });
                    }
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
                }
            }
        }
        Ok(Self { pieces, owners })
    }

    /// Materialize a coloring from an owner function over `0..len`.
    pub fn from_fn<F>(pieces: usize, len: usize, mut owner_of: F) -> Result<Self, MeshPiecesError>
    where
        F: FnMut(usize) -> Owner,
    {
        Self::new(pieces, (0..len).map(|e| owner_of(e)).collect())
    }

    /// Number of piece colors.
    #[inline]
    pub fn pieces(&self) -> usize {
        self.pieces
    }

    /// Number of entities in the colored range.
    #[inline]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Whether the colored range is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Ownership of entity `e`.
    ///
    /// # Panics
    /// Panics if `e` is outside the colored range.
    #[inline]
    pub fn owner(&self, e: usize) -> &Owner {
        &self.owners[e]
    }

    /// Whether entity `e` is flagged shared (multicolor).
    #[inline]
    pub fn is_shared(&self, e: usize) -> bool {
        self.owners[e].is_shared()
    }

    /// Iterator over `(entity, owner)` in entity order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Owner)> {
        self.owners.iter().enumerate()
    }
}
