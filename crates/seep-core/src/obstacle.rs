//! The obstacle capability the simulator reacts to.

/// "Is this tile blocked?": the only thing the simulator needs to know
/// about the level.
///
/// Implementations may be backed by anything: a dense map, a tile-layer
/// lookup, a union of static walls and breakable blocks. The answer may
/// change between calls (walls get destroyed); the simulator never caches
/// it across a level-change notification.
///
/// Callers only pass in-bounds coordinates. Implementations should still
/// return `false` for anything they do not store rather than panic.
///
/// # Object Safety
///
/// This trait is object safe so hosts can hand the simulator a
/// `Box<dyn ObstacleQuery>` when the backing store is chosen at runtime.
pub trait ObstacleQuery {
    /// `true` if the tile at column `x`, row `y` blocks water.
    ///
    /// Must be O(1).
    fn is_obstacle(&self, x: usize, y: usize) -> bool;

    /// Convenience negation of [`is_obstacle`](Self::is_obstacle).
    #[inline]
    fn is_open(&self, x: usize, y: usize) -> bool {
        !self.is_obstacle(x, y)
    }
}

impl<T: ObstacleQuery + ?Sized> ObstacleQuery for &T {
    #[inline]
    fn is_obstacle(&self, x: usize, y: usize) -> bool {
        (**self).is_obstacle(x, y)
    }
}

impl<T: ObstacleQuery + ?Sized> ObstacleQuery for &mut T {
    #[inline]
    fn is_obstacle(&self, x: usize, y: usize) -> bool {
        (**self).is_obstacle(x, y)
    }
}

impl<T: ObstacleQuery + ?Sized> ObstacleQuery for Box<T> {
    #[inline]
    fn is_obstacle(&self, x: usize, y: usize) -> bool {
        (**self).is_obstacle(x, y)
    }
}

/// Adapts a closure `Fn(x, y) -> bool` into an [`ObstacleQuery`].
///
/// ```
/// use seep_core::{FnObstacles, ObstacleQuery};
///
/// let floor = FnObstacles::new(|_x, y| y == 0);
/// assert!(floor.is_obstacle(3, 0));
/// assert!(floor.is_open(3, 1));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FnObstacles<F>(pub F);

impl<F> FnObstacles<F>
where
    F: Fn(usize, usize) -> bool,
{
    /// Wrap a predicate.
    pub fn new(predicate: F) -> Self {
        Self(predicate)
    }
}

impl<F> ObstacleQuery for FnObstacles<F>
where
    F: Fn(usize, usize) -> bool,
{
    #[inline]
    fn is_obstacle(&self, x: usize, y: usize) -> bool {
        (self.0)(x, y)
    }
}
