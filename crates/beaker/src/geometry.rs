//! Engine-owned regions used to resolve what a probe is touching.
//!
//! Coordinates are lengths in a single model frame with `y` pointing up.
//! The beaker's bottom edge is where the solution surface starts; the
//! solution rises from it in proportion to the fill fraction.

use phscale_chemistry::Solution;
use uom::si::f64::{Length, Volume};

use crate::{FlowSources, probe::ProbeRegions};

/// A point in the model frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: Length,
    pub y: Length,
}

impl Point {
    #[must_use]
    pub fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle, inclusive of its edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    min: Point,
    max: Point,
}

impl Rect {
    /// Creates the rectangle spanned by two opposite corners, in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let (min_x, max_x) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
        let (min_y, max_y) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
        Self {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        }
    }

    #[must_use]
    pub fn min(&self) -> Point {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Point {
        self.max
    }

    #[must_use]
    pub fn width(&self) -> Length {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> Length {
        self.max.y - self.min.y
    }

    /// Returns `true` if `point` lies inside the rectangle or on its edge.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Returns the bottom `fraction` of this rectangle, with `fraction` clamped to `[0, 1]`.
    #[must_use]
    pub fn bottom_fraction(&self, fraction: f64) -> Self {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        Self {
            min: self.min,
            max: Point::new(self.max.x, self.min.y + self.height() * fraction),
        }
    }
}

/// The fixed layout of a beaker and the columns its streams fall through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeakerGeometry {
    /// Interior of the beaker when filled to capacity.
    pub beaker: Rect,
    /// Column the dropper's solute falls through while dispensing.
    pub dropper_stream: Rect,
    /// Column the water faucet's stream falls through while running.
    pub water_stream: Rect,
    /// Column the drained solution falls through below the beaker.
    pub drain_stream: Rect,
}

impl BeakerGeometry {
    /// Returns the regions a probe can touch in the current state.
    ///
    /// - The solution fills the bottom of the beaker in proportion to
    ///   `total / capacity`, and is absent when the beaker is empty.
    /// - The dropper stream is present while the dropper is dispensing.
    /// - The water stream is present while the water faucet is open.
    /// - The drain stream is present while the drain is open and the beaker
    ///   holds solution.
    #[must_use]
    pub fn regions(
        &self,
        solution: &Solution,
        capacity: Volume,
        sources: &FlowSources,
    ) -> ProbeRegions {
        let total = solution.total_volume();

        ProbeRegions {
            solution: (!solution.is_empty())
                .then(|| self.beaker.bottom_fraction((total / capacity).value)),
            drain: (sources.drain.is_flowing() && !solution.is_empty())
                .then_some(self.drain_stream),
            dropper: sources.is_dispensing().then_some(self.dropper_stream),
            water: sources.water.is_flowing().then_some(self.water_stream),
        }
    }
}
