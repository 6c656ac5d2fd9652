//! Attribute placement around entity and relationship nodes.
//!
//! Attributes are spread over angles that avoid the directions in which
//! relationship edges leave their owner. Each blocked direction reserves a
//! clearance window on both sides; candidate angles are sampled on a fixed
//! step outside those windows and the attributes are spread evenly over the
//! candidates.

use std::iter;

use erdify_core::geometry::normalize_degrees;

/// Angle used for attributes that do not fit into the sampled sweep.
const PAD_ANGLE: f64 = 90.0;

/// How candidate angles are sampled around one owner node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSweep {
    step_degrees: u32,
    clearance: f64,
}

impl AngleSweep {
    /// Sweep used for entity attributes before the clearance is tuned.
    pub const ENTITY_STEP: u32 = 10;
    /// Sweep used around relationship diamonds.
    pub const RELATIONSHIP: AngleSweep = AngleSweep::new(15, 45.0);

    pub const fn new(step_degrees: u32, clearance: f64) -> Self {
        Self {
            step_degrees,
            clearance,
        }
    }

    pub fn clearance(self) -> f64 {
        self.clearance
    }

    /// Returns the sampled sweep over the whole circle.
    fn full_sweep(self) -> Vec<f64> {
        (0..360u32)
            .step_by(self.step_degrees.max(1) as usize)
            .map(f64::from)
            .collect()
    }

    /// Picks one angle per attribute.
    ///
    /// `blocked` holds the directions of edges leaving the owner, in degrees.
    /// Angles inside a clearance window (inclusive on both ends) are skipped
    /// unless too few angles remain, in which case the full sweep is used.
    pub fn distribute(self, blocked: &[f64], count: usize) -> Vec<f64> {
        if count == 0 {
            return Vec::new();
        }

        let windows: Vec<Window> = blocked
            .iter()
            .map(|&angle| Window::around(angle, self.clearance))
            .collect();

        let full = self.full_sweep();
        let candidates: Vec<f64> = full
            .iter()
            .copied()
            .filter(|&angle| !windows.iter().any(|window| window.contains(angle)))
            .collect();
        let available = if candidates.len() >= count {
            candidates
        } else {
            full
        };

        if count <= available.len() {
            let stride = available.len() as f64 / count as f64;
            (0..count)
                .map(|i| {
                    let index = (i as f64 * stride).floor() as usize;
                    available[index.min(available.len() - 1)]
                })
                .collect()
        } else {
            available
                .into_iter()
                .chain(iter::repeat(PAD_ANGLE))
                .take(count)
                .collect()
        }
    }
}

/// A blocked arc `[start, end]`, possibly wrapping through 0°.
#[derive(Debug, Clone, Copy)]
struct Window {
    start: f64,
    end: f64,
}

impl Window {
    fn around(angle: f64, clearance: f64) -> Self {
        let angle = normalize_degrees(angle);
        Self {
            start: normalize_degrees(angle - clearance),
            end: normalize_degrees(angle + clearance),
        }
    }

    fn contains(self, angle: f64) -> bool {
        if self.start <= self.end {
            angle >= self.start && angle <= self.end
        } else {
            angle >= self.start || angle <= self.end
        }
    }
}

/// Size of an attribute ellipse, in Graphviz units and points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeSize {
    width: f64,
    height: f64,
    font_size: f64,
}

impl AttributeSize {
    pub const DEFAULT: AttributeSize = AttributeSize::new(1.2, 0.5, 9.0);
    pub const RELATIONSHIP: AttributeSize = AttributeSize::new(1.0, 0.45, 9.0);

    pub const fn new(width: f64, height: f64, font_size: f64) -> Self {
        Self {
            width,
            height,
            font_size,
        }
    }

    pub fn width(self) -> f64 {
        self.width
    }

    pub fn height(self) -> f64 {
        self.height
    }

    pub fn font_size(self) -> f64 {
        self.font_size
    }
}

struct SizeRule {
    min_relationships: usize,
    min_attributes: usize,
    size: AttributeSize,
}

/// Shrinking rules for crowded entities, most specific first.
const SIZE_RULES: [SizeRule; 5] = [
    SizeRule {
        min_relationships: 3,
        min_attributes: 9,
        size: AttributeSize::new(0.80, 0.36, 7.5),
    },
    SizeRule {
        min_relationships: 3,
        min_attributes: 8,
        size: AttributeSize::new(0.85, 0.38, 7.5),
    },
    SizeRule {
        min_relationships: 3,
        min_attributes: 6,
        size: AttributeSize::new(1.2, 0.5, 8.0),
    },
    SizeRule {
        min_relationships: 2,
        min_attributes: 10,
        size: AttributeSize::new(0.90, 0.40, 7.5),
    },
    SizeRule {
        min_relationships: 2,
        min_attributes: 8,
        size: AttributeSize::new(1.0, 0.44, 8.0),
    },
];

/// Returns the attribute node size for an entity.
///
/// # Examples
///
/// ```
/// use erdify::layout::{AttributeSize, attribute_size};
///
/// assert_eq!(attribute_size(0, 3), AttributeSize::DEFAULT);
/// assert_eq!(attribute_size(3, 8).font_size(), 7.5);
/// ```
pub fn attribute_size(relationships: usize, attributes: usize) -> AttributeSize {
    SIZE_RULES
        .iter()
        .find(|rule| relationships >= rule.min_relationships && attributes >= rule.min_attributes)
        .map_or(AttributeSize::DEFAULT, |rule| rule.size)
}

/// Placement parameters for the attributes of one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct EntityAttributeRing {
    pub base_radius: f64,
    pub sweep: AngleSweep,
}

impl EntityAttributeRing {
    /// Chooses the ring for an entity in a diagram of `entity_count` entities.
    ///
    /// Entities with at least two relationships and five attributes get a
    /// narrower clearance, never below 20°.
    pub fn for_entity(entity_count: usize, relationships: usize, attributes: usize) -> Self {
        let (base_radius, mut clearance) = match entity_count {
            n if n >= 15 => (2.0, 40.0),
            n if n >= 4 => (1.5, 35.0),
            _ => (1.5, 30.0),
        };
        if relationships >= 2 && attributes >= 5 {
            clearance = f64::max(20.0, clearance * 0.6);
        }
        Self {
            base_radius,
            sweep: AngleSweep::new(AngleSweep::ENTITY_STEP, clearance),
        }
    }

    /// Distance of the `index`-th attribute from the entity center.
    pub fn radius(self, index: usize) -> f64 {
        self.base_radius * (1.0 + (index % 3) as f64 * 0.15)
    }
}

/// Distance of the `index`-th relationship attribute from the diamond center.
pub(super) fn relationship_attribute_radius(index: usize) -> f64 {
    1.3 + (index % 2) as f64 * 0.15
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn check_avoids_windows_when_room(
        blocked: Vec<f64>,
        clearance: f64,
        count: usize,
    ) -> Result<(), TestCaseError> {
        let sweep = AngleSweep::new(10, clearance);
        let windows: Vec<Window> = blocked
            .iter()
            .map(|&angle| Window::around(angle, clearance))
            .collect();
        let free = sweep
            .full_sweep()
            .into_iter()
            .filter(|&angle| !windows.iter().any(|window| window.contains(angle)))
            .count();

        let angles = sweep.distribute(&blocked, count);
        prop_assert_eq!(angles.len(), count);

        if count <= free {
            for angle in angles {
                prop_assert!(
                    !windows.iter().any(|window| window.contains(angle)),
                    "angle {} falls in a blocked window",
                    angle
                );
            }
        }
        Ok(())
    }

    fn check_angles_are_distinct_when_room(count: usize) -> Result<(), TestCaseError> {
        let angles = AngleSweep::new(10, 30.0).distribute(&[], count);
        let mut sorted = angles.clone();
        sorted.sort_by(f64::total_cmp);
        sorted.dedup();
        prop_assert_eq!(sorted.len(), angles.len());
        Ok(())
    }

    proptest! {
        #[test]
        fn avoids_windows_when_room(
            blocked in prop::collection::vec(0.0f64..360.0, 0..5),
            clearance in 20.0f64..45.0,
            count in 0usize..20,
        ) {
            check_avoids_windows_when_room(blocked, clearance, count)?;
        }

        #[test]
        fn angles_are_distinct_when_room(count in 1usize..=36) {
            check_angles_are_distinct_when_room(count)?;
        }
    }
}
