//! Per-tag depth offsets.
//!
//! Every draw entry's altitude is `root.y + offset(tag)`. Layers never
//! reorder relative to each other at runtime; branches only skip tags.
//!
//! The offsets are empirically tuned fractions, all multiples of the
//! 3/980 sub-interval. They are kept exactly; do not re-derive them.
//!
//! ```text
//!  units of 3/980   tag
//!  ───────────────  ──────────────────────────────
//!   3 (+1 per mat)  Body, ApparelLayer(n)   (stack stays below 6)
//!   6               WoundOverlay
//!   7               Head
//!   8               Hair
//!   9               Overhead (behind face)
//!  10               Overhead (front of face)
//!  11               Shell
//!  11.5             Pack        (no tuned value; midpoint)
//!  12               Equipment   (CarriedThing nudge is also 12)
//!  12.5             WornExtra   (no tuned value; midpoint)
//!  13               StatusOverlay
//! ```

use serde::Deserialize;

use crate::error::{RenderError, RenderResult};

/// One tagged visual component of the composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GraphicLayer {
    /// Base body material.
    Body,
    /// Body-hugging apparel drawn in the body stack, `n`-th material above the body.
    ApparelLayer(u8),
    /// Wound decals over the body.
    WoundOverlay,
    /// Head.
    Head,
    /// Hair.
    Hair,
    /// Headgear.
    Overhead {
        /// Hat drawn in front of the face (suppresses hair).
        front_of_face: bool,
    },
    /// Outer-layer apparel (coats).
    Shell,
    /// Utility apparel rendered as a worn pack, and animal packs.
    Pack,
    /// Held weapon or tool.
    Equipment,
    /// Supplementary graphics drawn by worn apparel.
    WornExtra,
    /// Status icons above the head.
    StatusOverlay,
    /// Item or creature carried in the actor's hands.
    CarriedThing,
    /// Ground shadow (absolute altitude, not offset from root).
    Shadow,
}

impl GraphicLayer {
    /// Short name for logs and previews.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::ApparelLayer(_) => "apparel",
            Self::WoundOverlay => "wound",
            Self::Head => "head",
            Self::Hair => "hair",
            Self::Overhead { front_of_face: false } => "overhead",
            Self::Overhead { front_of_face: true } => "overhead-front",
            Self::Shell => "shell",
            Self::Pack => "pack",
            Self::Equipment => "equipment",
            Self::WornExtra => "worn-extra",
            Self::StatusOverlay => "status",
            Self::CarriedThing => "carried",
            Self::Shadow => "shadow",
        }
    }
}

/// Named depth offsets, loadable from the `[depth]` config section.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DepthTable {
    /// Step between stacked body materials and the small hat nudge.
    pub sub_interval: f32,
    /// Base body material.
    pub body: f32,
    /// Wound decals.
    pub wounds: f32,
    /// Head.
    pub head: f32,
    /// Hair.
    pub hair: f32,
    /// Headgear that sits behind the face.
    pub overhead_behind_face: f32,
    /// Headgear drawn in front of the face.
    pub overhead_front_of_face: f32,
    /// Shell apparel.
    pub shell: f32,
    /// Packs and belts.
    pub pack: f32,
    /// Carried-thing nudge (added in front, subtracted behind).
    pub carried_thing: f32,
    /// Held equipment.
    pub equipment: f32,
    /// Apparel extras.
    pub worn_extra: f32,
    /// Status overlays.
    pub status: f32,
}

impl DepthTable {
    /// The tuned offsets.
    pub const STANDARD: Self = Self {
        sub_interval: 3.0 / 980.0,
        body: 9.0 / 980.0,
        wounds: 9.0 / 490.0,
        head: 3.0 / 140.0,
        hair: 6.0 / 245.0,
        overhead_behind_face: 27.0 / 980.0,
        overhead_front_of_face: 3.0 / 98.0,
        shell: 33.0 / 980.0,
        pack: 69.0 / 1960.0,
        carried_thing: 9.0 / 245.0,
        equipment: 9.0 / 245.0,
        worn_extra: 75.0 / 1960.0,
        status: 39.0 / 980.0,
    };

    /// Offset of material `position` in a body stack of `stack_len` materials.
    ///
    /// The stack steps by `sub_interval` until it would reach the wound
    /// depth; longer stacks share the `(body, wounds)` gap evenly so the top
    /// material always stays strictly below the wounds.
    #[must_use]
    pub fn body_stack_offset(&self, position: u8, stack_len: usize) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let budget = (self.wounds - self.body) / stack_len.max(1) as f32;
        self.body + f32::from(position) * self.sub_interval.min(budget)
    }

    /// Offset above the root for a tag.
    ///
    /// `ApparelLayer(n)` gets its nominal step here; the compositor places
    /// body stacks through [`body_stack_offset`](Self::body_stack_offset).
    #[must_use]
    pub fn offset(&self, layer: GraphicLayer) -> f32 {
        match layer {
            GraphicLayer::Body => self.body,
            GraphicLayer::ApparelLayer(n) => self.body + f32::from(n) * self.sub_interval,
            GraphicLayer::WoundOverlay => self.wounds,
            GraphicLayer::Head => self.head,
            GraphicLayer::Hair => self.hair,
            GraphicLayer::Overhead { front_of_face: false } => self.overhead_behind_face,
            GraphicLayer::Overhead { front_of_face: true } => self.overhead_front_of_face,
            GraphicLayer::Shell => self.shell,
            GraphicLayer::Pack => self.pack,
            GraphicLayer::Equipment => self.equipment,
            GraphicLayer::WornExtra => self.worn_extra,
            GraphicLayer::StatusOverlay => self.status,
            GraphicLayer::CarriedThing => self.carried_thing,
            GraphicLayer::Shadow => 0.0,
        }
    }

    /// Canonical draw order, bottom to top.
    fn canonical(&self) -> [(&'static str, f32); 11] {
        [
            ("body", self.body),
            ("wounds", self.wounds),
            ("head", self.head),
            ("hair", self.hair),
            ("overhead_behind_face", self.overhead_behind_face),
            ("overhead_front_of_face", self.overhead_front_of_face),
            ("shell", self.shell),
            ("pack", self.pack),
            ("equipment", self.equipment),
            ("worn_extra", self.worn_extra),
            ("status", self.status),
        ]
    }

    /// Checks that every tag sits strictly above the one before it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::DepthOrder`] for the first pair out of order and
    /// [`RenderError::InvalidConfig`] for non-positive increments.
    pub fn validate(&self) -> RenderResult<()> {
        if self.sub_interval <= 0.0 || self.carried_thing <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "depth increments must be positive (sub_interval {}, carried_thing {})",
                self.sub_interval, self.carried_thing
            )));
        }
        let order = self.canonical();
        for pair in order.windows(2) {
            let (lower, lower_value) = pair[0];
            let (upper, upper_value) = pair[1];
            if lower_value >= upper_value {
                return Err(RenderError::DepthOrder { lower, lower_value, upper, upper_value });
            }
        }
        Ok(())
    }
}

impl Default for DepthTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_is_ordered() {
        assert!(DepthTable::STANDARD.validate().is_ok());
    }

    #[test]
    fn test_offsets_are_sub_interval_multiples() {
        let t = DepthTable::STANDARD;
        let units = |v: f32| v / t.sub_interval;
        assert!((units(t.body) - 3.0).abs() < 1e-4);
        assert!((units(t.wounds) - 6.0).abs() < 1e-4);
        assert!((units(t.head) - 7.0).abs() < 1e-4);
        assert!((units(t.hair) - 8.0).abs() < 1e-4);
        assert!((units(t.shell) - 11.0).abs() < 1e-4);
        assert!((units(t.equipment) - 12.0).abs() < 1e-4);
        assert!((units(t.status) - 13.0).abs() < 1e-4);
    }

    #[test]
    fn test_apparel_layers_stack_on_body() {
        let t = DepthTable::STANDARD;
        assert_eq!(t.offset(GraphicLayer::ApparelLayer(0)), t.body);
        let second = t.offset(GraphicLayer::ApparelLayer(2));
        assert!((second - (t.body + 2.0 * t.sub_interval)).abs() < 1e-7);
        assert!(second < t.wounds);
    }

    #[test]
    fn test_short_body_stack_keeps_tuned_step() {
        let t = DepthTable::STANDARD;
        for len in 1..=3 {
            for position in 0..len {
                let expected = t.offset(GraphicLayer::ApparelLayer(position));
                let actual = t.body_stack_offset(position, usize::from(len));
                assert!((actual - expected).abs() < 1e-7);
            }
        }
    }

    #[test]
    fn test_tall_body_stack_stays_below_wounds() {
        let t = DepthTable::STANDARD;
        for len in [4_usize, 5, 8, 20, 255] {
            let top = u8::try_from(len - 1).unwrap();
            let mut previous = t.body_stack_offset(0, len);
            assert!((previous - t.body).abs() < 1e-7);
            for position in 1..=top {
                let offset = t.body_stack_offset(position, len);
                assert!(offset > previous, "stack of {len} not increasing at {position}");
                previous = offset;
            }
            assert!(previous < t.wounds, "stack of {len} reaches wounds");
        }
    }

    #[test]
    fn test_out_of_order_table_is_rejected() {
        let mut t = DepthTable::STANDARD;
        t.shell = t.hair;
        match t.validate() {
            Err(RenderError::DepthOrder { lower, upper, .. }) => {
                assert_eq!(lower, "overhead_front_of_face");
                assert_eq!(upper, "shell");
            }
            other => panic!("expected DepthOrder, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_sub_interval_is_rejected() {
        let t = DepthTable { sub_interval: 0.0, ..DepthTable::STANDARD };
        assert!(matches!(t.validate(), Err(RenderError::InvalidConfig(_))));
    }
}
