//! Interaction modes reported by the host application.
//!
//! The set is closed and fixed at build time. Each mode has an exact label
//! (`EDIT_MESH`) used on the wire and a lowercase key (`edit_mesh`) used in the
//! ledger file, since INI keys are case-folded on write.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WorkHoursError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, uniffi::Enum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionMode {
    Object,
    EditMesh,
    EditCurve,
    EditSurface,
    EditText,
    EditArmature,
    EditMetaball,
    EditLattice,
    Pose,
    Sculpt,
    PaintWeight,
    PaintVertex,
    PaintTexture,
    Particle,
}

impl InteractionMode {
    pub const COUNT: usize = 14;

    /// Every mode, in display order.
    pub const ALL: [InteractionMode; InteractionMode::COUNT] = [
        InteractionMode::Object,
        InteractionMode::EditMesh,
        InteractionMode::EditCurve,
        InteractionMode::EditSurface,
        InteractionMode::EditText,
        InteractionMode::EditArmature,
        InteractionMode::EditMetaball,
        InteractionMode::EditLattice,
        InteractionMode::Pose,
        InteractionMode::Sculpt,
        InteractionMode::PaintWeight,
        InteractionMode::PaintVertex,
        InteractionMode::PaintTexture,
        InteractionMode::Particle,
    ];

    /// Position of this mode in [`InteractionMode::ALL`]; used to index bucket arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The host's label for this mode.
    pub fn label(self) -> &'static str {
        match self {
            InteractionMode::Object => "OBJECT",
            InteractionMode::EditMesh => "EDIT_MESH",
            InteractionMode::EditCurve => "EDIT_CURVE",
            InteractionMode::EditSurface => "EDIT_SURFACE",
            InteractionMode::EditText => "EDIT_TEXT",
            InteractionMode::EditArmature => "EDIT_ARMATURE",
            InteractionMode::EditMetaball => "EDIT_METABALL",
            InteractionMode::EditLattice => "EDIT_LATTICE",
            InteractionMode::Pose => "POSE",
            InteractionMode::Sculpt => "SCULPT",
            InteractionMode::PaintWeight => "PAINT_WEIGHT",
            InteractionMode::PaintVertex => "PAINT_VERTEX",
            InteractionMode::PaintTexture => "PAINT_TEXTURE",
            InteractionMode::Particle => "PARTICLE",
        }
    }

    /// Key under which this mode is stored in a ledger section.
    pub fn key(self) -> &'static str {
        match self {
            InteractionMode::Object => "object",
            InteractionMode::EditMesh => "edit_mesh",
            InteractionMode::EditCurve => "edit_curve",
            InteractionMode::EditSurface => "edit_surface",
            InteractionMode::EditText => "edit_text",
            InteractionMode::EditArmature => "edit_armature",
            InteractionMode::EditMetaball => "edit_metaball",
            InteractionMode::EditLattice => "edit_lattice",
            InteractionMode::Pose => "pose",
            InteractionMode::Sculpt => "sculpt",
            InteractionMode::PaintWeight => "paint_weight",
            InteractionMode::PaintVertex => "paint_vertex",
            InteractionMode::PaintTexture => "paint_texture",
            InteractionMode::Particle => "particle",
        }
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InteractionMode {
    type Err = WorkHoursError;

    /// Accepts the label in any case, so both `SCULPT` and the stored `sculpt` parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        InteractionMode::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| WorkHoursError::UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for mode in InteractionMode::ALL {
            assert_eq!(mode.label().parse::<InteractionMode>().unwrap(), mode);
            assert_eq!(mode.key().parse::<InteractionMode>().unwrap(), mode);
        }
    }

    #[test]
    fn index_matches_position_in_all() {
        for (position, mode) in InteractionMode::ALL.into_iter().enumerate() {
            assert_eq!(mode.index(), position);
        }
    }

    #[test]
    fn key_is_lowercase_label() {
        for mode in InteractionMode::ALL {
            assert_eq!(mode.key(), mode.label().to_ascii_lowercase());
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = "EDIT_GPENCIL".parse::<InteractionMode>().unwrap_err();
        assert!(matches!(err, WorkHoursError::UnknownMode(label) if label == "EDIT_GPENCIL"));
    }

    #[test]
    fn serde_uses_host_labels() {
        let json = serde_json::to_string(&InteractionMode::PaintWeight).unwrap();
        assert_eq!(json, "\"PAINT_WEIGHT\"");
        let parsed: InteractionMode = serde_json::from_str("\"EDIT_MESH\"").unwrap();
        assert_eq!(parsed, InteractionMode::EditMesh);
    }
}
