//! Animation clips and tracks.

/// Node property animated by a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackProperty {
    Translation,
    Rotation,
    Scale,
    MorphWeights,
}

impl TrackProperty {
    /// Property suffix as it appears in `<target>.<property>` paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackProperty::Translation => "translation",
            TrackProperty::Rotation => "rotation",
            TrackProperty::Scale => "scale",
            TrackProperty::MorphWeights => "weights",
        }
    }
}

/// One animated property sequence inside a clip.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Name of the targeted node. May be empty.
    pub target_name: String,
    /// Declaration index of the targeted node, when the target resolved.
    pub target_node: Option<usize>,
    /// Animated property.
    pub property: TrackProperty,
    /// Flat keyframe component values. Vector properties store 3 floats per
    /// keyframe, rotations 4, morph weights 1 per target per keyframe.
    pub values: Vec<f32>,
}

impl Track {
    /// The first keyframe's components, when at least one full keyframe is
    /// present.
    pub fn first_keyframe(&self) -> Option<&[f32]> {
        let stride = match self.property {
            TrackProperty::Rotation => 4,
            TrackProperty::MorphWeights => 1,
            _ => 3,
        };
        if self.values.len() < stride {
            return None;
        }
        Some(&self.values[..stride])
    }
}

/// A named animation clip: an ordered list of tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// Clip name as declared. May be empty.
    pub name: String,
    /// Tracks in declaration order.
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    /// Name for diagnostics, falling back to `"Unnamed clip"`.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unnamed clip"
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_keyframe_respects_stride() {
        let track = Track {
            target_name: "hips".to_string(),
            target_node: Some(1),
            property: TrackProperty::Scale,
            values: vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0],
        };
        assert_eq!(track.first_keyframe(), Some(&[1.0, 1.0, 1.0][..]));

        let rotation = Track {
            property: TrackProperty::Rotation,
            values: vec![0.0, 0.0, 0.0, 1.0],
            ..track.clone()
        };
        assert_eq!(rotation.first_keyframe(), Some(&[0.0, 0.0, 0.0, 1.0][..]));
    }

    #[test]
    fn property_suffixes_match_target_paths() {
        assert_eq!(TrackProperty::Scale.as_str(), "scale");
        assert_eq!(TrackProperty::Translation.as_str(), "translation");
        assert_eq!(TrackProperty::Rotation.as_str(), "rotation");
        assert_eq!(TrackProperty::MorphWeights.as_str(), "weights");
    }

    #[test]
    fn first_keyframe_missing_when_track_is_short() {
        let track = Track {
            target_name: String::new(),
            target_node: None,
            property: TrackProperty::Scale,
            values: vec![1.0, 1.0],
        };
        assert_eq!(track.first_keyframe(), None);
    }
}
