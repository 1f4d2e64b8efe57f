//! Animation checks: zero scale on the first keyframe.

use crate::report::{Finding, Severity};
use crate::rules::ValidationRule;
use stagecheck_scene::{SceneSnapshot, TrackProperty};

/// Warns when a scale track starts at scale zero.
///
/// Only the first keyframe is inspected; a later zero-scale keyframe does
/// not trigger a finding. Every qualifying track in a clip emits its own
/// finding.
pub struct ZeroScaleAnimationRule;

impl ValidationRule for ZeroScaleAnimationRule {
    fn id(&self) -> &'static str {
        "animation/zero-scale"
    }

    fn description(&self) -> &'static str {
        "Flags scale tracks whose first keyframe contains a zero component"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, scene: &SceneSnapshot) -> Vec<Finding> {
        let mut findings = Vec::new();
        for clip in &scene.animations {
            for track in &clip.tracks {
                if track.property != TrackProperty::Scale {
                    continue;
                }
                let Some(first) = track.first_keyframe() else {
                    continue;
                };
                let minimum = first.iter().copied().fold(f32::INFINITY, f32::min);
                if minimum == 0.0 {
                    findings.push(
                        Finding::warning(format!(
                            "Animation \"{}\" scales down to zero",
                            clip.display_name()
                        ))
                        .with_detail(format!(
                            "track \"{}.{}\" starts at [{}, {}, {}]",
                            track.target_name,
                            track.property.as_str(),
                            first[0],
                            first[1],
                            first[2]
                        )),
                    );
                }
            }
        }
        findings
    }
}
