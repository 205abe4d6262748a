use cubeview_texture::PatternKind;
use serde::{Deserialize, Serialize};

/// Externally-owned viewer configuration: everything the side panel edits.
///
/// The app owns one of these and passes it to the renderer each frame.
/// Changing any field is reflected in the next render; only a pattern
/// change requires a texture re-upload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewerSettings {
    /// Flat material color (linear RGB).
    pub color: [f32; 3],
    /// Surface roughness in `[0, 1]`; higher means duller highlights.
    pub roughness: f32,
    /// Metalness in `[0, 1]`; tints the specular highlight toward the
    /// base color.
    pub metallic: f32,
    /// Procedural pattern applied on top of the flat color.
    pub pattern: PatternKind,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            color: [0.8, 0.8, 0.8],
            roughness: 0.5,
            metallic: 0.0,
            pattern: PatternKind::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_pattern() {
        let s = ViewerSettings::default();
        assert_eq!(s.pattern, PatternKind::None);
        assert!(s.roughness >= 0.0 && s.roughness <= 1.0);
    }
}
