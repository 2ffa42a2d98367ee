use crate::model::RenderParams;

/// CSS values for the badge root and its string, card and shadow children.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeStyles {
    pub root_transform: String,
    /// Value for the `--rope` custom property.
    pub rope: String,
    pub transform_origin: String,
    pub string_transform: String,
    pub card_transform: String,
    pub shadow_transform: String,
    pub shadow_opacity: String,
}

impl BadgeStyles {
    pub fn from_params(p: &RenderParams) -> Self {
        Self {
            root_transform: format!("rotate({:.2}deg)", p.rotation_degrees),
            rope: format!("{}px", p.rope_length),
            transform_origin: format!("50% -{}px", p.rope_length),
            string_transform: format!("translateX(-50%) scaleY({:.3})", p.string_stretch),
            card_transform: format!(
                "translateZ(0) rotateX({:.2}deg) rotateY({:.2}deg)",
                p.card_tilt_x, p.card_tilt_y
            ),
            shadow_transform: format!(
                "translate(calc(-50% + {}px), {}px) scale({:.3}, 1)",
                p.shadow_sway, p.shadow_offset, p.shadow_scale
            ),
            shadow_opacity: p.shadow_opacity.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_css_values() {
        let params = RenderParams {
            rotation_degrees: 14.3239,
            rope_length: 160.0,
            string_stretch: 1.0275,
            card_tilt_x: -2.578,
            card_tilt_y: 4.0107,
            shadow_sway: 4.5,
            shadow_offset: 16.0,
            shadow_scale: 1.18621,
            shadow_opacity: 0.57,
        };
        let styles = BadgeStyles::from_params(&params);
        assert_eq!(styles.root_transform, "rotate(14.32deg)");
        assert_eq!(styles.rope, "160px");
        assert_eq!(styles.transform_origin, "50% -160px");
        assert_eq!(styles.string_transform, "translateX(-50%) scaleY(1.028)");
        assert_eq!(styles.card_transform, "translateZ(0) rotateX(-2.58deg) rotateY(4.01deg)");
        assert_eq!(styles.shadow_transform, "translate(calc(-50% + 4.5px), 16px) scale(1.186, 1)");
        assert_eq!(styles.shadow_opacity, "0.57");
    }

    #[test]
    fn negative_rotation_keeps_sign() {
        let params = RenderParams {
            rotation_degrees: -3.14159,
            rope_length: 90.5,
            string_stretch: 1.0,
            card_tilt_x: 0.0,
            card_tilt_y: 0.0,
            shadow_sway: -0.25,
            shadow_offset: 14.0,
            shadow_scale: 1.0,
            shadow_opacity: 0.5,
        };
        let styles = BadgeStyles::from_params(&params);
        assert_eq!(styles.root_transform, "rotate(-3.14deg)");
        assert_eq!(styles.rope, "90.5px");
        assert_eq!(styles.shadow_transform, "translate(calc(-50% + -0.25px), 14px) scale(1.000, 1)");
    }
}
