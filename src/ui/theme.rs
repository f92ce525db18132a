//! Track list palettes for light and dark window appearance
//!
//! Muted topographic greys, a teal accent for visible tracks and amber for
//! the recording indicator.

use gpui::{Hsla, WindowAppearance, rgb};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub bg: Hsla,
    /// Unselected row
    pub bg_card: Hsla,
    pub bg_card_hover: Hsla,
    /// Selected row
    pub bg_selected: Hsla,
    pub text: Hsla,
    /// Hidden tracks, counters, empty state
    pub text_muted: Hsla,
    pub border: Hsla,
    /// Checked boxes and the eye of visible tracks
    pub accent: Hsla,
    /// Record button
    pub success: Hsla,
    pub success_hover: Hsla,
    /// Delete and stop buttons
    pub danger: Hsla,
    /// Live recording dot
    pub recording: Hsla,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: rgb(0x171c1a).into(),
            bg_card: rgb(0x222926).into(),
            bg_card_hover: rgb(0x2c3531).into(),
            bg_selected: rgb(0x173b3a).into(),
            text: rgb(0xe8ece9).into(),
            text_muted: rgb(0x8a9690).into(),
            border: rgb(0x36403b).into(),
            accent: rgb(0x2dd4bf).into(),
            success: rgb(0x0f766e).into(),
            success_hover: rgb(0x115e59).into(),
            danger: rgb(0xc2410c).into(),
            recording: rgb(0xfbbf24).into(),
        }
    }

    pub fn light() -> Self {
        Self {
            bg: rgb(0xf1f3ee).into(),
            bg_card: rgb(0xfbfcf9).into(),
            bg_card_hover: rgb(0xe9ede4).into(),
            bg_selected: rgb(0xccf0ea).into(),
            text: rgb(0x1f2a24).into(),
            text_muted: rgb(0x6b7a71).into(),
            border: rgb(0xd4dacd).into(),
            accent: rgb(0x0d9488).into(),
            success: rgb(0x0f766e).into(),
            success_hover: rgb(0x134e4a).into(),
            danger: rgb(0xb91c1c).into(),
            recording: rgb(0xd97706).into(),
        }
    }

    pub fn from_appearance(appearance: WindowAppearance) -> Self {
        match appearance {
            WindowAppearance::Dark | WindowAppearance::VibrantDark => Self::dark(),
            WindowAppearance::Light | WindowAppearance::VibrantLight => Self::light(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appearance_selects_palette() {
        assert_eq!(Theme::from_appearance(WindowAppearance::Dark).bg, Theme::dark().bg);
        assert_eq!(
            Theme::from_appearance(WindowAppearance::VibrantLight).bg,
            Theme::light().bg
        );
    }

    #[test]
    fn test_selected_rows_stand_out() {
        for theme in [Theme::dark(), Theme::light()] {
            assert_ne!(theme.bg_selected, theme.bg_card);
            assert_ne!(theme.recording, theme.danger);
        }
    }
}
