//! Palette shared by every front-end.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Semantic color slot; front-ends resolve it through [`Theme::tone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Danger,
    Success,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub background: Rgb,
    pub surface: Rgb,
    pub text: Rgb,
    pub text_secondary: Rgb,
    pub danger: Rgb,
    pub success: Rgb,
    pub warning: Rgb,
    pub danger_surface: Rgb,
    pub success_surface: Rgb,
    pub track: Rgb,
}

impl Theme {
    pub const fn tone(&self, tone: Tone) -> Rgb {
        match tone {
            Tone::Primary => self.primary,
            Tone::Danger => self.danger,
            Tone::Success => self.success,
            Tone::Warning => self.warning,
        }
    }

    /// Card background behind a result of the given tone.
    pub const fn tone_surface(&self, tone: Tone) -> Rgb {
        match tone {
            Tone::Danger => self.danger_surface,
            Tone::Success => self.success_surface,
            Tone::Primary | Tone::Warning => self.surface,
        }
    }
}

pub const THEME: Theme = Theme {
    primary: Rgb::new(0x3A, 0x86, 0xFF),
    secondary: Rgb::new(0x50, 0xE3, 0xC2),
    background: Rgb::new(0xF0, 0xF4, 0xF8),
    surface: Rgb::new(0xFF, 0xFF, 0xFF),
    text: Rgb::new(0x1C, 0x2A, 0x3A),
    text_secondary: Rgb::new(0x6E, 0x7D, 0x8C),
    danger: Rgb::new(0xFF, 0x6B, 0x6B),
    success: Rgb::new(0x4C, 0xAF, 0x50),
    warning: Rgb::new(0xFF, 0x9F, 0x43),
    danger_surface: Rgb::new(0xFF, 0xF1, 0xF1),
    success_surface: Rgb::new(0xF0, 0xFF, 0xF0),
    track: Rgb::new(0xE0, 0xE7, 0xF1),
};
