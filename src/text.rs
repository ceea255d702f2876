//! Parley-backed text layout. The engine owns the font and layout
//! contexts and a single registered font family; callers hand it plain
//! text and get positioned glyph runs back.

use crate::error::{GardenError, GardenResult};

/// RGBA8 brush color carried through Parley layout into glyph runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrush {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Stateful text shaper. A font must be registered before any layout is
/// produced; the scene's labels all use the one registered family.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    family: Option<String>,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family: None,
        }
    }

    /// Register a font from raw bytes (TTF/OTF). The first family in the
    /// file becomes the family every later layout uses.
    pub fn register_font(&mut self, bytes: &[u8]) -> GardenResult<()> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| GardenError::validation("no font families in font bytes"))?;

        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| GardenError::validation("registered font family has no name"))?
            .to_string();

        tracing::debug!(family = %family, "font registered");
        self.family = Some(family);
        Ok(())
    }

    pub fn has_font(&self) -> bool {
        self.family.is_some()
    }

    /// Shape and lay out a single run of plain text at `size_px`.
    pub fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrush,
    ) -> GardenResult<parley::Layout<TextBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(GardenError::validation("text size must be finite and > 0"));
        }
        let family = self
            .family
            .clone()
            .ok_or_else(|| GardenError::validation("no font registered for text layout"))?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONT: &[u8] =
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/DejaVuSans.ttf"));

    #[test]
    fn layout_without_a_font_is_an_error() {
        let mut engine = TextEngine::new();
        assert!(!engine.has_font());
        let err = engine
            .layout("hi", 24.0, TextBrush::default())
            .err()
            .unwrap();
        assert!(matches!(err, GardenError::Validation(_)));
    }

    #[test]
    fn garbage_font_bytes_are_rejected() {
        let mut engine = TextEngine::new();
        assert!(engine.register_font(b"not a font").is_err());
        assert!(!engine.has_font());
    }

    #[test]
    fn registered_font_produces_a_nonempty_layout() {
        let mut engine = TextEngine::new();
        engine.register_font(FONT).unwrap();
        let layout = engine
            .layout("Flowers", 48.0, TextBrush::default())
            .unwrap();
        assert!(layout.width() > 0.0);
        assert!(layout.height() > 0.0);
    }

    #[test]
    fn bad_sizes_are_rejected() {
        let mut engine = TextEngine::new();
        engine.register_font(FONT).unwrap();
        assert!(engine.layout("x", 0.0, TextBrush::default()).is_err());
        assert!(engine.layout("x", f32::NAN, TextBrush::default()).is_err());
    }
}
