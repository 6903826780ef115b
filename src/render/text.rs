use std::sync::Arc;

use crate::foundation::{
    core::Rgba8,
    error::{CurveError, CurveResult},
};

/// Font used for the coordinate labels.
///
/// Font bytes are supplied by the caller; the crate bundles no fonts.
#[derive(Clone)]
pub struct LabelFont {
    bytes: Arc<Vec<u8>>,
    family: String,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont")
            .field("family", &self.family)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

impl LabelFont {
    /// Register font bytes (TTF/OTF) and remember the primary family name.
    pub fn from_bytes(bytes: Vec<u8>) -> CurveResult<Self> {
        let mut engine = TextLayoutEngine::new();
        let family = engine.register(&bytes)?;
        Ok(Self {
            bytes: Arc::new(bytes),
            family,
        })
    }

    /// Read a font file from disk.
    pub fn from_path(path: &std::path::Path) -> CurveResult<Self> {
        use anyhow::Context as _;
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    /// Primary family name found in the font data.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &Arc<Vec<u8>> {
        &self.bytes
    }
}

/// Stateful helper for shaping single-line labels with Parley.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    registered: Option<String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: None,
        }
    }

    /// Register font bytes and return the primary family name.
    pub fn register(&mut self, font_bytes: &[u8]) -> CurveResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CurveError::validation("no font families registered from font bytes"))?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CurveError::validation("registered font family has no name"))?
            .to_string();
        self.registered = Some(family_name.clone());
        Ok(family_name)
    }

    /// Shape a single unwrapped line of text.
    ///
    /// [`TextLayoutEngine::register`] must have been called first.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: Rgba8,
    ) -> CurveResult<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CurveError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let family_name = self
            .registered
            .clone()
            .ok_or_else(|| CurveError::render("no label font registered"))?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}
