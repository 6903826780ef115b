use crate::{foundation::core::Viewport, render::surface::Surface};

/// What the animation reads from its hosting environment on every tick.
pub trait FrameHost {
    /// Current viewport size; read fresh each frame.
    fn viewport(&self) -> Viewport;

    /// Drawing surface, or `None` when it is not available this frame.
    fn surface(&mut self) -> Option<&mut dyn Surface>;
}

/// Host with a fixed viewport and an optional owned surface.
#[derive(Debug)]
pub struct StaticHost<S> {
    /// Viewport reported to the animation; may be changed between ticks.
    pub viewport: Viewport,
    /// Surface handed out each frame.
    pub surface: Option<S>,
}

impl<S: Surface> StaticHost<S> {
    /// Host with a surface attached.
    pub fn new(viewport: Viewport, surface: S) -> Self {
        Self {
            viewport,
            surface: Some(surface),
        }
    }

    /// Host whose surface is missing.
    pub fn detached(viewport: Viewport) -> Self {
        Self {
            viewport,
            surface: None,
        }
    }
}

impl<S: Surface> FrameHost for StaticHost<S> {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn surface(&mut self) -> Option<&mut dyn Surface> {
        self.surface.as_mut().map(|s| s as &mut dyn Surface)
    }
}
