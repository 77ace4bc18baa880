//! Render adapter traits and sprite styling
//!
//! The simulation never touches a concrete render tree. A `RenderHost`
//! resolves the mount point named by the configured selector, a `Mount`
//! creates sprite nodes inside it, and each particle owns the
//! `VisualElement` it was given.

/// CSS class applied to every confetti sprite
pub const PARTICLE_CLASS: &str = "particle";

/// Stacking order for confetti sprites
pub const PARTICLE_Z_INDEX: i32 = 1000;

/// A positionable, rotatable, detachable on-screen node
pub trait VisualElement {
    /// Move the node to absolute pixel coordinates and rotate it
    fn set_transform(&mut self, top: f64, left: f64, rotation_deg: f64);

    /// Remove the node from its parent. Detaching twice is harmless.
    fn detach(&mut self);
}

/// A container that confetti sprites are appended into
pub trait Mount {
    fn append(&mut self, sprite: &SpriteStyle) -> Box<dyn VisualElement>;
}

/// Resolves selectors to mount points
pub trait RenderHost {
    /// Zero-or-one container for `selector`. `None` is not an error.
    fn resolve_mount(&self, selector: &str) -> Option<Box<dyn Mount>>;
}

/// Everything needed to create or restyle one confetti sprite
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteStyle {
    pub src: String,
    pub size: f64,
    pub top: f64,
    pub left: f64,
    pub rotation: f64,
}

impl SpriteStyle {
    pub fn new(src: impl Into<String>, size: f64, top: f64, left: f64, rotation: f64) -> Self {
        Self {
            src: src.into(),
            size,
            top,
            left,
            rotation,
        }
    }

    /// Copy of this style moved and rotated
    pub fn with_transform(&self, top: f64, left: f64, rotation: f64) -> Self {
        Self {
            top,
            left,
            rotation,
            ..self.clone()
        }
    }

    /// Inline style declaration for the sprite
    pub fn to_css(&self) -> String {
        [
            format!("min-width:{}px", self.size),
            format!("width:{}px", self.size),
            format!("z-index:{}", PARTICLE_Z_INDEX),
            "pointer-events:none".to_string(),
            "position:absolute".to_string(),
            "will-change:transform".to_string(),
            format!("top:{}px", self.top),
            format!("left:{}px", self.left),
            format!("transform:{}", rotate_css(self.rotation)),
        ]
        .join(";")
    }
}

/// `rotate(<deg>deg)` transform function
pub fn rotate_css(rotation_deg: f64) -> String {
    format!("rotate({}deg)", rotation_deg)
}
