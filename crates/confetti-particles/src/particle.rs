//! Particle state and the per-instance particle arena

use crate::render::VisualElement;
use serde::Serialize;

/// Pixels below the viewport bottom a particle must pass to count as exited
pub const OFFSCREEN_MARGIN: f64 = 50.0;

/// `top` value past which a particle has left a viewport of `viewport_height`
pub fn offscreen_threshold(viewport_height: f64) -> f64 {
    viewport_height + OFFSCREEN_MARGIN
}

/// Horizontal drift. `Left` pushes the particle towards smaller `left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Drift {
    Left,
    Right,
}

impl Drift {
    pub fn from_sign(sign: f64) -> Self {
        if sign < 0.0 {
            Drift::Right
        } else {
            Drift::Left
        }
    }

    /// Multiplier applied as `left -= side_velocity * sign`
    pub fn sign(self) -> f64 {
        match self {
            Drift::Left => 1.0,
            Drift::Right => -1.0,
        }
    }
}

/// Simulation state of one confetto
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub size: f64,
    pub left: f64,
    pub top: f64,
    pub up_velocity: f64,
    pub side_velocity: f64,
    pub direction: Drift,
    /// Rotation in degrees
    pub spin_val: f64,
    pub spin_velocity: f64,
    pub image: String,
    /// Set once the visual element has been removed from the render tree
    pub detached: bool,
}

impl Particle {
    /// Advance one step.
    ///
    /// Vertical speed loses one pixel per step and is capped at the
    /// particle's size, so every particle eventually falls.
    pub fn advance(&mut self) {
        self.left -= self.side_velocity * self.direction.sign();
        self.top -= self.up_velocity;
        self.up_velocity = self.size.min(self.up_velocity - 1.0);
        self.spin_val += self.spin_velocity;
    }

    pub fn is_offscreen(&self, viewport_height: f64) -> bool {
        self.top > offscreen_threshold(viewport_height)
    }
}

struct Slot {
    particle: Particle,
    element: Box<dyn VisualElement>,
}

/// Live particles of one instance, each paired with the element it owns.
///
/// Exited particles stay in the set with their element detached until the
/// whole run finishes. The spawner stops at the configured limit, so the
/// set never grows beyond it.
#[derive(Default)]
pub struct ParticleSet {
    slots: Vec<Slot>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn push(&mut self, particle: Particle, element: Box<dyn VisualElement>) {
        self.slots.push(Slot { particle, element });
    }

    /// Step every particle, push its transform to the element, and detach
    /// elements that have passed the off-screen threshold.
    pub fn integrate(&mut self, viewport_height: f64) {
        for slot in &mut self.slots {
            let p = &mut slot.particle;
            p.advance();
            slot.element.set_transform(p.top, p.left, p.spin_val);

            if !p.detached && p.is_offscreen(viewport_height) {
                slot.element.detach();
                p.detached = true;
            }
        }
    }

    /// True when every particle is past the threshold. Vacuously true when empty.
    pub fn all_offscreen(&self, viewport_height: f64) -> bool {
        self.slots
            .iter()
            .all(|s| s.particle.is_offscreen(viewport_height))
    }

    /// Drop every particle, detaching any element still attached
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if !slot.particle.detached {
                slot.element.detach();
                slot.particle.detached = true;
            }
        }
        self.slots.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().map(|s| &s.particle)
    }

    /// Copy of the current particle states
    pub fn snapshot(&self) -> Vec<Particle> {
        self.iter().cloned().collect()
    }
}
