//! Particle spawning

use crate::config::ConfettiConfig;
use crate::particle::{Drift, Particle, ParticleSet};
use crate::rand::ParticleRng;
use crate::render::{RenderHost, SpriteStyle};

/// Create one particle at the launch point and append its sprite to the mount.
///
/// Returns false without touching the render tree when the mount cannot be
/// resolved or there is no size to draw from.
pub fn spawn_particle(
    config: &ConfettiConfig,
    host: &dyn RenderHost,
    rng: &mut ParticleRng,
    particles: &mut ParticleSet,
) -> bool {
    let Some(mut mount) = host.resolve_mount(&config.selector) else {
        log::trace!("mount '{}' not found, skipping spawn", config.selector);
        return false;
    };

    let up_velocity = rng.next_f64() * config.y_velocity_max;
    let side_velocity = rng.next_f64() * config.x_velocity_max;
    let spin_val = rng.range(0.0, 360.0);
    let spin_velocity = rng.next_f64() * config.spin_velocity_max * rng.sign();
    let direction = Drift::from_sign(rng.sign());

    let Some(&size) = rng.choose(&config.sizes) else {
        log::warn!("no particle sizes configured, skipping spawn");
        return false;
    };
    let Some(image) = rng.choose(&config.images).cloned() else {
        return false;
    };

    let left = config.position.x;
    let top = config.position.y;

    let element = mount.append(&SpriteStyle::new(image.clone(), size, top, left, spin_val));

    particles.push(
        Particle {
            size,
            left,
            top,
            up_velocity,
            side_velocity,
            direction,
            spin_val,
            spin_velocity,
            image,
            detached: false,
        },
        element,
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessDocument;
    use confetti_core::Position;

    fn config() -> ConfettiConfig {
        ConfettiConfig::new(
            "#stage",
            Position::new(120.0, 300.0),
            vec!["a.png".into(), "b.png".into()],
        )
    }

    #[test]
    fn spawn_initializes_within_bounds() {
        let doc = HeadlessDocument::with_mount("#stage");
        let config = config();
        let mut rng = ParticleRng::new(42);
        let mut set = ParticleSet::new();

        for _ in 0..100 {
            assert!(spawn_particle(&config, &doc, &mut rng, &mut set));
        }
        assert_eq!(set.len(), 100);
        assert_eq!(doc.attached_count(), 100);

        for p in set.iter() {
            assert_eq!(p.left, 120.0);
            assert_eq!(p.top, 300.0);
            assert!(config.sizes.contains(&p.size));
            assert!((0.0..40.0).contains(&p.up_velocity));
            assert!((0.0..15.0).contains(&p.side_velocity));
            assert!((0.0..360.0).contains(&p.spin_val));
            assert!(p.spin_velocity.abs() < 35.0);
            assert!(config.images.contains(&p.image));
            assert!(!p.detached);
        }

        // Both images and both drift directions show up
        assert!(set.iter().any(|p| p.image == "a.png"));
        assert!(set.iter().any(|p| p.image == "b.png"));
        assert!(set.iter().any(|p| p.direction == Drift::Left));
        assert!(set.iter().any(|p| p.direction == Drift::Right));
        assert!(set.iter().any(|p| p.spin_velocity < 0.0));
        assert!(set.iter().any(|p| p.spin_velocity > 0.0));
    }

    #[test]
    fn sprite_is_created_at_launch_point() {
        let doc = HeadlessDocument::with_mount("#stage");
        let config = config().with_sizes(vec![15.0]);
        let mut rng = ParticleRng::new(3);
        let mut set = ParticleSet::new();

        spawn_particle(&config, &doc, &mut rng, &mut set);
        let node = &doc.children("#stage")[0];
        assert_eq!(node.class, "particle");
        assert!(node.style.starts_with("min-width:15px;width:15px;z-index:1000"));
        assert!(node.style.contains("top:300px;left:120px"));
    }

    #[test]
    fn missing_mount_is_a_no_op() {
        let doc = HeadlessDocument::new();
        let mut rng = ParticleRng::new(1);
        let mut set = ParticleSet::new();
        assert!(!spawn_particle(&config(), &doc, &mut rng, &mut set));
        assert!(set.is_empty());
        assert_eq!(doc.node_count(), 0);
    }

    #[test]
    fn empty_sizes_is_a_no_op() {
        let doc = HeadlessDocument::with_mount("#stage");
        let config = config().with_sizes(Vec::new());
        let mut rng = ParticleRng::new(1);
        let mut set = ParticleSet::new();
        assert!(!spawn_particle(&config, &doc, &mut rng, &mut set));
        assert_eq!(doc.node_count(), 0);
    }
}
