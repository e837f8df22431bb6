// Particle population: sizing law, per-frame stepping, link fading.

use rand::Rng;

use crate::particle::Particle;
use crate::pointer::PointerState;

pub struct ParticleField {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub const MAX_PARTICLES: usize = 80;
    pub const AREA_PER_PARTICLE: f64 = 15_000.0;
    pub const LINK_DISTANCE: f64 = 120.0;
    pub const LINK_ALPHA: f64 = 0.15;

    /// Population for a given viewport, capped so dense screens don't
    /// drown the pair scan.
    pub fn particle_count(width: f64, height: f64) -> usize {
        let by_area = (width * height / Self::AREA_PER_PARTICLE).floor().max(0.0) as usize;
        by_area.min(Self::MAX_PARTICLES)
    }

    pub fn new(width: f64, height: f64) -> ParticleField {
        Self::with_rng(&mut rand::thread_rng(), width, height)
    }

    pub fn with_rng<R: Rng>(rng: &mut R, width: f64, height: f64) -> ParticleField {
        let count = Self::particle_count(width, height);
        let particles = (0..count)
            .map(|_| Particle::spawn(rng, width, height))
            .collect();

        ParticleField {
            width,
            height,
            particles,
        }
    }

    pub fn step(&mut self, pointer: &PointerState) {
        for particle in &mut self.particles {
            particle.update(pointer, self.width, self.height);
        }
    }

    /// Viewport changed. The population is kept as-is; strays are
    /// clamped back inside the new bounds.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        for particle in &mut self.particles {
            particle.clamp_to(width, height);
        }
    }

    /// Alpha for the line joining two particles `dist` apart, or None
    /// when they are too far apart to link.
    pub fn link_alpha(dist: f64) -> Option<f64> {
        if dist < Self::LINK_DISTANCE {
            Some(Self::LINK_ALPHA * (1.0 - dist / Self::LINK_DISTANCE))
        } else {
            None
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::ParticleField;
    use crate::pointer::PointerState;

    #[test]
    fn count_follows_the_area_law() {
        assert_eq!(ParticleField::particle_count(800.0, 600.0), 32);
        assert_eq!(ParticleField::particle_count(150.0, 100.0), 1);
        assert_eq!(ParticleField::particle_count(149.0, 100.0), 0);
    }

    #[test]
    fn tiny_viewport_gets_no_particles() {
        assert_eq!(ParticleField::particle_count(50.0, 50.0), 0);
        let field = ParticleField::with_rng(&mut StdRng::seed_from_u64(1), 50.0, 50.0);
        assert!(field.particles().is_empty());
    }

    #[test]
    fn huge_viewport_is_capped() {
        assert_eq!(ParticleField::particle_count(10_000.0, 10_000.0), 80);
    }

    #[test]
    fn population_spawns_inside_the_viewport() {
        let field = ParticleField::with_rng(&mut StdRng::seed_from_u64(2), 800.0, 600.0);
        assert_eq!(field.particles().len(), 32);
        for p in field.particles() {
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 800.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 600.0);
        }
    }

    #[test]
    fn stepping_moves_the_population() {
        let mut field = ParticleField::with_rng(&mut StdRng::seed_from_u64(3), 800.0, 600.0);
        let before: Vec<[f64; 2]> = field.particles().iter().map(|p| p.pos).collect();
        field.step(&PointerState::new());
        let moved = field
            .particles()
            .iter()
            .zip(&before)
            .any(|(p, old)| p.pos != *old);
        assert!(moved);
    }

    #[test]
    fn long_run_never_escapes_the_reflection_margin() {
        let mut field = ParticleField::with_rng(&mut StdRng::seed_from_u64(4), 400.0, 300.0);
        let pointer = PointerState::new();
        for _ in 0..5_000 {
            field.step(&pointer);
        }
        // Reflection allows at most one velocity step of overshoot.
        for p in field.particles() {
            assert!(p.pos[0] >= -0.26 && p.pos[0] <= 400.26);
            assert!(p.pos[1] >= -0.26 && p.pos[1] <= 300.26);
        }
    }

    #[test]
    fn link_alpha_fades_with_distance() {
        assert_eq!(ParticleField::link_alpha(0.0), Some(0.15));
        let near = match ParticleField::link_alpha(30.0) {
            Some(a) => a,
            None => panic!("30 is within link distance"),
        };
        let far = match ParticleField::link_alpha(90.0) {
            Some(a) => a,
            None => panic!("90 is within link distance"),
        };
        assert!(near > far);
        assert!(far > 0.0);
    }

    #[test]
    fn link_alpha_cuts_off_at_the_distance_limit() {
        assert_eq!(ParticleField::link_alpha(120.0), None);
        assert_eq!(ParticleField::link_alpha(300.0), None);
        let just_inside = match ParticleField::link_alpha(119.999) {
            Some(a) => a,
            None => panic!("just inside the limit should link"),
        };
        assert!(just_inside > 0.0 && just_inside < 1e-5);
    }

    #[test]
    fn resize_keeps_the_population_and_clamps_it() {
        let mut field = ParticleField::with_rng(&mut StdRng::seed_from_u64(5), 800.0, 600.0);
        let count = field.particles().len();
        field.resize(100.0, 50.0);
        assert_eq!(field.particles().len(), count);
        for p in field.particles() {
            assert!(p.pos[0] <= 100.0);
            assert!(p.pos[1] <= 50.0);
        }
        assert_eq!(field.width(), 100.0);
        assert_eq!(field.height(), 50.0);
    }
}
