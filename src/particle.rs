// Simple particle struct to keep track of position, velocity, and look

use rand::Rng;
use vecmath::{vec2_add, vec2_len, vec2_normalized, vec2_scale, vec2_sub, Vector2};

use crate::pointer::PointerState;

pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    /// Max distance a pointer nudge moves a particle in one frame.
    pub const REPULSION_GAIN: f64 = 2.0;

    pub fn spawn<R: Rng>(rng: &mut R, width: f64, height: f64) -> Particle {
        Particle {
            pos: [rng.gen::<f64>() * width, rng.gen::<f64>() * height],
            vel: [
                (rng.gen::<f64>() - 0.5) * 0.5,
                (rng.gen::<f64>() - 0.5) * 0.5,
            ],
            radius: rng.gen::<f64>() * 2.0 + 0.5,
            opacity: rng.gen::<f64>() * 0.5 + 0.1,
        }
    }

    /// One frame of motion: pointer repulsion, then velocity, then
    /// boundary reflection.
    pub fn update(&mut self, pointer: &PointerState, width: f64, height: f64) {
        if let Some(mouse) = pointer.position() {
            let to_pointer = vec2_sub(mouse, self.pos);
            let dist = vec2_len(to_pointer);
            // A particle exactly under the pointer has no direction to
            // be pushed in, so it is left alone.
            if dist > 0.0 && dist < pointer.radius() {
                let strength = (pointer.radius() - dist) / pointer.radius();
                let push = vec2_scale(vec2_normalized(to_pointer), strength * Self::REPULSION_GAIN);
                // Position-only nudge; velocity is untouched.
                self.pos = vec2_sub(self.pos, push);
            }
        }

        self.pos = vec2_add(self.pos, self.vel);

        // Reflect off the edges without clamping; an overshoot drifts
        // back inside on following frames.
        if self.pos[0] < 0.0 || self.pos[0] > width {
            self.vel[0] = -self.vel[0];
        }
        if self.pos[1] < 0.0 || self.pos[1] > height {
            self.vel[1] = -self.vel[1];
        }
    }

    /// Pulls the particle back inside freshly shrunk bounds.
    pub fn clamp_to(&mut self, width: f64, height: f64) {
        self.pos = [self.pos[0].min(width), self.pos[1].min(height)];
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::Particle;
    use crate::pointer::PointerState;

    fn fixed(pos: [f64; 2], vel: [f64; 2]) -> Particle {
        Particle {
            pos,
            vel,
            radius: 1.0,
            opacity: 0.3,
        }
    }

    #[test]
    fn spawn_stays_in_documented_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let p = Particle::spawn(&mut rng, 800.0, 600.0);
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 800.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 600.0);
            assert!(p.vel[0] >= -0.25 && p.vel[0] < 0.25);
            assert!(p.vel[1] >= -0.25 && p.vel[1] < 0.25);
            assert!(p.radius >= 0.5 && p.radius < 2.5);
            assert!(p.opacity >= 0.1 && p.opacity < 0.6);
        }
    }

    #[test]
    fn advances_by_velocity_without_pointer() {
        let mut p = fixed([10.0, 10.0], [1.0, -2.0]);
        p.update(&PointerState::new(), 100.0, 100.0);
        assert_eq!(p.pos, [11.0, 8.0]);
        assert_eq!(p.vel, [1.0, -2.0]);
    }

    #[test]
    fn reflects_past_the_left_edge_without_clamping() {
        let mut p = fixed([0.2, 5.0], [-0.5, 0.0]);
        p.update(&PointerState::new(), 100.0, 10.0);
        assert!((p.pos[0] - -0.3).abs() < 1e-12);
        assert_eq!(p.vel[0], 0.5);
        p.update(&PointerState::new(), 100.0, 10.0);
        assert!((p.pos[0] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn reflects_past_the_far_edge() {
        let mut p = fixed([99.9, 5.0], [0.2, 0.0]);
        p.update(&PointerState::new(), 100.0, 10.0);
        assert!((p.pos[0] - 100.1).abs() < 1e-12);
        assert_eq!(p.vel[0], -0.2);
    }

    #[test]
    fn pointer_pushes_the_particle_away() {
        let mut p = fixed([50.0, 50.0], [0.0, 0.0]);
        let mut pointer = PointerState::new();
        pointer.set(60.0, 50.0);
        p.update(&pointer, 500.0, 500.0);
        let expected_push = (120.0 - 10.0) / 120.0 * Particle::REPULSION_GAIN;
        assert!((p.pos[0] - (50.0 - expected_push)).abs() < 1e-12);
        assert_eq!(p.pos[1], 50.0);
    }

    #[test]
    fn pointer_directly_on_top_leaves_position_alone() {
        let mut p = fixed([50.0, 50.0], [0.1, 0.2]);
        let mut pointer = PointerState::new();
        pointer.set(50.0, 50.0);
        p.update(&pointer, 500.0, 500.0);
        // Only the velocity advance applies.
        assert!((p.pos[0] - 50.1).abs() < 1e-12);
        assert!((p.pos[1] - 50.2).abs() < 1e-12);
    }

    #[test]
    fn pointer_outside_radius_has_no_effect() {
        let mut p = fixed([50.0, 50.0], [0.0, 0.0]);
        let mut pointer = PointerState::new();
        pointer.set(200.0, 50.0);
        p.update(&pointer, 500.0, 500.0);
        assert_eq!(p.pos, [50.0, 50.0]);
    }

    #[test]
    fn repulsion_never_touches_velocity() {
        let mut p = fixed([50.0, 50.0], [0.05, -0.05]);
        let mut pointer = PointerState::new();
        pointer.set(70.0, 60.0);
        p.update(&pointer, 500.0, 500.0);
        assert_eq!(p.vel, [0.05, -0.05]);
    }

    #[test]
    fn clamp_pulls_back_inside_new_bounds() {
        let mut p = fixed([750.0, 80.0], [0.0, 0.0]);
        p.clamp_to(400.0, 300.0);
        assert_eq!(p.pos, [400.0, 80.0]);
    }
}
