use glam::Vec3;
use rand::Rng;

// --- Helper Functions ---

/// Uniform weights in `[-max_magnitude, max_magnitude)` for a three-input neuron.
pub fn random_weights<R: Rng + ?Sized>(rng: &mut R, max_magnitude: f32) -> Vec3 {
    let w0 = rng.gen_range(-max_magnitude..max_magnitude);
    let w1 = rng.gen_range(-max_magnitude..max_magnitude);
    let w2 = rng.gen_range(-max_magnitude..max_magnitude);
    Vec3::new(w0, w1, w2)
}

#[inline]
pub fn activate(x: f32) -> f32 {
    x.tanh()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_weights_bounded() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let w = random_weights(&mut rng, 2.0);
            assert!(w.abs().max_element() <= 2.0);
        }
    }

    #[test]
    fn test_activate_saturates() {
        assert_eq!(activate(0.0), 0.0);
        assert!(activate(50.0) > 0.99);
        assert!(activate(-50.0) < -0.99);
    }
}
