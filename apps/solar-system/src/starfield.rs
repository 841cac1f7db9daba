use glam::Vec3;
use rand::Rng;

/// `count` points uniformly distributed in the cube `[-extent, extent]³`.
pub fn generate_starfield<R: Rng + ?Sized>(rng: &mut R, count: usize, extent: f32) -> Vec<Vec3> {
    let extent = extent.abs();
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn exact_count_inside_cube() {
        let mut rng = StdRng::seed_from_u64(7);
        let stars = generate_starfield(&mut rng, 10_000, 1000.0);
        assert_eq!(stars.len(), 10_000);
        for s in &stars {
            assert!(s.abs().max_element() <= 1000.0, "{s:?}");
        }
    }

    #[test]
    fn fills_every_octant() {
        let mut rng = StdRng::seed_from_u64(11);
        let stars = generate_starfield(&mut rng, 2_000, 1000.0);
        let mut octants = [0usize; 8];
        for s in &stars {
            let i = (s.x > 0.0) as usize | ((s.y > 0.0) as usize) << 1 | ((s.z > 0.0) as usize) << 2;
            octants[i] += 1;
        }
        assert!(octants.iter().all(|&n| n > 150), "{octants:?}");
    }

    #[test]
    fn unseeded_fields_differ() {
        let a = generate_starfield(&mut rand::thread_rng(), 16, 1000.0);
        let b = generate_starfield(&mut rand::thread_rng(), 16, 1000.0);
        assert_ne!(a, b);
    }

    #[test]
    fn zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_starfield(&mut rng, 0, 1000.0).is_empty());
    }
}
