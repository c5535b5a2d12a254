//! Whole-city layout.

use citygen_core::Result;
use citygen_math::{Transform, Vector3};
use citygen_rand::RandomSource;
use citygen_scene::{Instance, Scene};
use rayon::prelude::*;

use crate::building::make_building;
use crate::synth::{random_building_params, window_prototypes};

/// Grid pitch between neighbouring building sites.
const BUILDING_SPACING: f64 = 70.0;

/// Generate an n x n staggered grid of random buildings centered on the
/// world origin.
///
/// Building i draws from its own stream seeded with `seed + i`, so the city
/// is reproducible and the per-building work is independent; generation runs
/// in parallel. A building whose random parameters produce degenerate
/// geometry is logged and skipped rather than failing the whole city.
pub fn generate_city(buildings_per_side: u32, seed: u64) -> Result<Scene> {
    let n = buildings_per_side as usize;
    let (open, closed) = window_prototypes()?;
    let start = BUILDING_SPACING * (n as f64 - 1.0) / 2.0;

    let instances: Vec<Instance> = (0..n * n)
        .into_par_iter()
        .flat_map_iter(|i| {
            let mut rng = RandomSource::from_seed(seed.wrapping_add(i as u64));
            let site = Vector3::new(
                -start
                    + BUILDING_SPACING * (i / n) as f64
                    + BUILDING_SPACING / 2.0 * (i % 2) as f64,
                0.0,
                -start + BUILDING_SPACING * (i % n) as f64,
            );
            let placement = Transform::from_translation(site);
            let built = random_building_params(&mut rng, open.clone(), closed.clone(), &format!("b{i}"))
                .and_then(|params| make_building(&params, &mut rng));
            match built {
                Ok(mut building) => {
                    for instance in &mut building {
                        instance.transform = instance.transform.then(&placement);
                    }
                    building
                }
                Err(error) => {
                    tracing::warn!(building = i, %error, "skipping failed building");
                    Vec::new()
                }
            }
        })
        .collect();

    Ok(Scene { instances })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_is_deterministic() {
        let a = generate_city(2, 42).unwrap();
        let b = generate_city(2, 42).unwrap();
        assert_eq!(a.len(), b.len());
        assert!(!a.is_empty());
        for (x, y) in a.instances.iter().zip(&b.instances) {
            assert_eq!(x.name, y.name);
            assert_eq!(x.transform.matrix, y.transform.matrix);
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate_city(2, 1).unwrap();
        let b = generate_city(2, 2).unwrap();
        let same = a.len() == b.len()
            && a.instances
                .iter()
                .zip(&b.instances)
                .all(|(x, y)| x.transform.matrix == y.transform.matrix);
        assert!(!same);
    }

    #[test]
    fn test_sites_are_spread_around_the_origin() {
        let scene = generate_city(3, 7).unwrap();
        let bb = scene.bounding_box().unwrap();
        // Grid pitch 70 over 3 columns: buildings must reach well into all
        // four quadrants.
        assert!(bb.min.x < -35.0 && bb.max.x > 35.0);
        assert!(bb.min.z < -35.0 && bb.max.z > 35.0);
        assert!(bb.min.y >= -1e-9);
    }

    #[test]
    fn test_empty_city() {
        let scene = generate_city(0, 5).unwrap();
        assert!(scene.is_empty());
    }

    #[test]
    fn test_instance_names_carry_their_building_prefix() {
        let scene = generate_city(2, 11).unwrap();
        for instance in &scene.instances {
            assert!(instance.name.starts_with('b'), "odd name {}", instance.name);
        }
    }
}
