//! Proximity lines between nearby particles.

use glam::Vec2;

use crate::{config::Config, particle::Particle, types::ParticleId};

/// A line joining two particles closer than the link distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: ParticleId,
    pub b: ParticleId,
    pub from: Vec2,
    pub to: Vec2,
    pub alpha: f32,
}

/// Opacity of a link between two particles `dist` pixels apart.
///
/// Falls linearly from `link_max_alpha` at zero distance to zero at
/// `link_distance`, and stays zero beyond it.
pub fn link_alpha(dist: f32, cfg: &Config) -> f32 {
    if dist >= cfg.link_distance {
        return 0.0;
    }
    cfg.link_max_alpha * (1.0 - dist / cfg.link_distance)
}

/// Yields every unordered pair `(i, j)`, `i < j`, closer than the link distance.
///
/// This is the naive O(n²) scan; particle counts are bounded by the viewport
/// width so it stays affordable per frame.
pub fn links<'a>(points: &'a [Particle], cfg: &'a Config) -> impl Iterator<Item = Link> + 'a {
    let r2 = cfg.link_distance * cfg.link_distance;
    points.iter().enumerate().flat_map(move |(i, p)| {
        points[i + 1..]
            .iter()
            .enumerate()
            .filter_map(move |(k, q)| {
                let d2 = p.pos.distance_squared(q.pos);
                if d2 >= r2 {
                    return None;
                }
                Some(Link {
                    a: i,
                    b: i + 1 + k,
                    from: p.pos,
                    to: q.pos,
                    alpha: link_alpha(d2.sqrt(), cfg),
                })
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32) -> Particle {
        Particle::at_rest(Vec2::new(x, y), 1.0, 0.5)
    }

    #[test]
    fn alpha_is_zero_at_and_beyond_link_distance() {
        let cfg = Config::default();
        assert_eq!(link_alpha(100.0, &cfg), 0.0);
        assert_eq!(link_alpha(250.0, &cfg), 0.0);
    }

    #[test]
    fn alpha_is_positive_inside_link_distance() {
        let cfg = Config::default();
        assert!((link_alpha(0.0, &cfg) - 0.1).abs() < 1e-7);
        assert!((link_alpha(50.0, &cfg) - 0.05).abs() < 1e-7);
        for d in [0.0, 1.0, 42.0, 99.0, 99.99] {
            assert!(link_alpha(d, &cfg) > 0.0, "alpha({d}) should be positive");
        }
    }

    #[test]
    fn links_cover_each_close_pair_once() {
        let cfg = Config::default();
        let points = vec![at(0.0, 0.0), at(60.0, 0.0), at(60.0, 80.0), at(500.0, 500.0)];

        let found: Vec<(usize, usize)> = links(&points, &cfg).map(|l| (l.a, l.b)).collect();

        // 0-1 is 60 px, 1-2 is 80 px, 0-2 is exactly 100 px and excluded.
        assert_eq!(found, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn link_carries_endpoints_and_alpha() {
        let cfg = Config::default();
        let points = vec![at(10.0, 10.0), at(10.0, 60.0)];

        let all: Vec<Link> = links(&points, &cfg).collect();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].from, Vec2::new(10.0, 10.0));
        assert_eq!(all[0].to, Vec2::new(10.0, 60.0));
        assert!((all[0].alpha - 0.05).abs() < 1e-7);
    }

    #[test]
    fn no_links_for_fewer_than_two_particles() {
        let cfg = Config::default();
        assert_eq!(links(&[], &cfg).count(), 0);
        assert_eq!(links(&[at(1.0, 1.0)], &cfg).count(), 0);
    }
}
