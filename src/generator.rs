use rand::Rng;

use super::board::{BoardSize, Point};

/// Source of candidate mine positions. The board keeps drawing until it gets a
/// position that is neither the first opened cell nor already a mine, so a sampler
/// only has to eventually cover every position of the board.
pub trait PointSampler {
    fn sample(&mut self, size: &BoardSize) -> Point;
}

/// Uniform draws over the whole board.
pub struct RandomSampler<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomSampler<R> {
    pub fn new(rng: R) -> RandomSampler<R> {
        RandomSampler { rng }
    }
}

impl<R: Rng> PointSampler for RandomSampler<R> {
    fn sample(&mut self, size: &BoardSize) -> Point {
        Point(self.rng.gen_range(0..size.height), self.rng.gen_range(0..size.width))
    }
}

/// Yields a fixed list of positions, then walks the board in row-major order forever.
/// Used for scripted layouts.
pub struct FixedSampler {
    points: Vec<Point>,
    next: usize,
}

impl FixedSampler {
    pub fn new(points: Vec<Point>) -> FixedSampler {
        FixedSampler { points, next: 0 }
    }
}

impl PointSampler for FixedSampler {
    fn sample(&mut self, size: &BoardSize) -> Point {
        let index = self.next;
        self.next += 1;
        match self.points.get(index) {
            Some(point) => *point,
            None => {
                let scan = (index - self.points.len()) % size.area();
                Point(scan / size.width, scan % size.width)
            }
        }
    }
}

#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
mod sampler_tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fixed_sampler_falls_back_to_scan() {
        let size = BoardSize::square(2);
        let mut sampler = FixedSampler::new(vec![Point(1, 1)]);
        let drawn: Vec<Point> = (0..6).map(|_| sampler.sample(&size)).collect();
        assert_eq!(drawn, vec![Point(1, 1), Point(0, 0), Point(0, 1), Point(1, 0), Point(1, 1), Point(0, 0)]);
    }

    proptest! {
        #[test]
        fn random_sampler_stays_on_board(side in 1..50usize, seed in any::<u64>()) {
            let size = BoardSize::square(side);
            let mut sampler = RandomSampler::new(StdRng::seed_from_u64(seed));
            for _ in 0..20 {
                prop_assert!(size.contains(&sampler.sample(&size)));
            }
        }
    }
}
