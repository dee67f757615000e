use rand::{Rng, RngExt};

/// Rolls two six-sided dice and returns their sum (2..=12).
pub fn roll(rng: &mut impl Rng) -> u8 {
    rng.random_range(1..=6) + rng.random_range(1..=6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roll_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let total = roll(&mut rng);
            assert!((2..=12).contains(&total));
        }
    }
}
