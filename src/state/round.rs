/// Per-round side assignment
///
/// Each round flips its own fair coin to decide which side the phone shot
/// lands on. The flip is never derived from the pair id or the round index,
/// so position carries no information about the answer.

use rand::Rng;

use super::data::{PhotoPair, RoundPresentation, Side};

/// Randomly place the two shots of `pair` on screen.
///
/// Call once when a round is entered and keep the result for the
/// lifetime of that round.
pub fn assign_sides<R: Rng + ?Sized>(pair: &PhotoPair, rng: &mut R) -> RoundPresentation {
    let phone_left = rng.gen_bool(0.5);

    if phone_left {
        RoundPresentation {
            left_file: pair.phone_file.clone(),
            right_file: pair.full_frame_file.clone(),
            phone_side: Side::A,
        }
    } else {
        RoundPresentation {
            left_file: pair.full_frame_file.clone(),
            right_file: pair.phone_file.clone(),
            phone_side: Side::B,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pair() -> PhotoPair {
        PhotoPair {
            id: 1,
            phone_file: "vase iphone.jpg".to_string(),
            full_frame_file: "vase sony.jpg".to_string(),
            category: "Still Life".to_string(),
        }
    }

    #[test]
    fn test_phone_file_sits_on_phone_side() {
        let pair = pair();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..50 {
            let presentation = assign_sides(&pair, &mut rng);
            let phone_side = presentation.phone_side;

            assert_eq!(presentation.file_on(phone_side), pair.phone_file);
            assert_eq!(presentation.file_on(phone_side.other()), pair.full_frame_file);
        }
    }

    #[test]
    fn test_both_sides_occur() {
        let pair = pair();
        let mut rng = StdRng::seed_from_u64(99);

        let sides: Vec<Side> = (0..64)
            .map(|_| assign_sides(&pair, &mut rng).phone_side)
            .collect();

        assert!(sides.contains(&Side::A));
        assert!(sides.contains(&Side::B));
    }
}
