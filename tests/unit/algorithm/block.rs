//! Tests for stripe block transitions, masks and manual adjustments

#[cfg(test)]
mod tests {
    use randompicks::WeaveError;
    use randompicks::algorithm::block::{
        BlockId, BlockPair, BlockParams, Step, StripeBlock, Transition,
    };
    use randompicks::math::draws::{ScriptedDraws, seeded};

    fn block_at(stripe_width: usize, offset: usize) -> StripeBlock {
        StripeBlock::new(BlockParams {
            stripe_width,
            offset,
            ..BlockParams::default()
        })
        .unwrap()
    }

    fn assert_within_bounds(block: &StripeBlock) {
        assert!(block.stripe_width() >= block.min_stripe_width());
        assert!(block.stripe_width() <= block.max_stripe_width());
        assert!(block.offset() + block.stripe_width() <= block.block_width());
    }

    // Tests default geometry and mask
    // Verified by shifting the mask start by one
    #[test]
    fn test_default_picks() {
        let block = StripeBlock::default();

        assert_eq!(block.stripe_width(), 3);
        assert_eq!(block.offset(), 2);
        assert_eq!(block.block_width(), 8);
        assert_eq!(block.picks(), vec![0, 0, 1, 1, 1, 0, 0, 0]);
    }

    // Tests draws at or above the move chance leave the block alone
    // Verified by treating the move chance as inclusive
    #[test]
    fn test_stay_transition() {
        let block = StripeBlock::default();
        let mut draws = ScriptedDraws::new([0.4]);

        let (next, transition) = block.step(&mut draws).unwrap();

        assert_eq!(transition, Transition::Stay);
        assert_eq!(next, block);
        assert_eq!(draws.consumed(), 1);
    }

    // Tests a stripe at the left edge is forced right without a second draw
    // Verified by removing the left edge branch
    #[test]
    fn test_move_from_left_edge() {
        let block = block_at(3, 0);
        let mut draws = ScriptedDraws::new([0.2, 0.0]);

        let (next, transition) = block.step(&mut draws).unwrap();

        assert_eq!(transition, Transition::Move);
        assert_eq!(next.offset(), 1);
        assert_eq!(draws.consumed(), 1);
    }

    // Tests a stripe at the right edge is forced left without a second draw
    // Verified by moving right at the edge
    #[test]
    fn test_move_from_right_edge() {
        let block = block_at(3, 5);
        let mut draws = ScriptedDraws::new([0.3, 0.9]);

        let next = block.next(&mut draws).unwrap();

        assert_eq!(next.offset(), 4);
        assert_eq!(draws.consumed(), 1);
    }

    // Tests interior moves follow the sign of the second draw
    // Verified by swapping the move direction
    #[test]
    fn test_interior_move_directions() {
        let block = StripeBlock::default();

        let mut right = ScriptedDraws::new([0.2, 0.7]);
        assert_eq!(block.next(&mut right).unwrap().offset(), 3);
        assert_eq!(right.consumed(), 2);

        let mut left = ScriptedDraws::new([0.2, 0.3]);
        assert_eq!(block.next(&mut left).unwrap().offset(), 1);

        let mut still = ScriptedDraws::new([0.2, 0.5]);
        assert_eq!(block.next(&mut still).unwrap().offset(), 2);
    }

    // Tests the widest stripe always narrows by exactly one
    // Verified by letting the maximum width grow
    #[test]
    fn test_width_at_maximum_narrows() {
        let block = block_at(5, 1);

        let mut stay_put = ScriptedDraws::new([0.1, 0.2]);
        let narrowed = block.next(&mut stay_put).unwrap();
        assert_eq!(narrowed.stripe_width(), 4);
        assert_eq!(narrowed.offset(), 1);
        assert_eq!(stay_put.consumed(), 2);

        let mut go_right = ScriptedDraws::new([0.1, 0.9]);
        let shifted = block.next(&mut go_right).unwrap();
        assert_eq!(shifted.stripe_width(), 4);
        assert_eq!(shifted.offset(), 2);
    }

    // Tests the narrowest stripe widens and drifts left when the coin says so
    // Verified by inverting the wider-stripe nudge
    #[test]
    fn test_width_at_minimum_widens() {
        let block = block_at(2, 3);
        let mut draws = ScriptedDraws::new([0.0, 0.2]);

        let (next, transition) = block.step(&mut draws).unwrap();

        assert_eq!(transition, Transition::Width);
        assert_eq!(next.stripe_width(), 3);
        assert_eq!(next.offset(), 2);
        assert_eq!(draws.consumed(), 2);
    }

    // Tests a widened stripe overflowing the cell is clamped back inside
    // Verified by skipping the overflow clamp
    #[test]
    fn test_widening_clamps_offset() {
        let block = block_at(2, 6);
        let mut draws = ScriptedDraws::new([0.05, 0.0]);

        let next = block.next(&mut draws).unwrap();

        assert_eq!(next.stripe_width(), 3);
        assert_eq!(next.offset(), 5);
        assert_eq!(draws.consumed(), 1);
    }

    // Tests a stripe on the left edge keeps offset zero after a width change
    // Verified by nudging offsets at zero
    #[test]
    fn test_width_change_at_left_edge_keeps_offset() {
        let block = block_at(2, 0);
        let mut draws = ScriptedDraws::new([0.05, 0.0]);

        let next = block.next(&mut draws).unwrap();

        assert_eq!(next.stripe_width(), 3);
        assert_eq!(next.offset(), 0);
        assert_eq!(draws.consumed(), 1);
    }

    // Tests widths away from the preferred width step towards it on high draws
    // Verified by flipping the preferred-width bias
    #[test]
    fn test_width_reverts_towards_preferred() {
        let block = StripeBlock::default();
        let mut draws = ScriptedDraws::new([0.1, 0.5, 0.9]);

        let next = block.next(&mut draws).unwrap();

        assert_eq!(next.stripe_width(), 2);
        assert_eq!(next.offset(), 3);
        assert_eq!(draws.consumed(), 3);
    }

    // Tests widths away from the preferred width step away on low draws
    // Verified by changing the 0.25 threshold to 0.5
    #[test]
    fn test_width_drifts_away_from_preferred() {
        let block = StripeBlock::default();
        let mut draws = ScriptedDraws::new([0.1, 0.2, 0.2]);

        let next = block.next(&mut draws).unwrap();

        assert_eq!(next.stripe_width(), 4);
        assert_eq!(next.offset(), 1);
        assert_eq!(draws.consumed(), 3);
    }

    // Tests the preferred width wobbles both ways on a fair coin
    // Verified by treating the preferred width as a minimum
    #[test]
    fn test_preferred_width_wobbles() {
        let block = StripeBlock::new(BlockParams {
            preferred_stripe_width: 3,
            ..BlockParams::default()
        })
        .unwrap();

        let mut up = ScriptedDraws::new([0.1, 0.8, 0.6]);
        let wider = block.next(&mut up).unwrap();
        assert_eq!(wider.stripe_width(), 4);
        assert_eq!(wider.offset(), 2);
        assert_eq!(up.consumed(), 3);

        let mut down = ScriptedDraws::new([0.1, 0.2, 0.6]);
        let narrower = block.next(&mut down).unwrap();
        assert_eq!(narrower.stripe_width(), 2);
        assert_eq!(narrower.offset(), 3);
    }

    // Tests transitions return new snapshots without touching the original
    // Verified by mutating through a shared reference
    #[test]
    fn test_transitions_do_not_mutate() {
        let block = StripeBlock::default();
        let mut draws = ScriptedDraws::new([0.2, 0.9]);

        let next = block.next(&mut draws).unwrap();

        assert_eq!(block, StripeBlock::default());
        assert_ne!(next, block);
    }

    // Tests bounds and mask shape hold along a long random walk
    // Verified by removing the offset reconciliation
    #[test]
    fn test_random_walk_preserves_invariants() {
        let mut rng = seeded(7);
        let mut block = StripeBlock::default();

        for _ in 0..20_000 {
            block = block.next(&mut rng).unwrap();
            assert_within_bounds(&block);

            let picks = block.picks();
            assert_eq!(picks.len(), block.block_width());
            assert_eq!(
                picks.iter().filter(|&&p| p == 1).count(),
                block.stripe_width()
            );
            let first_raised = picks.iter().position(|&p| p == 1).unwrap();
            assert_eq!(first_raised, block.offset());
            assert!(
                picks[first_raised..first_raised + block.stripe_width()]
                    .iter()
                    .all(|&p| p == 1)
            );
        }
    }

    // Tests every width and move chance is reached along a random walk
    // Verified by disabling the width transition
    #[test]
    fn test_random_walk_visits_all_transitions() {
        let mut rng = seeded(11);
        let mut block = StripeBlock::default();
        let mut seen = [false; 3];

        for _ in 0..1_000 {
            let (next, transition) = block.step(&mut rng).unwrap();
            let slot = match transition {
                Transition::Width => 0,
                Transition::Move => 1,
                Transition::Stay => 2,
            };
            seen[slot] = true;
            block = next;
        }

        assert_eq!(seen, [true, true, true]);
    }

    // Tests identical seeds replay identical walks
    // Verified by reseeding the second generator
    #[test]
    fn test_seed_replay() {
        let mut rng_a = seeded(2024);
        let mut rng_b = seeded(2024);
        let mut a = StripeBlock::default();
        let mut b = StripeBlock::default();

        for _ in 0..500 {
            a = a.next(&mut rng_a).unwrap();
            b = b.next(&mut rng_b).unwrap();
            assert_eq!(a, b);
        }
    }

    // Tests construction rejects geometry that can not hold the invariant
    // Verified by removing each validation branch in turn
    #[test]
    fn test_new_rejects_invalid_params() {
        let invalid = [
            BlockParams {
                min_stripe_width: 0,
                stripe_width: 1,
                preferred_stripe_width: 1,
                ..BlockParams::default()
            },
            BlockParams {
                preferred_stripe_width: 6,
                ..BlockParams::default()
            },
            BlockParams {
                max_stripe_width: 8,
                ..BlockParams::default()
            },
            BlockParams {
                stripe_width: 6,
                ..BlockParams::default()
            },
            BlockParams {
                offset: 6,
                ..BlockParams::default()
            },
            BlockParams {
                min_stripe_width: 3,
                max_stripe_width: 3,
                preferred_stripe_width: 3,
                ..BlockParams::default()
            },
        ];

        for params in invalid {
            let result = StripeBlock::new(params);
            assert!(
                matches!(result, Err(WeaveError::InvalidArgument { .. })),
                "accepted {params:?}"
            );
        }

        assert_eq!(
            StripeBlock::new(BlockParams::default()).unwrap(),
            StripeBlock::default()
        );
    }

    // Tests a two-width range bounces between its bounds
    // Verified by accepting equal minimum and maximum widths
    #[test]
    fn test_narrow_width_range_stays_in_bounds() {
        let block = StripeBlock::new(BlockParams {
            stripe_width: 2,
            offset: 0,
            min_stripe_width: 2,
            max_stripe_width: 3,
            preferred_stripe_width: 2,
            ..BlockParams::default()
        })
        .unwrap();
        let mut draws = ScriptedDraws::new([0.0]);

        let wider = block.next(&mut draws).unwrap();
        assert_eq!((wider.stripe_width(), wider.offset()), (3, 0));

        let narrower = wider.next(&mut draws).unwrap();
        assert_eq!((narrower.stripe_width(), narrower.offset()), (2, 0));
    }

    // Tests manual shifts stop at both edges
    // Verified by removing the edge guards
    #[test]
    fn test_shifted_respects_edges() {
        let left = block_at(3, 0);
        assert_eq!(left.shifted(Step::Backward), left);
        assert_eq!(left.shifted(Step::Forward).offset(), 1);

        let right = block_at(3, 5);
        assert_eq!(right.shifted(Step::Forward), right);
        assert_eq!(right.shifted(Step::Backward).offset(), 4);
    }

    // Tests manual resizes stop at the width bounds and keep the stripe inside
    // Verified by dropping the offset pull on widening
    #[test]
    fn test_resized_respects_bounds() {
        let narrow = block_at(2, 1);
        assert_eq!(narrow.resized(Step::Backward), narrow);

        let wide = block_at(5, 0);
        assert_eq!(wide.resized(Step::Forward), wide);

        let at_edge = block_at(3, 5);
        let widened = at_edge.resized(Step::Forward);
        assert_eq!(widened.stripe_width(), 4);
        assert_eq!(widened.offset(), 4);
        assert!(widened.check_invariants().is_ok());
    }

    // Tests selectors map onto the two blocks
    // Verified by swapping selector values
    #[test]
    fn test_block_id_selectors() {
        assert_eq!(BlockId::from_selector(1).unwrap(), BlockId::First);
        assert_eq!(BlockId::from_selector(2).unwrap(), BlockId::Second);
        assert!(BlockId::from_selector(0).is_err());
        assert!(BlockId::from_selector(3).is_err());
        assert_eq!(BlockId::Second.selector(), 2);
        assert_eq!(BlockId::First.selector(), 1);
    }

    // Tests pairs step the first block before the second
    // Verified by stepping the second block first
    #[test]
    fn test_pair_draw_order() {
        let pair = BlockPair::default();
        let mut draws = ScriptedDraws::new([0.9, 0.2, 0.7]);

        let next = pair.next(&mut draws).unwrap();

        assert_eq!(next.first, StripeBlock::default());
        assert_eq!(next.second.offset(), 3);
        assert_eq!(draws.consumed(), 3);
    }

    // Tests handle numbering across both blocks
    // Verified by numbering second block handles from one
    #[test]
    fn test_pair_raised_handles() {
        let pair = BlockPair::default();
        assert_eq!(pair.raised_handles(), vec![3, 4, 5, 11, 12, 13]);

        let moved = pair.with(BlockId::Second, block_at(2, 0));
        assert_eq!(moved.raised_handles(), vec![3, 4, 5, 9, 10]);
        assert_eq!(moved.get(BlockId::First), &StripeBlock::default());
    }
}
