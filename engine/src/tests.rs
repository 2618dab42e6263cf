// ═══════════════════════════════════════════════════════════════════════
// Test suite for the conquest engine
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::combat::{resolve_attack, roll_dice};
    use crate::config::GameConfig;
    use crate::error::{ConfigError, IllegalAction};
    use crate::map::{MapLayout, TerritoryDef, MAX_COORDINATE};
    use crate::plan::TurnPlan;
    use crate::probability::*;
    use crate::setup::{create_board, starting_controllers};
    use crate::types::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // ── Helpers ──────────────────────────────────────────────────────────

    const P1: PlayerId = PlayerId(1);
    const P2: PlayerId = PlayerId(2);
    const P3: PlayerId = PlayerId(3);

    fn t(i: u16) -> TerritoryId {
        TerritoryId(i)
    }

    /// Territories in a row, 3 apart: each borders only its direct
    /// neighbours in the row.
    fn line_layout(count: usize) -> MapLayout {
        let defs = (0..count)
            .map(|i| TerritoryDef { name: format!("T{i}"), coords: Coordinate::new(3 * i as i32, 0) })
            .collect();
        MapLayout::new(defs).unwrap()
    }

    fn line_board(player_count: u8, controllers: &[u8], troops: &[u32]) -> Board {
        let owners: Vec<PlayerId> = controllers.iter().map(|&p| PlayerId(p)).collect();
        let mut board = Board::new(&line_layout(controllers.len()), &owners, 1, player_count, 3).unwrap();
        for (i, &n) in troops.iter().enumerate() {
            if n > 1 {
                board.set_reinforcements_remaining(n - 1);
                board.place_reinforcement(owners[i], &Reinforcement::new(t(i as u16), n - 1)).unwrap();
            }
        }
        board.set_reinforcements_remaining(0);
        board
    }

    fn troops(board: &Board, id: u16) -> u32 {
        board.territory(t(id)).unwrap().troops
    }

    fn controller(board: &Board, id: u16) -> PlayerId {
        board.territory(t(id)).unwrap().controller
    }

    // ═════════════════════════════════════════════════════════════════════
    // Combat probability table
    // ═════════════════════════════════════════════════════════════════════

    #[test]
    fn test_outcomes_sum_to_one() {
        for (a, d) in supported_pairs() {
            let total: f64 = outcomes(a, d).iter().map(|o| o.probability).sum();
            assert!((total - 1.0).abs() < 1e-9, "{a}v{d} sums to {total}");
        }
    }

    #[test]
    fn test_outcome_losses_match_fights() {
        for (a, d) in supported_pairs() {
            for o in outcomes(a, d) {
                assert_eq!(o.attackers_lost + o.defenders_lost, a.min(d));
                assert!(o.probability > 0.0 && o.probability <= 1.0);
            }
        }
    }

    #[test]
    fn test_three_vs_two_classic_odds() {
        let table = outcomes(3, 2);
        assert_eq!(table.len(), 3);
        assert_eq!(table[0].defenders_lost, 0);
        assert_eq!(table[2].defenders_lost, 2);
        assert!((table[2].probability - 0.372).abs() < 0.001);
        assert!((table[1].probability - 0.336).abs() < 0.001);
        assert!((table[0].probability - 0.293).abs() < 0.001);
    }

    #[test]
    fn test_one_vs_one_favours_defender() {
        let table = outcomes(1, 1);
        assert_eq!(table.len(), 2);
        assert!((table[1].probability - 15.0 / 36.0).abs() < 1e-12);
        assert!((win_probability(1, 1) - 15.0 / 36.0).abs() < 1e-12);
        assert!(expected_margin(1, 1) < 0.0);
    }

    #[test]
    fn test_lookup_is_cached() {
        let first = outcomes(3, 2);
        let second = outcomes(3, 2);
        assert!(std::ptr::eq(first, second));
        assert_eq!(first, second);
    }

    #[test]
    #[should_panic]
    fn test_unsupported_attacker_dice_panics() {
        outcomes(4, 1);
    }

    #[test]
    #[should_panic]
    fn test_unsupported_defender_dice_panics() {
        outcomes(1, 0);
    }

    #[test]
    fn test_dice_clamping() {
        assert_eq!(attacker_dice(1), 1);
        assert_eq!(attacker_dice(7), 3);
        assert_eq!(defender_dice(1), 1);
        assert_eq!(defender_dice(9), 2);
    }

    // ═════════════════════════════════════════════════════════════════════
    // Map layout
    // ═════════════════════════════════════════════════════════════════════

    #[test]
    fn test_ring_rule() {
        let origin = Coordinate::new(0, 0);
        assert!(origin.borders(Coordinate::new(3, 0)));
        assert!(origin.borders(Coordinate::new(-3, 2)));
        assert!(origin.borders(Coordinate::new(1, 3)));
        assert!(!origin.borders(Coordinate::new(3, 3)));
        assert!(!origin.borders(Coordinate::new(4, 0)));
        assert!(!origin.borders(Coordinate::new(2, 0)));
        assert!(origin.collides(Coordinate::new(2, -2)));
        assert!(!origin.collides(Coordinate::new(3, 0)));

        let low = Coordinate::new(i32::MIN, i32::MIN);
        let high = Coordinate::new(i32::MAX, i32::MAX);
        assert!(!low.borders(high));
        assert!(!high.collides(low));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = MapLayout::generate(16, 7);
        let b = MapLayout::generate(16, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert_eq!(a.territories[0].coords, Coordinate::new(0, 0));
        assert_eq!(a.territories[5].name, "5");
    }

    #[test]
    fn test_layout_rejects_duplicates_and_overlaps() {
        let dup = vec![
            TerritoryDef { name: "North".into(), coords: Coordinate::new(0, 0) },
            TerritoryDef { name: "north".into(), coords: Coordinate::new(3, 0) },
        ];
        assert!(matches!(MapLayout::new(dup), Err(ConfigError::Invalid(_))));

        let overlap = vec![
            TerritoryDef { name: "A".into(), coords: Coordinate::new(0, 0) },
            TerritoryDef { name: "B".into(), coords: Coordinate::new(2, 1) },
        ];
        assert!(MapLayout::new(overlap).is_err());
        assert!(MapLayout::new(Vec::new()).is_err());
    }

    #[test]
    fn test_line_adjacency() {
        let adjacency = line_layout(4).adjacency();
        assert_eq!(adjacency[0], vec![1]);
        assert_eq!(adjacency[1], vec![0, 2]);
        assert_eq!(adjacency[3], vec![2]);
    }

    proptest! {
        #[test]
        fn prop_generated_maps_are_valid(seed in any::<u64>(), count in 1usize..40) {
            let layout = MapLayout::generate(count, seed);
            prop_assert_eq!(layout.len(), count);

            let defs = &layout.territories;
            for i in 0..defs.len() {
                for j in i + 1..defs.len() {
                    prop_assert!(!defs[i].coords.collides(defs[j].coords));
                }
            }

            let adjacency = layout.adjacency();
            for (i, adjacent) in adjacency.iter().enumerate() {
                for &j in adjacent {
                    prop_assert!(adjacency[j].contains(&i));
                    prop_assert!(defs[i].coords.borders(defs[j].coords));
                }
            }

            // Every territory was placed bordering an earlier one.
            let owners = vec![P1; count];
            let board = Board::new(&layout, &owners, 1, 2, 3).unwrap();
            prop_assert_eq!(board.connected_territories(t(0)).len(), count);
        }
    }

    // ═════════════════════════════════════════════════════════════════════
    // Setup and configuration
    // ═════════════════════════════════════════════════════════════════════

    #[test]
    fn test_starting_controllers_split() {
        let owners = starting_controllers(16, 2);
        assert_eq!(owners.iter().filter(|&&p| p == P1).count(), 8);
        assert_eq!(owners[7], P1);
        assert_eq!(owners[8], P2);

        assert_eq!(starting_controllers(5, 2), vec![P1, P1, P1, P2, P2]);
        assert_eq!(starting_controllers(7, 3), vec![P1, P1, P1, P2, P2, P3, P3]);
    }

    #[test]
    fn test_default_config_board() {
        let board = create_board(&GameConfig::default()).unwrap();
        assert_eq!(board.len(), 16);
        assert_eq!(board.player_count(), 2);
        assert_eq!(board.turn(), 0);
        assert_eq!(board.current_player(), None);
        assert!(board.territories().iter().all(|t| t.troops == 1));
        assert_eq!(board.controlled_count(P1), 8);
        assert_eq!(board.controlled_count(P2), 8);
    }

    #[test]
    fn test_config_validation() {
        assert!(GameConfig::default().validate().is_ok());

        let one_player = GameConfig { player_count: 1, ..GameConfig::default() };
        assert!(one_player.validate().is_err());

        let crowded = GameConfig { territory_count: 2, player_count: 3, ..GameConfig::default() };
        assert!(crowded.validate().is_err());

        let no_divisor = GameConfig { territories_per_reinforcement: 0, ..GameConfig::default() };
        assert!(create_board(&no_divisor).is_err());
    }

    #[test]
    fn test_config_json_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "player_count": 3 }"#).unwrap();
        assert_eq!(config.player_count, 3);
        assert_eq!(config.territory_count, 16);
        assert_eq!(config.territories_per_reinforcement, 3);
    }

    #[test]
    fn test_explicit_layout_overrides_generation() {
        let config = GameConfig { layout: Some(line_layout(6)), ..GameConfig::default() };
        let board = create_board(&config).unwrap();
        assert_eq!(board.len(), 6);
        assert!(board.territory_by_name("t5").is_some());
    }

    #[test]
    fn test_config_layout_from_json_is_validated() {
        let json = r#"{
            "layout": { "territories": [
                { "name": "A", "coords": { "x": 0, "y": 0 } },
                { "name": "A", "coords": { "x": 0, "y": 0 } },
                { "name": "B", "coords": { "x": 3, "y": 0 } }
            ] }
        }"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(matches!(create_board(&config), Err(ConfigError::Invalid(_))));

        let layout = config.layout.unwrap();
        let owners = vec![P1, P1, P2];
        assert!(matches!(Board::new(&layout, &owners, 1, 2, 3), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_layout_rejects_far_coordinates() {
        let far = vec![
            TerritoryDef { name: "Home".into(), coords: Coordinate::new(0, 0) },
            TerritoryDef { name: "Edge".into(), coords: Coordinate::new(i32::MIN, i32::MAX) },
        ];
        assert!(matches!(MapLayout::new(far), Err(ConfigError::Invalid(_))));

        let limit = vec![
            TerritoryDef { name: "Low".into(), coords: Coordinate::new(-MAX_COORDINATE, 0) },
            TerritoryDef { name: "High".into(), coords: Coordinate::new(MAX_COORDINATE, 0) },
        ];
        let layout = MapLayout::new(limit).unwrap();
        let board = Board::new(&layout, &[P1, P2], 1, 2, 3).unwrap();
        assert!(board.territory(t(0)).unwrap().neighbours.is_empty());
    }

    // ═════════════════════════════════════════════════════════════════════
    // Move legality
    // ═════════════════════════════════════════════════════════════════════

    #[test]
    fn test_must_leave_one_behind() {
        let board = line_board(2, &[1, 1, 2, 2], &[2, 1, 1, 1]);
        let two = Move::new(P1, t(0), t(1), 2);
        assert!(matches!(board.check_move(&two), Err(IllegalAction::MustLeaveOneBehind { .. })));
        assert!(!board.is_move_legal(&two));

        let one = Move::new(P1, t(0), t(1), 1);
        assert!(board.is_move_legal(&one));
    }

    #[test]
    fn test_non_neighbour_is_illegal() {
        let board = line_board(2, &[1, 1, 1, 2], &[3, 1, 1, 1]);
        // Own territory, but two steps away.
        let mv = Move::new(P1, t(0), t(2), 1);
        assert_eq!(board.check_move(&mv), Err(IllegalAction::NotAdjacent { from: t(0), to: t(2) }));

        let far = line_board(2, &[1, 1, 2, 2], &[3, 1, 1, 1]);
        assert!(!far.is_move_legal(&Move::new(P1, t(0), t(2), 1)));
    }

    #[test]
    fn test_rejection_messages_name_territories() {
        let err = IllegalAction::NotAdjacent { from: t(0), to: t(2) };
        assert_eq!(err.to_string(), "territory #2 is not adjacent to #0");
        let err = IllegalAction::NotController { player: P2, territory: t(1) };
        assert_eq!(err.to_string(), "Player 2 does not control territory #1");
    }

    #[test]
    fn test_move_rejections() {
        let board = line_board(2, &[1, 1, 2, 2], &[5, 5, 5, 1]);
        assert_eq!(board.check_move(&Move::new(P1, t(0), t(1), 0)), Err(IllegalAction::EmptyMove));
        assert_eq!(
            board.check_move(&Move::new(P2, t(1), t(2), 1)),
            Err(IllegalAction::NotController { player: P2, territory: t(1) })
        );
        assert_eq!(
            board.check_move(&Move::new(P1, t(1), t(2), 4)),
            Err(IllegalAction::TooManyAttackers(4))
        );
        assert_eq!(
            board.check_move(&Move::new(P1, t(1), t(9), 1)),
            Err(IllegalAction::UnknownTerritory(t(9)))
        );
        // Friendly movement is not capped at three.
        assert!(board.is_move_legal(&Move::new(P1, t(1), t(0), 4)));
    }

    #[test]
    fn test_attack_and_movement_direction() {
        let board = line_board(2, &[1, 1, 2, 2], &[3, 3, 1, 1]);
        assert!(board.check_attack(&Move::new(P1, t(1), t(2), 2)).is_ok());
        assert_eq!(board.check_attack(&Move::new(P1, t(1), t(0), 1)), Err(IllegalAction::NotHostile(t(0))));
        assert!(board.check_movement(&Move::new(P1, t(1), t(0), 2)).is_ok());
        assert_eq!(board.check_movement(&Move::new(P1, t(1), t(2), 1)), Err(IllegalAction::NotFriendly(t(2))));
    }

    #[test]
    fn test_reinforcement_legality() {
        let board = line_board(2, &[1, 1, 2, 2], &[1, 1, 1, 1]);
        assert!(board.can_reinforce(P1, &Reinforcement::new(t(0), 3), 3));
        assert_eq!(
            board.check_reinforcement(P1, &Reinforcement::new(t(0), 0), 3),
            Err(IllegalAction::EmptyReinforcement)
        );
        assert_eq!(
            board.check_reinforcement(P1, &Reinforcement::new(t(0), 4), 3),
            Err(IllegalAction::ExceedsRemaining { requested: 4, remaining: 3 })
        );
        assert_eq!(
            board.check_reinforcement(P1, &Reinforcement::new(t(2), 1), 3),
            Err(IllegalAction::NotController { player: P1, territory: t(2) })
        );
    }

    // ═════════════════════════════════════════════════════════════════════
    // Turn flow and reinforcements
    // ═════════════════════════════════════════════════════════════════════

    #[test]
    fn test_count_reinforcements() {
        let board = create_board(&GameConfig::default()).unwrap();
        // 8 territories / 3 = 2, floored up to the minimum of 3.
        assert_eq!(board.count_reinforcements(P1), 3);

        let generous = GameConfig { territories_per_reinforcement: 1, ..GameConfig::default() };
        let board = create_board(&generous).unwrap();
        assert_eq!(board.count_reinforcements(P1), 8);
    }

    #[test]
    fn test_begin_turn_wraps() {
        let mut board = line_board(2, &[1, 1, 2, 2], &[1, 1, 1, 1]);
        assert_eq!(board.begin_turn(), P1);
        assert_eq!(board.reinforcements_remaining(), 3);
        assert_eq!(board.begin_turn(), P2);
        assert_eq!(board.begin_turn(), P1);
        assert_eq!(board.turn(), 1);
    }

    #[test]
    fn test_begin_turn_skips_eliminated() {
        let mut board = line_board(3, &[1, 1, 3, 3], &[1, 1, 1, 1]);
        assert_eq!(board.begin_turn(), P1);
        assert_eq!(board.begin_turn(), P3);
        assert_eq!(board.begin_turn(), P1);
    }

    #[test]
    fn test_place_reinforcement_accounting() {
        let mut board = line_board(2, &[1, 1, 2, 2], &[1, 1, 1, 1]);
        board.begin_turn();
        board.place_reinforcement(P1, &Reinforcement::new(t(1), 2)).unwrap();
        assert_eq!(troops(&board, 1), 3);
        assert_eq!(board.reinforcements_remaining(), 1);

        let err = board.place_reinforcement(P1, &Reinforcement::new(t(1), 2));
        assert!(err.is_err());
        assert_eq!(troops(&board, 1), 3);

        board.place_reinforcement(P1, &Reinforcement::new(t(0), 1)).unwrap();
        assert_eq!(board.reinforcements_remaining(), 0);
    }

    // ═════════════════════════════════════════════════════════════════════
    // Copy, equality and mutation
    // ═════════════════════════════════════════════════════════════════════

    #[test]
    fn test_copy_is_equal_and_independent() {
        let board = line_board(2, &[1, 1, 2, 2], &[4, 1, 2, 1]);
        let mut copy = board.copy();
        assert_eq!(copy, board);

        copy.carry_out_movement(&Move::new(P1, t(0), t(1), 2));
        assert_eq!(troops(&copy, 0), 2);
        assert_eq!(troops(&copy, 1), 3);
        assert_eq!(troops(&board, 0), 4);
        assert_eq!(troops(&board, 1), 1);
        assert_ne!(copy, board);
    }

    #[test]
    fn test_equality_tracks_turn_and_reinforcements() {
        let board = line_board(2, &[1, 1, 2, 2], &[1, 1, 1, 1]);
        let mut copy = board.copy();
        copy.set_reinforcements_remaining(2);
        assert_ne!(copy, board);

        let mut turned = board.copy();
        turned.begin_turn();
        turned.set_reinforcements_remaining(0);
        assert_ne!(turned, board);
    }

    #[test]
    fn test_apply_outcome_capture() {
        let board = line_board(2, &[1, 1, 2, 2], &[1, 4, 2, 1]);
        let mv = Move::new(P1, t(1), t(2), 3);
        let sweep = Outcome { attackers_lost: 0, defenders_lost: 2, probability: 0.372 };
        let next = board.apply_outcome(&mv, &sweep);

        assert_eq!(controller(&next, 2), P1);
        assert_eq!(troops(&next, 2), 1);
        assert_eq!(troops(&next, 1), 4 - 0 - 1);
        // Original untouched.
        assert_eq!(controller(&board, 2), P2);
        assert_eq!(troops(&board, 1), 4);
    }

    #[test]
    fn test_apply_outcome_without_capture() {
        let board = line_board(2, &[1, 1, 2, 2], &[1, 4, 3, 1]);
        let mv = Move::new(P1, t(1), t(2), 3);
        let split = Outcome { attackers_lost: 1, defenders_lost: 1, probability: 0.336 };
        let next = board.apply_outcome(&mv, &split);
        assert_eq!(controller(&next, 2), P2);
        assert_eq!(troops(&next, 1), 3);
        assert_eq!(troops(&next, 2), 2);
    }

    #[test]
    fn test_capture_conserves_surviving_troops() {
        for (a, d) in supported_pairs() {
            let board = line_board(2, &[1, 2], &[a + 1, d]);
            let before: u32 = board.territories().iter().map(|t| t.troops).sum();
            let mv = Move::new(P1, t(0), t(1), a);
            for o in outcomes(a, d) {
                let next = board.apply_outcome(&mv, o);
                let after: u32 = next.territories().iter().map(|t| t.troops).sum();
                assert_eq!(after, before - o.attackers_lost - o.defenders_lost);
                assert!(next.territories().iter().all(|t| t.troops >= 1));
            }
        }
    }

    // ═════════════════════════════════════════════════════════════════════
    // Graph queries
    // ═════════════════════════════════════════════════════════════════════

    #[test]
    fn test_borders_and_neighbours() {
        let board = line_board(2, &[1, 1, 2, 2], &[1, 1, 1, 1]);
        assert_eq!(board.controlled_border_territories(P1), vec![t(1)]);
        assert_eq!(board.controlled_border_territories(P2), vec![t(2)]);
        assert_eq!(board.hostile_neighbours(t(1)), vec![t(2)]);
        assert_eq!(board.friendly_neighbours(t(1)), vec![t(0)]);
        assert!(board.hostile_neighbours(t(0)).is_empty());
        assert_eq!(board.controlled_territories(P2), vec![t(2), t(3)]);
    }

    #[test]
    fn test_connected_zones() {
        let board = line_board(2, &[1, 2, 1, 1, 2], &[1, 1, 1, 1, 1]);
        assert_eq!(board.connected_zones(P1), vec![vec![t(0)], vec![t(2), t(3)]]);
        assert_eq!(board.connected_zones(P2).len(), 2);
        assert_eq!(board.connected_territories(t(3)), vec![t(3), t(2)]);
    }

    #[test]
    fn test_territory_by_name_ignores_case() {
        let board = line_board(2, &[1, 2], &[1, 1]);
        assert_eq!(board.territory_by_name("t1").map(|t| t.id), Some(t(1)));
        assert!(board.territory_by_name("T7").is_none());
    }

    #[test]
    fn test_display_draws_every_territory() {
        let board = line_board(2, &[1, 1, 2], &[1, 5, 1]);
        let drawn = board.to_string();
        for name in ["T0", "T1", "T2", "P1", "P2", "5"] {
            assert!(drawn.contains(name), "missing {name} in\n{drawn}");
        }
        assert!(drawn.contains("not started"));
    }

    // ═════════════════════════════════════════════════════════════════════
    // Dice resolution
    // ═════════════════════════════════════════════════════════════════════

    #[test]
    fn test_roll_dice_sorted_and_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for count in 1..=3 {
            let rolls = roll_dice(count, &mut rng);
            assert_eq!(rolls.len(), count as usize);
            assert!(rolls.iter().all(|&r| (1..=6).contains(&r)));
            assert!(rolls.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn test_resolve_attack_is_reproducible() {
        let base = line_board(2, &[1, 2], &[4, 2]);
        let mv = Move::new(P1, t(0), t(1), 3);

        let mut a = base.copy();
        let mut b = base.copy();
        let report_a = resolve_attack(&mut a, &mv, &mut ChaCha8Rng::seed_from_u64(99));
        let report_b = resolve_attack(&mut b, &mv, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(report_a, report_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_resolve_attack_applies_losses() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            let mut board = line_board(2, &[1, 2], &[4, 2]);
            let mv = Move::new(P1, t(0), t(1), 3);
            let report = resolve_attack(&mut board, &mv, &mut rng);
            assert_eq!(report.attacker_rolls.len(), 3);
            assert_eq!(report.defender_rolls.len(), 2);
            assert_eq!(report.attackers_lost + report.defenders_lost, 2);
            if report.captured {
                assert_eq!(controller(&board, 1), P1);
                assert_eq!(troops(&board, 1), 1);
                assert_eq!(troops(&board, 0), 4 - report.attackers_lost - 1);
            } else {
                assert_eq!(controller(&board, 1), P2);
                assert_eq!(troops(&board, 0), 4 - report.attackers_lost);
            }
        }
    }

    // ═════════════════════════════════════════════════════════════════════
    // Turn plan
    // ═════════════════════════════════════════════════════════════════════

    #[test]
    fn test_plan_is_fifo() {
        let board = line_board(2, &[1, 2], &[2, 1]);
        let mut plan = TurnPlan::new();
        let first = Action::Reinforce(Reinforcement::new(t(0), 1));
        let second = Action::Attack(Some(Move::new(P1, t(0), t(1), 1)));
        plan.add_action(board.copy(), first);
        plan.add_action(board.copy(), second);

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.peek().map(|p| p.action), Some(first));
        assert_eq!(plan.next_action().map(|p| p.action), Some(first));
        assert_eq!(plan.next_action().map(|p| p.action), Some(second));
        assert!(plan.is_empty());
        assert!(plan.next_action().is_none());
    }

    #[test]
    fn test_plan_add_then_next_empties() {
        let board = line_board(2, &[1, 2], &[2, 1]);
        let mut plan = TurnPlan::new();
        plan.add_action(board.copy(), Action::Fortify(None));
        let entry = plan.next_action().unwrap();
        assert_eq!(entry.action, Action::Fortify(None));
        assert_eq!(entry.expected, board);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_plan_wipe() {
        let board = line_board(2, &[1, 2], &[2, 1]);
        let mut plan = TurnPlan::new();
        plan.add_action(board.copy(), Action::Attack(None));
        plan.add_action(board, Action::Fortify(None));
        plan.wipe();
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
    }

    // ═════════════════════════════════════════════════════════════════════
    // End-to-end: one player conquers the other
    // ═════════════════════════════════════════════════════════════════════

    #[test]
    fn test_game_over_when_player_has_no_territories() {
        let mut board = create_board(&GameConfig::default()).unwrap();
        assert!(!board.is_eliminated(P1));
        assert!(!board.is_eliminated(P2));
        assert_eq!(board.winner(), None);

        for _ in 0..16 {
            let Some(target) = board.controlled_territories(P2).into_iter().next() else { break };
            let zone_edge = board
                .controlled_border_territories(P1)
                .into_iter()
                .find(|&from| board.hostile_neighbours(from).contains(&target));
            let (from, target) = match zone_edge {
                Some(from) => (from, target),
                None => {
                    let from = board.controlled_border_territories(P1)[0];
                    (from, board.hostile_neighbours(from)[0])
                }
            };

            board.set_reinforcements_remaining(2);
            board.place_reinforcement(P1, &Reinforcement::new(from, 2)).unwrap();
            let defending = board.territory(target).unwrap().troops;
            let captured = board.apply_losses(&Move::new(P1, from, target, 1), 0, defending);
            assert!(captured);
        }

        assert_eq!(board.controlled_count(P2), 0);
        assert!(board.is_eliminated(P2));
        assert!(!board.is_eliminated(P1));
        assert_eq!(board.winner(), Some(P1));
    }
}
