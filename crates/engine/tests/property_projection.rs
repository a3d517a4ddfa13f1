// Property-based tests for the projection engine.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use potgrid_core::{Variable, VariableSpace};
use potgrid_engine::*;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// State counts in variable-space order: conditioned first, up to 3 parents.
fn arb_radices() -> impl Strategy<Value = Vec<usize>> {
    (1usize..=4, prop::collection::vec(1usize..=4, 0..=3)).prop_map(|(x, parents)| {
        let mut radices = vec![x];
        radices.extend(parents);
        radices
    })
}

fn make_space(radices: &[usize]) -> VariableSpace {
    let variables = radices
        .iter()
        .enumerate()
        .map(|(i, &n)| {
            let name = if i == 0 { "X".to_string() } else { format!("P{i}") };
            Variable::new(name, (0..n).map(|s| format!("s{s}")))
        })
        .collect();
    VariableSpace::new(variables)
}

/// A full state tuple for the given radices.
fn arb_tuple(radices: Vec<usize>) -> impl Strategy<Value = Vec<usize>> {
    radices.into_iter().map(|n| 0..n).collect::<Vec<_>>()
}

fn arb_radices_and_tuple() -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
    arb_radices().prop_flat_map(|r| (Just(r.clone()), arb_tuple(r)))
}

fn arb_numeric_potential() -> impl Strategy<Value = (Vec<usize>, bool, Vec<f64>)> {
    (arb_radices(), any::<bool>()).prop_flat_map(|(r, exact)| {
        let len = tensor_len(&r, exact);
        (
            Just(r),
            Just(exact),
            prop::collection::vec(-1000.0..1000.0f64, len),
        )
    })
}

/// Values with at most four decimals survive default display rounding.
fn arb_decimal_potential() -> impl Strategy<Value = (Vec<usize>, Vec<f64>)> {
    arb_radices().prop_flat_map(|r| {
        let len = tensor_len(&r, false);
        (
            Just(r),
            prop::collection::vec((-1_000_000i64..1_000_000).prop_map(|k| k as f64 / 10_000.0), len),
        )
    })
}

fn arb_symbolic_potential() -> impl Strategy<Value = (Vec<usize>, bool, Vec<String>)> {
    (arb_radices(), any::<bool>()).prop_flat_map(|(r, exact)| {
        let len = tensor_len(&r, exact);
        (Just(r), Just(exact), prop::collection::vec("[a-z0-9 +*]{0,8}", len))
    })
}

fn arb_mask_inputs() -> impl Strategy<Value = (Vec<usize>, Vec<Vec<usize>>, Vec<bool>)> {
    arb_radices().prop_flat_map(|r| {
        let cols = 1 + tensor_len(&r, true);
        (
            Just(r.clone()),
            prop::collection::vec(arb_tuple(r), 0..6),
            prop::collection::vec(any::<bool>(), cols),
        )
    })
}

fn tensor_len(radices: &[usize], exact: bool) -> usize {
    let size: usize = radices.iter().product();
    if exact {
        size / radices[0]
    } else {
        size
    }
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn codec_configuration_round_trip((radices, tuple) in arb_radices_and_tuple()) {
        let codec = MixedRadixCodec::new(radices).unwrap();
        let position = codec.position_of(&tuple).unwrap();
        prop_assert!(position < codec.size());
        prop_assert_eq!(codec.configuration_of(position).unwrap(), tuple);
    }

    #[test]
    fn codec_position_round_trip(radices in arb_radices()) {
        let codec = MixedRadixCodec::new(radices).unwrap();
        for position in 0..codec.size() {
            let configuration = codec.configuration_of(position).unwrap();
            prop_assert_eq!(codec.position_of(&configuration).unwrap(), position);
        }
        prop_assert!(codec.configuration_of(codec.size()).is_err());
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn exact_projection_round_trip((radices, exact, values) in arb_numeric_potential()) {
        let layout = build_layout(&make_space(&radices), exact).unwrap();
        let projector = ValueProjector::exact();
        let tensor = Tensor::new(values);
        let grid = projector.fill_grid(&tensor, &layout).unwrap();
        let back: Tensor<f64> = projector.extract_grid(&grid, &layout).unwrap();
        prop_assert_eq!(back, tensor);
    }

    #[test]
    fn rounded_projection_round_trip((radices, values) in arb_decimal_potential()) {
        let layout = build_layout(&make_space(&radices), false).unwrap();
        let tensor = Tensor::new(values);
        let grid = fill_grid(&tensor, &layout).unwrap();
        let back: Tensor<f64> = extract_grid(&grid, &layout).unwrap();
        prop_assert_eq!(back, tensor);
    }

    #[test]
    fn symbolic_projection_round_trip((radices, exact, values) in arb_symbolic_potential()) {
        let layout = build_layout(&make_space(&radices), exact).unwrap();
        let tensor = Tensor::new(values);
        let grid = fill_grid(&tensor, &layout).unwrap();
        let back: Tensor<String> = extract_grid(&grid, &layout).unwrap();
        prop_assert_eq!(back, tensor);
    }

    #[test]
    fn every_data_cell_filled((radices, exact, values) in arb_numeric_potential()) {
        let layout = build_layout(&make_space(&radices), exact).unwrap();
        let grid = fill_grid(&Tensor::new(values), &layout).unwrap();
        for row in 0..layout.rows {
            for col in 0..layout.cols {
                let cell = grid.get(row, col).unwrap();
                if layout.is_data_cell(row, col) {
                    prop_assert!(matches!(cell, Cell::Numeric(_)), "data cell {row},{col}: {cell:?}");
                } else {
                    prop_assert!(matches!(cell, Cell::Label(_) | Cell::Empty), "header cell {row},{col}: {cell:?}");
                }
            }
        }
    }

    #[test]
    fn rounding_idempotent(x in -1.0e6..1.0e6f64) {
        let r = Rounding::default();
        let once = r.round(x);
        prop_assert_eq!(r.round(once), once);
    }

    #[test]
    fn rounding_idempotent_any_magnitude(x in prop::num::f64::NORMAL) {
        let r = Rounding::default();
        let once = r.round(x);
        prop_assert_eq!(r.round(once), once);
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn header_rows_are_repeat_blocks(radices in arb_radices()) {
        let layout = build_layout(&make_space(&radices), false).unwrap();
        let grid = layout.blank_grid();
        let parents = &radices[1..];
        for (r, &states) in parents.iter().enumerate() {
            let repetition: usize = parents[r + 1..].iter().product();
            for col in 1..layout.cols {
                let state = layout.header_state(r, col).unwrap();
                prop_assert_eq!(state, ((col - 1) / repetition) % states);
                prop_assert_eq!(grid.get(r, col).unwrap(), &Cell::Label(format!("s{state}")));
                // a new run starts exactly every `repetition` columns
                if col > 1 {
                    let previous = layout.header_state(r, col - 1).unwrap();
                    prop_assert_eq!(state != previous, states > 1 && (col - 1) % repetition == 0);
                }
            }
        }
    }

    #[test]
    fn tuple_cells_match_positions((radices, tuple) in arb_radices_and_tuple()) {
        let layout = build_layout(&make_space(&radices), false).unwrap();
        let coord = layout.cell_for_tuple(&tuple).unwrap();
        let position = layout.codec().position_of(&tuple).unwrap();
        prop_assert_eq!(layout.position_at(coord.row, coord.col).unwrap(), position);
        prop_assert_eq!(layout.cell_of_position(position).unwrap(), coord);
    }
}

// ---------------------------------------------------------------------------
// Configuration extraction
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn configuration_is_row_independent(radices in arb_radices(), exact in any::<bool>()) {
        let layout = build_layout(&make_space(&radices), exact).unwrap();
        for col in 1..layout.cols {
            let top = configuration_for_column(col, &layout).unwrap();
            prop_assert_eq!(top.len(), radices.len() - 1);
            for row in layout.first_editable_row..=layout.last_editable_row {
                prop_assert_eq!(&configuration_for_cell(row, col, &layout).unwrap(), &top);
            }
            prop_assert_eq!(column_for_configuration(&top, &layout).unwrap(), col);
        }
    }

    #[test]
    fn configuration_matches_headers(radices in arb_radices()) {
        let layout = build_layout(&make_space(&radices), false).unwrap();
        for col in 1..layout.cols {
            let configuration = configuration_for_column(col, &layout).unwrap();
            for (r, assignment) in configuration.iter().enumerate() {
                prop_assert_eq!(assignment.state, layout.header_state(r, col).unwrap());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Mask
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn unrestricted_mask_is_free_inside(radices in arb_radices(), exact in any::<bool>()) {
        let layout = build_layout(&make_space(&radices), exact).unwrap();
        let mask = build_mask(&[], &vec![false; layout.cols], &layout).unwrap();
        for row in 0..layout.rows {
            for col in 0..layout.cols {
                let locked = mask.get(row, col).unwrap().is_locked();
                prop_assert_eq!(locked, !layout.is_data_cell(row, col));
            }
        }
    }

    #[test]
    fn mask_locks_what_it_should((radices, restrictions, uncertain) in arb_mask_inputs()) {
        let layout = build_layout(&make_space(&radices), false).unwrap();
        let mask = build_mask(&restrictions, &uncertain, &layout).unwrap();

        for row in 0..layout.rows {
            for col in 0..layout.cols {
                let lock = *mask.get(row, col).unwrap();
                if !layout.is_data_cell(row, col) {
                    prop_assert_eq!(lock, Lock::Locked(LockReason::Header));
                } else if uncertain[col] {
                    prop_assert!(lock.is_locked());
                }
            }
        }
        for tuple in &restrictions {
            let coord = layout.cell_for_tuple(tuple).unwrap();
            prop_assert_eq!(mask.get(coord.row, coord.col), Some(&Lock::Locked(LockReason::Restricted)));
        }
    }
}

// ---------------------------------------------------------------------------
// Concrete scenarios
// ---------------------------------------------------------------------------

#[test]
fn header_repetition_two_by_three() {
    let layout = build_layout(&make_space(&[2, 2, 3]), false).unwrap();
    let first: Vec<usize> = (1..layout.cols).map(|c| layout.header_state(0, c).unwrap()).collect();
    let second: Vec<usize> = (1..layout.cols).map(|c| layout.header_state(1, c).unwrap()).collect();
    assert_eq!(first, vec![0, 0, 0, 1, 1, 1]);
    assert_eq!(second, vec![0, 1, 2, 0, 1, 2]);
}

#[test]
fn binary_child_binary_parent() {
    let space = VariableSpace::from_parts(
        Variable::new("X", ["x0", "x1"]),
        vec![Variable::new("Y", ["y0", "y1"])],
    );
    let layout = build_layout(&space, false).unwrap();
    assert_eq!(layout.rows, 3);
    assert_eq!(layout.cols, 3);

    let grid = fill_grid(&Tensor::new(vec![0.1, 0.9, 0.4, 0.6]), &layout).unwrap();
    let shown: Vec<Vec<String>> = grid
        .iter_rows()
        .map(|row| row.iter().map(Cell::display).collect())
        .collect();
    assert_eq!(
        shown,
        vec![
            vec!["Y", "y0", "y1"],
            vec!["x1", "0.9", "0.6"],
            vec!["x0", "0.1", "0.4"],
        ]
    );
    assert_eq!(
        configuration_for_column(2, &layout).unwrap().get("Y"),
        Some(1)
    );
}

#[test]
fn no_parents_is_single_column() {
    let layout = build_layout(&make_space(&[3]), false).unwrap();
    assert_eq!(layout.cols, 2);
    assert_eq!(layout.first_editable_row, 0);
    assert_eq!(layout.column_ids, vec!["A", "B"]);
}
