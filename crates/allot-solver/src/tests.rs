//! End-to-end tests for model construction, solving and extraction.

use allot_config::{Rule, RuleSet, SolveSettings};
use allot_core::{AllotError, Grid2, Grid3, SolveStatus};

use crate::minimal::MinimalAwardModel;
use crate::model::AwardModel;
use crate::report::{CsvExporter, SolutionReport};
use crate::scenario::{reduced_price, work_value_delta};

fn trace_init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn grid2(rows: Vec<Vec<i64>>) -> Grid2<i64> {
    Grid2::from_rows(rows).unwrap()
}

fn grid3(nested: Vec<Vec<Vec<i64>>>) -> Grid3<i64> {
    Grid3::from_nested(nested).unwrap()
}

fn minimal_price() -> Grid2<i64> {
    grid2(vec![vec![60, 605, 95, 75], vec![50, 615, 98, 60]])
}

#[test]
fn minimal_capacity_scenario() {
    trace_init();
    let mut model = MinimalAwardModel::builder(minimal_price(), vec![300, 20, 150, 80])
        .capacity(vec![2, 3])
        .build()
        .unwrap();

    assert_eq!(model.minimise_cost(), SolveStatus::Optimal);
    assert_eq!(
        model.volume_details().unwrap(),
        grid2(vec![vec![0, 20, 150, 0], vec![300, 0, 0, 80]])
    );
    assert_eq!(model.supplier_costs().unwrap(), vec![26_350, 19_800]);
    assert_eq!(model.total_cost().unwrap(), 46_150);
}

#[test]
fn minimal_share_scenario() {
    trace_init();
    let share = grid2(vec![vec![100, 100, 30, 100], vec![80, 100, 70, 100]]);
    let mut model = MinimalAwardModel::builder(minimal_price(), vec![300, 20, 150, 80])
        .capacity(vec![2, 3])
        .share(share)
        .build()
        .unwrap();

    assert_eq!(model.minimise_cost(), SolveStatus::Optimal);
    assert_eq!(
        model.volume_details().unwrap(),
        grid2(vec![vec![300, 0, 46, 0], vec![0, 20, 104, 80]])
    );
}

#[test]
fn cheapest_supplier_takes_all_without_rules() {
    let price = grid2(vec![vec![60, 95], vec![50, 98]]);
    let mut model = MinimalAwardModel::builder(price, vec![300, 150])
        .build()
        .unwrap();

    assert_eq!(model.minimise_cost(), SolveStatus::Optimal);
    assert_eq!(
        model.volume_details().unwrap(),
        grid2(vec![vec![0, 150], vec![300, 0]])
    );
}

#[test]
fn share_floor_boundary_admits_the_exact_percentage() {
    // share 50 of demand 100 allows exactly 50 units
    let price = grid2(vec![vec![1], vec![2]]);
    let share = grid2(vec![vec![50], vec![100]]);
    let mut model = MinimalAwardModel::builder(price, vec![100])
        .share(share)
        .build()
        .unwrap();

    assert_eq!(model.minimise_cost(), SolveStatus::Optimal);
    assert_eq!(
        model.volume_details().unwrap(),
        grid2(vec![vec![50], vec![50]])
    );
    assert_eq!(model.total_cost().unwrap(), 150);
}

#[test]
fn capacity_counts_assigned_parts_not_units() {
    // supplier 0 is cheapest everywhere but may serve only two parts; the
    // two largest parts go to it regardless of their combined volume
    let price = grid2(vec![vec![1, 1, 1], vec![10, 10, 10]]);
    let mut model = MinimalAwardModel::builder(price, vec![10, 20, 30])
        .capacity(vec![2, 3])
        .build()
        .unwrap();

    assert_eq!(model.minimise_cost(), SolveStatus::Optimal);
    assert_eq!(
        model.volume_details().unwrap(),
        grid2(vec![vec![0, 20, 30], vec![10, 0, 0]])
    );
}

fn two_year_switch_problem(rules: RuleSet) -> AwardModel {
    // year 0 favours supplier 0, year 1 favours supplier 1
    let price = grid3(vec![vec![vec![10, 50]], vec![vec![50, 11]]]);
    let demand = grid2(vec![vec![100, 100]]);
    AwardModel::new(price, demand, rules).unwrap()
}

#[test]
fn global_transfer_limit_zero_freezes_assignments() {
    let rules = RuleSet::new().with(Rule::GlobalTransferLimit(0)).unwrap();
    let mut model = two_year_switch_problem(rules);

    assert_eq!(model.minimise_cost(), SolveStatus::Optimal);
    // both suppliers stay assigned in both years; volume shifts within the
    // frozen assignment pattern
    assert_eq!(
        model.volume_details().unwrap(),
        grid3(vec![vec![vec![99, 1]], vec![vec![1, 99]]])
    );
    assert_eq!(model.total_cost().unwrap(), 2_179);
}

#[test]
fn global_transfer_limit_one_allows_a_single_event() {
    let rules = RuleSet::new().with(Rule::GlobalTransferLimit(1)).unwrap();
    let mut model = two_year_switch_problem(rules);

    assert_eq!(model.minimise_cost(), SolveStatus::Optimal);
    // supplier 1 may enter in year 1, but supplier 0 exiting as well would
    // cost a second event, so it keeps one unit
    assert_eq!(
        model.volume_details().unwrap(),
        grid3(vec![vec![vec![100, 1]], vec![vec![0, 99]]])
    );
    assert_eq!(model.total_cost().unwrap(), 2_139);
}

#[test]
fn supplier_transfer_limits_allow_the_full_switch() {
    let rules = RuleSet::new()
        .with(Rule::SupplierTransferLimit(vec![1, 1]))
        .unwrap();
    let mut model = two_year_switch_problem(rules);

    assert_eq!(model.minimise_cost(), SolveStatus::Optimal);
    // one event per supplier: supplier 0 exits, supplier 1 enters
    assert_eq!(
        model.volume_details().unwrap(),
        grid3(vec![vec![vec![100, 0]], vec![vec![0, 100]]])
    );
    assert_eq!(model.total_cost().unwrap(), 2_100);
}

#[test]
fn minimum_units_above_demand_excludes_the_supplier() {
    let price = grid3(vec![vec![vec![1]], vec![vec![2]]]);
    let demand = grid2(vec![vec![100]]);
    let minimum = grid3(vec![vec![vec![150]], vec![vec![0]]]);
    let rules = RuleSet::new().with(Rule::MinimumUnits(minimum)).unwrap();
    let mut model = AwardModel::new(price, demand, rules).unwrap();

    assert_eq!(model.minimise_cost(), SolveStatus::Optimal);
    assert_eq!(
        model.volume_details().unwrap(),
        grid3(vec![vec![vec![0]], vec![vec![100]]])
    );
    assert_eq!(model.total_cost().unwrap(), 200);
}

#[test]
fn untrusted_pairing_carries_no_volume() {
    let price = grid3(vec![
        vec![vec![1, 1], vec![1, 1]],
        vec![vec![10, 10], vec![10, 10]],
    ]);
    let demand = grid2(vec![vec![10, 10], vec![10, 10]]);
    let trust = Grid2::from_rows(vec![vec![false, true], vec![true, true]]).unwrap();
    let rules = RuleSet::new().with(Rule::Trust(trust)).unwrap();
    let mut model = AwardModel::new(price, demand, rules).unwrap();

    assert_eq!(model.minimise_cost(), SolveStatus::Optimal);
    for year in 0..2 {
        assert_eq!(model.volume(0, 0, year).unwrap(), 0);
        assert_eq!(model.volume(1, 0, year).unwrap(), 10);
        assert_eq!(model.volume(0, 1, year).unwrap(), 10);
    }
    assert_eq!(model.total_cost().unwrap(), 220);
}

#[test]
fn pinned_volume_is_honoured_and_resolving_overwrites() {
    let price = grid3(vec![vec![vec![1, 1]], vec![vec![2, 2]]]);
    let demand = grid2(vec![vec![100, 100]]);
    let mut model = AwardModel::new(price, demand, RuleSet::new()).unwrap();

    assert_eq!(model.minimise_cost(), SolveStatus::Optimal);
    assert_eq!(model.total_cost().unwrap(), 200);

    model.pin_volume(1, 0, 0, 30).unwrap();
    assert_eq!(model.minimise_cost(), SolveStatus::Optimal);
    assert_eq!(model.volume(1, 0, 0).unwrap(), 30);
    assert_eq!(model.volume(0, 0, 0).unwrap(), 70);
    assert_eq!(model.total_cost().unwrap(), 230);
}

#[test]
fn pin_validation() {
    let price = grid3(vec![vec![vec![1]]]);
    let demand = grid2(vec![vec![10]]);
    let mut model = AwardModel::new(price, demand, RuleSet::new()).unwrap();

    assert!(matches!(
        model.pin_volume(1, 0, 0, 5),
        Err(AllotError::IndexOutOfRange {
            axis: "supplier",
            ..
        })
    ));
    assert!(matches!(
        model.pin_volume(0, 0, 0, 501),
        Err(AllotError::InvalidInput(_))
    ));
}

#[test]
fn multi_year_demand_and_capacity_properties() {
    let price = grid3(vec![
        vec![vec![3, 4], vec![5, 6]],
        vec![vec![4, 3], vec![6, 5]],
        vec![vec![5, 5], vec![4, 4]],
    ]);
    let demand = grid2(vec![vec![120, 80], vec![60, 90]]);
    let capacity = grid2(vec![vec![2, 2], vec![2, 2], vec![2, 2]]);
    let rules = RuleSet::new().with(Rule::Capacity(capacity)).unwrap();
    let mut model = AwardModel::new(price, demand.clone(), rules).unwrap();

    assert!(model.minimise_cost().has_solution());
    let volume = model.volume_details().unwrap();

    for part in 0..2 {
        for year in 0..2 {
            let total: i64 = (0..3).map(|s| volume.get(s, part, year).unwrap()).sum();
            assert_eq!(total, *demand.get(part, year).unwrap());
        }
    }
    for supplier in 0..3 {
        for year in 0..2 {
            let assigned_parts = (0..2)
                .filter(|&p| *volume.get(supplier, p, year).unwrap() > 0)
                .count();
            assert!(assigned_parts <= 2);
        }
    }
}

#[test]
fn accessors_are_idempotent_after_one_solve() {
    let mut model = MinimalAwardModel::builder(minimal_price(), vec![300, 20, 150, 80])
        .capacity(vec![2, 3])
        .build()
        .unwrap();
    model.minimise_cost();

    assert_eq!(model.volume_details().unwrap(), model.volume_details().unwrap());
    assert_eq!(model.supplier_costs().unwrap(), model.supplier_costs().unwrap());
    assert_eq!(model.total_cost().unwrap(), model.total_cost().unwrap());
}

#[test]
fn accessors_fail_before_any_solve() {
    let price = grid3(vec![vec![vec![1]]]);
    let demand = grid2(vec![vec![10]]);
    let model = AwardModel::new(price, demand, RuleSet::new()).unwrap();

    assert!(model.status().is_none());
    assert!(model.last_solve_time().is_none());
    assert!(matches!(model.total_cost(), Err(AllotError::NotSolved)));
    assert!(matches!(model.volume(0, 0, 0), Err(AllotError::NotSolved)));
    assert!(matches!(
        model.work_value_details(),
        Err(AllotError::NotSolved)
    ));
}

#[test]
fn accessors_fail_after_an_infeasible_solve() {
    // positive demand but a capacity of zero assigned parts
    let price = grid3(vec![vec![vec![1]]]);
    let demand = grid2(vec![vec![10]]);
    let capacity = grid2(vec![vec![0]]);
    let rules = RuleSet::new().with(Rule::Capacity(capacity)).unwrap();
    let mut model = AwardModel::new(price, demand, rules).unwrap();

    assert_eq!(model.minimise_cost(), SolveStatus::Infeasible);
    assert_eq!(model.status(), Some(SolveStatus::Infeasible));
    assert!(matches!(
        model.total_cost(),
        Err(AllotError::NoFeasibleSolution(SolveStatus::Infeasible))
    ));
    assert!(matches!(
        model.volume(0, 0, 0),
        Err(AllotError::NoFeasibleSolution(_))
    ));
}

#[test]
fn out_of_range_accessor_never_returns_a_default() {
    let price = grid3(vec![vec![vec![1]], vec![vec![2]]]);
    let demand = grid2(vec![vec![10]]);
    let mut model = AwardModel::new(price, demand, RuleSet::new()).unwrap();
    model.minimise_cost();

    assert!(matches!(
        model.volume(2, 0, 0),
        Err(AllotError::IndexOutOfRange {
            axis: "supplier",
            index: 2,
            len: 2
        })
    ));
    assert!(matches!(
        model.volume(0, 1, 0),
        Err(AllotError::IndexOutOfRange { axis: "part", .. })
    ));
    assert!(matches!(
        model.volume(0, 0, 1),
        Err(AllotError::IndexOutOfRange { axis: "year", .. })
    ));
}

#[test]
fn construction_rejects_inconsistent_input() {
    // demand has the wrong year count
    let price = grid3(vec![vec![vec![1, 2]]]);
    let demand = grid2(vec![vec![10]]);
    assert!(matches!(
        AwardModel::new(price, demand, RuleSet::new()),
        Err(AllotError::InvalidInput(_))
    ));

    // capacity sized supplier x part instead of supplier x year
    let price = grid3(vec![vec![vec![1], vec![1]]]);
    let demand = grid2(vec![vec![10], vec![10]]);
    let rules = RuleSet::new()
        .with(Rule::Capacity(grid2(vec![vec![1, 1]])))
        .unwrap();
    assert!(matches!(
        AwardModel::new(price, demand, rules),
        Err(AllotError::InvalidInput(_))
    ));

    // negative price
    let price = grid3(vec![vec![vec![-1]]]);
    let demand = grid2(vec![vec![10]]);
    assert!(matches!(
        AwardModel::new(price, demand, RuleSet::new()),
        Err(AllotError::InvalidInput(_))
    ));
}

#[test]
fn zero_demand_with_share_active_is_rejected() {
    let price = grid2(vec![vec![1], vec![2]]);
    let share = grid2(vec![vec![100], vec![100]]);
    let err = MinimalAwardModel::builder(price, vec![0])
        .share(share)
        .build()
        .unwrap_err();
    assert!(matches!(err, AllotError::InvalidInput(_)));
    assert!(err.to_string().contains("share"));
}

#[test]
fn zero_demand_without_share_solves_to_zero_volume() {
    let price = grid2(vec![vec![1], vec![2]]);
    let mut model = MinimalAwardModel::builder(price, vec![0]).build().unwrap();
    assert_eq!(model.minimise_cost(), SolveStatus::Optimal);
    assert_eq!(model.volume(0, 0).unwrap(), 0);
    assert_eq!(model.total_cost().unwrap(), 0);
}

#[test]
fn explicit_settings_are_accepted() {
    let price = grid3(vec![vec![vec![1]]]);
    let demand = grid2(vec![vec![10]]);
    let settings = SolveSettings::new()
        .with_search_workers(1)
        .with_seconds_spent_limit(5);
    let mut model =
        AwardModel::with_settings(price, demand, RuleSet::new(), settings).unwrap();
    assert_eq!(model.minimise_cost(), SolveStatus::Optimal);
    assert!(model.last_solve_time().is_some());
}

#[test]
fn scenario_delta_reports_per_part_value_difference() {
    let price = grid3(vec![vec![vec![4]]]);
    let demand = grid2(vec![vec![10]]);
    let discounted = reduced_price(&price, 0, 0.5).unwrap();

    let mut a = AwardModel::new(price, demand.clone(), RuleSet::new()).unwrap();
    let mut b = AwardModel::new(discounted, demand, RuleSet::new()).unwrap();
    a.minimise_cost();
    b.minimise_cost();

    let delta = work_value_delta(&a, &b).unwrap();
    assert_eq!(delta.get(0, 0), Some(&20));
}

#[test]
fn scenario_delta_requires_solved_congruent_models() {
    let price = grid3(vec![vec![vec![4]]]);
    let demand = grid2(vec![vec![10]]);
    let mut a = AwardModel::new(price.clone(), demand.clone(), RuleSet::new()).unwrap();
    let b = AwardModel::new(price.clone(), demand.clone(), RuleSet::new()).unwrap();
    a.minimise_cost();

    // b was never solved
    assert!(matches!(
        work_value_delta(&a, &b),
        Err(AllotError::NotSolved)
    ));

    // shapes differ
    let wide = grid3(vec![vec![vec![4], vec![4]]]);
    let wide_demand = grid2(vec![vec![10], vec![10]]);
    let mut c = AwardModel::new(wide, wide_demand, RuleSet::new()).unwrap();
    c.minimise_cost();
    assert!(matches!(
        work_value_delta(&a, &c),
        Err(AllotError::InvalidInput(_))
    ));
}

#[test]
fn reduced_price_validation_and_rounding() {
    let price = grid3(vec![vec![vec![5]], vec![vec![5]]]);
    assert!(matches!(
        reduced_price(&price, 2, 0.1),
        Err(AllotError::IndexOutOfRange {
            axis: "supplier",
            ..
        })
    ));
    assert!(matches!(
        reduced_price(&price, 0, 1.5),
        Err(AllotError::InvalidInput(_))
    ));

    let discounted = reduced_price(&price, 0, 0.5).unwrap();
    assert_eq!(discounted.get(0, 0, 0), Some(&3));
    assert_eq!(discounted.get(1, 0, 0), Some(&5));
}

#[test]
fn report_renders_status_and_volumes() {
    let price = grid3(vec![vec![vec![1, 1]], vec![vec![2, 2]]]);
    let demand = grid2(vec![vec![100, 100]]);
    let mut model = AwardModel::new(price, demand, RuleSet::new()).unwrap();

    assert!(matches!(
        SolutionReport::render(&model),
        Err(AllotError::NotSolved)
    ));

    model.minimise_cost();
    let report = SolutionReport::render(&model).unwrap();
    assert!(report.contains("status: optimal"));
    assert!(report.contains("total cost: 200"));
    assert!(report.contains("part  1"));
    assert!(report.contains("supplier  1"));
}

#[test]
fn csv_export_emits_one_row_per_cell() {
    let price = grid3(vec![vec![vec![1, 1]], vec![vec![2, 2]]]);
    let demand = grid2(vec![vec![100, 100]]);
    let mut model = AwardModel::new(price, demand, RuleSet::new()).unwrap();
    model.minimise_cost();

    let csv = CsvExporter::to_string(&model).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("supplier,part,year,volume,part_value,supplier_value")
    );
    // 2 suppliers x 1 part x 2 years
    assert_eq!(lines.count(), 4);

    let mut buffer = Vec::new();
    CsvExporter::write(&model, &mut buffer).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), csv);
}
