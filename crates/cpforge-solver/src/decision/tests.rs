use cpforge_core::{Result, VariableNetwork};

use super::*;

#[derive(Debug)]
struct Done;

impl DecisionBuilder for Done {
    fn next(&mut self, _solver: &mut Solver) -> Result<Option<Box<dyn Decision>>> {
        Ok(None)
    }
}

#[test]
fn test_assign_values_in_order_then_done() {
    let mut solver = Solver::new("test");
    let x = solver.make_int_var(0, 10, "x");
    let y = solver.make_int_var(0, 10, "y");
    let mut builder = AssignValues::new(vec![(x, 1), (y, 2)]);

    let first = builder.next(&mut solver).unwrap().unwrap();
    first.apply(&mut solver).unwrap();
    assert_eq!(solver.network().int_min(x), 1);
    assert_eq!(solver.network().int_max(y), 10);

    let second = builder.next(&mut solver).unwrap().unwrap();
    second.apply(&mut solver).unwrap();
    assert_eq!(solver.network().int_min(y), 2);

    assert!(builder.next(&mut solver).unwrap().is_none());
    assert!(builder.next(&mut solver).unwrap().is_none());
}

#[test]
fn test_compose_runs_builders_in_sequence() {
    let mut solver = Solver::new("test");
    let x = solver.make_int_var(0, 10, "x");
    let mut builder = Compose::new(vec![
        Box::new(Done),
        Box::new(AssignValues::new(vec![(x, 4)])),
        Box::new(Done),
    ]);

    assert!(builder.next(&mut solver).unwrap().is_some());
    assert!(builder.next(&mut solver).unwrap().is_none());
    assert!(builder.next(&mut solver).unwrap().is_none());
}

#[test]
fn test_empty_compose_is_done() {
    let mut solver = Solver::new("test");
    let mut builder = Compose::default();
    assert!(builder.next(&mut solver).unwrap().is_none());
}
