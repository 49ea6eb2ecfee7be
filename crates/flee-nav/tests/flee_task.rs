use std::sync::Arc;

use flee_bt::{BehaviorTree, BtNode, BtStatus, Condition, Sequence, TaskNode};
use flee_core::{
    run_cycle, Blackboard, CellCoord, CellPath, CycleStatus, Player, TaskOutcome, Vec2,
};
use flee_nav::{plan_flee_path, CalculateFleePathTask, FleeConfig, TileMap};
use flee_tools::{TraceEvent, TraceLog, TRACE_LOG};

type Board = Blackboard<TileMap, Player>;

fn corridor() -> Arc<TileMap> {
    let rows = vec![(0..12).collect::<Vec<i32>>()];
    Arc::new(TileMap::from_rows(&rows, TileMap::DEFAULT_TILE_SIZE).unwrap())
}

fn board(map: Arc<TileMap>, position: Vec2) -> Board {
    let mut bb = Blackboard::new(map, Player::new(7, position));
    bb.scratch_mut().set(TRACE_LOG, TraceLog::default());
    bb
}

fn events(bb: &Board) -> Vec<TraceEvent> {
    bb.scratch().get(TRACE_LOG).unwrap().unwrap().events.clone()
}

#[test]
fn success_commits_path_and_traces_it() {
    let mut bb = board(corridor(), Vec2::new(8.0, 8.0));
    bb.advance_cycle();
    let mut task = CalculateFleePathTask::new();

    let status = run_cycle(&mut task, &mut bb);

    assert_eq!(status, CycleStatus::Finished(TaskOutcome::Success));
    let expected: Vec<CellCoord> = (1..=8).map(|x| CellCoord::new(x, 0)).collect();
    assert_eq!(bb.path(), Some(&CellPath::from(expected)));
    assert_eq!(
        events(&bb),
        vec![TraceEvent::new(1, "flee.success").with_agent(7).with_a(8).with_b(2)]
    );
}

#[test]
fn short_path_fails_and_keeps_previous_path() {
    let map = Arc::new(TileMap::filled(1, 1, 16.0, 3).unwrap());
    let mut bb = board(map, Vec2::new(4.0, 4.0));
    let previous = CellPath::from(vec![CellCoord::new(5, 5)]);
    bb.set_path(previous.clone());

    let status = run_cycle(&mut CalculateFleePathTask::new(), &mut bb);

    assert_eq!(status, CycleStatus::Finished(TaskOutcome::Failure));
    assert_eq!(bb.path(), Some(&previous));
    let tags: Vec<String> = events(&bb).iter().map(|e| e.tag.to_string()).collect();
    assert_eq!(tags, vec!["flee.path_too_short"]);
}

#[test]
fn cursor_off_the_map_fails_without_a_path() {
    let mut bb = board(corridor(), Vec2::new(-10.0, 3.0));

    let status = run_cycle(&mut CalculateFleePathTask::new(), &mut bb);

    assert_eq!(status.outcome(), TaskOutcome::Failure);
    assert_eq!(bb.path(), None);
    let event = &events(&bb)[0];
    assert_eq!(event.tag, "flee.no_start_cell");
    assert_eq!((event.a, event.b), (0, 2));
}

#[test]
fn task_instance_is_reused_as_the_cursor_moves() {
    let map = corridor();
    let mut bb = board(map.clone(), Vec2::new(8.0, 8.0));
    let mut task = CalculateFleePathTask::new().named("Flee");

    assert!(run_cycle(&mut task, &mut bb).outcome().is_success());
    assert_eq!(bb.path().map(CellPath::len), Some(8));

    // Near the east wall only two cells remain, which still meets the threshold.
    bb.agent_mut()
        .cursor
        .move_to(map.cell_center(CellCoord::new(9, 0)));
    bb.advance_cycle();
    assert!(run_cycle(&mut task, &mut bb).outcome().is_success());
    assert_eq!(
        bb.path().map(CellPath::cells),
        Some(&[CellCoord::new(10, 0), CellCoord::new(11, 0)][..])
    );

    // Off the map: the task fails and the last committed path stays.
    bb.agent_mut().cursor.move_to(Vec2::new(500.0, 8.0));
    bb.advance_cycle();
    assert!(!run_cycle(&mut task, &mut bb).outcome().is_success());
    assert_eq!(bb.path().map(CellPath::len), Some(2));

    let cycles: Vec<u64> = events(&bb).iter().map(|e| e.cycle).collect();
    assert_eq!(cycles, vec![0, 1, 2]);
}

#[test]
fn configured_step_cap_changes_length_and_threshold() {
    let config = FleeConfig::default().with_max_steps(4);
    let mut bb = board(corridor(), Vec2::new(8.0, 8.0));

    let status = run_cycle(&mut CalculateFleePathTask::with_config(config), &mut bb);

    assert!(status.outcome().is_success());
    assert_eq!(bb.path().map(CellPath::len), Some(4));
    assert_eq!(events(&bb)[0].b, 1);
}

#[test]
fn behavior_tree_runs_the_task_as_a_leaf() {
    let flee = Box::new(TaskNode::new(CalculateFleePathTask::new())) as Box<dyn BtNode<Board>>;
    let has_path = Box::new(Condition::new(|bb: &Board| {
        bb.path().is_some_and(|p| !p.is_empty())
    })) as Box<dyn BtNode<Board>>;
    let mut tree: BehaviorTree<Board> =
        BehaviorTree::new(Box::new(Sequence::new(vec![flee, has_path])));

    let mut bb = board(corridor(), Vec2::new(8.0, 8.0));
    assert_eq!(tree.tick(&mut bb), BtStatus::Success);

    let mut stuck = board(corridor(), Vec2::new(500.0, 8.0));
    assert_eq!(tree.tick(&mut stuck), BtStatus::Failure);
    assert_eq!(tree.ticks(), 2);
}

#[test]
fn agents_share_one_grid_across_threads() {
    let mut map = TileMap::new(16, 16, 16.0).unwrap();
    let cells: Vec<CellCoord> = map.cells().collect();
    for cell in cells {
        map.set_capacity(cell, (cell.x * 5 + cell.y * 3) % 7 - 2).unwrap();
    }
    let map = Arc::new(map);

    let starts: Vec<Vec2> = (0..4)
        .map(|i| map.cell_center(CellCoord::new(i * 4, 15 - i * 3)))
        .collect();

    let results: Vec<Option<CellPath>> = std::thread::scope(|scope| {
        let handles: Vec<_> = starts
            .iter()
            .enumerate()
            .map(|(i, &position)| {
                let map = Arc::clone(&map);
                scope.spawn(move || {
                    let mut bb = Blackboard::new(map, Player::new(i as u64, position));
                    run_cycle(&mut CalculateFleePathTask::new(), &mut bb);
                    bb.take_path()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (position, result) in starts.iter().zip(results) {
        let expected = plan_flee_path(&*map, *position, &FleeConfig::default()).ok();
        assert_eq!(result, expected);
    }
}
