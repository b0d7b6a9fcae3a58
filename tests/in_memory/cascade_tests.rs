//! Cascading deletes through the board → lane → task hierarchy.

use crate::in_memory::helpers::{App, app, create_board, lane_id, pos, runtime, sign_up};
use rstest::rstest;
use std::io;
use taskmaster::workspace::{ports::HierarchyRepository, services::CreateTaskRequest};
use tokio::runtime::Runtime;

/// Deleting a board removes its lanes and every task in them, and nothing
/// else.
#[rstest]
fn board_delete_cascades_to_lanes_and_tasks(runtime: io::Result<Runtime>, app: App) {
    let rt = runtime.expect("runtime creation");
    let alice = rt
        .block_on(sign_up(&app.accounts, "alice@example.com"))
        .expect("alice signs up");
    let doomed = rt
        .block_on(create_board(&app, &alice, "Doomed"))
        .expect("board created");
    let kept = rt
        .block_on(create_board(&app, &alice, "Kept"))
        .expect("board created");

    let mut doomed_tasks = Vec::new();
    for title in ["Todo", "In Progress", "Done"] {
        let task = rt
            .block_on(
                app.tasks
                    .create_task(&alice, CreateTaskRequest::new(title, lane_id(&doomed, title))),
            )
            .expect("task created");
        doomed_tasks.push(task);
    }
    let survivor = rt
        .block_on(
            app.tasks
                .create_task(&alice, CreateTaskRequest::new("Keep me", lane_id(&kept, "Todo"))),
        )
        .expect("task created");

    rt.block_on(app.boards.delete_board(&alice, doomed.board.id()))
        .expect("board deleted");

    assert!(
        rt.block_on(app.hierarchy.find_board(doomed.board.id()))
            .expect("lookup")
            .is_none()
    );
    for lane in doomed.lanes() {
        assert!(
            rt.block_on(app.hierarchy.find_lane(lane.id()))
                .expect("lookup")
                .is_none()
        );
    }
    for task in &doomed_tasks {
        assert!(rt.block_on(app.tasks.get_task(&alice, task.id())).is_err());
    }
    rt.block_on(app.tasks.get_task(&alice, survivor.id()))
        .expect("other board's task survives");
    let boards = rt
        .block_on(app.boards.list_boards(&alice))
        .expect("listing");
    assert_eq!(boards.len(), 1);
}

/// A task moved onto another board goes with that board when it is deleted.
#[rstest]
fn moved_task_follows_its_current_board(runtime: io::Result<Runtime>, app: App) {
    let rt = runtime.expect("runtime creation");
    let alice = rt
        .block_on(sign_up(&app.accounts, "alice@example.com"))
        .expect("alice signs up");
    let origin = rt
        .block_on(create_board(&app, &alice, "Origin"))
        .expect("board created");
    let target = rt
        .block_on(create_board(&app, &alice, "Target"))
        .expect("board created");
    let task = rt
        .block_on(
            app.tasks
                .create_task(&alice, CreateTaskRequest::new("Roam", lane_id(&origin, "Todo"))),
        )
        .expect("task created");
    rt.block_on(app.tasks.move_task(
        &alice,
        task.id(),
        lane_id(&target, "Done"),
        pos(0),
    ))
    .expect("task moved");

    rt.block_on(app.boards.delete_board(&alice, origin.board.id()))
        .expect("origin deleted");
    rt.block_on(app.tasks.get_task(&alice, task.id()))
        .expect("task now lives on target");

    rt.block_on(app.boards.delete_board(&alice, target.board.id()))
        .expect("target deleted");
    assert!(rt.block_on(app.tasks.get_task(&alice, task.id())).is_err());
}
