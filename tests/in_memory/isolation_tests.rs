//! Owner isolation across boards, lanes, and tasks.

use crate::in_memory::helpers::{App, app, create_board, lane_id, pos, runtime, sign_up};
use rstest::rstest;
use std::io;
use taskmaster::fault::{Fault, FaultKind};
use taskmaster::workspace::{
    domain::{LanePatch, TaskPatch},
    services::{CreateLaneRequest, CreateTaskRequest},
};
use tokio::runtime::Runtime;

/// Every board-scoped operation by a stranger reports the board as missing.
#[rstest]
fn strangers_cannot_see_boards(runtime: io::Result<Runtime>, app: App) {
    let rt = runtime.expect("runtime creation");
    let alice = rt
        .block_on(sign_up(&app.accounts, "alice@example.com"))
        .expect("alice signs up");
    let bob = rt
        .block_on(sign_up(&app.accounts, "bob@example.com"))
        .expect("bob signs up");
    let view = rt
        .block_on(create_board(&app, &alice, "Sprint 1"))
        .expect("board created");
    let board_id = view.board.id();

    let read = rt.block_on(app.boards.get_board(&bob, board_id));
    let lane = rt.block_on(
        app.boards
            .create_lane(&bob, board_id, CreateLaneRequest::new("Mine")),
    );
    let delete = rt.block_on(app.boards.delete_board(&bob, board_id));

    for kind in [
        read.map(|_| ()).map_err(|err| err.kind()),
        lane.map(|_| ()).map_err(|err| err.kind()),
        delete.map_err(|err| err.kind()),
    ] {
        assert_eq!(kind, Err(FaultKind::NotFound));
    }
    assert!(
        rt.block_on(app.boards.list_boards(&bob))
            .expect("listing")
            .is_empty()
    );
}

/// Lane operations by a stranger are refused outright.
#[rstest]
fn strangers_cannot_touch_lanes(runtime: io::Result<Runtime>, app: App) {
    let rt = runtime.expect("runtime creation");
    let alice = rt
        .block_on(sign_up(&app.accounts, "alice@example.com"))
        .expect("alice signs up");
    let bob = rt
        .block_on(sign_up(&app.accounts, "bob@example.com"))
        .expect("bob signs up");
    let view = rt
        .block_on(create_board(&app, &alice, "Sprint 1"))
        .expect("board created");
    let todo = lane_id(&view, "Todo");

    let update = rt
        .block_on(app.boards.update_lane(
            &bob,
            todo,
            LanePatch {
                position: Some(pos(9)),
                ..LanePatch::default()
            },
        ))
        .expect_err("not bob's lane");
    assert_eq!(update.kind(), FaultKind::Forbidden);

    let assign = rt
        .block_on(
            app.tasks
                .create_task(&bob, CreateTaskRequest::new("Sneaky", todo)),
        )
        .expect_err("not bob's lane");
    assert_eq!(assign.kind(), FaultKind::BadRequest);
}

/// Task operations by a stranger report the task as missing.
#[rstest]
fn strangers_cannot_see_tasks(runtime: io::Result<Runtime>, app: App) {
    let rt = runtime.expect("runtime creation");
    let alice = rt
        .block_on(sign_up(&app.accounts, "alice@example.com"))
        .expect("alice signs up");
    let bob = rt
        .block_on(sign_up(&app.accounts, "bob@example.com"))
        .expect("bob signs up");
    let view = rt
        .block_on(create_board(&app, &alice, "Sprint 1"))
        .expect("board created");
    let task = rt
        .block_on(
            app.tasks
                .create_task(&alice, CreateTaskRequest::new("Plan", lane_id(&view, "Todo"))),
        )
        .expect("task created");

    let update = rt
        .block_on(app.tasks.update_task(
            &bob,
            task.id(),
            TaskPatch {
                title: Some("Hijacked".to_owned()),
                ..TaskPatch::default()
            },
        ))
        .expect_err("not bob's task");
    let delete = rt
        .block_on(app.tasks.delete_task(&bob, task.id()))
        .expect_err("not bob's task");

    assert_eq!(update.kind(), FaultKind::NotFound);
    assert_eq!(delete.kind(), FaultKind::NotFound);
    assert_eq!(update.to_string(), format!("task {} not found", task.id()));
}
