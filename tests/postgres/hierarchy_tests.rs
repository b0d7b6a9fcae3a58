//! Hierarchy repository tests against `PostgreSQL`.

use crate::postgres::helpers::{PostgresContext, postgres_context};
use mockable::DefaultClock;
use rstest::rstest;
use taskmaster::workspace::{
    domain::{Board, EntityRef, Lane, LaneId, LanePatch, Position, TaskPatch},
    ports::{HierarchyRepository, HierarchyRepositoryError},
};

fn pos(value: u32) -> Position {
    Position::new(value).expect("position in range")
}

#[rstest]
fn board_is_stored_with_ordered_default_lanes(postgres_context: Option<PostgresContext>) {
    let Some(ctx) = postgres_context else { return };
    let owner = ctx.owner("alice@example.com");

    let (board, _) = ctx.board(owner.id(), "Sprint 1");

    let stored = ctx
        .rt
        .block_on(ctx.hierarchy.find_board(board.id()))
        .expect("lookup")
        .expect("board stored");
    assert_eq!(stored.title().as_str(), "Sprint 1");
    assert!(stored.is_owned_by(owner.id()));
    let titles: Vec<String> = ctx
        .rt
        .block_on(ctx.hierarchy.list_lanes_by_board(board.id()))
        .expect("listing")
        .iter()
        .map(|lane| lane.title().as_str().to_owned())
        .collect();
    assert_eq!(titles, vec!["Todo", "In Progress", "Done"]);
}

#[rstest]
fn failed_board_creation_leaves_nothing_behind(postgres_context: Option<PostgresContext>) {
    let Some(ctx) = postgres_context else { return };
    let owner = ctx.owner("alice@example.com");
    let (_, lanes) = ctx.board(owner.id(), "Sprint 1");
    let existing = lanes.first().expect("default lane");

    let second = Board::new("Sprint 2", None, owner.id(), &DefaultClock).expect("valid board");
    let fresh = Lane::new("Todo", pos(0), second.id()).expect("valid lane");
    let clash = Lane::from_persisted(
        existing.id(),
        existing.title().clone(),
        existing.position(),
        second.id(),
    );
    let result = ctx
        .rt
        .block_on(ctx.hierarchy.insert_board(&second, &[fresh, clash]));

    assert!(matches!(
        result,
        Err(HierarchyRepositoryError::Duplicate(EntityRef::Lane(id))) if id == existing.id()
    ));
    assert!(
        ctx.rt
            .block_on(ctx.hierarchy.find_board(second.id()))
            .expect("lookup")
            .is_none()
    );
    assert!(
        ctx.rt
            .block_on(ctx.hierarchy.list_lanes_by_board(second.id()))
            .expect("listing")
            .is_empty()
    );
}

#[rstest]
fn deleting_a_board_removes_lanes_and_tasks(postgres_context: Option<PostgresContext>) {
    let Some(ctx) = postgres_context else { return };
    let owner = ctx.owner("alice@example.com");
    let (board, lanes) = ctx.board(owner.id(), "Sprint 1");
    let tasks: Vec<_> = lanes
        .iter()
        .map(|lane| ctx.task(owner.id(), lane.id(), "Ship"))
        .collect();

    ctx.rt
        .block_on(ctx.hierarchy.delete_board(board.id()))
        .expect("board deleted");

    for lane in &lanes {
        assert!(
            ctx.rt
                .block_on(ctx.hierarchy.find_lane(lane.id()))
                .expect("lookup")
                .is_none()
        );
    }
    for task in &tasks {
        assert!(
            ctx.rt
                .block_on(ctx.hierarchy.find_task_for_owner(task.id(), owner.id()))
                .expect("lookup")
                .is_none()
        );
    }
    assert!(matches!(
        ctx.rt.block_on(ctx.hierarchy.delete_board(board.id())),
        Err(HierarchyRepositoryError::NotFound(EntityRef::Board(_)))
    ));
}

#[rstest]
fn deleting_a_lane_keeps_its_siblings(postgres_context: Option<PostgresContext>) {
    let Some(ctx) = postgres_context else { return };
    let owner = ctx.owner("alice@example.com");
    let (board, lanes) = ctx.board(owner.id(), "Sprint 1");
    let [todo, doing, _] = lanes.as_slice() else {
        panic!("three default lanes");
    };
    let doomed = ctx.task(owner.id(), todo.id(), "Doomed");
    let kept = ctx.task(owner.id(), doing.id(), "Kept");

    ctx.rt
        .block_on(ctx.hierarchy.delete_lane(todo.id()))
        .expect("lane deleted");

    assert!(
        ctx.rt
            .block_on(ctx.hierarchy.find_task_for_owner(doomed.id(), owner.id()))
            .expect("lookup")
            .is_none()
    );
    assert!(
        ctx.rt
            .block_on(ctx.hierarchy.find_task_for_owner(kept.id(), owner.id()))
            .expect("lookup")
            .is_some()
    );
    assert_eq!(
        ctx.rt
            .block_on(ctx.hierarchy.list_lanes_by_board(board.id()))
            .expect("listing")
            .len(),
        2
    );
}

#[rstest]
fn lane_lookup_is_scoped_to_the_board_owner(postgres_context: Option<PostgresContext>) {
    let Some(ctx) = postgres_context else { return };
    let alice = ctx.owner("alice@example.com");
    let bob = ctx.owner("bob@example.com");
    let (board, lanes) = ctx.board(alice.id(), "Sprint 1");
    let lane = lanes.first().expect("default lane");

    let found = ctx
        .rt
        .block_on(ctx.hierarchy.find_lane_for_owner(lane.id(), alice.id()))
        .expect("lookup")
        .expect("alice owns the board");
    let foreign = ctx
        .rt
        .block_on(ctx.hierarchy.find_lane_for_owner(lane.id(), bob.id()))
        .expect("lookup");

    assert_eq!(found.0.id(), lane.id());
    assert_eq!(found.1.id(), board.id());
    assert!(foreign.is_none());
}

#[rstest]
fn task_updates_write_only_supplied_columns(postgres_context: Option<PostgresContext>) {
    let Some(ctx) = postgres_context else { return };
    let owner = ctx.owner("alice@example.com");
    let (_, lanes) = ctx.board(owner.id(), "Sprint 1");
    let [todo, _, done] = lanes.as_slice() else {
        panic!("three default lanes");
    };
    let task = ctx.task(owner.id(), todo.id(), "Ship");
    let rename = TaskPatch {
        title: Some("Ship it".to_owned()),
        description: Some(None),
        ..TaskPatch::default()
    }
    .validate(&DefaultClock)
    .expect("valid patch");
    let relocate = TaskPatch::relocate(done.id(), pos(7))
        .validate(&DefaultClock)
        .expect("valid patch");

    ctx.rt
        .block_on(ctx.hierarchy.update_task(task.id(), &rename))
        .expect("rename stored");
    let moved = ctx
        .rt
        .block_on(ctx.hierarchy.update_task(task.id(), &relocate))
        .expect("relocation stored");

    assert_eq!(moved.title().as_str(), "Ship it");
    assert_eq!(moved.description(), None);
    assert_eq!(moved.lane_id(), Some(done.id()));
    assert_eq!(moved.position(), pos(7));
}

#[rstest]
fn lane_updates_write_only_supplied_columns(postgres_context: Option<PostgresContext>) {
    let Some(ctx) = postgres_context else { return };
    let owner = ctx.owner("alice@example.com");
    let (_, lanes) = ctx.board(owner.id(), "Sprint 1");
    let lane = lanes.first().expect("default lane");
    let rename = LanePatch {
        title: Some("Backlog".to_owned()),
        position: None,
    }
    .validate()
    .expect("valid patch");
    let reposition = LanePatch {
        title: None,
        position: Some(Position::MAX),
    }
    .validate()
    .expect("valid patch");

    ctx.rt
        .block_on(ctx.hierarchy.update_lane(lane.id(), &rename))
        .expect("rename stored");
    let updated = ctx
        .rt
        .block_on(ctx.hierarchy.update_lane(lane.id(), &reposition))
        .expect("reposition stored");

    assert_eq!(updated.title().as_str(), "Backlog");
    assert_eq!(updated.position(), Position::MAX);
}

#[rstest]
fn moving_into_a_missing_lane_changes_nothing(postgres_context: Option<PostgresContext>) {
    let Some(ctx) = postgres_context else { return };
    let owner = ctx.owner("alice@example.com");
    let (_, lanes) = ctx.board(owner.id(), "Sprint 1");
    let todo = lanes.first().expect("default lane");
    let task = ctx.task(owner.id(), todo.id(), "Ship");
    let missing = LaneId::new();
    let relocate = TaskPatch::relocate(missing, pos(1))
        .validate(&DefaultClock)
        .expect("valid patch");

    let result = ctx
        .rt
        .block_on(ctx.hierarchy.update_task(task.id(), &relocate));

    assert!(matches!(
        result,
        Err(HierarchyRepositoryError::NotFound(EntityRef::Lane(id))) if id == missing
    ));
    let stored = ctx
        .rt
        .block_on(ctx.hierarchy.find_task_for_owner(task.id(), owner.id()))
        .expect("lookup")
        .expect("task kept");
    assert_eq!(stored.lane_id(), Some(todo.id()));
    assert_eq!(stored.position(), Position::ZERO);
}
