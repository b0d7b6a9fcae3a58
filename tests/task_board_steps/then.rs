//! Then steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use rstest_bdd_macros::then;
use taskmaster::fault::Fault;

#[then("the board has {count:usize} lanes")]
fn board_has_lanes(world: &TaskBoardWorld, count: usize) -> Result<(), eyre::Report> {
    let found = world.board()?.lanes.len();
    if found != count {
        return Err(eyre::eyre!("expected {count} lanes, found {found}"));
    }
    Ok(())
}

#[then(r#"lane "{title}" is at position {position:u32}"#)]
fn lane_is_at_position(
    world: &TaskBoardWorld,
    title: String,
    position: u32,
) -> Result<(), eyre::Report> {
    let lane = world
        .board()?
        .lanes()
        .find(|lane| lane.title().as_str() == title)
        .ok_or_else(|| eyre::eyre!("board has no lane titled {title}"))?;
    if lane.position().value() != position {
        return Err(eyre::eyre!(
            "expected {title} at position {position}, found {}",
            lane.position()
        ));
    }
    Ok(())
}

#[then(r#"the task is in lane "{lane}" at position {position:u32}"#)]
fn task_is_in_lane(
    world: &TaskBoardWorld,
    lane: String,
    position: u32,
) -> Result<(), eyre::Report> {
    let expected_lane = world.lane(&lane)?;
    let task_id = world.task()?.id();
    let owner_id = world.task()?.owner_id();
    let owner = world
        .principals
        .values()
        .find(|principal| principal.id() == owner_id)
        .ok_or_else(|| eyre::eyre!("task owner missing from scenario world"))?;
    let stored = run_async(world.tasks.get_task(owner, task_id))
        .map_err(|err| eyre::eyre!("task lookup failed: {err}"))?;

    if stored.lane_id() != Some(expected_lane) || stored.position().value() != position {
        return Err(eyre::eyre!(
            "expected task in {lane} at {position}, found lane {:?} at {}",
            stored.lane_id(),
            stored.position()
        ));
    }
    Ok(())
}

#[then(r#"the last operation fails with "{kind}""#)]
fn last_operation_fails(world: &TaskBoardWorld, kind: String) -> Result<(), eyre::Report> {
    let failure = world
        .last_failure
        .ok_or_else(|| eyre::eyre!("expected a failure, but the operation succeeded"))?;
    if failure.as_str() != kind {
        return Err(eyre::eyre!("expected {kind} failure, got {failure}"));
    }
    Ok(())
}

#[then(r#""{email}" can no longer read the task"#)]
fn task_is_gone(world: &TaskBoardWorld, email: String) -> Result<(), eyre::Report> {
    let owner = world.principal(&email)?;
    let task_id = world.task()?.id();
    match run_async(world.tasks.get_task(&owner, task_id)) {
        Ok(_) => Err(eyre::eyre!("task {task_id} still readable")),
        Err(err) if err.kind() == taskmaster::fault::FaultKind::NotFound => Ok(()),
        Err(err) => Err(eyre::eyre!("unexpected failure: {err}")),
    }
}
