//! When steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use rstest_bdd_macros::when;
use taskmaster::fault::Fault;
use taskmaster::workspace::{domain::Position, services::CreateBoardRequest};

#[when(r#""{email}" creates a board titled "{title}""#)]
fn owner_creates_board(
    world: &mut TaskBoardWorld,
    email: String,
    title: String,
) -> Result<(), eyre::Report> {
    let owner = world.principal(&email)?;
    match run_async(
        world
            .boards
            .create_board(&owner, CreateBoardRequest::new(title)),
    ) {
        Ok(view) => world.board = Some(view),
        Err(err) => world.last_failure = Some(err.kind()),
    }
    Ok(())
}

#[when(r#""{email}" moves the task to lane "{lane}" at position {position:u32}"#)]
fn owner_moves_task(
    world: &mut TaskBoardWorld,
    email: String,
    lane: String,
    position: u32,
) -> Result<(), eyre::Report> {
    let owner = world.principal(&email)?;
    let lane_id = world.lane(&lane)?;
    let task_id = world.task()?.id();
    let position = Position::new(position)?;
    match run_async(world.tasks.move_task(&owner, task_id, lane_id, position)) {
        Ok(moved) => world.task = Some(moved),
        Err(err) => world.last_failure = Some(err.kind()),
    }
    Ok(())
}

#[when(r#""{email}" opens the board"#)]
fn owner_opens_board(world: &mut TaskBoardWorld, email: String) -> Result<(), eyre::Report> {
    let owner = world.principal(&email)?;
    let board_id = world.board()?.board.id();
    if let Err(err) = run_async(world.boards.get_board(&owner, board_id)) {
        world.last_failure = Some(err.kind());
    }
    Ok(())
}

#[when(r#""{email}" deletes the board"#)]
fn owner_deletes_board(world: &mut TaskBoardWorld, email: String) -> Result<(), eyre::Report> {
    let owner = world.principal(&email)?;
    let board_id = world.board()?.board.id();
    if let Err(err) = run_async(world.boards.delete_board(&owner, board_id)) {
        world.last_failure = Some(err.kind());
    }
    Ok(())
}
