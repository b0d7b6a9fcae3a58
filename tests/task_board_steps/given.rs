//! Given steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskmaster::identity::services::RegisterOwnerRequest;
use taskmaster::workspace::{
    domain::Position,
    services::{CreateBoardRequest, CreateTaskRequest},
};

const PASSWORD: &str = "s3cret!";

#[given(r#"a registered owner "{email}""#)]
fn registered_owner(world: &mut TaskBoardWorld, email: String) -> Result<(), eyre::Report> {
    run_async(
        world
            .accounts
            .register(RegisterOwnerRequest::new(email.as_str(), PASSWORD, "Scenario Owner")),
    )
    .wrap_err("register scenario owner")?;
    let token = run_async(world.accounts.login(&email, PASSWORD)).wrap_err("log in")?;
    let principal =
        run_async(world.accounts.authenticate(token.as_str())).wrap_err("resolve token")?;
    world.principals.insert(email, principal);
    Ok(())
}

#[given(r#""{email}" has a board titled "{title}""#)]
fn owner_has_board(
    world: &mut TaskBoardWorld,
    email: String,
    title: String,
) -> Result<(), eyre::Report> {
    let owner = world.principal(&email)?;
    let view = run_async(
        world
            .boards
            .create_board(&owner, CreateBoardRequest::new(title)),
    )
    .wrap_err("create scenario board")?;
    world.board = Some(view);
    Ok(())
}

#[given(r#""{email}" has a task "{title}" in lane "{lane}" at position {position:u32}"#)]
fn owner_has_task(
    world: &mut TaskBoardWorld,
    email: String,
    title: String,
    lane: String,
    position: u32,
) -> Result<(), eyre::Report> {
    let owner = world.principal(&email)?;
    let lane_id = world.lane(&lane)?;
    let position = Position::new(position)?;
    let task = run_async(world.tasks.create_task(
        &owner,
        CreateTaskRequest::new(title, lane_id).with_position(position),
    ))
    .wrap_err("create scenario task")?;
    world.task = Some(task);
    Ok(())
}
