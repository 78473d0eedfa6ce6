#[macro_use]
mod common;
use common::prelude::*;

#[test]
fn empty() -> Result<()> {
    let env = Env::new()?;

    cmd!(env, user).failure().stderr(str::contains("Usage:"));

    Ok(())
}

#[test]
fn save_inserts_then_updates() -> Result<()> {
    let env = Env::new()?;

    env.save("1", "john", "john@example.com")?
        .assert()
        .success()
        .stdout(str::contains("inserted"));

    env.save("1", "john", "john.d@example.com")?
        .assert()
        .success()
        .stdout(str::contains("updated"));

    cmd!(env, user show 1)
        .success()
        .stdout(str::contains("1 | john | john.d@example.com"));

    Ok(())
}

#[test]
fn save_invalid_id() -> Result<()> {
    let env = Env::new()?;

    env.save("one", "john", "john@example.com")?
        .assert()
        .failure()
        .stderr(str::contains("invalid value"));

    Ok(())
}

#[test]
fn show() -> Result<()> {
    let env = Env::new()?;

    cmd!(env, user show).failure().stderr(str::contains("  <ID>"));

    cmd!(env, user show 1)
        .failure()
        .stderr(str::contains("User not found: 1"));

    Ok(())
}

#[test]
fn list() -> Result<()> {
    let env = Env::new()?;

    cmd!(env, user list)
        .success()
        .stdout(str::contains("username"))
        .stdout(str::contains("john").not());

    env.save("1", "john", "john@example.com")?.assert().success();
    env.save("2", "jane", "jane@example.com")?.assert().success();

    cmd!(env, user list)
        .success()
        .stdout(str::contains("john@example.com"))
        .stdout(str::contains("jane@example.com"));

    Ok(())
}

#[test]
fn delete() -> Result<()> {
    let env = Env::new()?;

    env.save("1", "john", "john@example.com")?.assert().success();

    cmd!(env, user delete 1)
        .success()
        .stdout(str::contains("User 1 deleted"));

    cmd!(env, user delete 1)
        .success()
        .stdout(str::contains("No user with id 1"));

    cmd!(env, user show 1).failure();

    Ok(())
}
