#[macro_use]
mod common;
use common::prelude::*;

#[test]
fn empty() -> Result<()> {
    let env = Env::new()?;

    env.command()?
        .assert()
        .failure()
        .stderr(str::contains("No command provided"));

    Ok(())
}

#[test]
fn reset() -> Result<()> {
    let env = Env::new()?;
    // Do something to create the db
    cmd!(env, user list).success();
    assert!(env.data_dir.path().join("db.vorm").exists());

    cmd!(env, reset).failure().stderr(str::contains("Usage:"));

    raw_cmd!(env, reset --confirm)
        .write_stdin("no")
        .assert()
        .failure()
        .stdout(str::contains("you really want"))
        .stderr(str::contains("requires confirmation"));
    assert!(env.data_dir.path().join("db.vorm").exists());

    raw_cmd!(env, reset --confirm)
        .write_stdin("yes")
        .assert()
        .success()
        .stdout(str::contains("you really want"));
    assert!(!env.data_dir.path().join("db.vorm").exists());

    Ok(())
}

#[test]
fn verbose_logs_statements() -> Result<()> {
    let env = Env::new()?;

    env.command()?
        .args(["-vvv", "user", "list"])
        .assert()
        .success()
        .stderr(str::contains("SELECT * FROM users"));

    Ok(())
}
