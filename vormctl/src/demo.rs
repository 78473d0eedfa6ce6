use anyhow::{Context, Result};
use vorm::{Executor, Vorm};

use crate::config::{Config, USERS_TABLE};
use crate::user::User;

pub fn run(config: &Config) -> Result<()> {
    let vorm = config.vorm()?;

    println!("Setting up database schema...");
    vorm.executor()
        .execute_batch(&format!("DROP TABLE IF EXISTS users;{USERS_TABLE}"))?;

    walkthrough(&vorm)
}

/// Insert, list, update, then delete users, printing each step
pub fn walkthrough<E: Executor>(vorm: &Vorm<E>) -> Result<()> {
    println!("\n--- 1. Saving new users (INSERT) ---");
    for user in [
        User::new(1, "john.doe", "john.doe@example.com"),
        User::new(2, "jane.doe", "jane.doe@example.com"),
    ] {
        let saved = vorm.save(&user)?;
        println!("{user} {saved}");
    }

    println!("\n--- 2. Finding all users (findAll) ---");
    for user in vorm.find_all::<User>()? {
        println!("{user}");
    }

    println!("\n--- 3. Updating a user (UPDATE) ---");
    let mut user = vorm
        .find_by_id::<User>(2)?
        .context("User 2 disappeared")?;
    println!("Original user: {user}");
    user.email = "jane.d.updated@example.com".to_string();
    let saved = vorm.save(&user)?;
    println!("{user} {saved}");

    let user = vorm
        .find_by_id::<User>(2)?
        .context("User 2 disappeared")?;
    println!("Updated user: {user}");

    println!("\n--- 4. Deleting a user (deleteById) ---");
    if vorm.delete_by_id::<User>(1)? {
        println!("Deleted user with id 1");
    }

    println!("\n--- Verifying deletion ---");
    println!("Remaining users in DB:");
    for user in vorm.find_all::<User>()? {
        println!("{user}");
    }

    Ok(())
}
