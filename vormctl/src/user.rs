use std::borrow::Cow;

use anyhow::Result;
use tabled::{Table, Tabled};
use vorm::{Entity, Id, Pool, Vorm};

use crate::cli::{Commands, UserCommands};
use crate::config::Config;

#[derive(Clone, Debug, Default, PartialEq, Entity, derive_more::Display)]
#[entity(table = "users")]
#[display("User(id={id}, username={username}, email={email})")]
pub struct User {
    #[field(id)]
    pub id: Id,
    pub username: String,
    pub email: String,
}

impl User {
    pub fn new<T: Into<String>, U: Into<String>>(id: i64, username: T, email: U) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: email.into(),
        }
    }
}

#[derive(derive_more::From)]
pub struct UserToDisplay(User);

impl Tabled for UserToDisplay {
    const LENGTH: usize = 3;

    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            self.0.id.to_string().into(),
            self.0.username.as_str().into(),
            self.0.email.as_str().into(),
        ]
    }

    fn headers() -> Vec<Cow<'static, str>> {
        vec!["id".into(), "username".into(), "email".into()]
    }
}

struct CommandContext<'a> {
    vorm: &'a Vorm<Pool>,
}

pub fn run(config: &Config) -> Result<()> {
    let Some(Commands::User { command }) = config.command() else {
        anyhow::bail!("wrong command passed: {:?}", config.command());
    };

    let vorm = &config.vorm()?;
    let cmd = CommandContext { vorm };

    match command {
        UserCommands::List {} => cmd.list(),
        UserCommands::Show { id } => cmd.show(*id),
        UserCommands::Save {
            id,
            username,
            email,
        } => cmd.save(User {
            id: *id,
            username: username.clone(),
            email: email.clone(),
        }),
        UserCommands::Delete { id } => cmd.delete(*id),
    }
}

impl CommandContext<'_> {
    fn list(&self) -> Result<()> {
        let users = self
            .vorm
            .find_all::<User>()?
            .into_iter()
            .map(UserToDisplay::from)
            .collect::<Vec<_>>();

        println!("{}", Table::new(users));

        Ok(())
    }

    fn show(&self, id: Id) -> Result<()> {
        let Some(user) = self.vorm.find_by_id::<User>(id)? else {
            anyhow::bail!("User not found: {id}");
        };

        println!("{} | {} | {}", user.id, user.username, user.email);

        Ok(())
    }

    fn save(&self, user: User) -> Result<()> {
        let saved = self.vorm.save(&user)?;

        println!("{user} {saved}");

        Ok(())
    }

    fn delete(&self, id: Id) -> Result<()> {
        if self.vorm.delete_by_id::<User>(id)? {
            println!("User {id} deleted");
        } else {
            println!("No user with id {id}");
        }

        Ok(())
    }
}
