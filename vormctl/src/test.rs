#![allow(unused_imports)]

use anyhow::Result;
use assert_fs::TempDir;
use vorm::{Database, Vorm};

use crate::config::USERS_TABLE;
use crate::user::User;

pub mod prelude {
    pub use crate::test::{self, with_dirs};
    pub use anyhow::Result;
    pub use assert_fs::fixture::{FileWriteStr, PathChild};
    pub use pretty_assertions::assert_eq;
}

pub fn vorm() -> Result<Vorm<Database>> {
    let database = Database::memory()?;
    database.execute_batch(USERS_TABLE)?;

    let mut vorm = Vorm::new(database);
    vorm.register::<User>()?;
    Ok(vorm)
}

/// Run `f` with $VORM_CONFIG and $VORM_DATA pointing to fresh directories
pub fn with_dirs<F>(f: F) -> Result<()>
where
    F: FnOnce(&TempDir, &TempDir) -> Result<()>,
{
    let confd = TempDir::new()?;
    let datad = TempDir::new()?;

    temp_env::with_vars(
        [
            ("VORM_CONFIG", Some(confd.path())),
            ("VORM_DATA", Some(datad.path())),
        ],
        || f(&confd, &datad),
    )
}
