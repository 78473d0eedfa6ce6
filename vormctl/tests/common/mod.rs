use anyhow::Result;
use assert_cmd::Command;
use assert_fs::TempDir;

pub mod prelude {
    pub use super::Env;
    pub use anyhow::Result;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;
    pub use predicates::str;
}

pub struct Env {
    pub conf_dir: TempDir,
    pub data_dir: TempDir,
}

#[allow(unused_macros)]
macro_rules! cmd {
    ($env:ident, $($tail:tt)*) => {
        raw_cmd!($env, $($tail)*).assert()
    };
}

#[allow(unused_macros)]
macro_rules! raw_cmd {
    (@args $cmd:ident,) => {};
    (@args $cmd:ident, --$arg:tt $($tail:tt)*) => {
        $cmd.arg(concat!("--", stringify!($arg)));
        raw_cmd!(@args $cmd, $($tail)*);
    };
    (@args $cmd:ident, $arg:tt $($tail:tt)*) => {
        $cmd.arg(stringify!($arg));
        raw_cmd!(@args $cmd, $($tail)*);
    };
    ($env:ident, $($tail:tt)*) => {
        {
            let mut command = $env.command()?;
            raw_cmd!(@args command, $($tail)*);
            command
        }
    };
}

impl Env {
    pub fn new() -> Result<Self> {
        Ok(Self {
            conf_dir: TempDir::new()?,
            data_dir: TempDir::new()?,
        })
    }

    pub fn command(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("vormctl")?;
        cmd.arg("-C")
            .arg(self.conf_dir.path())
            .arg("-D")
            .arg(self.data_dir.path());
        Ok(cmd)
    }

    #[allow(dead_code)]
    pub fn save(&self, id: &str, username: &str, email: &str) -> Result<Command> {
        let mut cmd = self.command()?;
        cmd.args(["user", "save", id, username, email]);
        Ok(cmd)
    }
}
