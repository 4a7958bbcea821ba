//! Reading and writing documents on disk or on stdio.

use std::fmt;
use std::io::{Read as _, Write as _};
use std::path::PathBuf;
use std::str::FromStr;

use crate::SpeedclipResult;

/// A file path, or `-` for stdin/stdout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DocumentPath {
    #[default]
    Stdio,
    File(PathBuf),
}

impl DocumentPath {
    pub fn new(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdio
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    pub fn read(&self) -> SpeedclipResult<Vec<u8>> {
        match self {
            Self::Stdio => {
                let mut bytes = Vec::new();
                std::io::stdin().lock().read_to_end(&mut bytes)?;
                Ok(bytes)
            }
            Self::File(path) => Ok(std::fs::read(path)?),
        }
    }

    pub fn write(&self, bytes: &[u8]) -> SpeedclipResult<()> {
        match self {
            Self::Stdio => {
                let mut out = std::io::stdout().lock();
                out.write_all(bytes)?;
                out.flush()?;
            }
            Self::File(path) => {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, bytes)?;
            }
        }
        Ok(())
    }
}

impl FromStr for DocumentPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdio => f.write_str("-"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}
