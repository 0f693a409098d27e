use std::{fmt::Display, panic::Location};

use thiserror::Error;

use crate::Library;

#[derive(Debug, Error)]
pub enum Error {
    /// A version-keyed table has no entry for the running value.
    #[error("unsupported {kind} {value} (table at {location})")]
    UnsupportedVersion {
        kind: &'static str,
        value: String,
        location: &'static Location<'static>,
    },
    #[error("{module} is not loaded")]
    LibraryNotLoaded {
        library: Library,
        module: &'static str,
    },
    #[error("failed to change the protection of {size} bytes at {address:#010x}")]
    Protect { address: usize, size: usize },
    #[error("a branch needs at least 5 bytes, but the patch region is {size} bytes")]
    BranchTooShort { size: usize },
    #[error("branch from {from:#x} to {to:#x} does not fit in a rel32 displacement")]
    BranchOutOfRange { from: usize, to: usize },
}

impl Error {
    #[track_caller]
    pub fn unsupported_version(value: impl Display) -> Self {
        Self::unsupported("game version", value)
    }

    #[track_caller]
    pub fn unsupported(kind: &'static str, value: impl Display) -> Self {
        Self::UnsupportedVersion {
            kind,
            value: value.to_string(),
            location: Location::caller(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
