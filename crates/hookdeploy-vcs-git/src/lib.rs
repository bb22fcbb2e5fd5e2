//! Git CLI implementation of the VCS interface.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod git;

pub use git::GitCliService;
