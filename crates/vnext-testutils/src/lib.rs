//! Shared git-repository fixtures for `vnext`'s integration tests.
//!
//! Each test gets its own throwaway repository under the system temp
//! directory, synthesized from scratch and torn down by the caller.

pub mod git_utils;

pub use git_utils::{
    create_file_and_commit, create_test_git_directory, find_last_commit, update_file_and_commit,
};
