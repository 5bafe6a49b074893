// ABOUTME: Academic programs offered by each department
// ABOUTME: Types and storage for the program catalogue

pub mod storage;
pub mod types;

pub use storage::ProgramStorage;
pub use types::{ListProgramsQuery, Program, ProgramCreateInput, ProgramUpdateInput};
