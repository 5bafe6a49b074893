// ABOUTME: Thesis records for the archive
// ABOUTME: Listing queries, year aggregation, submission workflow, and ownership checks

pub mod access;
pub mod error;
pub mod query;
pub mod service;
pub mod storage;
pub mod types;
pub mod workflow;

pub use error::ThesisError;
pub use service::ThesisService;
pub use storage::ThesisStorage;
pub use types::{
    parse_people, Actor, ListThesesQuery, NewThesis, Person, Thesis, ThesisFilter, ThesisForm,
    ThesisUpdate, YearsQuery,
};
pub use workflow::{Decision, Transition};
