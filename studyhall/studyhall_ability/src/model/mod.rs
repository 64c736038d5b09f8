//! Permission rule model.
//!
//! This module defines the rule and subject types the evaluator works with.

mod rule;
mod subject;

pub use rule::{Action, Condition, Rule};
pub use subject::{Subject, SubjectKind};
