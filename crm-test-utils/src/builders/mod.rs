//! Fixture builders

mod test_data;

pub use test_data::{TestDataBuilder, TestScenario, author, starter, student, submission};
