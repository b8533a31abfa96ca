pub mod recurrence;
pub mod validate;
