pub mod classify;
pub mod rules;
