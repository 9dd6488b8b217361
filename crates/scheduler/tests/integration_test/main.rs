/// Integration tests for the scheduler covering fixed scenarios, task-file
/// round trips and randomised fairness and liveness properties on every
/// timeline backend.

mod helpers;
mod properties;
mod scenarios;
mod taskfiles;
