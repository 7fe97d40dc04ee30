//! Unit tests for the command dispatch module.
