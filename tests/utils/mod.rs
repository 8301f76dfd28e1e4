pub mod actions;
pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use actions::ShotScript;
#[allow(unused_imports)]
pub use mocks::{CountingGameRepository, GatedGameRepository, UnavailableGameRepository};
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder, TEST_GAME_ID};
