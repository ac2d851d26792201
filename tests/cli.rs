//! CLI integration tests.

mod support;

#[path = "cli/add.rs"]
mod add;
#[path = "cli/environment.rs"]
mod environment;
#[path = "cli/errors.rs"]
mod errors;
#[path = "cli/keygen.rs"]
mod keygen;
#[path = "cli/settings.rs"]
mod settings;
