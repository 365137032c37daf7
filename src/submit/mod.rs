//! Submit collaborator: where validated form values are handed off

mod client;
mod traits;

pub use client::SimulatedSubmitClient;
pub use traits::{SubmitClientTrait, SubmitError};

#[cfg(test)]
pub use traits::MockSubmitClientTrait;
