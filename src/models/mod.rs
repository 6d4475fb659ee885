//! Template input models
//!
//! - `application.rs` - the application record rendered into resources
//! - `kustomization.rs` - the accumulator behind every `kustomization.yaml`

pub mod application;
pub mod kustomization;

pub use application::{Application, ResourceQuantities};
pub use kustomization::{KUSTOMIZATION_FILE, Kustomization};
