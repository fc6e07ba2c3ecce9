// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Tests unwrap freely
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

//! Render-loop and adaptive field-of-view controller for 3D room scenes.
//!
//! Vantage takes a pre-built scene whose top-level members are found by
//! name (a camera, a light, a room model and a focal point), keeps the
//! camera's vertical field of view corrected for the viewport's aspect
//! ratio, and renders one frame per host frame callback. Helpers build
//! tweens that glide the camera, the light or the focal point onto other
//! named members.
//!
//! # Key entry points
//!
//! - [`viewport::ViewportController`] - binds the scene and runs the loop
//! - [`scene::Scene`] / [`scene::SceneBinder`] - members and name lookup
//! - [`camera::FovCorrection`] - the aspect-adaptive FOV formula
//! - [`animation::TweenGroup`] - tweens advanced by frame timestamp
//! - [`options::Options`] - TOML runtime configuration
//!
//! # Host integration
//!
//! The controller never reads ambient state. The host injects a
//! [`viewport::ViewportSource`] for the current size, a
//! [`viewport::FrameScheduler`] for frame callbacks, and a
//! [`render::Renderer`]; the `viewer` feature provides all three on top of
//! winit and wgpu.

pub mod animation;
pub mod camera;
pub mod error;
pub mod options;
pub mod render;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
pub mod viewport;

pub use error::VantageError;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
