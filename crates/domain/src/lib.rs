//! # fleetdash-domain
//!
//! Pure domain model for the fleetdash server console.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **Session** (credential + cached user profile)
//! - Define **Server records** (summary and extended detail) and **dashboard metrics**
//! - Define the logical **Routes** the console can request and the **Payloads** they answer with
//! - Define **login credentials** and the form-level validation applied before any request
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod credentials;
pub mod metrics;
pub mod payload;
pub mod route;
pub mod server;
pub mod session;
