//! # Construct Setup Library
//!
//! Bootstrap installer for the construct toolset. Given a release identifier,
//! an install root and a Python interpreter, it builds a self-contained,
//! versioned install and makes it the active one:
//!
//! ```text
//! <root>/
//!     current -> <root>/<name>
//!     construct.bat, cons.bat, construct.ps1, cons.ps1, construct.sh
//!     <name>/
//!         bin/      console scripts
//!         lib/      the distribution and its dependencies
//!         python/   isolated interpreter environment
//! ```
//!
//! ## Quick Example
//!
//! ```
//! use construct_setup::plan::{InstallLayout, InstallRequest, InterpreterVersion, PackageSource};
//! use construct_setup::platform::Platform;
//!
//! let request = InstallRequest::new(
//!     "0.1.40",
//!     None,
//!     "python3",
//!     "/opt/construct",
//!     None,
//!     PackageSource::remote("0.1.40"),
//!     true,
//! );
//! let layout = InstallLayout::plan(
//!     &request,
//!     Platform::Linux,
//!     InterpreterVersion { major: 3, minor: 11 },
//! );
//! assert_eq!(layout.install_path.to_str(), Some("/opt/construct/0.1.40"));
//! assert_eq!(layout.current_link.to_str(), Some("/opt/construct/current"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Planning (`plan`, `path`)**: Every path the install touches, derived
//!   purely from the request.
//! - **Steps (`phases`)**: Provisioning, package install, layout
//!   normalization and activation, run in order by
//!   `phases::orchestrator`.
//! - **Side effects (`command`, `deferred`, `prompt`)**: External processes,
//!   commands handed back to the calling shell, and operator confirmation,
//!   each behind a trait so the steps can be tested with fakes.
//! - **Host (`host`, `platform`)**: The detected platform and the variables
//!   the launching wrapper passes in.

pub mod command;
pub mod defaults;
pub mod deferred;
pub mod error;
pub mod host;
pub mod output;
pub mod path;
pub mod phases;
pub mod plan;
pub mod platform;
pub mod prompt;
pub mod shims;

#[cfg(test)]
mod path_proptest;
#[cfg(test)]
mod test_support;
