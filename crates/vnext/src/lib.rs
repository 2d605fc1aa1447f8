#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::invalid_codeblock_attributes
)]

//! # Version Resolution Engine
//!
//! Computes semantic or calendar versions for the projects of a monorepo by
//! inspecting git history, tags, branches, and file-level changes — without
//! requiring a version to be hand-edited or committed.
//!
//! ## Usage
//!
//! ```no_run
//! # fn main() -> Result<(), vnext::Error> {
//! use vnext::{ProjectIdentity, RequestBuilder};
//!
//! let project = ProjectIdentity::new("demo", ".");
//! let request = RequestBuilder::new(".", project)
//!     .set_tag_prefix("v")
//!     .build()?;
//!
//! let result = vnext::resolve(&request)?;
//! println!("{}", result.version_string);
//! # Ok(())
//! # }
//! ```

mod bump;
mod calver;
mod change_detector;
mod config;
mod conventional;
mod error;
mod git;
mod patterns;
mod policy;
mod project;
mod resolver;
mod result;
mod tags;
mod validator;
mod version;

pub use bump::BumpType;
pub use calver::{CalVerConfig, CalVerFormat};
pub use change_detector::ChangeDetectionConfig;
pub use config::{PrereleaseType, RequestBuilder, ResolutionRequest, Scheme};
pub use conventional::ConventionalCommitsConfig;
pub use error::Error;
pub use git::CreateTagOutcome;
pub use patterns::PatternConfig;
pub use policy::{Group, Policy, Strategy, VersionPolicyConfig};
pub use project::ProjectIdentity;
pub use resolver::{create_tag, resolve};
pub use result::{BranchKind, VersionResult};
pub use validator::{Constraints, CustomRule, CustomRuleKind, Severity, ValidationReport};
pub use version::Version;
