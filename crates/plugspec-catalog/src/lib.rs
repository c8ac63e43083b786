//! Host platform catalog for plugspec.
//!
//! The catalog maps a platform type code (e.g. `IU`, `IC`) to the facts a
//! build target needs before it can be resolved:
//! - **Version rule:** the oldest branch the platform still accepts
//! - **Toolchain:** the default language version and vendor distribution
//! - **Test frameworks:** the default selection and the mandatory subset
//!
//! A catalog is built once at start-up and only ever read afterwards.

pub mod catalog;
pub mod error;
pub mod framework;
pub mod parse;
pub mod platform;
pub mod toolchain;
pub mod version;

pub use catalog::PlatformCatalog;
pub use error::{CatalogError, Result};
pub use framework::{TestFramework, TestFrameworkBinding};
pub use platform::{PlatformInfo, PlatformType};
pub use toolchain::{ToolchainRequirement, Vendor};
pub use version::{BuildVersion, VersionError};
