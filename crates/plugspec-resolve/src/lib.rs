//! Build-target compatibility resolution for plugspec.
//!
//! Turns a [`PlatformDeclaration`] plus optional [`Overrides`] into a
//! [`ResolvedBuildSpec`]: the toolchain to build with, the test frameworks
//! to bind, and the since/until window of host builds the plugin claims to
//! support.
//!
//! Resolution is a pure function of its inputs and the catalog passed in.
//! It either returns a complete spec or a typed [`ResolutionError`]; there
//! are no partial results.
//!
//! ```
//! use plugspec_catalog::PlatformCatalog;
//! use plugspec_resolve::{resolve, Overrides, PlatformDeclaration, UntilBuild};
//!
//! let catalog = PlatformCatalog::builtin();
//! let declaration = PlatformDeclaration::new("IU", "241.15989");
//! let spec = resolve(&catalog, &declaration, &Overrides::default()).unwrap();
//! assert_eq!(spec.range().since, 241);
//! assert_eq!(spec.range().until, UntilBuild::Open);
//! ```

pub mod declaration;
pub mod descriptor;
pub mod error;
pub mod overrides;
pub mod range;
pub mod resolver;
pub mod spec;

pub use declaration::PlatformDeclaration;
pub use descriptor::render_idea_version;
pub use error::{InvalidVersion, OverrideConflict, ResolutionError, Result};
pub use overrides::{FrameworkOverride, Overrides, ToolchainOverride};
pub use range::{CompatibilityRange, UntilBuild};
pub use resolver::{resolve, CompatibilityResolver};
pub use spec::ResolvedBuildSpec;
