//! Market Desk - Main Library
//!
//! Content engine for a finance-commentary site, following the layered
//! layout of the `marketdesk` workspace library.
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI, runners)
//! - **marketdesk**: Parsers, aggregation and rendering (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust
//! use market_desk::bin_common::{load_config_from_env, ConfigType};
//! use market_desk::marketdesk::application::SiteBuilder;
//! ```

// Re-export workspace libraries for convenience
pub use marketdesk;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables
    //!
    //! Shared by `market_snapshot` and `site_render`.

    pub mod cli;
    pub mod runner;

    pub use cli::{load_config_from_env, parse_args, ConfigType, OutputFormat};
    pub use runner::{BinaryRunner, RunConfig};
}
