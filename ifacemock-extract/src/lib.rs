//! ifacemock Extraction Core
//!
//! Turns a named Go interface into a [`ContractDescription`]: its flattened,
//! ordered method set with every parameter and result type rendered the way
//! the declaring file refers to it, plus the imports those renderings need.
//!
//! ```no_run
//! let contract = ifacemock_extract::extract("./store", "Store")?;
//! for method in &contract.methods {
//!     println!("{}({}) {}", method.name, method.params_string(), method.results_string());
//! }
//! # Ok::<(), ifacemock_extract::ExtractError>(())
//! ```

pub mod error;
pub mod imports;
pub mod model;
pub mod ordering;
pub mod qualifier;
pub mod resolver;
pub mod validate;

pub use error::{ExtractError, ExtractResult};
pub use imports::import_table;
pub use model::{
    ContractDescription, Import, MethodDescription, ParamDescription, ResultDescription,
    SynthesizedImport, TypeParamDescription,
};
pub use qualifier::{Qualifier, UsedImports};
pub use resolver::resolve;

use ifacemock_typechecker::{Loader, LoaderConfig};
use std::path::Path;

/// Loads a directory and resolves contracts in it
#[derive(Debug, Default)]
pub struct Extractor {
    loader: Loader,
}

impl Extractor {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            loader: Loader::new(config),
        }
    }

    /// Describe the interface `name` declared by a package in `dir`
    pub fn extract(&self, dir: &Path, name: &str) -> ExtractResult<ContractDescription> {
        let _span = tracing::info_span!("extract", dir = %dir.display(), name).entered();
        let loaded = self.loader.load_dir(dir)?;
        resolve(&loaded.env, &loaded.packages, name)
    }
}

/// Describe the interface `name` declared in `dir` with the default loader configuration
pub fn extract(dir: impl AsRef<Path>, name: &str) -> ExtractResult<ContractDescription> {
    Extractor::default().extract(dir.as_ref(), name)
}

#[cfg(test)]
mod tests;
