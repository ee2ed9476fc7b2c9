//! Code-generation core: walks a block graph and produces source text in a
//! target dialect.
//!
//! One generation run is one synchronous call stack over one fresh
//! [`EmissionContext`]: the walker drives the registered emitters, emitters
//! mutate the context's keyed side tables while returning inline code, and
//! the finalizer drains the context once into the finished unit. Errors are
//! fatal to the run and never produce partial output.

pub mod context;
pub mod emission;
pub mod emitters;
pub mod errors;
pub mod finalizer;
pub mod generator;
pub mod names;
pub mod registry;

pub use context::EmissionContext;
pub use emission::{Emission, Precedence};
pub use errors::GenerationError;
pub use generator::CodeGenerator;
pub use names::{NameRealm, NameTable};
pub use registry::{EmitterFn, EmitterRegistry};

use tessera_config::Dialect;
use tessera_graph::Program;

/// Runs one complete generation: walk the program, then finalize. A fresh
/// context is allocated for the run and consumed by the finalizer.
pub fn generate(
  program: &Program,
  registry: &EmitterRegistry,
  dialect: &Dialect,
) -> Result<String, GenerationError> {
  let mut generator = CodeGenerator::new(registry, dialect);
  let body = generator.generate(program)?;
  Ok(generator.finish(&body))
}
