// Roast pipeline: intake → extract → generate.
// Each stage can short-circuit with an `AppError`, except generation, which always yields a string.

pub mod extractor;
pub mod generator;
pub mod handlers;
pub mod intake;
pub mod prompts;
