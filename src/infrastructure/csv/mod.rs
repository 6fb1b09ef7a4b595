// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV decoding, parsing, and column type inference

mod csv_parser;
mod type_inference;

pub use csv_parser::CsvParser;
pub use type_inference::TypeInferrer;
