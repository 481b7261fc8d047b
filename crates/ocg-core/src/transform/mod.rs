pub mod input_shape;
pub mod name_normalizer;
pub mod response_classifier;

pub use input_shape::{InputPart, InputPlan, SchemaPart, resolve_input_plan};
pub use response_classifier::{ResponsePlan, classify_responses};
