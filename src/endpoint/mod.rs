pub mod payload;
pub mod translator_endpoint;

pub use payload::{TranslationRequest, TranslationResponse};
pub use translator_endpoint::TranslatorEndpoint;
