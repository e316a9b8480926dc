pub mod client;
pub mod factory;
pub mod interface;

pub use factory::TranslatorFactory;
pub use interface::TranslatorInterface;
