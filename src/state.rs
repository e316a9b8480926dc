use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::contract::ServiceContract;
use crate::dispatcher::MessageDispatcher;
use crate::endpoint::TranslatorEndpoint;
use crate::translate::{TranslatorFactory, TranslatorInterface};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub dispatcher: Arc<MessageDispatcher>,
    pub contract: Arc<ServiceContract>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let translator = TranslatorFactory::create_translator(&config.translator_config)?;
        Self::with_translator(config, translator)
    }

    /// Wire the dispatcher and contract around an existing translator.
    pub fn with_translator(config: Config, translator: Arc<dyn TranslatorInterface>) -> Result<Self> {
        let contract = ServiceContract::load(&config.contract_config)?;
        let endpoint = TranslatorEndpoint::new(translator, &config.contract_config.target_namespace);
        let dispatcher = MessageDispatcher::new().register(endpoint.payload_root(), Arc::new(endpoint));

        Ok(Self {
            config,
            dispatcher: Arc::new(dispatcher),
            contract: Arc::new(contract),
        })
    }
}
