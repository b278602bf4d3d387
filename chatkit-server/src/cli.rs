use chatkit_types::RelayConfig;
use clap::builder::BoolishValueParser;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    name = "chatkit-server",
    about = "ChatKit relay - forwards chat messages to the OpenAI Responses API",
    version = env!("CARGO_PKG_VERSION"),
    author
)]
pub struct Cli {
    #[arg(short, long, env = "CHATKIT_CONFIG", help = "Path to a JSON config file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, env = "CHATKIT_BIND", help = "Interface to bind")]
    pub bind: Option<String>,

    #[arg(short, long, env = "CHATKIT_PORT")]
    pub port: Option<u16>,

    #[arg(short, long, env = "CHATKIT_MODEL", help = "Model sent with every provider call")]
    pub model: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL")]
    pub openai_base_url: Option<String>,

    #[arg(
        long,
        env = "CHATKIT_DISABLE_RETRIEVAL",
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Send attachments without file_search and redact retrieval ids"
    )]
    pub disable_retrieval: Option<bool>,

    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    #[arg(long, env = "CHATKIT_REQUEST_TIMEOUT", help = "Provider request timeout in seconds")]
    pub request_timeout: Option<u64>,

    #[arg(long, env = "CHATKIT_UPSTREAM_PROXY", help = "HTTP(S)/SOCKS5 proxy for provider calls")]
    pub upstream_proxy: Option<String>,

    #[arg(long, env = "CHATKIT_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Overlay flags and environment on top of file/default config.
    pub fn apply(&self, config: &mut RelayConfig) {
        if let Some(bind) = &self.bind {
            config.bind_address = bind.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(key) = &self.openai_api_key {
            config.openai_api_key = Some(key.clone());
        }
        if let Some(url) = &self.openai_base_url {
            config.openai_base_url = url.clone();
        }
        if let Some(disabled) = self.disable_retrieval {
            config.retrieval_disabled = disabled;
        }
        if let Some(url) = &self.database_url {
            config.database_url = Some(url.clone());
        }
        if let Some(timeout) = self.request_timeout {
            config.request_timeout = timeout;
        }
        if let Some(proxy) = &self.upstream_proxy {
            config.upstream_proxy = Some(proxy.clone());
        }

        let origins: Vec<String> = self
            .allowed_origins
            .iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        if !origins.is_empty() {
            config.allowed_origins = origins;
        }
    }
}
