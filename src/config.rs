use clap::Parser;
use tracing::Level;

pub const DEFAULT_PORT: u16 = 6379;
pub const DEFAULT_MAX_FRAME_SIZE: usize = 512 * 1024 * 1024;

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
    /// The address to bind to
    #[arg(long, env = "KACHE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// The port to listen on
    #[arg(short, long, env = "KACHE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Largest request frame, in bytes, a client may send
    #[arg(long, env = "KACHE_MAX_FRAME_SIZE", default_value_t = DEFAULT_MAX_FRAME_SIZE)]
    pub max_frame_size: usize,

    /// Maximum log level: error, warn, info, debug or trace
    #[arg(long, env = "KACHE_LOG_LEVEL", default_value_t = Level::INFO)]
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            log_level: Level::INFO,
        }
    }
}
