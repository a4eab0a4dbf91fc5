use std::net::IpAddr;
use clap::{Parser, ValueEnum};
use rocket::figment::Figment;
use crate::cache::DEFAULT_REDIS_URL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Keep voters in process memory.
    Memory,
    /// Keep voters in an external Redis instance.
    Redis,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Voter and poll history API")]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "VOTER_API_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(short, long, env = "VOTER_API_PORT", default_value_t = 1080)]
    pub port: u16,

    /// Storage backend for voter records.
    #[arg(long, value_enum, env = "VOTER_API_STORE", default_value_t = StoreKind::Memory)]
    pub store: StoreKind,

    /// Redis connection URL, used with `--store redis`.
    #[arg(long, env = "REDIS_URL", default_value = DEFAULT_REDIS_URL)]
    pub redis_url: String,
}

impl Config {
    /// Rocket's default figment with the listen address applied on top.
    pub fn figment(&self) -> Figment {
        rocket::Config::figment()
            .merge(("address", self.host))
            .merge(("port", self.port))
    }
}
