use config::{Config, ConfigError};
use num_bigint::BigUint;
use num_traits::One;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::constants::{DEFAULT_CHUNK_BITS, DEFAULT_PRIME_DECIMAL, DEMO_GROUP_ORDER};
use crate::elgamal::Keypair;
use crate::group::ModpGroup;
use crate::prng::Prng;

/// On-disk configuration: the share field, the chunk width and the paths
/// derived from the config directory.
///
/// The directory is created on first use with a fresh ElGamal secret
/// scalar in `key` (hex) and the defaults in `conf.toml`; every value can
/// then be overridden in the file or through `RESHARD_*` environment
/// variables.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReshardConfig {
    config_path: PathBuf,
    /// The prime of the share field, in decimal.
    pub prime: String,
    /// Chunk width for share encryption; chunks lie below `2^chunk_bits`.
    pub chunk_bits: u32,
}

impl ReshardConfig {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let config_path = PathBuf::from(path);

        // create the config directory if it doesn't exist as a one-liner
        if !config_path.exists() {
            fs::create_dir_all(config_path.clone()).unwrap();
        }

        // only create a key if one doesn't exist
        if !config_path.join("key").exists() {
            let mut key_file = File::create(config_path.join("key")).unwrap();
            let scalar = Prng::new(None).nonzero_below(&DEMO_GROUP_ORDER);
            key_file
                .write_all(hex::encode(scalar.to_bytes_be()).as_bytes())
                .unwrap();
        }

        // if the conf.toml file doesn't exist, create it
        let config_path = config_path.canonicalize().unwrap();
        if !config_path.join("conf.toml").exists() {
            let reshard_config = ReshardConfig {
                config_path: config_path.clone(),
                prime: DEFAULT_PRIME_DECIMAL.to_string(),
                chunk_bits: DEFAULT_CHUNK_BITS,
            };
            let toml = toml::to_string_pretty(&reshard_config)
                .map_err(|err| ConfigError::Foreign(Box::new(err)))?;
            let config_source = config_path.to_str();
            let conf_file = config_source.unwrap().to_owned() + "/conf.toml";
            fs::write(conf_file, toml).unwrap();
        }

        debug!("📝 Loaded config at path: {:#?}", config_path);
        let config_source = config_path.to_str();
        let conf_file = config_source.unwrap().to_owned() + "/conf.toml";
        let settings = Config::builder()
            // Add in `./.reshard/conf.toml`
            .add_source(config::File::with_name(&conf_file))
            // Add in settings from the environment (with a prefix of RESHARD)
            // Eg.. `RESHARD_CHUNK_BITS=12 ./target/reshard` would set the `chunk_bits` key
            .add_source(config::Environment::with_prefix("RESHARD"))
            .build()
            .unwrap();

        let my_config: ReshardConfig = settings.try_into()?;
        Ok(my_config)
    }

    /// The stored ElGamal key pair, rebuilt over the given group.
    pub fn keypair(&self, group: &ModpGroup) -> Keypair<BigUint> {
        let mut key_file = File::open(self.config_path.join("key")).unwrap();
        let mut encoded = String::new();
        key_file.read_to_string(&mut encoded).unwrap();
        let out = hex::decode(encoded.trim()).unwrap();
        Keypair::from_secret(group, BigUint::from_bytes_be(&out)).unwrap()
    }

    /// The configured share field prime.
    pub fn prime(&self) -> BigUint {
        BigUint::parse_bytes(self.prime.as_bytes(), 10).unwrap()
    }

    /// The chunk bound `2^chunk_bits`.
    pub fn chunk_bound(&self) -> BigUint {
        BigUint::one() << self.chunk_bits
    }

    /// Where the sharing vault lives unless a database path is given.
    pub fn vault_path(&self) -> PathBuf {
        self.config_path.join("vault")
    }
}

impl TryFrom<Config> for ReshardConfig {
    type Error = ConfigError;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        Ok(ReshardConfig {
            config_path: config.get_string("config_path")?.into(),
            prime: config.get_string("prime")?,
            chunk_bits: config.get_int("chunk_bits")? as u32,
        })
    }
}
