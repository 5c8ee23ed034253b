use clap::{crate_version, Parser};

use num_bigint::BigUint;
use rand::RngCore;
use std::error::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use reshard::config::ReshardConfig;
use reshard::elgamal::ElGamalChunkCipher;
use reshard::group::ModpGroup;
use reshard::prng::Prng;
use reshard::repository::{dao, SharingRecord};
use reshard::sss::{SecretSharing, SharingBuilder};

#[derive(Debug, Parser)]
#[command(name = "reshard")]
#[command(version = crate_version!())]
#[command(
    about = "RESHARD - REshareable SHARes Dealt over a prime field",
    long_about = "RESHARD splits secrets into threshold shares over a prime field, stores the dealt sharings in a local vault, and recombines any threshold of shares to rebuild the secret. A live sharing can be reshared to new parameters, either by reconstructing the secret and dealing it again, or by redistributing sub-shares so the secret never materializes. Individual shares can be exchanged under chunked ElGamal encryption: the share value is split into small chunks, each chunk is lifted into the exponent of a cyclic group, and decryption recovers the chunks with a baby-step giant-step search. The vault is a file-based database under the config directory by default, and can be pointed elsewhere with the --db-path flag. Dealings accept a seed to make the drawn polynomial reproducible; without one, shares are drawn from entropy"
)]
enum CliArgument {
    /// Split a secret into shares and store the dealt sharing in the vault.
    Split {
        /// Share threshold.
        #[clap(long, short)]
        threshold: usize,

        /// Number of shares to generate.
        #[clap(long, short)]
        shares: usize,

        /// Secret to split, as a decimal number below the field prime.
        #[clap(long)]
        secret: String,

        /// key to store the sharing under
        #[clap(long, short)]
        key: Option<String>,

        /// Seed for a reproducible dealing
        #[clap(long)]
        seed: Option<u64>,

        /// Verbose mode displays the shares
        #[clap(long, short)]
        verbose: bool,
    },
    /// Combine stored shares to rebuild a secret.
    Combine {
        /// key of the sharing to combine.
        #[clap(long, short)]
        key: String,

        /// Share threshold, if none is provided, uses the dealt threshold
        #[clap(long, short)]
        threshold: Option<usize>,

        /// Verbose mode displays the shares
        #[clap(long, short)]
        verbose: bool,
    },
    /// Reshare a stored sharing to new parameters without changing the secret.
    Reshare {
        /// key of the sharing to reshare.
        #[clap(long, short)]
        key: String,

        /// New share threshold.
        #[clap(long, short)]
        threshold: usize,

        /// New number of shares.
        #[clap(long, short)]
        shares: usize,

        /// Seed for a reproducible resharing
        #[clap(long)]
        seed: Option<u64>,

        /// Redistribute via sub-sharings instead of reconstructing the secret
        #[clap(long, short)]
        redistribute: bool,

        /// Verbose mode displays the new shares
        #[clap(long, short)]
        verbose: bool,
    },
    /// Exchange one share under chunked ElGamal encryption and verify the round trip.
    Exchange {
        /// key of the sharing the share belongs to.
        #[clap(long, short)]
        key: String,

        /// Index of the share to exchange, defaults to 1.
        #[clap(long, short)]
        index: Option<u32>,
    },
    /// List the sharings stored in the vault.
    Ls,
    /// Show the public part of the stored encryption key, creating it on first use.
    Keygen,
}

#[derive(Parser, Debug)]
#[clap(name = "reshard Threshold Sharing")]
struct Opt {
    /// Path to the config directory.
    #[clap(long, short)]
    config_path: Option<String>,

    /// use an embedded database at this path for the vault
    /// otherwise the vault lives under the config directory
    #[clap(long, short)]
    db_path: Option<String>,

    /// Subcommand to run.
    #[clap(subcommand)]
    argument: CliArgument,
}

fn main() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let opt = Opt::parse();

    let config_path = opt.config_path.unwrap_or_else(|| ".reshard".to_string());
    let config = ReshardConfig::new(&config_path)?;

    // the vault lives under the config directory unless a path was given
    let db_path = opt
        .db_path
        .or_else(|| Some(config.vault_path().to_string_lossy().into_owned()));
    let dao = dao(db_path)?;

    match opt.argument {
        // Splitting a secret.
        CliArgument::Split {
            threshold,
            shares,
            secret,
            key,
            seed,
            verbose,
        } => {
            // if key is None assign a random key
            let key = key.unwrap_or_else(|| {
                let mut rng = rand::thread_rng();
                let mut key = [0u8; 32];
                rng.fill_bytes(&mut key);
                hex::encode(key)
            });

            let secret = BigUint::parse_bytes(secret.as_bytes(), 10)
                .ok_or_else(|| format!("Secret must be a decimal number, got {secret}."))?;

            let mut builder = SharingBuilder::new(secret, threshold, shares, config.prime());
            if let Some(seed) = seed {
                debug!("Using seed: {}", seed);
                builder = builder.with_seed(seed);
            }
            let sharing = builder.build()?;

            dao.insert(&key, &SharingRecord::from_sharing(&sharing))?;

            // if the debug flag is set, print the shares
            if verbose {
                print_shares(&sharing);
            }

            println!("✂️  Secret has been split into a stored sharing.");
            println!("    key: {:#?}", key);
            println!("    threshold: {:#?}", threshold);
            println!("    shares: {:#?}", shares);
        }

        // Combining a stored sharing.
        CliArgument::Combine {
            key,
            threshold,
            verbose,
        } => {
            let record = dao
                .get(&key)?
                .ok_or_else(|| format!("Could not find sharing for key {key}."))?;

            let mut sharing = record.into_sharing()?;
            // an explicit threshold narrows how many shares are interpolated
            if let Some(threshold) = threshold {
                sharing = SecretSharing::from_shares(
                    sharing.shares().to_vec(),
                    threshold,
                    sharing.prime().clone(),
                )?;
            }
            let subset = sharing.select_threshold_shares()?;
            debug!("Combining {} shares for key {}", subset.num_shares(), key);

            // if the debug flag is set, print the shares
            if verbose {
                print_shares(&subset);
            }

            let secret = subset.reconstruct_secret()?;
            println!("🔑 secret: {:#?}", secret.to_str_radix(10));
        }

        // Resharing to new parameters.
        CliArgument::Reshare {
            key,
            threshold,
            shares,
            seed,
            redistribute,
            verbose,
        } => {
            let record = dao
                .get(&key)?
                .ok_or_else(|| format!("Could not find sharing for key {key}."))?;
            let sharing = record.into_sharing()?;

            let reshared = if redistribute {
                debug!("Redistributing via sub-sharings, the secret never materializes");
                sharing.redistribute_shares(threshold, shares, seed)?
            } else {
                sharing.reshare_shares(threshold, shares, seed)?
            };

            dao.update(&key, &SharingRecord::from_sharing(&reshared))?;

            // if the debug flag is set, print the new shares
            if verbose {
                print_shares(&reshared);
            }

            println!("🔄 Reshared sharing for key: {:?}", key);
            println!("    threshold: {:#?}", threshold);
            println!("    shares: {:#?}", shares);
        }

        // Exchanging one share under encryption.
        CliArgument::Exchange { key, index } => {
            let record = dao
                .get(&key)?
                .ok_or_else(|| format!("Could not find sharing for key {key}."))?;
            let sharing = record.into_sharing()?;

            let index = index.unwrap_or(1);
            let share = sharing
                .shares()
                .iter()
                .find(|share| share.index == index)
                .ok_or_else(|| format!("No share with index {index} under key {key}."))?;

            let group = ModpGroup::demo();
            let keypair = config.keypair(&group);
            let cipher = ElGamalChunkCipher::new(group, &config.chunk_bound(), sharing.prime())?;

            let mut prng = Prng::new(None);
            let r = cipher.random_ephemeral(&mut prng);
            let ciphertext = cipher.encrypt_share(&keypair.public, &share.value, &r)?;
            debug!(
                "Encrypted share {} into {} chunks",
                index,
                ciphertext.masked.len()
            );

            let recovered = cipher.decrypt_share(&keypair.secret, &ciphertext)?;
            if recovered != share.value {
                return Err(
                    format!("Share {index} did not survive the encryption round trip.").into(),
                );
            }

            println!("💡 Exchanged share {} for key: {:?}", index, key);
            println!("    chunks: {:#?}", ciphertext.masked.len());
            println!("    round trip: verified");
        }

        CliArgument::Ls => {
            let records = dao.get_all()?;
            if records.is_empty() {
                return Err("No sharings stored yet.".into());
            }

            println!("✂️  Stored sharings: ");
            for (key, record) in records {
                let prime_bits = BigUint::parse_bytes(record.prime.as_bytes(), 10)
                    .map(|prime| prime.bits())
                    .unwrap_or(0);
                println!(
                    "  {}: {}-of-{} over a {}-bit prime, seed {:?}",
                    key, record.threshold, record.num_shares, prime_bits, record.seed
                );
            }
        }

        CliArgument::Keygen => {
            let group = ModpGroup::demo();
            let keypair = config.keypair(&group);
            println!(
                "🔑 public key: {:#?}",
                hex::encode(keypair.public.to_bytes_be())
            );
        }
    }

    Ok(())
}

fn print_shares(sharing: &SecretSharing) {
    println!("🐛 shares: ");
    for share in sharing.shares() {
        println!("  {}: {}", share.index, share.value);
    }
}
