//! Persistence for dealt sharings.
//!
//! A [`SharingRecord`] is the stored form of a [`SecretSharing`]: the
//! shares plus the parameters they were dealt under, with the prime kept
//! as a decimal string so records stay readable and exact. Records are
//! stored behind a DAO trait with a Sled-backed implementation for disk
//! and a HashMap one for tests and throwaway runs.

use serde::{Deserialize, Serialize};
use sled::Db;
use std::collections::HashMap;
use std::error::Error;
use std::sync::Mutex;

use num_bigint::BigUint;
use tracing::debug;

use crate::error::SharingError;
use crate::sss::{SecretSharing, Share};

/// The stored form of a dealt sharing.
///
/// # Examples
///
/// Creating a record by hand:
///
/// ```rust
/// use num_bigint::BigUint;
/// use reshard::repository::SharingRecord;
/// use reshard::sss::Share;
///
/// let record = SharingRecord {
///     threshold: 2,
///     num_shares: 3,
///     prime: "7919".to_string(),
///     seed: Some(42),
///     shares: vec![
///         Share { index: 1, value: BigUint::from(17u32) },
///         Share { index: 2, value: BigUint::from(99u32) },
///         Share { index: 3, value: BigUint::from(4u32) },
///     ],
/// };
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SharingRecord {
    /// Shares needed to reconstruct.
    pub threshold: usize,
    /// Shares dealt.
    pub num_shares: usize,
    /// The field prime, in decimal.
    pub prime: String,
    /// The seed the dealing was drawn from, when one was fixed.
    pub seed: Option<u64>,
    /// The dealt shares.
    pub shares: Vec<Share>,
}

impl SharingRecord {
    /// Captures a dealt sharing into its stored form.
    pub fn from_sharing(sharing: &SecretSharing) -> Self {
        SharingRecord {
            threshold: sharing.threshold(),
            num_shares: sharing.num_shares(),
            prime: sharing.prime().to_str_radix(10),
            seed: sharing.seed(),
            shares: sharing.shares().to_vec(),
        }
    }

    /// Rebuilds the dealer context from a stored record.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` when the stored prime is not a decimal
    /// number, plus everything share collection itself rejects.
    pub fn into_sharing(self) -> Result<SecretSharing, SharingError> {
        let prime = BigUint::parse_bytes(self.prime.as_bytes(), 10).ok_or_else(|| {
            SharingError::InvalidParameters(format!("stored prime is not decimal: {}", self.prime))
        })?;
        SecretSharing::from_shares(self.shares, self.threshold, prime)
    }
}

/// Defines the Data Access Object (DAO) trait for [`SharingRecord`].
///
/// This trait specifies the methods for inserting, retrieving, updating,
/// and deleting records in a data store, keyed by the sharing label.
pub trait SharingDaoTrait: Send + Sync {
    /// Inserts a `SharingRecord` into the data store.
    ///
    /// # Arguments
    ///
    /// * `key` - The label the record is stored under.
    /// * `record` - The `SharingRecord` to be inserted.
    ///
    /// # Returns
    ///
    /// A `Result` indicating the success or failure of the operation.
    fn insert(&self, key: &str, record: &SharingRecord) -> Result<(), Box<dyn Error>>;

    /// Retrieves a `SharingRecord` from the data store by its key.
    ///
    /// # Arguments
    ///
    /// * `key` - The key of the record to retrieve.
    ///
    /// # Returns
    ///
    /// A `Result` containing an `Option<SharingRecord>`. `None` if the key
    /// does not exist.
    fn get(&self, key: &str) -> Result<Option<SharingRecord>, Box<dyn Error>>;

    fn get_all(&self) -> Result<Vec<(String, SharingRecord)>, Box<dyn Error>>;

    /// Updates an existing `SharingRecord` in the data store.
    ///
    /// # Arguments
    ///
    /// * `key` - The key of the record to update.
    /// * `record` - The new `SharingRecord` data.
    ///
    /// # Returns
    ///
    /// A `Result` indicating the success or failure of the operation.
    fn update(&self, key: &str, record: &SharingRecord) -> Result<(), Box<dyn Error>>;

    /// Deletes a `SharingRecord` from the data store by its key.
    ///
    /// # Arguments
    ///
    /// * `key` - The key of the record to delete.
    ///
    /// # Returns
    ///
    /// A `Result` indicating the success or failure of the operation.
    fn delete(&self, key: &str) -> Result<(), Box<dyn Error>>;
}

/// A `SharingDaoTrait` implementation using Sled, an embedded database.
///
/// Records are serialized to JSON strings, so a vault can be inspected
/// with nothing more than `strings` on the database files.
pub struct SledSharingDao {
    db: Db,
}

impl SledSharingDao {
    /// Opens (or creates) the Sled database at `db_path`.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use reshard::repository::SledSharingDao;
    ///
    /// let dao = SledSharingDao::new("path/to/db").unwrap();
    /// ```
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let db = sled::open(db_path)?;
        Ok(SledSharingDao { db })
    }
}

impl SharingDaoTrait for SledSharingDao {
    /// Inserts a new `SharingRecord` into the Sled database.
    ///
    /// The record is serialized to a JSON string and stored under the
    /// provided key; an existing record under the same key is replaced.
    fn insert(&self, key: &str, record: &SharingRecord) -> Result<(), Box<dyn Error>> {
        let serialized = serde_json::to_string(record)?;
        self.db.insert(key, serialized.as_bytes())?;
        Ok(())
    }

    /// Retrieves a `SharingRecord` from the Sled database by its key.
    ///
    /// If the key exists, the stored JSON string is deserialized back into
    /// a `SharingRecord`.
    fn get(&self, key: &str) -> Result<Option<SharingRecord>, Box<dyn Error>> {
        if let Some(found) = self.db.get(key)? {
            let record: SharingRecord = serde_json::from_slice(&found)?;
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }

    fn get_all(&self) -> Result<Vec<(String, SharingRecord)>, Box<dyn Error>> {
        let mut records = Vec::new();
        for entry in self.db.iter() {
            let (key, value) = entry?;
            let record: SharingRecord = serde_json::from_slice(&value)?;
            records.push((String::from_utf8(key.to_vec())?, record));
        }
        Ok(records)
    }

    /// Updates an existing `SharingRecord` in the Sled database.
    ///
    /// This method essentially re-inserts the record, replacing the old
    /// one.
    fn update(&self, key: &str, record: &SharingRecord) -> Result<(), Box<dyn Error>> {
        self.insert(key, record)
    }

    /// Deletes a `SharingRecord` from the Sled database by its key.
    fn delete(&self, key: &str) -> Result<(), Box<dyn Error>> {
        self.db.remove(key)?;
        Ok(())
    }
}

/// An in-memory `SharingDaoTrait` implementation over a HashMap.
pub struct HashMapSharingDao {
    pub map: Mutex<HashMap<String, SharingRecord>>,
}

impl SharingDaoTrait for HashMapSharingDao {
    /// Inserts a new `SharingRecord` into the HashMap.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use std::sync::Mutex;
    ///
    /// use reshard::repository::{HashMapSharingDao, SharingDaoTrait, SharingRecord};
    ///
    /// let dao = HashMapSharingDao { map: Mutex::new(HashMap::new()) };
    /// let record = SharingRecord {
    ///     threshold: 1,
    ///     num_shares: 1,
    ///     prime: "7919".to_string(),
    ///     seed: None,
    ///     shares: vec![],
    /// };
    /// dao.insert("some_key", &record).unwrap();
    /// ```
    fn insert(&self, key: &str, record: &SharingRecord) -> Result<(), Box<dyn Error>> {
        let mut map = self.map.lock().unwrap();
        map.insert(key.to_string(), record.clone());
        Ok(())
    }

    /// Retrieves a `SharingRecord` from the HashMap by its key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use std::sync::Mutex;
    ///
    /// use reshard::repository::{HashMapSharingDao, SharingDaoTrait};
    ///
    /// let dao = HashMapSharingDao { map: Mutex::new(HashMap::new()) };
    /// let record = dao.get("some_key").unwrap();
    /// assert!(record.is_none());
    /// ```
    fn get(&self, key: &str) -> Result<Option<SharingRecord>, Box<dyn Error>> {
        let map = self.map.lock().unwrap();
        Ok(map.get(key).cloned())
    }

    fn get_all(&self) -> Result<Vec<(String, SharingRecord)>, Box<dyn Error>> {
        let map = self.map.lock().unwrap();
        let mut records = Vec::new();
        for (key, value) in map.iter() {
            records.push((key.clone(), value.clone()));
        }
        Ok(records)
    }

    /// Updates an existing `SharingRecord` in the HashMap.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not exist in the HashMap.
    fn update(&self, key: &str, record: &SharingRecord) -> Result<(), Box<dyn Error>> {
        let mut map = self.map.lock().unwrap();
        if map.contains_key(key) {
            map.insert(key.to_string(), record.clone());
            Ok(())
        } else {
            Err("Key not found".into())
        }
    }

    /// Deletes a `SharingRecord` from the HashMap by its key.
    fn delete(&self, key: &str) -> Result<(), Box<dyn Error>> {
        let mut map = self.map.lock().unwrap();
        map.remove(key);
        Ok(())
    }
}

/// Creates and returns a DAO instance based on the specified database path.
///
/// If a path is provided, a Sled database DAO is created; otherwise, an
/// in-memory HashMap DAO is used. This allows flexibility in choosing the
/// underlying storage mechanism.
///
/// # Arguments
/// * `db_path` - An optional string representing the path to the database.
///
/// # Returns
/// Returns a `Result<Box<dyn SharingDaoTrait>>`, or an error if the
/// database cannot be initialized.
pub fn dao(db_path: Option<String>) -> Result<Box<dyn SharingDaoTrait>, Box<dyn Error>> {
    // check if the db_path is set, if so use sled, otherwise use HashMap
    let dao: Box<dyn SharingDaoTrait> = if let Some(db_path) = db_path {
        debug!("Using Sled DB");
        Box::new(SledSharingDao::new(&db_path)?)
    } else {
        debug!("Using HashMap DB");
        Box::new(HashMapSharingDao {
            map: Mutex::new(HashMap::new()),
        })
    };
    Ok(dao)
}
