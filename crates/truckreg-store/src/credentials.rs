//! Account store backed by `users.csv`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use truckreg_domain::repository::AccountRepository;
use truckreg_domain::service::{first_missing, PasswordHasher, PasswordPolicy};
use truckreg_types::{LoginError, RegisterError, StoreError, UserAccount};

use crate::ordered::OrderedTable;
use crate::table::{read_table, write_table, LoadedTable, TableSchema};

/// On-disk layout of the accounts table
pub const ACCOUNTS_SCHEMA: TableSchema = TableSchema {
    header: &["Username", "Password"],
    key_column: "Username",
};

#[derive(Debug, Serialize, Deserialize)]
struct AccountRow {
    #[serde(rename = "Username")]
    username: String,
    #[serde(rename = "Password")]
    password: String,
}

impl From<AccountRow> for UserAccount {
    fn from(row: AccountRow) -> Self {
        Self {
            username: row.username,
            password_hash: row.password,
        }
    }
}

impl From<&UserAccount> for AccountRow {
    fn from(account: &UserAccount) -> Self {
        Self {
            username: account.username.clone(),
            password: account.password_hash.clone(),
        }
    }
}

/// Persistent registry of username -> password hash
pub struct CredentialStore {
    store_path: PathBuf,
    policy: PasswordPolicy,
    accounts: OrderedTable<UserAccount>,
    /// Rows skipped on load; the next rewrite drops them from the file
    skipped_rows: usize,
}

impl CredentialStore {
    /// Create or load the accounts table
    pub fn open(store_path: PathBuf, policy: PasswordPolicy) -> Result<Self, StoreError> {
        let (accounts, skipped_rows) = load_accounts(&store_path)?;
        Ok(Self {
            store_path,
            policy,
            accounts,
            skipped_rows,
        })
    }

    /// Re-read the table from disk, discarding the in-memory copy
    pub fn reload(&mut self) -> Result<(), StoreError> {
        (self.accounts, self.skipped_rows) = load_accounts(&self.store_path)?;
        Ok(())
    }

    /// Save store to disk
    fn save(&mut self) -> Result<(), StoreError> {
        let rows: Vec<AccountRow> = self.accounts.iter().map(AccountRow::from).collect();
        write_table(&self.store_path, &ACCOUNTS_SCHEMA, &rows)?;

        if self.skipped_rows > 0 {
            warn!(
                path = %self.store_path.display(),
                dropped = self.skipped_rows,
                "Rewrite dropped rows that could not be decoded"
            );
            self.skipped_rows = 0;
        }
        Ok(())
    }

    /// Create a new account
    ///
    /// A taken username is reported before blank fields are.
    pub fn register(&mut self, username: &str, password: &str) -> Result<(), RegisterError> {
        if self.accounts.contains_key(username) {
            return Err(RegisterError::DuplicateUsername(username.to_string()));
        }
        if let Some(field) = first_missing(&[("username", username), ("password", password)]) {
            return Err(RegisterError::MissingField(field));
        }

        let account = UserAccount {
            username: username.to_string(),
            password_hash: self.policy.hash(password)?,
        };

        let previous = self.accounts.upsert(username.to_string(), account);
        if let Err(e) = self.save() {
            self.accounts.revert(username, previous);
            return Err(e.into());
        }

        info!(username, scheme = %self.policy.scheme(), "Account registered");
        Ok(())
    }

    /// Verify a username/password pair
    pub fn login(&self, username: &str, password: &str) -> Result<(), LoginError> {
        match self.accounts.get(username) {
            Some(account) if self.policy.verify(password, &account.password_hash) => Ok(()),
            _ => Err(LoginError::InvalidCredentials),
        }
    }

    pub fn contains(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    pub fn get(&self, username: &str) -> Option<&UserAccount> {
        self.accounts.get(username)
    }

    /// Usernames in table order
    pub fn usernames(&self) -> Vec<&str> {
        self.accounts.iter().map(|a| a.username.as_str()).collect()
    }

    /// Get total account count
    pub fn count(&self) -> usize {
        self.accounts.len()
    }
}

fn load_accounts(path: &Path) -> Result<(OrderedTable<UserAccount>, usize), StoreError> {
    let (rows, skipped) = match read_table::<AccountRow>(path, &ACCOUNTS_SCHEMA)? {
        LoadedTable::Rows { rows, skipped } => (rows, skipped),
        LoadedTable::MissingKeyColumn | LoadedTable::Reset => (Vec::new(), 0),
    };
    let accounts: Vec<UserAccount> = rows.into_iter().map(UserAccount::from).collect();
    Ok((OrderedTable::from_rows(accounts, |a| a.username.clone()), skipped))
}

impl AccountRepository for CredentialStore {
    fn register(&mut self, username: &str, password: &str) -> Result<(), RegisterError> {
        CredentialStore::register(self, username, password)
    }

    fn login(&self, username: &str, password: &str) -> Result<(), LoginError> {
        CredentialStore::login(self, username, password)
    }

    fn contains(&self, username: &str) -> bool {
        CredentialStore::contains(self, username)
    }
}
