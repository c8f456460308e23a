//! Store adapters for the persistence layer

use truckreg_domain::service::PasswordPolicy;
use truckreg_store::{CredentialStore, RecordStore};
use truckreg_types::Result;

use crate::config::Config;
use crate::registry::Registry;
use crate::session::Session;

/// Open the accounts table configured in `config`
pub fn open_credential_store(config: &Config) -> Result<CredentialStore> {
    let path = config.users_path()?;
    let policy = PasswordPolicy::new(config.hash_scheme);
    CredentialStore::open(path, policy).map_err(Into::into)
}

/// Open the truck records table configured in `config`
pub fn open_record_store(config: &Config) -> Result<RecordStore> {
    let path = config.records_path()?;
    RecordStore::open(path).map_err(Into::into)
}

/// Open both stores and resume the persisted session
pub fn open_registry(config: &Config) -> Result<Registry> {
    let accounts = open_credential_store(config)?;
    let records = open_record_store(config)?;
    let session = Session::load(&config.session_path()?);
    Ok(Registry::new(accounts, records).with_session(session))
}

/// Persist the registry's session for the next command
pub fn save_session(config: &Config, registry: &Registry) -> Result<()> {
    registry.session().save(&config.session_path()?)
}
