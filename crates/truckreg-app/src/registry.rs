//! Registry service - account and truck registration use cases
//!
//! Owns both stores and the session. Record ownership always comes from the
//! signed-in user, never from caller input.

use tracing::info;

use truckreg_domain::repository::{AccountRepository, TruckRecordRepository};
use truckreg_store::{CredentialStore, RecordStore};
use truckreg_types::{ServiceError, TruckFields, TruckRecord};

use crate::session::Session;

/// Application service over the account and record stores
pub struct Registry<A = CredentialStore, R = RecordStore> {
    accounts: A,
    records: R,
    session: Session,
}

impl<A, R> Registry<A, R>
where
    A: AccountRepository,
    R: TruckRecordRepository,
{
    /// Create a registry with a signed-out session
    pub fn new(accounts: A, records: R) -> Self {
        Self {
            accounts,
            records,
            session: Session::default(),
        }
    }

    /// Resume a previously persisted session
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_user(&self) -> Option<&str> {
        self.session.current_user()
    }

    pub fn accounts(&self) -> &A {
        &self.accounts
    }

    pub fn records(&self) -> &R {
        &self.records
    }

    /// Create an account and sign in as it
    pub fn register(&mut self, username: &str, password: &str) -> Result<(), ServiceError> {
        self.accounts.register(username, password)?;
        self.session.sign_in(username);
        Ok(())
    }

    /// Sign in with existing credentials
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), ServiceError> {
        self.accounts.login(username, password)?;
        self.session.sign_in(username);
        info!(username, "Signed in");
        Ok(())
    }

    /// Clear the session; stored data is untouched
    pub fn logout(&mut self) -> Option<String> {
        let user = self.session.sign_out();
        if let Some(ref username) = user {
            info!(username = %username, "Signed out");
        }
        user
    }

    /// Register a truck under the signed-in user
    pub fn add_record(&mut self, fields: TruckFields) -> Result<(), ServiceError> {
        let owner = self.authenticated_owner()?;
        self.records.add_record(&owner, fields)?;
        Ok(())
    }

    /// Trucks registered by the signed-in user
    pub fn list_records(&self) -> Result<Vec<TruckRecord>, ServiceError> {
        let owner = self.authenticated_owner()?;
        Ok(self.records.list_records(&owner))
    }

    fn authenticated_owner(&self) -> Result<String, ServiceError> {
        let owner = self
            .session
            .current_user()
            .ok_or(ServiceError::NotAuthenticated)?;
        if !self.accounts.contains(owner) {
            return Err(ServiceError::UnknownOwner(owner.to_string()));
        }
        Ok(owner.to_string())
    }
}
