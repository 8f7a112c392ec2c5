use std::collections::BTreeSet;

use tracing::debug;

use crate::{error::AppError, identity::Identity};

/// Config section every identity lives under (`identity.<id>.<field>`)
pub const NAMESPACE: &str = "identity";

const FIELD_NAME: &str = "name";
const FIELD_EMAIL: &str = "email";
const FIELD_SSH_KEY: &str = "sshkey";
const FIELD_TOKEN: &str = "token";

/// Scoped key-value configuration addressed by dotted `section.key` names
pub trait ConfigStore {
    /// Reads one value, `None` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    /// Writes one value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    /// Deletes a whole section with every key inside it
    fn remove_section(&self, section: &str) -> Result<(), AppError>;
    /// Lists the full names of all keys starting with `prefix`
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, AppError>;
}

/// Maps identity records onto a [`ConfigStore`]
#[derive(Debug)]
pub struct IdentityStore<S> {
    store: S,
}

impl<S: ConfigStore> IdentityStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn section(id: &str) -> String {
        format!("{NAMESPACE}.{id}")
    }

    fn key(id: &str, field: &str) -> String {
        format!("{NAMESPACE}.{id}.{field}")
    }

    /// Reads a single field of an identity
    pub fn lookup(&self, id: &str, field: &str) -> Result<String, AppError> {
        self.store
            .get(&Self::key(id, field))?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    fn optional(&self, id: &str, field: &str) -> Result<Option<String>, AppError> {
        Ok(self
            .store
            .get(&Self::key(id, field))?
            .filter(|value| !value.is_empty()))
    }

    /// An identity exists when its `name` field can be read
    pub fn exists(&self, id: &str) -> Result<bool, AppError> {
        match self.lookup(id, FIELD_NAME) {
            Ok(_) => Ok(true),
            Err(AppError::NotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Loads a full identity record
    pub fn load(&self, id: &str) -> Result<Identity, AppError> {
        let name = self.lookup(id, FIELD_NAME)?;
        if name.is_empty() {
            return Err(AppError::Undefined(id.to_string()));
        }

        Ok(Identity {
            id: id.to_string(),
            name,
            email: self.optional(id, FIELD_EMAIL)?.unwrap_or_default(),
            ssh_key: self.optional(id, FIELD_SSH_KEY)?,
            token: self.optional(id, FIELD_TOKEN)?,
        })
    }

    /// Reads the SSH key path of an identity, if one is stored
    pub fn ssh_key(&self, id: &str) -> Result<Option<String>, AppError> {
        self.optional(id, FIELD_SSH_KEY)
    }

    /// Reads the token of an identity, if one is stored
    pub fn token(&self, id: &str) -> Result<Option<String>, AppError> {
        self.optional(id, FIELD_TOKEN)
    }

    /// Writes name and email, plus whichever credential fields are given.
    ///
    /// A credential field that is not given is left untouched.
    pub fn upsert(
        &self,
        id: &str,
        name: &str,
        email: &str,
        ssh_key: Option<&str>,
        token: Option<&str>,
    ) -> Result<(), AppError> {
        debug!(id, "writing identity");
        self.store.set(&Self::key(id, FIELD_NAME), name)?;
        self.store.set(&Self::key(id, FIELD_EMAIL), email)?;
        if let Some(ssh_key) = ssh_key {
            self.store.set(&Self::key(id, FIELD_SSH_KEY), ssh_key)?;
        }
        if let Some(token) = token {
            self.store.set(&Self::key(id, FIELD_TOKEN), token)?;
        }
        Ok(())
    }

    /// Deletes an identity with all of its fields
    pub fn remove(&self, id: &str) -> Result<(), AppError> {
        if !self.exists(id)? {
            return Err(AppError::NotFound(id.to_string()));
        }
        debug!(id, "removing identity");
        self.store.remove_section(&Self::section(id))
    }

    /// Lists every identity id in the store, sorted and deduplicated
    pub fn list_ids(&self) -> Result<Vec<String>, AppError> {
        let prefix = format!("{NAMESPACE}.");
        let ids: BTreeSet<String> = self
            .store
            .keys_with_prefix(&prefix)?
            .iter()
            .filter_map(|key| key.strip_prefix(&prefix))
            .filter_map(|rest| rest.rsplit_once('.'))
            .map(|(id, _field)| id.to_string())
            .collect();

        Ok(ids.into_iter().collect())
    }
}
