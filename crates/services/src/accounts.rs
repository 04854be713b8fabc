//! Account operations: users, hosts, the combined email namespace, and
//! credential verification at the boundary.
//!
//! Users and hosts live in separate stores but share one email namespace;
//! uniqueness is checked case-insensitively over both under the accounts
//! gate, at creation and at every email-changing update.

use tracing::{debug, info};
use uuid::Uuid;

use domains::error::{DomainError, Result};
use domains::models::{Host, NewUser, Place, User, UserPatch};
use domains::ports::Record;

use crate::facade::{sorted, StayFacade};

/// A resolved account from the combined namespace: either a guest profile
/// or a host (profile plus ownership capability).
#[derive(Debug, Clone)]
pub enum Account {
    Guest(User),
    Host(Host),
}

impl Account {
    pub fn id(&self) -> Uuid {
        match self {
            Self::Guest(user) => user.id(),
            Self::Host(host) => host.id(),
        }
    }

    pub fn email(&self) -> &str {
        self.profile().email()
    }

    pub fn is_admin(&self) -> bool {
        self.profile().is_admin()
    }

    pub fn profile(&self) -> &User {
        match self {
            Self::Guest(user) => user,
            Self::Host(host) => host.profile(),
        }
    }
}

impl StayFacade {
    // ---- Users ----

    pub async fn create_user(&self, input: NewUser) -> Result<User> {
        User::validate_password(&input.password)?;
        let hash = self.hasher.hash(&input.password)?;
        let user = User::new(
            input.first_name,
            input.last_name,
            input.email,
            hash,
            input.is_admin,
        )?;

        let _gate = self.accounts_gate.lock().await;
        self.ensure_email_free(user.email(), None).await?;
        self.users.add(user.clone()).await?;
        debug!(user_id = %user.id(), "user created");
        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.get(id).await?)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        Ok(sorted(self.users.list().await?))
    }

    pub async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User> {
        let _gate = self.accounts_gate.lock().await;
        let mut user = self.require_user(id).await?;
        if let Some(email) = &patch.email {
            self.ensure_email_free(email, Some(id)).await?;
        }
        apply_profile_patch(&mut user, patch, self)?;
        if !self.users.replace(user.clone()).await? {
            return Err(DomainError::not_found(User::KIND, id));
        }
        Ok(user)
    }

    /// Removes the account. Bookings the user already made keep their
    /// frozen actor id; they are not rewritten or dropped.
    pub async fn delete_user(&self, id: Uuid) -> Result<()> {
        self.require_user(id).await?;
        self.users.delete(id).await?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }

    // ---- Hosts ----

    pub async fn create_host(&self, input: NewUser) -> Result<Host> {
        User::validate_password(&input.password)?;
        let hash = self.hasher.hash(&input.password)?;
        let host = Host::new(
            input.first_name,
            input.last_name,
            input.email,
            hash,
            input.is_admin,
        )?;

        let _gate = self.accounts_gate.lock().await;
        self.ensure_email_free(host.profile().email(), None).await?;
        self.hosts.add(host.clone()).await?;
        debug!(host_id = %host.id(), "host created");
        Ok(host)
    }

    pub async fn get_host(&self, id: Uuid) -> Result<Option<Host>> {
        Ok(self.hosts.get(id).await?)
    }

    pub async fn list_hosts(&self) -> Result<Vec<Host>> {
        Ok(sorted(self.hosts.list().await?))
    }

    pub async fn update_host(&self, id: Uuid, patch: UserPatch) -> Result<Host> {
        let _gate = self.accounts_gate.lock().await;
        let mut host = self.require_host(id).await?;
        if let Some(email) = &patch.email {
            self.ensure_email_free(email, Some(id)).await?;
        }
        apply_profile_patch(host.profile_mut(), patch, self)?;
        if !self.hosts.replace(host.clone()).await? {
            return Err(DomainError::not_found(Host::KIND, id));
        }
        Ok(host)
    }

    /// Removes the host and cascade-deletes its places (and, through them,
    /// their bookings and reviews).
    pub async fn delete_host(&self, id: Uuid) -> Result<()> {
        let host = self.require_host(id).await?;
        for place_id in host.place_ids() {
            self.purge_place(*place_id, false).await?;
        }
        self.hosts.delete(id).await?;
        info!(host_id = %id, places = host.place_ids().len(), "host deleted with owned places");
        Ok(())
    }

    /// Places owned by a host, in listing order.
    pub async fn host_places(&self, id: Uuid) -> Result<Vec<Place>> {
        let host = self.require_host(id).await?;
        let mut places = Vec::with_capacity(host.place_ids().len());
        for place_id in host.place_ids() {
            let Some(place) = self.places.get(*place_id).await? else {
                return Err(DomainError::Internal(anyhow::anyhow!(
                    "place {place_id} owned by host {id} is missing from the store"
                )));
            };
            places.push(place);
        }
        Ok(places)
    }

    /// Mean rating across the host's rated places; `None` until at least
    /// one owned place has a review.
    pub async fn host_rating(&self, id: Uuid) -> Result<Option<f64>> {
        let places = self.host_places(id).await?;
        let mut averages = Vec::with_capacity(places.len());
        for place in &places {
            averages.push(self.rating_of(place).await?);
        }
        Ok(Host::rating(&averages))
    }

    // ---- Combined namespace ----

    /// First account (user or host) registered under the email,
    /// case-insensitively.
    pub async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        let needle = email.to_lowercase();
        let user_needle = needle.clone();
        if let Some(user) = self
            .users
            .find_first(Box::new(move |user: &User| {
                user.email().to_lowercase() == user_needle
            }))
            .await?
        {
            return Ok(Some(Account::Guest(user)));
        }
        if let Some(host) = self
            .hosts
            .find_first(Box::new(move |host: &Host| {
                host.profile().email().to_lowercase() == needle
            }))
            .await?
        {
            return Ok(Some(Account::Host(host)));
        }
        Ok(None)
    }

    /// Boundary credential check: resolves the account and verifies the
    /// candidate password against its stored hash. `None` for unknown
    /// email or wrong password alike.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<Option<Account>> {
        let Some(account) = self.find_account_by_email(email).await? else {
            return Ok(None);
        };
        if self
            .hasher
            .verify(password, account.profile().password_hash())
        {
            Ok(Some(account))
        } else {
            Ok(None)
        }
    }

    /// True while no account exists at all; the wiring layer uses this to
    /// grant the very first account the admin flag.
    pub async fn is_first_account(&self) -> Result<bool> {
        Ok(self.users.list().await?.is_empty() && self.hosts.list().await?.is_empty())
    }

    pub(crate) async fn ensure_email_free(&self, email: &str, exclude: Option<Uuid>) -> Result<()> {
        let needle = email.to_lowercase();
        for user in self.users.list().await? {
            if Some(user.id()) == exclude {
                continue;
            }
            if user.email().to_lowercase() == needle {
                return Err(DomainError::conflict(format!(
                    "Email {email} is already registered"
                )));
            }
        }
        for host in self.hosts.list().await? {
            if Some(host.id()) == exclude {
                continue;
            }
            if host.profile().email().to_lowercase() == needle {
                return Err(DomainError::conflict(format!(
                    "Email {email} is already registered"
                )));
            }
        }
        Ok(())
    }
}

/// Field-by-field merge through the profile's validating setters; partial
/// updates can never bypass a constraint. Password changes re-enter the
/// plaintext policy and the hasher.
fn apply_profile_patch(profile: &mut User, patch: UserPatch, facade: &StayFacade) -> Result<()> {
    if let Some(first_name) = patch.first_name {
        profile.set_first_name(first_name)?;
    }
    if let Some(last_name) = patch.last_name {
        profile.set_last_name(last_name)?;
    }
    if let Some(email) = patch.email {
        profile.set_email(email)?;
    }
    if let Some(password) = patch.password {
        User::validate_password(&password)?;
        profile.set_password_hash(facade.hasher.hash(&password)?);
    }
    if let Some(is_admin) = patch.is_admin {
        profile.set_is_admin(is_admin);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::FacadeStores;
    use domains::models::PricingPolicy;
    use domains::ports::{MockCredentialHasher, MockRecordStore};
    use std::sync::Arc;

    fn empty_stores() -> (
        MockRecordStore<User>,
        MockRecordStore<Host>,
        MockCredentialHasher,
    ) {
        (
            MockRecordStore::new(),
            MockRecordStore::new(),
            MockCredentialHasher::new(),
        )
    }

    fn facade_with(
        users: MockRecordStore<User>,
        hosts: MockRecordStore<Host>,
        hasher: MockCredentialHasher,
    ) -> StayFacade {
        StayFacade::new(
            FacadeStores {
                users: Arc::new(users),
                hosts: Arc::new(hosts),
                places: Arc::new(MockRecordStore::<domains::models::Place>::new()),
                amenities: Arc::new(MockRecordStore::<domains::models::Amenity>::new()),
                bookings: Arc::new(MockRecordStore::<domains::models::Booking>::new()),
                reviews: Arc::new(MockRecordStore::<domains::models::Review>::new()),
            },
            Arc::new(hasher),
            PricingPolicy::default(),
        )
    }

    #[tokio::test]
    async fn verify_credentials_checks_hash() {
        let (mut users, _, mut hasher) = empty_stores();
        let user = User::new("Ada", "L", "ada@example.com", "stored-hash", false).unwrap();
        let found = user.clone();
        users
            .expect_find_first()
            .returning(move |pred| Ok(pred(&found).then(|| found.clone())));
        hasher
            .expect_verify()
            .returning(|password, hash| password == "secret-pw" && hash == "stored-hash");

        let facade = facade_with(users, MockRecordStore::new(), hasher);
        let hit = facade
            .verify_credentials("ada@example.com", "secret-pw")
            .await
            .unwrap();
        assert_eq!(hit.unwrap().id(), user.id());

        let miss = facade
            .verify_credentials("ada@example.com", "wrong")
            .await
            .unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn create_user_rejects_short_password_before_hashing() {
        let (users, hosts, hasher) = empty_stores();
        // no expectations: a store or hasher call would panic the test
        let facade = facade_with(users, hosts, hasher);

        let err = facade
            .create_user(NewUser {
                first_name: "Ada".into(),
                last_name: "L".into(),
                email: "ada@example.com".into(),
                password: "short".into(),
                is_admin: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
