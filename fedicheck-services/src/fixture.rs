//! Shared state for a test run.
//!
//! A [`TestFixture`] is created once per run and passed to every scenario.
//! The admin signs in lazily on first use and the resulting context is
//! reused for the rest of the run.

use fedicheck_core::{Account, AuthContext};
use fedicheck_fetch::{FetchError, ServiceContext};
use futures::future::try_join_all;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use crate::accounts::AccountService;
use crate::admin::AdminAccountsService;
use crate::auth::AuthenticationService;
use crate::builders::{CreateAccountForm, CreateAccountFormBuilder};

/// Returns `len` random alphanumeric characters.
pub fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// A registration form with random, valid values.
pub fn random_account_form() -> Result<CreateAccountForm, FetchError> {
    CreateAccountFormBuilder::new()
        .set_agreement(true)
        .with_username(random_string(5))
        .with_email(format!("{}@{}.test", random_string(6), random_string(6)))
        .with_password(random_string(20))
        .with_locale("EN")
        .build()
}

/// A registered, confirmed account.
#[derive(Debug, Clone)]
pub struct ConfirmedAccount {
    /// The account as the server reports it.
    pub account: Account,
    /// Credentials returned at registration.
    pub auth: AuthContext,
}

/// Per-run context holding the target instance and the admin login.
pub struct TestFixture {
    ctx: ServiceContext,
    admin_username: String,
    admin_password: String,
    admin: OnceCell<AuthContext>,
}

impl TestFixture {
    /// Creates a fixture. Nothing is sent until the admin is needed.
    pub fn new(
        ctx: ServiceContext,
        admin_username: impl Into<String>,
        admin_password: impl Into<String>,
    ) -> Self {
        Self {
            ctx,
            admin_username: admin_username.into(),
            admin_password: admin_password.into(),
            admin: OnceCell::new(),
        }
    }

    /// The service context.
    pub fn ctx(&self) -> &ServiceContext {
        &self.ctx
    }

    /// The admin context, signing in on first call.
    ///
    /// A failed sign-in is not cached; the next call tries again.
    pub async fn admin_auth(&self) -> Result<&AuthContext, FetchError> {
        self.admin
            .get_or_try_init(|| async {
                debug!(username = %self.admin_username, "Signing in admin");
                AuthenticationService::new()
                    .sign_in(&self.ctx, &self.admin_username, &self.admin_password)
                    .await
            })
            .await
    }

    /// Registers an account, looks it up and confirms it as the admin.
    #[instrument(skip(self, form), fields(username = %form.username()))]
    pub async fn create_confirmed_account(
        &self,
        form: &CreateAccountForm,
    ) -> Result<ConfirmedAccount, FetchError> {
        let admin = self.admin_auth().await?;
        let accounts = AccountService::new();

        let auth = accounts.register_account(&self.ctx, admin, form).await?;
        let account = accounts.lookup_account(&self.ctx, form.username()).await?;
        AdminAccountsService::new()
            .confirm_account(&self.ctx, admin, &account.id)
            .await?;

        info!(id = %account.id, "Created confirmed account");
        Ok(ConfirmedAccount { account, auth })
    }

    /// Creates `count` confirmed accounts with random values, concurrently.
    pub async fn create_confirmed_accounts(
        &self,
        count: usize,
    ) -> Result<Vec<ConfirmedAccount>, FetchError> {
        let forms = (0..count)
            .map(|_| random_account_form())
            .collect::<Result<Vec<_>, _>>()?;

        try_join_all(forms.iter().map(|form| self.create_confirmed_account(form))).await
    }
}

impl std::fmt::Debug for TestFixture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestFixture")
            .field("ctx", &self.ctx)
            .field("admin_username", &self.admin_username)
            .field("admin_signed_in", &self.admin.initialized())
            .finish_non_exhaustive()
    }
}
