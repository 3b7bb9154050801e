// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

//! # Fedicheck Services
//!
//! Typed operations against a Mastodon instance, built on
//! [`fedicheck_fetch`].
//!
//! Each service is a stateless handle whose methods take the
//! [`ServiceContext`](fedicheck_fetch::ServiceContext) explicitly and follow
//! the same steps: build the request, execute it, verify the status, parse
//! the body.
//!
//! | Service | Surface | Auth |
//! |---------|---------|------|
//! | [`AuthenticationService`] | `/auth/sign_in`, `/` | login form, cookies |
//! | [`AccountService`] | `/api/v1/accounts` | Bearer token |
//! | [`AdminAccountsService`] | `/admin/accounts` | admin cookies + CSRF |
//! | [`TimelineService`] | `/api/v1/timelines` | none or Bearer token |
//!
//! ## Usage
//!
//! ```ignore
//! use fedicheck_fetch::ServiceContext;
//! use fedicheck_services::{AccountService, TestFixture};
//!
//! let ctx = ServiceContext::builder().base_url("http://localhost:3000").build()?;
//! let fixture = TestFixture::new(ctx, "admin@localhost", "mastodonadmin");
//!
//! let form = fedicheck_services::random_account_form()?;
//! let created = fixture.create_confirmed_account(&form).await?;
//! let me = AccountService::new()
//!     .verify_credentials(fixture.ctx(), &created.auth)
//!     .await?;
//! ```

pub mod accounts;
pub mod admin;
pub mod auth;
pub mod builders;
pub mod fixture;
mod pipeline;
pub mod timelines;
pub mod web;

// Services
pub use accounts::{AccountService, ACCOUNTS_PATH};
pub use admin::{AdminAccountsService, ADMIN_ACCOUNTS_PATH};
pub use auth::{AuthenticationService, SignInOptions, SIGN_IN_PATH, WEB_HOME_PATH};
pub use timelines::{TimelineService, TIMELINES_PATH};
pub use web::refresh_auth_context;

// Builders
pub use builders::{
    AccountStatusesQueryBuilder, CreateAccountForm, CreateAccountFormBuilder, FieldsAttributes,
    PageQueryBuilder, TimelineQueryBuilder, UpdateCredentialsBuilder,
    UpdateCredentialsWithFields,
};

// Fixture
pub use fixture::{random_account_form, random_string, ConfirmedAccount, TestFixture};
