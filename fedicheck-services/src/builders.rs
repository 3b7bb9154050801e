//! Form and query builders.
//!
//! Each builder is a plain struct with one setter per field, generated by
//! [`params_builder!`]. Text fields take a value, flags switch a parameter
//! on, toggles take an explicit bool. Unset fields are omitted from the
//! output.

use fedicheck_fetch::{FetchError, FormBody, QueryParams};

macro_rules! params_builder {
    (@setter text, $field:ident, $setter:ident, $(#[$fmeta:meta])*) => {
        $(#[$fmeta])*
        #[must_use]
        pub fn $setter(mut self, value: impl Into<String>) -> Self {
            self.$field = Some(value.into());
            self
        }
    };
    (@setter flag, $field:ident, $setter:ident, $(#[$fmeta:meta])*) => {
        $(#[$fmeta])*
        #[must_use]
        pub fn $setter(mut self) -> Self {
            self.$field = Some(true.to_string());
            self
        }
    };
    (@setter toggle, $field:ident, $setter:ident, $(#[$fmeta:meta])*) => {
        $(#[$fmeta])*
        #[must_use]
        pub fn $setter(mut self, value: bool) -> Self {
            self.$field = Some(value.to_string());
            self
        }
    };
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* $field:ident: $kind:ident => $setter:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            $( $field: Option<String>, )+
        }

        impl $name {
            /// Creates an empty builder.
            pub fn new() -> Self {
                Self::default()
            }

            $( params_builder!(@setter $kind, $field, $setter, $(#[$fmeta])*); )+

            /// Set fields as `(name, value)` pairs, in declaration order.
            fn present(&self) -> Vec<(&'static str, &str)> {
                let mut pairs = Vec::new();
                $(
                    if let Some(value) = &self.$field {
                        pairs.push((stringify!($field), value.as_str()));
                    }
                )+
                pairs
            }
        }
    };
}

fn to_query(pairs: Vec<(&'static str, &str)>) -> QueryParams {
    let mut params = QueryParams::new();
    for (key, value) in pairs {
        params.insert(key, value);
    }
    params
}

// ============================================================================
// Account Registration
// ============================================================================

params_builder! {
    /// Builds the form for `POST /api/v1/accounts`.
    ///
    /// `username`, `email`, `password`, `locale` and `agreement` are required.
    pub struct CreateAccountFormBuilder {
        /// Local username.
        username: text => with_username,
        /// Login email.
        email: text => with_email,
        /// Login password.
        password: text => with_password,
        /// Interface language, e.g. `EN`.
        locale: text => with_locale,
        /// Whether the user accepts the server rules.
        agreement: toggle => set_agreement,
        /// Reason given when registrations need approval.
        reason: text => with_reason,
        /// Birth date, `YYYY-MM-DD`, for servers with a minimum age.
        date_of_birth: text => with_date_of_birth,
    }
}

impl CreateAccountFormBuilder {
    /// Finishes the form.
    ///
    /// Fails with [`FetchError::MissingParameter`] naming the first required
    /// field left unset.
    pub fn build(self) -> Result<CreateAccountForm, FetchError> {
        for (name, value) in [
            ("username", &self.username),
            ("email", &self.email),
            ("password", &self.password),
            ("locale", &self.locale),
            ("agreement", &self.agreement),
        ] {
            if value.is_none() {
                return Err(FetchError::MissingParameter(name));
            }
        }

        let form: FormBody = self.present().into_iter().collect();
        Ok(CreateAccountForm { form })
    }
}

/// A validated registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccountForm {
    form: FormBody,
}

impl CreateAccountForm {
    /// Requested username.
    pub fn username(&self) -> &str {
        self.form.get("username").unwrap_or_default()
    }

    /// Login email.
    pub fn email(&self) -> &str {
        self.form.get("email").unwrap_or_default()
    }

    /// Login password.
    pub fn password(&self) -> &str {
        self.form.get("password").unwrap_or_default()
    }

    /// The encoded form fields.
    pub fn form(&self) -> &FormBody {
        &self.form
    }
}

// ============================================================================
// Profile Update
// ============================================================================

params_builder! {
    /// Builds the form for `PATCH /api/v1/accounts/update_credentials`.
    pub struct UpdateCredentialsBuilder {
        /// Display name.
        display_name: text => with_display_name,
        /// Bio.
        note: text => with_note,
        /// Avatar image.
        avatar: text => with_avatar,
        /// Header image.
        header: text => with_header,
        /// Require approval for follows.
        locked: toggle => set_locked,
        /// Mark the account as automated.
        bot: toggle => set_bot,
        /// Opt into discovery features.
        discoverable: toggle => set_discoverable,
        /// Hide followers and follows.
        hide_collections: toggle => set_hide_collections,
        /// Allow public posts to be indexed for search.
        indexable: toggle => set_indexable,
    }
}

/// Profile fields set through [`UpdateCredentialsBuilder::with_fields_attributes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldsAttributes(Vec<(String, String)>);

impl FieldsAttributes {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a `name`/`value` pair.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((name.into(), value.into()));
        self
    }
}

impl UpdateCredentialsBuilder {
    /// Sets the profile metadata fields.
    #[must_use]
    pub fn with_fields_attributes(self, fields: FieldsAttributes) -> UpdateCredentialsWithFields {
        UpdateCredentialsWithFields {
            base: self,
            fields,
        }
    }

    /// Finishes the form.
    pub fn build(self) -> FormBody {
        self.present().into_iter().collect()
    }
}

/// An [`UpdateCredentialsBuilder`] with profile fields attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCredentialsWithFields {
    base: UpdateCredentialsBuilder,
    fields: FieldsAttributes,
}

impl UpdateCredentialsWithFields {
    /// Finishes the form, emitting `fields_attributes[i][name]` and
    /// `fields_attributes[i][value]` per field.
    pub fn build(self) -> FormBody {
        let mut form = self.base.build();
        for (index, (name, value)) in self.fields.0.into_iter().enumerate() {
            form.insert(format!("fields_attributes[{index}][name]"), name);
            form.insert(format!("fields_attributes[{index}][value]"), value);
        }
        form
    }
}

// ============================================================================
// Query Builders
// ============================================================================

params_builder! {
    /// Query for the timeline endpoints.
    pub struct TimelineQueryBuilder {
        /// Return results older than this id.
        max_id: text => with_max_id,
        /// Return results newer than this id.
        since_id: text => with_since_id,
        /// Return results immediately newer than this id.
        min_id: text => with_min_id,
        /// Maximum number of results.
        limit: text => with_limit,
        /// Only local statuses.
        local: flag => set_local,
        /// Only remote statuses.
        remote: flag => set_remote,
        /// Only statuses with media.
        only_media: flag => set_only_media,
    }
}

impl TimelineQueryBuilder {
    /// Finishes the query.
    pub fn build(self) -> QueryParams {
        to_query(self.present())
    }
}

params_builder! {
    /// Query for `GET /api/v1/accounts/:id/statuses`.
    pub struct AccountStatusesQueryBuilder {
        /// Return results older than this id.
        max_id: text => with_max_id,
        /// Return results newer than this id.
        since_id: text => with_since_id,
        /// Return results immediately newer than this id.
        min_id: text => with_min_id,
        /// Maximum number of results.
        limit: text => with_limit,
        /// Only statuses with media.
        only_media: flag => set_only_media,
        /// Skip replies.
        exclude_replies: flag => set_exclude_replies,
        /// Skip boosts.
        exclude_reblogs: flag => set_exclude_reblogs,
        /// Only pinned statuses.
        pinned: flag => set_pinned,
        /// Only statuses using this hashtag.
        tagged: text => with_tagged,
    }
}

impl AccountStatusesQueryBuilder {
    /// Finishes the query.
    pub fn build(self) -> QueryParams {
        to_query(self.present())
    }
}

params_builder! {
    /// Paging query for follower and following lists.
    pub struct PageQueryBuilder {
        /// Return results older than this id.
        max_id: text => with_max_id,
        /// Return results newer than this id.
        since_id: text => with_since_id,
        /// Return results immediately newer than this id.
        min_id: text => with_min_id,
        /// Maximum number of results.
        limit: text => with_limit,
    }
}

impl PageQueryBuilder {
    /// Finishes the query.
    pub fn build(self) -> QueryParams {
        to_query(self.present())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use fedicheck_fetch::{Method, QueryValue, RequestBuilder};

    use super::*;

    fn complete_form() -> CreateAccountFormBuilder {
        CreateAccountFormBuilder::new()
            .set_agreement(true)
            .with_username("newbie")
            .with_email("newbie@fedi.test")
            .with_password("hunter22hunter22")
            .with_locale("EN")
    }

    #[test]
    fn test_create_account_form() {
        let form = complete_form().build().unwrap();

        assert_eq!(form.username(), "newbie");
        assert_eq!(form.email(), "newbie@fedi.test");
        let fields: Vec<_> = form.form().iter().collect();
        assert_eq!(
            fields,
            vec![
                ("username", "newbie"),
                ("email", "newbie@fedi.test"),
                ("password", "hunter22hunter22"),
                ("locale", "EN"),
                ("agreement", "true"),
            ]
        );
    }

    #[test]
    fn test_create_account_optional_fields() {
        let form = complete_form()
            .with_reason("testing")
            .with_date_of_birth("1990-01-01")
            .build()
            .unwrap();

        assert_eq!(form.form().get("reason"), Some("testing"));
        assert_eq!(form.form().get("date_of_birth"), Some("1990-01-01"));
    }

    #[test]
    fn test_create_account_missing_required() {
        let result = CreateAccountFormBuilder::new()
            .with_username("newbie")
            .with_email("newbie@fedi.test")
            .with_password("pw")
            .with_locale("EN")
            .build();
        assert!(matches!(result, Err(FetchError::MissingParameter("agreement"))));

        let result = CreateAccountFormBuilder::new().set_agreement(false).build();
        assert!(matches!(result, Err(FetchError::MissingParameter("username"))));
    }

    #[test]
    fn test_form_round_trips_through_request_builder() {
        let form = complete_form().build().unwrap();
        let request = RequestBuilder::new("http://localhost:3000/api/v1/accounts", Method::Post)
            .with_form_body(form.form().clone())
            .build();

        assert_eq!(request.form.as_ref(), Some(form.form()));
    }

    #[test]
    fn test_update_credentials() {
        let form = UpdateCredentialsBuilder::new()
            .with_display_name("Alice")
            .set_locked(false)
            .set_bot(true)
            .build();

        let fields: Vec<_> = form.iter().collect();
        assert_eq!(
            fields,
            vec![("display_name", "Alice"), ("locked", "false"), ("bot", "true")]
        );
    }

    #[test]
    fn test_update_credentials_fields_attributes() {
        let form = UpdateCredentialsBuilder::new()
            .with_note("hi")
            .with_fields_attributes(
                FieldsAttributes::new()
                    .with_field("left", "field")
                    .with_field("Hugh", "Jazz"),
            )
            .build();

        assert_eq!(form.get("note"), Some("hi"));
        assert_eq!(form.get("fields_attributes[0][name]"), Some("left"));
        assert_eq!(form.get("fields_attributes[0][value]"), Some("field"));
        assert_eq!(form.get("fields_attributes[1][name]"), Some("Hugh"));
        assert_eq!(form.get("fields_attributes[1][value]"), Some("Jazz"));
    }

    #[test]
    fn test_empty_update_credentials() {
        assert!(UpdateCredentialsBuilder::new().build().is_empty());
    }

    #[test]
    fn test_timeline_query() {
        let query = TimelineQueryBuilder::new()
            .with_limit("5")
            .set_local()
            .build();

        assert_eq!(query.len(), 2);
        assert_eq!(query.get("limit"), Some(&QueryValue::from("5")));
        assert_eq!(query.get("local"), Some(&QueryValue::from("true")));
        assert!(query.get("remote").is_none());
    }

    #[test]
    fn test_account_statuses_query() {
        let query = AccountStatusesQueryBuilder::new()
            .set_exclude_replies()
            .with_tagged("cats")
            .build();

        assert_eq!(
            query.pairs(),
            vec![("exclude_replies", "true"), ("tagged", "cats")]
        );
    }

    #[test]
    fn test_page_query() {
        let query = PageQueryBuilder::new().with_max_id("99").build();
        assert_eq!(query.pairs(), vec![("max_id", "99")]);
    }
}
