//! The register-login-data flow.
//!
//! [`RegisterLoginData`] is the headless form behind the "new login" screen:
//! it holds the field values and their inline errors, and on submit either
//! reports validation errors or appends the record to the signed-in user's
//! slot and navigates home.

use tracing::{error, info, instrument};

use crate::alert::{Alert, SAVE_FAILED_MESSAGE};
use crate::error::{Error, Result};
use crate::login::{Field, LoginData, LoginDataForm};
use crate::navigation::{Navigator, Screen};
use crate::repository::LoginDataRepository;
use crate::session::AuthContext;
use crate::storage::KeyValueStore;
use crate::validation::{self, ValidationErrors};

/// What happened when the form was submitted.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// One or more fields failed validation; storage was not touched.
    Invalid(ValidationErrors),
    /// Saving failed; the user was alerted and stayed on the form.
    Failed(Error),
    /// The record was appended and the user was sent home.
    Saved(LoginData),
}

impl SubmitOutcome {
    /// Whether the record was saved.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Form state and submit handler for registering a login.
#[derive(Debug)]
pub struct RegisterLoginData<'a, A, N, L, S> {
    auth: &'a A,
    navigator: &'a mut N,
    alert: &'a mut L,
    repository: &'a LoginDataRepository<S>,
    form: LoginDataForm,
    errors: ValidationErrors,
    submitted: bool,
}

impl<'a, A, N, L, S> RegisterLoginData<'a, A, N, L, S>
where
    A: AuthContext,
    N: Navigator,
    L: Alert,
    S: KeyValueStore,
{
    /// Create an empty form wired to its collaborators.
    pub fn new(
        auth: &'a A,
        navigator: &'a mut N,
        alert: &'a mut L,
        repository: &'a LoginDataRepository<S>,
    ) -> Self {
        Self {
            auth,
            navigator,
            alert,
            repository,
            form: LoginDataForm::default(),
            errors: ValidationErrors::default(),
            submitted: false,
        }
    }

    /// Update a field value.
    ///
    /// After the first submit the form is validated again on every edit, so
    /// inline errors follow the new values.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
        if self.submitted {
            self.revalidate();
        }
    }

    /// Current value of a field.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        self.form.get(field)
    }

    /// Current form values.
    #[must_use]
    pub fn form(&self) -> &LoginDataForm {
        &self.form
    }

    /// Inline errors from the latest validation.
    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Inline error for a single field.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(field)
    }

    /// Validate and, if valid, save the form.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.submitted = true;
        if let Err(errors) = validation::validate(&self.form) {
            self.errors = errors.clone();
            return SubmitOutcome::Invalid(errors);
        }
        self.errors = ValidationErrors::default();

        let record = LoginData::from_form(self.form.clone());
        match self.save(record.clone()).await {
            Ok(()) => {
                info!("Registered login for service '{}'", record.service_name);
                self.navigator.navigate(Screen::Home);
                SubmitOutcome::Saved(record)
            }
            Err(err) => {
                error!("Failed to save login data: {err}");
                self.alert.alert(SAVE_FAILED_MESSAGE);
                SubmitOutcome::Failed(err)
            }
        }
    }

    async fn save(&self, record: LoginData) -> Result<()> {
        let user = self.auth.user().ok_or(Error::NotAuthenticated)?;
        self.repository.append(&user.id, record).await?;
        Ok(())
    }

    fn revalidate(&mut self) {
        self.errors = validation::validate(&self.form).err().unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::session::{StaticSession, User};
    use crate::storage::SqliteStore;
    use crate::validation::{EMAIL_INVALID, EMAIL_REQUIRED, PASSWORD_REQUIRED};

    #[derive(Debug, Default)]
    struct RecordingNavigator {
        visited: Vec<Screen>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&mut self, screen: Screen) {
            self.visited.push(screen);
        }
    }

    #[derive(Debug, Default)]
    struct RecordingAlert {
        messages: Vec<String>,
    }

    impl Alert for RecordingAlert {
        fn alert(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
    }

    /// Store that can be told to fail reads or writes, counting every access.
    #[derive(Debug, Default)]
    struct FailingStore {
        value: Mutex<Option<String>>,
        fail_reads: bool,
        fail_writes: bool,
        reads: AtomicUsize,
        writes: AtomicUsize,
    }

    impl FailingStore {
        fn seeded(value: &str) -> Self {
            Self {
                value: Mutex::new(Some(value.to_string())),
                ..Self::default()
            }
        }

        fn failing_reads(mut self) -> Self {
            self.fail_reads = true;
            self
        }

        fn failing_writes(mut self) -> Self {
            self.fail_writes = true;
            self
        }

        fn current(&self) -> Option<String> {
            self.value.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get_item(&self, _key: &str) -> Result<Option<String>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.fail_reads {
                return Err(Error::DatabaseQuery(rusqlite::Error::InvalidQuery));
            }
            Ok(self.current())
        }

        async fn set_item(&self, _key: &str, value: &str) -> Result<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes {
                return Err(Error::DatabaseQuery(rusqlite::Error::InvalidQuery));
            }
            *self.value.lock().unwrap() = Some(value.to_string());
            Ok(())
        }
    }

    fn session() -> StaticSession {
        StaticSession::signed_in(User::new("42"))
    }

    fn fill(
        form: &mut RegisterLoginData<
            '_,
            impl AuthContext,
            impl Navigator,
            impl Alert,
            impl KeyValueStore,
        >,
    ) {
        form.set_field(Field::ServiceName, "GitHub");
        form.set_field(Field::Email, "octo@example.com");
        form.set_field(Field::Password, "hunter2");
    }

    #[tokio::test]
    async fn test_valid_submission_appends_and_navigates_home() {
        let auth = session();
        let mut nav = RecordingNavigator::default();
        let mut alert = RecordingAlert::default();
        let repo = LoginDataRepository::new(SqliteStore::open_in_memory().unwrap());

        let mut form = RegisterLoginData::new(&auth, &mut nav, &mut alert, &repo);
        fill(&mut form);
        let record = match form.submit().await {
            SubmitOutcome::Saved(record) => record,
            other => panic!("expected Saved, got {other:?}"),
        };
        drop(form);

        assert_eq!(record.service_name, "GitHub");
        assert_eq!(nav.visited, vec![Screen::Home]);
        assert!(alert.messages.is_empty());
        assert_eq!(repo.list("42").await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn test_submission_keeps_existing_records() {
        let auth = session();
        let repo = LoginDataRepository::new(SqliteStore::open_in_memory().unwrap());
        let existing = LoginData::from_form(LoginDataForm::new("Mail", "me@x.io", "pw"));
        repo.append("42", existing.clone()).await.unwrap();

        let mut nav = RecordingNavigator::default();
        let mut alert = RecordingAlert::default();
        let mut form = RegisterLoginData::new(&auth, &mut nav, &mut alert, &repo);
        fill(&mut form);
        assert!(form.submit().await.is_saved());

        let all = repo.list("42").await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], existing);
        assert_eq!(all[1].service_name, "GitHub");
    }

    #[tokio::test]
    async fn test_empty_fields_block_submission() {
        let auth = session();
        let mut nav = RecordingNavigator::default();
        let mut alert = RecordingAlert::default();
        let store = FailingStore::default();
        let repo = LoginDataRepository::new(store);

        let mut form = RegisterLoginData::new(&auth, &mut nav, &mut alert, &repo);
        let outcome = form.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(ref e) if e.len() == 3));
        assert_eq!(form.error(Field::Email), Some(EMAIL_REQUIRED));
        assert_eq!(form.error(Field::Password), Some(PASSWORD_REQUIRED));
        drop(form);

        assert!(nav.visited.is_empty());
        assert!(alert.messages.is_empty());
        assert_eq!(repo.store().reads.load(Ordering::SeqCst), 0);
        assert_eq!(repo.store().writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_email_blocks_submission() {
        let auth = session();
        let mut nav = RecordingNavigator::default();
        let mut alert = RecordingAlert::default();
        let repo = LoginDataRepository::new(SqliteStore::open_in_memory().unwrap());

        let mut form = RegisterLoginData::new(&auth, &mut nav, &mut alert, &repo);
        fill(&mut form);
        form.set_field(Field::Email, "octo-at-example");
        let outcome = form.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert_eq!(form.error(Field::Email), Some(EMAIL_INVALID));
        assert!(form.error(Field::ServiceName).is_none());
        drop(form);

        assert!(nav.visited.is_empty());
        assert!(repo.list("42").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_errors_track_edits_after_submit() {
        let auth = session();
        let mut nav = RecordingNavigator::default();
        let mut alert = RecordingAlert::default();
        let repo = LoginDataRepository::new(SqliteStore::open_in_memory().unwrap());

        let mut form = RegisterLoginData::new(&auth, &mut nav, &mut alert, &repo);
        assert!(form.errors().is_empty());

        form.submit().await;
        assert_eq!(form.errors().len(), 3);

        form.set_field(Field::ServiceName, "GitHub");
        assert_eq!(form.errors().len(), 2);
        assert!(form.error(Field::ServiceName).is_none());
    }

    #[tokio::test]
    async fn test_no_errors_before_first_submit() {
        let auth = session();
        let mut nav = RecordingNavigator::default();
        let mut alert = RecordingAlert::default();
        let repo = LoginDataRepository::new(SqliteStore::open_in_memory().unwrap());

        let mut form = RegisterLoginData::new(&auth, &mut nav, &mut alert, &repo);
        form.set_field(Field::Email, "bad");
        assert!(form.errors().is_empty());
        assert_eq!(form.value(Field::Email), "bad");
    }

    #[tokio::test]
    async fn test_write_failure_keeps_previous_value() {
        let seeded = r#"[{"id":"1","service_name":"Mail","email":"me@x.io","password":"pw"}]"#;
        let auth = session();
        let mut nav = RecordingNavigator::default();
        let mut alert = RecordingAlert::default();
        let repo = LoginDataRepository::new(FailingStore::seeded(seeded).failing_writes());

        let mut form = RegisterLoginData::new(&auth, &mut nav, &mut alert, &repo);
        fill(&mut form);
        let outcome = form.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        drop(form);

        assert!(nav.visited.is_empty());
        assert_eq!(alert.messages, vec![SAVE_FAILED_MESSAGE.to_string()]);
        assert_eq!(repo.store().reads.load(Ordering::SeqCst), 1);
        assert_eq!(repo.store().writes.load(Ordering::SeqCst), 1);
        assert_eq!(repo.store().current().as_deref(), Some(seeded));
    }

    #[tokio::test]
    async fn test_read_failure_writes_nothing() {
        let seeded = "[]";
        let auth = session();
        let mut nav = RecordingNavigator::default();
        let mut alert = RecordingAlert::default();
        let repo = LoginDataRepository::new(FailingStore::seeded(seeded).failing_reads());

        let mut form = RegisterLoginData::new(&auth, &mut nav, &mut alert, &repo);
        fill(&mut form);
        let outcome = form.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        drop(form);

        assert!(nav.visited.is_empty());
        assert_eq!(alert.messages, vec![SAVE_FAILED_MESSAGE.to_string()]);
        assert_eq!(repo.store().writes.load(Ordering::SeqCst), 0);
        assert_eq!(repo.store().current().as_deref(), Some(seeded));
    }

    #[tokio::test]
    async fn test_corrupt_slot_alerts_without_navigation() {
        let auth = session();
        let mut nav = RecordingNavigator::default();
        let mut alert = RecordingAlert::default();
        let repo = LoginDataRepository::new(FailingStore::seeded("{oops"));

        let mut form = RegisterLoginData::new(&auth, &mut nav, &mut alert, &repo);
        fill(&mut form);
        let outcome = form.submit().await;
        assert!(matches!(
            outcome,
            SubmitOutcome::Failed(Error::CorruptSlot { .. })
        ));
        drop(form);

        assert!(nav.visited.is_empty());
        assert_eq!(alert.messages.len(), 1);
        assert_eq!(repo.store().writes.load(Ordering::SeqCst), 0);
        assert_eq!(repo.store().current().as_deref(), Some("{oops"));
    }

    #[tokio::test]
    async fn test_values_are_saved_as_typed() {
        let auth = session();
        let mut nav = RecordingNavigator::default();
        let mut alert = RecordingAlert::default();
        let repo = LoginDataRepository::new(SqliteStore::open_in_memory().unwrap());

        let mut form = RegisterLoginData::new(&auth, &mut nav, &mut alert, &repo);
        fill(&mut form);
        form.set_field(Field::ServiceName, "  My Bank ");
        assert!(form.submit().await.is_saved());
        drop(form);

        let all = repo.list("42").await.unwrap();
        assert_eq!(all[0].service_name, "  My Bank ");
        assert_eq!(all[0].email, "octo@example.com");
    }

    #[tokio::test]
    async fn test_whitespace_service_name_is_accepted() {
        let auth = session();
        let mut nav = RecordingNavigator::default();
        let mut alert = RecordingAlert::default();
        let repo = LoginDataRepository::new(SqliteStore::open_in_memory().unwrap());

        let mut form = RegisterLoginData::new(&auth, &mut nav, &mut alert, &repo);
        fill(&mut form);
        form.set_field(Field::ServiceName, "   ");
        assert!(form.submit().await.is_saved());
        drop(form);

        assert_eq!(nav.visited, vec![Screen::Home]);
    }

    #[tokio::test]
    async fn test_missing_user_alerts_without_navigation() {
        let auth = StaticSession::anonymous();
        let mut nav = RecordingNavigator::default();
        let mut alert = RecordingAlert::default();
        let repo = LoginDataRepository::new(FailingStore::default());

        let mut form = RegisterLoginData::new(&auth, &mut nav, &mut alert, &repo);
        fill(&mut form);
        let outcome = form.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Failed(ref e) if e.is_not_authenticated()));
        drop(form);

        assert!(nav.visited.is_empty());
        assert_eq!(alert.messages.len(), 1);
        assert_eq!(repo.store().reads.load(Ordering::SeqCst), 0);
    }
}
