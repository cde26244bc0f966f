//! Contact form state and its single outbound submission.
//!
//! ```text
//! ContactForm ──validate──► ContactClient::send ──► 2xx ──► ack(Sent), reset()
//!                                                 └► else ─► ack(Failed), keep fields
//! ```
//!
//! One request per submission: no retry, no cancellation, no client-side
//! timeout. Nothing stops a caller from submitting again while a request
//! is still in flight.

use crate::log;
use regex::Regex;
use reqwest::{
    Client,
    header::{ACCEPT, CONTENT_TYPE},
};
use std::sync::LazyLock;
use thiserror::Error;

pub const SENT_MESSAGE: &str = "✅ Thank you! Your message has been sent.";
pub const FAILED_MESSAGE: &str = "❌ Failed to send message. Please try again.";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@ \t\r\n]+@[^@ \t\r\n]+\.[^@ \t\r\n]+$").expect("email pattern is valid")
});

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("`{0}` is required")]
    Missing(&'static str),

    #[error("`{0}` is not a valid email address")]
    InvalidEmail(String),

    #[error("form endpoint answered with status {0}")]
    Status(u16),

    #[error("form endpoint unreachable")]
    Network(#[from] reqwest::Error),
}

/// What the user is told after a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgment {
    Sent,
    Failed,
}

impl Acknowledgment {
    pub const fn message(self) -> &'static str {
        match self {
            Self::Sent => SENT_MESSAGE,
            Self::Failed => FAILED_MESSAGE,
        }
    }
}

/// Blocking user acknowledgment (an alert box in a browser, a log line in
/// the terminal).
pub trait Acknowledger {
    fn acknowledge(&mut self, ack: Acknowledgment);
}

/// Prints acknowledgments through the logger.
#[derive(Debug, Default)]
pub struct TerminalAcknowledger;

impl Acknowledger for TerminalAcknowledger {
    fn acknowledge(&mut self, ack: Acknowledgment) {
        log!("contact"; "{}", ack.message());
    }
}

/// The three contact form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// All fields are required; `email` must look like an address.
    pub fn validate(&self) -> Result<(), ContactError> {
        for (field, value) in self.fields() {
            if value.trim().is_empty() {
                return Err(ContactError::Missing(field));
            }
        }
        if !EMAIL.is_match(self.email.trim()) {
            return Err(ContactError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }

    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("message", self.message.as_str()),
        ]
    }

    /// `application/x-www-form-urlencoded` body.
    pub fn encode(&self) -> String {
        self.fields()
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_empty())
    }
}

/// Posts contact forms to the third-party endpoint.
#[derive(Debug, Clone)]
pub struct ContactClient {
    http: Client,
    endpoint: String,
}

impl ContactClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ContactError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one request. Any 2xx status counts as delivered.
    pub async fn send(&self, form: &ContactForm) -> Result<(), ContactError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form.encode())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ContactError::Status(status.as_u16()))
        }
    }
}

/// Validate, send, and acknowledge exactly once.
///
/// On success the form is reset after the acknowledgment. On failure the
/// fields are left as typed. An invalid form is not sent and not
/// acknowledged.
pub async fn submit(
    client: &ContactClient,
    form: &mut ContactForm,
    ack: &mut impl Acknowledger,
) -> Result<(), ContactError> {
    form.validate()?;

    match client.send(form).await {
        Ok(()) => {
            ack.acknowledge(Acknowledgment::Sent);
            form.reset();
            Ok(())
        }
        Err(err) => {
            log!("error"; "contact form: {err}");
            ack.acknowledge(Acknowledgment::Failed);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_string, header, method, path},
    };

    #[derive(Default)]
    struct Recorder(Vec<Acknowledgment>);

    impl Acknowledger for Recorder {
        fn acknowledge(&mut self, ack: Acknowledgment) {
            self.0.push(ack);
        }
    }

    fn filled_form() -> ContactForm {
        ContactForm::new("Sara Ali", "sara@example.com", "GRE in March?")
    }

    #[test]
    fn test_validate_required_fields() {
        assert!(filled_form().validate().is_ok());

        let mut form = filled_form();
        form.name = "  ".into();
        assert!(matches!(form.validate(), Err(ContactError::Missing("name"))));

        let mut form = filled_form();
        form.message.clear();
        assert!(matches!(form.validate(), Err(ContactError::Missing("message"))));
    }

    #[test]
    fn test_validate_email_format() {
        for bad in ["sara", "sara@", "sara@example", "sa ra@example.com", "@example.com"] {
            let mut form = filled_form();
            form.email = bad.into();
            assert!(
                matches!(form.validate(), Err(ContactError::InvalidEmail(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_encode_form_body() {
        assert_eq!(
            filled_form().encode(),
            "name=Sara%20Ali&email=sara%40example.com&message=GRE%20in%20March%3F"
        );
    }

    #[test]
    fn test_reset_clears_fields() {
        let mut form = filled_form();
        form.reset();
        assert!(form.is_empty());
    }

    #[tokio::test]
    async fn test_submit_success_clears_form_and_acknowledges_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/f/test"))
            .and(header("accept", "application/json"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string(filled_form().encode()))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = ContactClient::new(format!("{}/f/test", server.uri())).unwrap();
        let mut form = filled_form();
        let mut recorder = Recorder::default();

        let result = submit(&client, &mut form, &mut recorder).await;

        assert!(result.is_ok());
        assert!(form.is_empty());
        assert_eq!(recorder.0, [Acknowledgment::Sent]);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_form_and_acknowledges_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = ContactClient::new(server.uri()).unwrap();
        let mut form = filled_form();
        let mut recorder = Recorder::default();

        let result = submit(&client, &mut form, &mut recorder).await;

        assert!(matches!(result, Err(ContactError::Status(500))));
        assert_eq!(form, filled_form());
        assert_eq!(recorder.0, [Acknowledgment::Failed]);
    }

    #[tokio::test]
    async fn test_submit_non_ok_status_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = ContactClient::new(server.uri()).unwrap();
        let mut recorder = Recorder::default();
        let result = submit(&client, &mut filled_form(), &mut recorder).await;

        assert!(result.is_err());
        assert_eq!(recorder.0, [Acknowledgment::Failed]);
    }

    #[tokio::test]
    async fn test_submit_network_error_is_failure() {
        // Bind then drop a listener so the port is known to be closed.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = ContactClient::new(format!("http://127.0.0.1:{port}/")).unwrap();
        let mut form = filled_form();
        let mut recorder = Recorder::default();

        let result = submit(&client, &mut form, &mut recorder).await;

        assert!(matches!(result, Err(ContactError::Network(_))));
        assert_eq!(form, filled_form());
        assert_eq!(recorder.0, [Acknowledgment::Failed]);
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = ContactClient::new(server.uri()).unwrap();
        let mut form = ContactForm::new("Sara", "not-an-email", "hi");
        let mut recorder = Recorder::default();

        let result = submit(&client, &mut form, &mut recorder).await;

        assert!(matches!(result, Err(ContactError::InvalidEmail(_))));
        assert!(recorder.0.is_empty());
        assert_eq!(form.name, "Sara");
    }
}
