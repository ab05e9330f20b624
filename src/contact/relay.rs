use crate::contact::form::ContactFields;
use crate::foundation::error::FolioResult;

/// What goes out to the mail relay for one submission.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct OutboundMail {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub to_email: String,
    pub reply_to: String,
}

impl OutboundMail {
    pub fn compose(fields: &ContactFields, to_email: &str) -> Self {
        Self {
            from_name: fields.name.clone(),
            from_email: fields.email.clone(),
            message: format!(
                "From: {}\nName: {}\n\nMessage:\n{}",
                fields.email, fields.name, fields.message
            ),
            to_email: to_email.to_string(),
            reply_to: fields.email.clone(),
        }
    }
}

/// Transactional mail service. Only success or failure is reported back.
pub trait MailRelay {
    fn send(&mut self, mail: &OutboundMail) -> FolioResult<()>;
}

impl<F> MailRelay for F
where
    F: FnMut(&OutboundMail) -> FolioResult<()>,
{
    fn send(&mut self, mail: &OutboundMail) -> FolioResult<()> {
        self(mail)
    }
}

/// Dry-run relay: logs the mail and reports success.
#[derive(Debug, Default)]
pub struct LogRelay {
    sent: usize,
}

impl LogRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> usize {
        self.sent
    }
}

impl MailRelay for LogRelay {
    fn send(&mut self, mail: &OutboundMail) -> FolioResult<()> {
        self.sent += 1;
        tracing::info!(
            from = %mail.from_email,
            to = %mail.to_email,
            bytes = mail.message.len(),
            "mail relay dry run"
        );
        Ok(())
    }
}

#[cfg(feature = "emailjs")]
pub use emailjs::EmailJsRelay;

#[cfg(feature = "emailjs")]
mod emailjs {
    use super::{MailRelay, OutboundMail};
    use crate::config::EmailJsCredentials;
    use crate::foundation::error::{FolioError, FolioResult};

    pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

    #[derive(serde::Serialize)]
    struct SendRequest<'a> {
        service_id: &'a str,
        template_id: &'a str,
        user_id: &'a str,
        template_params: &'a OutboundMail,
    }

    /// Relay backed by the EmailJS REST API.
    #[derive(Debug)]
    pub struct EmailJsRelay {
        client: reqwest::blocking::Client,
        endpoint: String,
        credentials: EmailJsCredentials,
    }

    impl EmailJsRelay {
        pub fn new(credentials: EmailJsCredentials) -> FolioResult<Self> {
            let client = reqwest::blocking::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .map_err(|e| FolioError::relay(format!("http client: {e}")))?;
            Ok(Self {
                client,
                endpoint: EMAILJS_ENDPOINT.to_string(),
                credentials,
            })
        }

        pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
            self.endpoint = endpoint.into();
            self
        }
    }

    impl MailRelay for EmailJsRelay {
        #[tracing::instrument(skip_all, fields(to = %mail.to_email))]
        fn send(&mut self, mail: &OutboundMail) -> FolioResult<()> {
            let body = SendRequest {
                service_id: &self.credentials.service_id,
                template_id: &self.credentials.template_id,
                user_id: &self.credentials.public_key,
                template_params: mail,
            };
            let resp = self
                .client
                .post(&self.endpoint)
                .json(&body)
                .send()
                .map_err(|e| FolioError::relay(format!("send: {e}")))?;
            let status = resp.status();
            if !status.is_success() {
                let text = resp.text().unwrap_or_default();
                return Err(FolioError::relay(format!("EmailJS returned {status}: {text}")));
            }
            tracing::debug!("mail accepted by EmailJS");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_formats_body_and_addresses() {
        let fields = ContactFields {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hello\nthere".into(),
        };
        let mail = OutboundMail::compose(&fields, "me@example.com");
        assert_eq!(mail.from_name, "Ada");
        assert_eq!(mail.reply_to, "ada@example.com");
        assert_eq!(mail.to_email, "me@example.com");
        assert_eq!(
            mail.message,
            "From: ada@example.com\nName: Ada\n\nMessage:\nHello\nthere"
        );
    }

    #[test]
    fn template_params_serialize_flat() {
        let mail = OutboundMail::compose(&ContactFields::default(), "x@y");
        let v = serde_json::to_value(&mail).unwrap();
        for key in ["from_name", "from_email", "message", "to_email", "reply_to"] {
            assert!(v.get(key).is_some(), "{key}");
        }
    }

    #[test]
    fn log_relay_counts() {
        let mut relay = LogRelay::new();
        relay
            .send(&OutboundMail::compose(&ContactFields::default(), "x@y"))
            .unwrap();
        assert_eq!(relay.sent(), 1);
    }
}

#[cfg(all(test, feature = "emailjs"))]
mod emailjs_tests {
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;
    use crate::config::EmailJsCredentials;
    use crate::contact::form::ContactFields;

    /// Answers one request with `status` and hands back the JSON body it received.
    fn serve_once(status: &'static str) -> (String, thread::JoinHandle<serde_json::Value>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':')
                    && name.eq_ignore_ascii_case("content-length")
                {
                    content_length = value.trim().parse().unwrap();
                }
            }
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();
            let reply = format!("HTTP/1.1 {status}\r\ncontent-length: 2\r\nconnection: close\r\n\r\nOK");
            let mut stream = stream;
            stream.write_all(reply.as_bytes()).unwrap();
            serde_json::from_slice(&body).unwrap()
        });
        (format!("http://{addr}/api/v1.0/email/send"), handle)
    }

    fn relay(endpoint: String) -> EmailJsRelay {
        let creds = EmailJsCredentials {
            service_id: "svc".into(),
            template_id: "tpl".into(),
            public_key: "pk".into(),
        };
        EmailJsRelay::new(creds).unwrap().with_endpoint(endpoint)
    }

    fn mail() -> OutboundMail {
        let fields = ContactFields {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "hi".into(),
        };
        OutboundMail::compose(&fields, "me@example.com")
    }

    #[test]
    fn posts_credentials_and_template_params() {
        let (endpoint, server) = serve_once("200 OK");
        relay(endpoint).send(&mail()).unwrap();
        let body = server.join().unwrap();
        assert_eq!(body["service_id"], "svc");
        assert_eq!(body["template_id"], "tpl");
        assert_eq!(body["user_id"], "pk");
        assert_eq!(body["template_params"]["to_email"], "me@example.com");
        assert_eq!(body["template_params"]["reply_to"], "ada@example.com");
    }

    #[test]
    fn non_success_status_is_a_relay_error() {
        let (endpoint, server) = serve_once("400 Bad Request");
        let err = relay(endpoint).send(&mail()).unwrap_err();
        server.join().unwrap();
        let msg = err.to_string();
        assert!(msg.contains("400"), "{msg}");
    }
}
