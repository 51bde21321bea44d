//! Service endpoints and secure files
//!
//! Endpoint fields are published as `ENDPOINT_<KIND>_<id>[_<PARAM>]`. The id
//! is used verbatim; parameter names go through the name codec. Url,
//! authorization, scheme and authorization parameters are consumed on a
//! successful read. Data parameters are not. Apart from the url, an unset
//! field reads as `None` even when it is required.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use super::TaskContext;
use crate::environment::EnvironmentBackend;
use crate::errors::{Result, TaskError};
use crate::variables::to_env_key;

/// Decoded `ENDPOINT_AUTH_<id>` value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    /// Authorization parameters, e.g. `username`, `password`
    #[serde(default)]
    pub parameters: HashMap<String, String>,
    /// Authorization scheme, e.g. `UsernamePassword`
    #[serde(default)]
    pub scheme: String,
}

impl Authorization {
    /// Looks up a parameter ignoring ASCII case
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .get(name)
            .or_else(|| {
                self.parameters
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .map(String::as_str)
    }
}

fn report_absent<T>(key: &str, value: Option<T>, required: bool) -> Option<T> {
    if value.is_none() && required {
        warn!(key, "required endpoint field is not set");
    }
    value
}

impl<E: EnvironmentBackend> TaskContext<E> {
    fn take_endpoint_field(&mut self, key: &str) -> Option<String> {
        let value = self.env.take(key);
        if value.is_some() {
            debug!(key, "endpoint field consumed");
        }
        value
    }

    /// Gets the url of endpoint `id`; empty when unset and not required.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::RequiredInputMissing`] if `required` is set and the
    /// url is unset.
    pub fn get_endpoint_url(&mut self, id: &str, required: bool) -> Result<String> {
        self.take_required_url(id, required)
            .map(Option::unwrap_or_default)
    }

    fn take_required_url(&mut self, id: &str, required: bool) -> Result<Option<String>> {
        let key = format!("ENDPOINT_URL_{id}");
        match self.take_endpoint_field(&key) {
            None if required => Err(TaskError::missing(key)),
            value => Ok(value),
        }
    }

    /// Gets and parses the url of endpoint `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::RequiredInputMissing`] if `required` is set and the
    /// url is unset, and [`TaskError::InvalidEndpointUrl`] if it does not parse.
    pub fn get_endpoint_url_parsed(&mut self, id: &str, required: bool) -> Result<Option<Url>> {
        let Some(value) = self.take_required_url(id, required)? else {
            return Ok(None);
        };
        Url::parse(&value)
            .map(Some)
            .map_err(|_| TaskError::InvalidEndpointUrl {
                id: id.to_string(),
                value,
            })
    }

    /// Gets the decoded authorization of endpoint `id`, `None` when unset.
    ///
    /// The key is consumed only once it decodes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::AuthDecode`] if the value is not a JSON object of
    /// the expected shape.
    pub fn get_endpoint_authorization(
        &mut self,
        id: &str,
        required: bool,
    ) -> Result<Option<Authorization>> {
        let key = format!("ENDPOINT_AUTH_{id}");
        let Some(raw) = self.env.peek(&key) else {
            return Ok(report_absent(&key, None, required));
        };
        let authorization: Authorization =
            serde_json::from_str(&raw).map_err(|source| TaskError::AuthDecode {
                id: id.to_string(),
                source,
            })?;
        self.env.remove(&key);
        debug!(endpoint = id, scheme = %authorization.scheme, "endpoint authorization consumed");
        Ok(Some(authorization))
    }

    /// Gets the authorization scheme of endpoint `id`, `None` when unset.
    pub fn get_endpoint_authorization_scheme(
        &mut self,
        id: &str,
        required: bool,
    ) -> Option<String> {
        let key = format!("ENDPOINT_AUTH_SCHEME_{id}");
        let value = self.take_endpoint_field(&key);
        report_absent(&key, value, required)
    }

    /// Gets an authorization parameter of endpoint `id`, `None` when unset.
    pub fn get_endpoint_authorization_parameter(
        &mut self,
        id: &str,
        param: &str,
        required: bool,
    ) -> Option<String> {
        let key = format!("ENDPOINT_AUTH_PARAMETER_{id}_{}", to_env_key(param));
        let value = self.take_endpoint_field(&key);
        report_absent(&key, value, required)
    }

    /// Gets a data parameter of endpoint `id`, `None` when unset. Does not consume it.
    #[must_use]
    pub fn get_endpoint_data_parameter(
        &self,
        id: &str,
        param: &str,
        required: bool,
    ) -> Option<String> {
        let key = format!("ENDPOINT_DATA_{id}_{}", to_env_key(param));
        report_absent(&key, self.env.peek(&key), required)
    }

    /// Gets the file name of secure file `id`
    #[must_use]
    pub fn get_secure_file_name(&self, id: &str) -> Option<String> {
        self.env.peek(&format!("SECUREFILE_NAME_{id}"))
    }

    /// Gets and consumes the download ticket of secure file `id`
    pub fn get_secure_file_ticket(&mut self, id: &str) -> Option<String> {
        let ticket = self.env.take(&format!("SECUREFILE_TICKET_{id}"))?;
        debug!(secure_file = id, "secure file ticket consumed");
        Some(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::EnvSnapshot;
    use crate::infrastructure::Config;
    use pretty_assertions::assert_eq;

    const AUTH: &str =
        r#"{ "parameters": {"param1": "val1", "param2": "val2"}, "scheme": "UsernamePassword"}"#;

    fn context(pairs: &[(&str, &str)]) -> TaskContext<EnvSnapshot> {
        TaskContext::new(EnvSnapshot::from_pairs(pairs.iter().copied()), Config::default())
    }

    #[test]
    fn test_get_endpoint_url() {
        let mut ctx = context(&[("ENDPOINT_URL_id1", "http://url")]);
        assert_eq!(ctx.get_endpoint_url("id1", true).unwrap(), "http://url");
        assert!(ctx.env().peek("ENDPOINT_URL_id1").is_none());
    }

    #[test]
    fn test_get_endpoint_url_absent() {
        let mut ctx = context(&[]);
        assert_eq!(ctx.get_endpoint_url("id1", false).unwrap(), "");
        assert!(matches!(
            ctx.get_endpoint_url("id1", true),
            Err(TaskError::RequiredInputMissing { name }) if name == "ENDPOINT_URL_id1"
        ));
    }

    #[test]
    fn test_get_endpoint_url_parsed() {
        let mut ctx = context(&[
            ("ENDPOINT_URL_good", "https://dev.example.com/org/"),
            ("ENDPOINT_URL_bad", "not a url"),
        ]);
        let url = ctx.get_endpoint_url_parsed("good", true).unwrap().unwrap();
        assert_eq!(url.host_str(), Some("dev.example.com"));
        assert!(matches!(
            ctx.get_endpoint_url_parsed("bad", true),
            Err(TaskError::InvalidEndpointUrl { .. })
        ));
        assert_eq!(ctx.get_endpoint_url_parsed("none", false).unwrap(), None);
    }

    #[test]
    fn test_get_endpoint_authorization() {
        let mut ctx = context(&[("ENDPOINT_AUTH_id1", AUTH)]);
        let auth = ctx.get_endpoint_authorization("id1", true).unwrap().unwrap();
        assert_eq!(auth.scheme, "UsernamePassword");
        assert_eq!(auth.parameter("param1"), Some("val1"));
        assert_eq!(auth.parameter("PARAM2"), Some("val2"));
        assert_eq!(auth.parameter("param3"), None);
        assert!(ctx.env().peek("ENDPOINT_AUTH_id1").is_none());
    }

    #[test]
    fn test_get_endpoint_authorization_absent() {
        let mut ctx = context(&[]);
        assert_eq!(ctx.get_endpoint_authorization("id1", false).unwrap(), None);
        assert_eq!(ctx.get_endpoint_authorization("id1", true).unwrap(), None);
    }

    #[test]
    fn test_get_endpoint_authorization_malformed() {
        let mut ctx = context(&[
            ("ENDPOINT_AUTH_bad", "{ not json"),
            ("ENDPOINT_AUTH_shape", r#"{"parameters": ["a"], "scheme": "Token"}"#),
        ]);
        assert!(matches!(
            ctx.get_endpoint_authorization("bad", true),
            Err(TaskError::AuthDecode { .. })
        ));
        assert!(matches!(
            ctx.get_endpoint_authorization("shape", false),
            Err(TaskError::AuthDecode { .. })
        ));
        assert!(ctx.env().peek("ENDPOINT_AUTH_bad").is_some());
    }

    #[test]
    fn test_get_endpoint_authorization_scheme() {
        let mut ctx = context(&[("ENDPOINT_AUTH_SCHEME_id1", "scheme1")]);
        assert_eq!(
            ctx.get_endpoint_authorization_scheme("id1", true).as_deref(),
            Some("scheme1")
        );
        assert!(ctx.env().peek("ENDPOINT_AUTH_SCHEME_id1").is_none());
        assert_eq!(ctx.get_endpoint_authorization_scheme("id1", false), None);
    }

    #[test]
    fn test_get_endpoint_authorization_parameter() {
        let mut ctx = context(&[("ENDPOINT_AUTH_PARAMETER_id1_PARAM1", "value1")]);
        assert_eq!(
            ctx.get_endpoint_authorization_parameter("id1", "param1", true)
                .as_deref(),
            Some("value1")
        );
        assert!(ctx.env().peek("ENDPOINT_AUTH_PARAMETER_id1_PARAM1").is_none());
    }

    #[test]
    fn test_get_endpoint_data_parameter() {
        let ctx = context(&[("ENDPOINT_DATA_id1_PARAM1", "val1")]);
        assert_eq!(
            ctx.get_endpoint_data_parameter("id1", "param1", true).as_deref(),
            Some("val1")
        );
        assert!(ctx.env().peek("ENDPOINT_DATA_id1_PARAM1").is_some());
    }

    #[test]
    fn test_unset_required_endpoint_fields_are_absent() {
        let mut ctx = context(&[]);
        assert_eq!(ctx.get_endpoint_authorization_scheme("id1", true), None);
        assert_eq!(
            ctx.get_endpoint_authorization_parameter("id1", "noparam", true),
            None
        );
        assert_eq!(ctx.get_endpoint_data_parameter("id1", "noparam", true), None);
        assert!(matches!(
            ctx.get_endpoint_authorization("id1", true),
            Ok(None)
        ));
    }

    #[test]
    fn test_secure_files() {
        let mut ctx = context(&[
            ("SECUREFILE_NAME_f1", "signing.pfx"),
            ("SECUREFILE_TICKET_f1", "ticket"),
        ]);
        assert_eq!(ctx.get_secure_file_name("f1").as_deref(), Some("signing.pfx"));
        assert_eq!(ctx.get_secure_file_ticket("f1").as_deref(), Some("ticket"));
        assert_eq!(ctx.get_secure_file_ticket("f1"), None);
        assert_eq!(ctx.get_secure_file_name("f1").as_deref(), Some("signing.pfx"));
    }
}
