use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::Error;
use crate::error::Result;

pub const SCOPE: &str = "scope";
pub const AUD: &str = "aud";
pub const EXP: &str = "exp";
pub const CLIENT_ID: &str = "client_id";
pub const SUB: &str = "sub";

/// Claims exactly as decoded from a verified token payload
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RawClaims(Map<String, Value>);

impl RawClaims {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

impl From<Map<String, Value>> for RawClaims {
    fn from(claims: Map<String, Value>) -> Self {
        Self(claims)
    }
}

impl TryFrom<Value> for RawClaims {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(claims) => Ok(Self(claims)),
            _ => Err(Error::Verification("token payload is not a JSON object".into())),
        }
    }
}

/// Shape of the `aud` claim
#[derive(Debug, Clone, PartialEq)]
pub enum Audience {
    List(Vec<String>),
    /// Anything that is not a list of strings
    Other(Value),
}

impl Audience {
    fn from_value(value: &Value) -> Self {
        let list = value.as_array().and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(String::from))
                .collect::<Option<Vec<_>>>()
        });

        match list {
            Some(list) => Audience::List(list),
            None => Audience::Other(value.clone()),
        }
    }
}

/// Validated claims of an authenticated token.
///
/// Immutable once built; the identity carries it to every authorization call.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenClaims {
    pub(crate) scope: Vec<String>,
    pub(crate) aud: Audience,
    pub(crate) exp: Option<i64>,
    pub(crate) client_id: Option<String>,
    pub(crate) sub: Option<String>,
}

impl TokenClaims {
    /// Check presence and shape of the claims the backend relies on
    pub fn from_raw(raw: &RawClaims) -> Result<Self> {
        let scope = parse_scope(raw.get(SCOPE).ok_or_else(|| Error::missing_claim(SCOPE))?)?;
        let aud = Audience::from_value(raw.get(AUD).ok_or_else(|| Error::missing_claim(AUD))?);
        let exp = raw.get(EXP).map(parse_timestamp).transpose()?;

        Ok(Self {
            scope,
            aud,
            exp,
            client_id: optional_string(raw, CLIENT_ID)?,
            sub: optional_string(raw, SUB)?,
        })
    }

    pub fn scope(&self) -> &[String] {
        &self.scope
    }

    pub fn aud(&self) -> &Audience {
        &self.aud
    }

    /// Expiration time as Unix timestamp, `None` if the token never expires
    pub fn exp(&self) -> Option<i64> {
        self.exp
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn sub(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    pub(crate) fn with_scope(self, scope: Vec<String>) -> Self {
        Self { scope, ..self }
    }
}

/// Accepts a list of strings or a single space-delimited string
fn parse_scope(value: &Value) -> Result<Vec<String>> {
    match value {
        Value::String(scopes) => Ok(scopes.split_whitespace().map(String::from).collect()),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(String::from))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Error::claim_type(SCOPE, "a list of strings")),
        _ => Err(Error::claim_type(SCOPE, "a list of strings")),
    }
}

fn parse_timestamp(value: &Value) -> Result<i64> {
    let invalid = || Error::claim_type(EXP, "an integer timestamp");

    let Value::Number(number) = value else {
        return Err(invalid());
    };
    if let Some(timestamp) = number.as_i64() {
        return Ok(timestamp);
    }

    match number.as_f64() {
        Some(timestamp) if timestamp.fract() == 0.0 && timestamp.abs() < i64::MAX as f64 => {
            Ok(timestamp as i64)
        }
        _ => Err(invalid()),
    }
}

fn optional_string(raw: &RawClaims, name: &str) -> Result<Option<String>> {
    match raw.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(Error::claim_type(name, "a string")),
    }
}
