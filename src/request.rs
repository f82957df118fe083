//! Request and response records exchanged with the transport layer.

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::opc::CoreFunction;
use crate::vector::{AuthVector, AvAssembler};

/// `{ op, secretKey, sqn?, rand? }`, every field hex encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,
    #[serde(
        default,
        rename = "secretKey",
        skip_serializing_if = "Option::is_none"
    )]
    pub secret_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sqn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rand: Option<String>,
}

impl AuthRequest {
    pub fn new(op: impl Into<String>, secret_key: impl Into<String>) -> Self {
        AuthRequest {
            op: Some(op.into()),
            secret_key: Some(secret_key.into()),
            ..Default::default()
        }
    }

    pub fn with_sqn(mut self, sqn: impl Into<String>) -> Self {
        self.sqn = Some(sqn.into());
        self
    }

    pub fn with_rand(mut self, rand: impl Into<String>) -> Self {
        self.rand = Some(rand.into());
        self
    }

    /// Parse a JSON request body.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| Error::MalformedInput {
            field: "body",
            reason: e.to_string(),
        })
    }
}

/// Either the vector or `{ error: true, message }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthResponse {
    Vector(AuthVector),
    Failure { error: bool, message: String },
}

impl AuthResponse {
    pub fn failure(err: &Error) -> Self {
        AuthResponse::Failure {
            error: true,
            message: err.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, AuthResponse::Failure { .. })
    }
}

impl From<Result<AuthVector>> for AuthResponse {
    fn from(result: Result<AuthVector>) -> Self {
        match result {
            Ok(av) => AuthResponse::Vector(av),
            Err(err) => AuthResponse::failure(&err),
        }
    }
}

/// Validate a request and generate its vector.
///
/// `op` and `secretKey` are required; absent and empty values are both
/// reported as [`Error::MissingParameter`].
pub fn handle_request<C, R>(
    assembler: &mut AvAssembler<C, R>,
    request: &AuthRequest,
) -> Result<AuthVector>
where
    C: CoreFunction,
    R: RngCore + CryptoRng,
{
    let result = generate_for(assembler, request);
    if let Err(err) = &result {
        tracing::debug!(error = %err, "rejected authentication request");
    }
    result
}

fn generate_for<C, R>(
    assembler: &mut AvAssembler<C, R>,
    request: &AuthRequest,
) -> Result<AuthVector>
where
    C: CoreFunction,
    R: RngCore + CryptoRng,
{
    let (op, key) = match (present(&request.op), present(&request.secret_key)) {
        (Some(op), Some(key)) => (op, key),
        (None, None) => return Err(Error::MissingParameter("op and secretKey")),
        (None, _) => return Err(Error::MissingParameter("op")),
        (_, None) => return Err(Error::MissingParameter("secretKey")),
    };

    let keys = assembler.key_material(op, key)?;
    assembler.generate(&keys, request.sqn.as_deref(), request.rand.as_deref())
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
