use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Google's public keys for Firebase ID tokens
pub const GOOGLE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Project id used by local demos; tokens are never verified against it
pub const DEMO_PROJECT: &str = "demo-project";

const JWKS_CACHE_KEY: &str = "jwks";

/// Authentication failures
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unauthorized")]
    MissingCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("JWT secret not configured")]
    JwtNotConfigured,

    #[error("Token carries no user id")]
    MissingSubject,

    #[error("Firebase not configured")]
    FirebaseNotConfigured,

    #[error("Invalid Firebase token: {0}")]
    InvalidFirebaseToken(String),

    #[error("Failed to fetch signing keys: {0}")]
    KeyFetch(#[from] reqwest::Error),
}

/// Which credential authenticated the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthSource {
    Jwt,
    Firebase,
}

/// The verified caller of a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: Option<String>,
    pub source: AuthSource,
}

/// Claims of tokens signed with the shared application secret
#[derive(Debug, Serialize, Deserialize)]
pub struct AppClaims {
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: u64,
}

impl AppClaims {
    /// First usable id among `userId`, `id` and `sub`
    pub fn subject(&self) -> Option<String> {
        [&self.user_id, &self.id]
            .into_iter()
            .flatten()
            .find_map(claim_to_string)
            .or_else(|| self.sub.clone().filter(|s| !s.is_empty()))
    }
}

fn claim_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

/// Verifies application JWTs and Firebase ID tokens
pub struct Authenticator {
    jwt_secret: Option<String>,
    firebase_project: Option<String>,
    jwks_url: String,
    http: reqwest::Client,
    jwks: moka::future::Cache<String, Arc<JwkSet>>,
}

impl Authenticator {
    pub fn new(
        jwt_secret: impl Into<String>,
        firebase_project: Option<String>,
        jwks_url: impl Into<String>,
        jwks_ttl_secs: u64,
    ) -> Self {
        let jwks = moka::future::CacheBuilder::new(1)
            .time_to_live(Duration::from_secs(jwks_ttl_secs))
            .build();

        Self {
            jwt_secret: Some(jwt_secret.into()).filter(|s: &String| !s.is_empty()),
            firebase_project: firebase_project.filter(|p| !p.trim().is_empty()),
            jwks_url: jwks_url.into(),
            http: reqwest::Client::new(),
            jwks,
        }
    }

    pub fn jwt_enabled(&self) -> bool {
        self.jwt_secret.is_some()
    }

    pub fn firebase_enabled(&self) -> bool {
        matches!(self.firebase_project.as_deref(), Some(p) if p != DEMO_PROJECT)
    }

    /// Try the bearer token first, then the Firebase token
    pub async fn authenticate(
        &self,
        bearer: Option<&str>,
        firebase_token: Option<&str>,
    ) -> Result<AuthenticatedUser, AuthError> {
        if let Some(token) = bearer {
            match self.verify_jwt(token) {
                Ok(user) => return Ok(user),
                Err(e) => tracing::debug!("Bearer token rejected: {}", e),
            }
        }

        match firebase_token {
            Some(token) => self.verify_firebase(token).await,
            None => Err(AuthError::MissingCredentials),
        }
    }

    /// Verify an HS256 token signed with the application secret.
    ///
    /// Without a configured secret every bearer token is rejected.
    pub fn verify_jwt(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let secret = self.jwt_secret.as_deref().ok_or(AuthError::JwtNotConfigured)?;
        let key = DecodingKey::from_secret(secret.as_bytes());
        let data = decode::<AppClaims>(token, &key, &Validation::new(Algorithm::HS256))?;

        let id = data.claims.subject().ok_or(AuthError::MissingSubject)?;

        Ok(AuthenticatedUser {
            id,
            email: data.claims.email,
            source: AuthSource::Jwt,
        })
    }

    /// Verify a Firebase ID token against Google's published keys
    pub async fn verify_firebase(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let project = match self.firebase_project.as_deref() {
            Some(p) if p != DEMO_PROJECT => p,
            _ => return Err(AuthError::FirebaseNotConfigured),
        };

        let header = decode_header(token)
            .map_err(|e| AuthError::InvalidFirebaseToken(e.to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidFirebaseToken("missing key id".to_string()))?;

        let keys = self.signing_keys().await?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| AuthError::InvalidFirebaseToken(format!("unknown key id {}", kid)))?;
        let key = DecodingKey::from_jwk(jwk)
            .map_err(|e| AuthError::InvalidFirebaseToken(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[project]);
        validation.set_issuer(&[format!("https://securetoken.google.com/{}", project)]);

        let data = decode::<FirebaseClaims>(token, &key, &validation)
            .map_err(|e| AuthError::InvalidFirebaseToken(e.to_string()))?;

        if data.claims.sub.is_empty() {
            return Err(AuthError::MissingSubject);
        }

        Ok(AuthenticatedUser {
            id: data.claims.sub,
            email: data.claims.email,
            source: AuthSource::Firebase,
        })
    }

    async fn signing_keys(&self) -> Result<Arc<JwkSet>, AuthError> {
        if let Some(keys) = self.jwks.get(JWKS_CACHE_KEY).await {
            return Ok(keys);
        }

        tracing::debug!("Fetching signing keys from {}", self.jwks_url);
        let keys: JwkSet = self
            .http
            .get(&self.jwks_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let keys = Arc::new(keys);
        self.jwks.insert(JWKS_CACHE_KEY.to_string(), keys.clone()).await;
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn far_future() -> u64 {
        (chrono::Utc::now() + chrono::Duration::days(1)).timestamp() as u64
    }

    fn sign(claims: serde_json::Value) -> String {
        encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
    }

    fn authenticator(project: Option<&str>) -> Authenticator {
        Authenticator::new(SECRET, project.map(String::from), GOOGLE_JWKS_URL, 60)
    }

    #[test]
    fn test_verify_jwt_user_id_claim() {
        let token = sign(serde_json::json!({ "userId": "u-1", "email": "a@b.c", "exp": far_future() }));
        let user = authenticator(None).verify_jwt(&token).unwrap();

        assert_eq!(user.id, "u-1");
        assert_eq!(user.email.as_deref(), Some("a@b.c"));
        assert_eq!(user.source, AuthSource::Jwt);
    }

    #[test]
    fn test_verify_jwt_falls_back_to_id_and_sub() {
        let auth = authenticator(None);

        let token = sign(serde_json::json!({ "id": 42, "exp": far_future() }));
        assert_eq!(auth.verify_jwt(&token).unwrap().id, "42");

        let token = sign(serde_json::json!({ "sub": "s-9", "exp": far_future() }));
        assert_eq!(auth.verify_jwt(&token).unwrap().id, "s-9");
    }

    #[test]
    fn test_verify_jwt_rejects_wrong_secret_and_missing_subject() {
        let auth = authenticator(None);

        let forged = encode(
            &Header::default(),
            &serde_json::json!({ "userId": "u-1", "exp": far_future() }),
            &EncodingKey::from_secret(b"other"),
        )
        .unwrap();
        assert!(matches!(auth.verify_jwt(&forged), Err(AuthError::InvalidToken(_))));

        let anonymous = sign(serde_json::json!({ "exp": far_future() }));
        assert!(matches!(auth.verify_jwt(&anonymous), Err(AuthError::MissingSubject)));
    }

    #[tokio::test]
    async fn test_empty_secret_rejects_bearer_tokens() {
        let auth = Authenticator::new("", None, GOOGLE_JWKS_URL, 60);
        assert!(!auth.jwt_enabled());

        let token = encode(
            &Header::default(),
            &serde_json::json!({ "userId": "victim", "exp": far_future() }),
            &EncodingKey::from_secret(b""),
        )
        .unwrap();
        assert!(matches!(auth.verify_jwt(&token), Err(AuthError::JwtNotConfigured)));

        let result = auth.authenticate(Some(&token), None).await;
        assert!(matches!(result, Err(AuthError::MissingCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_without_credentials() {
        let result = authenticator(None).authenticate(None, None).await;
        assert!(matches!(result, Err(AuthError::MissingCredentials)));
    }

    #[tokio::test]
    async fn test_bad_bearer_without_firebase_is_unauthorized() {
        let result = authenticator(None).authenticate(Some("garbage"), None).await;
        assert!(matches!(result, Err(AuthError::MissingCredentials)));
    }

    #[tokio::test]
    async fn test_firebase_not_configured() {
        for project in [None, Some(DEMO_PROJECT)] {
            let auth = authenticator(project);
            assert!(!auth.firebase_enabled());
            let result = auth.authenticate(None, Some("token")).await;
            assert!(matches!(result, Err(AuthError::FirebaseNotConfigured)));
        }
    }

    #[tokio::test]
    async fn test_firebase_unknown_key_fetches_jwks_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/jwks")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"keys":[]}"#)
            .expect(1)
            .create_async()
            .await;

        let auth = Authenticator::new(
            SECRET,
            Some("travelbunk-test".to_string()),
            format!("{}/jwks", server.url()),
            60,
        );

        let token = concat!(
            "eyJhbGciOiJSUzI1NiIsImtpZCI6InVua25vd24ta2V5IiwidHlwIjoiSldUIn0",
            ".eyJzdWIiOiJ1aWQtMSIsImF1ZCI6InRyYXZlbGJ1bmstdGVzdCIsImlzcyI6Imh0dHBzOi8vc2VjdXJldG9rZW4uZ29vZ2xlLmNvbS90cmF2ZWxidW5rLXRlc3QiLCJleHAiOjQxMDI0NDQ4MDB9",
            ".c2lnbmF0dXJl"
        );

        for _ in 0..2 {
            let result = auth.verify_firebase(token).await;
            assert!(matches!(result, Err(AuthError::InvalidFirebaseToken(_))));
        }

        mock.assert_async().await;
    }
}
