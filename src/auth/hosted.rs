//! Hosted user pool speaking the Cognito identity-provider JSON protocol.
//!
//! Only `USER_PASSWORD_AUTH` is supported; any challenge (MFA, new password)
//! is reported as [`IdentityError::UnsupportedChallenge`].

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::auth::{AuthEvent, IdentityError, IdentityProvider, SessionFile, StoredSession};
use crate::config::{IdentityConfig, SecureString};
use crate::model::User;

const AMZ_JSON: &str = "application/x-amz-json-1.1";
const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const EVENT_BUFFER: usize = 16;

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthRequest<'a> {
    auth_flow: &'static str,
    client_id: &'a str,
    auth_parameters: AuthParameters<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum AuthParameters<'a> {
    Password {
        #[serde(rename = "USERNAME")]
        username: &'a str,
        #[serde(rename = "PASSWORD")]
        password: &'a str,
    },
    Refresh {
        #[serde(rename = "REFRESH_TOKEN")]
        refresh_token: &'a str,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    #[serde(default)]
    authentication_result: Option<AuthenticationResult>,
    #[serde(default)]
    challenge_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    access_token: String,
    id_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct GetUserRequest<'a> {
    access_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetUserResponse {
    username: String,
}

#[derive(Deserialize)]
struct ProviderError {
    #[serde(rename = "__type", default)]
    kind: String,
    #[serde(alias = "Message", default)]
    message: String,
}

pub struct HostedIdentity {
    client: Client,
    endpoint: String,
    client_id: String,
    store: SessionFile,
    session: RwLock<Option<StoredSession>>,
    events: broadcast::Sender<AuthEvent>,
}

impl HostedIdentity {
    /// Restores any saved session; an unreadable session file is logged and ignored.
    pub fn new(config: &IdentityConfig, timeout: Duration) -> Result<Self, IdentityError> {
        let client = Client::builder().timeout(timeout).build()?;
        let store = SessionFile::new(config.session_path());
        let session = match store.load() {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable session file");
                None
            }
        };
        let (events, _) = broadcast::channel(EVENT_BUFFER);

        Ok(Self {
            client,
            endpoint: config.endpoint.trim().to_string(),
            client_id: config.client_id.trim().to_string(),
            store,
            session: RwLock::new(session),
            events,
        })
    }

    pub fn session_file(&self) -> &SessionFile {
        &self.store
    }

    async fn call<B, T>(&self, action: &str, body: &B) -> Result<T, IdentityError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)?;
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, AMZ_JSON)
            .header("X-Amz-Target", format!("{}.{}", TARGET_PREFIX, action))
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            let error: ProviderError =
                serde_json::from_slice(&bytes).unwrap_or_else(|_| ProviderError {
                    kind: format!("HTTP {}", status.as_u16()),
                    message: String::from_utf8_lossy(&bytes).into_owned(),
                });
            let kind = error.kind.rsplit('#').next().unwrap_or_default().to_string();
            return Err(IdentityError::Rejected {
                kind,
                message: error.message,
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn fetch_user(&self, access_token: &SecureString) -> Result<User, IdentityError> {
        let response: GetUserResponse = self
            .call(
                "GetUser",
                &GetUserRequest {
                    access_token: access_token.expose(),
                },
            )
            .await?;
        Ok(User::new(response.username))
    }

    /// Trade the stored refresh token for fresh tokens. `Ok(None)` when
    /// there is no refresh token or the provider refused it.
    async fn refresh(&self) -> Result<Option<SecureString>, IdentityError> {
        let refresh_token = self
            .session
            .read()
            .as_ref()
            .and_then(|session| session.refresh_token.clone());
        let Some(refresh_token) = refresh_token else {
            return Ok(None);
        };
        if self.client_id.is_empty() {
            return Ok(None);
        }

        let request = InitiateAuthRequest {
            auth_flow: "REFRESH_TOKEN_AUTH",
            client_id: &self.client_id,
            auth_parameters: AuthParameters::Refresh {
                refresh_token: refresh_token.expose(),
            },
        };
        let response: InitiateAuthResponse = match self.call("InitiateAuth", &request).await {
            Ok(response) => response,
            Err(err) if is_token_rejected(&err) => return Ok(None),
            Err(err) => return Err(err),
        };
        let Some(tokens) = response.authentication_result else {
            return Ok(None);
        };

        let access_token = SecureString::new(tokens.access_token);
        let updated = {
            let mut guard = self.session.write();
            let Some(session) = guard.as_mut() else {
                // Signed out while the refresh was in flight.
                return Ok(None);
            };
            session.access_token = access_token.clone();
            session.id_token = SecureString::new(tokens.id_token);
            if let Some(rotated) = tokens.refresh_token {
                session.refresh_token = Some(SecureString::new(rotated));
            }
            session.clone()
        };

        if let Err(err) = self.store.save(&updated) {
            tracing::warn!(error = %err, "refreshed session will not survive a restart");
        }
        tracing::info!(user = %updated.username, "session refreshed");
        Ok(Some(access_token))
    }

    /// Drop a session the provider no longer accepts.
    fn expire(&self) -> IdentityError {
        let had_session = self.session.write().take().is_some();
        if let Err(err) = self.store.clear() {
            tracing::warn!(error = %err, "could not remove expired session");
        }
        if had_session {
            tracing::info!("session expired; signed out");
            self.publish(AuthEvent::SignedOut);
        }
        IdentityError::NotSignedIn
    }

    fn publish(&self, event: AuthEvent) {
        // No receivers is fine: nobody has mounted yet.
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl IdentityProvider for HostedIdentity {
    async fn current_user(&self) -> Result<User, IdentityError> {
        let access_token = self
            .session
            .read()
            .as_ref()
            .map(|session| session.access_token.clone())
            .ok_or(IdentityError::NotSignedIn)?;
        match self.fetch_user(&access_token).await {
            Err(err) if is_token_rejected(&err) => {}
            result => return result,
        }

        let Some(access_token) = self.refresh().await? else {
            return Err(self.expire());
        };
        match self.fetch_user(&access_token).await {
            Err(err) if is_token_rejected(&err) => Err(self.expire()),
            result => result,
        }
    }

    async fn sign_in(&self, username: &str, password: &SecureString) -> Result<User, IdentityError> {
        if self.client_id.is_empty() {
            return Err(IdentityError::NotConfigured(
                "identity.client_id is not set".to_string(),
            ));
        }

        let response: InitiateAuthResponse = self
            .call(
                "InitiateAuth",
                &InitiateAuthRequest {
                    auth_flow: "USER_PASSWORD_AUTH",
                    client_id: &self.client_id,
                    auth_parameters: AuthParameters::Password {
                        username,
                        password: password.expose(),
                    },
                },
            )
            .await?;

        let tokens = match (response.authentication_result, response.challenge_name) {
            (Some(tokens), _) => tokens,
            (None, Some(challenge)) => return Err(IdentityError::UnsupportedChallenge(challenge)),
            (None, None) => {
                return Err(IdentityError::Rejected {
                    kind: "InvalidResponse".to_string(),
                    message: "no authentication result".to_string(),
                })
            }
        };

        let access_token = SecureString::new(tokens.access_token);
        let user = self.fetch_user(&access_token).await?;
        let session = StoredSession {
            username: user.username.clone(),
            access_token,
            id_token: SecureString::new(tokens.id_token),
            refresh_token: tokens.refresh_token.map(SecureString::new),
        };

        if let Err(err) = self.store.save(&session) {
            tracing::warn!(error = %err, "session will not survive a restart");
        }
        *self.session.write() = Some(session);
        tracing::info!(user = %user.username, "signed in");
        self.publish(AuthEvent::SignedIn);
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        let had_session = self.session.write().take().is_some();
        self.store.clear()?;
        if had_session {
            tracing::info!("signed out");
        }
        self.publish(AuthEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    fn id_token(&self) -> Option<SecureString> {
        self.session
            .read()
            .as_ref()
            .map(|session| session.id_token.clone())
    }
}

fn is_token_rejected(err: &IdentityError) -> bool {
    matches!(err, IdentityError::Rejected { kind, .. } if kind == "NotAuthorizedException")
}
