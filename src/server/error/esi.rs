use eve_esi::OAuthError;
use oauth2::RequestTokenError;
use thiserror::Error;

/// Typed failure of an authenticated ESI request made with a director's credentials.
///
/// Failover treats every variant the same way: the candidate failed and its message is
/// recorded as the director's last failure reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EsiFailure {
    /// The director's refresh token is missing, expired or revoked
    #[error("Credential expired or revoked: {0}")]
    CredentialExpired(String),
    /// The director no longer holds the roles required for the request
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    /// Network, server or decoding failure
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Classifies `eve_esi` errors from SSO token refreshes and authenticated ESI requests.
///
/// - SSO refusing the refresh token, an expired access token or an ESI 401 is
///   [`EsiFailure::CredentialExpired`]
/// - Missing scopes or an ESI 403 is [`EsiFailure::PermissionDenied`]
/// - Everything else is [`EsiFailure::Transport`]
impl From<eve_esi::Error> for EsiFailure {
    fn from(err: eve_esi::Error) -> Self {
        match err {
            eve_esi::Error::OAuthError(OAuthError::RequestTokenError(
                RequestTokenError::ServerResponse(response),
            )) => Self::CredentialExpired(
                response
                    .error_description()
                    .cloned()
                    .unwrap_or_else(|| response.error().to_string()),
            ),
            eve_esi::Error::OAuthError(err @ OAuthError::AccessTokenExpired()) => {
                Self::CredentialExpired(err.to_string())
            }
            eve_esi::Error::OAuthError(OAuthError::AccessTokenMissingScopes(scopes)) => {
                Self::PermissionDenied(format!("access token missing scopes {:?}", scopes))
            }
            eve_esi::Error::ReqwestError(err) => {
                match err.status().map(|status| status.as_u16()) {
                    Some(401) => Self::CredentialExpired(err.to_string()),
                    Some(403) => Self::PermissionDenied(err.to_string()),
                    _ => Self::Transport(err.to_string()),
                }
            }
            err => Self::Transport(err.to_string()),
        }
    }
}

impl From<sea_orm::DbErr> for EsiFailure {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Transport(format!("token storage unavailable: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use eve_esi::OAuthError;

    use crate::server::error::esi::EsiFailure;

    /// Expect an access token lacking the roles scope to count as missing permissions
    #[test]
    fn missing_scopes_is_permission_denied() {
        let failure = EsiFailure::from(eve_esi::Error::OAuthError(
            OAuthError::AccessTokenMissingScopes(vec![
                "esi-characters.read_corporation_roles.v1".to_string(),
            ]),
        ));

        assert!(matches!(failure, EsiFailure::PermissionDenied(_)));
    }

    /// Expect an expired access token to count as an expired credential
    #[test]
    fn expired_access_token_is_credential_expired() {
        let failure =
            EsiFailure::from(eve_esi::Error::OAuthError(OAuthError::AccessTokenExpired()));

        assert!(matches!(failure, EsiFailure::CredentialExpired(_)));
    }
}
