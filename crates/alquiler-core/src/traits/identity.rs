//! Authenticated-identity provider contract.

/// Yields the current bearer token and the identity encoded in it.
///
/// Implementations must be cheap to call; the transport asks for the
/// token on every request.
pub trait IdentityProvider: Send + Sync + std::fmt::Debug + 'static {
    /// The current bearer token, if the user is logged in.
    fn bearer_token(&self) -> Option<String>;

    /// The token's subject claim, usable as the student/owner identifier.
    fn subject(&self) -> Option<String>;

    /// The role carried by the token, if any.
    fn role(&self) -> Option<String> {
        None
    }
}
