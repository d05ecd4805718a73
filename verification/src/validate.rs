//! Syntactic validation of one attestation attempt.

use crate::handler::AttestationRequest;
use thiserror::Error;
use vouch_types::VerificationParams;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationFault {
    #[error("verifier name must not be empty")]
    EmptyName,

    #[error("verifier name exceeds {max} characters")]
    NameTooLong { max: usize },

    #[error("verifier email must not be empty")]
    EmptyEmail,

    #[error("verifier email is not a plausible address")]
    MalformedEmail,

    #[error("message exceeds {max} characters")]
    MessageTooLong { max: usize },
}

/// Check the client-supplied fields of a request. Signal presence is the
/// handler's concern, not this function's.
pub fn validate_request(
    request: &AttestationRequest,
    params: &VerificationParams,
) -> Result<(), ValidationFault> {
    let name = request.verifier_name.trim();
    if name.is_empty() {
        return Err(ValidationFault::EmptyName);
    }
    if name.chars().count() > params.max_name_len {
        return Err(ValidationFault::NameTooLong {
            max: params.max_name_len,
        });
    }

    let email = request.verifier_email.trim();
    if email.is_empty() {
        return Err(ValidationFault::EmptyEmail);
    }
    if !email_is_plausible(email) {
        return Err(ValidationFault::MalformedEmail);
    }

    if let Some(message) = &request.message {
        if message.chars().count() > params.max_message_len {
            return Err(ValidationFault::MessageTooLong {
                max: params.max_message_len,
            });
        }
    }

    Ok(())
}

/// Syntactic email check: one `@`, non-empty local part, dotted domain, no
/// whitespace. Deliberately shallow — deliverability is not this engine's
/// problem.
fn email_is_plausible(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let mut labels = domain.split('.');
    domain.contains('.') && labels.all(|l| !l.is_empty())
}
