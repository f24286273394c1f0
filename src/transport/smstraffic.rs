//! smstraffic.ru wire format: form-encoded POSTs authorized by a session token.

use super::form::{push_sender, push_user_data};
use crate::domain::{Credentials, Login, SenderId, UserData};

pub const SMSTRAFFIC_PASSWORD_FIELD: &str = "pass";
pub const SMSTRAFFIC_TOKEN_FIELD: &str = "token";

pub fn encode_smstraffic_auth_form(credentials: &Credentials) -> Vec<(String, String)> {
    vec![
        (
            Login::FIELD.to_owned(),
            credentials.login.as_str().to_owned(),
        ),
        (
            SMSTRAFFIC_PASSWORD_FIELD.to_owned(),
            credentials.password.as_str().to_owned(),
        ),
    ]
}

/// Encode the body for one send. A `token` key in user data is dropped and
/// reported back.
pub fn encode_smstraffic_send_form(
    token: &str,
    sender: Option<&SenderId>,
    user_data: &UserData,
) -> (Vec<(String, String)>, Vec<String>) {
    let mut params = vec![(SMSTRAFFIC_TOKEN_FIELD.to_owned(), token.to_owned())];
    push_sender(&mut params, sender, user_data);
    let dropped = push_user_data(&mut params, user_data, &[SMSTRAFFIC_TOKEN_FIELD]);
    (params, dropped)
}
