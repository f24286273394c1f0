//! smsc.ru wire format: every field travels as a query parameter.

use super::form::{push_sender, push_user_data};
use crate::domain::{Credentials, Login, UserData};

pub const SMSC_PASSWORD_FIELD: &str = "psw";

/// Keys user data may never set.
pub const SMSC_RESERVED_FIELDS: [&str; 2] = [Login::FIELD, SMSC_PASSWORD_FIELD];

/// Encode the query for one send, returning the params and any user data keys
/// that were dropped because they collide with credentials.
pub fn encode_smsc_send_query(
    credentials: &Credentials,
    user_data: &UserData,
) -> (Vec<(String, String)>, Vec<String>) {
    let mut params = vec![
        (
            Login::FIELD.to_owned(),
            credentials.login.as_str().to_owned(),
        ),
        (
            SMSC_PASSWORD_FIELD.to_owned(),
            credentials.password.as_str().to_owned(),
        ),
    ];
    push_sender(&mut params, credentials.sender.as_ref(), user_data);
    let dropped = push_user_data(&mut params, user_data, &SMSC_RESERVED_FIELDS);
    (params, dropped)
}
