use crate::domain::{SenderId, UserData};

/// Append the configured sender unless the caller already chose one.
pub fn push_sender(
    params: &mut Vec<(String, String)>,
    sender: Option<&SenderId>,
    user_data: &UserData,
) {
    if user_data.contains_key(SenderId::FIELD) {
        return;
    }
    if let Some(sender) = sender {
        params.push((SenderId::FIELD.to_owned(), sender.as_str().to_owned()));
    }
}

/// Append user data, skipping keys the provider owns.
///
/// Returns the skipped keys so the caller can report them.
pub fn push_user_data(
    params: &mut Vec<(String, String)>,
    user_data: &UserData,
    reserved: &[&str],
) -> Vec<String> {
    let mut dropped = Vec::new();
    for (key, value) in user_data {
        if reserved.contains(&key.as_str()) {
            dropped.push(key.clone());
            continue;
        }
        params.push((key.clone(), value.clone()));
    }
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_keys_are_dropped() {
        let mut user_data = UserData::new();
        user_data.insert("login".to_owned(), "evil".to_owned());
        user_data.insert("phone".to_owned(), "79149009900".to_owned());

        let mut params = Vec::new();
        let dropped = push_user_data(&mut params, &user_data, &["login"]);

        assert_eq!(dropped, vec!["login".to_owned()]);
        assert_eq!(
            params,
            vec![("phone".to_owned(), "79149009900".to_owned())]
        );
    }

    #[test]
    fn caller_sender_wins_over_configured_sender() {
        let sender = SenderId::new("ACME").unwrap();
        let mut user_data = UserData::new();

        let mut params = Vec::new();
        push_sender(&mut params, Some(&sender), &user_data);
        assert_eq!(params, vec![("sender".to_owned(), "ACME".to_owned())]);

        user_data.insert("sender".to_owned(), "OTHER".to_owned());
        let mut params = Vec::new();
        push_sender(&mut params, Some(&sender), &user_data);
        assert!(params.is_empty());
    }
}
